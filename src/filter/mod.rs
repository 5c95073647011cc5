//! Before-action filters for controllers.
//!
//! A filter is a named controller operation that runs before the requested
//! action. Each filter carries a rule deciding which actions it runs for:
//! - `apply(name)` runs it for every action
//! - `apply(name, only(...))` runs it only for the listed actions
//! - `apply(name, except(...))` runs it for every action but the listed ones
//!
//! `skip` replaces an applied filter's rule with an inverted one: `skip(name,
//! only(...))` runs it for every action except the listed ones, and a bare
//! `skip(name)` turns it off entirely.
//!
//! # Example
//!
//! ```
//! use solifilter::controller::MethodTable;
//! use solifilter::filter::{FilterOptions, FilterRegistry};
//!
//! let mut posts = MethodTable::new(Vec::new(), |name| format!("no method {}", name))
//!     .method("authenticate", |log: &mut Vec<&'static str>| {
//!         log.push("authenticate");
//!         Ok(())
//!     })
//!     .method("load_post", |log: &mut Vec<&'static str>| {
//!         log.push("load_post");
//!         Ok(())
//!     });
//!
//! let mut filters = FilterRegistry::new(&mut posts, "index");
//! filters.apply("authenticate", FilterOptions::new())?;
//! filters.apply("load_post", FilterOptions::new().only(["show", "edit"]))?;
//! filters.run().unwrap();
//!
//! assert_eq!(posts.state(), &vec!["authenticate"]);
//! # Ok::<(), solifilter::error::FilterError>(())
//! ```

pub mod options;
pub mod registry;

#[cfg(test)]
mod tests;

pub use options::{prepare_options, Condition, FilterOptions, FilterRule, Names};
pub use registry::{FilterEntry, FilterRegistry};
