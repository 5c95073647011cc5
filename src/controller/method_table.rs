//! A controller assembled from named handlers.
//!
//! Handlers receive the controller state explicitly as `&mut T`, which is how
//! a filter gets at the same instance data the action will see.
//!
//! ```
//! use solifilter::controller::{Controller, MethodTable};
//!
//! #[derive(Default)]
//! struct Posts {
//!     current_user: Option<String>,
//! }
//!
//! let mut posts = MethodTable::new(Posts::default(), |name| format!("no method {}", name))
//!     .method("load_user", |posts: &mut Posts| {
//!         posts.current_user = Some("ada".to_string());
//!         Ok(())
//!     });
//!
//! assert!(posts.responds_to("load_user"));
//! posts.invoke("load_user").unwrap();
//! assert_eq!(posts.state().current_user.as_deref(), Some("ada"));
//! ```

use std::fmt;

use indexmap::IndexMap;

use super::Controller;

type Handler<T, E> = Box<dyn Fn(&mut T) -> Result<(), E>>;

/// Named handlers over a state value `T`.
pub struct MethodTable<T, E> {
    state: T,
    methods: IndexMap<String, Handler<T, E>>,
    missing: fn(&str) -> E,
}

impl<T, E> MethodTable<T, E> {
    /// Create an empty table. `missing` builds the error for a direct
    /// `invoke` of a name that was never defined.
    pub fn new(state: T, missing: fn(&str) -> E) -> Self {
        Self {
            state,
            methods: IndexMap::new(),
            missing,
        }
    }

    /// Builder form of [`define`](Self::define).
    pub fn method<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&mut T) -> Result<(), E> + 'static,
    {
        self.define(name, handler);
        self
    }

    /// Define (or redefine) the handler for `name`.
    pub fn define<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&mut T) -> Result<(), E> + 'static,
    {
        self.methods.insert(name.to_string(), Box::new(handler));
    }

    /// Names of all defined methods, in definition order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub fn state(&self) -> &T {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut T {
        &mut self.state
    }

    pub fn into_state(self) -> T {
        self.state
    }
}

impl<T, E> Controller for MethodTable<T, E> {
    type Error = E;

    fn responds_to(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    fn invoke(&mut self, name: &str) -> Result<(), E> {
        match self.methods.get(name) {
            Some(handler) => handler(&mut self.state),
            None => Err((self.missing)(name)),
        }
    }
}

impl<T: fmt::Debug, E> fmt::Debug for MethodTable<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTable")
            .field("state", &self.state)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}
