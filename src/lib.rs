//! Solifilter: before-action filters for controllers.
//!
//! This is the library root that exports all modules.
//!
//! # Overview
//!
//! - [`filter`]: the filter registry with its `only`/`except` rules
//! - [`controller`]: the contracts a host implements (controller, action resolver)
//! - [`config`]: filter setup described as JSON or YAML
//! - [`error`]: registration and configuration errors

pub mod config;
pub mod controller;
pub mod error;
pub mod filter;

pub use config::{FilterConfig, FilterDirective};
pub use controller::{ActionResolver, Controller, MethodTable};
pub use error::{ConfigError, FilterError};
pub use filter::{Condition, FilterEntry, FilterOptions, FilterRegistry, Names};
