//! Collaborator contracts between the filter registry and its host.
//!
//! The registry never looks anything up from global state. A host hands it:
//! - a [`Controller`], which knows which operations it exposes and how to
//!   invoke them with itself as the receiver
//! - an [`ActionResolver`], which names the action the router picked for the
//!   current request
//!
//! [`MethodTable`] is a ready-made controller built from named handlers over an
//! explicit state value.

pub mod method_table;

pub use method_table::MethodTable;

/// A controller whose named operations can be run as filters.
pub trait Controller {
    /// Error produced by an invoked operation. The registry returns it unchanged.
    type Error;

    /// Whether the controller exposes an operation called `name`.
    fn responds_to(&self, name: &str) -> bool;

    /// Call the operation `name` with this controller as its receiver.
    fn invoke(&mut self, name: &str) -> Result<(), Self::Error>;
}

/// Resolves the action currently being dispatched.
pub trait ActionResolver {
    fn current_action(&self) -> &str;
}

impl ActionResolver for str {
    fn current_action(&self) -> &str {
        self
    }
}

impl ActionResolver for String {
    fn current_action(&self) -> &str {
        self.as_str()
    }
}

impl<R: ActionResolver + ?Sized> ActionResolver for &R {
    fn current_action(&self) -> &str {
        (**self).current_action()
    }
}
