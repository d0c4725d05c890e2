//! Dispatch strategies.
//!
//! Each factory routes a request to a concrete buildable value and hands it
//! to [`finalize`](fabrik_core::finalize):
//! - [`Registrar`]: exact key lookup in an explicit registry
//! - [`Subclasser`]: exact key lookup in the subclass index of a blueprint
//! - [`Delegate`]: calls `from_<name>` where `<name>` is the item's canonical
//!   name
//! - [`Sourcerer`]: calls the method paired with the first kind the item
//!   matches
//! - [`Scribe`]: clones an item, or its own prototype

mod delegate;
mod lookup;
mod methods;
mod registrar;
mod scribe;
mod sourcerer;
mod subclasser;

pub use delegate::Delegate;
pub use methods::{BuilderFn, MethodTable};
pub use registrar::Registrar;
pub use scribe::Scribe;
pub use sourcerer::Sourcerer;
pub use subclasser::Subclasser;
