//! Core of the fabrik construction toolkit.
//!
//! This crate provides the pieces every factory shares:
//! - [`Value`], [`Blueprint`] and [`Instance`]: the dynamic value model
//! - [`namify`]: canonical names used as registry keys and method names
//! - [`finalize`]: the post-dispatch step applying production hooks or
//!   plain instantiation
//! - [`Producer`] hooks ([`Classer`], [`Flexer`], [`Instancer`])
//! - [`Factory`], [`Manager`] and the [`Constructor`] sum type, with the
//!   [`is_constructor`] compatibility check
//! - [`Settings`]: configuration threaded through every entry point

pub mod blueprint;
pub mod constructor;
pub mod error;
pub mod finalize;
mod macros;
pub mod naming;
pub mod producers;
pub mod settings;
pub mod traits;
pub mod value;

pub use blueprint::{Blueprint, BlueprintReg, FieldDef, Instance};
pub use constructor::{ConstructFn, Constructor, is_buildable, is_constructor};
pub use error::{ConfigError, FactoryError, Result};
pub use finalize::{call, finalize, inject_attributes};
pub use naming::{canonical_name, namify, snakify};
pub use producers::{Classer, Flexer, Instancer};
pub use settings::Settings;
pub use traits::{Factory, Inspect, Manager, Producer};
pub use value::{Kind, Parameters, Value};

#[doc(hidden)]
pub mod __private {
	pub use inventory;
}
