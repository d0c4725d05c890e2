//! Factories that turn a request into a built value.
//!
//! A request names what to build: a registry key, a subclass name, an item
//! whose type picks a creation method, or a prototype to clone. The matching
//! factory resolves it to a buildable value and [`finalize`] applies the
//! caller's parameters, either through the value's production hook or by
//! calling the type.
//!
//! ```ignore
//! use fabrik::prelude::*;
//!
//! blueprint!(CONFIG, { name: "Config", fields: [level = 0i64] });
//!
//! let settings = Settings::default();
//! let desk = Registrar::new("desk").with("cfg", Value::Type(&CONFIG), &settings)?;
//! let mut params = Parameters::new();
//! params.insert("level".into(), Value::Int(3));
//! let config = desk.create_with(Value::from("cfg"), Some(&params), &settings)?;
//! ```

pub use fabrik_assembly::{Assembler, Manufacturer};
pub use fabrik_core::*;
pub use fabrik_dispatch::{
	BuilderFn, Delegate, MethodTable, Registrar, Scribe, Sourcerer, Subclasser,
};

/// Everything needed to declare blueprints and run factories.
pub mod prelude {
	pub use fabrik_assembly::{Assembler, Manufacturer};
	pub use fabrik_core::{
		Blueprint, Classer, Constructor, Factory, FactoryError, Flexer, Instance, Instancer, Kind,
		Manager, Parameters, Producer, Settings, Value, blueprint, finalize,
	};
	pub use fabrik_dispatch::{Delegate, Registrar, Scribe, Sourcerer, Subclasser};
}
