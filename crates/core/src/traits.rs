use crate::blueprint::{Blueprint, Instance};
use crate::error::Result;
use crate::settings::{self, Settings};
use crate::value::{Parameters, Value};

/// Production hook: customizes how a built item is finalized.
///
/// When a hook is found, it owns every decision about instantiation and
/// attribute injection; [`finalize`](crate::finalize) returns its result
/// unchanged.
pub trait Producer: Send + Sync {
	/// Modifies `item`, possibly incorporating `parameters`.
	fn produce(
		&self,
		item: Value,
		parameters: Option<&Parameters>,
		settings: &Settings,
	) -> Result<Value>;
}

/// Something that may expose a production hook.
pub trait Inspect {
	/// Returns the hook declared by this inspector, if any.
	fn production_hook(&self) -> Option<&'static dyn Producer>;
}

/// A blueprint's own hook wins; otherwise the first ancestor exposing one,
/// searched depth first with parents in declaration order.
impl Inspect for Blueprint {
	fn production_hook(&self) -> Option<&'static dyn Producer> {
		self.lineage().into_iter().find_map(|bp| bp.producer)
	}
}

impl Inspect for Instance {
	fn production_hook(&self) -> Option<&'static dyn Producer> {
		self.blueprint().production_hook()
	}
}

impl Inspect for Value {
	fn production_hook(&self) -> Option<&'static dyn Producer> {
		match self {
			Value::Type(bp) => bp.production_hook(),
			Value::Object(inst) => inst.production_hook(),
			_ => None,
		}
	}
}

/// A constructor that builds or transforms an item.
pub trait Factory: Send + Sync {
	/// Name of the factory, used for keys and diagnostics.
	fn name(&self) -> &str;

	/// Creates an item from `item`, finalizing it with `parameters`.
	fn create_with(
		&self,
		item: Value,
		parameters: Option<&Parameters>,
		settings: &Settings,
	) -> Result<Value>;

	/// Like [`create_with`](Self::create_with), using the process-wide
	/// settings.
	fn create(&self, item: Value, parameters: Option<&Parameters>) -> Result<Value> {
		self.create_with(item, parameters, &settings::current())
	}
}

/// Directs construction across several constructors.
pub trait Manager: Send + Sync {
	/// Name of the manager, used for keys and diagnostics.
	fn name(&self) -> &str;

	/// Manages construction of `item`.
	fn manage(&self, item: Value, settings: &Settings) -> Result<Value>;
}
