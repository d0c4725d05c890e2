//! The closed set of constructor kinds and the compatibility check.

use core::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::finalize::finalize;
use crate::settings::Settings;
use crate::traits::{Factory, Manager};
use crate::value::{Parameters, Value};

/// Signature of a bare constructor closure.
pub type ConstructFn =
	Arc<dyn Fn(Value, Option<&Parameters>, &Settings) -> Result<Value> + Send + Sync>;

/// Anything that can be asked to create an item.
#[derive(Clone)]
pub enum Constructor {
	/// A factory family member.
	Factory(Arc<dyn Factory>),
	/// A manager family member; `create` runs `manage`.
	Manager(Arc<dyn Manager>),
	/// A bare closure exposing a construction entry point but belonging to
	/// no family.
	Closure {
		/// Name used for keys and diagnostics.
		name: String,
		/// Entry point.
		call: ConstructFn,
	},
}

impl Constructor {
	/// Wraps a factory.
	pub fn factory<F: Factory + 'static>(factory: F) -> Self {
		Constructor::Factory(Arc::new(factory))
	}

	/// Wraps a manager.
	pub fn manager<M: Manager + 'static>(manager: M) -> Self {
		Constructor::Manager(Arc::new(manager))
	}

	/// Wraps a closure.
	pub fn closure<F>(name: impl Into<String>, call: F) -> Self
	where
		F: Fn(Value, Option<&Parameters>, &Settings) -> Result<Value> + Send + Sync + 'static,
	{
		Constructor::Closure {
			name: name.into(),
			call: Arc::new(call),
		}
	}

	/// Returns the constructor's name.
	pub fn name(&self) -> &str {
		match self {
			Constructor::Factory(f) => f.name(),
			Constructor::Manager(m) => m.name(),
			Constructor::Closure { name, .. } => name,
		}
	}

	/// Creates an item.
	///
	/// A manager's result is finalized with `parameters`.
	pub fn create(
		&self,
		item: Value,
		parameters: Option<&Parameters>,
		settings: &Settings,
	) -> Result<Value> {
		match self {
			Constructor::Factory(f) => f.create_with(item, parameters, settings),
			Constructor::Manager(m) => {
				let managed = m.manage(item, settings)?;
				finalize(managed, parameters, None, settings)
			}
			Constructor::Closure { call, .. } => call(item, parameters, settings),
		}
	}
}

impl fmt::Debug for Constructor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Constructor::Factory(factory) => f.debug_tuple("Factory").field(&factory.name()).finish(),
			Constructor::Manager(manager) => f.debug_tuple("Manager").field(&manager.name()).finish(),
			Constructor::Closure { name, .. } => f.debug_tuple("Closure").field(name).finish(),
		}
	}
}

/// Returns whether `candidate` is a compatible constructor.
///
/// Strict: only factory and manager family members qualify. Relaxed: any
/// constructor with a callable entry point qualifies, which every variant
/// has by construction. A family member always has its entry point, so it
/// qualifies under both rules.
pub fn is_constructor(candidate: &Constructor, settings: &Settings) -> bool {
	match candidate {
		Constructor::Factory(_) | Constructor::Manager(_) => true,
		Constructor::Closure { .. } => !settings.strict,
	}
}

/// Returns whether `value` may be stored in a registry.
///
/// Strict: only types and objects. Relaxed: any value except null.
pub fn is_buildable(value: &Value, settings: &Settings) -> bool {
	match value {
		Value::Type(_) | Value::Object(_) => true,
		Value::Null => false,
		_ => !settings.strict,
	}
}
