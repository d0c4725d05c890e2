//! Post-dispatch finalization.

use crate::error::{FactoryError, Result};
use crate::settings::Settings;
use crate::traits::Inspect;
use crate::value::{Parameters, Value};

/// Finalizes a freshly built item.
///
/// `inspector` defaults to `item`. If the inspector exposes a production
/// hook, the hook's result is returned as is. Otherwise the item is returned
/// unchanged when `parameters` is `None`, or called with them.
///
/// # Errors
///
/// Without a hook, supplying parameters for a non-callable item fails with
/// [`FactoryError::NotCallable`]; instantiation errors propagate.
pub fn finalize(
	item: Value,
	parameters: Option<&Parameters>,
	inspector: Option<&dyn Inspect>,
	settings: &Settings,
) -> Result<Value> {
	let hook = match inspector {
		Some(inspector) => inspector.production_hook(),
		None => item.production_hook(),
	};
	if let Some(hook) = hook {
		tracing::trace!(item = item.type_name(), "finalize: production hook");
		return hook.produce(item, parameters, settings);
	}
	match parameters {
		None => Ok(item),
		Some(parameters) => {
			tracing::trace!(item = item.type_name(), "finalize: calling item");
			call(&item, parameters)
		}
	}
}

/// Calls `item` with `parameters` as keyword arguments.
pub fn call(item: &Value, parameters: &Parameters) -> Result<Value> {
	match item {
		Value::Type(bp) => Ok(Value::Object(bp.instantiate(parameters)?)),
		other => Err(FactoryError::NotCallable {
			what: other.to_string(),
		}),
	}
}

/// Sets each parameter as an attribute on `item`.
///
/// With `overwrite` off (or `None` and the settings' overwrite rule off),
/// existing attributes are left alone.
///
/// # Errors
///
/// Returns [`FactoryError::NotAnObject`] if `item` is not an object and
/// there is something to inject.
pub fn inject_attributes(
	mut item: Value,
	parameters: &Parameters,
	overwrite: Option<bool>,
	settings: &Settings,
) -> Result<Value> {
	if parameters.is_empty() {
		return Ok(item);
	}
	let overwrite = overwrite.unwrap_or(settings.overwrite);
	let Some(inst) = item.as_object_mut() else {
		return Err(FactoryError::NotAnObject {
			what: item.to_string(),
		});
	};
	for (key, value) in parameters {
		if overwrite || !inst.has(key) {
			inst.set(key.clone(), value.clone());
		}
	}
	Ok(item)
}

#[cfg(test)]
mod tests;
