//! Stock production hooks.
//!
//! Attach one to a blueprint with [`Blueprint::with_producer`] (or the
//! `producer:` entry of [`blueprint!`](crate::blueprint!)), or to a factory as
//! its alternate inspector.
//!
//! [`Blueprint::with_producer`]: crate::Blueprint::with_producer

use crate::error::{FactoryError, Result};
use crate::finalize::{call, inject_attributes};
use crate::settings::Settings;
use crate::traits::Producer;
use crate::value::{Parameters, Value};

/// Always produces a type.
///
/// Parameters are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classer;

impl Producer for Classer {
	fn produce(&self, item: Value, _: Option<&Parameters>, _: &Settings) -> Result<Value> {
		match item {
			Value::Type(_) => Ok(item),
			Value::Object(inst) => Ok(Value::Type(inst.blueprint())),
			other => Err(FactoryError::NotAType {
				what: other.to_string(),
			}),
		}
	}
}

/// Produces an instance only when parameters are passed.
///
/// Without parameters the item passes through untouched. Types are called
/// with the parameters; anything else gets them injected as attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flexer;

impl Producer for Flexer {
	fn produce(
		&self,
		item: Value,
		parameters: Option<&Parameters>,
		settings: &Settings,
	) -> Result<Value> {
		match parameters {
			None => Ok(item),
			Some(parameters) if matches!(item, Value::Type(_)) => call(&item, parameters),
			Some(parameters) => inject_attributes(item, parameters, None, settings),
		}
	}
}

/// Always produces an instance.
///
/// Types are called (with no parameters if none were passed); other items
/// get the parameters injected as attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Instancer;

impl Producer for Instancer {
	fn produce(
		&self,
		item: Value,
		parameters: Option<&Parameters>,
		settings: &Settings,
	) -> Result<Value> {
		let is_type = matches!(item, Value::Type(_));
		match parameters {
			None if is_type => call(&item, &Parameters::new()),
			None => Ok(item),
			Some(parameters) if is_type => call(&item, parameters),
			Some(parameters) => inject_attributes(item, parameters, None, settings),
		}
	}
}
