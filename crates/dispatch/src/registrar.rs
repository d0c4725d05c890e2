use fabrik_core::{
	FactoryError, Inspect, Parameters, Producer, Result, Settings, Value, finalize, is_buildable,
};
use indexmap::IndexMap;

use crate::lookup::{copy_entry, key_of};

/// Builds items from an explicit registry.
///
/// Lookups return a deep copy of the stored value, so repeated requests for
/// the same key never share state with each other or with the registry.
pub struct Registrar {
	name: String,
	registry: IndexMap<String, Value>,
	producer: Option<&'static dyn Producer>,
}

impl Registrar {
	/// Creates an empty registrar.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			registry: IndexMap::new(),
			producer: None,
		}
	}

	/// Uses `producer` as the alternate inspector during finalization.
	pub fn with_producer(mut self, producer: &'static dyn Producer) -> Self {
		self.producer = Some(producer);
		self
	}

	/// Adds `value` under `key`, returning the value it replaced.
	///
	/// # Errors
	///
	/// Returns [`FactoryError::Incompatible`] if `value` fails
	/// [`is_buildable`]; the registry is left untouched.
	pub fn add(
		&mut self,
		key: impl Into<String>,
		value: Value,
		settings: &Settings,
	) -> Result<Option<Value>> {
		if !is_buildable(&value, settings) {
			return Err(FactoryError::Incompatible {
				what: value.to_string(),
			});
		}
		let key = key.into();
		tracing::debug!(registry = %self.name, %key, "registered entry");
		Ok(self.registry.insert(key, value))
	}

	/// Builder form of [`add`](Self::add).
	pub fn with(mut self, key: impl Into<String>, value: Value, settings: &Settings) -> Result<Self> {
		self.add(key, value, settings)?;
		Ok(self)
	}

	/// Returns the stored value for `key`.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.registry.get(key)
	}

	/// Returns true if `key` is registered.
	pub fn contains(&self, key: &str) -> bool {
		self.registry.contains_key(key)
	}

	/// Returns the registered keys in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.registry.keys().map(String::as_str)
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.registry.len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.registry.is_empty()
	}

	fn inspector(&self) -> Option<&dyn Inspect> {
		self.producer.map(|_| self as &dyn Inspect)
	}
}

impl Inspect for Registrar {
	fn production_hook(&self) -> Option<&'static dyn Producer> {
		self.producer
	}
}

impl fabrik_core::Factory for Registrar {
	fn name(&self) -> &str {
		&self.name
	}

	fn create_with(
		&self,
		item: Value,
		parameters: Option<&Parameters>,
		settings: &Settings,
	) -> Result<Value> {
		let key = key_of(&item, settings);
		let built = copy_entry(
			&self.registry,
			&key,
			|| format!("the {} registry", self.name),
			settings,
		)?;
		tracing::debug!(registry = %self.name, %key, "resolved registry entry");
		finalize(built, parameters, self.inspector(), settings)
	}
}

#[cfg(test)]
mod tests {
	use fabrik_core::{Blueprint, Classer, Factory, FieldDef, Instance};
	use pretty_assertions::assert_eq;

	use super::*;

	static CONFIG_CLASS: Blueprint = Blueprint {
		fields: &[FieldDef {
			name: "level",
			default: Some(|| Value::Int(0)),
		}],
		..Blueprint::new("ConfigClass")
	};

	fn registrar() -> Registrar {
		let settings = Settings::default();
		let mut template = Instance::bare(&CONFIG_CLASS);
		template.set("tags", Value::List(vec![Value::from("a")]));
		Registrar::new("desk")
			.with("cfg", Value::Type(&CONFIG_CLASS), &settings)
			.and_then(|r| r.with("template", Value::Object(template), &settings))
			.expect("buildable entries")
	}

	#[test]
	fn create_with_parameters_instantiates() {
		let settings = Settings::default();
		let mut params = Parameters::new();
		params.insert("level".into(), Value::Int(3));
		let out = registrar()
			.create_with(Value::from("cfg"), Some(&params), &settings)
			.unwrap();
		let inst = out.as_object().expect("instance");
		assert!(inst.is_instance_of(&CONFIG_CLASS));
		assert_eq!(inst.get("level"), Some(&Value::Int(3)));
	}

	#[test]
	fn lookups_are_copies() {
		let settings = Settings::default();
		let desk = registrar();
		let mut first = desk
			.create_with(Value::from("template"), None, &settings)
			.unwrap();
		assert_eq!(Some(&first), desk.get("template"));

		first
			.as_object_mut()
			.expect("object")
			.set("tags", Value::Null);
		let second = desk
			.create_with(Value::from("template"), None, &settings)
			.unwrap();
		assert_eq!(Some(&second), desk.get("template"));
		assert_ne!(first, second);
	}

	#[test]
	fn missing_key_is_not_found() {
		let settings = Settings::default();
		let desk = registrar();
		let err = desk
			.create_with(Value::from("missing"), None, &settings)
			.unwrap_err();
		assert_eq!(
			err,
			FactoryError::NotFound {
				key: "missing".into(),
				scope: "the desk registry".into(),
				known: Vec::new(),
			}
		);
		assert_eq!(desk.len(), 2);
		assert!(!desk.contains("missing"));
	}

	#[test]
	fn verbose_lists_known_keys() {
		let mut settings = Settings::default();
		settings.verbose = true;
		let err = registrar()
			.create_with(Value::from("nope"), None, &settings)
			.unwrap_err();
		assert!(err.to_string().ends_with("(known: cfg, template)"), "{err}");
	}

	#[test]
	fn non_string_items_are_keyed() {
		let settings = Settings::default();
		let desk = Registrar::new("types")
			.with("config_class", Value::from("found"), &{
				let mut relaxed = Settings::default();
				relaxed.strict = false;
				relaxed
			})
			.unwrap();
		let out = desk
			.create_with(Value::Type(&CONFIG_CLASS), None, &settings)
			.unwrap();
		assert_eq!(out, Value::from("found"));
	}

	#[test]
	fn add_validates_and_last_write_wins() {
		let settings = Settings::default();
		let mut desk = registrar();
		assert!(matches!(
			desk.add("plain", Value::Int(1), &settings),
			Err(FactoryError::Incompatible { .. })
		));
		assert!(!desk.contains("plain"));

		let replaced = desk
			.add("cfg", Value::Object(Instance::bare(&CONFIG_CLASS)), &settings)
			.unwrap();
		assert_eq!(replaced, Some(Value::Type(&CONFIG_CLASS)));
		assert_eq!(desk.keys().collect::<Vec<_>>(), vec!["cfg", "template"]);
	}

	#[test]
	fn producer_overrides_item_hook() {
		let settings = Settings::default();
		let desk = registrar().with_producer(&Classer);
		let out = desk
			.create_with(Value::from("template"), None, &settings)
			.unwrap();
		assert_eq!(out, Value::Type(&CONFIG_CLASS));
	}
}
