use fabrik_core::blueprint::descendants;
use fabrik_core::{
	Blueprint, Inspect, Parameters, Producer, Result, Settings, Value, finalize, snakify,
};
use indexmap::IndexMap;

use crate::lookup::{copy_entry, key_of};

/// Builds descendants of a base blueprint, looked up by canonical name.
///
/// There is no stored registry: the index is rebuilt from the registered
/// blueprints on every call, so types defined after the subclasser was
/// created are found too.
pub struct Subclasser {
	base: &'static Blueprint,
	name: String,
	producer: Option<&'static dyn Producer>,
}

impl Subclasser {
	/// Creates a subclasser over the descendants of `base`.
	pub fn new(base: &'static Blueprint) -> Self {
		Self {
			base,
			name: snakify(base.name),
			producer: None,
		}
	}

	/// Uses `producer` as the alternate inspector during finalization.
	pub fn with_producer(mut self, producer: &'static dyn Producer) -> Self {
		self.producer = Some(producer);
		self
	}

	/// Returns the blueprint whose descendants are indexed.
	pub fn base(&self) -> &'static Blueprint {
		self.base
	}

	/// Maps the keyed name of every descendant of the base to its blueprint.
	///
	/// When two descendants share a key, the one registered last wins,
	/// whatever its depth below the base.
	pub fn index(&self, settings: &Settings) -> IndexMap<String, &'static Blueprint> {
		let mut index = IndexMap::new();
		for blueprint in descendants(self.base) {
			let Some(key) = settings.key(&Value::Type(blueprint)) else {
				continue;
			};
			if let Some(previous) = index.insert(key.clone(), blueprint) {
				tracing::warn!(
					base = self.base.name,
					%key,
					replaced = previous.name,
					"subclass name collision"
				);
			}
		}
		index
	}
}

impl Inspect for Subclasser {
	fn production_hook(&self) -> Option<&'static dyn Producer> {
		self.producer
	}
}

impl fabrik_core::Factory for Subclasser {
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
		let index = self.index(settings);
		let built = copy_entry(
			&index,
			&key,
			|| format!("the subclasses of {}", self.base.name),
			settings,
		)?;
		tracing::debug!(base = self.base.name, %key, "resolved subclass");
		let inspector = self.producer.map(|_| self as &dyn Inspect);
		finalize(built, parameters, inspector, settings)
	}
}

#[cfg(test)]
mod tests {
	use fabrik_core::blueprint::define;
	use fabrik_core::{Classer, Factory, FactoryError, FieldDef, blueprint};
	use pretty_assertions::assert_eq;

	use super::*;

	blueprint!(SOURCE, { name: "Source", abstract: true });
	blueprint!(FILE_SOURCE, { name: "FileSource", parents: [SOURCE], fields: [path] });
	blueprint!(HTTP_SOURCE, {
		name: "HttpSource",
		parents: [SOURCE],
		fields: [url = "http://localhost", retries = 3i64],
	});
	blueprint!(SECURE_HTTP_SOURCE, {
		name: "SecureHttpSource",
		parents: [HTTP_SOURCE, SOURCE],
	});
	blueprint!(TWIN_BASE, { name: "TwinBase" });
	blueprint!(DEPOT, { name: "Depot" });

	#[test]
	fn index_covers_every_descendant_once() {
		let subclasser = Subclasser::new(&SOURCE);
		let index = subclasser.index(&Settings::default());
		let mut keys: Vec<_> = index.keys().cloned().collect();
		keys.sort();
		assert_eq!(keys, vec!["file_source", "http_source", "secure_http_source"]);
		assert_eq!(subclasser.name(), "source");
	}

	#[test]
	fn create_by_name_returns_the_type() {
		let out = Subclasser::new(&SOURCE)
			.create_with(Value::from("secure_http_source"), None, &Settings::default())
			.unwrap();
		assert_eq!(out, Value::Type(&SECURE_HTTP_SOURCE));
	}

	#[test]
	fn create_with_parameters_instantiates_grandchild() {
		let mut params = Parameters::new();
		params.insert("retries".into(), Value::Int(5));
		let out = Subclasser::new(&SOURCE)
			.create_with(Value::from("secure_http_source"), Some(&params), &Settings::default())
			.unwrap();
		let inst = out.as_object().expect("instance");
		assert!(inst.is_instance_of(&HTTP_SOURCE));
		assert_eq!(inst.get("retries"), Some(&Value::Int(5)));
		assert_eq!(inst.get("url"), Some(&Value::from("http://localhost")));
	}

	#[test]
	fn base_is_not_its_own_subclass() {
		let err = Subclasser::new(&SOURCE)
			.create_with(Value::from("source"), None, &Settings::default())
			.unwrap_err();
		assert!(matches!(err, FactoryError::NotFound { ref key, .. } if key == "source"));
	}

	#[test]
	fn types_are_keyed_through_the_keyer() {
		let out = Subclasser::new(&SOURCE)
			.create_with(Value::Type(&FILE_SOURCE), None, &Settings::default())
			.unwrap();
		assert_eq!(out, Value::Type(&FILE_SOURCE));
	}

	#[test]
	fn runtime_types_and_collisions() {
		let first = define("Twin", &[&TWIN_BASE], vec![FieldDef::required("side")]);
		let second = define("Twin", &[&TWIN_BASE], Vec::new());
		let subclasser = Subclasser::new(&TWIN_BASE);
		let index = subclasser.index(&Settings::default());
		assert_eq!(index.len(), 1);
		assert!(core::ptr::eq(index["twin"], second));
		assert!(!core::ptr::eq(index["twin"], first));
	}

	#[test]
	fn collisions_at_different_depths_keep_the_latest() {
		let hub = define("Hub", &[&DEPOT], Vec::new());
		let deep = define("Bay", &[hub], Vec::new());
		let shallow = define("Bay", &[&DEPOT], Vec::new());
		let out = Subclasser::new(&DEPOT)
			.create_with(Value::from("bay"), None, &Settings::default())
			.unwrap();
		assert_eq!(out, Value::Type(shallow));
		assert_ne!(out, Value::Type(deep));
	}

	#[test]
	fn producer_overrides_item_hook() {
		let mut params = Parameters::new();
		params.insert("path".into(), Value::from("/tmp"));
		let out = Subclasser::new(&SOURCE)
			.with_producer(&Classer)
			.create_with(Value::from("file_source"), Some(&params), &Settings::default())
			.unwrap();
		assert_eq!(out, Value::Type(&FILE_SOURCE));
	}
}
