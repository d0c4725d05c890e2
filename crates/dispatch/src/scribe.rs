use fabrik_core::{Inspect, Parameters, Producer, Result, Settings, Value, finalize};

/// Clones items, or its own prototype when asked for nothing in particular.
pub struct Scribe {
	name: String,
	prototype: Value,
	producer: Option<&'static dyn Producer>,
}

impl Scribe {
	/// Creates a scribe whose stored defaults are `prototype`.
	pub fn new(name: impl Into<String>, prototype: Value) -> Self {
		Self {
			name: name.into(),
			prototype,
			producer: None,
		}
	}

	/// Uses `producer` as the alternate inspector during finalization.
	pub fn with_producer(mut self, producer: &'static dyn Producer) -> Self {
		self.producer = Some(producer);
		self
	}

	pub fn prototype(&self) -> &Value {
		&self.prototype
	}

	/// Finalizes a deep copy of `item`, or of the prototype when `item` is
	/// `None`. The source is never touched.
	pub fn copy(
		&self,
		item: Option<&Value>,
		parameters: Option<&Parameters>,
		settings: &Settings,
	) -> Result<Value> {
		let copy = item.unwrap_or(&self.prototype).clone();
		let inspector = self.producer.map(|_| self as &dyn Inspect);
		finalize(copy, parameters, inspector, settings)
	}
}

impl Inspect for Scribe {
	fn production_hook(&self) -> Option<&'static dyn Producer> {
		self.producer
	}
}

impl fabrik_core::Factory for Scribe {
	fn name(&self) -> &str {
		&self.name
	}

	/// `Value::Null` stands for the prototype.
	fn create_with(
		&self,
		item: Value,
		parameters: Option<&Parameters>,
		settings: &Settings,
	) -> Result<Value> {
		if item.is_null() {
			tracing::debug!(scribe = %self.name, "cloning prototype");
			return self.copy(None, parameters, settings);
		}
		let inspector = self.producer.map(|_| self as &dyn Inspect);
		finalize(item, parameters, inspector, settings)
	}
}

#[cfg(test)]
mod tests {
	use fabrik_core::{Blueprint, Factory, Flexer, Instance};
	use indexmap::IndexMap;
	use pretty_assertions::assert_eq;

	use super::*;

	static PALETTE: Blueprint = Blueprint::new("Palette");

	fn prototype() -> Value {
		let mut palette = Instance::bare(&PALETTE);
		palette.set("colors", Value::List(vec![Value::from("red")]));
		Value::Object(palette)
	}

	#[test]
	fn null_clones_the_prototype() {
		let scribe = Scribe::new("palettes", prototype());
		let mut copy = scribe
			.create_with(Value::Null, None, &Settings::default())
			.unwrap();
		assert_eq!(&copy, scribe.prototype());

		copy.as_object_mut()
			.expect("object")
			.set("colors", Value::List(Vec::new()));
		assert_eq!(scribe.prototype(), &prototype());
		assert_ne!(&copy, scribe.prototype());
	}

	#[test]
	fn copy_leaves_the_source_alone() {
		let scribe = Scribe::new("maps", Value::Null);
		let mut inner = IndexMap::new();
		inner.insert("depth".to_string(), Value::Int(1));
		let source = Value::List(vec![Value::Map(inner)]);

		let mut copy = scribe.copy(Some(&source), None, &Settings::default()).unwrap();
		if let Value::List(items) = &mut copy {
			items.push(Value::Null);
		}
		assert_eq!(source.as_map(), None);
		assert!(matches!(&source, Value::List(items) if items.len() == 1));
	}

	#[test]
	fn parameters_are_injected_by_producer() {
		let scribe = Scribe::new("palettes", prototype()).with_producer(&Flexer);
		let mut params = Parameters::new();
		params.insert("name".into(), Value::from("warm"));
		let out = scribe
			.create_with(Value::Null, Some(&params), &Settings::default())
			.unwrap();
		let palette = out.as_object().expect("object");
		assert_eq!(palette.get("name"), Some(&Value::from("warm")));
		assert!(!scribe.prototype().as_object().is_some_and(|p| p.has("name")));
	}

	#[test]
	fn types_clone_to_themselves() {
		let scribe = Scribe::new("types", Value::Type(&PALETTE));
		let out = scribe
			.create_with(Value::Null, None, &Settings::default())
			.unwrap();
		assert_eq!(out, Value::Type(&PALETTE));
	}
}
