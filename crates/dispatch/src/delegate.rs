use fabrik_core::{Inspect, Parameters, Producer, Result, Settings, Value, finalize};

use crate::lookup::key_of;
use crate::methods::MethodTable;

/// Builds items by delegating to a creation method named after the item.
///
/// A string item names the method directly; anything else is named through
/// the keyer, so a map goes to `from_dictionary` under the default settings.
pub struct Delegate {
	name: String,
	methods: MethodTable,
	producer: Option<&'static dyn Producer>,
}

impl Delegate {
	/// Creates a delegate with no creation methods.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			methods: MethodTable::new(),
			producer: None,
		}
	}

	/// Adds a creation method.
	pub fn with_method<F>(mut self, name: impl Into<String>, method: F) -> Self
	where
		F: Fn(Value, &Parameters) -> Result<Value> + Send + Sync + 'static,
	{
		self.methods.insert(name, method);
		self
	}

	/// Uses `producer` as the alternate inspector during finalization.
	pub fn with_producer(mut self, producer: &'static dyn Producer) -> Self {
		self.producer = Some(producer);
		self
	}

	/// Returns the creation methods.
	pub fn methods(&self) -> &MethodTable {
		&self.methods
	}

	/// Returns the creation methods for editing.
	pub fn methods_mut(&mut self) -> &mut MethodTable {
		&mut self.methods
	}

	/// Returns the name of the creation method `item` dispatches to.
	pub fn method_name(&self, item: &Value, settings: &Settings) -> String {
		settings.method_name(&key_of(item, settings))
	}

	/// Runs the creation method for `item` with `kwargs`, then finalizes
	/// the result with `parameters`.
	///
	/// # Errors
	///
	/// Returns [`FactoryError::MissingMethod`](fabrik_core::FactoryError::MissingMethod)
	/// if no method matches; method and finalization errors propagate.
	pub fn create_with_kwargs(
		&self,
		item: Value,
		parameters: Option<&Parameters>,
		kwargs: &Parameters,
		settings: &Settings,
	) -> Result<Value> {
		let method = self.method_name(&item, settings);
		let built = self
			.methods
			.invoke(&self.name, &method, item, kwargs, settings)?;
		let inspector = self.producer.map(|_| self as &dyn Inspect);
		finalize(built, parameters, inspector, settings)
	}
}

impl Inspect for Delegate {
	fn production_hook(&self) -> Option<&'static dyn Producer> {
		self.producer
	}
}

impl fabrik_core::Factory for Delegate {
	fn name(&self) -> &str {
		&self.name
	}

	fn create_with(
		&self,
		item: Value,
		parameters: Option<&Parameters>,
		settings: &Settings,
	) -> Result<Value> {
		self.create_with_kwargs(item, parameters, &Parameters::new(), settings)
	}
}
