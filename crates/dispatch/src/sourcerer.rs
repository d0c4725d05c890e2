use fabrik_core::{
	FactoryError, Inspect, Kind, Parameters, Producer, Result, Settings, Value, finalize,
};

use crate::methods::MethodTable;

/// Builds items by delegating on type compatibility.
///
/// `sources` is an ordered table of kinds and name fragments. The first kind
/// admitting the item picks the fragment, and the fragment is turned into a
/// creation method name with the settings' method namer. Unlike
/// [`Delegate`](crate::Delegate), the item's own name plays no part, so a
/// subtype is handled by the method of any kind it belongs to.
pub struct Sourcerer {
	name: String,
	sources: Vec<(Kind, String)>,
	methods: MethodTable,
	producer: Option<&'static dyn Producer>,
}

impl Sourcerer {
	/// Creates a sourcerer with no sources or methods.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			sources: Vec::new(),
			methods: MethodTable::new(),
			producer: None,
		}
	}

	/// Appends a source entry. Entries are tried in the order they are added.
	pub fn with_source(mut self, kind: Kind, fragment: impl Into<String>) -> Self {
		self.sources.push((kind, fragment.into()));
		self
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

	/// Returns the source entries in match order.
	pub fn sources(&self) -> &[(Kind, String)] {
		&self.sources
	}

	/// Returns the creation methods.
	pub fn methods(&self) -> &MethodTable {
		&self.methods
	}

	/// Returns the fragment of the first source admitting `item`.
	pub fn fragment_for(&self, item: &Value) -> Option<&str> {
		self.sources
			.iter()
			.find(|(kind, _)| kind.admits(item))
			.map(|(_, fragment)| fragment.as_str())
	}

	/// Runs the creation method matching `item` with `kwargs`, then finalizes
	/// the result with `parameters`.
	///
	/// # Errors
	///
	/// Returns [`FactoryError::Unmatched`] when no source admits the item and
	/// [`FactoryError::MissingMethod`] when the matched fragment names no
	/// method.
	pub fn create_with_kwargs(
		&self,
		item: Value,
		parameters: Option<&Parameters>,
		kwargs: &Parameters,
		settings: &Settings,
	) -> Result<Value> {
		let Some(fragment) = self.fragment_for(&item) else {
			return Err(FactoryError::Unmatched {
				item: item.to_string(),
				known: settings.detail(self.sources.iter().map(|(kind, _)| kind.to_string())),
			});
		};
		let method = settings.method_name(fragment);
		tracing::debug!(sourcerer = %self.name, %method, "matched source");
		let built = self
			.methods
			.invoke(&self.name, &method, item, kwargs, settings)?;
		let inspector = self.producer.map(|_| self as &dyn Inspect);
		finalize(built, parameters, inspector, settings)
	}
}

impl Inspect for Sourcerer {
	fn production_hook(&self) -> Option<&'static dyn Producer> {
		self.producer
	}
}

impl fabrik_core::Factory for Sourcerer {
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
