//! Named creation methods looked up by delegating factories.

use std::sync::Arc;

use fabrik_core::{FactoryError, Parameters, Result, Settings, Value};
use indexmap::IndexMap;

/// A creation method: receives the item and the extra keyword arguments and
/// returns a raw buildable.
pub type BuilderFn = Arc<dyn Fn(Value, &Parameters) -> Result<Value> + Send + Sync>;

/// Ordered table of creation methods keyed by method name.
#[derive(Clone, Default)]
pub struct MethodTable {
	methods: IndexMap<String, BuilderFn>,
}

impl MethodTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a method, replacing any method of the same name.
	pub fn insert<F>(&mut self, name: impl Into<String>, method: F)
	where
		F: Fn(Value, &Parameters) -> Result<Value> + Send + Sync + 'static,
	{
		self.methods.insert(name.into(), Arc::new(method));
	}

	/// Builder form of [`insert`](Self::insert).
	pub fn with<F>(mut self, name: impl Into<String>, method: F) -> Self
	where
		F: Fn(Value, &Parameters) -> Result<Value> + Send + Sync + 'static,
	{
		self.insert(name, method);
		self
	}

	/// Returns the method called `name`.
	pub fn get(&self, name: &str) -> Option<&BuilderFn> {
		self.methods.get(name)
	}

	/// Returns true if a method called `name` exists.
	pub fn contains(&self, name: &str) -> bool {
		self.methods.contains_key(name)
	}

	/// Method names in insertion order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.methods.keys().map(String::as_str)
	}

	/// Returns the number of methods.
	pub fn len(&self) -> usize {
		self.methods.len()
	}

	/// Returns true if the table has no methods.
	pub fn is_empty(&self) -> bool {
		self.methods.is_empty()
	}

	/// Runs the method `name` on `item`.
	///
	/// # Errors
	///
	/// Returns [`FactoryError::MissingMethod`] naming `name` and `owner` when
	/// the table has no such method. Errors from the method itself pass
	/// through unchanged.
	pub fn invoke(
		&self,
		owner: &str,
		name: &str,
		item: Value,
		kwargs: &Parameters,
		settings: &Settings,
	) -> Result<Value> {
		let Some(method) = self.methods.get(name) else {
			return Err(FactoryError::MissingMethod {
				method: name.to_string(),
				owner: owner.to_string(),
				known: settings.detail(self.names()),
			});
		};
		tracing::debug!(owner, method = name, "invoking creation method");
		method(item, kwargs)
	}
}

impl core::fmt::Debug for MethodTable {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_list().entries(self.methods.keys()).finish()
	}
}
