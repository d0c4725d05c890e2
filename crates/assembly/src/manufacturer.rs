use fabrik_core::{
	Constructor, FactoryError, Parameters, Result, Settings, Value, is_constructor,
};
use indexmap::IndexMap;

/// Constructors stored by name.
///
/// A single place to reach many factories, each validated by
/// [`is_constructor`] on the way in.
#[derive(Debug, Clone, Default)]
pub struct Manufacturer {
	contents: IndexMap<String, Constructor>,
}

impl Manufacturer {
	/// Creates an empty manufacturer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `constructor` under its keyed name and returns that key.
	///
	/// # Errors
	///
	/// Returns [`FactoryError::Incompatible`] if `constructor` fails
	/// [`is_constructor`].
	pub fn add(&mut self, constructor: Constructor, settings: &Settings) -> Result<String> {
		check(&constructor, settings)?;
		let name = constructor.name().to_string();
		let key = settings.key(&Value::from(name.as_str())).unwrap_or(name);
		tracing::debug!(%key, "stored constructor");
		self.contents.insert(key.clone(), constructor);
		Ok(key)
	}

	/// Stores every entry under its given key, or none if any value is
	/// incompatible.
	pub fn add_all<I, K>(&mut self, entries: I, settings: &Settings) -> Result<()>
	where
		I: IntoIterator<Item = (K, Constructor)>,
		K: Into<String>,
	{
		let batch: Vec<(String, Constructor)> = entries
			.into_iter()
			.map(|(key, constructor)| (key.into(), constructor))
			.collect();
		for (_, constructor) in &batch {
			check(constructor, settings)?;
		}
		self.contents.extend(batch);
		Ok(())
	}

	/// Returns the constructor stored under `key`.
	pub fn get(&self, key: &str) -> Option<&Constructor> {
		self.contents.get(key)
	}

	/// Removes and returns the constructor under `key`, keeping the order of
	/// the rest.
	pub fn remove(&mut self, key: &str) -> Option<Constructor> {
		self.contents.shift_remove(key)
	}

	/// Returns true if `key` is stored.
	pub fn contains(&self, key: &str) -> bool {
		self.contents.contains_key(key)
	}

	/// Returns the keys in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.contents.keys().map(String::as_str)
	}

	/// Returns the entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Constructor)> {
		self.contents.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.contents.len()
	}

	/// Returns true if there are no entries.
	pub fn is_empty(&self) -> bool {
		self.contents.is_empty()
	}

	/// Returns a new manufacturer holding the `include` keys (every key when
	/// `None`) minus the `exclude` keys.
	///
	/// # Errors
	///
	/// Returns [`FactoryError::NotFound`] if an included key is not stored.
	pub fn subset(
		&self,
		include: Option<&[&str]>,
		exclude: &[&str],
		settings: &Settings,
	) -> Result<Self> {
		let mut contents = match include {
			None => self.contents.clone(),
			Some(keys) => {
				let mut picked = IndexMap::with_capacity(keys.len());
				for &key in keys {
					let constructor = self.lookup(key, settings)?;
					picked.insert(key.to_string(), constructor.clone());
				}
				picked
			}
		};
		contents.retain(|key, _| !exclude.contains(&key.as_str()));
		Ok(Self { contents })
	}

	/// Creates an item with the constructor stored under `key`.
	pub fn create(
		&self,
		key: &str,
		item: Value,
		parameters: Option<&Parameters>,
		settings: &Settings,
	) -> Result<Value> {
		self.lookup(key, settings)?
			.create(item, parameters, settings)
	}

	fn lookup(&self, key: &str, settings: &Settings) -> Result<&Constructor> {
		self.contents.get(key).ok_or_else(|| FactoryError::NotFound {
			key: key.to_string(),
			scope: "the manufacturer".to_string(),
			known: settings.detail(self.contents.keys().cloned()),
		})
	}
}

fn check(constructor: &Constructor, settings: &Settings) -> Result<()> {
	if is_constructor(constructor, settings) {
		Ok(())
	} else {
		Err(FactoryError::Incompatible {
			what: constructor.name().to_string(),
		})
	}
}
