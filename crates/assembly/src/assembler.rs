use fabrik_core::{Constructor, FactoryError, Manager, Result, Settings, Value, is_constructor};

/// Assembly line of constructors.
///
/// [`manage`](Manager::manage) passes the item to the first constructor,
/// its result to the second, and so on.
#[derive(Debug, Clone)]
pub struct Assembler {
	name: String,
	constructors: Vec<Constructor>,
}

impl Assembler {
	/// Creates an empty assembly line.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			constructors: Vec::new(),
		}
	}

	/// Appends a constructor.
	///
	/// # Errors
	///
	/// Returns [`FactoryError::Incompatible`] if `constructor` fails
	/// [`is_constructor`].
	pub fn add(&mut self, constructor: Constructor, settings: &Settings) -> Result<()> {
		check(&constructor, settings)?;
		self.constructors.push(constructor);
		Ok(())
	}

	/// Appends every constructor, or none if any of them is incompatible.
	pub fn extend<I>(&mut self, constructors: I, settings: &Settings) -> Result<()>
	where
		I: IntoIterator<Item = Constructor>,
	{
		let batch: Vec<_> = constructors.into_iter().collect();
		for constructor in &batch {
			check(constructor, settings)?;
		}
		self.constructors.extend(batch);
		Ok(())
	}

	/// Returns the constructors in the order they run.
	pub fn constructors(&self) -> &[Constructor] {
		&self.constructors
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.constructors.len()
	}

	/// Returns true if there are no entries.
	pub fn is_empty(&self) -> bool {
		self.constructors.is_empty()
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

impl Manager for Assembler {
	fn name(&self) -> &str {
		&self.name
	}

	fn manage(&self, item: Value, settings: &Settings) -> Result<Value> {
		self.constructors
			.iter()
			.try_fold(item, |item, constructor| {
				tracing::trace!(assembler = %self.name, step = constructor.name(), "assembly step");
				constructor.create(item, None, settings)
			})
	}
}
