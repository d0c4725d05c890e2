use fabrik_core::{FactoryError, Result, Settings, Value, snakify};
use indexmap::IndexMap;

/// Returns the key for `item`: strings as is, anything else through the
/// keyer. Values the keyer cannot name fall back to their snake-cased type
/// name.
pub(crate) fn key_of(item: &Value, settings: &Settings) -> String {
	match item {
		Value::Str(key) => key.clone(),
		other => settings
			.key(other)
			.unwrap_or_else(|| snakify(other.type_name())),
	}
}

/// Returns a copy of the entry stored under `key`.
pub(crate) fn copy_entry<V>(
	table: &IndexMap<String, V>,
	key: &str,
	scope: impl FnOnce() -> String,
	settings: &Settings,
) -> Result<Value>
where
	V: Clone + Into<Value>,
{
	match table.get(key) {
		Some(entry) => Ok(entry.clone().into()),
		None => Err(FactoryError::NotFound {
			key: key.to_string(),
			scope: scope(),
			known: settings.detail(table.keys().cloned()),
		}),
	}
}
