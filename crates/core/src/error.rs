use thiserror::Error;

/// Result alias used throughout fabrik.
pub type Result<T, E = FactoryError> = std::result::Result<T, E>;

/// Errors raised while dispatching, building or finalizing an item.
///
/// Lists named `known` are only populated when the verbose setting is on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FactoryError {
	/// A key had no entry in a registry or subclass index.
	#[error("{key:?} was not found in {scope}{}", hint(.known))]
	NotFound {
		key: String,
		scope: String,
		known: Vec<String>,
	},
	/// No entry of a type-compatibility table matched the item.
	#[error("{item} does not match any recognized types{}", hint(.known))]
	Unmatched { item: String, known: Vec<String> },
	/// A delegated creation method does not exist on its owner.
	#[error("{method} does not exist in {owner}{}", hint(.known))]
	MissingMethod {
		method: String,
		owner: String,
		known: Vec<String>,
	},
	/// Parameters were supplied for an item that cannot be called.
	#[error("{what} is not callable")]
	NotCallable { what: String },
	/// An abstract blueprint was called.
	#[error("cannot instantiate abstract type {name}")]
	Abstract { name: String },
	/// A parameter does not name any field of the blueprint.
	#[error("{name} got an unexpected parameter {parameter:?}")]
	UnexpectedParameter { name: String, parameter: String },
	/// A required field was not supplied.
	#[error("{name} is missing required parameter {parameter:?}")]
	MissingParameter { name: String, parameter: String },
	/// Attribute injection targeted something that is not an object.
	#[error("cannot set attributes on {what}")]
	NotAnObject { what: String },
	/// A class was required but the item has none.
	#[error("{what} has no type")]
	NotAType { what: String },
	/// A value failed the compatibility check on insertion.
	#[error("{what} is not a compatible constructor")]
	Incompatible { what: String },
	/// Invalid configuration input.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Errors raised by the configuration surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
	/// The option name is not recognized.
	#[error("unknown option: {0}")]
	UnknownOption(String),
	/// The option exists but the value has the wrong type.
	#[error("{option} must be {expected}, got {got}")]
	TypeMismatch {
		option: String,
		expected: &'static str,
		got: &'static str,
	},
	/// A settings document failed to parse.
	#[error("invalid settings: {0}")]
	Parse(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		ConfigError::Parse(err.to_string())
	}
}

fn hint(known: &[String]) -> String {
	if known.is_empty() {
		String::new()
	} else {
		format!(" (known: {})", known.join(", "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn not_found_names_the_key() {
		let err = FactoryError::NotFound {
			key: "missing".into(),
			scope: "the registry".into(),
			known: Vec::new(),
		};
		assert_eq!(err.to_string(), "\"missing\" was not found in the registry");
	}

	#[test]
	fn known_keys_render_as_hint() {
		let err = FactoryError::MissingMethod {
			method: "from_list".into(),
			owner: "loader".into(),
			known: vec!["from_dictionary".into(), "from_string".into()],
		};
		assert_eq!(
			err.to_string(),
			"from_list does not exist in loader (known: from_dictionary, from_string)"
		);
	}
}
