//! Canonical string names for values and types.

use std::sync::LazyLock;

use regex::Regex;

use crate::value::Value;

static CAPITALIZED_WORD: LazyLock<Regex> =
	LazyLock::new(|| Regex::new("(.)([A-Z][a-z]+)").expect("valid regex"));
static LOWER_THEN_UPPER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new("([a-z0-9])([A-Z])").expect("valid regex"));

/// Converts a CamelCase (or mixedCase) name to snake case.
///
/// A separator goes before a capitalized word that follows any character,
/// and between a lowercase letter or digit and an uppercase letter.
pub fn snakify(name: &str) -> String {
	let spaced = CAPITALIZED_WORD.replace_all(name, "${1}_${2}");
	LOWER_THEN_UPPER
		.replace_all(&spaced, "${1}_${2}")
		.to_lowercase()
}

/// Returns the canonical name of `value`, or `default` if none can be derived.
///
/// Strings are their own name. Objects carrying a string `name` attribute
/// use it. Otherwise the snake-cased type name is used: a type's own name,
/// or the name of the value's type. [`Value::Null`] has no name.
pub fn namify(value: &Value, default: Option<&str>) -> Option<String> {
	match value {
		Value::Str(s) => Some(s.clone()),
		Value::Null => default.map(str::to_string),
		Value::Object(inst) => match inst.get("name") {
			Some(Value::Str(name)) => Some(name.clone()),
			_ => Some(snakify(inst.blueprint().name)),
		},
		other => Some(snakify(other.type_name())),
	}
}

/// The default keyer: [`namify`] without a fallback.
pub fn canonical_name(value: &Value) -> Option<String> {
	namify(value, None)
}

#[cfg(test)]
mod tests {
	use indexmap::IndexMap;
	use proptest::prelude::*;
	use rstest::rstest;

	use super::*;
	use crate::blueprint::{Blueprint, Instance};

	static USER_PROFILE: Blueprint = Blueprint::new("UserProfile");

	#[rstest]
	#[case("CamelCase", "camel_case")]
	#[case("HTTPServer", "http_server")]
	#[case("getHTTPResponseCode", "get_http_response_code")]
	#[case("Version2Beta", "version2_beta")]
	#[case("already_snake", "already_snake")]
	#[case("A", "a")]
	#[case("", "")]
	fn snakify_cases(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(snakify(input), expected);
	}

	#[test]
	fn strings_are_their_own_name() {
		assert_eq!(
			namify(&Value::from("SomeKey"), None).as_deref(),
			Some("SomeKey")
		);
	}

	#[test]
	fn types_use_their_own_name() {
		assert_eq!(
			namify(&Value::Type(&USER_PROFILE), None).as_deref(),
			Some("user_profile")
		);
	}

	#[test]
	fn objects_prefer_name_attribute() {
		let mut inst = Instance::bare(&USER_PROFILE);
		assert_eq!(
			namify(&Value::Object(inst.clone()), None).as_deref(),
			Some("user_profile")
		);
		inst.set("name", Value::from("alice"));
		assert_eq!(
			namify(&Value::Object(inst.clone()), None).as_deref(),
			Some("alice")
		);
		inst.set("name", Value::Int(7));
		assert_eq!(
			namify(&Value::Object(inst), None).as_deref(),
			Some("user_profile")
		);
	}

	#[test]
	fn plain_data_uses_type_name() {
		assert_eq!(
			namify(&Value::Map(IndexMap::new()), None).as_deref(),
			Some("dictionary")
		);
		assert_eq!(namify(&Value::Int(3), None).as_deref(), Some("integer"));
	}

	#[test]
	fn null_falls_back_to_default() {
		assert_eq!(namify(&Value::Null, None), None);
		assert_eq!(
			namify(&Value::Null, Some("nothing")).as_deref(),
			Some("nothing")
		);
	}

	proptest! {
		#[test]
		fn snakify_is_idempotent(name in "[A-Za-z][A-Za-z0-9]{0,16}") {
			let once = snakify(&name);
			prop_assert_eq!(snakify(&once), once.clone());
			prop_assert!(!once.chars().any(|c| c.is_ascii_uppercase()));
		}
	}
}
