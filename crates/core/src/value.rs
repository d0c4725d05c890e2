//! Dynamic values handled by factories.
//!
//! Every item that flows through a factory is a [`Value`]: plain data, a
//! [`Blueprint`] standing in for a type, or an [`Instance`] built from one.
//! Cloning a value is a full structural copy, which is what the registry and
//! clone strategies rely on to never hand out shared state.

use core::fmt;

use indexmap::IndexMap;

use crate::blueprint::{Blueprint, Instance};

/// Ordered attribute name to value mapping passed to finalization.
pub type Parameters = IndexMap<String, Value>;

/// A dynamically typed value.
#[derive(Debug, Clone, Default)]
pub enum Value {
	/// Absence of a value.
	#[default]
	Null,
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// String value.
	Str(String),
	/// Ordered sequence.
	List(Vec<Value>),
	/// Ordered string-keyed mapping.
	Map(IndexMap<String, Value>),
	/// A type descriptor; callable with parameters.
	Type(&'static Blueprint),
	/// An instance of a blueprint.
	Object(Instance),
}

impl Value {
	/// Returns the string value if this is a `Str` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the map if this is a `Map` variant.
	pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
		match self {
			Value::Map(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the blueprint if this value is a type.
	pub fn as_type(&self) -> Option<&'static Blueprint> {
		match self {
			Value::Type(bp) => Some(bp),
			_ => None,
		}
	}

	/// Returns the instance if this is an `Object` variant.
	pub fn as_object(&self) -> Option<&Instance> {
		match self {
			Value::Object(inst) => Some(inst),
			_ => None,
		}
	}

	/// Returns the mutable instance if this is an `Object` variant.
	pub fn as_object_mut(&mut self) -> Option<&mut Instance> {
		match self {
			Value::Object(inst) => Some(inst),
			_ => None,
		}
	}

	/// Returns true for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Returns true if the value can be called with parameters.
	///
	/// Only non-abstract types are callable.
	pub fn is_callable(&self) -> bool {
		matches!(self, Value::Type(bp) if !bp.is_abstract)
	}

	/// Returns the declared type name of this value.
	///
	/// For types this is the blueprint's own name, for objects the name of
	/// the blueprint they were built from.
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Null => "NoneType",
			Value::Bool(_) => "Bool",
			Value::Int(_) => "Integer",
			Value::Float(_) => "Float",
			Value::Str(_) => "String",
			Value::List(_) => "List",
			Value::Map(_) => "Dictionary",
			Value::Type(bp) => bp.name,
			Value::Object(inst) => inst.blueprint().name,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Int(a), Value::Int(b)) => a == b,
			(Value::Float(a), Value::Float(b)) => a == b,
			(Value::Str(a), Value::Str(b)) => a == b,
			(Value::List(a), Value::List(b)) => a == b,
			(Value::Map(a), Value::Map(b)) => a == b,
			(Value::Type(a), Value::Type(b)) => core::ptr::eq(*a, *b),
			(Value::Object(a), Value::Object(b)) => a == b,
			_ => false,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Bool(v) => write!(f, "{v}"),
			Value::Int(v) => write!(f, "{v}"),
			Value::Float(v) => write!(f, "{v}"),
			Value::Str(v) => write!(f, "{v:?}"),
			Value::List(items) => {
				f.write_str("[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
			Value::Map(map) => {
				f.write_str("{")?;
				for (i, (key, value)) in map.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{key:?}: {value}")?;
				}
				f.write_str("}")
			}
			Value::Type(bp) => write!(f, "<type {}>", bp.name),
			Value::Object(inst) => write!(f, "<{} object>", inst.blueprint().name),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Str(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Str(v.to_string())
	}
}

impl From<Vec<Value>> for Value {
	fn from(v: Vec<Value>) -> Self {
		Value::List(v)
	}
}

impl From<IndexMap<String, Value>> for Value {
	fn from(v: IndexMap<String, Value>) -> Self {
		Value::Map(v)
	}
}

impl From<&'static Blueprint> for Value {
	fn from(bp: &'static Blueprint) -> Self {
		Value::Type(bp)
	}
}

impl From<Instance> for Value {
	fn from(inst: Instance) -> Self {
		Value::Object(inst)
	}
}

/// Type matcher used by type-compatibility dispatch.
///
/// A closed set standing in for runtime `isinstance`/`issubclass` checks.
#[derive(Debug, Clone, Copy)]
pub enum Kind {
	/// Matches every value.
	Any,
	/// Matches [`Value::Null`].
	Null,
	/// Matches booleans.
	Bool,
	/// Matches integers.
	Int,
	/// Matches floats.
	Float,
	/// Matches integers and floats.
	Number,
	/// Matches strings.
	Str,
	/// Matches lists.
	List,
	/// Matches maps.
	Map,
	/// Matches maps and objects.
	Mapping,
	/// Matches any type value.
	Type,
	/// Matches instances of the blueprint or its descendants, and descendant
	/// types when the item is itself a type.
	Object(&'static Blueprint),
}

impl Kind {
	/// Returns true if `value` is an instance (or subtype) of this kind.
	pub fn admits(self, value: &Value) -> bool {
		match (self, value) {
			(Kind::Any, _) => true,
			(Kind::Null, Value::Null) => true,
			(Kind::Bool, Value::Bool(_)) => true,
			(Kind::Int, Value::Int(_)) => true,
			(Kind::Float, Value::Float(_)) => true,
			(Kind::Number, Value::Int(_) | Value::Float(_)) => true,
			(Kind::Str, Value::Str(_)) => true,
			(Kind::List, Value::List(_)) => true,
			(Kind::Map, Value::Map(_)) => true,
			(Kind::Mapping, Value::Map(_) | Value::Object(_)) => true,
			(Kind::Type, Value::Type(_)) => true,
			(Kind::Object(base), Value::Object(inst)) => inst.blueprint().is_subclass_of(base),
			(Kind::Object(base), Value::Type(bp)) => bp.is_subclass_of(base),
			_ => false,
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Kind::Any => f.write_str("any"),
			Kind::Null => f.write_str("null"),
			Kind::Bool => f.write_str("bool"),
			Kind::Int => f.write_str("int"),
			Kind::Float => f.write_str("float"),
			Kind::Number => f.write_str("number"),
			Kind::Str => f.write_str("str"),
			Kind::List => f.write_str("list"),
			Kind::Map => f.write_str("map"),
			Kind::Mapping => f.write_str("mapping"),
			Kind::Type => f.write_str("type"),
			Kind::Object(bp) => f.write_str(bp.name),
		}
	}
}
