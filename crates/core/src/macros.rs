//! Blueprint declaration macro.

/// Declares a static [`Blueprint`](crate::Blueprint) and registers it for
/// subclass dispatch.
///
/// ```ignore
/// blueprint!(pub OPTIONS, { name: "Options", abstract: true });
/// blueprint!(pub SETTINGS, { name: "Settings", parents: [OPTIONS] });
/// blueprint!(pub CONFIGURATION, {
///     name: "Configuration",
///     parents: [SETTINGS],
///     fields: [contents = Value::Map(Default::default()), level],
///     producer: fabrik_core::Instancer,
/// });
/// ```
///
/// Fields written as `name = expr` take `Value::from(expr)` as their default;
/// bare names are required.
#[macro_export]
macro_rules! blueprint {
	($vis:vis $ident:ident, {
		name: $name:expr
		$(, parents: [$($parent:path),* $(,)?])?
		$(, fields: [$($field:ident $(= $default:expr)?),* $(,)?])?
		$(, producer: $producer:expr)?
		$(, abstract: $is_abstract:expr)?
		$(,)?
	}) => {
		$vis static $ident: $crate::Blueprint = $crate::Blueprint {
			name: $name,
			parents: &[$($(&$parent),*)?],
			fields: &[$($(
				$crate::FieldDef {
					name: stringify!($field),
					default: $crate::__field_default!($($default)?),
				}
			),*)?],
			producer: $crate::__opt!($(&$producer)?),
			is_abstract: $crate::__or!($($is_abstract)?, false),
		};

		$crate::__private::inventory::submit! {
			$crate::BlueprintReg(&$ident)
		}
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_default {
	() => {
		::core::option::Option::None
	};
	($default:expr) => {
		::core::option::Option::Some::<fn() -> $crate::Value>(|| $crate::Value::from($default))
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __opt {
	() => {
		::core::option::Option::None
	};
	($value:expr) => {
		::core::option::Option::Some($value)
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __or {
	(, $default:expr) => {
		$default
	};
	($value:expr, $default:expr) => {
		$value
	};
}
