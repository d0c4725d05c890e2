use std::sync::atomic::{AtomicUsize, Ordering};

use indexmap::IndexMap;
use proptest::prelude::*;

use super::*;
use crate::blueprint::{Blueprint, FieldDef};
use crate::producers::{Classer, Instancer};
use crate::traits::Producer;

static CONFIG: Blueprint = Blueprint {
	fields: &[FieldDef {
		name: "level",
		default: Some(|| Value::Int(0)),
	}],
	..Blueprint::new("Config")
};

static HOOKED: Blueprint = Blueprint {
	fields: &[FieldDef {
		name: "level",
		default: Some(|| Value::Int(0)),
	}],
	..Blueprint::new("Hooked").with_producer(&Instancer)
};

static ABSTRACT: Blueprint = Blueprint::new("Base").into_abstract();

static PRODUCED: AtomicUsize = AtomicUsize::new(0);

struct Counting;

impl Producer for Counting {
	fn produce(&self, item: Value, _: Option<&Parameters>, _: &Settings) -> Result<Value> {
		PRODUCED.fetch_add(1, Ordering::SeqCst);
		Ok(item)
	}
}

struct Alternate;

impl Inspect for Alternate {
	fn production_hook(&self) -> Option<&'static dyn Producer> {
		Some(&Classer)
	}
}

struct Silent;

impl Inspect for Silent {
	fn production_hook(&self) -> Option<&'static dyn Producer> {
		None
	}
}

fn level(n: i64) -> Parameters {
	let mut p = Parameters::new();
	p.insert("level".into(), Value::Int(n));
	p
}

#[test]
fn without_hook_or_parameters_returns_item() {
	let settings = Settings::default();
	let item = Value::Type(&CONFIG);
	let once = finalize(item.clone(), None, None, &settings).unwrap();
	let twice = finalize(once.clone(), None, None, &settings).unwrap();
	assert_eq!(once, item);
	assert_eq!(twice, item);
}

#[test]
fn parameters_call_the_item() {
	let settings = Settings::default();
	let out = finalize(Value::Type(&CONFIG), Some(&level(3)), None, &settings).unwrap();
	let inst = out.as_object().expect("instance");
	assert!(inst.is_instance_of(&CONFIG));
	assert_eq!(inst.get("level"), Some(&Value::Int(3)));
}

#[test]
fn parameters_on_non_callable_fail() {
	let settings = Settings::default();
	let err = finalize(Value::Int(4), Some(&level(1)), None, &settings).unwrap_err();
	assert_eq!(err, FactoryError::NotCallable { what: "4".into() });

	let err = finalize(Value::Type(&ABSTRACT), Some(&level(1)), None, &settings).unwrap_err();
	assert!(matches!(err, FactoryError::Abstract { .. }));
}

#[test]
fn unexpected_parameter_propagates() {
	let settings = Settings::default();
	let mut params = level(1);
	params.insert("colour".into(), Value::from("blue"));
	let err = finalize(Value::Type(&CONFIG), Some(&params), None, &settings).unwrap_err();
	assert_eq!(
		err,
		FactoryError::UnexpectedParameter {
			name: "Config".into(),
			parameter: "colour".into(),
		}
	);
}

#[test]
fn item_hook_owns_the_result() {
	let settings = Settings::default();
	// Instancer instantiates even without parameters.
	let out = finalize(Value::Type(&HOOKED), None, None, &settings).unwrap();
	assert_eq!(
		out.as_object().and_then(|o| o.get("level")),
		Some(&Value::Int(0))
	);
}

#[test]
fn hook_runs_exactly_once() {
	static COUNTED: Blueprint = Blueprint::new("Counted").with_producer(&Counting);

	let settings = Settings::default();
	let out = finalize(Value::Type(&COUNTED), Some(&level(1)), None, &settings).unwrap();
	assert_eq!(out, Value::Type(&COUNTED));
	assert_eq!(PRODUCED.load(Ordering::SeqCst), 1);
}

#[test]
fn inspector_replaces_item_as_hook_owner() {
	let settings = Settings::default();
	let inst = CONFIG.instantiate(&level(2)).unwrap();
	let out = finalize(Value::Object(inst), None, Some(&Alternate), &settings).unwrap();
	assert_eq!(out, Value::Type(&CONFIG));

	// An inspector without a hook shadows the item's own hook.
	let out = finalize(Value::Type(&HOOKED), None, Some(&Silent), &settings).unwrap();
	assert_eq!(out, Value::Type(&HOOKED));
}

#[test]
fn inject_respects_overwrite_argument() {
	let settings = Settings::default();
	let item = Value::Object(CONFIG.instantiate(&level(1)).unwrap());
	let kept = inject_attributes(item.clone(), &level(5), Some(false), &settings).unwrap();
	assert_eq!(
		kept.as_object().and_then(|o| o.get("level")),
		Some(&Value::Int(1))
	);
	let replaced = inject_attributes(item, &level(5), None, &settings).unwrap();
	assert_eq!(
		replaced.as_object().and_then(|o| o.get("level")),
		Some(&Value::Int(5))
	);
}

#[test]
fn inject_into_non_object_fails() {
	let settings = Settings::default();
	let err = inject_attributes(Value::Map(IndexMap::new()), &level(1), None, &settings)
		.unwrap_err();
	assert!(matches!(err, FactoryError::NotAnObject { .. }));
	// Nothing to inject is never an error.
	let out = inject_attributes(Value::Int(1), &Parameters::new(), None, &settings).unwrap();
	assert_eq!(out, Value::Int(1));
}

fn plain_value() -> impl Strategy<Value = Value> {
	let leaf = prop_oneof![
		Just(Value::Null),
		any::<bool>().prop_map(Value::Bool),
		any::<i64>().prop_map(Value::Int),
		"[a-z]{0,8}".prop_map(Value::Str),
	];
	leaf.prop_recursive(3, 16, 4, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
			prop::collection::vec(("[a-z]{1,4}", inner), 0..4)
				.prop_map(|pairs| Value::Map(pairs.into_iter().collect())),
		]
	})
}

proptest! {
	#[test]
	fn finalize_without_parameters_is_identity(value in plain_value()) {
		let settings = Settings::default();
		let out = finalize(value.clone(), None, None, &settings).unwrap();
		prop_assert_eq!(out, value);
	}
}
