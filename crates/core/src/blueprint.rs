//! Type descriptors and their instances.
//!
//! A [`Blueprint`] is the runtime stand-in for a class: it has a name, zero
//! or more parents, declared fields and an optional production hook. Calling
//! a blueprint with [`Parameters`] builds an [`Instance`].
//!
//! Blueprints make themselves known for subclass dispatch in one of two ways:
//! - statically, through [`blueprint!`](crate::blueprint!), which submits a
//!   [`BlueprintReg`] to `inventory` at link time;
//! - at runtime, through [`register`] (or [`define`], which also leaks a new
//!   blueprint to obtain the `'static` lifetime).

use core::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashSet;

use crate::error::{FactoryError, Result};
use crate::traits::Producer;
use crate::value::{Parameters, Value};

/// A declared field of a blueprint.
#[derive(Clone, Copy)]
pub struct FieldDef {
	/// Attribute name.
	pub name: &'static str,
	/// Default value factory; `None` makes the field required.
	pub default: Option<fn() -> Value>,
}

impl FieldDef {
	/// A field that must be supplied at instantiation.
	pub const fn required(name: &'static str) -> Self {
		Self {
			name,
			default: None,
		}
	}

	/// A field that falls back to `default` when not supplied.
	pub const fn optional(name: &'static str, default: fn() -> Value) -> Self {
		Self {
			name,
			default: Some(default),
		}
	}
}

impl fmt::Debug for FieldDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldDef")
			.field("name", &self.name)
			.field("required", &self.default.is_none())
			.finish()
	}
}

/// Static type descriptor.
///
/// Blueprints compare by identity, never by name: two blueprints sharing a
/// name are still distinct types.
pub struct Blueprint {
	/// Declared type name, usually CamelCase.
	pub name: &'static str,
	/// Direct parents in declaration order. Cycles are tolerated: every
	/// walk over the parent graph visits each blueprint once.
	pub parents: &'static [&'static Blueprint],
	/// Fields declared on this blueprint (parents' fields are inherited).
	pub fields: &'static [FieldDef],
	/// Production hook applied during finalization.
	pub producer: Option<&'static dyn Producer>,
	/// Abstract blueprints are never callable.
	pub is_abstract: bool,
}

impl Blueprint {
	/// Creates a concrete blueprint with no parents, fields or hook.
	pub const fn new(name: &'static str) -> Self {
		Self {
			name,
			parents: &[],
			fields: &[],
			producer: None,
			is_abstract: false,
		}
	}

	/// Marks the blueprint abstract.
	pub const fn into_abstract(mut self) -> Self {
		self.is_abstract = true;
		self
	}

	/// Attaches a production hook.
	pub const fn with_producer(mut self, producer: &'static dyn Producer) -> Self {
		self.producer = Some(producer);
		self
	}

	/// Returns true if `self` is `other` or transitively inherits from it.
	pub fn is_subclass_of(&self, other: &Blueprint) -> bool {
		self.lineage().into_iter().any(|bp| core::ptr::eq(bp, other))
	}

	/// Returns `self` and every ancestor, depth first with parents in
	/// declaration order. Each blueprint appears once, even when the parent
	/// graph loops back on itself.
	pub(crate) fn lineage(&self) -> Vec<&Blueprint> {
		let mut seen = FxHashSet::default();
		let mut out = Vec::new();
		let mut pending = vec![self];
		while let Some(current) = pending.pop() {
			if seen.insert(addr(current)) {
				out.push(current);
				pending.extend(current.parents.iter().rev().map(|p| &**p));
			}
		}
		out
	}

	/// Returns the effective fields: inherited first, then own.
	///
	/// A field redeclared lower in the hierarchy keeps its original position
	/// and takes the redeclared default.
	pub fn all_fields(&self) -> Vec<FieldDef> {
		let mut merged = IndexMap::new();
		self.collect_fields(&mut FxHashSet::default(), &mut merged);
		merged.into_values().collect()
	}

	fn collect_fields(
		&self,
		seen: &mut FxHashSet<usize>,
		merged: &mut IndexMap<&'static str, FieldDef>,
	) {
		if !seen.insert(addr(self)) {
			return;
		}
		for parent in self.parents {
			parent.collect_fields(seen, merged);
		}
		for field in self.fields {
			merged.insert(field.name, *field);
		}
	}

	/// Builds an instance, dataclass style.
	///
	/// Every supplied parameter must name a field; every field without a
	/// default must be supplied.
	pub fn instantiate(&'static self, parameters: &Parameters) -> Result<Instance> {
		if self.is_abstract {
			return Err(FactoryError::Abstract {
				name: self.name.to_string(),
			});
		}
		let fields = self.all_fields();
		if let Some(unknown) = parameters
			.keys()
			.find(|key| !fields.iter().any(|f| f.name == key.as_str()))
		{
			return Err(FactoryError::UnexpectedParameter {
				name: self.name.to_string(),
				parameter: unknown.clone(),
			});
		}

		let mut attrs = IndexMap::with_capacity(fields.len());
		for field in &fields {
			let value = match (parameters.get(field.name), field.default) {
				(Some(value), _) => value.clone(),
				(None, Some(default)) => default(),
				(None, None) => {
					return Err(FactoryError::MissingParameter {
						name: self.name.to_string(),
						parameter: field.name.to_string(),
					});
				}
			};
			attrs.insert(field.name.to_string(), value);
		}
		Ok(Instance {
			blueprint: self,
			attrs,
		})
	}
}

impl PartialEq for Blueprint {
	fn eq(&self, other: &Self) -> bool {
		core::ptr::eq(self, other)
	}
}

impl Eq for Blueprint {}

impl fmt::Debug for Blueprint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Blueprint")
			.field("name", &self.name)
			.field(
				"parents",
				&self.parents.iter().map(|p| p.name).collect::<Vec<_>>(),
			)
			.field("fields", &self.fields)
			.field("has_producer", &self.producer.is_some())
			.field("is_abstract", &self.is_abstract)
			.finish()
	}
}

/// An object built from a [`Blueprint`].
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
	blueprint: &'static Blueprint,
	attrs: IndexMap<String, Value>,
}

impl Instance {
	/// Creates an instance with no attributes, bypassing field validation.
	pub fn bare(blueprint: &'static Blueprint) -> Self {
		Self {
			blueprint,
			attrs: IndexMap::new(),
		}
	}

	/// Returns the blueprint this instance was built from.
	#[inline]
	pub fn blueprint(&self) -> &'static Blueprint {
		self.blueprint
	}

	/// Returns an attribute by name.
	#[inline]
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.attrs.get(name)
	}

	/// Returns true if the attribute exists.
	#[inline]
	pub fn has(&self, name: &str) -> bool {
		self.attrs.contains_key(name)
	}

	/// Sets an attribute, returning the previous value.
	pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
		self.attrs.insert(name.into(), value)
	}

	/// Returns all attributes in insertion order.
	#[inline]
	pub fn attrs(&self) -> &IndexMap<String, Value> {
		&self.attrs
	}

	/// Returns true if this is an instance of `blueprint` or a descendant.
	pub fn is_instance_of(&self, blueprint: &Blueprint) -> bool {
		self.blueprint.is_subclass_of(blueprint)
	}
}

/// Link-time registration wrapper for static blueprints.
pub struct BlueprintReg(pub &'static Blueprint);
inventory::collect!(BlueprintReg);

static RUNTIME: LazyLock<RwLock<Vec<&'static Blueprint>>> =
	LazyLock::new(|| RwLock::new(Vec::new()));

/// Registers a blueprint created at runtime.
///
/// Returns `false` if the blueprint was already known (statically or from an
/// earlier call).
pub fn register(blueprint: &'static Blueprint) -> bool {
	if inventory::iter::<BlueprintReg>
		.into_iter()
		.any(|reg| core::ptr::eq(reg.0, blueprint))
	{
		return false;
	}
	let mut runtime = RUNTIME.write();
	if runtime.iter().any(|&b| core::ptr::eq(b, blueprint)) {
		return false;
	}
	tracing::debug!(name = blueprint.name, "registered runtime blueprint");
	runtime.push(blueprint);
	true
}

/// Leaks a new blueprint to `'static` and registers it.
pub fn define(
	name: impl Into<String>,
	parents: &[&'static Blueprint],
	fields: Vec<FieldDef>,
) -> &'static Blueprint {
	let blueprint: &'static Blueprint = Box::leak(Box::new(Blueprint {
		name: Box::leak(name.into().into_boxed_str()),
		parents: Box::leak(parents.to_vec().into_boxed_slice()),
		fields: Box::leak(fields.into_boxed_slice()),
		producer: None,
		is_abstract: false,
	}));
	register(blueprint);
	blueprint
}

/// Returns every known blueprint: static ones first, then runtime ones in
/// registration order.
pub fn all() -> Vec<&'static Blueprint> {
	let mut seen = FxHashSet::default();
	inventory::iter::<BlueprintReg>
		.into_iter()
		.map(|reg| reg.0)
		.chain(RUNTIME.read().iter().copied())
		.filter(|bp| seen.insert(addr(bp)))
		.collect()
}

/// Returns the blueprints listing `base` as a direct parent.
pub fn direct_subclasses(base: &Blueprint) -> Vec<&'static Blueprint> {
	all()
		.into_iter()
		.filter(|bp| bp.parents.iter().any(|p| core::ptr::eq(*p, base)))
		.collect()
}

/// Returns the transitive subclasses of `base`, excluding `base` itself, in
/// the order [`all`] lists them.
///
/// Types reachable through several inheritance paths appear once.
pub fn descendants(base: &Blueprint) -> Vec<&'static Blueprint> {
	let known = all();
	let mut seen = FxHashSet::default();
	let mut pending: Vec<&Blueprint> = vec![base];
	while let Some(current) = pending.pop() {
		for &candidate in &known {
			let is_child = candidate.parents.iter().any(|p| core::ptr::eq(*p, current));
			if is_child && seen.insert(addr(candidate)) {
				pending.push(candidate);
			}
		}
	}
	seen.remove(&addr(base));
	known
		.into_iter()
		.filter(|bp| seen.contains(&addr(bp)))
		.collect()
}

fn addr(blueprint: &Blueprint) -> usize {
	blueprint as *const Blueprint as usize
}
