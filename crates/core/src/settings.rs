//! Configuration threaded through dispatch and finalization.
//!
//! Every factory entry point takes an explicit [`Settings`]. The process-wide
//! defaults below are only read by the outermost convenience entry points
//! (see [`Factory::create`](crate::Factory::create)), which snapshot them via
//! [`current`].

use core::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::naming;
use crate::value::Value;

/// Derives a registry key from a value.
pub type Keyer = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Derives a creation method name from a canonical name.
pub type MethodNamer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Options recognized by [`Settings::set`].
pub const OPTIONS: &[&str] = &["strict", "overwrite", "verbose", "method_prefix"];

/// Dispatch and finalization settings.
#[derive(Clone)]
pub struct Settings {
	/// Strict compatibility: only factory and manager family members are
	/// constructors. Relaxed accepts anything with a callable entry point.
	pub strict: bool,
	/// Whether attribute injection replaces existing attributes.
	pub overwrite: bool,
	/// Whether errors carry the list of known keys or methods.
	pub verbose: bool,
	keyer: Keyer,
	method_namer: MethodNamer,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			strict: true,
			overwrite: true,
			verbose: false,
			keyer: Arc::new(naming::canonical_name),
			method_namer: prefix_namer("from_"),
		}
	}
}

impl fmt::Debug for Settings {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Settings")
			.field("strict", &self.strict)
			.field("overwrite", &self.overwrite)
			.field("verbose", &self.verbose)
			.finish_non_exhaustive()
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
	strict: Option<bool>,
	overwrite: Option<bool>,
	verbose: Option<bool>,
	method_prefix: Option<String>,
}

fn prefix_namer(prefix: &str) -> MethodNamer {
	let prefix = prefix.to_string();
	Arc::new(move |name: &str| format!("{prefix}{name}"))
}

impl Settings {
	/// Replaces the keyer.
	pub fn with_keyer<F>(mut self, keyer: F) -> Self
	where
		F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
	{
		self.keyer = Arc::new(keyer);
		self
	}

	/// Replaces the method namer.
	pub fn with_method_namer<F>(mut self, namer: F) -> Self
	where
		F: Fn(&str) -> String + Send + Sync + 'static,
	{
		self.method_namer = Arc::new(namer);
		self
	}

	/// Returns the key for `value` under the configured keyer.
	pub fn key(&self, value: &Value) -> Option<String> {
		(self.keyer)(value)
	}

	/// Returns the creation method name for a canonical name.
	pub fn method_name(&self, name: &str) -> String {
		(self.method_namer)(name)
	}

	/// Sets an option from a dynamic value.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::UnknownOption`] for unrecognized names and
	/// [`ConfigError::TypeMismatch`] when the value has the wrong type.
	pub fn set(&mut self, option: &str, value: &Value) -> Result<(), ConfigError> {
		match option {
			"strict" => self.strict = expect_bool(option, value)?,
			"overwrite" => self.overwrite = expect_bool(option, value)?,
			"verbose" => self.verbose = expect_bool(option, value)?,
			"method_prefix" => match value {
				Value::Str(prefix) => self.method_namer = prefix_namer(prefix),
				other => {
					return Err(ConfigError::TypeMismatch {
						option: option.to_string(),
						expected: "a string",
						got: other.type_name(),
					});
				}
			},
			_ => return Err(ConfigError::UnknownOption(option.to_string())),
		}
		Ok(())
	}

	/// Parses settings from a TOML document, starting from the defaults.
	///
	/// ```toml
	/// strict = false
	/// overwrite = true
	/// verbose = true
	/// method_prefix = "build_"
	/// ```
	pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
		let file: SettingsFile = toml::from_str(source)?;
		let mut settings = Settings::default();
		if let Some(strict) = file.strict {
			settings.strict = strict;
		}
		if let Some(overwrite) = file.overwrite {
			settings.overwrite = overwrite;
		}
		if let Some(verbose) = file.verbose {
			settings.verbose = verbose;
		}
		if let Some(prefix) = file.method_prefix {
			settings.method_namer = prefix_namer(&prefix);
		}
		Ok(settings)
	}

	/// Returns `known` when verbose, an empty list otherwise.
	pub fn detail<I, S>(&self, known: I) -> Vec<String>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		if self.verbose {
			known.into_iter().map(Into::into).collect()
		} else {
			Vec::new()
		}
	}
}

fn expect_bool(option: &str, value: &Value) -> Result<bool, ConfigError> {
	value.as_bool().ok_or_else(|| ConfigError::TypeMismatch {
		option: option.to_string(),
		expected: "a boolean",
		got: value.type_name(),
	})
}

static GLOBAL: LazyLock<RwLock<Settings>> = LazyLock::new(|| RwLock::new(Settings::default()));

/// Returns a snapshot of the process-wide settings.
pub fn current() -> Settings {
	GLOBAL.read().clone()
}

/// Replaces the process-wide settings.
pub fn install(settings: Settings) {
	*GLOBAL.write() = settings;
}

/// Restores the process-wide defaults.
pub fn reset() {
	install(Settings::default());
}

/// Sets the process-wide compatibility rule.
pub fn set_compatibility_rule(strict: bool) {
	GLOBAL.write().strict = strict;
}

/// Sets the process-wide attribute overwrite rule.
pub fn set_overwrite_rule(overwrite: bool) {
	GLOBAL.write().overwrite = overwrite;
}

/// Sets the process-wide verbosity rule.
pub fn set_verbose_rule(verbose: bool) {
	GLOBAL.write().verbose = verbose;
}

/// Sets the process-wide keyer.
pub fn set_keyer<F>(keyer: F)
where
	F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
{
	GLOBAL.write().keyer = Arc::new(keyer);
}

/// Sets the process-wide method namer.
pub fn set_method_namer<F>(namer: F)
where
	F: Fn(&str) -> String + Send + Sync + 'static,
{
	GLOBAL.write().method_namer = Arc::new(namer);
}

/// Sets a process-wide option from a dynamic value.
pub fn set_option(option: &str, value: &Value) -> Result<(), ConfigError> {
	GLOBAL.write().set(option, value)
}
