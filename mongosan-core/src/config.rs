//! Configuration management for `mongosan-core`.
//!
//! [`SanitizeOptions`] is the user-facing configuration record. It can be
//! built in code, loaded from a YAML (or JSON) file, and turned into the
//! engine's immutable [`Policy`].
//!
//! Invalid values never abort loading: a field with the wrong type falls back
//! to its default and a warning is logged. Only a document that is not YAML
//! at all is an error.
//!
//! License: MIT OR Apache-2.0

use std::path::Path;

use log::{debug, info, warn};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::MongosanError;
use crate::request::RequestField;
use crate::sanitizers::compiler::{Policy, DEFAULT_REPLACEMENT};

/// Options recognized by the convenience functions, the request adapter and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeOptions {
    /// String substituted for each forbidden character.
    #[serde(alias = "replaceWith", deserialize_with = "lenient_replacement")]
    pub replace_with: String,
    /// When true only `$` is forbidden; `.` is left alone.
    #[serde(alias = "allowDots", deserialize_with = "lenient_flag")]
    pub allow_dots: bool,
    /// Detect without rewriting.
    #[serde(alias = "dryRun", deserialize_with = "lenient_flag")]
    pub dry_run: bool,
    /// Request fields the adapter processes.
    #[serde(deserialize_with = "lenient_fields")]
    pub fields: Vec<RequestField>,
    /// Reject input nested deeper than this. `None` means unbounded.
    #[serde(alias = "maxDepth", deserialize_with = "lenient_depth")]
    pub max_depth: Option<usize>,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            replace_with: DEFAULT_REPLACEMENT.to_string(),
            allow_dots: false,
            dry_run: false,
            fields: RequestField::ALL.to_vec(),
            max_depth: None,
        }
    }
}

impl SanitizeOptions {
    /// Loads options from a YAML file. JSON files are accepted as well.
    ///
    /// A file that cannot be read is [`MongosanError::IoError`]; one that is
    /// not YAML is [`MongosanError::ConfigParse`], with the path in the message.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, MongosanError> {
        let path = path.as_ref();
        info!("Loading sanitizer options from: {}", path.display());
        let text = std::fs::read_to_string(path)?;
        let options = Self::parse_yaml(&text).map_err(|e| {
            MongosanError::ConfigParse(format!("{}: {}", path.display(), e))
        })?;
        debug!("Loaded options: {:?}", options);
        Ok(options)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, MongosanError> {
        Self::parse_yaml(text).map_err(|e| MongosanError::ConfigParse(e.to_string()))
    }

    fn parse_yaml(text: &str) -> Result<Self, serde_yml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(text)
    }

    /// Builds the engine policy. The replacement is validated by [`Policy::new`].
    pub fn to_policy(&self) -> Policy {
        Policy::new(self.replace_with.clone(), self.dry_run, self.allow_dots)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

fn lenient<'de, D, T>(deserializer: D, field: &str, fallback: T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Valid(value) => Ok(value),
        Lenient::Invalid(_) => {
            warn!("Ignoring invalid value for '{}'; using the default.", field);
            Ok(fallback)
        }
    }
}

fn lenient_replacement<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient(deserializer, "replace_with", DEFAULT_REPLACEMENT.to_string())
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    lenient(deserializer, "flag", false)
}

fn lenient_depth<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
    lenient(deserializer, "max_depth", None)
}

/// Unknown field names are dropped one by one; a value that is not a list at
/// all resets the selection to every field. An explicit empty list selects
/// nothing.
fn lenient_fields<'de, D>(deserializer: D) -> Result<Vec<RequestField>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<Lenient<RequestField>>> = lenient(deserializer, "fields", None)?;
    let Some(entries) = entries else {
        return Ok(RequestField::ALL.to_vec());
    };
    let mut fields = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Lenient::Valid(field) if !fields.contains(&field) => fields.push(field),
            Lenient::Valid(_) => {}
            Lenient::Invalid(_) => warn!("Ignoring unknown request field in 'fields'."),
        }
    }
    Ok(fields)
}
