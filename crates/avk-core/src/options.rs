//! Generator options

use crate::{AvkError, AvkResult};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Output source root. Required.
pub const OPT_SRC: &str = "avkSrc";

/// Colon-delimited allow-list of simple class names.
pub const OPT_TARGETS: &str = "avkTargets";

/// Downgrades the "nested under a non-value parent" error to a warning.
pub const OPT_IGNORE_NESTED: &str = "avkIgnoreNested";

/// Every option key the generator understands
pub const ALL_OPTIONS: &[&str] = &[OPT_SRC, OPT_TARGETS, OPT_IGNORE_NESTED];

/// Options for one generation run, parsed from string-keyed pairs the way an
/// annotation processor receives `-Akey=value` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Directory generated sources are written under
    pub src_dir: PathBuf,

    /// Simple names to generate; empty means everything discovered
    pub targets: BTreeSet<String>,

    /// Report nested-parent violations as warnings and keep generating
    pub ignore_nested: bool,
}

impl Options {
    /// Create options for the given output directory with everything else
    /// left at its default
    pub fn new(src_dir: impl Into<PathBuf>) -> Self {
        Self {
            src_dir: src_dir.into(),
            targets: BTreeSet::new(),
            ignore_nested: false,
        }
    }

    /// Parse options from a key/value map.
    ///
    /// Fails when `avkSrc` is absent or `avkIgnoreNested` is not exactly
    /// `true` or `false`. Unknown keys are ignored.
    pub fn from_map(map: &BTreeMap<String, String>) -> AvkResult<Self> {
        for key in map.keys() {
            if !ALL_OPTIONS.contains(&key.as_str()) {
                tracing::debug!(option = %key, "ignoring unknown option");
            }
        }

        let src_dir = map
            .get(OPT_SRC)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| AvkError::MissingOption(OPT_SRC.to_string()))?;

        let targets = map
            .get(OPT_TARGETS)
            .map(|value| parse_targets(value))
            .unwrap_or_default();

        let ignore_nested = match map.get(OPT_IGNORE_NESTED) {
            None => false,
            Some(value) => parse_strict_bool(OPT_IGNORE_NESTED, value)?,
        };

        Ok(Self {
            src_dir,
            targets,
            ignore_nested,
        })
    }

    /// Parse a TOML document whose top-level table holds option keys.
    ///
    /// ```toml
    /// avkSrc = "src/main/kotlin"
    /// avkTargets = "Example:Other"
    /// avkIgnoreNested = true
    /// ```
    ///
    /// Values may be strings or booleans; everything is converted to the
    /// string form `from_map` expects.
    pub fn map_from_toml(source: &str) -> AvkResult<BTreeMap<String, String>> {
        let table: toml::Table = toml::from_str(source)?;
        let mut map = BTreeMap::new();
        for (key, value) in table {
            let value = match value {
                toml::Value::String(s) => s,
                toml::Value::Boolean(b) => b.to_string(),
                toml::Value::Array(items) => items
                    .iter()
                    .filter_map(|item| item.as_str())
                    .collect::<Vec<_>>()
                    .join(":"),
                other => {
                    return Err(AvkError::InvalidOption {
                        key,
                        value: other.to_string(),
                    });
                }
            };
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Whether a declaration should be generated.
    ///
    /// `outermost` is the simple name of the top-level class enclosing the
    /// declaration, so nested children of a targeted root are included.
    pub fn is_targeted(&self, simple_name: &str, outermost: &str) -> bool {
        self.targets.is_empty()
            || self.targets.contains(simple_name)
            || self.targets.contains(outermost)
    }
}

fn parse_targets(value: &str) -> BTreeSet<String> {
    value
        .split(':')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_strict_bool(key: &str, value: &str) -> AvkResult<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(AvkError::InvalidOption {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
