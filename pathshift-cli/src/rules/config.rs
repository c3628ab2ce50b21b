use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::ReplacementRule;
use crate::core::error::{PathShiftError, Result};

/// Contents of a `--config` rule file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
    /// Root directory to rewrite
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// File name suffixes to rewrite
    #[serde(default)]
    pub extensions: Option<Vec<String>>,

    /// Directory path substrings to skip
    #[serde(default)]
    pub exclude: Option<Vec<String>>,

    /// Ordered replacement rules
    #[serde(default)]
    pub rules: Vec<ReplacementRule>,
}

impl RuleFile {
    /// Load a rule file. `.json` files are parsed as JSON, everything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| PathShiftError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents).map_err(|e| e.to_string())
        } else {
            toml::from_str(&contents).map_err(|e| e.to_string())
        };

        let file: RuleFile = parsed.map_err(|message| PathShiftError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })?;

        tracing::debug!(
            "Loaded {} rule(s) from {}",
            file.rules.len(),
            path.display()
        );

        Ok(file)
    }
}
