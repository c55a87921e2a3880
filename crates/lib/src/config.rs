//! Session configuration.
//!
//! A [`ProjectConfig`] is fixed for the lifetime of a loaded project. It can be
//! built in code or read from a JSON file; absent fields take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Options applied to a project session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Preferred description language, e.g. `"en-US"`.
    ///
    /// Only consulted for multi-language projects. When unset, the project's
    /// `CurrentLanguage` is used.
    pub language: Option<String>,
    /// Write line breaks inside descriptions and comments as CRLF.
    pub crlf_comments: bool,
    /// Remove undecorated `<Data>` elements after a value write.
    pub strip_raw_data: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            language: None,
            crlf_comments: true,
            strip_raw_data: true,
        }
    }
}

impl ProjectConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Sets the preferred description language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}
