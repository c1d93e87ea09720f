use crate::models::TemplateKind;
use crate::utils::{DocfillError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Generator settings, read from a JSON file. Every field is optional.
///
/// ```json
/// { "template": "company_waive", "include_technical_fee": false }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub template: TemplateKind,
    /// Overrides the fee clause decision detected from the email.
    pub include_technical_fee: Option<bool>,
    /// Fixed signing date; today's date when absent.
    pub signing_date: Option<String>,
}

impl GeneratorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| DocfillError::io(path, e))?;
        let config = serde_json::from_str(&raw).map_err(|e| DocfillError::Config {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Absent path means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
