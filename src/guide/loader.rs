//! Guide loading from JSON
//!
//! Every loaded guide passes structure validation before it is handed out,
//! so the validator can assume consistent constraints.

use std::fs;
use std::path::Path;

use super::errors::{GuideError, GuideResult};
use super::types::Guide;
use crate::observability::{log_event_with_fields, Event};

/// Reads guides from strings or files
pub struct GuideLoader;

impl GuideLoader {
    /// Parses and structurally validates a guide from JSON text
    pub fn parse(json: &str) -> GuideResult<Guide> {
        let guide: Guide =
            serde_json::from_str(json).map_err(|e| GuideError::malformed(e.to_string()))?;
        guide.validate_structure()?;
        Ok(guide)
    }

    /// Parses and structurally validates a guide from a JSON value
    pub fn from_value(value: serde_json::Value) -> GuideResult<Guide> {
        let guide: Guide =
            serde_json::from_value(value).map_err(|e| GuideError::malformed(e.to_string()))?;
        guide.validate_structure()?;
        Ok(guide)
    }

    /// Loads a guide file.
    ///
    /// A file that cannot be read is FATAL; a file that does not decode or
    /// breaks a structural rule is rejected.
    pub fn load_file(path: &Path) -> GuideResult<Guide> {
        let contents = fs::read_to_string(path)
            .map_err(|e| GuideError::unreadable(path.display().to_string(), e.to_string()))?;
        let guide = Self::parse(&contents)?;

        let groups = guide.groups.len().to_string();
        log_event_with_fields(
            Event::GuideLoaded,
            &[("path", &path.display().to_string()), ("groups", &groups)],
        );
        Ok(guide)
    }
}
