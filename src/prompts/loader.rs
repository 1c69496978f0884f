use std::path::Path;
use crate::errors::CityScanError;
use crate::models::Specialist;
use super::templates::*;
use tracing::{debug, info};

/// The four prompt texts one analysis needs. Built-in by default; any of
/// them can be replaced by a `<name>.txt` file in an override directory.
#[derive(Debug, Clone)]
pub struct PromptSet {
    pothole: String,
    trash: String,
    graffiti: String,
    summary: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            pothole: POTHOLE_PROMPT.to_string(),
            trash: TRASH_PROMPT.to_string(),
            graffiti: GRAFFITI_PROMPT.to_string(),
            summary: SUMMARY_PROMPT.to_string(),
        }
    }
}

impl PromptSet {
    /// Load overrides from `dir`. Files that do not exist keep the built-in text.
    pub fn load(dir: &Path) -> Result<Self, CityScanError> {
        if !dir.is_dir() {
            return Err(CityScanError::Config(format!(
                "Prompt directory not found: {}",
                dir.display()
            )));
        }

        let mut set = Self::default();
        for (name, slot) in [
            ("pothole", &mut set.pothole),
            ("trash", &mut set.trash),
            ("graffiti", &mut set.graffiti),
            ("summary", &mut set.summary),
        ] {
            let path = dir.join(format!("{}.txt", name));
            if path.exists() {
                *slot = std::fs::read_to_string(&path)?;
                info!(prompt = name, path = %path.display(), "Loaded prompt override");
            }
        }

        if !set.summary.contains(JSON_REPORT_PLACEHOLDER) {
            return Err(CityScanError::Config(format!(
                "summary prompt must contain {}",
                JSON_REPORT_PLACEHOLDER
            )));
        }
        debug!(dir = %dir.display(), "Prompt set ready");
        Ok(set)
    }

    pub fn specialist(&self, specialist: Specialist) -> &str {
        match specialist {
            Specialist::Pothole => &self.pothole,
            Specialist::Trash => &self.trash,
            Specialist::Graffiti => &self.graffiti,
        }
    }

    /// Embed the serialized report into the summary template.
    pub fn render_summary(&self, json_report: &str) -> String {
        self.summary.replace(JSON_REPORT_PLACEHOLDER, json_report)
    }
}
