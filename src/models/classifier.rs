use serde::{Deserialize, Serialize};

/// One of the three fixed specialist detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialist {
    Pothole,
    Trash,
    Graffiti,
}

impl Specialist {
    pub const ALL: [Specialist; 3] = [Self::Pothole, Self::Trash, Self::Graffiti];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pothole => "pothole",
            Self::Trash => "trash",
            Self::Graffiti => "graffiti",
        }
    }
}

impl std::fmt::Display for Specialist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single specialist run, serialized exactly as it appears in
/// the report: `{description, severity_score}` or `{error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassifierResult {
    Detection {
        description: Option<String>,
        severity_score: u8,
    },
    Failed {
        error: String,
    },
}

impl ClassifierResult {
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed { error: error.into() }
    }

    /// Score used for aggregation. Failures count as zero.
    pub fn severity_score(&self) -> u8 {
        match self {
            Self::Detection { severity_score, .. } => *severity_score,
            Self::Failed { .. } => 0,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
