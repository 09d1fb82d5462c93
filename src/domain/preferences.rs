use serde::{Deserialize, Serialize};

/// Optional steering supplied by the founder before a strategy is generated.
///
/// Every field is free text without validation. An empty string carries the
/// same meaning as an absent value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub industry: Option<String>,
    pub target_audience: Option<String>,
    pub skills: Option<String>,
    pub initial_idea: Option<String>,
}

impl Preferences {
    pub fn industry(&self) -> Option<&str> {
        present(&self.industry)
    }

    pub fn target_audience(&self) -> Option<&str> {
        present(&self.target_audience)
    }

    pub fn skills(&self) -> Option<&str> {
        present(&self.skills)
    }

    pub fn initial_idea(&self) -> Option<&str> {
        present(&self.initial_idea)
    }

    /// True when no field carries a value.
    pub fn is_open(&self) -> bool {
        self.industry().is_none()
            && self.target_audience().is_none()
            && self.skills().is_none()
            && self.initial_idea().is_none()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
