use serde::{Deserialize, Serialize};

/// Household status for jurisdictions without a richer filing-status model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    #[default]
    Single,
    Married,
}

impl MaritalStatus {
    pub fn is_married(&self) -> bool {
        matches!(self, Self::Married)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "" => Some(Self::Single),
            "married" => Some(Self::Married),
            _ => None,
        }
    }
}
