use serde::{Deserialize, Serialize};

/// Coarse label derived from a 0-100 confidence figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLabel {
    High,
    Medium,
    Low,
}

impl ConfidenceLabel {
    pub fn from_confidence(confidence: u8) -> Self {
        match confidence {
            c if c >= 75 => ConfidenceLabel::High,
            c if c >= 50 => ConfidenceLabel::Medium,
            _ => ConfidenceLabel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLabel::High => "High",
            ConfidenceLabel::Medium => "Medium",
            ConfidenceLabel::Low => "Low",
        }
    }
}
