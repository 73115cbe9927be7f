//! Wheel options as supplied by the caller

use serde::{Deserialize, Serialize};

/// One pie-slice choice on the wheel
///
/// Storage rows carry extra fields (`id`, `wheel_id`); they are ignored on
/// input, so rows can be deserialized straight into options.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WheelOption {
    /// Display label (truncated for rendering, never for results)
    pub text: String,
    /// Explicit fill color; empty means "use the palette"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Shown with the result only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty: Option<String>,
    /// Shown with the result only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<String>,
}

impl WheelOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_penalty(mut self, penalty: impl Into<String>) -> Self {
        self.penalty = Some(penalty.into());
        self
    }

    pub fn with_bonus(mut self, bonus: impl Into<String>) -> Self {
        self.bonus = Some(bonus.into());
        self
    }

    /// Explicit color, treating an empty string as absent
    pub fn explicit_color(&self) -> Option<&str> {
        self.color.as_deref().filter(|c| !c.is_empty())
    }

    /// Parse a JSON array of option rows
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<&str> for WheelOption {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
