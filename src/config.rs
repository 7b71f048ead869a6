//! Layout configuration.
//!
//! `LayoutConfig` holds the tooltip geometry shared by the grid and popup
//! calculators. Missing fields fall back to the defaults, so a host can
//! override only what it needs.

use crate::error::EvolutionError;
use crate::layout::IconGridLayout;
use crate::popup::PopupPlacement;
use serde::{Deserialize, Serialize};

/// Tooltip geometry settings.
///
/// # Examples
///
/// ```rust
/// use evoformula::LayoutConfig;
///
/// let config = LayoutConfig::from_json(r#"{ "spacing": 6 }"#).unwrap();
/// assert_eq!(config.icon_size, 38.0);
/// assert_eq!(config.spacing, 6.0);
/// assert_eq!(config.grid().icons_per_row(440.0), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub icon_size: f32,
    pub spacing: f32,
    /// Inner margin of the tooltip panel on each side.
    pub padding: f32,
    pub tooltip_width: f32,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            icon_size: 38.0,
            spacing: 8.0,
            padding: 12.0,
            tooltip_width: 420.0,
            screen_width: 1920.0,
            screen_height: 1080.0,
        }
    }
}

impl LayoutConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, EvolutionError> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every extent is finite and in range.
    pub fn validate(&self) -> Result<(), EvolutionError> {
        let positive = [
            ("icon_size", self.icon_size),
            ("spacing", self.spacing),
            ("tooltip_width", self.tooltip_width),
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EvolutionError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(EvolutionError::InvalidConfig(format!(
                "padding must not be negative, got {}",
                self.padding
            )));
        }
        Ok(())
    }

    /// Width left for icon grids inside the padded tooltip.
    pub fn content_width(&self) -> f32 {
        (self.tooltip_width - self.padding * 2.0).max(0.0)
    }

    pub fn grid(&self) -> IconGridLayout {
        IconGridLayout::new(self.icon_size, self.spacing)
    }

    pub fn popup(&self) -> PopupPlacement {
        PopupPlacement::new(self.screen_width, self.screen_height)
    }
}
