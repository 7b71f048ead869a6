//! Popup placement module.
//!
//! Places a rectangular popup next to an anchor point and keeps it on a
//! screen centered at the origin. The popup's `(x, y)` is its top-left
//! corner; y grows upward.

use serde::{Deserialize, Serialize};

/// Horizontal offset from the cursor in pointer mode.
pub const POINTER_OFFSET_X: f32 = 15.0;
/// Vertical offset from the cursor in pointer mode.
pub const POINTER_OFFSET_Y: f32 = 40.0;
/// Vertical offset from the anchor in controller mode.
pub const CONTROLLER_OFFSET_Y: f32 = 15.0;

/// Which input device the popup is following.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Mouse or touch: trail the cursor.
    #[default]
    Pointer,
    /// Gamepad: center horizontally on the selected element.
    Controller,
}

impl From<bool> for InputMode {
    fn from(using_controller: bool) -> Self {
        if using_controller {
            InputMode::Controller
        } else {
            InputMode::Pointer
        }
    }
}

/// Screen-clamped popup placement.
///
/// # Examples
///
/// ```rust
/// use evoformula::{InputMode, PopupPlacement};
///
/// let placement = PopupPlacement::new(1920.0, 1080.0);
/// let pos = placement.place(900.0, 200.0, 420.0, 300.0, InputMode::Pointer);
/// assert_eq!(pos, (540.0, 240.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopupPlacement {
    pub screen_width: f32,
    pub screen_height: f32,
}

impl PopupPlacement {
    /// Create a placement for a screen of the given size.
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width,
            screen_height,
        }
    }

    /// Position a `popup_width` x `popup_height` popup for an anchor.
    ///
    /// Clamps are applied right, left, top, bottom in that order, so a popup
    /// wider than the screen ends up pinned to the left edge.
    pub fn place(
        &self,
        anchor_x: f32,
        anchor_y: f32,
        popup_width: f32,
        popup_height: f32,
        mode: InputMode,
    ) -> (f32, f32) {
        let (mut x, mut y) = match mode {
            InputMode::Controller => (anchor_x - popup_width * 0.5, anchor_y + CONTROLLER_OFFSET_Y),
            InputMode::Pointer => (anchor_x - POINTER_OFFSET_X, anchor_y + POINTER_OFFSET_Y),
        };

        let half_width = self.screen_width / 2.0;
        let half_height = self.screen_height / 2.0;

        if x + popup_width > half_width {
            x = half_width - popup_width;
        }
        if x < -half_width {
            x = -half_width;
        }
        if y > half_height {
            y = half_height;
        }
        if y - popup_height < -half_height {
            y = -half_height + popup_height;
        }

        (x, y)
    }
}
