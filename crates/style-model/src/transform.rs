//! Zoom, rotation, and flip applied to the base image.
//!
//! The transform is held by the editing session and persists across
//! redraws until it is explicitly reset.

use serde::{Deserialize, Serialize};

/// Degrees added by a single rotate action.
pub const ROTATION_STEP_DEGREES: i32 = 90;

/// Base-image transform about the canvas center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageTransform {
    /// Scale applied to the square draw size (1.0 = fit the short side).
    pub zoom: f32,

    /// Accumulated clockwise rotation. Not normalized; see
    /// [`ImageTransform::effective_rotation`].
    pub rotation_degrees: i32,

    /// Mirror the image horizontally.
    pub flipped: bool,
}

impl ImageTransform {
    pub const IDENTITY: ImageTransform = ImageTransform {
        zoom: 1.0,
        rotation_degrees: 0,
        flipped: false,
    };

    /// Rotate a further 90 degrees clockwise.
    pub fn rotate(&mut self) {
        self.rotation_degrees = self
            .rotation_degrees
            .checked_add(ROTATION_STEP_DEGREES)
            .unwrap_or(self.effective_rotation() + ROTATION_STEP_DEGREES);
    }

    /// Toggle the horizontal mirror.
    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Return to zoom 1, no rotation, not flipped.
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Rotation normalized to `[0, 360)`.
    pub fn effective_rotation(&self) -> i32 {
        self.rotation_degrees.rem_euclid(360)
    }
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
