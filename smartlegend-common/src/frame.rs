#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Space reserved by the host chart around its drawing area, per side
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Insets {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl From<f32> for Insets {
    fn from(value: f32) -> Self {
        Insets::uniform(value)
    }
}

/// Snapshot of the host's drawing surface taken once per recompute
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceFrame {
    pub width: f32,
    pub height: f32,
    pub insets: Insets,
}

impl SurfaceFrame {
    pub fn new(width: f32, height: f32, insets: impl Into<Insets>) -> Self {
        Self {
            width,
            height,
            insets: insets.into(),
        }
    }

    /// Size left for chart content once the insets are removed
    pub fn available_size(&self) -> [f32; 2] {
        [
            self.width - self.insets.horizontal(),
            self.height - self.insets.vertical(),
        ]
    }
}
