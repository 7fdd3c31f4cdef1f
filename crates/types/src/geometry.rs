use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Margin {margin:.2} must be smaller than half of both page dimensions ({width:.2} x {height:.2}).")]
    MarginTooLarge { margin: f32, width: f32, height: f32 },
    #[error("Page dimensions must be positive, got {0:.2} x {1:.2}.")]
    NonPositiveSize(f32, f32),
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Page size and the uniform margin applied on every side, in points.
///
/// Coordinates used throughout the engine have their origin at the top-left
/// corner of the page with `y` growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeometry")]
pub struct PageGeometry {
    width: f32,
    height: f32,
    margin: f32,
}

#[derive(Deserialize)]
struct RawGeometry {
    width: f32,
    height: f32,
    margin: f32,
}

impl TryFrom<RawGeometry> for PageGeometry {
    type Error = GeometryError;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        PageGeometry::new(raw.width, raw.height, raw.margin)
    }
}

impl PageGeometry {
    pub fn new(width: f32, height: f32, margin: f32) -> Result<Self, GeometryError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(GeometryError::NonPositiveSize(width, height));
        }
        if !(margin >= 0.0 && margin < width / 2.0 && margin < height / 2.0) {
            return Err(GeometryError::MarginTooLarge { margin, width, height });
        }
        Ok(Self { width, height, margin })
    }

    /// ISO A4 portrait with a 40pt margin.
    pub fn a4() -> Self {
        Self { width: 595.28, height: 841.89, margin: 40.0 }
    }

    /// US Letter portrait with a 40pt margin.
    pub fn letter() -> Self {
        Self { width: 612.0, height: 792.0, margin: 40.0 }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn content_left(&self) -> f32 {
        self.margin
    }

    pub fn content_right(&self) -> f32 {
        self.width - self.margin
    }

    pub fn content_top(&self) -> f32 {
        self.margin
    }

    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn content_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}
