//! Normalized page geometry.
//!
//! Field rectangles are stored as fractions of the rendered page surface, so a
//! field keeps its place on the page regardless of zoom. Pointer input arrives
//! in CSS pixels relative to the page overlay; the helpers here convert between
//! the two spaces and enforce the size and margin limits every stored rectangle
//! must satisfy.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FIELD_EXTENT, MIN_FIELD_HEIGHT, MIN_FIELD_WIDTH};
use crate::doc::FieldType;
use crate::hit::Corner;

/// A point in overlay pixel space or normalized page space, depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp this pixel point into `[0, width] × [0, height]` of `container`.
    #[must_use]
    pub fn clamp_to(self, container: Size) -> Self {
        Self {
            x: clamp_or(self.x, 0.0, container.width.max(0.0), 0.0),
            y: clamp_or(self.y, 0.0, container.height.max(0.0), 0.0),
        }
    }
}

/// Width and height of the rendered page overlay in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether this size can be divided by (finite and non-zero on both axes).
    #[must_use]
    pub fn is_usable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A rectangle in normalized page-fraction coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge, fraction of page width.
    pub x: f64,
    /// Top edge, fraction of page height.
    pub y: f64,
    /// Width, fraction of page width.
    pub width: f64,
    /// Height, fraction of page height.
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Sanitize into the unit square without applying the minimum-size rule.
    ///
    /// Non-finite components collapse to zero, every component lands in
    /// `[0, 1]`, and the far edges never pass the page edge.
    #[must_use]
    pub fn bounded(self) -> Self {
        let width = clamp_or(self.width, 0.0, 1.0, 0.0);
        let height = clamp_or(self.height, 0.0, 1.0, 0.0);
        Self {
            x: clamp_or(self.x, 0.0, 1.0 - width, 0.0),
            y: clamp_or(self.y, 0.0, 1.0 - height, 0.0),
            width,
            height,
        }
    }

    /// Whether every component is finite and the rectangle lies within the page.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
            && self.x + self.width <= 1.0 + f64::EPSILON
            && self.y + self.height <= 1.0 + f64::EPSILON
    }

    /// Whether a normalized point lies inside this rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Project into overlay pixels for a container of the given size.
    #[must_use]
    pub fn to_pixels(self, container: Size) -> PixelRect {
        PixelRect {
            x: self.x * container.width,
            y: self.y * container.height,
            width: self.width * container.width,
            height: self.height * container.height,
        }
    }
}

/// A rectangle in overlay pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Convert to normalized page fractions by dividing by the container size.
    ///
    /// Returns `None` when the container has no usable size.
    #[must_use]
    pub fn to_fraction(self, container: Size) -> Option<Rect> {
        if !container.is_usable() {
            return None;
        }
        Some(Rect {
            x: self.x / container.width,
            y: self.y / container.height,
            width: self.width / container.width,
            height: self.height / container.height,
        })
    }

    /// Whether a pixel point lies inside this rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Enforce the stored-field limits on a rectangle.
///
/// Width lands in `[0.06, 0.98]`, height in `[0.03, 0.98]`, then the origin is
/// pulled back so that `x + width ≤ 0.98` and `y + height ≤ 0.98`. The result
/// is a fixed point: clamping it again returns it unchanged.
#[must_use]
pub fn clamp_rect(rect: Rect) -> Rect {
    let width = clamp_or(rect.width, MIN_FIELD_WIDTH, MAX_FIELD_EXTENT, MIN_FIELD_WIDTH);
    let height = clamp_or(rect.height, MIN_FIELD_HEIGHT, MAX_FIELD_EXTENT, MIN_FIELD_HEIGHT);
    Rect {
        x: clamp_or(rect.x, 0.0, MAX_FIELD_EXTENT - width, 0.0),
        y: clamp_or(rect.y, 0.0, MAX_FIELD_EXTENT - height, 0.0),
        width,
        height,
    }
}

/// Clamp a dragged origin so a field of `width × height` stays on the page.
///
/// Drags keep the field's own size, so only the full-page bound applies here.
#[must_use]
pub fn clamp_drag(x: f64, y: f64, width: f64, height: f64) -> Point {
    Point {
        x: clamp_or(x, 0.0, (1.0 - width).max(0.0), 0.0),
        y: clamp_or(y, 0.0, (1.0 - height).max(0.0), 0.0),
    }
}

/// Convert a pixel delta to a fraction of the container's current size.
///
/// A container with no usable size yields a zero delta.
#[must_use]
pub fn pixel_delta_to_fraction(delta_px: f64, container_px: f64) -> f64 {
    if !container_px.is_finite() || container_px <= 0.0 || !delta_px.is_finite() {
        return 0.0;
    }
    delta_px / container_px
}

/// Build a pixel rectangle spanning two corner points, in either order.
#[must_use]
pub fn rect_from_drag(start: Point, end: Point) -> PixelRect {
    PixelRect {
        x: start.x.min(end.x),
        y: start.y.min(end.y),
        width: (end.x - start.x).abs(),
        height: (end.y - start.y).abs(),
    }
}

/// Apply a fractional pointer delta to `start` by moving the two free edges of `corner`.
///
/// The opposite corner stays fixed; the result is clamped with [`clamp_rect`].
#[must_use]
pub fn resize_from_corner(start: Rect, corner: Corner, dx: f64, dy: f64) -> Rect {
    let Rect { mut x, mut y, mut width, mut height } = start;
    match corner {
        Corner::Se => {
            width += dx;
            height += dy;
        }
        Corner::Sw => {
            width -= dx;
            x += dx;
            height += dy;
        }
        Corner::Ne => {
            width += dx;
            height -= dy;
            y += dy;
        }
        Corner::Nw => {
            width -= dx;
            x += dx;
            height -= dy;
            y += dy;
        }
    }
    clamp_rect(Rect { x, y, width, height })
}

/// Default placement size for a palette drop, as page fractions.
#[must_use]
pub fn default_size(field_type: FieldType) -> (f64, f64) {
    match field_type {
        FieldType::Signature => (0.25, 0.08),
        FieldType::Initials => (0.12, 0.06),
        FieldType::Name => (0.25, 0.06),
        FieldType::Date => (0.20, 0.05),
        FieldType::Text => (0.25, 0.06),
    }
}

/// Rectangle for a palette drop: the type's default size centered on `at`.
#[must_use]
pub fn drop_rect(at: Point, field_type: FieldType) -> Rect {
    let (width, height) = default_size(field_type);
    clamp_rect(Rect {
        x: at.x - width / 2.0,
        y: at.y - height / 2.0,
        width,
        height,
    })
}

/// Clamp `value` into `[min, max]`, replacing non-finite input with `fallback`.
///
/// Never panics: an inverted range collapses to `min`.
fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback.max(min).min(max.max(min));
    }
    value.max(min).min(max.max(min))
}
