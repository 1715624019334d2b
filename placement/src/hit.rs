#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DELETE_BUTTON_PX, HANDLE_INSET_PX, HANDLE_SIZE_PX, SIGN_BUTTON_GAP_PX, SIGN_BUTTON_HEIGHT_PX,
    SIGN_BUTTON_WIDTH_PX,
};
use crate::doc::{Field, FieldSet};
use crate::engine::LiveOverrides;
use crate::geometry::{PixelRect, Point, Size};
use crate::identity::FieldId;

/// Which part of a field was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPart {
    Body,
    Handle(Corner),
    Control(Control),
}

/// Corner grabbed by a resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Corner {
    pub const ALL: [Self; 4] = [Self::Nw, Self::Ne, Self::Sw, Self::Se];

    /// CSS cursor shown while this corner is grabbed.
    #[must_use]
    pub fn css_cursor(self) -> &'static str {
        match self {
            Self::Nw => "nw-resize",
            Self::Ne => "ne-resize",
            Self::Sw => "sw-resize",
            Self::Se => "se-resize",
        }
    }
}

/// A contextual button shown on a hovered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Sign,
    Delete,
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub field_id: FieldId,
    pub part: HitPart,
}

/// Pixel bounds of a resize handle for a field drawn at `field`.
#[must_use]
pub fn handle_rect(field: PixelRect, corner: Corner) -> PixelRect {
    let near_x = field.x + HANDLE_INSET_PX;
    let far_x = field.x + field.width - HANDLE_INSET_PX - HANDLE_SIZE_PX;
    let near_y = field.y + HANDLE_INSET_PX;
    let far_y = field.y + field.height - HANDLE_INSET_PX - HANDLE_SIZE_PX;
    let (x, y) = match corner {
        Corner::Nw => (near_x, near_y),
        Corner::Ne => (far_x, near_y),
        Corner::Sw => (near_x, far_y),
        Corner::Se => (far_x, far_y),
    };
    PixelRect { x, y, width: HANDLE_SIZE_PX, height: HANDLE_SIZE_PX }
}

/// Pixel bounds of a control button for a field drawn at `field`.
///
/// The delete button overhangs the top-right corner; the sign button sits
/// centered above the top edge.
#[must_use]
pub fn control_rect(field: PixelRect, control: Control) -> PixelRect {
    match control {
        Control::Delete => PixelRect {
            x: field.x + field.width + DELETE_BUTTON_PX * 0.6 - DELETE_BUTTON_PX,
            y: field.y - DELETE_BUTTON_PX * 0.6,
            width: DELETE_BUTTON_PX,
            height: DELETE_BUTTON_PX,
        },
        Control::Sign => PixelRect {
            x: field.x + field.width / 2.0 - SIGN_BUTTON_WIDTH_PX / 2.0,
            y: field.y - SIGN_BUTTON_GAP_PX - SIGN_BUTTON_HEIGHT_PX,
            width: SIGN_BUTTON_WIDTH_PX,
            height: SIGN_BUTTON_HEIGHT_PX,
        },
    }
}

/// Controls a field offers while hovered: none while provisional, no sign
/// button once signed.
#[must_use]
pub fn available_controls(field: &Field) -> &'static [Control] {
    if field.is_provisional() {
        &[]
    } else if field.is_signed() {
        &[Control::Delete]
    } else {
        &[Control::Sign, Control::Delete]
    }
}

/// Test which field part (if any) is under pixel `point` on `page`.
///
/// Controls and handles of `controls_for` are checked first, since they sit
/// above every field body; bodies are then checked top-most first. `None`
/// means the empty overlay was hit.
#[must_use]
pub fn hit_test(
    point: Point,
    page: u32,
    container: Size,
    doc: &FieldSet,
    overrides: &LiveOverrides,
    controls_for: Option<&FieldId>,
) -> Option<Hit> {
    if let Some(field) = controls_for.and_then(|id| doc.get(id)).filter(|f| f.page_number == page) {
        let bounds = overrides.display_rect(field).to_pixels(container);
        for control in available_controls(field) {
            if control_rect(bounds, *control).contains(point) {
                return Some(Hit { field_id: field.id.clone(), part: HitPart::Control(*control) });
            }
        }
        if !field.is_provisional() {
            for corner in Corner::ALL {
                if handle_rect(bounds, corner).contains(point) {
                    return Some(Hit { field_id: field.id.clone(), part: HitPart::Handle(corner) });
                }
            }
        }
        if bounds.contains(point) {
            return Some(Hit { field_id: field.id.clone(), part: HitPart::Body });
        }
    }

    let on_page: Vec<&Field> = doc.on_page(page).collect();
    on_page
        .into_iter()
        .rev()
        .find(|f| overrides.display_rect(f).to_pixels(container).contains(point))
        .map(|f| Hit { field_id: f.id.clone(), part: HitPart::Body })
}
