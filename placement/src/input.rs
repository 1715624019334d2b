//! Input model: pointer events, creation modes, and the gesture state machine.
//!
//! Mouse and touch listeners both feed a single [`PointerInput`] shape
//! (position + phase + source), so the engine keeps one set of gesture rules.
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up, carrying all context needed to compute deltas from the
//! gesture's anchor and emit the final commit on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::{DocumentStatus, FieldType};
use crate::geometry::{Point, Rect, Size};
use crate::hit::{Control, Corner, Hit, HitPart};
use crate::identity::FieldId;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Mouse down or touch start.
    Start,
    /// Mouse move or touch move.
    Move,
    /// Mouse up or touch end.
    End,
    /// Pointer left the overlay set; ends any gesture without further movement.
    Leave,
}

/// Device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

/// What the pointer is over, as resolved by the host (DOM target) or by [`crate::hit::hit_test`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerTarget {
    /// Empty overlay area of a page.
    Overlay { page: u32 },
    /// The body of a field.
    Field { id: FieldId },
    /// A resize handle of a field.
    Handle { id: FieldId, corner: Corner },
    /// A contextual button of a field.
    Control { id: FieldId, control: Control },
}

impl PointerTarget {
    /// Build a target from a hit-test result on `page`.
    #[must_use]
    pub fn from_hit(page: u32, hit: Option<Hit>) -> Self {
        match hit {
            None => Self::Overlay { page },
            Some(Hit { field_id, part: HitPart::Body }) => Self::Field { id: field_id },
            Some(Hit { field_id, part: HitPart::Handle(corner) }) => Self::Handle { id: field_id, corner },
            Some(Hit { field_id, part: HitPart::Control(control) }) => Self::Control { id: field_id, control },
        }
    }

    /// The field this target belongs to, if any.
    #[must_use]
    pub fn field_id(&self) -> Option<&FieldId> {
        match self {
            Self::Overlay { .. } => None,
            Self::Field { id } | Self::Handle { id, .. } | Self::Control { id, .. } => Some(id),
        }
    }
}

/// A unified mouse/touch pointer event.
///
/// `position` is in CSS pixels relative to the page overlay, and `container`
/// is that overlay's size at the moment of the event (it changes with zoom).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub phase: PointerPhase,
    #[serde(default)]
    pub source: PointerSource,
    pub position: Point,
    pub container: Size,
    /// What is under the pointer; `None` when outside every overlay.
    #[serde(default)]
    pub target: Option<PointerTarget>,
}

/// A palette item dropped onto a page overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropInput {
    pub page: u32,
    pub position: Point,
    pub container: Size,
    /// Field type carried by the drag payload.
    pub payload: String,
}

/// Which gesture creates new fields on empty overlay area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationMode {
    /// Press and drag on empty overlay to draw a field.
    #[default]
    Freehand,
    /// Drop palette items onto the page.
    DragAndDrop,
}

/// Mouse cursor the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Grab,
    Grabbing,
    Crosshair,
    Resize(Corner),
}

impl Cursor {
    /// CSS `cursor` value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
            Self::Crosshair => "crosshair",
            Self::Resize(corner) => corner.css_cursor(),
        }
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// How empty overlay area creates fields.
    pub mode: CreationMode,
    /// Field type created by a freehand draw.
    pub draw_type: FieldType,
    /// Read-only preview presentation.
    pub preview: bool,
    /// Status of the document being signed.
    pub document_status: DocumentStatus,
    /// Field currently under a mouse pointer.
    pub hovered: Option<FieldId>,
    /// A palette drag is over the overlay.
    pub drop_zone_active: bool,
}

impl UiState {
    /// Whether all interaction is disabled.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.preview || self.document_status.is_terminal()
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries the gesture's anchor: the pointer's start
/// position and the field's committed geometry when the gesture began.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving a field.
    Dragging {
        /// Id of the field being dragged.
        id: FieldId,
        /// Pointer position at pointer-down, in overlay pixels.
        start: Point,
        /// Committed geometry at pointer-down.
        orig: Rect,
        /// Travel crossed the drag threshold at some point.
        moved: bool,
        /// Device that started the drag; a touch that never moves is a tap.
        source: PointerSource,
    },
    /// The user is resizing a field by one of its corner handles.
    Resizing {
        /// Id of the field being resized.
        id: FieldId,
        /// Which corner handle is being dragged.
        corner: Corner,
        /// Pointer position at pointer-down, in overlay pixels.
        start: Point,
        /// Committed geometry at pointer-down.
        orig: Rect,
    },
    /// The user is drawing a new field on empty overlay area.
    Drawing {
        /// Page being drawn on.
        page: u32,
        /// Pixel point where the draw started.
        anchor: Point,
        /// Latest pointer position, clamped to the container.
        current: Point,
        /// Container size at the latest event.
        container: Size,
        /// Type of the field that will be created.
        field_type: FieldType,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Id of the field the active drag/resize targets.
    #[must_use]
    pub fn target_id(&self) -> Option<&FieldId> {
        match self {
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(id),
            Self::Idle | Self::Drawing { .. } => None,
        }
    }
}
