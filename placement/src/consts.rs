//! Shared numeric constants for the placement crate.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest field width, as a fraction of the page width.
pub const MIN_FIELD_WIDTH: f64 = 0.06;

/// Smallest field height, as a fraction of the page height.
pub const MIN_FIELD_HEIGHT: f64 = 0.03;

/// Right/bottom margin limit for resized fields, as a page fraction.
pub const MAX_FIELD_EXTENT: f64 = 0.98;

/// Fallback width for records that arrive without one.
pub const FALLBACK_FIELD_WIDTH: f64 = 0.25;

/// Fallback height for records that arrive without one.
pub const FALLBACK_FIELD_HEIGHT: f64 = 0.08;

// ── Gestures ────────────────────────────────────────────────────

/// Per-axis pointer travel in pixels a drag must exceed before it counts as a move.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;

/// Both sides of a freehand rectangle must exceed this many pixels to create a field.
pub const MIN_DRAW_PX: f64 = 20.0;

/// The ghost rectangle is only shown once wider than this many pixels.
pub const GHOST_VISIBLE_PX: f64 = 5.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Side length of a square resize handle in pixels.
pub const HANDLE_SIZE_PX: f64 = 8.0;

/// Inset of a resize handle from its field corner in pixels.
pub const HANDLE_INSET_PX: f64 = 3.0;

/// Side length of the delete button in pixels.
pub const DELETE_BUTTON_PX: f64 = 20.0;

/// Width of the sign button in pixels.
pub const SIGN_BUTTON_WIDTH_PX: f64 = 64.0;

/// Height of the sign button in pixels.
pub const SIGN_BUTTON_HEIGHT_PX: f64 = 24.0;

/// Gap between the field's top edge and the bottom of the sign button.
pub const SIGN_BUTTON_GAP_PX: f64 = 4.0;

// ── Rendering ───────────────────────────────────────────────────

/// Text content font size per unit of normalized field height.
pub const TEXT_PX_PER_HEIGHT: f64 = 800.0;

/// Upper bound on rendered text content font size.
pub const MAX_TEXT_PX: f64 = 40.0;

/// Opacity of a provisional field while it is being saved.
pub const PROVISIONAL_OPACITY: f64 = 0.6;

/// Font used for typed signatures when none is specified.
pub const DEFAULT_SIGNATURE_FONT: &str = "cursive";
