//! Overlay view models: what each field on a page should look like right now.
//!
//! Nothing here is stored. Every frame the host calls [`render_page`] and
//! draws the returned [`PageView`]; visual state (hover, active, provisional,
//! signed) is derived from the engine's committed fields, live overrides, and
//! active gesture.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use std::collections::HashMap;

use crate::consts::{GHOST_VISIBLE_PX, MAX_TEXT_PX, PROVISIONAL_OPACITY, TEXT_PX_PER_HEIGHT};
use crate::doc::{Field, RenderedContent};
use crate::engine::EngineCore;
use crate::geometry::{PixelRect, Rect, rect_from_drag};
use crate::hit::{Control, available_controls};
use crate::identity::FieldId;
use crate::input::InputState;

const SAVING_LABEL: &str = "Saving…";
const MOVE_HINT: &str = "drag to move";

/// Stacking layer of an overlay element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ZLayer {
    Resting,
    Hovered,
    Ghost,
    Active,
    Controls,
}

impl ZLayer {
    /// CSS `z-index` value.
    #[must_use]
    pub fn z_index(self) -> i32 {
        match self {
            Self::Resting => 20,
            Self::Hovered => 30,
            Self::Ghost => 40,
            Self::Active => 50,
            Self::Controls => 51,
        }
    }
}

/// What fills a field's box.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentView {
    /// Pending field: type icon over a label.
    Placeholder { icon: &'static str, label: String },
    /// Signed image, loaded from `url`.
    Image { url: String },
    /// Signed text in `font` at `font_px`.
    Text { text: String, font: String, font_px: f64 },
    /// Nothing to draw (image asset failed to load, or not known yet).
    Hidden,
}

/// Contextual affordances shown for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldControls {
    pub sign_button: bool,
    pub delete_button: bool,
    pub resize_handles: bool,
    /// "drag to move" hint on a hovered signed field with no signer label.
    pub move_hint: bool,
    /// Dedicated sign affordance on touch devices.
    pub tap_to_sign: bool,
}

/// Derived visual state of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub id: FieldId,
    /// Live override if a gesture targets the field, else committed geometry.
    pub rect: Rect,
    pub provisional: bool,
    /// The field is the target of the active drag or resize.
    pub active: bool,
    pub hovered: bool,
    pub signed: bool,
    pub z: ZLayer,
    pub opacity: f64,
    pub content: ContentView,
    pub controls: FieldControls,
    /// Assigned signer label, or the move hint.
    pub tooltip: Option<String>,
    /// Whether pointer handlers are attached at all.
    pub interactive: bool,
}

/// Everything the host draws over one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub page: u32,
    pub fields: Vec<FieldView>,
    /// Freehand-draw rectangle in pixels, once wide enough to show.
    pub ghost: Option<PixelRect>,
    pub drop_zone_active: bool,
    pub read_only: bool,
}

/// Presentation inputs that do not belong to the engine.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// Base URL signed-image references are resolved against.
    pub asset_base: String,
    /// Human-readable assigned-signer label per field.
    pub signer_labels: HashMap<FieldId, String>,
    /// Name of the person signing in this session.
    pub current_signer: Option<String>,
    /// Show touch affordances instead of hover controls.
    pub touch_device: bool,
}

impl RenderContext {
    /// Resolve a stored image reference to a loadable URL.
    ///
    /// Only the last path segment is kept, whichever separator the backend used.
    #[must_use]
    pub fn asset_url(&self, stored: &str) -> String {
        let file = stored.rsplit(['/', '\\']).next().unwrap_or(stored);
        format!("{}/{file}", self.asset_base.trim_end_matches('/'))
    }

    /// Assigned-signer label: explicit map entry, then signer name, then
    /// email, then the session's current signer.
    #[must_use]
    pub fn assigned_label(&self, field: &Field) -> Option<String> {
        self.signer_labels
            .get(&field.id)
            .cloned()
            .or_else(|| field.signer_name.clone().filter(|s| !s.trim().is_empty()))
            .or_else(|| field.signer_email.clone().filter(|s| !s.trim().is_empty()))
            .or_else(|| self.current_signer.clone().filter(|s| !s.trim().is_empty()))
    }
}

/// Font size for text content in a field `height` page-fractions tall.
#[must_use]
pub fn text_font_px(height: f64) -> f64 {
    (height * TEXT_PX_PER_HEIGHT).min(MAX_TEXT_PX)
}

/// Derive the view of every field on `page`, plus the ghost rectangle.
#[must_use]
pub fn render_page(engine: &EngineCore, page: u32, ctx: &RenderContext) -> PageView {
    let read_only = engine.is_read_only();
    let gesture_active = !engine.gesture().is_idle();
    let active_id = engine.active_field();

    let fields = engine
        .doc
        .on_page(page)
        .filter(|f| !read_only || f.is_signed())
        .map(|field| {
            let active = active_id == Some(&field.id);
            let hovered = !read_only && engine.ui.hovered.as_ref() == Some(&field.id);
            field_view(engine, field, ctx, read_only, gesture_active, active, hovered)
        })
        .collect();

    let ghost = match engine.gesture() {
        InputState::Drawing { page: drawing_on, anchor, current, .. } if *drawing_on == page => {
            Some(rect_from_drag(*anchor, *current)).filter(|r| r.width > GHOST_VISIBLE_PX)
        }
        _ => None,
    };

    PageView { page, fields, ghost, drop_zone_active: engine.ui.drop_zone_active && !read_only, read_only }
}

fn field_view(
    engine: &EngineCore,
    field: &Field,
    ctx: &RenderContext,
    read_only: bool,
    gesture_active: bool,
    active: bool,
    hovered: bool,
) -> FieldView {
    let provisional = field.is_provisional();
    let signed = field.is_signed();
    let label = ctx.assigned_label(field);

    let controls = if read_only {
        FieldControls::default()
    } else {
        let offered = available_controls(field);
        let show = hovered && !gesture_active && !provisional && !ctx.touch_device;
        FieldControls {
            sign_button: show && offered.contains(&Control::Sign),
            delete_button: (show || (ctx.touch_device && !provisional && !gesture_active))
                && offered.contains(&Control::Delete),
            resize_handles: show,
            move_hint: show && signed && label.is_none(),
            tap_to_sign: ctx.touch_device && !provisional && !signed,
        }
    };

    let z = if active {
        ZLayer::Active
    } else if hovered {
        ZLayer::Hovered
    } else {
        ZLayer::Resting
    };

    let tooltip = if controls.move_hint { Some(MOVE_HINT.to_owned()) } else { label };

    FieldView {
        id: field.id.clone(),
        rect: engine.overrides.display_rect(field),
        provisional,
        active,
        hovered,
        signed,
        z,
        opacity: if provisional { PROVISIONAL_OPACITY } else { 1.0 },
        content: content_view(engine, field, ctx),
        controls,
        tooltip,
        interactive: !read_only,
    }
}

fn content_view(engine: &EngineCore, field: &Field, ctx: &RenderContext) -> ContentView {
    if field.is_provisional() {
        return ContentView::Placeholder { icon: field.field_type.icon(), label: SAVING_LABEL.to_owned() };
    }
    match (&field.content, field.is_signed()) {
        (Some(RenderedContent::Image { path }), true) => {
            let url = ctx.asset_url(path);
            if engine.is_asset_failed(&url) { ContentView::Hidden } else { ContentView::Image { url } }
        }
        (Some(RenderedContent::PendingImage), true) => ContentView::Hidden,
        (Some(RenderedContent::Text { text, font }), true) => ContentView::Text {
            text: text.clone(),
            font: font.clone(),
            font_px: text_font_px(engine.overrides.display_rect(field).height),
        },
        _ => ContentView::Placeholder {
            icon: field.field_type.icon(),
            label: field.field_type.placeholder().to_owned(),
        },
    }
}
