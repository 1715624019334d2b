use std::collections::{HashMap, HashSet};

use crate::consts::{DRAG_THRESHOLD_PX, MIN_DRAW_PX};
use crate::doc::{DocumentStatus, Field, FieldSet, FieldType, NewField};
use crate::geometry::{Point, Rect, Size, clamp_drag, drop_rect, pixel_delta_to_fraction, rect_from_drag, resize_from_corner};
use crate::hit::{Control, available_controls, hit_test};
use crate::identity::FieldId;
use crate::input::{
    CreationMode, Cursor, DropInput, InputState, PointerInput, PointerPhase, PointerSource, PointerTarget, UiState,
};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A gesture produced a new field; the host creates it.
    CreateField(NewField),
    /// A persisted field was dragged to a new origin.
    MoveField { id: FieldId, x: f64, y: f64 },
    /// A persisted field was resized; position is re-sent since some corners move it.
    ResizeField { id: FieldId, rect: Rect },
    /// The user asked to sign a field (sign button or touch tap).
    SignRequested { id: FieldId },
    /// The user asked to delete a field.
    DeleteRequested { id: FieldId },
    SetCursor(Cursor),
    RenderNeeded,
}

/// Uncommitted geometry for fields under an active gesture.
///
/// Every change bumps `revision`, so a view layer can observe the map
/// directly instead of pairing it with a separate re-render counter.
#[derive(Debug, Clone, Default)]
pub struct LiveOverrides {
    map: HashMap<FieldId, Rect>,
    revision: u64,
}

impl LiveOverrides {
    #[must_use]
    pub fn get(&self, id: &FieldId) -> Option<Rect> {
        self.map.get(id).copied()
    }

    pub fn set(&mut self, id: FieldId, rect: Rect) {
        self.map.insert(id, rect);
        self.revision += 1;
    }

    pub fn remove(&mut self, id: &FieldId) -> Option<Rect> {
        let removed = self.map.remove(id);
        if removed.is_some() {
            self.revision += 1;
        }
        removed
    }

    pub fn clear(&mut self) {
        if !self.map.is_empty() {
            self.map.clear();
            self.revision += 1;
        }
    }

    /// Geometry to draw for `field`: the live override if present, else its committed rect.
    #[must_use]
    pub fn display_rect(&self, field: &Field) -> Rect {
        self.get(&field.id).unwrap_or(field.rect)
    }

    /// Counter incremented on every change to the map.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Core engine state: the field store plus the single interaction controller
/// shared by every page overlay.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub doc: FieldSet,
    pub ui: UiState,
    pub input: InputState,
    pub overrides: LiveOverrides,
    failed_assets: HashSet<String>,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Replace every field with an authoritative snapshot.
    ///
    /// Live overrides are dropped so none outlives the state it was derived from.
    pub fn load_snapshot(&mut self, fields: Vec<Field>) {
        self.doc.replace_all(fields);
        self.overrides.clear();
        if let Some(id) = self.input.target_id() {
            if !self.doc.contains(id) {
                self.input = InputState::Idle;
            }
        }
        if self.ui.hovered.as_ref().is_some_and(|id| !self.doc.contains(id)) {
            self.ui.hovered = None;
        }
    }

    /// Insert a field, or replace the one with the same id.
    pub fn apply_create(&mut self, field: Field) {
        self.doc.insert(field);
    }

    /// Overwrite a field's committed geometry.
    pub fn apply_update(&mut self, id: &FieldId, rect: Rect) -> bool {
        self.doc.patch_rect(id, rect)
    }

    /// Remove a field and forget any gesture, hover, or override that refers to it.
    pub fn apply_delete(&mut self, id: &FieldId) -> Option<Field> {
        self.overrides.remove(id);
        if self.input.target_id() == Some(id) {
            self.input = InputState::Idle;
        }
        if self.ui.hovered.as_ref() == Some(id) {
            self.ui.hovered = None;
        }
        self.doc.remove(id)
    }

    // --- Mode / status ---

    pub fn set_mode(&mut self, mode: CreationMode) {
        self.ui.mode = mode;
        if matches!(self.input, InputState::Drawing { .. }) && mode != CreationMode::Freehand {
            self.input = InputState::Idle;
        }
        self.ui.drop_zone_active = false;
    }

    pub fn set_draw_type(&mut self, field_type: FieldType) {
        self.ui.draw_type = field_type;
    }

    pub fn set_preview(&mut self, preview: bool) {
        self.ui.preview = preview;
        self.cancel_if_read_only();
    }

    pub fn set_document_status(&mut self, status: DocumentStatus) {
        self.ui.document_status = status;
        self.cancel_if_read_only();
    }

    /// Remember that an asset URL failed to load so its image area is hidden.
    pub fn mark_asset_failed(&mut self, url: impl Into<String>) {
        self.failed_assets.insert(url.into());
    }

    // --- Queries ---

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.ui.is_read_only()
    }

    /// Read-only view of the active gesture.
    #[must_use]
    pub fn gesture(&self) -> &InputState {
        &self.input
    }

    /// Id of the field under an active drag or resize.
    #[must_use]
    pub fn active_field(&self) -> Option<&FieldId> {
        self.input.target_id()
    }

    #[must_use]
    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.doc.get(id)
    }

    /// Resolve what sits under pixel `position` on `page`, for hosts that
    /// only know coordinates. The hovered field's controls are tested first.
    #[must_use]
    pub fn target_at(&self, page: u32, position: Point, container: Size) -> PointerTarget {
        let hit = hit_test(position, page, container, &self.doc, &self.overrides, self.ui.hovered.as_ref());
        PointerTarget::from_hit(page, hit)
    }

    /// Geometry to draw for the field with `id`.
    #[must_use]
    pub fn display_rect(&self, id: &FieldId) -> Option<Rect> {
        self.doc.get(id).map(|f| self.overrides.display_rect(f))
    }

    #[must_use]
    pub fn is_asset_failed(&self, url: &str) -> bool {
        self.failed_assets.contains(url)
    }

    // --- Input events ---

    /// Feed one unified mouse/touch event through the gesture state machine.
    pub fn on_pointer(&mut self, event: &PointerInput) -> Vec<Action> {
        match event.phase {
            PointerPhase::Start => self.pointer_start(event),
            PointerPhase::Move => self.pointer_move(event),
            PointerPhase::End => self.pointer_end(),
            PointerPhase::Leave => {
                let was_hovering = self.ui.hovered.take().is_some();
                let mut actions = self.pointer_end();
                if was_hovering && actions.is_empty() {
                    actions = vec![Action::SetCursor(Cursor::Default), Action::RenderNeeded];
                }
                actions
            }
        }
    }

    /// A palette item was dropped onto a page overlay.
    ///
    /// Only active in drag-and-drop mode; unknown payloads are ignored.
    pub fn on_drop(&mut self, drop: &DropInput) -> Vec<Action> {
        self.ui.drop_zone_active = false;
        if self.is_read_only() || self.ui.mode != CreationMode::DragAndDrop || !drop.container.is_usable() {
            return vec![Action::RenderNeeded];
        }
        let Some(field_type) = FieldType::parse(&drop.payload) else {
            return vec![Action::RenderNeeded];
        };
        let at = Point::new(drop.position.x / drop.container.width, drop.position.y / drop.container.height);
        let rect = drop_rect(at, field_type);
        vec![
            Action::CreateField(NewField { page_number: drop.page, rect, field_type }),
            Action::RenderNeeded,
        ]
    }

    /// A palette drag entered (`true`) or left (`false`) a page overlay.
    pub fn on_drag_over(&mut self, active: bool) -> Vec<Action> {
        let active = active && !self.is_read_only() && self.ui.mode == CreationMode::DragAndDrop;
        if self.ui.drop_zone_active == active {
            return Vec::new();
        }
        self.ui.drop_zone_active = active;
        vec![Action::RenderNeeded]
    }

    // --- Pointer phases ---

    fn pointer_start(&mut self, event: &PointerInput) -> Vec<Action> {
        if self.is_read_only() || !self.input.is_idle() {
            return Vec::new();
        }
        let Some(target) = event.target.clone() else {
            return Vec::new();
        };

        match target {
            PointerTarget::Control { id, control } => self.control_pressed(id, control),
            PointerTarget::Handle { id, corner } => {
                let Some(field) = self.doc.get(&id) else {
                    return Vec::new();
                };
                if field.is_provisional() {
                    return Vec::new();
                }
                let orig = field.rect;
                self.input = InputState::Resizing { id, corner, start: event.position, orig };
                vec![Action::SetCursor(Cursor::Resize(corner)), Action::RenderNeeded]
            }
            PointerTarget::Field { id } => {
                let Some(field) = self.doc.get(&id) else {
                    return Vec::new();
                };
                let orig = field.rect;
                self.input = InputState::Dragging { id, start: event.position, orig, moved: false, source: event.source };
                vec![Action::SetCursor(Cursor::Grabbing), Action::RenderNeeded]
            }
            PointerTarget::Overlay { page } => {
                if self.ui.mode != CreationMode::Freehand || !event.container.is_usable() {
                    return Vec::new();
                }
                let anchor = event.position.clamp_to(event.container);
                self.input = InputState::Drawing {
                    page,
                    anchor,
                    current: anchor,
                    container: event.container,
                    field_type: self.ui.draw_type,
                };
                vec![Action::SetCursor(Cursor::Crosshair), Action::RenderNeeded]
            }
        }
    }

    fn control_pressed(&self, id: FieldId, control: Control) -> Vec<Action> {
        let Some(field) = self.doc.get(&id) else {
            return Vec::new();
        };
        if !available_controls(field).contains(&control) {
            return Vec::new();
        }
        match control {
            Control::Sign => vec![Action::SignRequested { id }],
            Control::Delete => vec![Action::DeleteRequested { id }],
        }
    }

    fn pointer_move(&mut self, event: &PointerInput) -> Vec<Action> {
        if self.input.is_idle() {
            return self.update_hover(event);
        }
        let position = event.position;
        let container = event.container;

        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Dragging { id, start, orig, moved, .. } => {
                let dx_px = position.x - start.x;
                let dy_px = position.y - start.y;
                if dx_px.abs() > DRAG_THRESHOLD_PX || dy_px.abs() > DRAG_THRESHOLD_PX {
                    *moved = true;
                }
                let id = id.clone();
                let orig = *orig;
                let Some(size) = self.doc.get(&id).map(|f| (f.rect.width, f.rect.height)) else {
                    self.input = InputState::Idle;
                    return vec![Action::SetCursor(Cursor::Default)];
                };
                let x = orig.x + pixel_delta_to_fraction(dx_px, container.width);
                let y = orig.y + pixel_delta_to_fraction(dy_px, container.height);
                let origin = clamp_drag(x, y, size.0, size.1);
                self.overrides.set(id, Rect::new(origin.x, origin.y, size.0, size.1));
                vec![Action::RenderNeeded]
            }
            InputState::Resizing { id, corner, start, orig } => {
                let dx = pixel_delta_to_fraction(position.x - start.x, container.width);
                let dy = pixel_delta_to_fraction(position.y - start.y, container.height);
                let rect = resize_from_corner(*orig, *corner, dx, dy);
                let id = id.clone();
                if !self.doc.contains(&id) {
                    self.input = InputState::Idle;
                    return vec![Action::SetCursor(Cursor::Default)];
                }
                self.overrides.set(id, rect);
                vec![Action::RenderNeeded]
            }
            InputState::Drawing { current, container: drawn_in, .. } => {
                if container.is_usable() {
                    *drawn_in = container;
                }
                *current = position.clamp_to(*drawn_in);
                vec![Action::RenderNeeded]
            }
        }
    }

    fn update_hover(&mut self, event: &PointerInput) -> Vec<Action> {
        if event.source == PointerSource::Touch || self.is_read_only() {
            return Vec::new();
        }
        let hovered = event.target.as_ref().and_then(PointerTarget::field_id).cloned();
        if hovered == self.ui.hovered {
            return Vec::new();
        }
        let cursor = match (&hovered, &event.target) {
            (_, Some(PointerTarget::Handle { corner, .. })) => Cursor::Resize(*corner),
            (Some(_), _) => Cursor::Grab,
            _ => Cursor::Default,
        };
        self.ui.hovered = hovered;
        vec![Action::SetCursor(cursor), Action::RenderNeeded]
    }

    /// Finish the active gesture. The release position is not applied: the
    /// last move already placed the live override.
    fn pointer_end(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        match std::mem::take(&mut self.input) {
            InputState::Idle => return actions,
            InputState::Dragging { id, moved, source, .. } => {
                let live = self.overrides.remove(&id);
                match self.doc.get(&id) {
                    Some(field) if moved => {
                        if let Some(rect) = live {
                            if field.is_provisional() {
                                // Not persisted yet: the move only lives locally.
                                self.doc.patch_rect(&id, rect);
                            } else {
                                actions.push(Action::MoveField { id, x: rect.x, y: rect.y });
                            }
                        }
                    }
                    Some(field) if source == PointerSource::Touch && !field.is_provisional() && !field.is_signed() => {
                        actions.push(Action::SignRequested { id });
                    }
                    _ => {}
                }
            }
            InputState::Resizing { id, .. } => {
                let live = self.overrides.remove(&id);
                if let (Some(rect), Some(field)) = (live, self.doc.get(&id)) {
                    if !field.is_provisional() {
                        actions.push(Action::ResizeField { id, rect });
                    }
                }
            }
            InputState::Drawing { page, anchor, current, container, field_type } => {
                let pixels = rect_from_drag(anchor, current);
                if pixels.width > MIN_DRAW_PX && pixels.height > MIN_DRAW_PX {
                    if let Some(rect) = pixels.to_fraction(container) {
                        actions.push(Action::CreateField(NewField { page_number: page, rect: rect.bounded(), field_type }));
                    }
                }
            }
        }
        let cursor = if self.ui.hovered.is_some() { Cursor::Grab } else { Cursor::Default };
        actions.push(Action::SetCursor(cursor));
        actions.push(Action::RenderNeeded);
        actions
    }

    fn cancel_if_read_only(&mut self) {
        if self.is_read_only() {
            if let Some(id) = self.input.target_id().cloned() {
                self.overrides.remove(&id);
            }
            self.input = InputState::Idle;
            self.ui.hovered = None;
            self.ui.drop_zone_active = false;
        }
    }
}
