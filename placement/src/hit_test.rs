#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{FieldStatus, FieldType, RenderedContent};
use crate::geometry::Rect;

const CONTAINER: Size = Size { width: 1000.0, height: 800.0 };

fn field(id: i64, page: u32, rect: Rect) -> Field {
    Field {
        id: FieldId::Persisted(id),
        page_number: page,
        rect,
        field_type: FieldType::Signature,
        status: FieldStatus::Pending,
        signer_name: None,
        signer_email: None,
        content: None,
    }
}

/// One field at pixels (100,100)-(400,180) on page 1.
fn single() -> FieldSet {
    let mut set = FieldSet::new();
    set.insert(field(1, 1, Rect::new(0.1, 0.125, 0.3, 0.1)));
    set
}

// =============================================================
// Handle and control geometry
// =============================================================

#[test]
fn handles_sit_inside_corners() {
    let bounds = PixelRect { x: 100.0, y: 100.0, width: 300.0, height: 80.0 };
    assert_eq!(handle_rect(bounds, Corner::Nw), PixelRect { x: 103.0, y: 103.0, width: 8.0, height: 8.0 });
    assert_eq!(handle_rect(bounds, Corner::Se), PixelRect { x: 389.0, y: 169.0, width: 8.0, height: 8.0 });
    assert_eq!(handle_rect(bounds, Corner::Ne).x, 389.0);
    assert_eq!(handle_rect(bounds, Corner::Sw).y, 169.0);
}

#[test]
fn delete_button_overhangs_top_right() {
    let bounds = PixelRect { x: 100.0, y: 100.0, width: 300.0, height: 80.0 };
    let r = control_rect(bounds, Control::Delete);
    assert_eq!(r.width, 20.0);
    assert!(r.x + r.width > 400.0);
    assert!(r.y < 100.0);
}

#[test]
fn sign_button_centered_above() {
    let bounds = PixelRect { x: 100.0, y: 100.0, width: 300.0, height: 80.0 };
    let r = control_rect(bounds, Control::Sign);
    assert_eq!(r.x + r.width / 2.0, 250.0);
    assert_eq!(r.y + r.height, 96.0);
}

#[test]
fn corner_cursors() {
    assert_eq!(Corner::Nw.css_cursor(), "nw-resize");
    assert_eq!(Corner::Se.css_cursor(), "se-resize");
}

// =============================================================
// available_controls
// =============================================================

#[test]
fn pending_field_offers_sign_and_delete() {
    let f = field(1, 1, Rect::new(0.1, 0.1, 0.2, 0.1));
    assert_eq!(available_controls(&f), &[Control::Sign, Control::Delete]);
}

#[test]
fn signed_field_offers_delete_only() {
    let mut f = field(1, 1, Rect::new(0.1, 0.1, 0.2, 0.1));
    f.status = FieldStatus::Signed;
    f.content = Some(RenderedContent::Text { text: "A".into(), font: "cursive".into() });
    assert_eq!(available_controls(&f), &[Control::Delete]);
}

#[test]
fn provisional_field_offers_nothing() {
    let mut f = field(1, 1, Rect::new(0.1, 0.1, 0.2, 0.1));
    f.id = FieldId::new_provisional();
    assert!(available_controls(&f).is_empty());
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn empty_area_is_none() {
    let doc = single();
    let hit = hit_test(Point::new(600.0, 600.0), 1, CONTAINER, &doc, &LiveOverrides::default(), None);
    assert_eq!(hit, None);
}

#[test]
fn body_hit() {
    let doc = single();
    let hit = hit_test(Point::new(250.0, 140.0), 1, CONTAINER, &doc, &LiveOverrides::default(), None).unwrap();
    assert_eq!(hit.field_id, FieldId::Persisted(1));
    assert_eq!(hit.part, HitPart::Body);
}

#[test]
fn other_page_is_not_hit() {
    let doc = single();
    let hit = hit_test(Point::new(250.0, 140.0), 2, CONTAINER, &doc, &LiveOverrides::default(), None);
    assert_eq!(hit, None);
}

#[test]
fn handles_only_for_hovered_field() {
    let doc = single();
    let id = FieldId::Persisted(1);
    let corner = Point::new(393.0, 173.0);
    let plain = hit_test(corner, 1, CONTAINER, &doc, &LiveOverrides::default(), None).unwrap();
    assert_eq!(plain.part, HitPart::Body);
    let hovered = hit_test(corner, 1, CONTAINER, &doc, &LiveOverrides::default(), Some(&id)).unwrap();
    assert_eq!(hovered.part, HitPart::Handle(Corner::Se));
}

#[test]
fn sign_control_hit_above_field() {
    let doc = single();
    let id = FieldId::Persisted(1);
    let hit = hit_test(Point::new(250.0, 85.0), 1, CONTAINER, &doc, &LiveOverrides::default(), Some(&id)).unwrap();
    assert_eq!(hit.part, HitPart::Control(Control::Sign));
}

#[test]
fn topmost_body_wins() {
    let mut doc = single();
    doc.insert(field(2, 1, Rect::new(0.2, 0.125, 0.3, 0.1)));
    let hit = hit_test(Point::new(300.0, 140.0), 1, CONTAINER, &doc, &LiveOverrides::default(), None).unwrap();
    assert_eq!(hit.field_id, FieldId::Persisted(2));
}

#[test]
fn live_override_moves_hit_area() {
    let doc = single();
    let mut overrides = LiveOverrides::default();
    overrides.set(FieldId::Persisted(1), Rect::new(0.5, 0.5, 0.3, 0.1));
    assert_eq!(hit_test(Point::new(250.0, 140.0), 1, CONTAINER, &doc, &overrides, None), None);
    let hit = hit_test(Point::new(600.0, 420.0), 1, CONTAINER, &doc, &overrides, None).unwrap();
    assert_eq!(hit.field_id, FieldId::Persisted(1));
}
