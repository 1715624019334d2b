#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn persisted(id: i64, page: u32, field_type: FieldType) -> Field {
    Field {
        id: FieldId::Persisted(id),
        page_number: page,
        rect: Rect::new(0.1, 0.1, 0.25, 0.08),
        field_type,
        status: FieldStatus::Pending,
        signer_name: None,
        signer_email: None,
        content: None,
    }
}

fn signed(id: i64, field_type: FieldType) -> Field {
    Field {
        status: FieldStatus::Signed,
        content: Some(RenderedContent::Text { text: "Ada".into(), font: "cursive".into() }),
        ..persisted(id, 1, field_type)
    }
}

// =============================================================
// FieldType
// =============================================================

#[test]
fn field_type_serde_lowercase() {
    for field_type in FieldType::ALL {
        let json = serde_json::to_string(&field_type).unwrap();
        assert_eq!(json, format!("\"{}\"", field_type.as_str()));
        let back: FieldType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field_type);
    }
}

#[test]
fn field_type_parse_matches_wire_names() {
    for field_type in FieldType::ALL {
        assert_eq!(FieldType::parse(field_type.as_str()), Some(field_type));
    }
    assert_eq!(FieldType::parse("stamp"), None);
}

#[test]
fn only_signature_is_required() {
    let required: Vec<FieldType> = FieldType::ALL.into_iter().filter(|t| t.is_required()).collect();
    assert_eq!(required, vec![FieldType::Signature]);
}

#[test]
fn placeholder_labels() {
    assert_eq!(FieldType::Signature.placeholder(), "Sign here");
    assert_eq!(FieldType::Initials.placeholder(), "Add initials");
    assert_eq!(FieldType::Name.placeholder(), "Full Name");
    assert_eq!(FieldType::Date.placeholder(), "Date");
    assert_eq!(FieldType::Text.placeholder(), "Text");
}

// =============================================================
// Statuses
// =============================================================

#[test]
fn document_status_terminal() {
    assert!(!DocumentStatus::Pending.is_terminal());
    assert!(DocumentStatus::Signed.is_terminal());
    assert!(DocumentStatus::Rejected.is_terminal());
}

#[test]
fn rendered_content_serde_tagged() {
    let content = RenderedContent::Image { path: "uploads/sig.png".into() };
    let value = serde_json::to_value(&content).unwrap();
    assert_eq!(value, json!({ "kind": "image", "path": "uploads/sig.png" }));
}

// =============================================================
// Field
// =============================================================

#[test]
fn provisional_field_copies_request() {
    let new = NewField { page_number: 3, rect: Rect::new(0.1, 0.2, 0.3, 0.1), field_type: FieldType::Date };
    let field = Field::provisional(&new);
    assert!(field.is_provisional());
    assert!(!field.is_signed());
    assert_eq!(field.page_number, 3);
    assert_eq!(field.rect, new.rect);
    assert_eq!(field.field_type, FieldType::Date);
    assert_eq!(field.content, None);
}

// =============================================================
// FieldSet
// =============================================================

#[test]
fn insert_appends_new_and_replaces_existing() {
    let mut set = FieldSet::new();
    set.insert(persisted(1, 1, FieldType::Signature));
    set.insert(persisted(2, 1, FieldType::Name));
    let mut moved = persisted(1, 1, FieldType::Signature);
    moved.rect = Rect::new(0.5, 0.5, 0.25, 0.08);
    set.insert(moved);

    assert_eq!(set.len(), 2);
    let ids: Vec<_> = set.iter().map(|f| f.id.clone()).collect();
    assert_eq!(ids, vec![FieldId::Persisted(1), FieldId::Persisted(2)]);
    assert_eq!(set.get(&FieldId::Persisted(1)).unwrap().rect.x, 0.5);
}

#[test]
fn remove_returns_field() {
    let mut set = FieldSet::new();
    set.insert(persisted(1, 1, FieldType::Signature));
    assert!(set.remove(&FieldId::Persisted(1)).is_some());
    assert!(set.remove(&FieldId::Persisted(1)).is_none());
    assert!(set.is_empty());
}

#[test]
fn replace_all_discards_previous_fields() {
    let mut set = FieldSet::new();
    set.insert(Field::provisional(&NewField {
        page_number: 1,
        rect: Rect::new(0.1, 0.1, 0.2, 0.1),
        field_type: FieldType::Signature,
    }));
    set.replace_all(vec![persisted(9, 1, FieldType::Signature)]);
    assert_eq!(set.len(), 1);
    assert!(set.contains(&FieldId::Persisted(9)));
}

#[test]
fn patch_rect_and_mark_signed_report_missing() {
    let mut set = FieldSet::new();
    set.insert(persisted(1, 1, FieldType::Signature));
    assert!(set.patch_rect(&FieldId::Persisted(1), Rect::new(0.2, 0.2, 0.2, 0.1)));
    assert!(!set.patch_rect(&FieldId::Persisted(2), Rect::new(0.2, 0.2, 0.2, 0.1)));

    let content = RenderedContent::Text { text: "Ada".into(), font: "cursive".into() };
    assert!(set.mark_signed(&FieldId::Persisted(1), content.clone()));
    assert!(!set.mark_signed(&FieldId::Persisted(2), content.clone()));
    let field = set.get(&FieldId::Persisted(1)).unwrap();
    assert!(field.is_signed());
    assert_eq!(field.content, Some(content));
}

#[test]
fn on_page_filters_and_keeps_order() {
    let mut set = FieldSet::new();
    set.insert(persisted(1, 1, FieldType::Signature));
    set.insert(persisted(2, 2, FieldType::Signature));
    set.insert(persisted(3, 1, FieldType::Date));
    let ids: Vec<_> = set.on_page(1).map(|f| f.id.clone()).collect();
    assert_eq!(ids, vec![FieldId::Persisted(1), FieldId::Persisted(3)]);
    assert_eq!(set.on_page(5).count(), 0);
}

#[test]
fn counts_for_finalize_gating() {
    let mut set = FieldSet::new();
    set.insert(persisted(1, 1, FieldType::Signature));
    set.insert(persisted(2, 1, FieldType::Signature));
    set.insert(persisted(3, 1, FieldType::Text));
    set.insert(signed(4, FieldType::Signature));
    set.insert(signed(5, FieldType::Initials));

    assert_eq!(set.pending_required(), 2);
    assert_eq!(set.signed_count(), 2);
}
