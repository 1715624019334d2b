//! Field placement and interaction engine for the document signing client.
//!
//! This crate builds for native targets and for WebAssembly alike: it contains
//! no browser, logging, or network code. It owns the rectangular signature "fields"
//! placed over rendered document pages: their normalized geometry, the
//! provisional-vs-persisted identity split, the pointer gesture state machine
//! that drags, resizes, and draws them, and the derivation of per-field visual
//! state. Remote persistence lives in the `signing` crate, which consumes the
//! [`engine::Action`]s emitted here.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EngineCore`]: gesture controller, live overrides, emitted actions |
//! | [`doc`] | Field records and the in-memory [`doc::FieldSet`] |
//! | [`geometry`] | Normalized rectangles, clamping, pixel/fraction conversion |
//! | [`identity`] | [`identity::FieldId`]: provisional vs. persisted ids |
//! | [`input`] | Pointer input types and the gesture state machine states |
//! | [`hit`] | Hit-testing pointer positions against fields and their controls |
//! | [`overlay`] | Per-field view models for the overlay renderer |
//! | [`consts`] | Shared numeric constants (size limits, thresholds, layers) |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod identity;
pub mod input;
pub mod overlay;
