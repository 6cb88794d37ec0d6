//! # kinema-scene
//!
//! The Kinema scene graph — the collection of timeline objects and their
//! nested animations, kept sorted by start frame under arbitrary mutation,
//! plus the per-frame playback resolver that decides what is active and
//! with what interpolation progress.

pub mod animation;
pub mod object;
pub mod playback;
pub mod registry;

pub use animation::{Animation, AnimationKind};
pub use object::{LaTexPayload, Object, ObjectKind, TextPayload};
pub use playback::{advance_frame, Renderer};
pub use registry::SceneRegistry;
