//! # kinema-core
//!
//! Core types and primitives for the Kinema animation engine.
//! This crate contains foundational types shared across all Kinema crates:
//! entity ids, the UID allocator, 2D math, and error types.

pub mod error;
pub mod id;
pub mod math;

pub use error::{KinemaError, KinemaResult};
pub use id::{AnimationId, ObjectId, UidAllocator};
pub use math::Vec2;
