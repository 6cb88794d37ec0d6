//! # kinema-codec
//!
//! The versioned binary container for Kinema documents. The container is
//! length-framed, little-endian throughout, and bracketed by magic
//! sentinels for corruption detection:
//!
//! ```text
//! MAGIC (u32)  VERSION (u32)  object_count (u32)  object_count × ObjectRecord
//! ```
//!
//! Each `ObjectRecord` carries the object's header fields, a kind-specific
//! payload whose length is determined by the kind tag, the object's nested
//! animation records, and a trailing `MAGIC` sentinel that is re-checked on
//! every read. Registry order is written verbatim, so a reload needs no
//! resort.
//!
//! Decoding dispatches through a version → decoder table; old decoders are
//! frozen and new container versions are added as new entries.

pub mod bytes;
pub mod container;

pub use bytes::{ByteReader, ByteWriter};
pub use container::{decode, encode, load, save, CURRENT_VERSION, MAGIC};
