/// Core error types for the Kinema engine.
use crate::id::{AnimationId, ObjectId};

/// A specialized Result type for Kinema operations.
pub type KinemaResult<T> = Result<T, KinemaError>;

/// Top-level error type encompassing all Kinema subsystems.
#[derive(Debug, thiserror::Error)]
pub enum KinemaError {
    #[error("bad magic number 0x{found:08x}, file must be corrupted")]
    BadMagic { found: u32 },

    #[error("unsupported container version {found}")]
    UnsupportedVersion { found: u32 },

    #[error("unknown object kind tag {tag} in container")]
    UnknownObjectKind { tag: u32 },

    #[error("unknown animation kind tag {tag} in container")]
    UnknownAnimationKind { tag: u32 },

    #[error("unexpected end of buffer: needed {needed} bytes, {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    #[error("text payload is not valid UTF-8: {0}")]
    InvalidText(#[from] std::string::FromUtf8Error),

    #[error("{0} not found in registry")]
    ObjectNotFound(ObjectId),

    #[error("{0} not found in registry")]
    AnimationNotFound(AnimationId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
