use serde::{Deserialize, Serialize};

use crate::animation::Animation;
use kinema_core::{AnimationId, ObjectId, Vec2};

/// Payload for a plain text object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPayload {
    pub text: String,
    pub font_size: f32,
}

impl Default for TextPayload {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 32.0,
        }
    }
}

/// Payload for a LaTeX math expression object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaTexPayload {
    /// The raw LaTeX source to be typeset by the renderer.
    pub source: String,
}

/// What an object is — a closed set of kinds, each carrying its own payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectKind {
    Text(TextPayload),
    LaTex(LaTexPayload),
}

impl ObjectKind {
    /// Human-readable editor name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Text(_) => "Text Object",
            ObjectKind::LaTex(_) => "LaTex Object",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One animatable entity on the timeline.
///
/// An object exclusively owns its animations; each animation's start frame
/// is relative to the object's own `frame_start`. The `animations` sequence
/// is kept sorted descending by start frame — mutate it only through
/// [`crate::registry::SceneRegistry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub position: Vec2,
    /// First frame of the object's lifespan.
    pub frame_start: i32,
    /// Lifespan length in frames; the window is closed on both ends.
    pub duration: i32,
    /// Timeline lane for editor display. No effect on timing.
    pub track: i32,
    pub animations: Vec<Animation>,
    /// Recomputed every playback frame; never persisted.
    #[serde(skip)]
    pub is_animating: bool,
}

impl Object {
    /// Create an object with default position and track, no animations.
    pub(crate) fn new(id: ObjectId, kind: ObjectKind, frame_start: i32, duration: i32) -> Self {
        Self {
            id,
            kind,
            position: Vec2::zero(),
            frame_start,
            duration,
            track: 0,
            animations: Vec::new(),
            is_animating: false,
        }
    }

    /// Whether the object's own lifespan window contains `frame`.
    /// The window is closed-closed: active at both `frame_start` and
    /// `frame_start + duration`.
    pub fn window_contains(&self, frame: i32) -> bool {
        self.frame_start <= frame && frame <= self.frame_start + self.duration
    }

    /// Look up an owned animation by id.
    pub fn animation(&self, id: AnimationId) -> Option<&Animation> {
        self.animations.iter().find(|a| a.id == id)
    }
}
