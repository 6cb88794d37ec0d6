use serde::{Deserialize, Serialize};

use kinema_core::{AnimationId, ObjectId};

/// The effect an animation applies to its parent object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationKind {
    /// Reveal the parent's text one glyph at a time.
    WriteIn,
    /// Fade the parent in from fully transparent.
    FadeIn,
}

impl AnimationKind {
    /// Human-readable editor name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            AnimationKind::WriteIn => "Write In Text",
            AnimationKind::FadeIn => "Fade In",
        }
    }
}

impl std::fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One timed effect applied to exactly one object.
///
/// `object_id` is a back-reference only — the owning object's `animations`
/// sequence holds the animation itself. `frame_start` is relative to the
/// owner's `frame_start`; the absolute activation window is resolved at
/// playback time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub id: AnimationId,
    pub object_id: ObjectId,
    pub kind: AnimationKind,
    /// Start frame relative to the owning object's start.
    pub frame_start: i32,
    pub duration: i32,
}

impl Animation {
    pub(crate) fn new(
        id: AnimationId,
        object_id: ObjectId,
        kind: AnimationKind,
        frame_start: i32,
        duration: i32,
    ) -> Self {
        Self {
            id,
            object_id,
            kind,
            frame_start,
            duration,
        }
    }

    /// Resolve this animation against the current frame, given the owning
    /// object's start frame.
    ///
    /// Returns the normalized progress in `[0, 1]` when the absolute window
    /// `[parent_start + frame_start, parent_start + frame_start + duration]`
    /// contains `frame` (both ends inclusive), `None` otherwise. A
    /// zero-duration window is instantaneous and reports progress 1.0.
    pub fn progress_at(&self, parent_start: i32, frame: i32) -> Option<f32> {
        let abs_start = parent_start + self.frame_start;
        let abs_end = abs_start + self.duration;
        if frame < abs_start || frame > abs_end {
            return None;
        }
        if self.duration == 0 {
            return Some(1.0);
        }
        Some((frame - abs_start) as f32 / self.duration as f32)
    }
}
