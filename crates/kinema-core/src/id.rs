use serde::{Deserialize, Serialize};

/// Unique identifier for an object on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub i32);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// Unique identifier for an animation attached to an object.
///
/// Animation ids share no namespace with [`ObjectId`]s; the two are distinct
/// types so they cannot be mixed up at a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub i32);

impl std::fmt::Display for AnimationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "animation#{}", self.0)
    }
}

/// Monotonic id allocator for one document.
///
/// Holds two independent counters, one per entity kind. Ids are never
/// reused, even after the entity they were stamped on is removed. After a
/// document is loaded from disk the counters are advanced past every id
/// observed, so freshly created entities never collide with restored ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UidAllocator {
    next_object: i32,
    next_animation: i32,
}

impl UidAllocator {
    /// Create an allocator with both counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next object id.
    pub fn next_object(&mut self) -> ObjectId {
        let id = ObjectId(self.next_object);
        self.next_object += 1;
        id
    }

    /// Allocate the next animation id.
    pub fn next_animation(&mut self) -> AnimationId {
        let id = AnimationId(self.next_animation);
        self.next_animation += 1;
        id
    }

    /// Advance the object counter past an id observed in persisted data.
    pub fn advance_object(&mut self, seen: i32) {
        self.next_object = self.next_object.max(seen + 1);
    }

    /// Advance the animation counter past an id observed in persisted data.
    pub fn advance_animation(&mut self, seen: i32) {
        self.next_animation = self.next_animation.max(seen + 1);
    }

    /// Reset both counters to zero (new-document lifecycle).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
