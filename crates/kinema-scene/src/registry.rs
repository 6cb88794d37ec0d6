use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::animation::{Animation, AnimationKind};
use crate::object::{Object, ObjectKind};
use kinema_core::{AnimationId, KinemaError, KinemaResult, ObjectId, UidAllocator};

/// The object registry for one open document.
///
/// Owns every object on the timeline, sorted descending by `frame_start`
/// with stable ties, and the UID allocator that stamps new entities. All
/// timing mutations go through remove-then-reinsert so the order invariant
/// survives arbitrary edits. There is no hidden global state: one registry
/// value is one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneRegistry {
    /// Document identifier, regenerated for every new document.
    pub id: String,
    objects: Vec<Object>,
    uids: UidAllocator,
}

impl SceneRegistry {
    /// Create an empty registry for a fresh document.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            objects: Vec::new(),
            uids: UidAllocator::new(),
        }
    }

    /// Rebuild a registry from decoded parts. The objects must already be
    /// in registry order (the container preserves it verbatim) and the
    /// allocator advanced past every restored id.
    pub fn from_parts(objects: Vec<Object>, uids: UidAllocator) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            objects,
            uids,
        }
    }

    /// Create an object, stamp the next UID on it, and insert it in order.
    pub fn spawn_object(&mut self, kind: ObjectKind, frame_start: i32, duration: i32) -> ObjectId {
        let id = self.uids.next_object();
        self.insert(Object::new(id, kind, frame_start, duration));
        id
    }

    /// Insert an object, preserving descending `frame_start` order.
    ///
    /// Scans from the front and inserts before the first object whose
    /// `frame_start` is strictly smaller; equal starts land after the
    /// existing ones, so ties keep their relative insertion order.
    pub fn insert(&mut self, object: Object) {
        let slot = self
            .objects
            .iter()
            .position(|existing| object.frame_start > existing.frame_start);
        match slot {
            Some(index) => self.objects.insert(index, object),
            None => self.objects.push(object),
        }
    }

    /// Remove an object and every animation it owns. Returns whether the
    /// object was present.
    pub fn remove_object(&mut self, id: ObjectId) -> bool {
        match self.objects.iter().position(|o| o.id == id) {
            Some(index) => {
                self.objects.remove(index);
                true
            }
            None => false,
        }
    }

    /// Re-time an object. Returns `true` without touching anything when
    /// both fields are unchanged; otherwise removes and reinserts so the
    /// registry stays sorted. Returns `false` when the id is absent.
    pub fn set_object_time(&mut self, id: ObjectId, frame_start: i32, duration: i32) -> bool {
        let Some(index) = self.objects.iter().position(|o| o.id == id) else {
            return false;
        };
        if self.objects[index].frame_start == frame_start
            && self.objects[index].duration == duration
        {
            return true;
        }
        let mut object = self.objects.remove(index);
        object.frame_start = frame_start;
        object.duration = duration;
        self.insert(object);
        true
    }

    /// Move an object to a different timeline lane. In-place, since track
    /// has no effect on ordering. Returns whether the object was present.
    pub fn set_object_track(&mut self, id: ObjectId, track: i32) -> bool {
        match self.object_mut(id) {
            Some(object) => {
                object.track = track;
                true
            }
            None => false,
        }
    }

    /// Look up an object by id.
    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Look up an object by id, mutably. Do not edit timing fields through
    /// this — use [`SceneRegistry::set_object_time`].
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Read-only view of all objects in registry order.
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub(crate) fn objects_mut(&mut self) -> &mut [Object] {
        &mut self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Reset to a fresh document: no objects, UID counters back to zero.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.uids.reset();
        self.id = Uuid::new_v4().to_string();
    }

    // ---- per-object animation operations ----

    /// Create an animation on `object_id`, stamp the next UID, and insert
    /// it in order within the owner's sequence.
    pub fn spawn_animation(
        &mut self,
        object_id: ObjectId,
        kind: AnimationKind,
        frame_start: i32,
        duration: i32,
    ) -> KinemaResult<AnimationId> {
        if self.object(object_id).is_none() {
            return Err(KinemaError::ObjectNotFound(object_id));
        }
        let id = self.uids.next_animation();
        let animation = Animation::new(id, object_id, kind, frame_start, duration);
        self.add_animation_to(object_id, animation)?;
        Ok(id)
    }

    /// Insert an animation into `object_id`'s sequence, preserving the same
    /// descending sorted order. The animation's back-reference is rewritten
    /// to the owner so the two can never disagree.
    pub fn add_animation_to(
        &mut self,
        object_id: ObjectId,
        mut animation: Animation,
    ) -> KinemaResult<()> {
        let object = self
            .object_mut(object_id)
            .ok_or(KinemaError::ObjectNotFound(object_id))?;
        animation.object_id = object_id;
        let slot = object
            .animations
            .iter()
            .position(|existing| animation.frame_start > existing.frame_start);
        match slot {
            Some(index) => object.animations.insert(index, animation),
            None => object.animations.push(animation),
        }
        Ok(())
    }

    /// Remove one animation from its owning object. Returns whether both
    /// the object and the animation were found.
    pub fn remove_animation(&mut self, object_id: ObjectId, animation_id: AnimationId) -> bool {
        let Some(object) = self.object_mut(object_id) else {
            return false;
        };
        match object.animations.iter().position(|a| a.id == animation_id) {
            Some(index) => {
                object.animations.remove(index);
                true
            }
            None => false,
        }
    }

    /// Re-time an animation with the same contract as
    /// [`SceneRegistry::set_object_time`]: no-op `true` when unchanged,
    /// remove-then-reinsert otherwise, `false` when either id is absent.
    pub fn set_animation_time(
        &mut self,
        object_id: ObjectId,
        animation_id: AnimationId,
        frame_start: i32,
        duration: i32,
    ) -> bool {
        let Some(object) = self.object_mut(object_id) else {
            return false;
        };
        let Some(index) = object.animations.iter().position(|a| a.id == animation_id) else {
            return false;
        };
        if object.animations[index].frame_start == frame_start
            && object.animations[index].duration == duration
        {
            return true;
        }
        let mut animation = object.animations.remove(index);
        animation.frame_start = frame_start;
        animation.duration = duration;
        // Reinsert with the identical front-scan rule.
        let slot = object
            .animations
            .iter()
            .position(|existing| animation.frame_start > existing.frame_start);
        match slot {
            Some(i) => object.animations.insert(i, animation),
            None => object.animations.push(animation),
        }
        true
    }

    /// Look up one animation inside its owning object.
    pub fn animation(&self, object_id: ObjectId, animation_id: AnimationId) -> Option<&Animation> {
        self.object(object_id)?.animation(animation_id)
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new()
    }
}
