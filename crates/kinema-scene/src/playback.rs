//! Per-frame playback resolution.
//!
//! [`advance_frame`] is a stateless function of `(registry, frame)`: it
//! recomputes every activation from scratch on each call, so seeking or
//! scrubbing to an arbitrary frame is well-defined and idempotent. The only
//! thing it writes is each object's transient `is_animating` flag.

use crate::animation::Animation;
use crate::object::Object;
use crate::registry::SceneRegistry;

/// The render capability consumed by playback. Provided by the rendering
/// subsystem; the timeline core decides *whether* and *with what progress*
/// something is drawn, never *how*.
///
/// Both methods return whether the renderer handled the entity's kind. A
/// decline is logged and skipped — it never interrupts the sweep over the
/// rest of the scene.
pub trait Renderer {
    /// Draw one frame of `animation` applied to its parent object, with
    /// normalized `progress` in `[0, 1]`.
    fn render_animation(&mut self, object: &Object, animation: &Animation, progress: f32) -> bool;

    /// Draw the object in its static (no animation active) state.
    fn render_static(&mut self, object: &Object) -> bool;
}

/// Resolve and dispatch one frame of playback.
///
/// For every object, each owned animation whose absolute window
/// `[object.frame_start + anim.frame_start, .. + duration]` contains
/// `frame` is dispatched with its interpolation progress. If none activated
/// and the object's own lifespan window contains `frame`, a single static
/// render is dispatched instead.
pub fn advance_frame(registry: &mut SceneRegistry, frame: i32, renderer: &mut dyn Renderer) {
    for object in registry.objects_mut() {
        let mut animating = false;
        for animation in &object.animations {
            let Some(progress) = animation.progress_at(object.frame_start, frame) else {
                continue;
            };
            if !renderer.render_animation(object, animation, progress) {
                tracing::warn!(
                    "renderer declined '{}' ({}) on {}, skipping",
                    animation.kind,
                    animation.id,
                    object.id
                );
            }
            animating = true;
        }
        object.is_animating = animating;

        if !animating && object.window_contains(frame) {
            if !renderer.render_static(object) {
                tracing::warn!("renderer declined static '{}' ({}), skipping", object.kind, object.id);
            }
        }
    }
}
