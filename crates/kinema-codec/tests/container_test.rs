//! End-to-end container tests: round-trips, corruption detection, and
//! UID continuity across a save/load cycle.

use kinema_codec::{decode, encode, load, save, MAGIC};
use kinema_core::{KinemaError, Vec2};
use kinema_scene::{AnimationKind, LaTexPayload, ObjectKind, SceneRegistry, TextPayload};

fn sample_registry() -> SceneRegistry {
    let mut registry = SceneRegistry::new();

    let title = registry.spawn_object(
        ObjectKind::Text(TextPayload {
            text: "Pythagoras".into(),
            font_size: 48.0,
        }),
        0,
        300,
    );
    registry.object_mut(title).unwrap().position = Vec2::new(120.0, 40.0);
    registry.set_object_track(title, 0);
    registry
        .spawn_animation(title, AnimationKind::WriteIn, 0, 45)
        .unwrap();
    registry
        .spawn_animation(title, AnimationKind::FadeIn, 60, 30)
        .unwrap();

    let formula = registry.spawn_object(
        ObjectKind::LaTex(LaTexPayload {
            source: r"a^2 + b^2 = c^2".into(),
        }),
        90,
        200,
    );
    registry.set_object_track(formula, 1);
    registry
        .spawn_animation(formula, AnimationKind::WriteIn, 10, 80)
        .unwrap();

    registry
}

#[test]
fn round_trip_preserves_everything() {
    let registry = sample_registry();
    let back = decode(&encode(&registry)).unwrap();
    // Same ids, fields, order, and nested animations.
    assert_eq!(back.objects(), registry.objects());
}

#[test]
fn round_trip_preserves_registry_order_verbatim() {
    let registry = sample_registry();
    let back = decode(&encode(&registry)).unwrap();
    let starts: Vec<i32> = back.objects().iter().map(|o| o.frame_start).collect();
    // Descending order straight off the wire, no resort.
    assert_eq!(starts, vec![90, 0]);
}

#[test]
fn uid_counters_advance_past_loaded_ids() {
    let registry = sample_registry();
    let max_object = registry.objects().iter().map(|o| o.id.0).max().unwrap();
    let max_animation = registry
        .objects()
        .iter()
        .flat_map(|o| &o.animations)
        .map(|a| a.id.0)
        .max()
        .unwrap();

    let mut back = decode(&encode(&registry)).unwrap();
    let new_object = back.spawn_object(ObjectKind::LaTex(LaTexPayload::default()), 0, 10);
    assert!(new_object.0 > max_object);
    let new_animation = back
        .spawn_animation(new_object, AnimationKind::FadeIn, 0, 10)
        .unwrap();
    assert!(new_animation.0 > max_animation);
}

#[test]
fn flipping_any_trailing_sentinel_byte_fails_the_load() {
    let mut registry = SceneRegistry::new();
    registry.spawn_object(
        ObjectKind::Text(TextPayload {
            text: "x".into(),
            font_size: 16.0,
        }),
        5,
        20,
    );
    let bytes = encode(&registry);

    // The trailing per-object sentinel is the last 4 bytes of the container.
    let sentinel = bytes.len() - 4;
    assert_eq!(
        u32::from_le_bytes(bytes[sentinel..].try_into().unwrap()),
        MAGIC
    );
    for offset in sentinel..bytes.len() {
        let mut corrupted = bytes.clone();
        corrupted[offset] ^= 0xFF;
        let err = decode(&corrupted).unwrap_err();
        assert!(
            matches!(err, KinemaError::BadMagic { .. }),
            "byte {offset} flipped"
        );
    }
}

#[test]
fn corruption_in_first_record_never_yields_later_records() {
    let registry = sample_registry();
    let mut bytes = encode(&registry);
    // Smash the first object's kind tag (right after MAGIC + VERSION + count).
    bytes[12..16].copy_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
    assert!(decode(&bytes).is_err());
}

#[test]
fn save_and_load_through_a_file() {
    let registry = sample_registry();
    let path = std::env::temp_dir().join(format!("kinema-{}.kin", uuid::Uuid::new_v4()));

    save(&registry, &path).unwrap();
    let back = load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(back.objects(), registry.objects());
}

#[test]
fn loading_a_missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join(format!("kinema-{}.kin", uuid::Uuid::new_v4()));
    assert!(matches!(load(&path).unwrap_err(), KinemaError::Io(_)));
}

#[test]
fn empty_objects_round_trip_with_back_references_intact() {
    let mut registry = SceneRegistry::new();
    let a = registry.spawn_object(ObjectKind::LaTex(LaTexPayload::default()), 40, 10);
    let b = registry.spawn_object(ObjectKind::Text(TextPayload::default()), 10, 10);
    registry
        .spawn_animation(b, AnimationKind::WriteIn, 0, 5)
        .unwrap();

    let back = decode(&encode(&registry)).unwrap();
    assert_eq!(back.len(), 2);
    assert!(back.object(a).unwrap().animations.is_empty());
    let restored = &back.object(b).unwrap().animations[0];
    assert_eq!(restored.object_id, b);
    // Invariant 2 holds for every restored animation.
    for object in back.objects() {
        for animation in &object.animations {
            assert_eq!(animation.object_id, object.id);
        }
    }
}
