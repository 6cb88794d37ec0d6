//! Encode/decode of the document container.

use std::path::Path;

use crate::bytes::{ByteReader, ByteWriter};
use kinema_core::{AnimationId, KinemaError, KinemaResult, ObjectId, UidAllocator, Vec2};
use kinema_scene::{Animation, AnimationKind, LaTexPayload, Object, ObjectKind, SceneRegistry, TextPayload};

/// Sentinel written at the container head and after every object record.
pub const MAGIC: u32 = 0xDEAD_BEEF;

/// Newest container version this build can write and read.
pub const CURRENT_VERSION: u32 = 1;

// Kind tags on the wire. Tag 0 is reserved so an all-zero region decodes
// as corruption rather than a valid kind.
const OBJECT_TAG_TEXT: u32 = 1;
const OBJECT_TAG_LATEX: u32 = 2;
const ANIMATION_TAG_WRITE_IN: u32 = 1;
const ANIMATION_TAG_FADE_IN: u32 = 2;

/// Serialize the registry into a standalone container buffer. Objects are
/// written in registry order, so decoding needs no resort.
pub fn encode(registry: &SceneRegistry) -> Vec<u8> {
    let mut writer = ByteWriter::new();
    writer.write_u32(MAGIC);
    writer.write_u32(CURRENT_VERSION);

    writer.write_u32(registry.len() as u32);
    for object in registry.objects() {
        encode_object(&mut writer, object);
        writer.write_u32(MAGIC);
    }
    writer.into_bytes()
}

/// Decode a container buffer into a fresh registry.
///
/// Validates the leading magic and version, then hands the rest of the
/// buffer to the version's frozen decoder. Any structural problem — bad
/// sentinel, unknown kind tag, truncation — fails the whole load; a
/// registry is never partially populated.
pub fn decode(bytes: &[u8]) -> KinemaResult<SceneRegistry> {
    let mut reader = ByteReader::new(bytes);

    let magic = reader.read_u32()?;
    if magic != MAGIC {
        return Err(KinemaError::BadMagic { found: magic });
    }
    let version = reader.read_u32()?;
    let decode_version =
        decoder_for(version).ok_or(KinemaError::UnsupportedVersion { found: version })?;
    decode_version(&mut reader)
}

/// Encode the registry and write it to `path` in one pass.
pub fn save(registry: &SceneRegistry, path: impl AsRef<Path>) -> KinemaResult<()> {
    let bytes = encode(registry);
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Read the whole file into memory, then decode it. A truncated file fails
/// inside decode, before anything is handed to the caller.
pub fn load(path: impl AsRef<Path>) -> KinemaResult<SceneRegistry> {
    let bytes = std::fs::read(path.as_ref())?;
    tracing::debug!("decoding {} bytes from {}", bytes.len(), path.as_ref().display());
    decode(&bytes)
}

type VersionDecoder = fn(&mut ByteReader<'_>) -> KinemaResult<SceneRegistry>;

/// Version → decoder table. Decoders for released versions are frozen;
/// a new container version gets a new entry, never an edit to an old one.
fn decoder_for(version: u32) -> Option<VersionDecoder> {
    match version {
        1 => Some(decode_v1),
        _ => None,
    }
}

// ---- version 1, frozen ----

fn decode_v1(reader: &mut ByteReader<'_>) -> KinemaResult<SceneRegistry> {
    let mut uids = UidAllocator::new();
    let object_count = reader.read_u32()?;
    let mut objects = Vec::new();
    for _ in 0..object_count {
        let object = decode_object_v1(reader, &mut uids)?;
        let sentinel = reader.read_u32()?;
        if sentinel != MAGIC {
            return Err(KinemaError::BadMagic { found: sentinel });
        }
        objects.push(object);
    }
    Ok(SceneRegistry::from_parts(objects, uids))
}

// ObjectRecord:
//   kind_tag     -> u32
//   position.x   -> f32
//   position.y   -> f32
//   id           -> i32
//   frame_start  -> i32
//   duration     -> i32
//   track        -> i32
//   <kind-specific payload>
//   anim_count   -> u32
//   anim_count × AnimationRecord
fn encode_object(writer: &mut ByteWriter, object: &Object) {
    writer.write_u32(object_tag(&object.kind));
    writer.write_f32(object.position.x);
    writer.write_f32(object.position.y);
    writer.write_i32(object.id.0);
    writer.write_i32(object.frame_start);
    writer.write_i32(object.duration);
    writer.write_i32(object.track);
    encode_object_payload(writer, &object.kind);

    writer.write_u32(object.animations.len() as u32);
    for animation in &object.animations {
        encode_animation(writer, animation);
    }
}

fn decode_object_v1(reader: &mut ByteReader<'_>, uids: &mut UidAllocator) -> KinemaResult<Object> {
    let tag = reader.read_u32()?;
    let x = reader.read_f32()?;
    let y = reader.read_f32()?;
    let id = ObjectId(reader.read_i32()?);
    let frame_start = reader.read_i32()?;
    let duration = reader.read_i32()?;
    let track = reader.read_i32()?;
    let kind = decode_object_payload_v1(tag, reader)?;
    uids.advance_object(id.0);

    let anim_count = reader.read_u32()?;
    let mut animations = Vec::new();
    for _ in 0..anim_count {
        let animation = decode_animation_v1(reader)?;
        uids.advance_animation(animation.id.0);
        animations.push(animation);
    }

    Ok(Object {
        id,
        kind,
        position: Vec2::new(x, y),
        frame_start,
        duration,
        track,
        animations,
        is_animating: false,
    })
}

// AnimationRecord:
//   kind_tag     -> u32
//   object_id    -> i32
//   frame_start  -> i32
//   duration     -> i32
//   id           -> i32
fn encode_animation(writer: &mut ByteWriter, animation: &Animation) {
    writer.write_u32(animation_tag(animation.kind));
    writer.write_i32(animation.object_id.0);
    writer.write_i32(animation.frame_start);
    writer.write_i32(animation.duration);
    writer.write_i32(animation.id.0);
}

fn decode_animation_v1(reader: &mut ByteReader<'_>) -> KinemaResult<Animation> {
    let tag = reader.read_u32()?;
    let kind = animation_kind_for(tag)?;
    let object_id = ObjectId(reader.read_i32()?);
    let frame_start = reader.read_i32()?;
    let duration = reader.read_i32()?;
    let id = AnimationId(reader.read_i32()?);
    Ok(Animation {
        id,
        object_id,
        kind,
        frame_start,
        duration,
    })
}

fn object_tag(kind: &ObjectKind) -> u32 {
    match kind {
        ObjectKind::Text(_) => OBJECT_TAG_TEXT,
        ObjectKind::LaTex(_) => OBJECT_TAG_LATEX,
    }
}

fn encode_object_payload(writer: &mut ByteWriter, kind: &ObjectKind) {
    match kind {
        ObjectKind::Text(payload) => {
            writer.write_f32(payload.font_size);
            writer.write_string(&payload.text);
        }
        ObjectKind::LaTex(payload) => {
            writer.write_string(&payload.source);
        }
    }
}

/// The payload length depends on the tag, so an unknown tag cannot be
/// skipped — it fails the load.
fn decode_object_payload_v1(tag: u32, reader: &mut ByteReader<'_>) -> KinemaResult<ObjectKind> {
    match tag {
        OBJECT_TAG_TEXT => {
            let font_size = reader.read_f32()?;
            let text = reader.read_string()?;
            Ok(ObjectKind::Text(TextPayload { text, font_size }))
        }
        OBJECT_TAG_LATEX => {
            let source = reader.read_string()?;
            Ok(ObjectKind::LaTex(LaTexPayload { source }))
        }
        _ => Err(KinemaError::UnknownObjectKind { tag }),
    }
}

fn animation_tag(kind: AnimationKind) -> u32 {
    match kind {
        AnimationKind::WriteIn => ANIMATION_TAG_WRITE_IN,
        AnimationKind::FadeIn => ANIMATION_TAG_FADE_IN,
    }
}

fn animation_kind_for(tag: u32) -> KinemaResult<AnimationKind> {
    match tag {
        ANIMATION_TAG_WRITE_IN => Ok(AnimationKind::WriteIn),
        ANIMATION_TAG_FADE_IN => Ok(AnimationKind::FadeIn),
        _ => Err(KinemaError::UnknownAnimationKind { tag }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_round_trip() {
        let registry = SceneRegistry::new();
        let bytes = encode(&registry);
        // MAGIC + VERSION + count
        assert_eq!(bytes.len(), 12);
        let back = decode(&bytes).unwrap();
        assert!(back.is_empty());
    }

    #[test]
    fn test_rejects_bad_leading_magic() {
        let mut writer = ByteWriter::new();
        writer.write_u32(0x1234_5678);
        writer.write_u32(1);
        writer.write_u32(0);
        let err = decode(&writer.into_bytes()).unwrap_err();
        assert!(matches!(err, KinemaError::BadMagic { found: 0x1234_5678 }));
    }

    #[test]
    fn test_rejects_version_zero_and_future_versions() {
        for version in [0, CURRENT_VERSION + 1, u32::MAX] {
            let mut writer = ByteWriter::new();
            writer.write_u32(MAGIC);
            writer.write_u32(version);
            writer.write_u32(0);
            let err = decode(&writer.into_bytes()).unwrap_err();
            assert!(
                matches!(err, KinemaError::UnsupportedVersion { found } if found == version),
                "version {version}"
            );
        }
    }

    #[test]
    fn test_rejects_unknown_object_tag() {
        let mut writer = ByteWriter::new();
        writer.write_u32(MAGIC);
        writer.write_u32(1);
        writer.write_u32(1); // one object
        writer.write_u32(0); // reserved tag 0
        writer.write_f32(0.0);
        writer.write_f32(0.0);
        writer.write_i32(0);
        writer.write_i32(0);
        writer.write_i32(0);
        writer.write_i32(0);
        let err = decode(&writer.into_bytes()).unwrap_err();
        assert!(matches!(err, KinemaError::UnknownObjectKind { tag: 0 }));
    }

    #[test]
    fn test_rejects_unknown_animation_tag() {
        let mut registry = SceneRegistry::new();
        let object = registry.spawn_object(ObjectKind::LaTex(LaTexPayload::default()), 0, 10);
        registry
            .spawn_animation(object, AnimationKind::WriteIn, 0, 5)
            .unwrap();
        let mut bytes = encode(&registry);

        // The animation record starts right after the object record's
        // anim_count; its tag is 20 bytes + trailing magic from the end.
        let tag_offset = bytes.len() - 4 - 20;
        bytes[tag_offset..tag_offset + 4].copy_from_slice(&99u32.to_le_bytes());
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, KinemaError::UnknownAnimationKind { tag: 99 }));
    }

    #[test]
    fn test_truncated_buffer_fails() {
        let mut registry = SceneRegistry::new();
        registry.spawn_object(
            ObjectKind::Text(TextPayload {
                text: "hello".into(),
                font_size: 32.0,
            }),
            0,
            30,
        );
        let bytes = encode(&registry);
        for cut in [4, 8, 12, bytes.len() - 1] {
            assert!(decode(&bytes[..cut]).is_err(), "cut at {cut}");
        }
    }
}
