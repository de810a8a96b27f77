use super::*;
use crate::animation::ease::Ease;
use crate::assets::codec::BytesCodec;
use crate::config::project::StoreOpts;
use crate::encode::memory::InMemoryEncoder;

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "framesmith_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn byte_store(dir: &Path, payloads: &[u8]) -> FrameStore<BytesCodec> {
    let opts = StoreOpts {
        extension: ".bin".to_string(),
        recover_existing: false,
    };
    let mut store = FrameStore::with_codec(dir.join("seq"), &opts, BytesCodec).unwrap();
    for &p in payloads {
        store.append(&vec![p]).unwrap();
    }
    store
}

#[test]
fn flat_timing_plays_each_frame_once() {
    let tmp = temp_dir("draw_flat");
    let store = byte_store(&tmp, b"abc");
    let mut enc = InMemoryEncoder::new();
    let opts = AnimationOpts {
        timing: TemporalBudget::per_frame(40),
        ease: None,
        loop_forever: false,
    };

    let stats = draw_animation(&store, &opts, &mut enc, &tmp.join("out.gif")).unwrap();
    assert_eq!(
        stats,
        DrawStats {
            source_frames: 3,
            encoded_frames: 3,
            unit_duration_ms: 40
        }
    );
    assert_eq!(enc.frames(), &[vec![b'a'], vec![b'b'], vec![b'c']]);
    assert_eq!(enc.timing(), Some(&FrameTiming::Flat(40)));
    assert!(!enc.looping());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn eased_timing_repeats_frames_in_order() {
    let tmp = temp_dir("draw_eased");
    let store = byte_store(&tmp, b"xyz");
    let mut enc = InMemoryEncoder::new();
    let opts = AnimationOpts {
        timing: TemporalBudget::total(300),
        ease: Some(Ease::InQuad),
        loop_forever: true,
    };

    let stats = draw_animation(&store, &opts, &mut enc, &tmp.join("out.gif")).unwrap();
    assert_eq!(stats.unit_duration_ms, 100);
    assert_eq!(stats.encoded_frames, 4);
    let played: Vec<u8> = enc.frames().iter().map(|f| f[0]).collect();
    assert_eq!(played, b"xyzz".to_vec());
    assert!(enc.looping());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn custom_curves_drive_the_schedule() {
    let tmp = temp_dir("draw_custom");
    let store = byte_store(&tmp, b"pq");
    let mut enc = InMemoryEncoder::new();
    let late = |x: f64| if x < 1.0 { 0.0 } else { 1.5 };

    let stats = draw_animation_with(
        &store,
        &TemporalBudget::total(1000),
        Some(&late),
        true,
        &mut enc,
        &tmp.join("out.gif"),
    )
    .unwrap();
    assert_eq!(stats.unit_duration_ms, 500);
    let played: Vec<u8> = enc.frames().iter().map(|f| f[0]).collect();
    assert_eq!(played, b"pqqq".to_vec());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn empty_store_is_sequence_empty() {
    let tmp = temp_dir("draw_empty");
    let store = byte_store(&tmp, b"");
    let mut enc = InMemoryEncoder::<Vec<u8>>::new();
    let err = draw_animation(&store, &AnimationOpts::default(), &mut enc, &tmp.join("o.gif"))
        .unwrap_err();
    assert!(matches!(err, FramesmithError::SequenceEmpty(_)));
    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn total_without_ease_is_invalid_easing() {
    let tmp = temp_dir("draw_no_ease");
    let store = byte_store(&tmp, b"ab");
    let mut enc = InMemoryEncoder::<Vec<u8>>::new();
    let opts = AnimationOpts {
        timing: TemporalBudget::total(1000),
        ease: None,
        loop_forever: true,
    };
    let err = draw_animation(&store, &opts, &mut enc, &tmp.join("o.gif")).unwrap_err();
    assert!(matches!(err, FramesmithError::InvalidEasing(_)));
    assert!(enc.frames().is_empty());
    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn runaway_curve_fails_without_encoding() {
    let tmp = temp_dir("draw_runaway");
    let store = byte_store(&tmp, b"abc");
    let mut enc = InMemoryEncoder::<Vec<u8>>::new();
    let steep = |x: f64| x * 1e13;
    let err = draw_animation_with(
        &store,
        &TemporalBudget::total(300),
        Some(&steep),
        true,
        &mut enc,
        &tmp.join("o.gif"),
    )
    .unwrap_err();
    assert!(matches!(err, FramesmithError::Validation(_)));
    assert!(enc.frames().is_empty());
    std::fs::remove_dir_all(&tmp).ok();
}
