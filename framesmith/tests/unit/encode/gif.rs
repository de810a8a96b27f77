use image::AnimationDecoder as _;
use image::codecs::gif::GifDecoder;

use super::*;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "framesmith_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn solid(r: u8) -> DynamicImage {
    DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        4,
        4,
        image::Rgba([r, 0, 0, 255]),
    ))
}

fn decode(path: &Path) -> Vec<image::Frame> {
    let file = std::io::BufReader::new(File::open(path).unwrap());
    GifDecoder::new(file)
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

#[test]
fn writes_every_frame_with_flat_delay() {
    let tmp = temp_dir("gif_flat");
    let out = tmp.join("nested").join("anim.gif");
    let (a, b) = (solid(255), solid(0));

    GifEncoder::default()
        .encode(&[&a, &a, &b], &FrameTiming::Flat(300), true, &out)
        .unwrap();

    let frames = decode(&out);
    assert_eq!(frames.len(), 3);
    for f in &frames {
        assert_eq!(f.delay().numer_denom_ms(), (300, 1));
    }
    assert!(frames[0].buffer().get_pixel(0, 0)[0] > 200);
    assert!(frames[2].buffer().get_pixel(0, 0)[0] < 50);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn per_frame_timing_must_cover_all_frames() {
    let tmp = temp_dir("gif_per_frame");
    let out = tmp.join("anim.gif");
    let a = solid(10);

    let err = GifEncoder::default()
        .encode(&[&a, &a], &FrameTiming::PerFrame(vec![100]), false, &out)
        .unwrap_err();
    assert!(matches!(err, FramesmithError::Validation(_)));

    GifEncoder::default()
        .encode(&[&a, &a], &FrameTiming::PerFrame(vec![100, 500]), false, &out)
        .unwrap();
    let frames = decode(&out);
    assert_eq!(frames[1].delay().numer_denom_ms(), (500, 1));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn empty_input_is_sequence_empty() {
    let tmp = temp_dir("gif_empty");
    let err = GifEncoder::default()
        .encode(&[], &FrameTiming::Flat(10), true, &tmp.join("x.gif"))
        .unwrap_err();
    assert!(matches!(err, FramesmithError::SequenceEmpty(_)));
    assert!(!tmp.join("x.gif").exists());
}
