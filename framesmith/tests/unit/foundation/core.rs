use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(3), FrameIndex(2)).is_err());
    assert_eq!(FrameRange::new(FrameIndex(2), FrameIndex(2)).unwrap().len_frames(), 0);
}

#[test]
fn mirror_is_an_involution_inside_the_range() {
    let r = FrameRange::new(FrameIndex(1), FrameIndex(5)).unwrap();
    assert_eq!(r.mirror(FrameIndex(1)), FrameIndex(4));
    assert_eq!(r.mirror(FrameIndex(2)), FrameIndex(3));
    assert_eq!(r.mirror(FrameIndex(0)), FrameIndex(0));
    assert_eq!(r.mirror(FrameIndex(5)), FrameIndex(5));
    for i in 0..7 {
        let f = FrameIndex(i);
        assert_eq!(r.mirror(r.mirror(f)), f);
    }
}

#[test]
fn frame_index_displays_as_decimal() {
    assert_eq!(FrameIndex(10).to_string(), "10");
    assert_eq!(FrameIndex(9).next(), FrameIndex(10));
}
