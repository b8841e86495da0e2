use super::*;

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(3), FrameIndex(2)).is_err());
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert_eq!(r.len_frames(), 3);
    assert!(FrameRange::new(FrameIndex(4), FrameIndex(4)).unwrap().is_empty());
}

#[test]
fn fps_conversions() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::new(30, 1).unwrap();
    assert!((fps.frame_duration_secs() - 1.0 / 30.0).abs() < 1e-12);
    assert!((fps.frames_to_secs(15) - 0.5).abs() < 1e-12);
    assert_eq!(fps.secs_to_frames_ceil(1.0), 30);
    assert_eq!(fps.secs_to_frames_ceil(1.01), 31);
    assert_eq!(fps.secs_to_frames_ceil(-1.0), 0);
}

#[test]
fn canvas_validation() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 70_000).is_err());
    let c = Canvas::new(64, 32).unwrap();
    assert_eq!(c.rect(), Rect::new(0.0, 0.0, 64.0, 32.0));
}

#[test]
fn opaque_colors_carry_full_alpha() {
    assert_eq!(
        Rgba8Premul::opaque(1, 2, 3),
        Rgba8Premul {
            r: 1,
            g: 2,
            b: 3,
            a: 255
        }
    );
}
