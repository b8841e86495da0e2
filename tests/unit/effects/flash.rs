use super::*;
use crate::effects::drive_frame;
use crate::foundation::core::Canvas;
use crate::palette::Palette;

const DT: f64 = 1.0 / 60.0;

fn ctx(seed: u64) -> FxContext {
    FxContext::new(Canvas::new(80, 60).unwrap(), Palette::default(), Some(seed))
}

#[test]
fn builds_three_hidden_viewport_rects() {
    let mut c = ctx(1);
    let fx = Flash::new(&mut c);
    let p = Palette::default();
    let colors = [p.black, p.white, p.accent];
    for (shape, color) in fx.shapes().iter().zip(colors) {
        let s = c.stage().shape(*shape);
        assert!(!s.visible());
        assert_eq!(s.rect(), c.stage().canvas().rect());
        assert_eq!(s.fill(), color.to_rgba8_premul());
    }
    assert!(!c.stage().is_attached(fx.container()));
    assert!(fx.is_idle());
}

#[test]
fn every_variant_attaches_once_and_detaches_within_window() {
    for variant in 0..FLASH_VARIANTS {
        let mut c = ctx(variant as u64);
        let mut fx = Flash::new(&mut c);
        fx.play(&mut c, variant);
        assert_eq!(c.stage().attached(), &[fx.container()]);
        assert_eq!(fx.active_variant(), Some(variant));

        let mut elapsed = 0.0;
        while !fx.is_idle() {
            drive_frame(&mut c, &mut fx, DT);
            elapsed += DT;
            assert!(elapsed <= FLASH_SECS + DT, "flash outlived its window");
            if !fx.is_idle() {
                assert_eq!(c.stage().attached(), &[fx.container()]);
            }
        }
        assert!(c.stage().attached().is_empty());
        for shape in fx.shapes() {
            assert!(!c.stage().shape(*shape).visible());
        }
        assert!(c.ticker().is_empty());
        assert!(c.tweens().is_empty());
    }
}

#[test]
fn strobe_flickers_both_ways() {
    let mut c = ctx(42);
    let mut fx = Flash::new(&mut c);
    fx.play(&mut c, 1);
    let shape = fx.shapes()[1];
    let (mut on, mut off) = (0, 0);
    for _ in 0..14 {
        drive_frame(&mut c, &mut fx, DT);
        if c.stage().shape(shape).visible() {
            on += 1;
        } else {
            off += 1;
        }
    }
    assert!(!fx.is_idle());
    assert!(on > 0 && off > 0, "on={on} off={off}");
    // Other variants never flicker.
    assert!(!c.stage().shape(fx.shapes()[0]).visible());
    assert!(!c.stage().shape(fx.shapes()[2]).visible());
}

// Repeated triggering restarts instead of stacking overlapping strobes.
#[test]
fn replay_cancels_and_restarts() {
    let mut c = ctx(3);
    let mut fx = Flash::new(&mut c);
    fx.play(&mut c, 0);
    for _ in 0..5 {
        drive_frame(&mut c, &mut fx, DT);
    }
    fx.play(&mut c, 2);
    assert_eq!(c.ticker().len(), 1);
    assert_eq!(c.tweens().jobs_of(fx.id()), 1);
    assert_eq!(fx.active_variant(), Some(2));
    assert!(!c.stage().shape(fx.shapes()[0]).visible());
    assert_eq!(c.stage().attached(), &[fx.container()]);

    // The restarted strobe gets a full window.
    let mut frames = 0;
    while !fx.is_idle() {
        drive_frame(&mut c, &mut fx, DT);
        frames += 1;
    }
    assert_eq!(frames, 15);
    assert!(c.stage().attached().is_empty());
}

#[test]
fn unknown_variant_is_ignored() {
    let mut c = ctx(0);
    let mut fx = Flash::new(&mut c);
    fx.play(&mut c, 3);
    assert!(fx.is_idle());
    assert!(c.stage().attached().is_empty());
    assert!(c.ticker().is_empty());
}
