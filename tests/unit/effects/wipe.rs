use super::*;
use crate::effects::drive_frame;
use crate::foundation::core::Canvas;
use crate::palette::Palette;

const DT: f64 = 1.0 / 30.0;

fn ctx(seed: u64) -> FxContext {
    FxContext::new(Canvas::new(200, 100).unwrap(), Palette::default(), Some(seed))
}

fn run_phase(c: &mut FxContext, fx: &mut Wipe) -> usize {
    let phase = fx.phase();
    let mut frames = 0;
    while fx.phase() == phase {
        drive_frame(c, fx, DT);
        frames += 1;
        assert!(frames < 1000);
    }
    frames
}

#[test]
fn colors_follow_axis() {
    let mut c = ctx(0);
    let x = Wipe::new(&mut c, Axis::X);
    let y = Wipe::new(&mut c, Axis::Y);
    let p = Palette::default();
    assert_eq!(c.stage().shape(x.shape()).fill(), p.middleground.to_rgba8_premul());
    assert_eq!(c.stage().shape(y.shape()).fill(), p.highlight.to_rgba8_premul());
    assert_eq!(
        c.stage().shape(x.shape()).rect(),
        Rect::new(-100.0, 0.0, 100.0, 100.0)
    );
    assert_eq!(
        c.stage().shape(y.shape()).rect(),
        Rect::new(0.0, -50.0, 200.0, 50.0)
    );
    assert_ne!(x.id(), y.id());
}

#[test]
fn starts_off_screen_covers_then_leaves() {
    for seed in 0..8 {
        let mut c = ctx(seed);
        let mut fx = Wipe::new(&mut c, Axis::X);
        fx.play(&mut c);
        let dir = fx.direction().unwrap();
        let viewport = c.stage().canvas().rect();

        let start = c.stage().world_rect(fx.shape());
        match dir {
            Direction::Forward => assert_eq!(start, Rect::new(-200.0, 0.0, 0.0, 100.0)),
            Direction::Backward => assert_eq!(start, Rect::new(200.0, 0.0, 400.0, 100.0)),
        }
        assert!(c.stage().shape(fx.shape()).visible());
        assert_eq!(fx.phase(), WipePhase::SlidingIn);

        assert_eq!(run_phase(&mut c, &mut fx), 15);
        assert_eq!(fx.phase(), WipePhase::SlidingOut);
        assert_eq!(c.stage().world_rect(fx.shape()), viewport);

        assert_eq!(run_phase(&mut c, &mut fx), 15);
        assert_eq!(fx.phase(), WipePhase::Idle);
        assert!(fx.tween().is_none());
        assert!(!c.stage().is_attached(fx.container()));
        assert!(!c.stage().shape(fx.shape()).visible());
        let end = c.stage().container(fx.container()).position().x;
        assert_eq!(end, dir.sign() * 400.0);
    }
}

#[test]
fn vertical_wipe_moves_along_y_only() {
    let mut c = ctx(5);
    let mut fx = Wipe::new(&mut c, Axis::Y);
    fx.play(&mut c);
    run_phase(&mut c, &mut fx);
    assert_eq!(c.stage().world_rect(fx.shape()), c.stage().canvas().rect());
    assert_eq!(c.stage().container(fx.container()).position().x, 0.0);
    run_phase(&mut c, &mut fx);
    assert!(fx.is_idle());
}

#[test]
fn rapid_replay_never_doubles_drivers() {
    let mut c = ctx(9);
    let mut fx = Wipe::new(&mut c, Axis::X);
    let prop = Prop::ContainerX(fx.container());
    fx.play(&mut c);
    let first = fx.tween().unwrap();
    drive_frame(&mut c, &mut fx, DT);
    fx.play(&mut c);
    let second = fx.tween().unwrap();

    assert_ne!(first, second);
    assert!(!c.tweens().is_active(first));
    assert_eq!(c.tweens().drivers_of(prop), 1);
    assert_eq!(c.tweens().jobs_of(fx.id()), 1);
    // Restart begins from the origin again.
    assert_eq!(c.stage().container(fx.container()).position().x, 0.0);
    assert_eq!(c.stage().attached(), &[fx.container()]);

    // Replay during slide-out as well.
    run_phase(&mut c, &mut fx);
    assert_eq!(fx.phase(), WipePhase::SlidingOut);
    fx.play(&mut c);
    assert_eq!(fx.phase(), WipePhase::SlidingIn);
    assert_eq!(c.tweens().drivers_of(prop), 1);
}

#[test]
fn cancel_forces_idle() {
    let mut c = ctx(1);
    let mut fx = Wipe::new(&mut c, Axis::X);
    fx.play(&mut c);
    drive_frame(&mut c, &mut fx, DT);
    fx.cancel(&mut c);
    assert!(fx.is_idle());
    assert!(c.tweens().is_empty());
    assert!(c.stage().attached().is_empty());
    assert!(!c.stage().shape(fx.shape()).visible());
}

#[test]
fn direction_hits_both_outcomes() {
    let mut c = ctx(2024);
    let mut fx = Wipe::new(&mut c, Axis::X);
    let (mut fwd, mut back) = (0, 0);
    for _ in 0..100 {
        fx.play(&mut c);
        match fx.direction().unwrap() {
            Direction::Forward => fwd += 1,
            Direction::Backward => back += 1,
        }
    }
    assert!(fwd > 0 && back > 0, "fwd={fwd} back={back}");
    assert_eq!(fwd + back, 100);
}
