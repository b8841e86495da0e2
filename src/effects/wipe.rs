use crate::animation::ease::Ease;
use crate::animation::tween::TweenHandle;
use crate::effects::{Direction, Effect};
use crate::foundation::core::{Rect, Vec2};
use crate::scene::context::{EffectId, FxContext};
use crate::scene::stage::{ContainerId, Prop, ShapeId};

/// Duration of each wipe phase.
pub const WIPE_PHASE_SECS: f64 = 0.5;

/// Axis a wipe travels along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

/// Wipe lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WipePhase {
    /// Detached and hidden.
    Idle,
    /// Moving onto the screen until it covers the viewport.
    SlidingIn,
    /// Moving off the far side.
    SlidingOut,
}

/// A viewport-sized rectangle that slides across the screen along one axis and back out the
/// far side.
#[derive(Debug)]
pub struct Wipe {
    id: EffectId,
    axis: Axis,
    // Viewport extent along `axis`, captured at construction.
    extent: f64,
    container: ContainerId,
    shape: ShapeId,
    phase: WipePhase,
    tween: Option<TweenHandle>,
    direction: Option<Direction>,
}

impl Wipe {
    /// Build a hidden wipe along `axis`. X wipes use the middleground color, Y wipes the
    /// highlight color.
    pub fn new(ctx: &mut FxContext, axis: Axis) -> Self {
        let id = ctx.register_effect();
        let color = match axis {
            Axis::X => ctx.palette().middleground,
            Axis::Y => ctx.palette().highlight,
        };
        let stage = ctx.stage_mut();
        let canvas = stage.canvas();
        let (w, h) = (canvas.w(), canvas.h());
        // Centered on the container along the travel axis.
        let rect = match axis {
            Axis::X => Rect::new(-w / 2.0, 0.0, w / 2.0, h),
            Axis::Y => Rect::new(0.0, -h / 2.0, w, h / 2.0),
        };
        let container = stage.create_container();
        let shape = stage.add_rect(container, rect, color.to_rgba8_premul());
        stage.set_visible(shape, false);

        Self {
            id,
            axis,
            extent: match axis {
                Axis::X => w,
                Axis::Y => h,
            },
            container,
            shape,
            phase: WipePhase::Idle,
            tween: None,
            direction: None,
        }
    }

    fn travel_prop(&self) -> Prop {
        match self.axis {
            Axis::X => Prop::ContainerX(self.container),
            Axis::Y => Prop::ContainerY(self.container),
        }
    }

    /// Start a wipe in a random direction, cancelling any wipe in flight first.
    pub fn play(&mut self, ctx: &mut FxContext) {
        self.cancel(ctx);

        let direction = Direction::random(ctx);
        self.direction = Some(direction);

        let start = match direction {
            Direction::Forward => -self.extent / 2.0,
            Direction::Backward => self.extent * 1.5,
        };
        let offset = match self.axis {
            Axis::X => Vec2::new(start, 0.0),
            Axis::Y => Vec2::new(0.0, start),
        };
        ctx.stage.set_container_position(self.container, Vec2::ZERO);
        ctx.stage.set_shape_position(self.shape, offset);
        ctx.stage.set_visible(self.shape, true);
        ctx.stage.attach(self.container);

        let target = direction.sign() * self.extent;
        self.tween = Some(ctx.tweens.to(
            &ctx.stage,
            self.id,
            self.travel_prop(),
            target,
            WIPE_PHASE_SECS,
            Ease::OutExpo,
        ));
        self.phase = WipePhase::SlidingIn;
        tracing::debug!(axis = ?self.axis, ?direction, "wipe: sliding in");
    }

    /// Kill the running tween and force the wipe back to idle. No-op when idle.
    pub fn cancel(&mut self, ctx: &mut FxContext) {
        if let Some(handle) = self.tween {
            ctx.tweens.kill(handle);
            tracing::debug!(axis = ?self.axis, phase = ?self.phase, "wipe: cancelled");
            self.finish_slide_out(ctx);
        }
    }

    fn finish_slide_in(&mut self, ctx: &mut FxContext) {
        let direction = self.direction.unwrap_or(Direction::Forward);
        let target = direction.sign() * self.extent * 2.0;
        self.tween = Some(ctx.tweens.to(
            &ctx.stage,
            self.id,
            self.travel_prop(),
            target,
            WIPE_PHASE_SECS,
            Ease::InExpo,
        ));
        self.phase = WipePhase::SlidingOut;
        tracing::debug!(axis = ?self.axis, "wipe: sliding out");
    }

    fn finish_slide_out(&mut self, ctx: &mut FxContext) {
        self.tween = None;
        ctx.stage.detach(self.container);
        ctx.stage.set_visible(self.shape, false);
        self.phase = WipePhase::Idle;
    }

    /// Travel axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> WipePhase {
        self.phase
    }

    /// Direction chosen by the latest `play`.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Running tween, if any.
    pub fn tween(&self) -> Option<TweenHandle> {
        self.tween
    }

    /// The moving container.
    pub fn container(&self) -> ContainerId {
        self.container
    }

    /// The covering rectangle.
    pub fn shape(&self) -> ShapeId {
        self.shape
    }
}

impl Effect for Wipe {
    fn id(&self) -> EffectId {
        self.id
    }

    fn on_tween_complete(&mut self, ctx: &mut FxContext, handle: TweenHandle) {
        if self.tween != Some(handle) {
            return;
        }
        match self.phase {
            WipePhase::SlidingIn => self.finish_slide_in(ctx),
            WipePhase::SlidingOut => {
                self.finish_slide_out(ctx);
                tracing::debug!(axis = ?self.axis, "wipe: done");
            }
            WipePhase::Idle => {}
        }
    }

    fn is_idle(&self) -> bool {
        self.phase == WipePhase::Idle
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/wipe.rs"]
mod tests;
