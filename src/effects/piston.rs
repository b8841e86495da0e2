use crate::animation::ease::Ease;
use crate::animation::tween::TweenHandle;
use crate::effects::{Direction, Effect};
use crate::foundation::core::{Rect, Vec2};
use crate::scene::context::{EffectId, FxContext};
use crate::scene::stage::{ContainerId, Prop, ShapeId};

/// Duration of each piston phase.
pub const PISTON_PHASE_SECS: f64 = 0.125;

/// Number of piston instances the dispatcher builds.
pub const PISTON_COUNT: usize = 3;

/// Piston lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PistonPhase {
    /// Detached.
    Idle,
    /// Mask sliding in to uncover the bars.
    Revealing,
    /// Mask sliding on to cover them again.
    Concealing,
}

/// A band of `index * 4 + 1` horizontal bars revealed and concealed by a sliding mask.
#[derive(Debug)]
pub struct Piston {
    id: EffectId,
    index: usize,
    container: ContainerId,
    mask: ShapeId,
    bars: Vec<ShapeId>,
    // Mask offset that uncovers nothing; the mask travels between `-travel` and `travel`.
    travel: f64,
    phase: PistonPhase,
    tween: Option<TweenHandle>,
    direction: Option<Direction>,
}

impl Piston {
    /// Bars built for instance `index`.
    pub fn bar_count(index: usize) -> usize {
        index * 4 + 1
    }

    /// Build piston `index` from the current viewport.
    pub fn new(ctx: &mut FxContext, index: usize) -> Self {
        let id = ctx.register_effect();
        let color = ctx.palette().white.to_rgba8_premul();
        let stage = ctx.stage_mut();
        let canvas = stage.canvas();
        let width = canvas.w() * 0.75;
        let height = canvas.h() * 0.5;
        let travel = width + 1.0;

        let container = stage.create_container();
        let mask = stage.add_mask(
            container,
            Rect::from_origin_size((width / 6.0, height / 2.0), (width, height)),
        );
        stage.set_shape_position(mask, Vec2::new(travel, 0.0));

        let n = Self::bar_count(index);
        let nf = n as f64;
        let bar_h = height / nf - height / (nf * 3.0);
        let x = canvas.w() * 0.25 / 2.0;
        let bars = (0..n)
            .map(|i| {
                let y = height / 2.0 + (i as f64 + 1.0) * (height / (nf + 1.0))
                    - height / (nf * 3.0);
                let bar = stage.add_rect(
                    container,
                    Rect::from_origin_size((x, y), (width, bar_h)),
                    color,
                );
                stage.set_mask(bar, Some(mask));
                bar
            })
            .collect();

        Self {
            id,
            index,
            container,
            mask,
            bars,
            travel,
            phase: PistonPhase::Idle,
            tween: None,
            direction: None,
        }
    }

    /// Reveal then conceal the bars from a random side, cancelling any run in flight.
    pub fn play(&mut self, ctx: &mut FxContext) {
        self.cancel(ctx);

        let direction = Direction::random(ctx);
        self.direction = Some(direction);
        ctx.stage
            .set(Prop::ShapeX(self.mask), direction.sign() * self.travel);
        ctx.stage.attach(self.container);

        self.tween = Some(ctx.tweens.to(
            &ctx.stage,
            self.id,
            Prop::ShapeX(self.mask),
            0.0,
            PISTON_PHASE_SECS,
            Ease::OutSine,
        ));
        self.phase = PistonPhase::Revealing;
        tracing::debug!(index = self.index, ?direction, "piston: revealing");
    }

    /// Kill the running tween and force the piston back to idle. No-op when idle.
    pub fn cancel(&mut self, ctx: &mut FxContext) {
        if let Some(handle) = self.tween {
            ctx.tweens.kill(handle);
            tracing::debug!(index = self.index, phase = ?self.phase, "piston: cancelled");
            self.finish_conceal(ctx);
        }
    }

    fn finish_reveal(&mut self, ctx: &mut FxContext) {
        let direction = self.direction.unwrap_or(Direction::Forward);
        self.tween = Some(ctx.tweens.to(
            &ctx.stage,
            self.id,
            Prop::ShapeX(self.mask),
            -direction.sign() * self.travel,
            PISTON_PHASE_SECS,
            Ease::OutSine,
        ));
        self.phase = PistonPhase::Concealing;
        tracing::debug!(index = self.index, "piston: concealing");
    }

    fn finish_conceal(&mut self, ctx: &mut FxContext) {
        self.tween = None;
        ctx.stage.detach(self.container);
        self.phase = PistonPhase::Idle;
    }

    /// Instance index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Bar shapes, top to bottom.
    pub fn bars(&self) -> &[ShapeId] {
        &self.bars
    }

    /// The shared clipping shape.
    pub fn mask(&self) -> ShapeId {
        self.mask
    }

    /// The effect's container.
    pub fn container(&self) -> ContainerId {
        self.container
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PistonPhase {
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
}

impl Effect for Piston {
    fn id(&self) -> EffectId {
        self.id
    }

    fn on_tween_complete(&mut self, ctx: &mut FxContext, handle: TweenHandle) {
        if self.tween != Some(handle) {
            return;
        }
        match self.phase {
            PistonPhase::Revealing => self.finish_reveal(ctx),
            PistonPhase::Concealing => {
                self.finish_conceal(ctx);
                tracing::debug!(index = self.index, "piston: done");
            }
            PistonPhase::Idle => {}
        }
    }

    fn is_idle(&self) -> bool {
        self.phase == PistonPhase::Idle
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/piston.rs"]
mod tests;
