//! Full-screen transition effects and the key dispatcher that plays them.

pub(crate) mod dispatch;
pub(crate) mod flash;
pub(crate) mod piston;
pub(crate) mod wipe;

use crate::animation::tween::TweenHandle;
use crate::scene::context::{EffectId, FxContext};

/// Which way a randomized effect travels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards increasing coordinates (left to right, top to bottom).
    Forward,
    /// Towards decreasing coordinates.
    Backward,
}

impl Direction {
    /// Pick a direction with a fair coin from the context's random source.
    pub fn random(ctx: &mut FxContext) -> Self {
        if ctx.coin() {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    /// `+1.0` for forward, `-1.0` for backward.
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Hooks the session uses to drive an effect instance between `play` calls.
pub trait Effect {
    /// Owner id of the effect's tweens and ticker subscription.
    fn id(&self) -> EffectId;

    /// A tween or delayed call owned by this effect finished.
    ///
    /// Stale handles (from a job the effect no longer tracks) are ignored.
    fn on_tween_complete(&mut self, ctx: &mut FxContext, handle: TweenHandle);

    /// One rendered frame elapsed while the effect was subscribed to the ticker.
    fn on_frame(&mut self, _ctx: &mut FxContext) {}

    /// Whether nothing is in flight.
    fn is_idle(&self) -> bool;
}

/// Advance one frame for a single effect the way the session does.
#[cfg(test)]
pub(crate) fn drive_frame(ctx: &mut FxContext, fx: &mut dyn Effect, dt: f64) {
    use crate::animation::tween::TweenEvent;

    let events = ctx.tweens.tick(&mut ctx.stage, dt);
    for TweenEvent::Completed { handle, owner } in events {
        if owner == fx.id() {
            fx.on_tween_complete(ctx, handle);
        }
    }
    if ctx.ticker.contains(fx.id()) {
        fx.on_frame(ctx);
    }
}
