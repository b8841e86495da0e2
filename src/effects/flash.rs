use crate::animation::tween::TweenHandle;
use crate::effects::Effect;
use crate::scene::context::{EffectId, FxContext};
use crate::scene::stage::{ContainerId, ShapeId};

/// How long a flash strobes before it hides itself.
pub const FLASH_SECS: f64 = 0.25;

/// Number of flash color variants (black, white, accent).
pub const FLASH_VARIANTS: usize = 3;

#[derive(Clone, Copy, Debug)]
struct Strobe {
    variant: usize,
    timer: TweenHandle,
}

/// Full-screen strobe: one of three colored rectangles flickers at random every frame for
/// [`FLASH_SECS`], then hides and detaches.
///
/// A second `play` while strobing cancels the running strobe first, so at most one strobe
/// per instance is ever active.
#[derive(Debug)]
pub struct Flash {
    id: EffectId,
    container: ContainerId,
    shapes: [ShapeId; FLASH_VARIANTS],
    active: Option<Strobe>,
}

impl Flash {
    /// Build the three viewport-sized rectangles, hidden, in a detached container.
    pub fn new(ctx: &mut FxContext) -> Self {
        let id = ctx.register_effect();
        let palette = *ctx.palette();
        let stage = ctx.stage_mut();
        let rect = stage.canvas().rect();
        let container = stage.create_container();
        let shapes = [palette.black, palette.white, palette.accent].map(|color| {
            let shape = stage.add_rect(container, rect, color.to_rgba8_premul());
            stage.set_visible(shape, false);
            shape
        });
        Self {
            id,
            container,
            shapes,
            active: None,
        }
    }

    /// Strobe `variant` (0 black, 1 white, 2 accent). Unknown variants are ignored.
    pub fn play(&mut self, ctx: &mut FxContext, variant: usize) {
        if variant >= FLASH_VARIANTS {
            tracing::debug!(variant, "flash: ignoring unknown variant");
            return;
        }
        self.cancel(ctx);

        ctx.stage.attach(self.container);
        ctx.ticker.add(self.id);
        let timer = ctx.tweens.delayed_call(self.id, FLASH_SECS);
        self.active = Some(Strobe { variant, timer });
        tracing::debug!(variant, "flash: strobe started");
    }

    /// Abort a running strobe and return to idle. No-op when idle.
    pub fn cancel(&mut self, ctx: &mut FxContext) {
        if let Some(strobe) = self.active {
            ctx.tweens.kill(strobe.timer);
            tracing::debug!(variant = strobe.variant, "flash: strobe cancelled");
            self.finish_strobe(ctx);
        }
    }

    fn finish_strobe(&mut self, ctx: &mut FxContext) {
        let Some(strobe) = self.active.take() else {
            return;
        };
        ctx.ticker.remove(self.id);
        ctx.stage.set_visible(self.shapes[strobe.variant], false);
        ctx.stage.detach(self.container);
    }

    /// The effect's container.
    pub fn container(&self) -> ContainerId {
        self.container
    }

    /// Shape for each variant.
    pub fn shapes(&self) -> &[ShapeId; FLASH_VARIANTS] {
        &self.shapes
    }

    /// Variant currently strobing.
    pub fn active_variant(&self) -> Option<usize> {
        self.active.map(|s| s.variant)
    }
}

impl Effect for Flash {
    fn id(&self) -> EffectId {
        self.id
    }

    fn on_tween_complete(&mut self, ctx: &mut FxContext, handle: TweenHandle) {
        if self.active.is_some_and(|s| s.timer == handle) {
            self.finish_strobe(ctx);
            tracing::debug!("flash: strobe finished");
        }
    }

    fn on_frame(&mut self, ctx: &mut FxContext) {
        if let Some(strobe) = self.active {
            let visible = ctx.coin();
            ctx.stage.set_visible(self.shapes[strobe.variant], visible);
        }
    }

    fn is_idle(&self) -> bool {
        self.active.is_none()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/flash.rs"]
mod tests;
