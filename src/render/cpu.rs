use crate::foundation::core::{Rect, Rgba8Premul};
use crate::foundation::error::{FxError, FxResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::scene::stage::Stage;

/// CPU backend powered by `vello_cpu`. The render context is reused across frames of the
/// same size.
#[derive(Default)]
pub struct CpuBackend {
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for CpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBackend")
            .field("has_ctx", &self.ctx.is_some())
            .finish()
    }
}

impl CpuBackend {
    /// Create a backend with no cached render context.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> FxResult<R>,
    ) -> FxResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }
}

impl RenderBackend for CpuBackend {
    fn render_stage(&mut self, stage: &Stage) -> FxResult<FrameRGBA> {
        let canvas = stage.canvas();
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| FxError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| FxError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(FxError::render("surface width/height must be non-zero"));
        }

        let rects = draw_list(stage);
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        self.with_ctx_mut(width, height, |ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            fill(ctx, canvas.rect(), stage.background());
            for (rect, color) in &rects {
                fill(ctx, *rect, *color);
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn fill(ctx: &mut vello_cpu::RenderContext, rect: Rect, c: Rgba8Premul) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        rect.x0, rect.y0, rect.x1, rect.y1,
    ));
}

/// World-space rectangles to fill, in paint order: attached containers bottom to top, their
/// visible non-mask shapes in child order, each clipped to its mask.
pub(crate) fn draw_list(stage: &Stage) -> Vec<(Rect, Rgba8Premul)> {
    let mut out = Vec::new();
    for &container in stage.attached() {
        for &id in stage.container(container).children() {
            let shape = stage.shape(id);
            if shape.is_mask() || !shape.visible() {
                continue;
            }
            let mut rect = stage.world_rect(id);
            if let Some(mask) = shape.mask() {
                rect = rect.intersect(stage.world_rect(mask));
            }
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                continue;
            }
            out.push((rect, shape.fill()));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
