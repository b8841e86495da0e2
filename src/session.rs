//! Host-side frame driver: owns the context and the effects, advances time, renders.

use crate::config::FxConfig;
use crate::effects::dispatch::{Animations, KeyBinding};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
use crate::foundation::error::{FxError, FxResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::scene::context::FxContext;
use crate::script::KeyScript;

/// Counters from [`FxSession::render_script`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScriptStats {
    /// Frames pushed into the sink.
    pub frames: u64,
    /// Key events that reached a bound effect.
    pub keys_played: u64,
    /// Key events the dispatcher ignored.
    pub keys_ignored: u64,
}

/// A running effect set: the context, the dispatcher and a clock.
#[derive(Debug)]
pub struct FxSession {
    ctx: FxContext,
    animations: Animations,
    fps: Fps,
    time: f64,
}

impl FxSession {
    /// Build the context and every effect from `config`.
    pub fn new(config: &FxConfig) -> FxResult<Self> {
        config.validate()?;
        let mut ctx = FxContext::new(config.canvas()?, config.palette, config.seed);
        let animations = Animations::new(&mut ctx);
        tracing::debug!(
            width = config.width,
            height = config.height,
            seed = ?config.seed,
            "session created"
        );
        Ok(Self {
            ctx,
            animations,
            fps: config.fps,
            time: 0.0,
        })
    }

    /// Dispatch a key. Returns the binding that played, `None` when the key is unmapped.
    pub fn play(&mut self, key: &str) -> Option<KeyBinding> {
        self.animations.play(&mut self.ctx, key)
    }

    /// Advance the clock by `dt` seconds: run tweens, deliver their completions, then deliver
    /// one ticker frame. Negative or non-finite `dt` counts as zero.
    pub fn advance(&mut self, dt: f64) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.time += dt;
        let events = self.ctx.tweens.tick(&mut self.ctx.stage, dt);
        for event in events {
            self.animations.route(&mut self.ctx, event);
        }
        self.animations.frame(&mut self.ctx);
    }

    /// Advance by one frame at the configured rate.
    pub fn step(&mut self) {
        self.advance(self.fps.frame_duration_secs());
    }

    /// Resize the rendered surface. Effect geometry keeps its construction-time size.
    pub fn resize(&mut self, canvas: Canvas) {
        tracing::debug!(width = canvas.width, height = canvas.height, "surface resized");
        self.ctx.stage.resize(canvas);
    }

    /// Rasterize the current stage.
    pub fn render(&self, backend: &mut dyn RenderBackend) -> FxResult<FrameRGBA> {
        backend.render_stage(&self.ctx.stage)
    }

    /// Render `range` frames of `script` into `sink`.
    ///
    /// Frame `i` is rendered at time `i / fps` after every script key with `at <= i / fps` has
    /// been dispatched; the clock then advances by one frame. Frames before `range.start` are
    /// simulated but not rendered.
    #[tracing::instrument(skip(self, script, backend, sink), fields(events = script.events().len()))]
    pub fn render_script(
        &mut self,
        script: &KeyScript,
        range: FrameRange,
        backend: &mut dyn RenderBackend,
        sink: &mut dyn FrameSink,
    ) -> FxResult<ScriptStats> {
        if self.time != 0.0 {
            return Err(FxError::validation(
                "render_script requires a fresh session (clock already advanced)",
            ));
        }
        let canvas = self.ctx.stage.canvas();
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.fps,
        })?;

        let mut stats = ScriptStats::default();
        let mut cursor = 0usize;
        let events = script.events();
        for i in 0..range.end.0 {
            let now = self.fps.frames_to_secs(i);
            while let Some(ev) = events.get(cursor)
                && ev.at <= now + 1e-9
            {
                match self.play(&ev.key) {
                    Some(_) => stats.keys_played += 1,
                    None => stats.keys_ignored += 1,
                }
                cursor += 1;
            }

            if i >= range.start.0 {
                let frame = self.render(backend)?;
                sink.push_frame(FrameIndex(i), &frame)?;
                stats.frames += 1;
                tracing::trace!(frame = i, "frame pushed");
            }
            self.step();
        }
        sink.end()?;
        Ok(stats)
    }

    /// Seconds since the session started.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Configured frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Whether every effect has finished.
    pub fn is_idle(&self) -> bool {
        self.animations.is_idle()
    }

    /// The rendering context.
    pub fn context(&self) -> &FxContext {
        &self.ctx
    }

    /// The effect set.
    pub fn animations(&self) -> &Animations {
        &self.animations
    }
}
