//! stagefx plays key-triggered full-screen transition effects.
//!
//! Three effect primitives are built once against an explicit [`FxContext`]:
//!
//! - [`Flash`]: a colored full-screen strobe,
//! - [`Wipe`]: a full-screen slab sliding across one axis and out the far side,
//! - [`Piston`]: horizontal bars revealed and concealed by a sliding mask.
//!
//! The [`Animations`] dispatcher maps keys (`q a z s x r f v`) to them. An [`FxSession`]
//! drives everything frame by frame and rasterizes the stage through a [`RenderBackend`]
//! into a [`FrameSink`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
/// Session configuration.
pub mod config;
pub(crate) mod effects;
/// Frame sinks.
pub mod encode;
/// Named colors.
pub mod palette;
/// Rasterization backends.
pub mod render;
pub(crate) mod scene;
/// Timed key events.
pub mod script;
/// Frame driver.
pub mod session;

pub use crate::foundation::core::{
    Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{FxError, FxResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::ticker::Ticker;
pub use crate::animation::tween::{TweenEvent, TweenHandle, Tweener};
pub use crate::config::FxConfig;
pub use crate::effects::dispatch::{Animations, KeyBinding};
pub use crate::effects::flash::{FLASH_SECS, FLASH_VARIANTS, Flash};
pub use crate::effects::piston::{PISTON_COUNT, PISTON_PHASE_SECS, Piston, PistonPhase};
pub use crate::effects::wipe::{Axis, WIPE_PHASE_SECS, Wipe, WipePhase};
pub use crate::effects::{Direction, Effect};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::palette::{Palette, PaletteColor};
pub use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use crate::render::cpu::CpuBackend;
pub use crate::scene::context::{EffectId, FxContext};
pub use crate::scene::stage::{Container, ContainerId, Prop, Shape, ShapeId, Stage};
pub use crate::script::{KeyEvent, KeyScript};
pub use crate::session::{FxSession, ScriptStats};
