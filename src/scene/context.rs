use crate::animation::ticker::Ticker;
use crate::animation::tween::Tweener;
use crate::palette::Palette;
use crate::scene::stage::Stage;
use crate::foundation::core::Canvas;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Identifies an effect instance as the owner of tweens and ticker subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(pub(crate) u32);

/// Everything an effect needs to build and animate itself: the stage, the tween engine, the
/// frame ticker, the palette and the random source.
///
/// Created once at startup and passed by `&mut` to effect constructors and operations.
#[derive(Debug)]
pub struct FxContext {
    pub(crate) stage: Stage,
    pub(crate) tweens: Tweener,
    pub(crate) ticker: Ticker,
    palette: Palette,
    rng: StdRng,
    next_effect: u32,
}

impl FxContext {
    /// Create a context. `seed` makes every random choice reproducible; `None` seeds from the
    /// operating system.
    pub fn new(canvas: Canvas, palette: Palette, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            stage: Stage::new(canvas, palette.background.to_rgba8_premul()),
            tweens: Tweener::new(),
            ticker: Ticker::new(),
            palette,
            rng,
            next_effect: 0,
        }
    }

    /// Allocate an owner id for a new effect instance.
    pub fn register_effect(&mut self) -> EffectId {
        let id = EffectId(self.next_effect);
        self.next_effect += 1;
        id
    }

    /// The scene graph.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Mutable scene graph access.
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// The tween engine.
    pub fn tweens(&self) -> &Tweener {
        &self.tweens
    }

    /// The frame ticker.
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Colors used by the effects.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// A fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}
