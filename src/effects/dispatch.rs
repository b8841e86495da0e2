use crate::animation::tween::TweenEvent;
use crate::effects::Effect;
use crate::effects::flash::Flash;
use crate::effects::piston::{PISTON_COUNT, Piston};
use crate::effects::wipe::{Axis, Wipe};
use crate::scene::context::FxContext;

/// What a recognized key plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyBinding {
    /// Flash variant 0 (black), 1 (white) or 2 (accent).
    Flash(usize),
    /// Vertical wipe.
    Veil,
    /// Horizontal wipe.
    Wipe,
    /// Piston instance 0, 1 or 2.
    Piston(usize),
}

impl KeyBinding {
    /// Every binding in key-table order.
    pub const ALL: [KeyBinding; 8] = [
        KeyBinding::Flash(0),
        KeyBinding::Flash(1),
        KeyBinding::Flash(2),
        KeyBinding::Veil,
        KeyBinding::Wipe,
        KeyBinding::Piston(0),
        KeyBinding::Piston(1),
        KeyBinding::Piston(2),
    ];

    /// Resolve a key identifier. Keys are case-sensitive; anything unmapped yields `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "q" => Self::Flash(0),
            "a" => Self::Flash(1),
            "z" => Self::Flash(2),
            "s" => Self::Veil,
            "x" => Self::Wipe,
            "r" => Self::Piston(0),
            "f" => Self::Piston(1),
            "v" => Self::Piston(2),
            _ => return None,
        })
    }

    /// The key that triggers this binding, or `None` for a variant or instance outside the
    /// key table (such as `Flash(7)`).
    pub fn key(self) -> Option<&'static str> {
        Some(match self {
            Self::Flash(0) => "q",
            Self::Flash(1) => "a",
            Self::Flash(2) => "z",
            Self::Veil => "s",
            Self::Wipe => "x",
            Self::Piston(0) => "r",
            Self::Piston(1) => "f",
            Self::Piston(2) => "v",
            Self::Flash(_) | Self::Piston(_) => return None,
        })
    }
}

/// The full effect set and the key dispatcher in front of it.
#[derive(Debug)]
pub struct Animations {
    flash: Flash,
    veil: Wipe,
    wipe: Wipe,
    pistons: [Piston; PISTON_COUNT],
}

impl Animations {
    /// Build every effect against the context's current viewport.
    pub fn new(ctx: &mut FxContext) -> Self {
        let flash = Flash::new(ctx);
        let veil = Wipe::new(ctx, Axis::Y);
        let wipe = Wipe::new(ctx, Axis::X);
        let pistons = [
            Piston::new(ctx, 0),
            Piston::new(ctx, 1),
            Piston::new(ctx, 2),
        ];
        Self {
            flash,
            veil,
            wipe,
            pistons,
        }
    }

    /// Play whatever `key` is bound to. Unmapped keys do nothing and return `None`.
    pub fn play(&mut self, ctx: &mut FxContext, key: &str) -> Option<KeyBinding> {
        let Some(binding) = KeyBinding::from_key(key) else {
            tracing::trace!(key, "ignoring unmapped key");
            return None;
        };
        self.trigger(ctx, binding);
        Some(binding)
    }

    /// Play a resolved binding.
    pub fn trigger(&mut self, ctx: &mut FxContext, binding: KeyBinding) {
        match binding {
            KeyBinding::Flash(variant) => self.flash.play(ctx, variant),
            KeyBinding::Veil => self.veil.play(ctx),
            KeyBinding::Wipe => self.wipe.play(ctx),
            KeyBinding::Piston(i) => {
                if let Some(p) = self.pistons.get_mut(i) {
                    p.play(ctx);
                }
            }
        }
    }

    /// Hand a tween completion to the effect that owns it.
    pub fn route(&mut self, ctx: &mut FxContext, event: TweenEvent) {
        let TweenEvent::Completed { handle, owner } = event;
        if let Some(fx) = self.effects_mut().into_iter().find(|fx| fx.id() == owner) {
            fx.on_tween_complete(ctx, handle);
        }
    }

    /// Deliver one frame to every effect subscribed to the ticker.
    pub fn frame(&mut self, ctx: &mut FxContext) {
        for id in ctx.ticker.subscribers() {
            if let Some(fx) = self.effects_mut().into_iter().find(|fx| fx.id() == id) {
                fx.on_frame(ctx);
            }
        }
    }

    /// Whether every effect is idle.
    pub fn is_idle(&self) -> bool {
        self.flash.is_idle()
            && self.veil.is_idle()
            && self.wipe.is_idle()
            && self.pistons.iter().all(|p| p.is_idle())
    }

    fn effects_mut(&mut self) -> [&mut dyn Effect; 3 + PISTON_COUNT] {
        let [p0, p1, p2] = &mut self.pistons;
        [&mut self.flash, &mut self.veil, &mut self.wipe, p0, p1, p2]
    }

    /// The flash effect.
    pub fn flash(&self) -> &Flash {
        &self.flash
    }

    /// The vertical wipe.
    pub fn veil(&self) -> &Wipe {
        &self.veil
    }

    /// The horizontal wipe.
    pub fn wipe(&self) -> &Wipe {
        &self.wipe
    }

    /// Piston `index`, if it exists.
    pub fn piston(&self, index: usize) -> Option<&Piston> {
        self.pistons.get(index)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/dispatch.rs"]
mod tests;
