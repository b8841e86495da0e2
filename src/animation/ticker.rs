use crate::scene::context::EffectId;

/// Per-frame subscriber list. The session delivers one frame to every subscriber after the
/// tweens of that frame have run.
#[derive(Debug, Default)]
pub struct Ticker {
    subscribers: Vec<EffectId>,
}

impl Ticker {
    /// Create an empty ticker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `id`. Subscribing twice keeps a single entry.
    pub fn add(&mut self, id: EffectId) {
        if !self.subscribers.contains(&id) {
            self.subscribers.push(id);
        }
    }

    /// Unsubscribe `id`. No-op when it is not subscribed.
    pub fn remove(&mut self, id: EffectId) {
        self.subscribers.retain(|&s| s != id);
    }

    /// Whether `id` receives frames.
    pub fn contains(&self, id: EffectId) -> bool {
        self.subscribers.contains(&id)
    }

    /// Snapshot of the subscribers in subscription order.
    pub fn subscribers(&self) -> Vec<EffectId> {
        self.subscribers.clone()
    }

    /// Number of subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
