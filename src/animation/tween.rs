use crate::animation::ease::Ease;
use crate::scene::context::EffectId;
use crate::scene::stage::{Prop, Stage};

// Absorbs accumulated `dt` rounding so a 0.5 s tween at 30 fps ends on frame 15.
const FINISH_EPSILON_SECS: f64 = 1e-9;

/// Opaque id of a running tween or delayed call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenHandle(u64);

/// Emitted by [`Tweener::tick`] when a job runs to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenEvent {
    /// The job identified by `handle` finished. Killed jobs never report.
    Completed {
        /// Finished job.
        handle: TweenHandle,
        /// Effect that scheduled the job.
        owner: EffectId,
    },
}

#[derive(Clone, Debug)]
enum JobKind {
    Tween {
        prop: Prop,
        from: f64,
        to: f64,
        ease: Ease,
    },
    Delay,
}

#[derive(Clone, Debug)]
struct Job {
    handle: TweenHandle,
    owner: EffectId,
    duration: f64,
    elapsed: f64,
    kind: JobKind,
}

impl Job {
    fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    fn is_finished(&self) -> bool {
        self.elapsed + FINISH_EPSILON_SECS >= self.duration
    }
}

/// Drives numeric stage properties over time and schedules delayed calls.
///
/// Jobs advance only through [`Tweener::tick`]; a job created while handling the events of a
/// tick starts advancing on the next tick.
#[derive(Debug, Default)]
pub struct Tweener {
    jobs: Vec<Job>,
    next_handle: u64,
}

fn sanitize_duration(secs: f64) -> f64 {
    if secs.is_finite() { secs.max(0.0) } else { 0.0 }
}

impl Tweener {
    /// Create an empty tweener.
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> TweenHandle {
        let h = TweenHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    /// Animate `prop` from its current stage value to `target` over `duration` seconds.
    pub fn to(
        &mut self,
        stage: &Stage,
        owner: EffectId,
        prop: Prop,
        target: f64,
        duration: f64,
        ease: Ease,
    ) -> TweenHandle {
        let handle = self.alloc();
        self.jobs.push(Job {
            handle,
            owner,
            duration: sanitize_duration(duration),
            elapsed: 0.0,
            kind: JobKind::Tween {
                prop,
                from: stage.get(prop),
                to: target,
                ease,
            },
        });
        handle
    }

    /// Report completion after `delay` seconds without touching the stage.
    pub fn delayed_call(&mut self, owner: EffectId, delay: f64) -> TweenHandle {
        let handle = self.alloc();
        self.jobs.push(Job {
            handle,
            owner,
            duration: sanitize_duration(delay),
            elapsed: 0.0,
            kind: JobKind::Delay,
        });
        handle
    }

    /// Abort a job without reporting completion. Returns `false` if it was not running.
    pub fn kill(&mut self, handle: TweenHandle) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|j| j.handle != handle);
        self.jobs.len() != before
    }

    /// Whether `handle` is still running.
    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.jobs.iter().any(|j| j.handle == handle)
    }

    /// Number of running tweens writing to `prop`.
    pub fn drivers_of(&self, prop: Prop) -> usize {
        self.jobs
            .iter()
            .filter(|j| matches!(j.kind, JobKind::Tween { prop: p, .. } if p == prop))
            .count()
    }

    /// Number of running jobs owned by `owner`.
    pub fn jobs_of(&self, owner: EffectId) -> usize {
        self.jobs.iter().filter(|j| j.owner == owner).count()
    }

    /// Number of running jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether no job is running.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Advance every job by `dt` seconds, write eased values, and report finished jobs in
    /// creation order.
    pub fn tick(&mut self, stage: &mut Stage, dt: f64) -> Vec<TweenEvent> {
        let dt = sanitize_duration(dt);
        let mut events = Vec::new();
        for job in &mut self.jobs {
            job.elapsed += dt;
            let finished = job.is_finished();
            if let JobKind::Tween {
                prop,
                from,
                to,
                ease,
            } = job.kind
            {
                let value = if finished {
                    to
                } else {
                    from + (to - from) * ease.apply(job.progress())
                };
                stage.set(prop, value);
            }
            if finished {
                events.push(TweenEvent::Completed {
                    handle: job.handle,
                    owner: job.owner,
                });
            }
        }
        self.jobs.retain(|j| !j.is_finished());
        events
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
