/// Counter animation for the KPI strip.
///
/// A counter counts up from 0 to its target over a fixed duration with a cubic
/// ease-out. Animations never block recomputation: the caller drives them with
/// `tick` from its frame loop, and starting a counter that is already running
/// replaces the running animation.

use crate::present::{KpiCounter, KpiId};
use std::time::{Duration, Instant};

/// Default time a counter takes to reach its target.
pub const COUNTER_DURATION: Duration = Duration::from_millis(600);

/// Cubic ease-out over `progress` in [0, 1].
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Displayed state of one counter at a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterFrame {
    pub id: KpiId,
    pub value: f64,
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Clone)]
struct Animation {
    counter: KpiCounter,
    started: Instant,
}

/// Running counter animations, at most one per KPI.
#[derive(Debug, Clone)]
pub struct CounterAnimator {
    duration: Duration,
    running: Vec<Animation>,
}

impl Default for CounterAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterAnimator {
    pub fn new() -> Self {
        Self::with_duration(COUNTER_DURATION)
    }

    pub fn with_duration(duration: Duration) -> Self {
        CounterAnimator {
            duration,
            running: Vec::new(),
        }
    }

    /// Start animating `counter`, replacing any animation of the same KPI.
    pub fn start(&mut self, counter: KpiCounter, now: Instant) {
        let animation = Animation { counter, started: now };
        match self.running.iter_mut().find(|a| a.counter.id == counter.id) {
            Some(existing) => *existing = animation,
            None => self.running.push(animation),
        }
    }

    pub fn start_all(&mut self, counters: &[KpiCounter], now: Instant) {
        for counter in counters {
            self.start(*counter, now);
        }
    }

    /// Number of animations still running.
    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Advance every animation to `now`. Finished animations report their final
    /// text once and are dropped.
    pub fn tick(&mut self, now: Instant) -> Vec<CounterFrame> {
        let duration = self.duration.as_secs_f64();
        let frames: Vec<CounterFrame> = self
            .running
            .iter()
            .map(|animation| {
                let elapsed = now.saturating_duration_since(animation.started).as_secs_f64();
                let progress = if duration > 0.0 {
                    (elapsed / duration).min(1.0)
                } else {
                    1.0
                };
                let counter = &animation.counter;
                let value = counter.target * ease_out_cubic(progress);
                CounterFrame {
                    id: counter.id,
                    value,
                    text: counter.display(value),
                    done: progress >= 1.0,
                }
            })
            .collect();

        self.running
            .retain(|a| !frames.iter().any(|f| f.done && f.id == a.counter.id));
        frames
    }
}
