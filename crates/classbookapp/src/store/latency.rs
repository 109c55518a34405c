use async_trait::async_trait;
use std::time::Duration;

/// The kind of store call being paced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Get,
    Query,
    Range,
    Create,
    Update,
    Delete,
}

/// Source of the delay every store call awaits before touching its records.
///
/// Injected into each [`EntityStore`](super::EntityStore) so production wiring can
/// mimic a remote service while tests resolve immediately.
#[async_trait]
pub trait Latency: Send + Sync {
    async fn pause(&self, op: Op);
}

/// Resolves immediately. Use in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn pause(&self, _op: Op) {}
}

/// Largest accepted multiplier; higher scales are clamped to it.
pub const MAX_SCALE: f64 = 100.0;

/// Sleeps a fixed, per-operation delay in the 200-400ms range, times `scale`.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedLatency {
    scale: f64,
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl SimulatedLatency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negative or non-finite scales are treated as zero, large ones capped at
    /// [`MAX_SCALE`].
    pub fn scaled(scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale.min(MAX_SCALE)
        } else {
            0.0
        };
        Self { scale }
    }

    pub fn delay_for(&self, op: Op) -> Duration {
        let base_ms: u64 = match op {
            Op::Get => 200,
            Op::Query => 250,
            Op::List | Op::Range | Op::Delete => 300,
            Op::Update => 350,
            Op::Create => 400,
        };
        Duration::from_millis(base_ms).mul_f64(self.scale)
    }
}

#[async_trait]
impl Latency for SimulatedLatency {
    async fn pause(&self, op: Op) {
        let delay = self.delay_for(op);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
