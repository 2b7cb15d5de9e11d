use std::future::Future;
use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior};

use crate::config::DriverConfig;

/// A clock that tells an [`IncrementalHandle`](crate::IncrementalHandle)
/// when to take the next step.
///
/// The handle awaits `next_tick` before every step, so the source alone
/// decides the pacing: a fixed-period timer, a frame callback bridged
/// through a channel, or a plain task yield.
pub trait TickSource: Send + 'static {
    fn next_tick(&mut self) -> impl Future<Output = ()> + Send;
}

/// Fixed-period ticks on the tokio timer.
///
/// Missed ticks are delayed rather than bursted, so a slow consumer never
/// sees several steps land back to back.
#[derive(Debug)]
pub struct IntervalTicks {
    interval: Interval,
}

impl IntervalTicks {
    /// Ticks every `period`. The first tick completes immediately.
    ///
    /// Must be called from inside a tokio runtime.
    ///
    /// # Panics
    ///
    /// If `period` is zero. Use [`YieldTicks`] for that, or go through
    /// [`ConfiguredTicks::from_config`], which picks it automatically.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

impl TickSource for IntervalTicks {
    fn next_tick(&mut self) -> impl Future<Output = ()> + Send {
        async move {
            self.interval.tick().await;
        }
    }
}

/// Tick as fast as possible, yielding to the scheduler between steps.
#[derive(Clone, Copy, Debug, Default)]
pub struct YieldTicks;

impl TickSource for YieldTicks {
    fn next_tick(&mut self) -> impl Future<Output = ()> + Send {
        tokio::task::yield_now()
    }
}

/// The tick source a [`DriverConfig`] asks for.
#[derive(Debug)]
pub enum ConfiguredTicks {
    Interval(IntervalTicks),
    Yield(YieldTicks),
}

impl ConfiguredTicks {
    /// Interval ticks for a non-zero `tick_interval`, yield ticks otherwise.
    #[must_use]
    pub fn from_config(config: &DriverConfig) -> Self {
        if config.tick_interval.is_zero() {
            Self::Yield(YieldTicks)
        } else {
            Self::Interval(IntervalTicks::new(config.tick_interval))
        }
    }
}

impl TickSource for ConfiguredTicks {
    fn next_tick(&mut self) -> impl Future<Output = ()> + Send {
        async move {
            match self {
                Self::Interval(ticks) => ticks.next_tick().await,
                Self::Yield(ticks) => ticks.next_tick().await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseMode;

    #[tokio::test]
    async fn zero_interval_selects_yield_ticks() {
        let ticks = ConfiguredTicks::from_config(&DriverConfig::default());
        assert!(matches!(ticks, ConfiguredTicks::Yield(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn interval_ticks_follow_the_period() {
        let config = DriverConfig {
            mode: ParseMode::Incremental,
            tick_interval: Duration::from_millis(50),
        };
        let mut ticks = ConfiguredTicks::from_config(&config);
        assert!(matches!(ticks, ConfiguredTicks::Interval(_)));

        let start = tokio::time::Instant::now();
        ticks.next_tick().await;
        ticks.next_tick().await;
        ticks.next_tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(100));
    }
}
