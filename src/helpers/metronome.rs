use std::time::{Duration, Instant};

/// Paces the fixed-period tick loop. Rather than sleeping, the engine asks how long is left in
/// the current tick and spends that time serving requests, then calls finish_tick().
pub struct Metronome {
    /// When the current tick was scheduled to begin. While the engine keeps up this advances by
    /// exactly target_tick each tick (no drift). When a tick overruns it is re-anchored to the
    /// real time instead of trying to catch up.
    tick_start: Instant,
    /// The preferred amount of total time each tick should take (seconds)
    target_tick: f64,
    /// Every tick waits at least this long, even if it ran over budget (seconds). Leaves clients
    /// room for a roundtrip when the simulation is struggling.
    min_sleep: f64,
}

impl Default for Metronome {
    fn default() -> Self {
        Self {
            tick_start: Instant::now(),
            target_tick: 0.0,
            min_sleep: 0.0,
        }
    }
}

impl Metronome {
    pub fn new(target_tick: f64, min_sleep: f64) -> Self {
        let mut metronome = Self::default();
        metronome.set_params(target_tick, min_sleep);
        metronome
    }

    pub fn set_params(&mut self, target_tick: f64, min_sleep: f64) {
        assert!(target_tick >= 0.0);
        assert!(min_sleep >= 0.0);
        self.target_tick = target_tick;
        self.min_sleep = min_sleep;
    }

    /// Time left before the next tick should start. Never negative: an overrun tick yields
    /// min_sleep (zero by default) so the next tick follows immediately.
    pub fn remaining(&self) -> Duration {
        let elapsed = self.tick_start.elapsed().as_secs_f64();
        let remaining = self.target_tick - elapsed;
        Duration::from_secs_f64(remaining.max(self.min_sleep))
    }

    /// Called once the remaining time has been used up. Schedules the next tick.
    pub fn finish_tick(&mut self) {
        let elapsed = self.tick_start.elapsed().as_secs_f64();
        if elapsed <= self.target_tick + self.min_sleep + 0.001 && self.target_tick >= self.min_sleep
        {
            self.tick_start += Duration::from_secs_f64(self.target_tick);
        } else {
            trace!(
                "tick took {:?}, budget is {:?}",
                Duration::from_secs_f64(elapsed),
                Duration::from_secs_f64(self.target_tick)
            );
            self.tick_start = Instant::now();
        }
    }

    /// Blocks for the remainder of the tick
    #[cfg(test)]
    pub fn sleep(&mut self) {
        let remaining = self.remaining();
        if remaining > Duration::from_secs(0) {
            std::thread::sleep(remaining);
        }
        self.finish_tick();
    }
}
