use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic millisecond timestamps for cooldowns
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Milliseconds since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to, for driving the game from tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

impl<C: Clock> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Caps the loop to a fixed number of frames per second
pub struct FramePacer {
    frame: Duration,
    last_frame: Instant,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            last_frame: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Sleeps until the next frame boundary and returns the time the
    /// whole frame took, sleep included
    pub fn wait(&mut self) -> Duration {
        let busy = self.last_frame.elapsed();
        if busy < self.frame {
            std::thread::sleep(self.frame - busy);
        }
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame);
        self.last_frame = now;
        frame_time
    }

    /// Forgets time spent outside the loop, e.g. while blocked on the game over screen
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
    }
}
