//! Tick scheduling for the simulation loop.
//!
//! The scheduler is an explicit Idle/Running state machine. Whether a
//! tick is due is a pure function of the `Instant`s passed in, which
//! lets the timing tests run on fabricated clocks instead of sleeps.
//! The simulation thread owns one `Scheduler` and is the only caller,
//! so ticks and manual edits are serialized by construction.

use std::time::{Duration, Instant};

/// Interval at speed 0, the slow end of the range
pub const MAX_TICK_INTERVAL: Duration = Duration::from_millis(1000);
/// Interval at speed 100, the fast end of the range
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Simulation lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    /// Ticks are firing
    Running,
    /// No tick fires until the next start
    Idle,
    /// The simulation thread has shut down
    Stopped,
}

impl Default for SimState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Clamp a requested speed into the supported `[0, 100]` range.
pub fn clamp_speed(speed: i32) -> u8 {
    speed.clamp(0, 100) as u8
}

/// Tick interval for a speed: `1000ms - speed * 9ms`, so speed 0 runs
/// one generation per second and speed 100 runs ten.
pub fn tick_interval(speed: u8) -> Duration {
    let speed = u64::from(speed.min(100));
    Duration::from_millis(1000 - speed * 9)
}

/// Decides when the next generation is due.
#[derive(Debug, Clone)]
pub struct Scheduler {
    state: SimState,
    speed: u8,
    last_tick: Option<Instant>,
}

impl Scheduler {
    /// New scheduler in `Idle`, with `speed` clamped into range.
    pub fn new(speed: i32) -> Self {
        Self {
            state: SimState::Idle,
            speed: clamp_speed(speed),
            last_tick: None,
        }
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimState::Running
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Interval between ticks at the current speed.
    pub fn interval(&self) -> Duration {
        tick_interval(self.speed)
    }

    /// Idle to Running. The first tick is due one full interval after
    /// `now`. Starting while already running is a no-op and must not
    /// re-arm the timer.
    pub fn start(&mut self, now: Instant) {
        if self.state == SimState::Running {
            return;
        }
        self.state = SimState::Running;
        self.last_tick = Some(now);
    }

    /// Running to Idle. Once this returns, no further tick fires until
    /// the next start. Pausing while idle is a no-op.
    pub fn pause(&mut self) {
        self.state = SimState::Idle;
        self.last_tick = None;
    }

    /// Change the cadence. Takes effect for the next scheduled tick;
    /// out-of-range values are clamped, not rejected.
    pub fn set_speed(&mut self, speed: i32) {
        self.speed = clamp_speed(speed);
    }

    /// True when a tick is due at `now`. Fires at most one tick per
    /// call and re-arms the timer at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state != SimState::Running {
            return false;
        }
        match self.last_tick {
            Some(last) if now.duration_since(last) >= self.interval() => {
                self.last_tick = Some(now);
                true
            }
            Some(_) => false,
            None => {
                // Running without an armed timer only happens if start
                // was never given a reference point; arm from here.
                self.last_tick = Some(now);
                false
            }
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_formula() {
        assert_eq!(tick_interval(0), Duration::from_millis(1000));
        assert_eq!(tick_interval(50), Duration::from_millis(550));
        assert_eq!(tick_interval(100), Duration::from_millis(100));
        assert_eq!(tick_interval(0), MAX_TICK_INTERVAL);
        assert_eq!(tick_interval(100), MIN_TICK_INTERVAL);
    }

    #[test]
    fn test_speed_clamps() {
        assert_eq!(clamp_speed(-10), 0);
        assert_eq!(clamp_speed(0), 0);
        assert_eq!(clamp_speed(73), 73);
        assert_eq!(clamp_speed(100), 100);
        assert_eq!(clamp_speed(250), 100);

        let sched = Scheduler::new(-5);
        assert_eq!(sched.speed(), 0);
        assert_eq!(sched.interval(), MAX_TICK_INTERVAL);

        let mut sched = Scheduler::new(200);
        assert_eq!(sched.speed(), 100);
        sched.set_speed(-1);
        assert_eq!(sched.interval(), MAX_TICK_INTERVAL);
    }

    #[test]
    fn test_new_scheduler_is_idle() {
        let mut sched = Scheduler::new(50);
        assert_eq!(sched.state(), SimState::Idle);
        assert!(!sched.is_running());
        // Idle never ticks, no matter how much time passes
        let t0 = Instant::now();
        assert!(!sched.poll(t0 + Duration::from_secs(3600)));
    }

    #[test]
    fn test_tick_fires_after_one_interval() {
        let t0 = Instant::now();
        let mut sched = Scheduler::new(100); // 100ms interval
        sched.start(t0);

        assert!(!sched.poll(t0));
        assert!(!sched.poll(t0 + Duration::from_millis(99)));
        assert!(sched.poll(t0 + Duration::from_millis(100)));
        // Just fired: nothing due again at the same instant
        assert!(!sched.poll(t0 + Duration::from_millis(100)));
        assert!(sched.poll(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn test_at_most_one_tick_per_poll() {
        let t0 = Instant::now();
        let mut sched = Scheduler::new(100);
        sched.start(t0);

        // Late poll covering many intervals still fires exactly once
        // and re-arms from the poll instant
        assert!(sched.poll(t0 + Duration::from_millis(950)));
        assert!(!sched.poll(t0 + Duration::from_millis(1000)));
        assert!(sched.poll(t0 + Duration::from_millis(1050)));
    }

    #[test]
    fn test_start_while_running_does_not_rearm() {
        let t0 = Instant::now();
        let mut sched = Scheduler::new(100);
        sched.start(t0);
        // A second start must not push the first tick out
        sched.start(t0 + Duration::from_millis(60));
        assert!(sched.poll(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_pause_cancels_pending_tick() {
        let t0 = Instant::now();
        let mut sched = Scheduler::new(100);
        sched.start(t0);
        sched.pause();

        assert_eq!(sched.state(), SimState::Idle);
        assert!(!sched.poll(t0 + Duration::from_secs(10)));

        // Restart measures a full interval from the new reference
        let t1 = t0 + Duration::from_secs(20);
        sched.start(t1);
        assert!(!sched.poll(t1 + Duration::from_millis(99)));
        assert!(sched.poll(t1 + Duration::from_millis(100)));
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut sched = Scheduler::new(50);
        sched.pause();
        assert_eq!(sched.state(), SimState::Idle);
        sched.pause();
        assert_eq!(sched.state(), SimState::Idle);
    }

    #[test]
    fn test_speed_change_applies_to_next_tick() {
        let t0 = Instant::now();
        let mut sched = Scheduler::new(0); // 1000ms interval
        sched.start(t0);

        sched.set_speed(100); // 100ms from now on
        assert!(!sched.poll(t0 + Duration::from_millis(99)));
        assert!(sched.poll(t0 + Duration::from_millis(100)));

        // And back down: the next tick waits for the long interval
        sched.set_speed(0);
        assert!(!sched.poll(t0 + Duration::from_millis(600)));
        assert!(sched.poll(t0 + Duration::from_millis(1100)));
    }

    #[test]
    fn test_speed_change_while_idle() {
        let mut sched = Scheduler::new(50);
        sched.set_speed(90);
        assert_eq!(sched.speed(), 90);
        assert_eq!(sched.state(), SimState::Idle);
        // Still idle: no tick
        assert!(!sched.poll(Instant::now() + Duration::from_secs(5)));
    }

    #[test]
    fn test_default_state() {
        assert_eq!(SimState::default(), SimState::Idle);
        assert_eq!(Scheduler::default().speed(), 50);
    }
}
