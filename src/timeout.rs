use std::time::{Duration, Instant};

/// Polled by long running computations between units of work.
pub trait Stopper {
    fn init(&mut self) {}
    fn stop(&mut self) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NeverStop;

impl Stopper for NeverStop {
    fn stop(&mut self) -> bool {
        false
    }
}

/// Wall-clock budget, measured from the last call to `init`.
#[derive(Clone, Copy, Debug)]
pub struct Timer {
    start: Instant,
    duration: Duration,
}

impl Timer {
    pub fn new(duration: Duration) -> Self {
        Self {
            start: Instant::now(),
            duration,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Stopper for Timer {
    fn init(&mut self) {
        self.start = Instant::now();
    }

    fn stop(&mut self) -> bool {
        self.start.elapsed() >= self.duration
    }
}

pub fn stopper_for(time_limit: Option<Duration>) -> Box<dyn Stopper> {
    match time_limit {
        Some(duration) => Box::new(Timer::new(duration)),
        None => Box::new(NeverStop),
    }
}

#[cfg(test)]
mod tests {
    use crate::timeout::{stopper_for, NeverStop, Stopper, Timer};
    use std::time::Duration;

    #[test]
    fn never_stop() {
        let mut stopper = NeverStop;
        stopper.init();
        assert!(!stopper.stop());
    }

    #[test]
    fn zero_budget_stops_immediately() {
        let mut timer = Timer::new(Duration::from_secs(0));
        timer.init();
        assert!(timer.stop());
    }

    #[test]
    fn generous_budget_keeps_running() {
        let mut stopper = stopper_for(Some(Duration::from_secs(3600)));
        stopper.init();
        assert!(!stopper.stop());
        assert!(!stopper_for(None).stop());
    }
}
