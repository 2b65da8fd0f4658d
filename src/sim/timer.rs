//! Countdown / repeat timers
//!
//! A timer fires at most once per `update`, however large `dt` is. Long stalls
//! under-fire instead of replaying a burst of callbacks.

/// A named timer that yields `action` each time its duration elapses
#[derive(Debug, Clone)]
pub struct Timer<A> {
    pub name: String,
    /// Seconds between firings
    pub duration: f32,
    /// Firings before the timer is done (0 = forever)
    pub num_repeats: u32,
    pub execution_count: u32,
    pub elapsed: f32,
    pub done: bool,
    action: A,
}

impl<A: Clone> Timer<A> {
    pub fn new(name: &str, duration: f32, num_repeats: u32, action: A) -> Self {
        Self {
            name: name.to_string(),
            duration,
            num_repeats,
            execution_count: 0,
            elapsed: 0.0,
            done: false,
            action,
        }
    }

    /// Advance by `dt`; returns the action if the threshold was crossed
    pub fn update(&mut self, dt: f32) -> Option<A> {
        self.elapsed += dt;
        if self.elapsed < self.duration {
            return None;
        }
        self.execution_count += 1;
        if self.num_repeats > 0 && self.execution_count >= self.num_repeats {
            self.stop();
        }
        self.elapsed = 0.0;
        Some(self.action.clone())
    }

    pub fn stop(&mut self) {
        self.done = true;
    }
}

/// Timers keyed by name, advanced in registration order
#[derive(Debug, Clone)]
pub struct Timers<A> {
    timers: Vec<Timer<A>>,
}

impl<A> Default for Timers<A> {
    fn default() -> Self {
        Self { timers: Vec::new() }
    }
}

impl<A: Clone> Timers<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a timer, replacing any timer with the same name in place
    pub fn add(&mut self, name: &str, duration: f32, num_repeats: u32, action: A) {
        let timer = Timer::new(name, duration, num_repeats, action);
        match self.timers.iter_mut().find(|t| t.name == name) {
            Some(existing) => *existing = timer,
            None => self.timers.push(timer),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Timer<A>> {
        self.timers.iter().find(|t| t.name == name)
    }

    /// Mark a timer done; unknown names are ignored
    pub fn stop(&mut self, name: &str) {
        if let Some(timer) = self.timers.iter_mut().find(|t| t.name == name) {
            timer.stop();
        }
    }

    /// Advance every live timer, collecting fired actions in order.
    /// Done timers are skipped.
    pub fn update(&mut self, dt: f32) -> Vec<A> {
        self.timers
            .iter_mut()
            .filter(|t| !t.done)
            .filter_map(|t| t.update(dt))
            .collect()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fires_once_per_update_on_stall() {
        let mut timer = Timer::new("t", 1.0, 0, ());
        // A 5 second stall only fires once
        assert!(timer.update(5.0).is_some());
        assert_eq!(timer.execution_count, 1);
        assert_eq!(timer.elapsed, 0.0);
        assert!(timer.update(0.5).is_none());
    }

    #[test]
    fn test_repeat_count_marks_done() {
        let mut timer = Timer::new("t", 1.0, 2, 7u32);
        assert_eq!(timer.update(1.0), Some(7));
        assert!(!timer.done);
        assert_eq!(timer.update(1.0), Some(7));
        assert!(timer.done);
    }

    #[test]
    fn test_stop_does_not_reset_counters() {
        let mut timer = Timer::new("t", 1.0, 0, ());
        timer.update(0.4);
        timer.stop();
        assert!(timer.done);
        assert!((timer.elapsed - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_add_overwrites_in_place() {
        let mut timers = Timers::new();
        timers.add("a", 1.0, 0, 'a');
        timers.add("b", 1.0, 0, 'b');
        timers.update(0.5);
        timers.add("a", 2.0, 0, 'x');
        assert_eq!(timers.len(), 2);
        let a = timers.get("a").unwrap();
        assert_eq!(a.duration, 2.0);
        assert_eq!(a.elapsed, 0.0);
        // Registration order is kept
        assert_eq!(timers.update(2.0), vec!['x', 'b']);
    }

    #[test]
    fn test_done_timers_are_skipped() {
        let mut timers = Timers::new();
        timers.add("once", 1.0, 1, 1);
        timers.add("forever", 1.0, 0, 2);
        assert_eq!(timers.update(1.0), vec![1, 2]);
        assert_eq!(timers.update(1.0), vec![2]);
        timers.stop("forever");
        timers.stop("missing");
        assert!(timers.update(1.0).is_empty());
        // Stopped timers stay registered
        assert_eq!(timers.len(), 2);
        assert!(timers.get("forever").unwrap().done);
    }

    proptest! {
        #[test]
        fn prop_one_duration_fires_exactly_once(
            steps in prop::collection::vec(1u32..100, 1..20)
        ) {
            // Split one duration into exact binary-fraction steps
            let total: u32 = steps.iter().sum();
            let duration = total as f32 / 64.0;
            let mut timer = Timer::new("t", duration, 0, ());
            let mut fired = 0;
            for step in &steps {
                if timer.update(*step as f32 / 64.0).is_some() {
                    fired += 1;
                }
            }
            prop_assert_eq!(fired, 1);
            prop_assert_eq!(timer.elapsed, 0.0);
        }
    }
}
