//! File/code adapted from https://github.com/jamjamjon/usls

use std::time::Duration;

/// Running per-stage duration totals.
#[derive(Debug, Default, Clone)]
pub struct TimeCalc {
    n: usize,
    duration: Vec<Duration>,
}

impl TimeCalc {
    /// Number of completed rounds, one round being a push to every stage.
    pub fn n(&self) -> usize {
        if self.duration.is_empty() {
            return 0;
        }
        self.n / self.duration.len()
    }

    pub fn avg_i(&self, i: usize) -> Option<Duration> {
        let n = self.n();
        if n == 0 {
            return None;
        }
        self.duration.get(i).map(|d| *d / n as u32)
    }

    pub fn add_or_push(&mut self, i: usize, x: Duration) {
        match self.duration.get_mut(i) {
            Some(elem) => *elem += x,
            None => {
                if i >= self.duration.len() {
                    self.duration.push(x)
                }
            }
        }
        self.n += 1;
    }
}
