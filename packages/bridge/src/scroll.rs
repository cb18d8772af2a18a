/// Leaky-bucket limiter for the "scrolling up while far from the top" signal.
///
/// Each scroll sample that moves up while the offset is beyond the threshold
/// drains one unit of budget. When the budget is empty the signal fires and
/// the budget refills.
#[derive(Debug, Clone)]
pub struct ScrollMonitor {
    far_from_top: f64,
    capacity: u32,
    remaining: u32,
    last_offset: Option<f64>,
}

impl ScrollMonitor {
    pub fn new(far_from_top: f64, budget: u32) -> Self {
        let capacity = budget.max(1);
        Self {
            far_from_top,
            capacity,
            remaining: capacity,
            last_offset: None,
        }
    }

    /// Record a scroll sample. Returns `true` when the signal fires.
    pub fn record(&mut self, offset: f64) -> bool {
        let previous = self.last_offset.replace(offset);
        let scrolling_up = previous.is_some_and(|p| offset < p);

        if !scrolling_up || offset <= self.far_from_top {
            return false;
        }

        self.remaining -= 1;
        if self.remaining == 0 {
            self.remaining = self.capacity;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fired(monitor: &mut ScrollMonitor, offsets: impl IntoIterator<Item = f64>) -> usize {
        offsets
            .into_iter()
            .filter(|offset| monitor.record(*offset))
            .count()
    }

    #[test]
    fn test_fires_once_per_budget() {
        let mut monitor = ScrollMonitor::new(1000.0, 3);
        let offsets = (0..=7).map(|i| 5000.0 - f64::from(i) * 10.0);

        // The first sample has no direction; the next seven drain 3 + 3 + 1.
        assert_eq!(fired(&mut monitor, offsets), 2);
    }

    #[test]
    fn test_scrolling_down_never_fires() {
        let mut monitor = ScrollMonitor::new(1000.0, 1);
        let offsets = (0..20).map(|i| 2000.0 + f64::from(i) * 10.0);
        assert_eq!(fired(&mut monitor, offsets), 0);
    }

    #[test]
    fn test_near_top_never_fires() {
        let mut monitor = ScrollMonitor::new(1000.0, 1);
        let offsets = (0..20).map(|i| 900.0 - f64::from(i) * 10.0);
        assert_eq!(fired(&mut monitor, offsets), 0);
    }

    #[test]
    fn test_zero_budget_fires_on_every_counted_sample() {
        let mut monitor = ScrollMonitor::new(0.0, 0);
        assert!(!monitor.record(300.0));
        assert!(monitor.record(200.0));
        assert!(monitor.record(100.0));
    }
}
