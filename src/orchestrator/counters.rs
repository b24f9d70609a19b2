use serde::{Deserialize, Serialize};

pub const ALL_EVENTS: &str = "All events";
pub const NO_BACKGROUND: &str = "No background";
pub const BACKGROUND_FOUND: &str = "Background found";

/// Bin labels of every counter histogram, in bin order.
pub const COUNTER_LABELS: [&str; 3] = [ALL_EVENTS, NO_BACKGROUND, BACKGROUND_FOUND];

/// Monotonic seen / no-background / background tallies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictCounts {
    pub seen: u64,
    pub no_background: u64,
    pub background: u64,
}

impl VerdictCounts {
    pub fn record(&mut self, has_background: bool) {
        self.seen += 1;
        if has_background {
            self.background += 1;
        } else {
            self.no_background += 1;
        }
    }

    /// Labels of the bins a verdict increments.
    pub fn labels_for(has_background: bool) -> [&'static str; 2] {
        if has_background {
            [ALL_EVENTS, BACKGROUND_FOUND]
        } else {
            [ALL_EVENTS, NO_BACKGROUND]
        }
    }

    pub fn background_fraction(&self) -> f64 {
        if self.seen == 0 {
            0.0
        } else {
            self.background as f64 / self.seen as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_splits_by_verdict() {
        let mut counts = VerdictCounts::default();
        counts.record(true);
        counts.record(false);
        counts.record(false);
        assert_eq!(
            counts,
            VerdictCounts {
                seen: 3,
                no_background: 2,
                background: 1
            }
        );
        assert!((counts.background_fraction() - 1.0 / 3.0).abs() < 1e-12);
    }
}
