use serde::{Deserialize, Serialize};

/// Uniformly binned 1D histogram over `[lo, hi)`.
///
/// Labelled histograms use one unit-wide bin per label centred on
/// `1, 2, ..., n`, so a label increment and a fill at the bin centre land in
/// the same place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Histogram1D {
    pub name: String,
    pub lo: f64,
    pub hi: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    pub counts: Vec<f64>,
    pub underflow: f64,
    pub overflow: f64,
    pub entries: u64,
}

impl Histogram1D {
    pub fn new(name: impl Into<String>, n_bins: usize, lo: f64, hi: f64) -> Self {
        Self {
            name: name.into(),
            lo,
            hi,
            labels: Vec::new(),
            counts: vec![0.0; n_bins],
            underflow: 0.0,
            overflow: 0.0,
            entries: 0,
        }
    }

    pub fn labelled<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let n = labels.len();
        let mut hist = Self::new(name, n, 0.5, n as f64 + 0.5);
        hist.labels = labels;
        hist
    }

    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    pub fn fill(&mut self, x: f64) {
        self.fill_weighted(x, 1.0);
    }

    pub fn fill_weighted(&mut self, x: f64, weight: f64) {
        self.entries += 1;
        if x.is_nan() || x < self.lo {
            self.underflow += weight;
            return;
        }
        if x >= self.hi || self.counts.is_empty() {
            self.overflow += weight;
            return;
        }
        let width = (self.hi - self.lo) / self.n_bins() as f64;
        let bin = (((x - self.lo) / width) as usize).min(self.n_bins() - 1);
        self.counts[bin] += weight;
    }

    /// Adds one to the bin carrying `label`. Returns `false` for unknown labels.
    pub fn increment(&mut self, label: &str) -> bool {
        match self.labels.iter().position(|l| l == label) {
            Some(bin) => {
                self.counts[bin] += 1.0;
                self.entries += 1;
                true
            }
            None => false,
        }
    }

    pub fn bin_content(&self, bin: usize) -> Option<f64> {
        self.counts.get(bin).copied()
    }

    pub fn label_content(&self, label: &str) -> Option<f64> {
        let bin = self.labels.iter().position(|l| l == label)?;
        self.bin_content(bin)
    }

    pub fn integral(&self) -> f64 {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_routes_to_bins_and_flows() {
        let mut h = Histogram1D::new("h_test", 4, 0.0, 4.0);
        h.fill(0.0);
        h.fill(3.99);
        h.fill(-0.1);
        h.fill(4.0);
        assert_eq!(h.counts, vec![1.0, 0.0, 0.0, 1.0]);
        assert_eq!(h.underflow, 1.0);
        assert_eq!(h.overflow, 1.0);
        assert_eq!(h.entries, 4);
    }

    #[test]
    fn labelled_bins_line_up_with_integer_fills() {
        let mut h = Histogram1D::labelled("h_counts", ["a", "b", "c"]);
        assert!(h.increment("b"));
        h.fill(3.0);
        assert!(!h.increment("d"));
        assert_eq!(h.label_content("b"), Some(1.0));
        assert_eq!(h.label_content("c"), Some(1.0));
        assert_eq!(h.label_content("a"), Some(0.0));
        assert_eq!(h.integral(), 2.0);
    }
}
