// Chart series derived from one fetch of samples and peaks
use super::temperature::{PeakPoint, TemperatureSample};
use super::timestamp::instant_millis;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub temperatures: Vec<f64>,
    /// Positionally aligned with `labels`; `None` where no peak was reported.
    pub peak_overlay: Vec<Option<f64>>,
}

impl ChartSeries {
    /// Project samples in their given order and overlay the peak markers.
    pub fn build(samples: &[TemperatureSample], peaks: &[PeakPoint]) -> Self {
        let peak_index = index_peaks(peaks);

        let labels: Vec<String> = samples.iter().map(|s| s.timestamp.clone()).collect();
        let temperatures: Vec<f64> = samples.iter().map(|s| s.temperature).collect();
        let peak_overlay = labels
            .iter()
            .map(|label| instant_millis(label).and_then(|ms| peak_index.get(&ms).copied()))
            .collect();

        Self {
            labels,
            temperatures,
            peak_overlay,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn peak_count(&self) -> usize {
        self.peak_overlay.iter().filter(|v| v.is_some()).count()
    }
}

/// Index peaks by instant. The first entry for an instant wins.
fn index_peaks(peaks: &[PeakPoint]) -> HashMap<i64, f64> {
    let mut index = HashMap::with_capacity(peaks.len());
    for peak in peaks {
        match instant_millis(&peak.timestamp) {
            Some(ms) => {
                index.entry(ms).or_insert(peak.value);
            }
            None => {
                tracing::debug!("Ignoring peak with unparseable timestamp: {}", peak.timestamp);
            }
        }
    }
    index
}
