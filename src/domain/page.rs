// Page model: the summary text element and the single chart element
use super::chart::ChartSeries;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const SUMMARY_ELEMENT_ID: &str = "accumulated-temperature";
pub const CHART_ELEMENT_ID: &str = "temperature-chart";

/// A constructed chart. Counted as live until destroyed or dropped.
#[derive(Debug)]
pub struct ChartInstance {
    generation: u64,
    series: ChartSeries,
    svg: String,
    live: Arc<AtomicUsize>,
}

impl ChartInstance {
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn destroy(self) {
        tracing::debug!("Destroying chart instance #{}", self.generation);
    }
}

impl Drop for ChartInstance {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct Page {
    summary_text: String,
    notice: Option<String>,
    chart: Option<ChartInstance>,
    live_charts: Arc<AtomicUsize>,
    generations: u64,
}

impl Page {
    pub fn new(summary_text: impl Into<String>) -> Self {
        Self {
            summary_text: summary_text.into(),
            notice: None,
            chart: None,
            live_charts: Arc::new(AtomicUsize::new(0)),
            generations: 0,
        }
    }

    pub fn set_summary_text(&mut self, text: impl Into<String>) {
        self.summary_text = text.into();
    }

    pub fn set_notice(&mut self, notice: Option<String>) {
        self.notice = notice;
    }

    pub fn chart(&self) -> Option<&ChartInstance> {
        self.chart.as_ref()
    }

    /// Destroy the current chart, if any, then install a new one.
    pub fn replace_chart(&mut self, series: ChartSeries, svg: String) -> u64 {
        if let Some(previous) = self.chart.take() {
            previous.destroy();
        }

        self.generations += 1;
        self.live_charts.fetch_add(1, Ordering::SeqCst);
        self.chart = Some(ChartInstance {
            generation: self.generations,
            series,
            svg,
            live: self.live_charts.clone(),
        });
        self.generations
    }

    pub fn active_charts(&self) -> usize {
        self.live_charts.load(Ordering::SeqCst)
    }

    pub fn view(&self) -> PageView {
        PageView {
            summary_text: self.summary_text.clone(),
            notice: self.notice.clone(),
            chart_generation: self.chart.as_ref().map(|c| c.generation),
            points: self.chart.as_ref().map(|c| c.series.len()).unwrap_or(0),
            peaks: self.chart.as_ref().map(|c| c.series.peak_count()).unwrap_or(0),
            active_charts: self.active_charts(),
        }
    }
}

/// Serializable snapshot of the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub summary_text: String,
    pub notice: Option<String>,
    pub chart_generation: Option<u64>,
    pub points: usize,
    pub peaks: usize,
    pub active_charts: usize,
}
