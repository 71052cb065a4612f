// Chart service - Use case for loading and redrawing the temperature page
use crate::application::temperature_source::TemperatureSource;
use crate::domain::chart::ChartSeries;
use crate::domain::page::{Page, PageView};
use crate::error::ChartError;
use crate::infrastructure::config::ChartSettings;
use crate::infrastructure::svg_renderer::SvgChartRenderer;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct ChartService {
    source: Arc<dyn TemperatureSource>,
    renderer: SvgChartRenderer,
    settings: ChartSettings,
    page: Arc<RwLock<Page>>,
}

impl ChartService {
    pub fn new(
        source: Arc<dyn TemperatureSource>,
        renderer: SvgChartRenderer,
        settings: ChartSettings,
    ) -> Self {
        let page = Page::new(settings.loading_text.clone());
        Self {
            source,
            renderer,
            settings,
            page: Arc::new(RwLock::new(page)),
        }
    }

    /// Fetch both endpoints, then redraw the chart and the summary.
    ///
    /// On failure the summary shows the fixed failure text and the previous
    /// chart, if any, stays in place. The error is returned for the caller's
    /// status code only; it has already been logged.
    pub async fn fetch_and_render(&self) -> Result<PageView, ChartError> {
        match self.load().await {
            Ok(view) => Ok(view),
            Err(e) => {
                tracing::error!(
                    endpoint = ?e.endpoint(),
                    "Failed to load temperature chart: {}",
                    e
                );
                self.show_failure().await;
                Err(e)
            }
        }
    }

    /// Clear upstream readings and redraw.
    pub async fn reset(&self) -> Result<PageView, ChartError> {
        if let Err(e) = self.source.reset().await {
            tracing::error!(
                endpoint = ?e.endpoint(),
                "Failed to reset temperature data: {}",
                e
            );
            self.show_failure().await;
            return Err(e);
        }

        tracing::info!("Upstream temperature data reset");
        self.fetch_and_render().await
    }

    pub fn title(&self) -> &str {
        &self.settings.title
    }

    pub async fn view(&self) -> PageView {
        self.page.read().await.view()
    }

    /// View and chart SVG read under one lock, so both belong to the same load.
    pub async fn snapshot(&self) -> (PageView, Option<String>) {
        let page = self.page.read().await;
        let svg = page.chart().map(|chart| chart.svg().to_string());
        (page.view(), svg)
    }

    pub async fn current_svg(&self) -> Option<String> {
        self.page
            .read()
            .await
            .chart()
            .map(|chart| chart.svg().to_string())
    }

    /// Fixed failure text; the chart is untouched and no notice is shown.
    async fn show_failure(&self) {
        let mut page = self.page.write().await;
        page.set_summary_text(self.settings.failure_text.clone());
        page.set_notice(None);
    }

    async fn load(&self) -> Result<PageView, ChartError> {
        // The accumulation request starts only after the temperature one resolves.
        let samples = self.source.fetch_temperatures().await?;
        let summary = self.source.fetch_accumulation().await?;

        let series = ChartSeries::build(&samples, &summary.max_points);
        if series.is_empty() {
            tracing::warn!("Upstream returned no temperature readings");
        }
        let svg = self.renderer.render(&series)?;

        let accumulated = summary.accumulative_temperature;
        let notice = self.settings.threshold_notice(accumulated);
        if let Some(notice) = &notice {
            tracing::warn!("{}", notice);
        }

        tracing::debug!(
            "Rendering {} points with {} peaks, accumulated {:.2}",
            series.len(),
            series.peak_count(),
            accumulated
        );

        let mut page = self.page.write().await;
        let generation = page.replace_chart(series, svg);
        page.set_summary_text(self.settings.summary_text(accumulated));
        page.set_notice(notice);
        tracing::info!("Chart #{} rendered", generation);

        Ok(page.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::temperature::{AccumulationSummary, PeakPoint, TemperatureSample};
    use crate::error::Endpoint;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeSource {
        samples: Mutex<Vec<TemperatureSample>>,
        summary: AccumulationSummary,
        temperature_status: Mutex<Option<u16>>,
        accumulation_status: Mutex<Option<u16>>,
        reset_status: Mutex<Option<u16>>,
        accumulation_calls: AtomicUsize,
        resets: AtomicUsize,
    }

    impl FakeSource {
        fn new(accumulated: f64) -> Self {
            Self {
                samples: Mutex::new(vec![
                    TemperatureSample::new("2024-05-01  12:00:00", 20.0),
                    TemperatureSample::new("2024-05-01  12:00:30", 22.5),
                    TemperatureSample::new("2024-05-01  12:01:00", 21.0),
                ]),
                summary: AccumulationSummary {
                    accumulative_temperature: accumulated,
                    max_points: vec![PeakPoint::new("2024-05-01T12:00:30", 22.5)],
                },
                temperature_status: Mutex::new(None),
                accumulation_status: Mutex::new(None),
                reset_status: Mutex::new(None),
                accumulation_calls: AtomicUsize::new(0),
                resets: AtomicUsize::new(0),
            }
        }

        fn fail_temperature(&self, status: Option<u16>) {
            *self.temperature_status.lock().unwrap() = status;
        }

        fn fail_accumulation(&self, status: Option<u16>) {
            *self.accumulation_status.lock().unwrap() = status;
        }

        fn set_samples(&self, samples: Vec<TemperatureSample>) {
            *self.samples.lock().unwrap() = samples;
        }
    }

    #[async_trait]
    impl TemperatureSource for FakeSource {
        async fn fetch_temperatures(&self) -> Result<Vec<TemperatureSample>, ChartError> {
            match *self.temperature_status.lock().unwrap() {
                Some(status) => Err(ChartError::Fetch {
                    kind: Endpoint::Temperature,
                    status,
                }),
                None => Ok(self.samples.lock().unwrap().clone()),
            }
        }

        async fn fetch_accumulation(&self) -> Result<AccumulationSummary, ChartError> {
            self.accumulation_calls.fetch_add(1, Ordering::SeqCst);
            match *self.accumulation_status.lock().unwrap() {
                Some(status) => Err(ChartError::Fetch {
                    kind: Endpoint::Accumulation,
                    status,
                }),
                None => Ok(self.summary.clone()),
            }
        }

        async fn reset(&self) -> Result<(), ChartError> {
            match *self.reset_status.lock().unwrap() {
                Some(status) => Err(ChartError::Fetch {
                    kind: Endpoint::Reset,
                    status,
                }),
                None => {
                    self.resets.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            }
        }
    }

    fn service(source: Arc<FakeSource>, settings: ChartSettings) -> ChartService {
        let renderer = SvgChartRenderer::new(&settings);
        ChartService::new(source, renderer, settings)
    }

    #[tokio::test]
    async fn test_render_updates_summary_and_chart() {
        let source = Arc::new(FakeSource::new(12.3456));
        let service = service(source, ChartSettings::default());

        let view = service.fetch_and_render().await.unwrap();

        assert!(view.summary_text.contains("12.35"));
        assert_eq!(view.chart_generation, Some(1));
        assert_eq!(view.points, 3);
        assert_eq!(view.peaks, 1);
        assert_eq!(view.active_charts, 1);
        assert!(service.current_svg().await.unwrap().contains("<svg"));
    }

    #[tokio::test]
    async fn test_render_twice_leaves_one_chart() {
        let source = Arc::new(FakeSource::new(1.0));
        let service = service(source, ChartSettings::default());

        service.fetch_and_render().await.unwrap();
        let view = service.fetch_and_render().await.unwrap();

        assert_eq!(view.chart_generation, Some(2));
        assert_eq!(view.active_charts, 1);
    }

    #[tokio::test]
    async fn test_failure_without_previous_chart() {
        let source = Arc::new(FakeSource::new(1.0));
        source.fail_temperature(Some(500));
        let service = service(source.clone(), ChartSettings::default());

        let err = service.fetch_and_render().await.unwrap_err();
        assert!(matches!(
            err,
            ChartError::Fetch {
                kind: Endpoint::Temperature,
                status: 500
            }
        ));
        // the accumulation request never starts
        assert_eq!(source.accumulation_calls.load(Ordering::SeqCst), 0);

        let view = service.view().await;
        assert_eq!(view.summary_text, "Failed to fetch data");
        assert_eq!(view.chart_generation, None);
        assert_eq!(view.active_charts, 0);
        assert!(service.current_svg().await.is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_chart() {
        let source = Arc::new(FakeSource::new(7.0));
        let service = service(source.clone(), ChartSettings::default());

        service.fetch_and_render().await.unwrap();
        let svg_before = service.current_svg().await;

        source.fail_accumulation(Some(503));
        let err = service.fetch_and_render().await.unwrap_err();
        assert_eq!(err.endpoint(), Some(Endpoint::Accumulation));

        let view = service.view().await;
        assert_eq!(view.summary_text, "Failed to fetch data");
        assert_eq!(view.chart_generation, Some(1));
        assert_eq!(view.active_charts, 1);
        assert_eq!(service.current_svg().await, svg_before);

        source.fail_accumulation(None);
        let view = service.fetch_and_render().await.unwrap();
        assert_eq!(view.summary_text, "Accumulated temperature: 7.00 ℃");
        assert_eq!(view.chart_generation, Some(2));
    }

    #[tokio::test]
    async fn test_initial_text_before_first_load() {
        let source = Arc::new(FakeSource::new(1.0));
        let service = service(source, ChartSettings::default());

        assert_eq!(service.view().await.summary_text, "Loading...");
    }

    #[tokio::test]
    async fn test_threshold_notice() {
        let source = Arc::new(FakeSource::new(300.0));
        let settings = ChartSettings {
            alert_threshold: Some(255.0),
            ..ChartSettings::default()
        };
        let service = service(source, settings);

        let view = service.fetch_and_render().await.unwrap();
        assert!(view.notice.is_some());
    }

    #[tokio::test]
    async fn test_reset_redraws() {
        let source = Arc::new(FakeSource::new(3.0));
        let service = service(source.clone(), ChartSettings::default());

        let view = service.reset().await.unwrap();
        assert_eq!(source.resets.load(Ordering::SeqCst), 1);
        assert_eq!(view.chart_generation, Some(1));
    }

    #[tokio::test]
    async fn test_reset_failure_shows_failure_text() {
        let source = Arc::new(FakeSource::new(3.0));
        *source.reset_status.lock().unwrap() = Some(500);
        let service = service(source.clone(), ChartSettings::default());

        let err = service.reset().await.unwrap_err();
        assert_eq!(err.endpoint(), Some(Endpoint::Reset));
        assert_eq!(service.view().await.summary_text, "Failed to fetch data");
        assert_eq!(source.accumulation_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_render_failure_keeps_previous_chart() {
        let source = Arc::new(FakeSource::new(4.0));
        let service = service(source.clone(), ChartSettings::default());

        service.fetch_and_render().await.unwrap();
        let svg_before = service.current_svg().await;

        source.set_samples(vec![
            TemperatureSample::new("2024-05-01  12:00:00", -1e308),
            TemperatureSample::new("2024-05-01  12:00:30", 1e308),
        ]);
        let err = service.fetch_and_render().await.unwrap_err();
        assert!(matches!(err, ChartError::Render(_)));
        assert_eq!(err.endpoint(), None);

        let view = service.view().await;
        assert_eq!(view.summary_text, "Failed to fetch data");
        assert_eq!(view.chart_generation, Some(1));
        assert_eq!(view.active_charts, 1);
        assert_eq!(service.current_svg().await, svg_before);
    }

    #[tokio::test]
    async fn test_failure_clears_threshold_notice() {
        let source = Arc::new(FakeSource::new(300.0));
        let settings = ChartSettings {
            alert_threshold: Some(255.0),
            ..ChartSettings::default()
        };
        let service = service(source.clone(), settings);

        assert!(service.fetch_and_render().await.unwrap().notice.is_some());

        source.fail_accumulation(Some(500));
        service.fetch_and_render().await.unwrap_err();

        let view = service.view().await;
        assert_eq!(view.summary_text, "Failed to fetch data");
        assert_eq!(view.notice, None);
        assert_eq!(view.chart_generation, Some(1));
    }

    #[tokio::test]
    async fn test_snapshot_pairs_view_with_its_chart() {
        let source = Arc::new(FakeSource::new(2.0));
        let service = service(source, ChartSettings::default());

        let (view, svg) = service.snapshot().await;
        assert_eq!(view.chart_generation, None);
        assert!(svg.is_none());

        service.fetch_and_render().await.unwrap();
        let (view, svg) = service.snapshot().await;
        assert_eq!(view.chart_generation, Some(1));
        assert_eq!(svg, service.current_svg().await);
        assert!(svg.unwrap().contains("<svg"));
    }
}
