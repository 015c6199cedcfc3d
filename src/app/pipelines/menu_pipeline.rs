use crate::adapters::http::HttpFeedSource;
use crate::adapters::render::render_html;
use crate::core::assembler::{assemble, discard_stale_next_day};
use crate::core::{ConfigProvider, Pipeline, RawRestaurant, Storage, TwoDayMenu};
use crate::utils::error::{Result, VegError};
use crate::utils::events::{EventSink, TracingSink};
use chrono::{Local, NaiveDate};
use std::sync::Arc;

/// Fetches the feed once and renders today's and tomorrow's vegan menus.
pub struct MenuPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    source: HttpFeedSource,
    sink: Arc<dyn EventSink>,
    today: Option<NaiveDate>,
}

impl<S: Storage, C: ConfigProvider> MenuPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let source =
            HttpFeedSource::new(config.api_endpoint()).with_timeout(config.timeout_seconds());
        Self {
            storage,
            config,
            source,
            sink: Arc::new(TracingSink),
            today: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Pins "today" instead of reading the local clock.
    pub fn with_date(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for MenuPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawRestaurant>> {
        tracing::info!("🚀 Fetching menus from: {}", self.source.endpoint());
        self.source.fetch_restaurants(self.sink.as_ref()).await
    }

    async fn transform(&self, data: Vec<RawRestaurant>) -> Result<TwoDayMenu> {
        let today = self.today();
        let tomorrow = today.succ_opt().ok_or_else(|| VegError::ConfigValidationError {
            field: "date".to_string(),
            message: format!("{} has no following day", today),
        })?;
        let lang = self.config.lang();
        let sink = self.sink.as_ref();

        let today_menu = assemble(&data, lang, today, sink);
        let mut tomorrow_menu = assemble(&data, lang, tomorrow, sink);
        discard_stale_next_day(&mut tomorrow_menu, sink);

        Ok(TwoDayMenu {
            today: today_menu,
            tomorrow: tomorrow_menu,
        })
    }

    async fn load(&self, result: TwoDayMenu) -> Result<String> {
        let template_path = self.config.template_path();
        tracing::debug!("Reading template from {}", template_path);
        let template_bytes = self.storage.read_file(template_path).await?;
        let template = String::from_utf8_lossy(&template_bytes);

        let html = render_html(&template, &result)?;

        let output_path = self.config.output_path();
        tracing::debug!("Writing {} bytes to {}", html.len(), output_path);
        self.storage.write_file(output_path, html.as_bytes()).await?;
        Ok(output_path.to_string())
    }
}
