use crate::core::{Pipeline, TwoDayMenu};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// 執行一次完整流程：抓取、分類、輸出
    pub async fn run(&self) -> Result<String> {
        self.run_inspect(|_| {}).await
    }

    /// Like [`run`](Self::run), handing the assembled menus to `inspect`
    /// before they are rendered.
    pub async fn run_inspect<F>(&self, inspect: F) -> Result<String>
    where
        F: FnOnce(&TwoDayMenu) + Send,
    {
        tracing::info!("📡 Fetching menu feed...");
        let restaurants = self.pipeline.extract().await?;
        tracing::info!("Fetched {} restaurant records", restaurants.len());

        tracing::info!("🥕 Classifying vegan meals...");
        let menus = self.pipeline.transform(restaurants).await?;
        tracing::info!(
            "Today ({}): {} restaurants, tomorrow ({}): {} restaurants",
            menus.today.day_name,
            menus.today.entries.len(),
            menus.tomorrow.day_name,
            menus.tomorrow.entries.len()
        );
        inspect(&menus);

        tracing::info!("🖨️ Rendering menu page...");
        let output_path = self.pipeline.load(menus).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
