use crate::domain::model::{PriceSeries, RawMonthlyPrices, Route, RouteReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 對使用者顯示的完整位置
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn api_token(&self) -> &str;
    fn currency(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self, route: &Route) -> Result<RawMonthlyPrices>;
    async fn transform(&self, raw: RawMonthlyPrices) -> Result<RouteReport>;
    async fn load(&self, route: &Route, report: &RouteReport) -> Result<String>;
}

/// Renders a price series as an image the page can embed inline.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, series: &PriceSeries, title: &str) -> String;
}
