use crate::app::report;
use crate::core::aggregator::summarize;
use crate::core::client::MonthlyPricesClient;
use crate::core::normalizer::normalize;
use crate::core::{ConfigProvider, Pipeline, RawMonthlyPrices, Route, RouteReport, Storage};
use crate::utils::error::Result;

/// Monthly price pipeline for one route:
/// provider fetch -> normalize + summarize -> files in storage.
pub struct RoutePricePipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) client: MonthlyPricesClient,
}

impl<S: Storage, C: ConfigProvider> RoutePricePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = MonthlyPricesClient::from_config(&config)?;
        Ok(Self {
            storage,
            config,
            client,
        })
    }

    pub fn currency(&self) -> &str {
        self.client.currency()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RoutePricePipeline<S, C> {
    async fn extract(&self, route: &Route) -> Result<RawMonthlyPrices> {
        self.client
            .fetch_monthly_prices(&route.origin, &route.destination)
            .await
    }

    async fn transform(&self, raw: RawMonthlyPrices) -> Result<RouteReport> {
        let series = normalize(&raw)?;
        let summary = summarize(&series);
        Ok(RouteReport { series, summary })
    }

    async fn load(&self, route: &Route, report: &RouteReport) -> Result<String> {
        let slug = route.slug();
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            let (file_name, data) = match format.as_str() {
                "csv" => (format!("{}.csv", slug), report::to_csv(&report.series)?),
                "tsv" => (format!("{}.tsv", slug), report::to_tsv(&report.series)?),
                "json" => (
                    format!("{}_summary.json", slug),
                    report::to_summary_json(route, self.currency(), report)?,
                ),
                other => {
                    tracing::warn!("Skipping unsupported output format '{}'", other);
                    continue;
                }
            };

            tracing::debug!("Writing {} ({} bytes) to storage", file_name, data.len());
            self.storage.write_file(&file_name, &data).await?;
            written.push(self.storage.location(&file_name));
        }

        Ok(written.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AirfareError;
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                AirfareError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn location(&self, path: &str) -> String {
            format!("mem://{}", path)
        }
    }

    struct MockConfig {
        api_endpoint: String,
        output_formats: Vec<String>,
    }

    impl MockConfig {
        fn new(api_endpoint: String) -> Self {
            Self {
                api_endpoint,
                output_formats: vec!["csv".to_string(), "json".to_string()],
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn api_token(&self) -> &str {
            "test-token"
        }

        fn currency(&self) -> &str {
            "AUD"
        }

        fn timeout_seconds(&self) -> u64 {
            5
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_extract_and_transform_scenario() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/monthly")
                .query_param("origin", "SYD")
                .query_param("destination", "MEL");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "data": {"2025-06": {"2025-06-01": 100, "2025-06-15": 80, "2025-06-30": 120}}
                }));
        });

        let pipeline =
            RoutePricePipeline::new(MockStorage::new(), MockConfig::new(server.url("/monthly")))
                .unwrap();

        let raw = pipeline.extract(&Route::new("SYD", "MEL")).await.unwrap();
        let report = pipeline.transform(raw).await.unwrap();

        api_mock.assert();
        assert_eq!(report.series.len(), 3);
        assert_eq!(report.summary.average_price, 100.0);
        assert_eq!(report.summary.cheapest_price, 80.0);
        assert_eq!(report.summary.cheapest_date, date("2025-06-15"));
        assert_eq!(report.summary.expensive_price, 120.0);
        assert_eq!(report.summary.expensive_date, date("2025-06-30"));
    }

    #[tokio::test]
    async fn test_transform_empty_raw_is_no_data() {
        let pipeline = RoutePricePipeline::new(
            MockStorage::new(),
            MockConfig::new("http://test.com".to_string()),
        )
        .unwrap();

        let err = pipeline
            .transform(RawMonthlyPrices::empty())
            .await
            .unwrap_err();

        assert!(matches!(err, AirfareError::NoData));
    }

    #[tokio::test]
    async fn test_load_writes_configured_formats() {
        let storage = MockStorage::new();
        let pipeline = RoutePricePipeline::new(
            storage.clone(),
            MockConfig::new("http://test.com".to_string()),
        )
        .unwrap();

        let report = pipeline
            .transform(RawMonthlyPrices(serde_json::json!({
                "2025-06": {"bad-date": 50, "2025-06-02": 200}
            })))
            .await
            .unwrap();

        let output = pipeline
            .load(&Route::new("SYD", "MEL"), &report)
            .await
            .unwrap();

        assert_eq!(output, "mem://SYD-MEL.csv, mem://SYD-MEL_summary.json");

        let csv = storage.get_file("SYD-MEL.csv").await.unwrap();
        assert_eq!(String::from_utf8(csv).unwrap(), "date,price\n2025-06-02,200\n");

        let summary = storage.get_file("SYD-MEL_summary.json").await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&summary).unwrap();
        assert_eq!(json["summary"]["cheapest_date"], "2025-06-02");
        assert_eq!(json["summary"]["expensive_date"], "2025-06-02");

        assert!(storage.get_file("SYD-MEL.tsv").await.is_none());
        assert!(storage.read_file("SYD-MEL.tsv").await.is_err());
    }
}
