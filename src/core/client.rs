use crate::core::{ConfigProvider, RawMonthlyPrices};
use crate::utils::error::{AirfareError, Result};
use crate::utils::validation::validate_airport_code;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct MonthlyPricesResponse {
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// Client for the provider's monthly-prices endpoint.
///
/// One GET per call, no retries. The request timeout comes from
/// [`ConfigProvider::timeout_seconds`].
#[derive(Debug, Clone)]
pub struct MonthlyPricesClient {
    client: Client,
    endpoint: String,
    token: String,
    currency: String,
}

impl MonthlyPricesClient {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.api_endpoint().to_string(),
            token: config.api_token().to_string(),
            currency: config.currency().to_string(),
        })
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub async fn fetch_monthly_prices(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<RawMonthlyPrices> {
        validate_airport_code("origin", origin)?;
        validate_airport_code("destination", destination)?;

        // token 不寫進 log
        tracing::debug!(
            "Requesting monthly prices {} -> {} ({}) from {}",
            origin,
            destination,
            self.currency,
            self.endpoint
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("currency", self.currency.as_str()),
                ("token", self.token.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Provider response status: {}", status);

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!("Failed to read error body from provider: {}", e);
                    String::new()
                }
            };
            tracing::warn!("Provider returned {} for {} -> {}", status, origin, destination);
            return Err(AirfareError::Fetch {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: MonthlyPricesResponse = response.json().await?;
        Ok(match envelope.data {
            Some(data) if !data.is_null() => RawMonthlyPrices(data),
            _ => {
                tracing::debug!("Provider response has no 'data' field");
                RawMonthlyPrices::empty()
            }
        })
    }
}
