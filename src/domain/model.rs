use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An (origin, destination) airport pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub origin: String,
    pub destination: String,
}

impl Route {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    /// 輸出檔名用的代號，例如 `SYD-MEL`
    pub fn slug(&self) -> String {
        format!("{}-{}", self.origin, self.destination)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.origin, self.destination)
    }
}

/// Selectable airport from the reference list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
}

/// The provider's `data` value, untouched: grouping key (month) to a mapping
/// of date string to price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMonthlyPrices(pub serde_json::Value);

impl RawMonthlyPrices {
    pub fn empty() -> Self {
        Self(serde_json::Value::Object(serde_json::Map::new()))
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub date: NaiveDate,
    pub price: f64,
}

/// Observations sorted ascending by date. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    observations: Vec<PriceObservation>,
}

impl PriceSeries {
    /// Sorts by date (stable) and rejects an empty input.
    pub fn from_observations(mut observations: Vec<PriceObservation>) -> Option<Self> {
        if observations.is_empty() {
            return None;
        }
        observations.sort_by_key(|o| o.date);
        Some(Self { observations })
    }

    pub fn observations(&self) -> &[PriceObservation] {
        &self.observations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceObservation> {
        self.observations.iter()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first(&self) -> &PriceObservation {
        &self.observations[0]
    }

    pub fn last(&self) -> &PriceObservation {
        &self.observations[self.observations.len() - 1]
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PriceObservation;
    type IntoIter = std::slice::Iter<'a, PriceObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Mean price rounded to 2 decimals.
    pub average_price: f64,
    pub cheapest_price: f64,
    #[serde(with = "date_format")]
    pub cheapest_date: NaiveDate,
    pub expensive_price: f64,
    #[serde(with = "date_format")]
    pub expensive_date: NaiveDate,
}

/// Transform output: the normalized series plus its summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteReport {
    pub series: PriceSeries,
    pub summary: RouteSummary,
}

pub(crate) mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
