//! Flattens the provider's nested month -> (date -> price) mapping into a
//! date-sorted [`PriceSeries`].
//!
//! Bad individual records (unparsable date, non-numeric price) are dropped.
//! Prices are otherwise unchecked; rejecting non-numeric ones is a deliberate
//! tightening so every observation carries a real `f64`.
//! The whole normalization fails with [`AirfareError::NoData`] only when
//! nothing survives.

use crate::core::{PriceObservation, PriceSeries, RawMonthlyPrices};
use crate::utils::error::{AirfareError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

pub fn normalize(raw: &RawMonthlyPrices) -> Result<PriceSeries> {
    let Some(groups) = raw.as_value().as_object() else {
        tracing::warn!("Provider data is not a mapping; nothing to normalize");
        return Err(AirfareError::NoData);
    };

    let mut observations = Vec::new();
    let mut dropped = 0usize;

    // serde_json::Map 以 key 排序走訪，相同日期的先後順序因此固定
    for (group_key, entries) in groups {
        let Some(entries) = entries.as_object() else {
            tracing::debug!("Skipping group '{}': not a date -> price mapping", group_key);
            continue;
        };

        for (date_str, price) in entries {
            let Some(date) = parse_date(date_str) else {
                tracing::debug!("Dropping entry with unparsable date '{}'", date_str);
                dropped += 1;
                continue;
            };
            let Some(price) = price.as_f64() else {
                tracing::debug!("Dropping entry {} with non-numeric price {}", date_str, price);
                dropped += 1;
                continue;
            };
            observations.push(PriceObservation { date, price });
        }
    }

    if dropped > 0 {
        tracing::warn!("Dropped {} malformed price entries", dropped);
    }

    let series = PriceSeries::from_observations(observations).ok_or(AirfareError::NoData)?;
    tracing::debug!(
        "Normalized {} observations ({} .. {})",
        series.len(),
        series.first().date,
        series.last().date
    );
    Ok(series)
}

/// Parses the date formats the provider is known to emit. Timestamps keep
/// only their calendar date; a bare `YYYY-MM` means the first of that month.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").ok()
}
