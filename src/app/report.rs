//! Tabular renderings of a normalized series.

use crate::core::{PriceSeries, Route, RouteReport, RouteSummary};
use crate::domain::model::date_format::FORMAT as DATE_FORMAT;
use crate::utils::error::{AirfareError, Result};
use serde::Serialize;
use std::fmt::Write as _;

/// Prices are shown as given: `100` stays `100`, `80.5` stays `80.5`.
pub fn format_price(price: f64) -> String {
    format!("{}", price)
}

pub fn to_csv(series: &PriceSeries) -> Result<Vec<u8>> {
    write_delimited(series, b',')
}

pub fn to_tsv(series: &PriceSeries) -> Result<Vec<u8>> {
    write_delimited(series, b'\t')
}

fn write_delimited(series: &PriceSeries, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(["date", "price"])?;
    for observation in series {
        writer.write_record([
            observation.date.format(DATE_FORMAT).to_string(),
            format_price(observation.price),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| AirfareError::Io(e.into_error()))
}

/// `<table>` with a `date`/`price` header row, one row per observation.
pub fn to_html_table(series: &PriceSeries) -> String {
    let mut html = String::from(
        "<table border=\"1\" class=\"dataframe table table-striped table-bordered\">\n",
    );
    html.push_str("  <thead>\n    <tr style=\"text-align: right;\">\n      <th>date</th>\n      <th>price</th>\n    </tr>\n  </thead>\n  <tbody>\n");
    for observation in series {
        // 日期與數字不含需要跳脫的字元
        let _ = write!(
            html,
            "    <tr>\n      <td>{}</td>\n      <td>{}</td>\n    </tr>\n",
            observation.date.format(DATE_FORMAT),
            format_price(observation.price)
        );
    }
    html.push_str("  </tbody>\n</table>");
    html
}

#[derive(Debug, Serialize)]
struct SummaryDocument<'a> {
    route: &'a Route,
    currency: &'a str,
    observations: usize,
    summary: &'a RouteSummary,
}

pub fn to_summary_json(route: &Route, currency: &str, report: &RouteReport) -> Result<Vec<u8>> {
    let document = SummaryDocument {
        route,
        currency,
        observations: report.series.len(),
        summary: &report.summary,
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}
