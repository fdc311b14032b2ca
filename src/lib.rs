pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

pub use crate::app::pipelines::RoutePricePipeline;
pub use crate::config::{LocalStorage, TomlConfig};
pub use crate::core::{
    aggregator::summarize, client::MonthlyPricesClient, etl::EtlEngine, normalizer::normalize,
};
pub use crate::domain::model::{
    PriceObservation, PriceSeries, RawMonthlyPrices, Route, RouteReport, RouteSummary,
};
pub use crate::utils::error::{AirfareError, Result};
