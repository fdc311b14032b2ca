pub mod aggregator;
pub mod client;
pub mod etl;
pub mod normalizer;

pub use crate::domain::model::{
    PriceObservation, PriceSeries, RawMonthlyPrices, Route, RouteReport, RouteSummary,
};
pub use crate::domain::ports::{ChartRenderer, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
