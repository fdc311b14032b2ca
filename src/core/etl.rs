use crate::core::{Pipeline, Route, RouteReport};
use crate::utils::error::Result;
use std::time::Instant;

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

    /// Extract + transform. Nothing is written anywhere.
    pub async fn analyze(&self, route: &Route) -> Result<RouteReport> {
        let started = Instant::now();
        tracing::info!("Analyzing route {}", route);

        // Extract
        let raw = self.pipeline.extract(route).await?;
        tracing::debug!("Extracted raw data in {:?}", started.elapsed());

        // Transform
        let report = self.pipeline.transform(raw).await?;
        tracing::info!(
            "Route {}: {} observations, avg {:.2}, cheapest {} on {}, most expensive {} on {} ({:?})",
            route,
            report.series.len(),
            report.summary.average_price,
            report.summary.cheapest_price,
            report.summary.cheapest_date,
            report.summary.expensive_price,
            report.summary.expensive_date,
            started.elapsed()
        );

        Ok(report)
    }

    /// Full run: analyze then load. Returns the output location.
    pub async fn run(&self, route: &Route) -> Result<(RouteReport, String)> {
        let report = self.analyze(route).await?;

        // Load
        let output = self.pipeline.load(route, &report).await?;
        tracing::info!("Output saved to: {}", output);

        Ok((report, output))
    }
}
