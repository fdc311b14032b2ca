use crate::core::etl::EtlEngine;
use crate::core::{ChartRenderer, Pipeline};
use crate::web::page::PageContext;
use std::sync::Arc;

/// Shared, read-only handler state. Each request owns its own series and summary.
pub struct AppState<P: Pipeline> {
    pub engine: Arc<EtlEngine<P>>,
    pub page: Arc<PageContext>,
    pub chart: Arc<dyn ChartRenderer>,
}

impl<P: Pipeline> AppState<P> {
    pub fn new(engine: EtlEngine<P>, page: PageContext, chart: impl ChartRenderer + 'static) -> Self {
        Self {
            engine: Arc::new(engine),
            page: Arc::new(page),
            chart: Arc::new(chart),
        }
    }
}

impl<P: Pipeline> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            page: Arc::clone(&self.page),
            chart: Arc::clone(&self.chart),
        }
    }
}
