pub mod route_pipeline;

pub use route_pipeline::RoutePricePipeline;
