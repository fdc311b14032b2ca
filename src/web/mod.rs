pub mod chart;
pub mod handlers;
pub mod page;
pub mod router;
pub mod state;

pub use chart::SvgChartRenderer;
pub use page::PageContext;
pub use router::{create_router, serve};
pub use state::AppState;
