//! HTTP handlers for the route form.

use axum::{extract::State, response::Html, Form, Json};
use serde::{Deserialize, Serialize};

use super::page::{self, Outcome};
use super::state::AppState;
use crate::app::report;
use crate::core::{Pipeline, Route};

#[derive(Debug, Default, Deserialize)]
pub struct RouteForm {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /
///
/// Form only, default route preselected. No provider call.
pub async fn index<P: Pipeline + 'static>(State(state): State<AppState<P>>) -> Html<String> {
    Html(page::render(&state.page, &state.page.default_route, None))
}

/// POST /
///
/// Runs fetch -> normalize -> summarize for the submitted route. Any failure
/// becomes an `Error: ...` alert on the page; the server keeps serving.
pub async fn submit<P: Pipeline + 'static>(
    State(state): State<AppState<P>>,
    Form(form): Form<RouteForm>,
) -> Html<String> {
    let defaults = &state.page.default_route;
    let route = Route::new(
        form.origin.unwrap_or_else(|| defaults.origin.clone()),
        form.destination.unwrap_or_else(|| defaults.destination.clone()),
    );

    let outcome = match state.engine.analyze(&route).await {
        Ok(report) => {
            let title = format!("Monthly Price Trend ({})", state.page.currency);
            Outcome::Report {
                chart: state.chart.render(&report.series, &title),
                table: report::to_html_table(&report.series),
                summary: report.summary,
            }
        }
        Err(e) => {
            tracing::warn!("Route {} failed: {} (category: {:?})", route, e, e.category());
            Outcome::Error(format!("Error: {}", e))
        }
    };

    Html(page::render(&state.page, &route, Some(&outcome)))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
