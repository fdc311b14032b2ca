//! HTML page for the route form and its results.

use crate::app::report::format_price;
use crate::core::{Route, RouteSummary};
use crate::domain::model::Airport;
use std::fmt::Write as _;

/// Process-wide, read-only page inputs.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub airports: Vec<Airport>,
    pub default_route: Route,
    pub currency: String,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Report {
        summary: RouteSummary,
        chart: String,
        table: String,
    },
    Error(String),
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Airline Market Demand</title>
  <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet" />
  <style>
    body { background: #1d3557; font-family: 'Segoe UI', sans-serif; }
    .card { background-color: rgba(255,255,255,0.95); border-radius: 16px; padding: 20px; margin-top: 40px; box-shadow: 0 10px 20px rgba(0,0,0,0.1); }
    .table th { background-color: #007bff; color: #fff; }
    .chart-container svg { max-width: 100%; height: auto; border-radius: 12px; margin-top: 10px; background: #fff; }
    footer { margin-top: 60px; text-align: center; color: #fff; }
  </style>
</head>
<body>
  <div class="container">
    <h1 class="text-center text-light mt-4">Airline Market Demand Insights</h1>
"#;

const FOOT: &str = r#"    <footer>
      <p>Airline Market Demand Web App</p>
    </footer>
  </div>
</body>
</html>
"#;

fn render_select(html: &mut String, label: &str, name: &str, airports: &[Airport], selected: &str) {
    let _ = writeln!(html, "      <div class=\"col-md-5\">");
    let _ = writeln!(html, "        <label class=\"form-label text-light\">{}</label>", label);
    let _ = writeln!(html, "        <select class=\"form-select\" name=\"{}\">", name);
    for airport in airports {
        let code = escape_html(&airport.code);
        let _ = writeln!(
            html,
            "          <option value=\"{code}\"{sel}>{name} ({code})</option>",
            code = code,
            sel = if airport.code == selected { " selected" } else { "" },
            name = escape_html(&airport.name)
        );
    }
    let _ = writeln!(html, "        </select>");
    let _ = writeln!(html, "      </div>");
}

fn render_summary(
    html: &mut String,
    ctx: &PageContext,
    route: &Route,
    summary: &RouteSummary,
    chart: &str,
    table: &str,
) {
    let _ = writeln!(html, "    <div class=\"card\">");
    let _ = writeln!(
        html,
        "      <h2 class=\"text-center\">Route: {}</h2>",
        escape_html(&route.to_string())
    );
    let _ = writeln!(html, "      <div class=\"row mt-4\">");
    let _ = writeln!(html, "        <div class=\"col-md-6\">");
    let _ = writeln!(html, "          <ul class=\"list-group\">");
    let _ = writeln!(
        html,
        "            <li class=\"list-group-item d-flex justify-content-between\"><strong>Average Price</strong><span>${:.2} {}</span></li>",
        summary.average_price,
        escape_html(&ctx.currency)
    );
    let _ = writeln!(
        html,
        "            <li class=\"list-group-item d-flex justify-content-between\"><strong>Cheapest ({})</strong><span>${}</span></li>",
        summary.cheapest_date,
        format_price(summary.cheapest_price)
    );
    let _ = writeln!(
        html,
        "            <li class=\"list-group-item d-flex justify-content-between\"><strong>Most Expensive ({})</strong><span>${}</span></li>",
        summary.expensive_date,
        format_price(summary.expensive_price)
    );
    let _ = writeln!(html, "          </ul>");
    let _ = writeln!(html, "        </div>");
    let _ = writeln!(html, "        <div class=\"col-md-6 chart-container\">");
    // chart 與 table 由本程式產生，已跳脫
    html.push_str(chart);
    html.push('\n');
    let _ = writeln!(html, "        </div>");
    let _ = writeln!(html, "      </div>");
    let _ = writeln!(html, "    </div>");

    let _ = writeln!(html, "    <div class=\"card mt-4\">");
    let _ = writeln!(html, "      <h4>Raw Monthly Price Data</h4>");
    let _ = writeln!(html, "      <div class=\"table-responsive\">");
    html.push_str(table);
    html.push('\n');
    let _ = writeln!(html, "      </div>");
    let _ = writeln!(html, "    </div>");
}

pub fn render(ctx: &PageContext, route: &Route, outcome: Option<&Outcome>) -> String {
    let mut html = String::from(HEAD);

    html.push_str("    <form method=\"POST\" class=\"row g-3 mt-4\">\n");
    render_select(&mut html, "Origin Airport", "origin", &ctx.airports, &route.origin);
    render_select(&mut html, "Destination Airport", "destination", &ctx.airports, &route.destination);
    html.push_str(
        "      <div class=\"col-md-2 d-grid\">\n        <label class=\"form-label invisible\">Submit</label>\n        <button type=\"submit\" class=\"btn btn-primary\">Get Insights</button>\n      </div>\n    </form>\n",
    );

    match outcome {
        Some(Outcome::Error(message)) => {
            let _ = writeln!(
                html,
                "    <div class=\"alert alert-danger mt-4\">{}</div>",
                escape_html(message)
            );
        }
        Some(Outcome::Report {
            summary,
            chart,
            table,
        }) => render_summary(&mut html, ctx, route, summary, chart, table),
        None => {}
    }

    html.push_str(FOOT);
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn context() -> PageContext {
        PageContext {
            airports: vec![
                Airport {
                    code: "SYD".to_string(),
                    name: "Sydney".to_string(),
                },
                Airport {
                    code: "MEL".to_string(),
                    name: "Melbourne".to_string(),
                },
            ],
            default_route: Route::new("SYD", "MEL"),
            currency: "AUD".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_form_only_page_preselects_route() {
        let ctx = context();
        let html = render(&ctx, &Route::new("MEL", "SYD"), None);

        assert!(html.contains("<form method=\"POST\""));
        assert!(html.contains("<option value=\"MEL\" selected>Melbourne (MEL)</option>"));
        assert!(html.contains("<option value=\"SYD\">Sydney (SYD)</option>"));
        assert!(!html.contains("alert-danger"));
        assert!(!html.contains("Route:"));
    }

    #[test]
    fn test_error_page_is_escaped() {
        let ctx = context();
        let outcome = Outcome::Error("Error: API Error 503: <b>down</b>".to_string());
        let html = render(&ctx, &ctx.default_route, Some(&outcome));

        assert!(html.contains("Error: API Error 503: &lt;b&gt;down&lt;/b&gt;"));
        assert!(!html.contains("Route:"));
    }

    #[test]
    fn test_report_page_shows_summary() {
        let ctx = context();
        let outcome = Outcome::Report {
            summary: RouteSummary {
                average_price: 100.0,
                cheapest_price: 80.0,
                cheapest_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
                expensive_price: 120.0,
                expensive_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            },
            chart: "<svg></svg>".to_string(),
            table: "<table></table>".to_string(),
        };
        let html = render(&ctx, &ctx.default_route, Some(&outcome));

        assert!(html.contains("Route: SYD → MEL"));
        assert!(html.contains("<span>$100.00 AUD</span>"));
        assert!(html.contains("Cheapest (2025-06-15)</strong><span>$80</span>"));
        assert!(html.contains("Most Expensive (2025-06-30)</strong><span>$120</span>"));
        assert!(html.contains("<svg></svg>"));
        assert!(html.contains("<table></table>"));
    }
}
