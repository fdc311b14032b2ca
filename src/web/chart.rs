//! Inline SVG line chart of a price series.

use crate::app::report::format_price;
use crate::core::{ChartRenderer, PriceSeries};
use crate::web::page::escape_html;
use std::fmt::Write as _;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 60.0;

#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    pub width: u32,
    pub height: u32,
    pub color: String,
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self {
            width: 640,
            height: 400,
            color: "#007bff".to_string(),
        }
    }
}

impl SvgChartRenderer {
    fn plot_area(&self) -> (f64, f64) {
        (
            self.width as f64 - MARGIN_LEFT - MARGIN_RIGHT,
            self.height as f64 - MARGIN_TOP - MARGIN_BOTTOM,
        )
    }

    /// Maps every observation to pixel coordinates. Dates are spaced by
    /// calendar distance, prices scaled between the series min and max.
    fn points(&self, series: &PriceSeries) -> Vec<(f64, f64)> {
        let (plot_w, plot_h) = self.plot_area();
        let first_date = series.first().date;
        let day_span = (series.last().date - first_date).num_days() as f64;

        let (min_price, max_price) = series.iter().fold((f64::MAX, f64::MIN), |(lo, hi), o| {
            (lo.min(o.price), hi.max(o.price))
        });
        let price_span = max_price - min_price;

        series
            .iter()
            .map(|o| {
                let x = if day_span > 0.0 {
                    MARGIN_LEFT + (o.date - first_date).num_days() as f64 / day_span * plot_w
                } else {
                    MARGIN_LEFT + plot_w / 2.0
                };
                let y = if price_span > 0.0 {
                    MARGIN_TOP + (max_price - o.price) / price_span * plot_h
                } else {
                    MARGIN_TOP + plot_h / 2.0
                };
                (x, y)
            })
            .collect()
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, series: &PriceSeries, title: &str) -> String {
        let (plot_w, plot_h) = self.plot_area();
        let points = self.points(series);
        let color = escape_html(&self.color);

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" class="price-chart" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        let _ = writeln!(svg, "  <title>{}</title>", escape_html(title));
        let _ = writeln!(
            svg,
            r#"  <text x="{}" y="24" text-anchor="middle" font-size="16">{}</text>"#,
            self.width as f64 / 2.0,
            escape_html(title)
        );

        // 座標軸
        let x_axis_y = MARGIN_TOP + plot_h;
        let _ = writeln!(
            svg,
            r##"  <line class="axis" x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="#333"/>"##,
            l = MARGIN_LEFT,
            t = MARGIN_TOP,
            b = x_axis_y
        );
        let _ = writeln!(
            svg,
            r##"  <line class="axis" x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="#333"/>"##,
            l = MARGIN_LEFT,
            b = x_axis_y,
            r = MARGIN_LEFT + plot_w
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{}" y="{}" text-anchor="middle" font-size="12">Date</text>"#,
            MARGIN_LEFT + plot_w / 2.0,
            self.height as f64 - 12.0
        );
        let _ = writeln!(
            svg,
            r#"  <text x="16" y="{y}" text-anchor="middle" font-size="12" transform="rotate(-90 16 {y})">Price</text>"#,
            y = MARGIN_TOP + plot_h / 2.0
        );

        // 刻度：首尾日期、最高最低價
        let (min_price, max_price) = series.iter().fold((f64::MAX, f64::MIN), |(lo, hi), o| {
            (lo.min(o.price), hi.max(o.price))
        });
        let _ = writeln!(
            svg,
            r#"  <text class="tick" x="{}" y="{}" text-anchor="end" font-size="11">{}</text>"#,
            MARGIN_LEFT - 6.0,
            MARGIN_TOP + 4.0,
            format_price(max_price)
        );
        let _ = writeln!(
            svg,
            r#"  <text class="tick" x="{}" y="{}" text-anchor="end" font-size="11">{}</text>"#,
            MARGIN_LEFT - 6.0,
            x_axis_y + 4.0,
            format_price(min_price)
        );
        let _ = writeln!(
            svg,
            r#"  <text class="tick" x="{}" y="{}" text-anchor="start" font-size="11">{}</text>"#,
            MARGIN_LEFT,
            x_axis_y + 18.0,
            series.first().date
        );
        let _ = writeln!(
            svg,
            r#"  <text class="tick" x="{}" y="{}" text-anchor="end" font-size="11">{}</text>"#,
            MARGIN_LEFT + plot_w,
            x_axis_y + 18.0,
            series.last().date
        );

        let path: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect();
        let _ = writeln!(
            svg,
            r#"  <polyline fill="none" stroke="{}" stroke-width="2" points="{}"/>"#,
            color,
            path.join(" ")
        );

        for ((x, y), observation) in points.iter().zip(series.iter()) {
            let _ = writeln!(
                svg,
                r#"  <circle class="marker" cx="{:.1}" cy="{:.1}" r="3.5" fill="{}"><title>{}: {}</title></circle>"#,
                x,
                y,
                color,
                observation.date,
                format_price(observation.price)
            );
        }

        svg.push_str("</svg>");
        svg
    }
}
