use crate::core::{PriceObservation, PriceSeries, RouteSummary};

/// Arithmetic mean of all prices, unrounded.
pub fn mean_price(series: &PriceSeries) -> f64 {
    let sum: f64 = series.iter().map(|o| o.price).sum();
    sum / series.len() as f64
}

/// Summary statistics over a non-empty, date-sorted series.
///
/// Min/max ties resolve to the earliest observation in series order.
pub fn summarize(series: &PriceSeries) -> RouteSummary {
    let first = series.first();
    let (cheapest, expensive) = series.iter().skip(1).fold(
        (first, first),
        |(min, max): (&PriceObservation, &PriceObservation), o| {
            // 嚴格比較：同價時保留較早的日期
            let min = if o.price < min.price { o } else { min };
            let max = if o.price > max.price { o } else { max };
            (min, max)
        },
    );

    RouteSummary {
        average_price: round2(mean_price(series)),
        cheapest_price: cheapest.price,
        cheapest_date: cheapest.date,
        expensive_price: expensive.price,
        expensive_date: expensive.date,
    }
}

/// Two decimals, ties to even: a mean of 100.125 becomes 100.12.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
