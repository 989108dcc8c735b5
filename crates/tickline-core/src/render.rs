//! Candlestick deriver: attaches a trend classification to every bar and
//! computes the body width shared by all bars in one render.

use crate::catalog;
use crate::domain::{BarSeries, CandleChart, RenderBar, SamplingInterval, Trend};
use crate::error::ChartError;

/// Bars occupy 75% of their nominal time slot; the remaining 25% is the gap
/// between neighbors. Fixed ratio, not a tunable.
pub const BODY_WIDTH_RATIO: f64 = 0.75;

/// Body width in milliseconds for bars sampled at `sampling_interval`.
pub fn bar_width_ms(sampling_interval: &str) -> Result<f64, ChartError> {
    let interval = SamplingInterval::parse(sampling_interval)?;
    let unit_ms = catalog::unit_millis(&interval.unit)?;
    Ok(interval.magnitude as f64 * unit_ms as f64 * BODY_WIDTH_RATIO)
}

/// Turn a normalized series into a render-ready chart for one query.
pub fn derive(
    series: BarSeries,
    symbol: &str,
    range_label: &str,
    sampling_interval: &str,
) -> Result<CandleChart, ChartError> {
    let bar_width_ms = bar_width_ms(sampling_interval)?;

    let bars = series
        .bars
        .into_iter()
        .map(|bar| RenderBar {
            trend: Trend::classify(bar.open, bar.close),
            bar,
        })
        .collect();

    Ok(CandleChart {
        symbol: symbol.to_owned(),
        range_label: range_label.to_owned(),
        sampling_interval: sampling_interval.to_owned(),
        bars,
        bar_width_ms,
    })
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;
    use crate::domain::Bar;

    fn bar(open: Option<f64>, close: Option<f64>) -> Bar {
        Bar {
            ts: OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("timestamp"),
            open,
            high: Some(15.0),
            low: Some(5.0),
            close,
            volume: None,
        }
    }

    #[test]
    fn daily_bars_are_three_quarters_of_a_day_wide() {
        let width = bar_width_ms("1d").expect("must compute");
        assert_eq!(width, 64_800_000.0);
    }

    #[test]
    fn ninety_minute_bars_follow_the_width_law() {
        let width = bar_width_ms("90m").expect("must compute");
        assert_eq!(width, 90.0 * 60_000.0 * BODY_WIDTH_RATIO);
        assert_eq!(width, 4_050_000.0);
    }

    #[test]
    fn weekly_width_uses_the_week_unit() {
        let width = bar_width_ms("1wk").expect("must compute");
        assert_eq!(width, 604_800_000.0 * BODY_WIDTH_RATIO);
    }

    #[test]
    fn malformed_interval_fails_parse() {
        let err = bar_width_ms("bad").expect_err("must fail");
        assert!(matches!(err, ChartError::IntervalParse { .. }));
    }

    #[test]
    fn shape_valid_unknown_unit_fails_lookup() {
        let err = bar_width_ms("90x").expect_err("must fail");
        assert!(matches!(err, ChartError::UnknownUnit { .. }));
    }

    #[test]
    fn attaches_classification_per_bar() {
        let series = BarSeries::new(
            0,
            vec![
                bar(Some(10.0), Some(12.0)),
                bar(Some(12.0), Some(10.0)),
                bar(Some(10.0), Some(10.0)),
                bar(None, Some(10.0)),
            ],
        );

        let chart = derive(series, "AAPL", "1mo", "90m").expect("must derive");

        assert_eq!(chart.bars.len(), 4);
        assert_eq!(chart.bars[0].trend, Trend::Bullish);
        assert_eq!(chart.bars[1].trend, Trend::Bearish);
        assert_eq!(chart.bars[2].trend, Trend::Flat);
        assert_eq!(chart.bars[3].trend, Trend::Flat);
        assert_eq!(chart.bar_width_ms, 4_050_000.0);
        assert_eq!(chart.symbol, "AAPL");
        assert_eq!(chart.range_label, "1mo");
    }

    #[test]
    fn preserves_bar_order() {
        let first = bar(Some(1.0), Some(2.0));
        let second = Bar {
            ts: OffsetDateTime::from_unix_timestamp(1_700_005_400).expect("timestamp"),
            ..bar(Some(2.0), Some(3.0))
        };
        let series = BarSeries::new(0, vec![first, second]);

        let chart = derive(series, "MSFT", "1d", "1m").expect("must derive");
        assert!(chart.bars[0].bar.ts < chart.bars[1].bar.ts);
    }
}
