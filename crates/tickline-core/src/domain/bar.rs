use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One OHLCV sample for a fixed time slot.
///
/// The timestamp has already been shifted by the exchange's GMT offset, so its
/// wall-clock reading matches what a trader at that exchange sees. Sparse
/// quotes keep their gaps: an absent upstream value stays `None` and is never
/// coerced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

/// Ordered series of bars for one query, ascending by timestamp, one entry
/// per sample point returned by the quote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    /// Offset (seconds) that was added to every raw timestamp.
    pub gmtoffset_secs: i64,
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(gmtoffset_secs: i64, bars: Vec<Bar>) -> Self {
        Self {
            gmtoffset_secs,
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Candlestick direction of one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Bullish,
    Bearish,
    Flat,
}

impl Trend {
    /// Compare close against open. A bar missing either side has no
    /// determinable direction and classifies as `Flat` rather than failing.
    pub fn classify(open: Option<f64>, close: Option<f64>) -> Self {
        match (open, close) {
            (Some(open), Some(close)) if close > open => Self::Bullish,
            (Some(open), Some(close)) if open > close => Self::Bearish,
            _ => Self::Flat,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Flat => "flat",
        }
    }

    /// Body fill for the charting surface. Flat bars share the bearish fill:
    /// their body has zero height, so only two colors are ever visible.
    pub const fn fill_color(self) -> &'static str {
        match self {
            Self::Bullish => "#007532",
            Self::Bearish | Self::Flat => "#CE2A1D",
        }
    }
}

/// A bar with its derived classification attached, ready for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderBar {
    #[serde(flatten)]
    pub bar: Bar,
    pub trend: Trend,
}

/// Render-ready chart for one query: classified bars plus the single body
/// width shared by all of them. Computed fresh per query, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleChart {
    pub symbol: String,
    pub range_label: String,
    pub sampling_interval: String,
    pub bars: Vec<RenderBar>,
    /// Body width in milliseconds along the time axis.
    pub bar_width_ms: f64,
}

impl CandleChart {
    /// Axis kind the charting surface must use for the x dimension.
    pub const X_AXIS: &'static str = "datetime";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_close_against_open() {
        assert_eq!(Trend::classify(Some(10.0), Some(11.0)), Trend::Bullish);
        assert_eq!(Trend::classify(Some(11.0), Some(10.0)), Trend::Bearish);
        assert_eq!(Trend::classify(Some(10.0), Some(10.0)), Trend::Flat);
    }

    #[test]
    fn missing_side_classifies_flat() {
        assert_eq!(Trend::classify(None, Some(10.0)), Trend::Flat);
        assert_eq!(Trend::classify(Some(10.0), None), Trend::Flat);
        assert_eq!(Trend::classify(None, None), Trend::Flat);
    }

    #[test]
    fn flat_shares_the_bearish_fill() {
        assert_eq!(Trend::Bullish.fill_color(), "#007532");
        assert_eq!(Trend::Bearish.fill_color(), "#CE2A1D");
        assert_eq!(Trend::Flat.fill_color(), Trend::Bearish.fill_color());
    }

    #[test]
    fn render_bar_serializes_flattened() {
        let ts = OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("timestamp");
        let render_bar = RenderBar {
            bar: Bar {
                ts,
                open: Some(10.0),
                high: Some(12.0),
                low: Some(9.0),
                close: Some(11.0),
                volume: None,
            },
            trend: Trend::Bullish,
        };

        let value = serde_json::to_value(render_bar).expect("serialize");
        assert_eq!(value["open"], 10.0);
        assert_eq!(value["trend"], "bullish");
        assert!(value["volume"].is_null());
    }
}
