//! Bar-series normalizer: validates the raw chart payload and produces an
//! ordered series of bars in exchange-local time.
//!
//! The payload is decoded into loose wire structs (everything the service is
//! allowed to omit is optional) so that every structural deviation maps
//! deterministically to [`ChartError::MalformedPayload`] instead of a stray
//! lookup failure. Normalization is all-or-nothing: one bad array fails the
//! whole series.

use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::domain::{Bar, BarSeries};
use crate::error::ChartError;

/// Fallback text when the service sends an error envelope without a
/// description.
const GENERIC_REMOTE_ERROR: &str = "failed to process request";

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartNode,
}

#[derive(Debug, Deserialize)]
struct ChartNode {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartFault>,
}

#[derive(Debug, Deserialize)]
struct ChartFault {
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    /// Seconds to add to each raw timestamp for exchange-local display.
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteArrays>,
}

/// Parallel per-bar arrays. `null` entries mark sample points the exchange
/// produced no quote for.
#[derive(Debug, Deserialize)]
struct QuoteArrays {
    #[serde(default)]
    open: Option<Vec<Option<f64>>>,
    #[serde(default)]
    high: Option<Vec<Option<f64>>>,
    #[serde(default)]
    low: Option<Vec<Option<f64>>>,
    #[serde(default)]
    close: Option<Vec<Option<f64>>>,
    #[serde(default)]
    volume: Option<Vec<Option<f64>>>,
}

/// Normalize a raw chart payload into a [`BarSeries`].
///
/// Fails with [`ChartError::Remote`] when the payload carries the service's
/// error envelope, and with [`ChartError::MalformedPayload`] when the
/// expected shape is missing or the required arrays (timestamp, open, high,
/// low, close) disagree in length. Bars keep upstream order, which is already
/// chronological.
pub fn normalize(payload: Value) -> Result<BarSeries, ChartError> {
    let envelope: ChartEnvelope = serde_json::from_value(payload).map_err(|error| {
        ChartError::malformed(format!("payload does not match the chart shape: {error}"))
    })?;

    if let Some(fault) = envelope.chart.error {
        let description = fault
            .description
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| GENERIC_REMOTE_ERROR.to_owned());
        return Err(ChartError::Remote { description });
    }

    let result = envelope
        .chart
        .result
        .and_then(|mut entries| {
            if entries.is_empty() {
                None
            } else {
                Some(entries.swap_remove(0))
            }
        })
        .ok_or_else(|| ChartError::malformed("chart payload has no result entry"))?;

    let timestamps = result
        .timestamp
        .ok_or_else(|| ChartError::malformed("chart result is missing the timestamp array"))?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| ChartError::malformed("chart result is missing the quote block"))?;

    let open = require_array("open", quote.open, timestamps.len())?;
    let high = require_array("high", quote.high, timestamps.len())?;
    let low = require_array("low", quote.low, timestamps.len())?;
    let close = require_array("close", quote.close, timestamps.len())?;
    // Volume is optional wholesale; short arrays read as missing entries.
    let volume = quote.volume.unwrap_or_default();

    let gmtoffset = result.meta.gmtoffset;
    let mut bars = Vec::with_capacity(timestamps.len());
    for (index, &raw) in timestamps.iter().enumerate() {
        let ts = OffsetDateTime::from_unix_timestamp(raw + gmtoffset).map_err(|_| {
            ChartError::malformed(format!(
                "timestamp {raw} at position {index} is outside the representable range"
            ))
        })?;

        bars.push(Bar {
            ts,
            open: open[index],
            high: high[index],
            low: low[index],
            close: close[index],
            volume: volume.get(index).copied().flatten(),
        });
    }

    Ok(BarSeries::new(gmtoffset, bars))
}

fn require_array(
    name: &str,
    values: Option<Vec<Option<f64>>>,
    expected_len: usize,
) -> Result<Vec<Option<f64>>, ChartError> {
    let values = values
        .ok_or_else(|| ChartError::malformed(format!("chart result is missing the {name} array")))?;

    if values.len() != expected_len {
        return Err(ChartError::malformed(format!(
            "{name} array has {} entries but the timestamp array has {expected_len}",
            values.len()
        )));
    }

    Ok(values)
}
