//! Single-query pipeline facade: fetch, normalize, derive.
//!
//! One call runs the whole chain to completion before anything is returned;
//! there is no overlap between queries and no background work. Every error in
//! the chain aborts the query; no partial chart is ever produced.

use crate::catalog::{self, ChartWindow};
use crate::domain::CandleChart;
use crate::error::ChartError;
use crate::fetch::QuoteFetcher;
use crate::normalize::normalize;
use crate::render::derive;

/// Result of one full pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOutput {
    pub chart: CandleChart,
    /// Whether the raw payload came from the response cache.
    pub cache_hit: bool,
}

pub struct ChartPipeline {
    fetcher: QuoteFetcher,
}

impl ChartPipeline {
    pub fn new(fetcher: QuoteFetcher) -> Self {
        Self { fetcher }
    }

    /// Run the chain for a symbol and a catalog window index (the selector's
    /// value).
    pub async fn chart_at(
        &self,
        symbol: &str,
        window_index: usize,
    ) -> Result<ChartOutput, ChartError> {
        let window = catalog::window_at(window_index)?;
        self.chart(symbol, window).await
    }

    /// Run the chain for a symbol and an explicit window.
    pub async fn chart(
        &self,
        symbol: &str,
        window: ChartWindow,
    ) -> Result<ChartOutput, ChartError> {
        let fetched = self
            .fetcher
            .fetch(symbol, window.range_label, Some(window.sampling_interval))
            .await?;

        let series = normalize(fetched.payload)?;
        let chart = derive(series, symbol, window.range_label, window.sampling_interval)?;

        Ok(ChartOutput {
            chart,
            cache_hit: fetched.cache_hit,
        })
    }
}
