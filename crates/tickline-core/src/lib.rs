//! # Tickline Core
//!
//! Fetches historical price bars for one instrument from the remote quote
//! service and derives the values a candlestick renderer needs.
//!
//! The crate is a single request/transform chain per query:
//!
//! ```text
//! ┌──────────────────┐
//! │ Interval Catalog │ (range, sampling interval) pairs + unit table
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │  Quote Fetcher   │────▶│ HTTP Client      │
//! │  (+ cache)       │     │ (reqwest / mock) │
//! └────────┬─────────┘     └──────────────────┘
//!          ▼ raw payload
//! ┌──────────────────┐
//! │   Normalizer     │ typed validation, gmtoffset shift
//! └────────┬─────────┘
//!          ▼ bar series
//! ┌──────────────────┐
//! │    Deriver       │ trend per bar + shared body width
//! └──────────────────┘
//! ```
//!
//! Every failure is terminal for its query and carries a [`ChartError`]
//! variant the caller can tell apart; nothing is retried and no partial
//! chart is ever returned.

pub mod cache;
pub mod catalog;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod http_client;
pub mod normalize;
pub mod pipeline;
pub mod render;

// Re-export commonly used types at crate root for convenience

pub use cache::ResponseCache;
pub use catalog::{ChartWindow, DEFAULT_WINDOW_INDEX};
pub use domain::{Bar, BarSeries, CandleChart, RenderBar, SamplingInterval, Trend};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::ChartError;
pub use fetch::{FetchedPayload, QuoteFetcher, DEFAULT_TIMEOUT_MS};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
pub use normalize::normalize;
pub use pipeline::{ChartOutput, ChartPipeline};
pub use render::{bar_width_ms, derive, BODY_WIDTH_RATIO};
