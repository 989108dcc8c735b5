//! Domain types for the chart pipeline: parsed sampling intervals, OHLCV
//! bars, and the render-ready candlestick structures.

mod bar;
mod interval;

pub use bar::{Bar, BarSeries, CandleChart, RenderBar, Trend};
pub use interval::SamplingInterval;
