//! Static chart-window catalog and duration-unit table.
//!
//! The catalog is the parameter table behind the window selector: each entry
//! pairs the total range requested with the sampling interval between bars.
//! Both tables are fixed at compile time; the selector works with indices, so
//! no free-text interval ever reaches the quote endpoint.

use serde::Serialize;

use crate::error::ChartError;

/// One selectable chart window: total range plus sampling interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartWindow {
    pub range_label: &'static str,
    pub sampling_interval: &'static str,
}

impl ChartWindow {
    const fn new(range_label: &'static str, sampling_interval: &'static str) -> Self {
        Self {
            range_label,
            sampling_interval,
        }
    }
}

/// Window presented when the caller does not pick one (`1mo` of `90m` bars).
pub const DEFAULT_WINDOW_INDEX: usize = 3;

// Intervals accepted by the quote endpoint:
// 1m, 2m, 5m, 15m, 30m, 60m, 90m, 1h, 1d, 5d, 1wk, 1mo, 3mo.
const WINDOWS: [ChartWindow; 11] = [
    ChartWindow::new("1d", "1m"),
    ChartWindow::new("5d", "5m"),
    ChartWindow::new("15d", "15m"),
    ChartWindow::new("1mo", "90m"),
    ChartWindow::new("3mo", "1d"),
    ChartWindow::new("6mo", "1d"),
    ChartWindow::new("1y", "1d"),
    ChartWindow::new("2y", "1d"),
    ChartWindow::new("5y", "1wk"),
    ChartWindow::new("10y", "1mo"),
    ChartWindow::new("max", "1mo"),
];

const UNIT_MILLIS: [(&str, u64); 5] = [
    ("m", 60 * 1_000),
    ("d", 24 * 60 * 60 * 1_000),
    ("wk", 7 * 24 * 60 * 60 * 1_000),
    ("mo", 30 * 24 * 60 * 60 * 1_000),
    ("y", 365 * 24 * 60 * 60 * 1_000),
];

/// The full ordered window table, for selector UIs and listings.
pub fn windows() -> &'static [ChartWindow] {
    &WINDOWS
}

/// Select a window by catalog index.
pub fn window_at(index: usize) -> Result<ChartWindow, ChartError> {
    WINDOWS
        .get(index)
        .copied()
        .ok_or(ChartError::IndexOutOfRange {
            index,
            len: WINDOWS.len(),
        })
}

/// Milliseconds per duration unit (`m`, `d`, `wk`, `mo`, `y`).
pub fn unit_millis(token: &str) -> Result<u64, ChartError> {
    UNIT_MILLIS
        .iter()
        .find(|(unit, _)| *unit == token)
        .map(|&(_, millis)| millis)
        .ok_or_else(|| ChartError::UnknownUnit {
            token: token.to_owned(),
        })
}
