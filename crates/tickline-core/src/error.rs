use thiserror::Error;

/// Pipeline error taxonomy. Every variant is terminal for the current query:
/// nothing is retried and no partial chart is ever produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("chart window index {index} is out of range (catalog has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown duration unit '{token}', expected one of m, d, wk, mo, y")]
    UnknownUnit { token: String },

    #[error("quote request failed: {reason}")]
    Fetch { reason: String },

    #[error("quote service error: {description}")]
    Remote { description: String },

    #[error("malformed quote payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("invalid sampling interval '{value}', expected <digits><unit>")]
    IntervalParse { value: String },
}

impl ChartError {
    pub fn fetch(reason: impl Into<String>) -> Self {
        Self::Fetch {
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }

    /// Failures caused by the user's query or the upstream data it produced,
    /// as opposed to configuration and environment failures. Callers surface
    /// the two classes differently.
    pub const fn is_user_input(&self) -> bool {
        matches!(self, Self::Remote { .. } | Self::MalformedPayload { .. })
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "chart.window_out_of_range",
            Self::UnknownUnit { .. } => "chart.unknown_unit",
            Self::Fetch { .. } => "chart.fetch",
            Self::Remote { .. } => "chart.remote",
            Self::MalformedPayload { .. } => "chart.malformed_payload",
            Self::IntervalParse { .. } => "chart.interval_parse",
        }
    }
}
