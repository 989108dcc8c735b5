use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
///
/// Expected bad-input outcomes (unknown symbol, malformed upstream data) are
/// reported inside the envelope and never reach this type; what lands here is
/// an environment or configuration failure.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Chart(#[from] tickline_core::ChartError),

    #[error("strict mode failed: warnings={warning_count}, errors={error_count}")]
    StrictModeViolation {
        warning_count: usize,
        error_count: usize,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::StrictModeViolation { .. } => 5,
            Self::Chart(_) | Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
