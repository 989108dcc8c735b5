use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ChartError;

/// Sampling interval split into a magnitude and a duration-unit token
/// (`"90m"` parses to 90 × `"m"`).
///
/// The unit token is kept as written; resolving it to milliseconds is the
/// catalog's job, so a shape-valid token with an unknown unit (`"90x"`) parses
/// here and fails later with a distinct error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SamplingInterval {
    pub magnitude: u64,
    pub unit: String,
}

impl SamplingInterval {
    /// Parse the `<digits><unit>` shape. Anything else (no digits, no unit,
    /// non-alphabetic unit) indicates a broken catalog entry, not user error.
    pub fn parse(value: &str) -> Result<Self, ChartError> {
        let digits_len = value.chars().take_while(char::is_ascii_digit).count();
        let (digits, unit) = value.split_at(digits_len);

        if digits.is_empty() || unit.is_empty() || !unit.chars().all(|ch| ch.is_ascii_alphabetic())
        {
            return Err(ChartError::IntervalParse {
                value: value.to_owned(),
            });
        }

        let magnitude = digits.parse().map_err(|_| ChartError::IntervalParse {
            value: value.to_owned(),
        })?;

        Ok(Self {
            magnitude,
            unit: unit.to_owned(),
        })
    }
}

impl Display for SamplingInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit)
    }
}
