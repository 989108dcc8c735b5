use std::time::Instant;

use serde_json::Value;
use tickline_core::{CandleChart, ChartPipeline, EnvelopeError};

use crate::cli::ChartArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &ChartArgs, pipeline: &ChartPipeline) -> Result<CommandResult, CliError> {
    let started = Instant::now();

    match pipeline.chart_at(&args.symbol, args.window).await {
        Ok(output) => {
            let mut data = serde_json::to_value(&output.chart)?;
            data["x_axis"] = Value::from(CandleChart::X_AXIS);
            Ok(CommandResult::ok(data)
                .with_latency(started.elapsed().as_millis() as u64)
                .with_cache_hit(output.cache_hit))
        }
        // Bad symbol or bad upstream data: report inside the envelope so the
        // caller still gets structured output with metadata.
        Err(error) if error.is_user_input() => {
            Ok(CommandResult::failed(EnvelopeError::from(&error))
                .with_latency(started.elapsed().as_millis() as u64))
        }
        // Environment/configuration failures propagate to stderr.
        Err(error) => Err(error.into()),
    }
}
