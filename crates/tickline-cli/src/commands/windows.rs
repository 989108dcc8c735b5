use serde_json::json;
use tickline_core::catalog;

use crate::error::CliError;

use super::CommandResult;

pub fn run() -> Result<CommandResult, CliError> {
    let windows = catalog::windows()
        .iter()
        .enumerate()
        .map(|(index, window)| {
            json!({
                "index": index,
                "range": window.range_label,
                "interval": window.sampling_interval,
                "default": index == catalog::DEFAULT_WINDOW_INDEX,
            })
        })
        .collect::<Vec<_>>();

    Ok(CommandResult::ok(json!({ "windows": windows })))
}
