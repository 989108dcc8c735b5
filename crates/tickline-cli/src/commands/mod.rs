mod chart;
mod windows;

use std::sync::Arc;

use serde_json::Value;
use tickline_core::{
    ChartPipeline, Envelope, EnvelopeError, EnvelopeMeta, QuoteFetcher, ReqwestHttpClient,
    ResponseCache,
};
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
    pub cache_hit: bool,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            errors: Vec::new(),
            latency_ms: 0,
            cache_hit: false,
        }
    }

    pub fn failed(error: EnvelopeError) -> Self {
        Self {
            data: Value::Null,
            errors: vec![error],
            latency_ms: 0,
            cache_hit: false,
        }
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn with_cache_hit(mut self, cache_hit: bool) -> Self {
        self.cache_hit = cache_hit;
        self
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let command_result = match &cli.command {
        Command::Chart(args) => chart::run(args, &build_pipeline(cli)).await?,
        Command::Windows => windows::run()?,
    };

    let meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        "v1.0.0",
        command_result.latency_ms,
        command_result.cache_hit,
    );

    Ok(Envelope::with_errors(
        meta,
        command_result.data,
        command_result.errors,
    ))
}

fn build_pipeline(cli: &Cli) -> ChartPipeline {
    let cache = if cli.no_cache {
        ResponseCache::disabled()
    } else {
        ResponseCache::with_default_ttl()
    };

    let fetcher = QuoteFetcher::new(Arc::new(ReqwestHttpClient::new()))
        .with_cache(cache)
        .with_timeout_ms(cli.timeout_ms);

    ChartPipeline::new(fetcher)
}
