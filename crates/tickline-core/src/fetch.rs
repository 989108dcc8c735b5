//! Quote fetcher: builds the chart query for one symbol/range/interval and
//! returns the raw decoded payload.
//!
//! The fetcher does not interpret the payload beyond JSON decoding; envelope
//! inspection (error detection, bar extraction) belongs to the normalizer.

use std::sync::Arc;

use serde_json::Value;

use crate::cache::ResponseCache;
use crate::error::ChartError;
use crate::http_client::{HttpClient, HttpRequest};

/// Default per-request timeout. The quote service has no SLA; a stuck
/// connection must not hang the query forever.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const CHART_ENDPOINT: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Headers that make the request resemble an ordinary browser session. The
/// quote service rejects requests without a plausible header set, so these
/// are part of the fetch contract, not cosmetic.
const BROWSER_HEADERS: [(&str, &str); 4] = [
    ("connection", "keep-alive"),
    ("expires", "-1"),
    ("upgrade-insecure-requests", "1"),
    (
        "user-agent",
        "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) \
         Chrome/54.0.2840.99 Safari/537.36",
    ),
];

/// Raw chart payload plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPayload {
    pub payload: Value,
    pub cache_hit: bool,
}

/// Issues one chart query per invocation, read-through via [`ResponseCache`].
pub struct QuoteFetcher {
    http_client: Arc<dyn HttpClient>,
    cache: ResponseCache,
    timeout_ms: u64,
}

impl QuoteFetcher {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            cache: ResponseCache::with_default_ttl(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Fetch the chart payload for `symbol` over `range_label`, sampled at
    /// `sampling_interval` (or the endpoint's default sampling when absent).
    ///
    /// The symbol is opaque user input and is not validated here; an unknown
    /// ticker comes back as the service's error envelope, which the
    /// normalizer turns into the remote-error variant. Transport failures
    /// (DNS, connect, timeout) surface as [`ChartError::Fetch`]; there is no
    /// automatic retry.
    pub async fn fetch(
        &self,
        symbol: &str,
        range_label: &str,
        sampling_interval: Option<&str>,
    ) -> Result<FetchedPayload, ChartError> {
        let key = cache_key(symbol, range_label, sampling_interval);

        if let Some(body) = self.cache.get(&key).await {
            return Ok(FetchedPayload {
                // Cached bodies were stored after a successful decode.
                payload: decode_body(&body, 200)?,
                cache_hit: true,
            });
        }

        let mut request = HttpRequest::get(chart_url(symbol, range_label, sampling_interval))
            .with_timeout_ms(self.timeout_ms);
        for (name, value) in BROWSER_HEADERS {
            request = request.with_header(name, value);
        }

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| ChartError::fetch(error.to_string()))?;

        let payload = decode_body(&response.body, response.status)?;
        self.cache.put(key, response.body).await;

        Ok(FetchedPayload {
            payload,
            cache_hit: false,
        })
    }
}

fn cache_key(symbol: &str, range_label: &str, sampling_interval: Option<&str>) -> String {
    format!(
        "{symbol}|{range_label}|{}",
        sampling_interval.unwrap_or_default()
    )
}

fn chart_url(symbol: &str, range_label: &str, sampling_interval: Option<&str>) -> String {
    let interval_param = sampling_interval
        .map(|interval| format!("&interval={}", urlencoding::encode(interval)))
        .unwrap_or_default();

    format!(
        "{CHART_ENDPOINT}/{}?region=US&lang=en-US&includePrePost=false{interval_param}\
         &useYfid=true&range={}&corsDomain=finance.yahoo.com&.tsrc=finance",
        urlencoding::encode(symbol),
        urlencoding::encode(range_label),
    )
}

/// Decode the response body as JSON. The service delivers its error envelope
/// with non-2xx statuses, so a decodable body is returned regardless of
/// status; only a non-JSON body is classified by how the transport fared.
fn decode_body(body: &str, status: u16) -> Result<Value, ChartError> {
    match serde_json::from_str(body) {
        Ok(payload) => Ok(payload),
        Err(error) if (200..300).contains(&status) => Err(ChartError::malformed(format!(
            "response body is not valid JSON: {error}"
        ))),
        Err(_) => Err(ChartError::fetch(format!(
            "quote endpoint returned status {status} with a non-JSON body"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    use super::*;
    use crate::http_client::{HttpError, HttpResponse};

    #[derive(Debug)]
    struct RecordingHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn returning(response: Result<HttpResponse, HttpError>) -> Arc<Self> {
            Arc::new(Self {
                response,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    #[tokio::test]
    async fn builds_chart_url_with_all_parameters() {
        let client = RecordingHttpClient::returning(Ok(HttpResponse::ok_json("{}")));
        let fetcher = QuoteFetcher::new(client.clone()).with_cache(ResponseCache::disabled());

        fetcher
            .fetch("AAPL", "1mo", Some("90m"))
            .await
            .expect("fetch should succeed");

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1);
        let url = &requests[0].url;
        assert!(url.starts_with("https://query1.finance.yahoo.com/v8/finance/chart/AAPL?"));
        assert!(url.contains("region=US"));
        assert!(url.contains("lang=en-US"));
        assert!(url.contains("includePrePost=false"));
        assert!(url.contains("&interval=90m"));
        assert!(url.contains("useYfid=true"));
        assert!(url.contains("&range=1mo"));
        assert!(url.contains("corsDomain=finance.yahoo.com"));
        assert!(url.contains(".tsrc=finance"));
    }

    #[tokio::test]
    async fn omits_interval_parameter_when_absent() {
        let client = RecordingHttpClient::returning(Ok(HttpResponse::ok_json("{}")));
        let fetcher = QuoteFetcher::new(client.clone()).with_cache(ResponseCache::disabled());

        fetcher
            .fetch("AAPL", "1mo", None)
            .await
            .expect("fetch should succeed");

        let requests = client.recorded_requests();
        let url = &requests[0].url;
        assert!(!url.contains("interval="));
        assert!(url.contains("&range=1mo"));
    }

    #[tokio::test]
    async fn percent_encodes_opaque_symbols() {
        let client = RecordingHttpClient::returning(Ok(HttpResponse::ok_json("{}")));
        let fetcher = QuoteFetcher::new(client.clone()).with_cache(ResponseCache::disabled());

        fetcher
            .fetch("^DJI", "3mo", Some("1d"))
            .await
            .expect("fetch should succeed");

        let requests = client.recorded_requests();
        assert!(requests[0].url.contains("/chart/%5EDJI?"));
    }

    #[tokio::test]
    async fn sets_browser_headers() {
        let client = RecordingHttpClient::returning(Ok(HttpResponse::ok_json("{}")));
        let fetcher = QuoteFetcher::new(client.clone()).with_cache(ResponseCache::disabled());

        fetcher
            .fetch("MSFT", "1d", Some("1m"))
            .await
            .expect("fetch should succeed");

        let requests = client.recorded_requests();
        let headers = &requests[0].headers;
        assert_eq!(headers.get("connection").map(String::as_str), Some("keep-alive"));
        assert_eq!(headers.get("expires").map(String::as_str), Some("-1"));
        assert_eq!(
            headers.get("upgrade-insecure-requests").map(String::as_str),
            Some("1")
        );
        assert!(headers
            .get("user-agent")
            .is_some_and(|agent| agent.starts_with("Mozilla/5.0")));
    }

    #[tokio::test]
    async fn cache_hit_skips_the_network() {
        let client = RecordingHttpClient::returning(Ok(HttpResponse::ok_json(r#"{"chart":{}}"#)));
        let fetcher =
            QuoteFetcher::new(client.clone()).with_cache(ResponseCache::with_default_ttl());

        let first = fetcher
            .fetch("AAPL", "1mo", Some("90m"))
            .await
            .expect("first fetch");
        let second = fetcher
            .fetch("AAPL", "1mo", Some("90m"))
            .await
            .expect("second fetch");

        assert!(!first.cache_hit);
        assert!(second.cache_hit);
        assert_eq!(first.payload, second.payload);
        assert_eq!(client.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn distinct_windows_use_distinct_cache_keys() {
        let client = RecordingHttpClient::returning(Ok(HttpResponse::ok_json("{}")));
        let fetcher =
            QuoteFetcher::new(client.clone()).with_cache(ResponseCache::with_default_ttl());

        fetcher.fetch("AAPL", "1mo", Some("90m")).await.expect("fetch");
        fetcher.fetch("AAPL", "3mo", Some("1d")).await.expect("fetch");

        assert_eq!(client.recorded_requests().len(), 2);
    }

    #[tokio::test]
    async fn transport_failure_surfaces_as_fetch_error() {
        let client = RecordingHttpClient::returning(Err(HttpError::new("connection reset")));
        let fetcher = QuoteFetcher::new(client).with_cache(ResponseCache::disabled());

        let err = fetcher
            .fetch("AAPL", "1mo", Some("90m"))
            .await
            .expect_err("must fail");
        assert!(matches!(err, ChartError::Fetch { .. }));
    }

    #[tokio::test]
    async fn non_json_success_body_is_malformed() {
        let client = RecordingHttpClient::returning(Ok(HttpResponse::ok_json("<html>oops</html>")));
        let fetcher = QuoteFetcher::new(client).with_cache(ResponseCache::disabled());

        let err = fetcher
            .fetch("AAPL", "1mo", Some("90m"))
            .await
            .expect_err("must fail");
        assert!(matches!(err, ChartError::MalformedPayload { .. }));
    }

    #[tokio::test]
    async fn non_json_error_status_is_a_fetch_error() {
        let client = RecordingHttpClient::returning(Ok(HttpResponse {
            status: 502,
            body: String::from("Bad Gateway"),
        }));
        let fetcher = QuoteFetcher::new(client).with_cache(ResponseCache::disabled());

        let err = fetcher
            .fetch("AAPL", "1mo", Some("90m"))
            .await
            .expect_err("must fail");
        assert!(matches!(err, ChartError::Fetch { .. }));
    }

    #[tokio::test]
    async fn json_error_envelope_passes_through_despite_status() {
        let body = r#"{"chart":{"result":null,"error":{"description":"No data found"}}}"#;
        let client = RecordingHttpClient::returning(Ok(HttpResponse {
            status: 404,
            body: String::from(body),
        }));
        let fetcher = QuoteFetcher::new(client).with_cache(ResponseCache::disabled());

        let fetched = fetcher
            .fetch("NOPE", "1mo", Some("90m"))
            .await
            .expect("payload should pass through");
        assert_eq!(fetched.payload["chart"]["error"]["description"], "No data found");
    }
}
