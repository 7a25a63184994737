use crate::prelude::*;
use numclass_core::facts::{
    fact_url, fallback_fact, DEFAULT_FACTS_BASE_URL, DEFAULT_FACT_TIMEOUT_SECS,
};
use numclass_core::input::NumberInput;
use reqwest::StatusCode;
use std::time::Duration;

#[derive(Debug, Clone, clap::Args)]
pub struct FactOptions {
    /// Base URL of the number facts service
    #[arg(long, env = "NUMCLASS_FACTS_URL", default_value = DEFAULT_FACTS_BASE_URL)]
    pub facts_url: String,

    /// Timeout in seconds for a single fact lookup (default: 5)
    #[arg(long, env = "NUMCLASS_FACT_TIMEOUT", default_value_t = DEFAULT_FACT_TIMEOUT_SECS)]
    pub fact_timeout: u64,
}

/// Looks up fun facts, falling back to a fixed sentence on any failure
#[derive(Debug, Clone)]
pub struct FactFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl FactFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("numclass/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client for the facts service")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_options(options: &FactOptions) -> Result<Self> {
        Self::new(
            options.facts_url.clone(),
            Duration::from_secs(options.fact_timeout),
        )
    }

    /// Fetch the math fact for `n`
    ///
    /// Never fails: transport errors, timeouts and non-200 responses all yield
    /// the fallback fact.
    pub async fn fetch_fact(&self, n: i64) -> String {
        match self.request_fact(n).await {
            Ok(fact) => fact,
            Err(err) => {
                log::warn!("Using fallback fact for {n}: {err}");
                fallback_fact(n)
            }
        }
    }

    /// Fun fact for a parsed number
    ///
    /// Only integral values are looked up; anything else gets the fallback
    /// without touching the network.
    pub async fn fact_for(&self, number: NumberInput) -> String {
        match number.as_integer() {
            Some(n) => self.fetch_fact(n).await,
            None => fallback_fact(number),
        }
    }

    async fn request_fact(&self, n: i64) -> Result<String, Error> {
        let url = fact_url(&self.base_url, n);
        log::debug!("Fetching fact from {url}");

        let response = self.client.get(&url).send().await.map_err(upstream_error)?;

        if response.status() != StatusCode::OK {
            return Err(Error::UpstreamStatus(response.status().as_u16()));
        }

        response.text().await.map_err(upstream_error)
    }
}

fn upstream_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::UpstreamTimeout(err.to_string())
    } else {
        Error::UpstreamUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn fetcher(base_url: &str, timeout: Duration) -> FactFetcher {
        FactFetcher::new(base_url, timeout).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_fact_returns_body_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/42/math"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("42 is the number of spots on a pair of dice."),
            )
            .expect(1)
            .mount(&server)
            .await;

        let fact = fetcher(&server.uri(), Duration::from_secs(5))
            .fetch_fact(42)
            .await;

        assert_eq!(fact, "42 is the number of spots on a pair of dice.");
    }

    #[tokio::test]
    async fn test_fetch_fact_non_success_status_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/7/math"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let fact = fetcher(&server.uri(), Duration::from_secs(5))
            .fetch_fact(7)
            .await;

        assert_eq!(fact, "7 is a number.");
    }

    #[tokio::test]
    async fn test_fetch_fact_timeout_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/13/math"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("too late")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let fetcher = fetcher(&server.uri(), Duration::from_millis(100));

        assert!(matches!(
            fetcher.request_fact(13).await,
            Err(Error::UpstreamTimeout(_))
        ));
        assert_eq!(fetcher.fetch_fact(13).await, "13 is a number.");
    }

    #[tokio::test]
    async fn test_fetch_fact_unreachable_falls_back() {
        // Nothing listens on port 1.
        let fetcher = fetcher("http://127.0.0.1:1", Duration::from_secs(1));

        assert!(fetcher.request_fact(5).await.is_err());
        assert_eq!(fetcher.fetch_fact(5).await, "5 is a number.");
    }

    #[tokio::test]
    async fn test_fact_for_fractional_skips_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("unexpected"))
            .expect(0)
            .mount(&server)
            .await;

        let fact = fetcher(&server.uri(), Duration::from_secs(5))
            .fact_for(NumberInput::Real(2.5))
            .await;

        assert_eq!(fact, "2.5 is a number.");
    }

    #[tokio::test]
    async fn test_fact_for_integer_valued_real_uses_integer_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/28/math"))
            .respond_with(ResponseTemplate::new(200).set_body_string("28 is perfect."))
            .expect(1)
            .mount(&server)
            .await;

        let fact = fetcher(&server.uri(), Duration::from_secs(5))
            .fact_for(NumberInput::Real(28.0))
            .await;

        assert_eq!(fact, "28 is perfect.");
    }
}
