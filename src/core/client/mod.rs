//! Public client surface + builder.
//! Internals are split into `constants` (UA + defaults) and `retry` (per-page retry policy).

mod constants;
pub mod retry;

use crate::core::OiError;
use crate::purchases::PurchasesBuilder;
use constants::{
    ACCEPT, ACCEPT_LANGUAGE, DEFAULT_BASE_URL, DEFAULT_PAGE_DELAY, DEFAULT_TIMEOUT,
    LATEST_PURCHASES_PATH, SCREENER_PAGE_SIZE, SCREENER_PATH, USER_AGENT,
};
use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;
use url::Url;

pub use retry::{RetryClass, RetryConfig, retry_with_backoff};

/// Handle to the listing site. Cloning is cheap; the connection pool is shared.
#[derive(Debug, Clone)]
pub struct OiClient {
    http: Client,
    base_url: Url,
    retry: RetryConfig,
    page_delay: Duration,
}

impl Default for OiClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl OiClient {
    /// Create a new builder.
    pub fn builder() -> OiClientBuilder {
        OiClientBuilder::default()
    }

    /// Starts a purchases fetch bound to this client.
    pub fn purchases(&self) -> PurchasesBuilder {
        PurchasesBuilder::new(self)
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// The retry policy applied to every page.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// The pause taken between two consecutive pages.
    pub fn page_delay(&self) -> Duration {
        self.page_delay
    }

    /// URL of `page` on the recent-purchases listing, or on the screener when
    /// `ticker` is set.
    pub(crate) fn listing_url(&self, ticker: Option<&str>, page: u32) -> Result<Url, OiError> {
        let mut url = match ticker {
            None => self.base_url.join(LATEST_PURCHASES_PATH)?,
            Some(_) => self.base_url.join(SCREENER_PATH)?,
        };
        {
            let mut qp = url.query_pairs_mut();
            if let Some(sym) = ticker {
                qp.append_pair("s", sym);
                qp.append_pair("xp", "1");
                qp.append_pair("cnt", SCREENER_PAGE_SIZE);
            }
            qp.append_pair("page", &page.to_string());
        }
        Ok(url)
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct OiClientBuilder {
    user_agent: Option<String>,
    base_url: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: Option<RetryConfig>,
    page_delay: Option<Duration>,
}

impl OiClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the site root (e.g., `http://openinsider.com/`). Listing paths are joined onto it,
    /// so keep the trailing slash.
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the per-request timeout. Default: 30 seconds.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Replace the default retry policy (3 attempts, 2 second base delay).
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Set the politeness pause between pages. Default: 1 second.
    pub fn page_delay(mut self, dur: Duration) -> Self {
        self.page_delay = Some(dur);
        self
    }

    pub fn build(self) -> Result<OiClient, OiError> {
        let base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE));

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .default_headers(headers)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT));

        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(OiClient {
            http,
            base_url,
            retry: self.retry.unwrap_or_default(),
            page_delay: self.page_delay.unwrap_or(DEFAULT_PAGE_DELAY),
        })
    }
}
