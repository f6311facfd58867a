//! Insider purchases: fetch, decode, filter and paginate the listing tables.
//!
//! Internals are split into:
//! - `layout`:   the two known column layouts
//! - `decode`:   one table row into typed candidate fields
//! - `filter`:   ordered exclusion rules and acceptance
//! - `page`:     one page per call with retry, plus table extraction
//! - `paginate`: the loop tying them together

mod decode;
mod filter;
mod layout;
mod model;
mod page;
mod paginate;

pub use decode::{Candidate, DecodeOutcome, RawRow, decode};
pub use filter::{FilterOutcome, apply, apply_with, local_today};
pub use layout::{Columns, Layout, MIN_CELLS};
pub use model::{
    DEFAULT_CONFIDENCE, DEFAULT_LIMIT, DEFAULT_MAX_PAGES, FetchRequest, FetchResult, FilterStats,
    Filters, MAX_LIMIT, NAME_SEARCH_MAX_PAGES, RECOMMENDATION, RejectReason, Transaction,
};
pub use page::{HttpPageSource, PageOutcome, PageSource, TableScan, extract_table};
pub use paginate::Paginator;

use crate::core::OiClient;

/// A builder for one insider-purchases fetch.
///
/// # Example
///
/// ```no_run
/// # use openinsider_rs::{OiClient, PurchasesBuilder};
/// # #[tokio::main]
/// # async fn main() {
/// let client = OiClient::default();
/// let result = PurchasesBuilder::new(&client)
///     .limit(25)
///     .insider_titles(["CEO", "CFO"])
///     .min_transaction_value(100_000.0)
///     .fetch()
///     .await;
/// println!("{} purchases, {} rows scanned", result.transactions.len(), result.stats.total_rows_scraped);
/// # }
/// ```
pub struct PurchasesBuilder {
    client: OiClient,
    limit: usize,
    filters: Filters,
}

impl PurchasesBuilder {
    pub fn new(client: &OiClient) -> Self {
        Self {
            client: client.clone(),
            limit: DEFAULT_LIMIT,
            filters: Filters::default(),
        }
    }

    /// Sets the number of accepted records to collect (clamped to `1..=500`).
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Replaces all filters at once, e.g. with [`Filters::from_json`] output.
    #[must_use]
    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Keeps records whose title contains any of `titles` (case-insensitive).
    #[must_use]
    pub fn insider_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.insider_titles = Some(titles.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn min_transaction_value(mut self, min: f64) -> Self {
        self.filters.min_transaction_value = Some(min);
        self
    }

    #[must_use]
    pub const fn previous_day_only(mut self, yes: bool) -> Self {
        self.filters.previous_day_only = yes;
        self
    }

    #[must_use]
    pub fn insider_name(mut self, name: impl Into<String>) -> Self {
        self.filters.insider_name = Some(name.into());
        self
    }

    /// Scopes the fetch to one symbol, which switches to the screener listing.
    #[must_use]
    pub fn ticker(mut self, symbol: impl Into<String>) -> Self {
        self.filters.ticker = Some(symbol.into());
        self
    }

    /// The normalized request this builder will run.
    #[must_use]
    pub fn request(&self) -> FetchRequest {
        FetchRequest::new(self.limit, self.filters.clone())
    }

    /// Walks the listing and returns accepted purchases with filter statistics.
    ///
    /// Network trouble does not surface as an error: the fetch stops and returns
    /// what it had. Compare `transactions.len()` with the limit to detect that.
    #[tracing::instrument(skip(self), fields(limit = self.limit))]
    pub async fn fetch(self) -> FetchResult {
        let request = self.request();
        let source = HttpPageSource::new(&self.client, request.ticker.clone());
        let result = Paginator::new(&source, self.client.page_delay())
            .run(&request)
            .await;
        tracing::info!(
            accepted = result.transactions.len(),
            rows = result.stats.total_rows_scraped,
            rejected = result.stats.rejected(),
            "fetch complete"
        );
        result
    }
}
