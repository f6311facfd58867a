//! Pagination controller: walks listing pages until the quota is met, the
//! listing runs out, or a page fails.

use std::time::Duration;

use chrono::NaiveDate;

use super::decode::{DecodeOutcome, RawRow, decode};
use super::filter::{self, FilterOutcome};
use super::layout::Layout;
use super::model::{FetchRequest, FetchResult};
use super::page::{PageOutcome, PageSource};

/// Drives a [`PageSource`] for one request.
pub struct Paginator<'s, S: PageSource> {
    source: &'s S,
    page_delay: Duration,
    today: fn() -> NaiveDate,
}

impl<'s, S: PageSource> Paginator<'s, S> {
    pub fn new(source: &'s S, page_delay: Duration) -> Self {
        Self {
            source,
            page_delay,
            today: filter::local_today,
        }
    }

    /// Replaces the local clock used by the previous-day rule.
    #[must_use]
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Runs the fetch to completion. Never fails: page failures end the walk
    /// and whatever was accumulated is returned.
    pub async fn run(&self, request: &FetchRequest) -> FetchResult {
        let layout = Layout::select(request.ticker.is_some());
        let max_pages = request.max_pages();
        let mut acc = FetchResult::default();
        let mut page = 1;

        while acc.transactions.len() < request.limit && page <= max_pages {
            let rows = match self.source.fetch_page(page).await {
                PageOutcome::Rows(rows) => rows,
                PageOutcome::NoTable => {
                    tracing::info!(page, "no data table, stopping pagination");
                    break;
                }
                PageOutcome::Exhausted => {
                    tracing::info!(page, "no more rows, stopping pagination");
                    break;
                }
                PageOutcome::Failed(e) => {
                    tracing::warn!(page, error = %e, "page failed, returning partial results");
                    break;
                }
            };

            let before = acc.transactions.len();
            absorb(&mut acc, rows, request, layout, self.today);
            tracing::info!(
                page,
                accepted = acc.transactions.len() - before,
                total = acc.transactions.len(),
                "page processed"
            );

            if acc.transactions.len() >= request.limit || page == max_pages {
                break;
            }
            page += 1;
            tokio::time::sleep(self.page_delay).await;
        }

        acc
    }
}

/// Decodes and filters rows until the quota is reached; the rest of the page is left untouched.
fn absorb(
    acc: &mut FetchResult,
    rows: Vec<RawRow>,
    request: &FetchRequest,
    layout: Layout,
    today: fn() -> NaiveDate,
) {
    for row in rows {
        if acc.transactions.len() >= request.limit {
            break;
        }
        let candidate = match decode(&row, layout) {
            DecodeOutcome::Candidate(c) => c,
            DecodeOutcome::Malformed => {
                tracing::debug!(cells = row.len(), "skipping short row");
                continue;
            }
        };
        acc.stats.total_rows_scraped += 1;
        match filter::apply_with(candidate, request, today) {
            FilterOutcome::Accepted(t) => acc.transactions.push(t),
            FilterOutcome::Rejected(reason) => acc.stats.record(reason),
        }
    }
}
