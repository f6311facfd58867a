//! Page fetching: one listing page per call, retried under the client's policy.

use std::future::Future;
use std::pin::Pin;

use scraper::{Html, Selector};

use super::decode::RawRow;
use crate::core::{OiClient, OiError, client::retry_with_backoff, net};

/// Result of fetching one listing page.
#[derive(Debug)]
pub enum PageOutcome {
    /// The data table and its body rows.
    Rows(Vec<RawRow>),
    /// No data table in the document: the listing has run out.
    NoTable,
    /// The data table is present but has no rows.
    Exhausted,
    /// The page could not be fetched; pagination must stop.
    Failed(OiError),
}

/// A source of listing pages.
///
/// Implemented by [`HttpPageSource`]; tests substitute canned pages.
pub trait PageSource: Send + Sync {
    /// Fetches 1-based `page`.
    fn fetch_page<'a>(
        &'a self,
        page: u32,
    ) -> Pin<Box<dyn Future<Output = PageOutcome> + Send + 'a>>;
}

/// Fetches pages from the recent-purchases listing, or from the screener for a ticker.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: OiClient,
    ticker: Option<String>,
}

impl HttpPageSource {
    pub fn new(client: &OiClient, ticker: Option<String>) -> Self {
        Self {
            client: client.clone(),
            ticker,
        }
    }

    async fn load(&self, page: u32) -> PageOutcome {
        let url = match self.client.listing_url(self.ticker.as_deref(), page) {
            Ok(u) => u,
            Err(e) => return PageOutcome::Failed(e),
        };
        let cfg = self.client.retry_config();
        let max_attempts = cfg.max_attempts;

        let scanned = retry_with_backoff(
            cfg,
            |attempt| {
                let url = url.clone();
                async move {
                    let res = self.attempt(url, page).await;
                    if let Err(e) = &res {
                        tracing::warn!(page, attempt, max_attempts, error = %e, "page attempt failed");
                    }
                    res
                }
            },
            |e| cfg.classify(e),
        )
        .await;

        match scanned {
            Ok(TableScan::Missing) => PageOutcome::NoTable,
            Ok(TableScan::Rows(rows)) if rows.is_empty() => PageOutcome::Exhausted,
            Ok(TableScan::Rows(rows)) => PageOutcome::Rows(rows),
            Err(e) => PageOutcome::Failed(e),
        }
    }

    async fn attempt(&self, url: url::Url, page: u32) -> Result<TableScan, OiError> {
        let resp = self.client.http().get(url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(OiError::Status {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }
        let endpoint = if self.ticker.is_some() { "screener" } else { "latest_purchases" };
        let key = match &self.ticker {
            Some(sym) => format!("{sym}_page{page}"),
            None => format!("page{page}"),
        };
        let body = net::get_text(resp, endpoint, &key, "html").await?;
        extract_table(&body)
    }
}

impl PageSource for HttpPageSource {
    fn fetch_page<'a>(
        &'a self,
        page: u32,
    ) -> Pin<Box<dyn Future<Output = PageOutcome> + Send + 'a>> {
        Box::pin(self.load(page))
    }
}

/// What the data table of a page looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableScan {
    Missing,
    /// Body rows in document order; empty when the table has no `tbody`.
    Rows(Vec<RawRow>),
}

/// Locates `table.tinytable` and collects the text of every `tbody > tr > td`.
pub fn extract_table(html: &str) -> Result<TableScan, OiError> {
    let table_sel = selector("table.tinytable")?;
    let body_sel = selector("tbody")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    let doc = Html::parse_document(html);
    let Some(table) = doc.select(&table_sel).next() else {
        return Ok(TableScan::Missing);
    };
    let Some(tbody) = table.select(&body_sel).next() else {
        return Ok(TableScan::Rows(Vec::new()));
    };

    let rows = tbody
        .select(&row_sel)
        .map(|tr| {
            tr.select(&cell_sel)
                .map(|td| td.text().collect::<String>().trim().to_string())
                .collect::<RawRow>()
        })
        .collect();
    Ok(TableScan::Rows(rows))
}

fn selector(css: &str) -> Result<Selector, OiError> {
    Selector::parse(css).map_err(|e| OiError::Data(format!("selector `{css}`: {e:?}")))
}
