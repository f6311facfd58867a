// src/purchases/model.rs

use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::OiError;

/// Every accepted record is a purchase, hence a buy signal.
pub const RECOMMENDATION: &str = "buy";

/// Static confidence score attached to every accepted record.
pub const DEFAULT_CONFIDENCE: u8 = 75;

/// Default number of accepted records to collect.
pub const DEFAULT_LIMIT: usize = 100;

/// Largest accepted `limit`; bigger values are clamped.
pub const MAX_LIMIT: usize = 500;

/// Page cap for ticker-scoped and unscoped fetches.
pub const DEFAULT_MAX_PAGES: u32 = 20;

/// Page cap for insider-name searches without a ticker.
pub const NAME_SEARCH_MAX_PAGES: u32 = 50;

/// Optional filters, in the JSON shape accepted by callers:
/// `{"insiderTitles": [...], "minTransactionValue": n, "previousDayOnly": b, "insiderName": s}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filters {
    pub insider_titles: Option<Vec<String>>,
    pub min_transaction_value: Option<f64>,
    pub previous_day_only: bool,
    pub insider_name: Option<String>,
    pub ticker: Option<String>,
}

impl Filters {
    /// Parses a JSON filter object. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `OiError::Json` if `raw` is not a valid filter object.
    pub fn from_json(raw: &str) -> Result<Self, OiError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Parameters of one fetch. Immutable once the fetch starts.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Target count of accepted records.
    pub limit: usize,
    /// Case-insensitive substrings; a title must contain at least one. Empty means no filter.
    pub insider_titles: Vec<String>,
    /// Minimum transaction value (notional, in dollars).
    pub min_transaction_value: Option<f64>,
    /// Keep only trades dated yesterday (local clock).
    pub previous_day_only: bool,
    /// Case-insensitive substring of the insider's name.
    pub insider_name: Option<String>,
    /// Restricts the fetch to one symbol (switches endpoint and table layout).
    pub ticker: Option<String>,
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, Filters::default())
    }
}

impl FetchRequest {
    /// Builds a normalized request.
    ///
    /// `limit` is clamped to `1..=MAX_LIMIT`; blank names and tickers, a zero
    /// or non-finite value floor, are all treated as unset. Tickers are upper-cased.
    #[must_use]
    pub fn new(limit: usize, filters: Filters) -> Self {
        let non_blank = |s: Option<String>| {
            s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        };
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            insider_titles: filters.insider_titles.unwrap_or_default(),
            min_transaction_value: filters
                .min_transaction_value
                .filter(|v| v.is_finite() && *v != 0.0),
            previous_day_only: filters.previous_day_only,
            insider_name: non_blank(filters.insider_name),
            ticker: non_blank(filters.ticker).map(|t| t.to_uppercase()),
        }
    }

    /// Upper bound on pages walked for this request.
    #[must_use]
    pub const fn max_pages(&self) -> u32 {
        if self.insider_name.is_some() && self.ticker.is_none() {
            NAME_SEARCH_MAX_PAGES
        } else {
            DEFAULT_MAX_PAGES
        }
    }
}

/// One accepted insider purchase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub ticker: String,
    /// Falls back to the ticker when the listing carries no company name.
    pub company_name: String,
    pub insider_name: String,
    pub insider_title: String,
    /// `YYYY-MM-DD` as scraped.
    pub trade_date: String,
    /// As scraped; usually `YYYY-MM-DD HH:MM:SS`.
    pub filing_date: String,
    pub trade_type: String,
    pub price: f64,
    pub quantity: i64,
    pub value: f64,
    pub recommendation: String,
    pub confidence: u8,
}

impl Transaction {
    /// One-line summary, e.g. `$ACME - BUY @ $12.50 (Insider: Doe John, Date: 2024-05-01, Qty: 10,000)`.
    #[must_use]
    pub fn headline(&self) -> String {
        format!(
            "${} - {} @ ${:.2} (Insider: {}, Date: {}, Qty: {})",
            self.ticker,
            self.recommendation.to_uppercase(),
            self.price,
            self.insider_name,
            self.trade_date,
            group_thousands(self.quantity)
        )
    }

    /// Deterministic id: the same filing always maps to the same value, while
    /// two insiders buying the same stock on the same day do not collide.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let input = format!(
            "{}|{}|{}|{}|{}",
            self.ticker, self.filing_date, self.insider_name, self.quantity, self.price
        );
        let digest = Sha256::digest(input.as_bytes());
        let hex: String = digest.iter().take(8).map(|b| format!("{b:02x}")).collect();
        format!("openinsider_{hex}")
    }

    /// Filing date at local midnight, as Unix seconds.
    #[must_use]
    pub fn filing_timestamp(&self) -> Option<i64> {
        let day = self.filing_date.get(..10)?;
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
        let midnight = date.and_hms_opt(0, 0, 0)?;
        Local
            .from_local_datetime(&midnight)
            .earliest()
            .map(|dt| dt.timestamp())
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Why a decoded row was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    NotPurchase,
    InvalidData,
    Date,
    Title,
    TransactionValue,
    InsiderName,
}

impl RejectReason {
    /// The statistics key this reason is counted under.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotPurchase => "filtered_not_purchase",
            Self::InvalidData => "filtered_invalid_data",
            Self::Date => "filtered_by_date",
            Self::Title => "filtered_by_title",
            Self::TransactionValue => "filtered_by_transaction_value",
            Self::InsiderName => "filtered_by_insider_name",
        }
    }
}

/// Running counters for one fetch. Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    /// Rows wide enough to decode.
    pub total_rows_scraped: u64,
    pub filtered_not_purchase: u64,
    pub filtered_invalid_data: u64,
    pub filtered_by_date: u64,
    pub filtered_by_title: u64,
    pub filtered_by_transaction_value: u64,
    pub filtered_by_insider_name: u64,
}

impl FilterStats {
    pub fn record(&mut self, reason: RejectReason) {
        let slot = match reason {
            RejectReason::NotPurchase => &mut self.filtered_not_purchase,
            RejectReason::InvalidData => &mut self.filtered_invalid_data,
            RejectReason::Date => &mut self.filtered_by_date,
            RejectReason::Title => &mut self.filtered_by_title,
            RejectReason::TransactionValue => &mut self.filtered_by_transaction_value,
            RejectReason::InsiderName => &mut self.filtered_by_insider_name,
        };
        *slot += 1;
    }

    /// Count for one rejection reason.
    #[must_use]
    pub const fn count(&self, reason: RejectReason) -> u64 {
        match reason {
            RejectReason::NotPurchase => self.filtered_not_purchase,
            RejectReason::InvalidData => self.filtered_invalid_data,
            RejectReason::Date => self.filtered_by_date,
            RejectReason::Title => self.filtered_by_title,
            RejectReason::TransactionValue => self.filtered_by_transaction_value,
            RejectReason::InsiderName => self.filtered_by_insider_name,
        }
    }

    /// Sum of all rejection counters.
    #[must_use]
    pub const fn rejected(&self) -> u64 {
        self.filtered_not_purchase
            + self.filtered_invalid_data
            + self.filtered_by_date
            + self.filtered_by_title
            + self.filtered_by_transaction_value
            + self.filtered_by_insider_name
    }

    /// Adds another run's counters into this one.
    pub fn merge(&mut self, other: &Self) {
        self.total_rows_scraped += other.total_rows_scraped;
        self.filtered_not_purchase += other.filtered_not_purchase;
        self.filtered_invalid_data += other.filtered_invalid_data;
        self.filtered_by_date += other.filtered_by_date;
        self.filtered_by_title += other.filtered_by_title;
        self.filtered_by_transaction_value += other.filtered_by_transaction_value;
        self.filtered_by_insider_name += other.filtered_by_insider_name;
    }
}

/// Accepted records in scrape order plus the final counters.
///
/// Early termination (exhausted listing, failed page) yields the same shape
/// as a satisfied quota.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchResult {
    pub transactions: Vec<Transaction>,
    pub stats: FilterStats,
}

impl FetchResult {
    /// True when fewer than `limit` records were collected.
    #[must_use]
    pub fn is_partial(&self, limit: usize) -> bool {
        self.transactions.len() < limit
    }
}
