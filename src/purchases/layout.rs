//! Column layouts of the two listing tables.

/// Minimum cell count for a row to be decodable under either layout.
pub const MIN_CELLS: usize = 10;

/// Which table shape a fetch decodes. Chosen once per fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Recent-purchases listing; carries a company-name column.
    General,
    /// Ticker-scoped screener listing; one column narrower, no company name.
    ScreenerByTicker,
}

/// Cell index of every field for one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub filing_date: usize,
    pub trade_date: usize,
    pub ticker: usize,
    pub company_name: Option<usize>,
    pub insider_name: usize,
    pub insider_title: usize,
    pub trade_type: usize,
    pub price: usize,
    pub quantity: usize,
    pub value: usize,
}

const GENERAL: Columns = Columns {
    filing_date: 1,
    trade_date: 2,
    ticker: 3,
    company_name: Some(4),
    insider_name: 5,
    insider_title: 6,
    trade_type: 7,
    price: 8,
    quantity: 9,
    value: 12,
};

const SCREENER_BY_TICKER: Columns = Columns {
    filing_date: 1,
    trade_date: 2,
    ticker: 3,
    company_name: None,
    insider_name: 4,
    insider_title: 5,
    trade_type: 6,
    price: 7,
    quantity: 8,
    value: 11,
};

impl Layout {
    /// The screener table when the fetch is ticker-scoped, the general one otherwise.
    #[must_use]
    pub const fn select(ticker_is_set: bool) -> Self {
        if ticker_is_set { Self::ScreenerByTicker } else { Self::General }
    }

    #[must_use]
    pub const fn columns(self) -> Columns {
        match self {
            Self::General => GENERAL,
            Self::ScreenerByTicker => SCREENER_BY_TICKER,
        }
    }
}
