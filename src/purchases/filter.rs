//! Filter pipeline: ordered exclusion rules over decoded candidates.

use chrono::{Duration, Local, NaiveDate};

use super::decode::Candidate;
use super::model::{DEFAULT_CONFIDENCE, FetchRequest, RECOMMENDATION, RejectReason, Transaction};

#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Accepted(Transaction),
    Rejected(RejectReason),
}

/// Applies the rules against the local clock.
pub fn apply(candidate: Candidate, request: &FetchRequest) -> FilterOutcome {
    apply_with(candidate, request, local_today)
}

/// Today's date on the local clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Applies the rules in fixed order; the first failing rule decides the reason.
///
/// `today` is only consulted when `previous_day_only` is set, at the moment the
/// date rule runs.
pub fn apply_with<F>(candidate: Candidate, request: &FetchRequest, today: F) -> FilterOutcome
where
    F: FnOnce() -> NaiveDate,
{
    if !candidate.trade_type.starts_with('P') {
        return FilterOutcome::Rejected(RejectReason::NotPurchase);
    }
    if candidate.ticker.is_empty() || candidate.price <= 0.0 {
        return FilterOutcome::Rejected(RejectReason::InvalidData);
    }
    if request.previous_day_only && !traded_yesterday(&candidate.trade_date, today()) {
        return FilterOutcome::Rejected(RejectReason::Date);
    }
    if !request.insider_titles.is_empty() {
        let title = candidate.insider_title.to_uppercase();
        let any = request
            .insider_titles
            .iter()
            .any(|t| title.contains(&t.to_uppercase()));
        if !any {
            return FilterOutcome::Rejected(RejectReason::Title);
        }
    }
    if let Some(min) = request.min_transaction_value
        && candidate.value < min
    {
        return FilterOutcome::Rejected(RejectReason::TransactionValue);
    }
    if let Some(name) = &request.insider_name
        && !candidate
            .insider_name
            .to_uppercase()
            .contains(&name.to_uppercase())
    {
        return FilterOutcome::Rejected(RejectReason::InsiderName);
    }

    FilterOutcome::Accepted(accept(candidate))
}

/// Unparsable dates never match.
fn traded_yesterday(trade_date: &str, today: NaiveDate) -> bool {
    NaiveDate::parse_from_str(trade_date, "%Y-%m-%d")
        .is_ok_and(|d| Some(d) == today.checked_sub_signed(Duration::days(1)))
}

fn accept(c: Candidate) -> Transaction {
    let company_name = if c.company_name.is_empty() {
        c.ticker.clone()
    } else {
        c.company_name
    };
    Transaction {
        ticker: c.ticker,
        company_name,
        insider_name: c.insider_name,
        insider_title: c.insider_title,
        trade_date: c.trade_date,
        filing_date: c.filing_date,
        trade_type: c.trade_type,
        price: c.price,
        quantity: c.quantity,
        value: c.value,
        recommendation: RECOMMENDATION.to_string(),
        confidence: DEFAULT_CONFIDENCE,
    }
}
