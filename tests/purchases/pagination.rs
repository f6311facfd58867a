use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

use chrono::NaiveDate;
use openinsider_rs::purchases::{PageOutcome, PageSource, Paginator, RawRow};
use openinsider_rs::{FetchRequest, Filters, OiError};

use crate::common::{general_row, purchase, screener_row};

#[derive(Clone)]
enum Canned {
    Rows(Vec<Vec<String>>),
    NoTable,
    Exhausted,
    Status(u16),
}

/// Serves canned pages; pages past the end repeat the last one.
struct FakeSource {
    pages: Vec<Canned>,
    calls: Mutex<Vec<u32>>,
}

impl FakeSource {
    fn new(pages: Vec<Canned>) -> Self {
        Self {
            pages,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

impl PageSource for FakeSource {
    fn fetch_page<'a>(&'a self, page: u32) -> Pin<Box<dyn Future<Output = PageOutcome> + Send + 'a>> {
        self.calls.lock().unwrap().push(page);
        let idx = (page as usize - 1).min(self.pages.len() - 1);
        let canned = self.pages[idx].clone();
        Box::pin(async move {
            match canned {
                Canned::Rows(rows) => PageOutcome::Rows(rows.into_iter().map(RawRow::new).collect()),
                Canned::NoTable => PageOutcome::NoTable,
                Canned::Exhausted => PageOutcome::Exhausted,
                Canned::Status(status) => PageOutcome::Failed(OiError::Status {
                    status,
                    url: format!("fake://page/{page}"),
                }),
            }
        })
    }
}

fn request(limit: usize, filters: Filters) -> FetchRequest {
    FetchRequest::new(limit, filters)
}

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()
}

const YESTERDAY: &str = "2024-05-02";
const TWO_DAYS_AGO: &str = "2024-05-01";

async fn run(source: &FakeSource, req: &FetchRequest) -> openinsider_rs::FetchResult {
    Paginator::new(source, Duration::ZERO)
        .with_clock(fixed_today)
        .run(req)
        .await
}

#[tokio::test]
async fn quota_met_on_first_page_skips_the_rest() {
    let rows = ["AAA", "BBB", "CCC", "DDD", "EEE"].map(purchase).to_vec();
    let source = FakeSource::new(vec![Canned::Rows(rows)]);

    let result = run(&source, &request(3, Filters::default())).await;

    assert_eq!(result.transactions.len(), 3);
    assert_eq!(result.transactions[2].ticker, "CCC");
    assert_eq!(source.calls(), [1]);
}

#[tokio::test]
async fn short_rows_are_not_counted() {
    let short: Vec<String> = vec!["only".into(), "three".into(), "cells".into()];
    let source = FakeSource::new(vec![
        Canned::Rows(vec![short.clone(), purchase("AAA"), short]),
        Canned::Exhausted,
    ]);

    let result = run(&source, &request(10, Filters::default())).await;

    assert_eq!(result.transactions.len(), 1);
    assert_eq!(result.stats.total_rows_scraped, 1);
    assert_eq!(source.calls(), [1, 2]);
}

#[tokio::test]
async fn stats_account_for_every_scraped_row() {
    let page1 = vec![
        general_row("AAA", "A Co", "Doe John", "CEO", YESTERDAY, "P - Purchase", "$5", "+$90,000"),
        general_row("BBB", "B Co", "Doe John", "CEO", YESTERDAY, "S - Sale", "$5", "+$90,000"),
        general_row("", "C Co", "Doe John", "CEO", YESTERDAY, "P - Purchase", "$5", "+$90,000"),
        general_row("DDD", "D Co", "Doe John", "CEO", TWO_DAYS_AGO, "P - Purchase", "$5", "+$90,000"),
    ];
    let page2 = vec![
        general_row("EEE", "E Co", "Doe John", "Dir", YESTERDAY, "P - Purchase", "$5", "+$90,000"),
        general_row("FFF", "F Co", "Doe John", "CEO", YESTERDAY, "P - Purchase", "$5", "+$9,000"),
        general_row("GGG", "G Co", "Roe Jane", "CEO", YESTERDAY, "P - Purchase", "$5", "+$90,000"),
        general_row("HHH", "H Co", "Doe Johnny", "CEO, Dir", YESTERDAY, "P", "$5", "+$90,000"),
    ];
    let source = FakeSource::new(vec![Canned::Rows(page1), Canned::Rows(page2), Canned::NoTable]);

    let req = request(
        100,
        Filters {
            insider_titles: Some(vec!["CEO".into()]),
            min_transaction_value: Some(25_000.0),
            previous_day_only: true,
            insider_name: Some("doe john".into()),
            ticker: None,
        },
    );
    let result = run(&source, &req).await;

    let tickers: Vec<&str> = result.transactions.iter().map(|t| t.ticker.as_str()).collect();
    assert_eq!(tickers, ["AAA", "HHH"]);
    let s = result.stats;
    assert_eq!(s.total_rows_scraped, 8);
    assert_eq!(s.filtered_not_purchase, 1);
    assert_eq!(s.filtered_invalid_data, 1);
    assert_eq!(s.filtered_by_date, 1);
    assert_eq!(s.filtered_by_title, 1);
    assert_eq!(s.filtered_by_transaction_value, 1);
    assert_eq!(s.filtered_by_insider_name, 1);
    assert_eq!(s.rejected() + result.transactions.len() as u64, s.total_rows_scraped);
    assert_eq!(source.calls(), [1, 2, 3]);
}

#[tokio::test]
async fn two_day_old_trade_is_rejected_by_date() {
    let row = general_row("AAA", "A Co", "Doe John", "CEO", TWO_DAYS_AGO, "P - Purchase", "$5", "+$1");
    let source = FakeSource::new(vec![Canned::Rows(vec![row]), Canned::Exhausted]);

    let req = request(
        5,
        Filters {
            previous_day_only: true,
            ..Filters::default()
        },
    );
    let result = run(&source, &req).await;

    assert!(result.transactions.is_empty());
    assert_eq!(result.stats.filtered_by_date, 1);
}

#[tokio::test]
async fn previous_day_rule_follows_the_injected_clock() {
    let row = general_row("AAA", "A Co", "Doe John", "CEO", TWO_DAYS_AGO, "P - Purchase", "$5", "+$1");
    let source = FakeSource::new(vec![Canned::Rows(vec![row]), Canned::Exhausted]);
    let req = request(
        5,
        Filters {
            previous_day_only: true,
            ..Filters::default()
        },
    );

    let result = Paginator::new(&source, Duration::ZERO)
        .with_clock(|| NaiveDate::from_ymd_opt(2024, 5, 2).unwrap())
        .run(&req)
        .await;

    assert_eq!(result.transactions.len(), 1);
    assert_eq!(result.stats.filtered_by_date, 0);
}

#[tokio::test]
async fn literal_title_match_rejects_spelled_out_title() {
    let row = general_row(
        "AAA",
        "A Co",
        "Doe John",
        "Chief Financial Officer",
        "2024-05-01",
        "P - Purchase",
        "$5",
        "+$1",
    );
    let source = FakeSource::new(vec![Canned::Rows(vec![row]), Canned::Exhausted]);
    let req = request(
        5,
        Filters {
            insider_titles: Some(vec!["CFO".into()]),
            ..Filters::default()
        },
    );

    let result = run(&source, &req).await;

    assert!(result.transactions.is_empty());
    assert_eq!(result.stats.filtered_by_title, 1);
}

#[tokio::test]
async fn ticker_scope_switches_layout_and_defaults_company() {
    let rows = vec![
        screener_row("MSFT", "Nadella Satya", "CEO", "P - Purchase", "$400.00"),
        screener_row("MSFT", "Hood Amy", "CFO", "S - Sale", "$410.00"),
    ];
    let source = FakeSource::new(vec![Canned::Rows(rows), Canned::Exhausted]);
    let req = request(
        10,
        Filters {
            ticker: Some("msft".into()),
            ..Filters::default()
        },
    );

    let result = run(&source, &req).await;

    assert_eq!(result.transactions.len(), 1);
    let t = &result.transactions[0];
    assert_eq!(t.company_name, "MSFT");
    assert_eq!(t.insider_name, "Nadella Satya");
    assert_eq!(t.price, 400.0);
    assert_eq!(t.value, 10_000.0);
    assert_eq!(result.stats.filtered_not_purchase, 1);
}

#[tokio::test]
async fn failed_page_returns_accumulated_results() {
    let source = FakeSource::new(vec![
        Canned::Rows(vec![purchase("AAA"), purchase("BBB")]),
        Canned::Status(404),
        Canned::Rows(vec![purchase("CCC")]),
    ]);

    let result = run(&source, &request(10, Filters::default())).await;

    assert_eq!(result.transactions.len(), 2);
    assert_eq!(source.calls(), [1, 2]);
}

#[tokio::test]
async fn page_cap_is_twenty_by_default() {
    let sale = general_row("AAA", "A Co", "Doe John", "CEO", "2024-05-01", "S - Sale", "$5", "+$1");
    let source = FakeSource::new(vec![Canned::Rows(vec![sale])]);

    let result = run(&source, &request(1, Filters::default())).await;

    assert!(result.transactions.is_empty());
    assert_eq!(source.calls().len(), 20);
    assert_eq!(result.stats.filtered_not_purchase, 20);
}

#[tokio::test]
async fn name_search_without_ticker_walks_fifty_pages() {
    let other = general_row("AAA", "A Co", "Roe Jane", "CEO", "2024-05-01", "P - Purchase", "$5", "+$1");
    let source = FakeSource::new(vec![Canned::Rows(vec![other])]);
    let req = request(
        1,
        Filters {
            insider_name: Some("doe".into()),
            ..Filters::default()
        },
    );

    let result = run(&source, &req).await;

    assert_eq!(source.calls().len(), 50);
    assert_eq!(result.stats.filtered_by_insider_name, 50);
}
