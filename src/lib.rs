//! openinsider-rs: async scraper for OpenInsider insider-purchase listings.
//!
//! A fetch walks the paginated listing (or the screener, when scoped to one
//! ticker), decodes every table row, runs it through the filter pipeline and
//! stops once the requested number of purchases is collected, the listing
//! runs out, or a page cannot be fetched. Every outcome carries the filter
//! statistics of the rows that were scanned.
//!
//! ```no_run
//! # use openinsider_rs::OiClient;
//! # #[tokio::main]
//! # async fn main() {
//! let client = OiClient::default();
//! let result = client.purchases().limit(10).previous_day_only(true).fetch().await;
//! for t in &result.transactions {
//!     println!("{}", t.headline());
//! }
//! # }
//! ```

pub mod core;
pub mod purchases;

pub use crate::core::{OiClient, OiClientBuilder, OiError, RetryClass, RetryConfig};
pub use purchases::{
    FetchRequest, FetchResult, FilterStats, Filters, Layout, PurchasesBuilder, RejectReason,
    Transaction,
};

#[cfg(feature = "tracing-subscriber")]
pub use crate::core::init_tracing;
