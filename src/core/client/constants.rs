//! Centralized constants for default endpoints, headers and pacing.

use std::time::Duration;

/// Default desktop UA to avoid trivial bot blocking.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/120.0.0.0 Safari/537.36"
);

pub(crate) const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

pub(crate) const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// OpenInsider site root; listing paths are joined onto it.
pub(crate) const DEFAULT_BASE_URL: &str = "http://openinsider.com/";

/// Recent purchases listing (unscoped fetches).
pub(crate) const LATEST_PURCHASES_PATH: &str = "latest-insider-purchases-25k";

/// Screener listing (ticker-scoped fetches).
pub(crate) const SCREENER_PATH: &str = "screener";

/// Rows requested per screener page.
pub(crate) const SCREENER_PAGE_SIZE: &str = "100";

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Politeness pause between two page fetches.
pub(crate) const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);
