use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const BROWSER_REFERER: &str = "https://www.nba.com/";
const BROWSER_ORIGIN: &str = "https://www.nba.com";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const BROWSER_ACCEPT: &str = "application/json, text/plain, */*";

/// Headers the stats API expects from a real browser session.
///
/// Requests without them are commonly dropped or answered with 403.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(REFERER, HeaderValue::from_static(BROWSER_REFERER));
    headers.insert(ORIGIN, HeaderValue::from_static(BROWSER_ORIGIN));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
    );
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers
}
