pub mod client;
pub mod headers;

pub use client::StatsHttpClient;
pub use headers::browser_headers;
