pub mod http;

pub use http::HttpInvestorApi;
