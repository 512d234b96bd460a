mod request;

pub use request::{validate_url, RequestFetcher};
