//! The API endpoints URIs.

/// The root route, used as a liveness check.
pub const ROOT: &str = "/";
/// The route for storing a new record.
pub const PUSH: &str = "/push";
/// The route for listing every stored record.
pub const GET_ALL_RECORDS: &str = "/get_all_records";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::PUSH);
        assert_endpoint_is_valid_uri(endpoints::GET_ALL_RECORDS);
    }
}
