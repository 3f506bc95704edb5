//! Raw retrieval of the sales file, either over HTTP(S) or from disk.

use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Fetch the full content behind `location`.
///
/// `http://` and `https://` locations are downloaded with a single GET and
/// any non-success status is a failure. Everything else is read as a local
/// path, with an optional `file://` prefix.
pub fn fetch(location: &str, options: &FetchOptions) -> Result<Vec<u8>> {
    let bytes = if is_remote(location) {
        fetch_remote(location, options)
    } else {
        let path = location.strip_prefix("file://").unwrap_or(location);
        std::fs::read(path).map_err(|err| unavailable(location, err))
    }?;

    debug!(location, bytes = bytes.len(), "fetched sales data");
    Ok(bytes)
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn fetch_remote(location: &str, options: &FetchOptions) -> Result<Vec<u8>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(options.timeout)
        .build()
        .map_err(|err| unavailable(location, err))?;

    let response = client
        .get(location)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|err| unavailable(location, err))?;

    response
        .bytes()
        .map(|bytes| bytes.to_vec())
        .map_err(|err| unavailable(location, err))
}

fn unavailable(location: &str, reason: impl std::fmt::Display) -> Error {
    Error::SourceUnavailable {
        location: location.to_owned(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use httpmock::prelude::*;

    use super::*;

    const ROWS: &str = "Apple,10,2.0,2024-01-01\nBanana,3,1.0,2024-01-01\n";

    #[test]
    fn reads_local_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(ROWS.as_bytes()).expect("write rows");
        let location = file.path().to_str().expect("utf-8 path");

        let bytes = fetch(location, &FetchOptions::default()).unwrap();
        assert_eq!(bytes, ROWS.as_bytes());
    }

    #[test]
    fn strips_file_scheme() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(ROWS.as_bytes()).expect("write rows");
        let location = format!("file://{}", file.path().display());

        let bytes = fetch(&location, &FetchOptions::default()).unwrap();
        assert_eq!(bytes, ROWS.as_bytes());
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.csv");
        let location = missing.to_str().expect("utf-8 path");

        let err = fetch(location, &FetchOptions::default()).unwrap_err();
        assert!(
            matches!(err, Error::SourceUnavailable { location: ref l, .. } if l == location),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn downloads_over_http() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/sales_data.csv");
            then.status(200)
                .header("content-type", "text/csv")
                .body(ROWS);
        });

        let bytes = fetch(&server.url("/sales_data.csv"), &FetchOptions::default()).unwrap();

        mock.assert();
        assert_eq!(bytes, ROWS.as_bytes());
    }

    #[test]
    fn http_error_status_is_unavailable() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/sales_data.csv");
            then.status(404);
        });

        let err = fetch(&server.url("/sales_data.csv"), &FetchOptions::default()).unwrap_err();

        mock.assert();
        assert!(matches!(err, Error::SourceUnavailable { .. }));
    }
}
