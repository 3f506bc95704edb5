use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not retrieve sales data from {location}: {reason}")]
    SourceUnavailable { location: String, reason: String },
    #[error("malformed sales record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
    #[error(transparent)]
    Domain(#[from] crate::domain::error::Error),
    #[error("could not draw sales charts: {0}")]
    Render(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn render_error_names_the_io_cause() {
        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"));
        assert_eq!(err.to_string(), "could not draw sales charts: stdout closed");
    }

    #[test]
    fn domain_errors_are_transparent() {
        let err = Error::from(crate::domain::error::Error::EmptyGrouping { dimension: "date" });
        assert_eq!(
            err.to_string(),
            "no sales totals by date to pick a top entry from"
        );
    }
}
