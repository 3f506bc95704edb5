use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("no sales totals by {dimension} to pick a top entry from")]
    EmptyGrouping { dimension: &'static str },
    #[error("sales total for {dimension} {key:?} is too large to represent")]
    TotalOverflow { dimension: &'static str, key: String },
}

pub type Result<T> = std::result::Result<T, Error>;
