pub mod error;
pub mod grouping;
pub mod record;
