pub mod chart;
pub mod cli;
pub mod csv;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod report;
