//! Monthly work reports from Linear activity.
//!
//! The pipeline resolves a calendar month, aggregates the tickets the user actually worked on
//! ([`fetch_user_tickets_for_month`]), folds them into counts ([`build_report_summary`]) and renders
//! a technical and a plain-language report ([`generate_technical_report`],
//! [`generate_non_technical_report`]).

pub mod aggregate;
pub mod cli;
pub mod ext;
pub mod model;
pub mod month;
pub mod output;
pub mod redact;
pub mod render;
pub mod run;
pub mod summary;
pub mod tracker;
pub mod util;

pub use aggregate::fetch_user_tickets_for_month;
pub use render::{generate_non_technical_report, generate_technical_report};
pub use summary::build_report_summary;
