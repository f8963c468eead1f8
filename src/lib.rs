pub mod api;
pub mod args;
pub mod classify;
pub mod domain;
pub mod error;
pub mod input;
pub mod report;
pub mod stats;
pub mod utils;

pub use api::{fetch_contributions, HttpClient, ReqwestClient};
pub use args::Args;
pub use classify::classify;
pub use domain::{ContributionRecord, DateRange};
pub use error::{FetchError, InputError};
pub use input::{Prompter, Request};
pub use report::Report;
pub use stats::ClassificationResult;
