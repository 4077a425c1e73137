pub mod document;
pub mod types;

pub use document::{DocumentData, DocumentField};
pub use types::{Issue, IssueStatus};
