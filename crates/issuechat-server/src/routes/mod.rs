pub mod analyze;
pub mod create_issue;
pub mod improve;
