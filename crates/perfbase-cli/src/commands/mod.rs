pub mod categorize;
pub mod report;
