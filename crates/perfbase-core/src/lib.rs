pub mod audit;
pub mod capture;
pub mod categorize;
mod de;
pub mod error;
pub mod extract;
pub mod har;
pub mod naming;
pub mod rating;
pub mod report;
pub mod stats;

pub use capture::{CaptureDocument, CaptureReader};
pub use categorize::categorize;
pub use error::{Error, InvalidEntry, Result};
pub use naming::sheet_name;
pub use rating::Rating;
pub use report::{AssemblerOptions, ReportAssembler, ReportModel};
pub use stats::StatBundle;
