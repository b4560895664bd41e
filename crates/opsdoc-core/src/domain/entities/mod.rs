pub mod api;
pub mod architecture;
pub mod common;
pub mod record_set;
pub mod test_report;

pub use crate::domain::DomainError;
pub use api::{ApiEndpoint, ApiParameter, ApiRequestBody, ApiResponse};
pub use architecture::{ArchitectureComponent, display_value};
pub use common::{FileMode, Permissions};
pub use record_set::RecordSet;
pub use test_report::{TestReport, TestSuiteReport, TestSummary};
