use super::{ApiEndpoint, ArchitectureComponent, TestReport};

/// Everything a collector gathered for one generation run.
///
/// Built fresh per run and shared read-only by every task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub endpoints: Vec<ApiEndpoint>,
    pub components: Vec<ArchitectureComponent>,
    pub reports: Vec<TestReport>,
}

impl RecordSet {
    pub fn new(
        endpoints: Vec<ApiEndpoint>,
        components: Vec<ArchitectureComponent>,
        reports: Vec<TestReport>,
    ) -> Self {
        Self {
            endpoints,
            components,
            reports,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty() && self.components.is_empty() && self.reports.is_empty()
    }

    /// Append another set, keeping the order of both.
    pub fn extend(&mut self, other: RecordSet) {
        self.endpoints.extend(other.endpoints);
        self.components.extend(other.components);
        self.reports.extend(other.reports);
    }
}
