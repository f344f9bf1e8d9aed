use super::FormatError;
use crate::scanner::ScanReport;

pub fn to_yaml(report: &ScanReport) -> Result<String, FormatError> {
    serde_yaml::to_string(report).map_err(FormatError::from)
}
