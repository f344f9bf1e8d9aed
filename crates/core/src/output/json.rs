use super::FormatError;
use crate::scanner::ScanReport;

pub fn to_json(report: &ScanReport) -> Result<String, FormatError> {
    serde_json::to_string_pretty(report).map_err(FormatError::from)
}
