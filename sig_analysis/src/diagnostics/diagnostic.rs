use crate::error::AnalysisError;
use sig_syntax::Location;

/// Every `AnalysisError` the validator collects is a hard error; there is
/// no warning tier in this core (spec §4.7: "validator is side-effect
/// free otherwise"). `Severity` exists so a downstream report format can
/// still group by it the way the teacher's diagnostics do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

/// One located error produced while validating an environment.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub location: Location,
}

impl Diagnostic {
    pub fn from_error(error: &AnalysisError, location: Location) -> Self {
        Self {
            severity: Severity::Error,
            code: error.code(),
            message: error.to_string(),
            location,
        }
    }
}
