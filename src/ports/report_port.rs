//! Report output port trait.

use crate::domain::error::DipdcaError;
use crate::domain::universe::BatchResult;

/// Port for presenting the results of a batch run.
pub trait ReportPort {
    fn write(&self, result: &BatchResult) -> Result<(), DipdcaError>;
}
