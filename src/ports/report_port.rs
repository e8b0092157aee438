//! Report sink port trait.

use crate::domain::error::BandtraderError;
use crate::domain::metrics::Metrics;
use crate::domain::simulation::SimulationResult;

pub trait ReportPort {
    fn write_report(
        &self,
        result: &SimulationResult,
        metrics: &Metrics,
    ) -> Result<(), BandtraderError>;
}
