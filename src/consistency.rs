use crate::state_estimator::EstimationError;

/// Filter-consistency metrics: normalized innovation squared and
/// normalized estimation error squared.
pub trait Consistency {
    type Params;
    type Measurement;
    type GroundTruth;

    fn NIS(
        &self,
        eststate: &Self::Params,
        z: &Self::Measurement,
    ) -> Result<f64, EstimationError>;

    fn NEES(
        &self,
        eststate: &Self::Params,
        x_gt: &Self::GroundTruth,
    ) -> Result<f64, EstimationError>;
}
