pub mod ekf;
pub mod models;

use thiserror::Error;

/// Failure modes of a single predict/update cycle. A cycle either fully
/// succeeds or returns one of these without touching the caller's belief.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EstimationError {
    #[error("innovation covariance S is singular or not positive definite")]
    SingularInnovationCovariance,

    #[error("non-finite value in {0}")]
    NonFiniteInput(&'static str),
}

pub trait StateEstimator {
    type Params;
    type Measurement;
    type Input;

    fn predict(
        &self,
        eststate: Self::Params,
        u: &Self::Input,
        ts: f64,
    ) -> Result<Self::Params, EstimationError>;

    fn update(
        &self,
        z: &Self::Measurement,
        eststate: Self::Params,
    ) -> Result<Self::Params, EstimationError>;

    fn step(
        &self,
        z: &Self::Measurement,
        eststate: Self::Params,
        u: &Self::Input,
        ts: f64,
    ) -> Result<Self::Params, EstimationError>;
}
