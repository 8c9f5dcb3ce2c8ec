use super::models::{DynamicModel, MeasurementModel};
use super::{EstimationError, StateEstimator};
use crate::consistency::Consistency;
use nalgebra::{Matrix2, Matrix2x4, Matrix4, SMatrix, Vector2, Vector4};

/// Gaussian belief over the state, threaded through the filter by the
/// caller. Plain value type; a failed cycle leaves the caller's copy alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussParams {
    pub x: Vector4<f64>,
    pub P: Matrix4<f64>,
}

impl GaussParams {
    pub fn new(x: Vector4<f64>, P: Matrix4<f64>) -> Self {
        GaussParams { x, P }
    }

    /// Belief at time zero: origin state, unit covariance.
    pub fn initial() -> Self {
        GaussParams::new(Vector4::zeros(), Matrix4::identity())
    }
}

pub struct EKF<D, M>
where
    D: DynamicModel,
    M: MeasurementModel,
{
    dynmod: D,
    measmod: M,
}

impl<D, M> EKF<D, M>
where
    D: DynamicModel<
        State = Vector4<f64>,
        Input = Vector2<f64>,
        Jacobian = Matrix4<f64>,
        Covariance = Matrix4<f64>,
    >,
    M: MeasurementModel<
        State = Vector4<f64>,
        Measurement = Vector2<f64>,
        Jacobian = Matrix2x4<f64>,
        Covariance = Matrix2<f64>,
    >,
{
    pub fn new(dynmod: D, measmod: M) -> Self {
        EKF { dynmod, measmod }
    }

    pub fn innovation(
        &self,
        eststate: &GaussParams,
        z: &Vector2<f64>,
    ) -> (Vector2<f64>, Matrix2<f64>) {
        let v = self.innovation_mean(eststate, z);
        let S = self.innovation_cov(eststate, z);
        (v, S)
    }

    fn innovation_mean(&self, eststate: &GaussParams, z: &Vector2<f64>) -> Vector2<f64> {
        let zpred = self.measmod.h(&eststate.x);
        z - zpred
    }

    fn innovation_cov(&self, eststate: &GaussParams, z: &Vector2<f64>) -> Matrix2<f64> {
        let x = &eststate.x;
        let H = self.measmod.H(x);
        let R = self.measmod.R(x, z);
        H * eststate.P * H.transpose() + R
    }
}

fn check_finite<const R: usize, const C: usize>(
    m: &SMatrix<f64, R, C>,
    what: &'static str,
) -> Result<(), EstimationError> {
    if m.iter().all(|e| e.is_finite()) {
        Ok(())
    } else {
        Err(EstimationError::NonFiniteInput(what))
    }
}

impl<D, M> StateEstimator for EKF<D, M>
where
    D: DynamicModel<
        State = Vector4<f64>,
        Input = Vector2<f64>,
        Jacobian = Matrix4<f64>,
        Covariance = Matrix4<f64>,
    >,
    M: MeasurementModel<
        State = Vector4<f64>,
        Measurement = Vector2<f64>,
        Jacobian = Matrix2x4<f64>,
        Covariance = Matrix2<f64>,
    >,
{
    type Params = GaussParams;
    type Measurement = Vector2<f64>;
    type Input = Vector2<f64>;

    fn predict(
        &self,
        eststate: Self::Params,
        u: &Self::Input,
        ts: f64,
    ) -> Result<Self::Params, EstimationError> {
        check_finite(&eststate.x, "state")?;
        check_finite(u, "input")?;

        let GaussParams { x, P } = eststate;
        let x = self.dynmod.f(&x, u, ts);
        // Linearize around the predicted state
        let F = self.dynmod.F(&x, u, ts);
        let Q = self.dynmod.Q(&x, ts);
        let P = F * P * F.transpose() + Q;

        Ok(GaussParams::new(x, P))
    }

    fn update(
        &self,
        z: &Self::Measurement,
        eststate: Self::Params,
    ) -> Result<Self::Params, EstimationError> {
        check_finite(z, "measurement")?;
        check_finite(&eststate.x, "state")?;

        let (v, S) = self.innovation(&eststate, z);

        let GaussParams { x, P } = eststate;
        let H = self.measmod.H(&x);

        // Kalman gain via Cholesky; a non-PD S means the gain is undefined
        // and silently pseudo-inverting would hide a broken configuration.
        let W = S
            .cholesky()
            .ok_or(EstimationError::SingularInnovationCovariance)?
            .solve(&(H * P))
            .transpose();

        let x = x + W * v;
        let P = (Matrix4::identity() - W * H) * P;
        // Guard against numerical asymmetry creeping in over many cycles
        let P = 0.5 * (P + P.transpose());

        Ok(GaussParams::new(x, P))
    }

    fn step(
        &self,
        z: &Self::Measurement,
        eststate: Self::Params,
        u: &Self::Input,
        ts: f64,
    ) -> Result<Self::Params, EstimationError> {
        let eststate_pred = self.predict(eststate, u, ts)?;
        self.update(z, eststate_pred)
    }
}

impl<D, M> Consistency for EKF<D, M>
where
    D: DynamicModel<
        State = Vector4<f64>,
        Input = Vector2<f64>,
        Jacobian = Matrix4<f64>,
        Covariance = Matrix4<f64>,
    >,
    M: MeasurementModel<
        State = Vector4<f64>,
        Measurement = Vector2<f64>,
        Jacobian = Matrix2x4<f64>,
        Covariance = Matrix2<f64>,
    >,
{
    type Params = GaussParams;
    type Measurement = Vector2<f64>;
    type GroundTruth = Vector4<f64>;

    fn NIS(
        &self,
        eststate: &Self::Params,
        z: &Self::Measurement,
    ) -> Result<f64, EstimationError> {
        let (v, S) = self.innovation(eststate, z);
        let S_inv_v = S
            .cholesky()
            .ok_or(EstimationError::SingularInnovationCovariance)?
            .solve(&v);
        Ok(v.dot(&S_inv_v))
    }

    fn NEES(
        &self,
        eststate: &Self::Params,
        x_gt: &Self::GroundTruth,
    ) -> Result<f64, EstimationError> {
        let x_err = eststate.x - x_gt;
        let P_inv_x_err = eststate
            .P
            .cholesky()
            .ok_or(EstimationError::SingularInnovationCovariance)?
            .solve(&x_err);
        Ok(x_err.dot(&P_inv_x_err))
    }
}
