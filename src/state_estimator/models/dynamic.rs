use super::DynamicModel;
use nalgebra::{Matrix4, Vector2, Vector4};

/// Unicycle kinematics over the state [x, y, yaw, v], driven by a
/// commanded [speed, yaw rate] input.
///
/// The speed state is overwritten by the commanded speed each step rather
/// than integrated; all dynamics of v enter through the input coupling.
#[derive(Debug, Clone)]
pub struct Unicycle {
    // Process noise covariance, fixed over the life of the model
    Q: Matrix4<f64>,
}

impl Unicycle {
    pub fn new(sigma_xy: f64, sigma_yaw: f64, sigma_v: f64) -> Self {
        let Q = Matrix4::from_diagonal(&Vector4::new(
            sigma_xy.powi(2),
            sigma_xy.powi(2),
            sigma_yaw.powi(2),
            sigma_v.powi(2),
        ));
        Unicycle { Q }
    }

    pub fn from_covariance(Q: Matrix4<f64>) -> Self {
        Unicycle { Q }
    }
}

impl DynamicModel for Unicycle {
    type State = Vector4<f64>;
    type Input = Vector2<f64>;
    type Covariance = Matrix4<f64>;
    type Jacobian = Matrix4<f64>;

    fn f(&self, x: &Self::State, u: &Self::Input, ts: f64) -> Self::State {
        let yaw = x[2];
        let v_cmd = u[0];
        let yawrate_cmd = u[1];

        Vector4::new(
            x[0] + ts * v_cmd * yaw.cos(),
            x[1] + ts * v_cmd * yaw.sin(),
            yaw + ts * yawrate_cmd,
            v_cmd,
        )
    }

    fn F(&self, x: &Self::State, u: &Self::Input, ts: f64) -> Self::Jacobian {
        let yaw = x[2];
        let v_cmd = u[0];

        let syaw = yaw.sin();
        let cyaw = yaw.cos();

        Matrix4::new(
            1., 0., -ts * v_cmd * syaw, ts * cyaw,
            0., 1., ts * v_cmd * cyaw, ts * syaw,
            0., 0., 1., 0.,
            0., 0., 0., 1.,
        )
    }

    fn Q(&self, _x: &Self::State, _ts: f64) -> Self::Covariance {
        self.Q
    }
}
