use super::MeasurementModel;
use nalgebra::{Matrix2, Matrix2x4, Vector2, Vector4};

/// Direct observation of planar position, e.g. a GPS fix.
pub struct CartesianPosition {
    R: Matrix2<f64>,
}

impl CartesianPosition {
    pub fn new(sigma_p: f64) -> Self {
        CartesianPosition {
            R: Matrix2::identity() * sigma_p.powi(2),
        }
    }

    pub fn from_covariance(R: Matrix2<f64>) -> Self {
        CartesianPosition { R }
    }
}

impl MeasurementModel for CartesianPosition {
    type State = Vector4<f64>;
    type Measurement = Vector2<f64>;
    type Jacobian = Matrix2x4<f64>;
    type Covariance = Matrix2<f64>;

    /// Assumes p is the first state
    fn h(&self, x: &Self::State) -> Self::Measurement {
        Vector2::new(x[0], x[1])
    }

    fn H(&self, _x: &Self::State) -> Self::Jacobian {
        Matrix2x4::new(
            1., 0., 0., 0.,
            0., 1., 0., 0.,
        )
    }

    fn R(&self, _x: &Self::State, _z: &Self::Measurement) -> Self::Covariance {
        self.R
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_h_selects_position() {
        let m = CartesianPosition::new(1.0);
        let x = Vector4::new(3.0, -4.0, 0.5, 2.0);
        let z = m.h(&x);
        assert!(z.relative_eq(&Vector2::new(3.0, -4.0), 1e-12, 1e-12));
    }

    #[test]
    fn test_H_is_position_selector() {
        let m = CartesianPosition::new(1.0);
        let x = Vector4::new(3.0, -4.0, 0.5, 2.0);
        let H = m.H(&x);
        // H x == h(x) for a linear model
        assert!((H * x).relative_eq(&m.h(&x), 1e-12, 1e-12));
    }

    #[test]
    fn test_R_scaled_identity() {
        let m = CartesianPosition::new(0.5);
        let R = m.R(&Vector4::zeros(), &Vector2::zeros());
        assert!(R.relative_eq(&(Matrix2::identity() * 0.25), 1e-12, 1e-12));
    }
}
