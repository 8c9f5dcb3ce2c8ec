use crate::state_estimator::ekf::GaussParams;
use itertools::izip;
use nalgebra::{Vector2, Vector4};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Per-tick record of a simulated run: noisy GPS fix, ground truth,
/// dead reckoning, applied (noisy) input and the filter estimate.
#[derive(Debug, Default, Clone)]
pub struct History {
    pub z: Vec<Vector2<f64>>,
    pub x_true: Vec<Vector4<f64>>,
    pub x_dr: Vec<Vector4<f64>>,
    pub u: Vec<Vector2<f64>>,
    pub est: Vec<GaussParams>,
}

impl History {
    pub fn with_capacity(n: usize) -> Self {
        History {
            z: Vec::with_capacity(n),
            x_true: Vec::with_capacity(n),
            x_dr: Vec::with_capacity(n),
            u: Vec::with_capacity(n),
            est: Vec::with_capacity(n),
        }
    }

    pub fn push(
        &mut self,
        z: Vector2<f64>,
        x_true: Vector4<f64>,
        x_dr: Vector4<f64>,
        u: Vector2<f64>,
        est: GaussParams,
    ) {
        self.z.push(z);
        self.x_true.push(x_true);
        self.x_dr.push(x_dr);
        self.u.push(u);
        self.est.push(est);
    }

    pub fn len(&self) -> usize {
        self.est.len()
    }

    pub fn is_empty(&self) -> bool {
        self.est.is_empty()
    }

    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        writeln!(
            w,
            "gps_x, gps_y, true_x, true_y, dead_reckon_x, dead_reckon_y, u_v, u_yawrate, estimated_x, estimated_y"
        )?;
        for (z, x_true, x_dr, u, est) in
            izip!(&self.z, &self.x_true, &self.x_dr, &self.u, &self.est)
        {
            writeln!(
                w,
                "{},{},{},{},{},{},{},{},{},{}",
                z[0], z[1], x_true[0], x_true[1], x_dr[0], x_dr[1], u[0], u[1], est.x[0], est.x[1]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix4;

    #[test]
    fn test_save_csv_layout() {
        let mut history = History::with_capacity(1);
        history.push(
            Vector2::new(0.5, 0.1),
            Vector4::new(0.4, 0.1, 0.01, 1.0),
            Vector4::new(0.6, 0.2, 0.02, 1.1),
            Vector2::new(1.0, 0.1),
            GaussParams::new(Vector4::new(0.45, 0.12, 0.01, 1.0), Matrix4::identity()),
        );

        let path = std::env::temp_dir().join("ekf_history_test.csv");
        history.save_csv(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert!(lines.next().unwrap().starts_with("gps_x, gps_y, true_x"));
        assert_eq!(lines.next().unwrap().split(',').count(), 10);
        assert!(lines.next().is_none());
    }
}
