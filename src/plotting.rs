use crate::history::History;
use crate::state_estimator::ekf::GaussParams;
use gnuplot::*;
use std::f64::consts::TAU;

/// Sampled boundary of the 1-sigma position ellipse of a belief.
fn covariance_ellipse(est: &GaussParams) -> (Vec<f64>, Vec<f64>) {
    let Pxy = est.P.fixed_view::<2, 2>(0, 0).into_owned();
    let eig = Pxy.symmetric_eigen();

    let (big, small) = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
        (0, 1)
    } else {
        (1, 0)
    };
    let a = eig.eigenvalues[big].max(0.0).sqrt();
    let b = eig.eigenvalues[small].max(0.0).sqrt();
    let angle = eig.eigenvectors[(1, big)].atan2(eig.eigenvectors[(0, big)]);

    let n = 64;
    let mut px = Vec::with_capacity(n + 1);
    let mut py = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let t = TAU * i as f64 / n as f64;
        let ex = a * t.cos();
        let ey = b * t.sin();
        px.push(est.x[0] + ex * angle.cos() - ey * angle.sin());
        py.push(est.x[1] + ex * angle.sin() + ey * angle.cos());
    }
    (px, py)
}

pub fn plot_history(history: &History) {
    let mut fg = Figure::new();
    let ax = fg.axes2d();
    ax.points(
        history.z.iter().map(|z| z[0]),
        history.z.iter().map(|z| z[1]),
        &[Caption("GPS"), Color("green"), PointSymbol('O')],
    )
    .lines(
        history.x_true.iter().map(|x| x[0]),
        history.x_true.iter().map(|x| x[1]),
        &[Caption("Ground truth"), Color("blue")],
    )
    .lines(
        history.x_dr.iter().map(|x| x[0]),
        history.x_dr.iter().map(|x| x[1]),
        &[Caption("Dead reckoning"), Color("black")],
    )
    .lines(
        history.est.iter().map(|s| s.x[0]),
        history.est.iter().map(|s| s.x[1]),
        &[Caption("Estimate"), Color("red")],
    )
    .set_x_grid(true)
    .set_y_grid(true);
    if let Some(est) = history.est.last() {
        let (px, py) = covariance_ellipse(est);
        ax.lines(px, py, &[Caption("1-sigma"), Color("red")]);
    }
    fg.show().unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix4, Vector4};

    #[test]
    fn test_ellipse_radii_from_diagonal_covariance() {
        let mut P = Matrix4::identity();
        P[(0, 0)] = 4.0;
        P[(1, 1)] = 1.0;
        let est = GaussParams::new(Vector4::zeros(), P);

        let (px, py) = covariance_ellipse(&est);
        let max_x = px.iter().cloned().fold(f64::MIN, f64::max);
        let max_y = py.iter().cloned().fold(f64::MIN, f64::max);
        assert!((max_x - 2.0).abs() < 1e-6);
        assert!((max_y - 1.0).abs() < 1e-6);
    }
}
