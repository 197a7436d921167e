use serde::{Deserialize, Serialize};

use crate::error::CameraError;

/// Radial-tangential (Brown-Conrady) lens distortion with the `k1, k2, p1, p2` coefficients.
///
/// All the operations work on normalized image coordinates, i.e. `((u - cx) / fx, (v - cy) / fy)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RadTanDistortion {
    /// The first radial distortion coefficient
    pub k1: f64,
    /// The second radial distortion coefficient
    pub k2: f64,
    /// The first tangential distortion coefficient
    pub p1: f64,
    /// The second tangential distortion coefficient
    pub p2: f64,
}

impl RadTanDistortion {
    /// Distortion with all the coefficients set to zero.
    pub fn none() -> Self {
        Self::default()
    }

    /// Create the distortion from the `[k1, k2, p1, p2]` coefficients.
    pub fn from_coeffs(coeffs: [f64; 4]) -> Self {
        let [k1, k2, p1, p2] = coeffs;
        Self { k1, k2, p1, p2 }
    }

    /// The `[k1, k2, p1, p2]` coefficients.
    pub fn coeffs(&self) -> [f64; 4] {
        [self.k1, self.k2, self.p1, self.p2]
    }

    /// Check if there is any distortion.
    pub fn has_distortion(&self) -> bool {
        self.coeffs().iter().any(|c| *c != 0.0)
    }

    pub(crate) fn validate(&self) -> Result<(), CameraError> {
        let names = ["k1", "k2", "p1", "p2"];
        for (name, value) in names.into_iter().zip(self.coeffs()) {
            if !value.is_finite() {
                return Err(CameraError::NonFiniteParameter(name));
            }
        }
        Ok(())
    }

    /// Apply the distortion model to a normalized point.
    pub fn distort_normalized(&self, x: f64, y: f64) -> (f64, f64) {
        let r2 = x * x + y * y;
        let kr = 1.0 + self.k1 * r2 + self.k2 * r2 * r2;

        let xd = x * kr + 2.0 * self.p1 * x * y + self.p2 * (r2 + 2.0 * x * x);
        let yd = y * kr + self.p1 * (r2 + 2.0 * y * y) + 2.0 * self.p2 * x * y;

        (xd, yd)
    }

    /// Remove the distortion from a normalized point by fixed-point iteration.
    ///
    /// Far outside of the calibrated field the iteration may diverge. If it does not converge
    /// within `max_iterations`, the iterate with the smallest residual is returned, which is
    /// always finite for a finite input.
    pub fn undistort_normalized(
        &self,
        xd: f64,
        yd: f64,
        max_iterations: usize,
        tolerance: f64,
    ) -> (f64, f64) {
        // initial guess: assume no distortion
        let (mut x, mut y) = (xd, yd);
        let mut best = (x, y);
        let mut best_residual = f64::INFINITY;

        for _ in 0..max_iterations {
            let (x_pred, y_pred) = self.distort_normalized(x, y);
            let (dx, dy) = (xd - x_pred, yd - y_pred);

            let residual = dx.hypot(dy);
            if !residual.is_finite() {
                break;
            }
            if residual < best_residual {
                best_residual = residual;
                best = (x, y);
            }

            x += dx;
            y += dy;

            if dx.abs() < tolerance && dy.abs() < tolerance {
                return (x, y);
            }
        }

        log::warn!(
            "undistortion of ({xd}, {yd}) did not converge after {max_iterations} iterations, \
             residual {best_residual}"
        );
        best
    }
}

/// How pixel coordinates are corrected for lens distortion before back-projection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum UndistortMode {
    /// Pixels are treated as already distortion free.
    #[default]
    Disabled,
    /// Invert the distortion model by fixed-point iteration.
    Iterative {
        /// The maximum number of refinement steps
        max_iterations: usize,
        /// The update size, in normalized units, below which the iteration stops
        tolerance: f64,
    },
}

impl UndistortMode {
    /// Iterative undistortion with settings that converge for typical PTZ lenses.
    pub fn iterative() -> Self {
        Self::Iterative {
            max_iterations: 20,
            tolerance: 1e-12,
        }
    }
}
