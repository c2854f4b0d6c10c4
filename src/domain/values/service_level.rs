use serde::{Deserialize, Serialize};
use std::fmt;

/// Target probability of not stocking out during lead time.
///
/// Strictly between 0 and 1; a level of exactly 0 or 1 has no finite
/// z-score and is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceLevel(f64);

impl ServiceLevel {
    pub fn new(value: f64) -> Result<Self, String> {
        if !value.is_finite() || value <= 0.0 || value >= 1.0 {
            return Err(format!(
                "Service level must be strictly between 0.0 and 1.0, got {value}"
            ));
        }
        Ok(ServiceLevel(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// z-score for this service level: the inverse standard-normal CDF.
    ///
    /// Uses Acklam's rational approximation (relative error below 1.15e-9
    /// over the whole open interval), which reproduces the usual planning
    /// values: 0.90 → 1.2816, 0.95 → 1.6449, 0.99 → 2.3263.
    pub fn z_score(&self) -> f64 {
        inverse_normal_cdf(self.0)
    }
}

impl fmt::Display for ServiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

impl Default for ServiceLevel {
    fn default() -> Self {
        ServiceLevel(0.95)
    }
}

/// Inverse standard-normal CDF via Acklam's rational approximation.
///
/// Central region uses one rational polynomial; the tails (p < 0.02425 or
/// p > 0.97575) use another in sqrt(-2 ln p) space. `p` must be in (0,1);
/// `ServiceLevel` guarantees that for every caller in this crate.
fn inverse_normal_cdf(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}
