//! Values with an absolute uncertainty.

use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A nominal value together with its absolute (one standard deviation) uncertainty.
///
/// The uncertainty is never negative. Arithmetic between two `Measurement`s propagates
/// uncertainty to first order, assuming the operands are independent:
///
/// ```rust
/// use labtools::instruments::Measurement;
///
/// let v = Measurement::new(5.0, 0.03);
/// let i = Measurement::new(2.0, 0.04);
/// let r = v / i;
/// assert!((r.value() - 2.5).abs() < 1e-12);
/// // σ_R / R = √((σ_V / V)² + (σ_I / I)²)
/// let expected = 2.5 * ((0.03_f64 / 5.0).powi(2) + (0.04_f64 / 2.0).powi(2)).sqrt();
/// assert!((r.uncertainty() - expected).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMeasurement")]
pub struct Measurement {
    value: f64,
    uncertainty: f64,
}

/// Deserialization goes through [`Measurement::new`] so a stored negative uncertainty
/// is normalised.
#[derive(Deserialize)]
struct RawMeasurement {
    value: f64,
    uncertainty: f64,
}

impl From<RawMeasurement> for Measurement {
    fn from(raw: RawMeasurement) -> Self {
        Self::new(raw.value, raw.uncertainty)
    }
}

impl Measurement {
    /// Create a measurement; the sign of `uncertainty` is discarded.
    #[inline]
    pub fn new(value: f64, uncertainty: f64) -> Self {
        Self {
            value,
            uncertainty: uncertainty.abs(),
        }
    }

    /// A value known without uncertainty.
    #[inline]
    pub fn exact(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    /// `uncertainty / |value|`.
    ///
    /// A zero value gives infinity when the uncertainty is non-zero, and NaN for an
    /// exact zero.
    #[inline]
    pub fn relative_uncertainty(&self) -> f64 {
        self.uncertainty / self.value.abs()
    }

    /// `(value - uncertainty, value + uncertainty)`.
    #[inline]
    pub fn bounds(&self) -> (f64, f64) {
        (self.value - self.uncertainty, self.value + self.uncertainty)
    }

    /// Whether `other` lies within one uncertainty of the nominal value.
    pub fn contains(&self, other: f64) -> bool {
        let (low, high) = self.bounds();
        (low..=high).contains(&other)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} ± {:.*}", p, self.value, p, self.uncertainty),
            None => write!(f, "{} ± {}", self.value, self.uncertainty),
        }
    }
}

impl From<f64> for Measurement {
    #[inline]
    fn from(value: f64) -> Self {
        Self::exact(value)
    }
}

impl Add for Measurement {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.value + rhs.value,
            self.uncertainty.hypot(rhs.uncertainty),
        )
    }
}

impl Sub for Measurement {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.value - rhs.value,
            self.uncertainty.hypot(rhs.uncertainty),
        )
    }
}

impl Mul for Measurement {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // ∂(ab)/∂a = b, ∂(ab)/∂b = a
        Self::new(
            self.value * rhs.value,
            (rhs.value * self.uncertainty).hypot(self.value * rhs.uncertainty),
        )
    }
}

impl Div for Measurement {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        // ∂(a/b)/∂a = 1/b, ∂(a/b)/∂b = -a/b²
        Self::new(
            self.value / rhs.value,
            (self.uncertainty / rhs.value)
                .hypot(self.value * rhs.uncertainty / (rhs.value * rhs.value)),
        )
    }
}

impl Mul<f64> for Measurement {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs, self.uncertainty * rhs)
    }
}

impl Mul<Measurement> for f64 {
    type Output = Measurement;
    #[inline]
    fn mul(self, rhs: Measurement) -> Measurement {
        rhs * self
    }
}

impl Div<f64> for Measurement {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.value / rhs, self.uncertainty / rhs)
    }
}

impl Neg for Measurement {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.value, self.uncertainty)
    }
}
