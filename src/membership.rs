//! Triangular membership functions.
//!
//! A triangle is described by its left foot `a`, peak `b` and right foot `c`.
//! Shoulders (`a == b` or `b == c`) and point masses (`a == b == c`) are
//! valid degenerate forms.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::variable::Universe;

/// A triangular fuzzy set `(a, b, c)` with `a <= b <= c`.
///
/// Serialized as the array `[a, b, c]`.
///
/// # Examples
///
/// ```
/// use agrofuzz::Triangular;
///
/// let moderate = Triangular::new(18.0, 24.0, 30.0).unwrap();
/// assert_eq!(moderate.degree(24.0), 1.0);
/// assert_eq!(moderate.degree(18.0), 0.0);
/// assert_eq!(moderate.degree(27.0), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 3]")]
pub struct Triangular {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangular {
    /// Creates a validated triangle.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NonFiniteTriangle` if any parameter is NaN or
    /// infinite, and `ConfigError::UnorderedTriangle` unless `a <= b <= c`.
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, ConfigError> {
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(ConfigError::NonFiniteTriangle { a, b, c });
        }
        if a > b || b > c {
            return Err(ConfigError::UnorderedTriangle { a, b, c });
        }
        Ok(Self { a, b, c })
    }

    /// Left foot.
    #[must_use]
    pub const fn a(&self) -> f64 {
        self.a
    }

    /// Peak.
    #[must_use]
    pub const fn b(&self) -> f64 {
        self.b
    }

    /// Right foot.
    #[must_use]
    pub const fn c(&self) -> f64 {
        self.c
    }

    /// Closed support interval `[a, c]`.
    #[must_use]
    pub const fn support(&self) -> (f64, f64) {
        (self.a, self.c)
    }

    /// Degree of membership of `x`, in `[0, 1]`.
    ///
    /// Total over all reals: anything outside `[a, c]` (including NaN) is 0.
    /// The feet and the peak return exact values; slopes are only evaluated
    /// strictly inside `(a, b)` or `(b, c]`, so a zero-width side never
    /// divides by zero.
    #[must_use]
    pub fn degree(&self, x: f64) -> f64 {
        if !(self.a..=self.c).contains(&x) {
            return 0.0;
        }
        if x == self.b {
            return 1.0;
        }
        if x < self.b {
            (x - self.a) / (self.b - self.a)
        } else {
            (self.c - x) / (self.c - self.b)
        }
    }

    /// Samples the function over a discretized universe as `(x, μ(x))` pairs.
    #[must_use]
    pub fn curve(&self, universe: &Universe) -> Vec<(f64, f64)> {
        universe.points().map(|x| (x, self.degree(x))).collect()
    }
}

impl From<Triangular> for [f64; 3] {
    fn from(t: Triangular) -> Self {
        [t.a, t.b, t.c]
    }
}

impl TryFrom<[f64; 3]> for Triangular {
    type Error = ConfigError;

    fn try_from([a, b, c]: [f64; 3]) -> Result<Self, Self::Error> {
        Self::new(a, b, c)
    }
}

impl<'de> Deserialize<'de> for Triangular {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <[f64; 3]>::deserialize(deserializer)?;
        Triangular::try_from(raw).map_err(serde::de::Error::custom)
    }
}
