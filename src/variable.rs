//! Linguistic variables and their universes of discourse.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::membership::Triangular;

/// Upper bound on the number of discretization points of one universe.
///
/// Resolution is static configuration, but a document with a pathologically
/// fine resolution would make every inference call slow.
pub const MAX_UNIVERSE_POINTS: usize = 1_000_000;

/// A bounded, discretized universe of discourse `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Universe {
    lo: f64,
    hi: f64,
    resolution: f64,
}

impl Universe {
    /// Creates a validated universe.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUniverse` if a bound or the resolution is
    /// not finite, `lo >= hi`, the resolution is not positive or wider than
    /// the universe, the resolution does not divide `hi - lo` (so `hi` would
    /// never be sampled), or the universe would exceed `MAX_UNIVERSE_POINTS`.
    pub fn new(lo: f64, hi: f64, resolution: f64) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidUniverse {
            lo,
            hi,
            resolution,
            reason: reason.to_string(),
        };

        if !(lo.is_finite() && hi.is_finite() && resolution.is_finite()) {
            return Err(invalid("bounds and resolution must be finite"));
        }
        if lo >= hi {
            return Err(invalid("lower bound must be below upper bound"));
        }
        if resolution <= 0.0 || resolution > hi - lo {
            return Err(invalid("resolution must be positive and no wider than the universe"));
        }
        if (hi - lo) / resolution >= MAX_UNIVERSE_POINTS as f64 {
            return Err(invalid("resolution is too fine"));
        }

        let universe = Self { lo, hi, resolution };
        #[allow(clippy::cast_precision_loss)]
        let last = lo + (universe.len() - 1) as f64 * resolution;
        if (hi - last).abs() > resolution * 1e-9 {
            return Err(invalid("resolution must divide the universe span"));
        }
        Ok(universe)
    }

    /// Lower bound.
    #[must_use]
    pub const fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper bound.
    #[must_use]
    pub const fn hi(&self) -> f64 {
        self.hi
    }

    /// Discretization step.
    #[must_use]
    pub const fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Number of discretization points, both bounds included.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn len(&self) -> usize {
        ((self.hi - self.lo) / self.resolution + 1e-9).floor() as usize + 1
    }

    /// A validated universe always holds at least its two bounds.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The `i`-th discretization point.
    ///
    /// Points are computed as `lo + i * resolution` (never by accumulation);
    /// a point within rounding distance of `hi` snaps to `hi`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn point(&self, i: usize) -> f64 {
        let x = self.lo + i as f64 * self.resolution;
        if x > self.hi || (self.hi - x).abs() <= self.resolution * 1e-9 {
            self.hi
        } else {
            x
        }
    }

    /// Iterates the discretization points in ascending order.
    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.point(i))
    }

    /// Returns true if `x` lies inside `[lo, hi]`.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        (self.lo..=self.hi).contains(&x)
    }

    /// Clamps `x` into `[lo, hi]`.
    #[must_use]
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.lo, self.hi)
    }
}

#[derive(Deserialize)]
struct RawUniverse {
    lo: f64,
    hi: f64,
    resolution: f64,
}

impl<'de> Deserialize<'de> for Universe {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawUniverse::deserialize(deserializer)?;
        Universe::new(raw.lo, raw.hi, raw.resolution).map_err(serde::de::Error::custom)
    }
}

/// A named fuzzy set of a linguistic variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Term name, e.g. "High".
    pub name: String,
    /// Membership function.
    pub mf: Triangular,
}

impl Term {
    /// Creates a term.
    pub fn new(name: impl Into<String>, mf: Triangular) -> Self {
        Self {
            name: name.into(),
            mf,
        }
    }
}

/// A named input or output dimension with ordered, overlapping terms.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinguisticVariable {
    name: String,
    universe: Universe,
    terms: Vec<Term>,
}

impl LinguisticVariable {
    /// Creates a validated variable.
    ///
    /// # Errors
    ///
    /// Fails when the name is empty, no term is declared, a term name repeats,
    /// or a term's support leaves the universe.
    pub fn new(
        name: impl Into<String>,
        universe: Universe,
        terms: Vec<Term>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyVariableName);
        }
        if terms.is_empty() {
            return Err(ConfigError::EmptyVariable { variable: name });
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(terms.len());
        for term in &terms {
            if !seen.insert(term.name.as_str()) {
                return Err(ConfigError::DuplicateTerm {
                    variable: name,
                    term: term.name.clone(),
                });
            }
            let (a, c) = term.mf.support();
            if a < universe.lo() || c > universe.hi() {
                return Err(ConfigError::TermOutsideUniverse {
                    variable: name,
                    term: term.name.clone(),
                    a,
                    c,
                    lo: universe.lo(),
                    hi: universe.hi(),
                });
            }
        }

        Ok(Self {
            name,
            universe,
            terms,
        })
    }

    /// Convenience constructor from `(term, [a, b, c])` triples.
    ///
    /// # Errors
    ///
    /// Fails on an invalid universe, an invalid triangle (reported with the
    /// term name) or any condition checked by [`LinguisticVariable::new`].
    pub fn triangular(
        name: impl Into<String>,
        (lo, hi, resolution): (f64, f64, f64),
        terms: &[(&str, [f64; 3])],
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let universe = Universe::new(lo, hi, resolution).map_err(|e| ConfigError::InvalidVariable {
            variable: name.clone(),
            source: Box::new(e),
        })?;
        let terms = terms
            .iter()
            .map(|(term, params)| {
                Triangular::try_from(*params)
                    .map(|mf| Term::new(*term, mf))
                    .map_err(|e| ConfigError::InvalidTerm {
                        variable: name.clone(),
                        term: (*term).to_string(),
                        source: Box::new(e),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, universe, terms)
    }

    /// Variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Universe of discourse.
    #[must_use]
    pub const fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Terms in declaration order.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Looks up a term's membership function by name.
    #[must_use]
    pub fn term(&self, name: &str) -> Option<&Triangular> {
        self.terms.iter().find(|t| t.name == name).map(|t| &t.mf)
    }

    /// Position of a term in declaration order.
    #[must_use]
    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.name == name)
    }

    /// Degree of every term for `value`, in declaration order.
    ///
    /// The value is never rejected or clamped here: out-of-universe readings
    /// are handed to the membership functions as they are. Degrees are not
    /// normalized.
    #[must_use]
    pub fn fuzzify(&self, value: f64) -> Vec<(&str, f64)> {
        self.terms
            .iter()
            .map(|t| (t.name.as_str(), t.mf.degree(value)))
            .collect()
    }

    /// Index-aligned degrees, used on the inference path.
    pub(crate) fn degrees(&self, value: f64) -> Vec<f64> {
        self.terms.iter().map(|t| t.mf.degree(value)).collect()
    }

    /// Samples every term over the universe.
    #[must_use]
    pub fn curves(&self) -> Vec<(&str, Vec<(f64, f64)>)> {
        self.terms
            .iter()
            .map(|t| (t.name.as_str(), t.mf.curve(&self.universe)))
            .collect()
    }
}

#[derive(Deserialize)]
struct RawVariable {
    name: String,
    universe: Universe,
    terms: Vec<Term>,
}

impl<'de> Deserialize<'de> for LinguisticVariable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawVariable::deserialize(deserializer)?;
        LinguisticVariable::new(raw.name, raw.universe, raw.terms).map_err(serde::de::Error::custom)
    }
}
