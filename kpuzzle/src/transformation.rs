//! Transformation values and the algebra over them.
//!
//! A [`Transformation`] describes, for every orbit of a definition, where
//! each piece comes from and how much orientation it picks up. The algebra
//! (identity, combine, invert, multiply, equivalent) lives on
//! [`PuzzleDef`] so the orbit table is always in scope, and every operation
//! returns a fresh value.

use itertools::izip;
use thiserror::Error;

use crate::def::{OrbitDef, PuzzleDef};

/// The effect of a move, an expression, or a whole session on every orbit
/// of a puzzle.
///
/// Applying a transformation moves the piece at source slot
/// `permutation[i]` into slot `i` and adds `orientation[i]` (mod the
/// orbit's orientation count) to that piece's accumulated orientation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transformation {
    orbits: Box<[OrbitTransformation]>,
}

/// One orbit's rows of a [`Transformation`], in the owning definition's
/// orbit order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrbitTransformation {
    permutation: Box<[u16]>,
    orientation: Box<[u8]>,
}

impl Transformation {
    pub(crate) fn new(orbits: Box<[OrbitTransformation]>) -> Self {
        Transformation { orbits }
    }

    /// Get the per-orbit rows in definition orbit order
    #[must_use]
    pub fn orbits(&self) -> &[OrbitTransformation] {
        &self.orbits
    }
}

impl OrbitTransformation {
    pub(crate) fn new(permutation: Box<[u16]>, orientation: Box<[u8]>) -> Self {
        OrbitTransformation {
            permutation,
            orientation,
        }
    }

    /// Get the source slot for every destination slot
    #[must_use]
    pub fn permutation(&self) -> &[u16] {
        &self.permutation
    }

    /// Get the orientation delta for every destination slot
    #[must_use]
    pub fn orientation(&self) -> &[u8] {
        &self.orientation
    }
}

/// An operand's orbit shapes do not match the definition's. Values built by
/// this crate always match their own definition, so hitting this means two
/// definitions' values were mixed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShapeMismatch {
    #[error("Invalid orbit count, expected {expected} orbits but got {actual}")]
    OrbitCount { expected: usize, actual: usize },
    #[error("Invalid piece count, expected {expected} pieces but got {actual}")]
    PieceCount { expected: u16, actual: usize },
}

pub(crate) fn identity_orbit(orbit_def: &OrbitDef) -> OrbitTransformation {
    let piece_count = orbit_def.piece_count.get();
    OrbitTransformation {
        permutation: (0..piece_count).collect(),
        orientation: vec![0; usize::from(piece_count)].into_boxed_slice(),
    }
}

// The reduced orientation is always below the orbit's orientation count,
// which fits u8.
#[allow(clippy::cast_possible_truncation)]
fn compose_orbit(
    orbit_def: &OrbitDef,
    a: &OrbitTransformation,
    b: &OrbitTransformation,
) -> OrbitTransformation {
    let orientation_count = u16::from(orbit_def.orientation_count.get());
    let mut permutation = Vec::with_capacity(b.permutation.len());
    let mut orientation = Vec::with_capacity(b.permutation.len());

    for (&slot, &b_ori) in b.permutation.iter().zip(b.orientation.iter()) {
        let slot = usize::from(slot);
        permutation.push(a.permutation[slot]);
        let summed = u16::from(a.orientation[slot]) + u16::from(b_ori);
        let reduced = if summed >= orientation_count {
            summed - orientation_count
        } else {
            summed
        };
        orientation.push(reduced as u8);
    }

    OrbitTransformation {
        permutation: permutation.into_boxed_slice(),
        orientation: orientation.into_boxed_slice(),
    }
}

// Slot indices fit u16 because the orbit has at most u16::MAX pieces.
#[allow(clippy::cast_possible_truncation)]
fn invert_orbit(orbit_def: &OrbitDef, a: &OrbitTransformation) -> OrbitTransformation {
    let orientation_count = orbit_def.orientation_count.get();
    let mut permutation = vec![0_u16; a.permutation.len()].into_boxed_slice();
    let mut orientation = vec![0_u8; a.permutation.len()].into_boxed_slice();

    for (i, (&slot, &ori)) in a.permutation.iter().zip(a.orientation.iter()).enumerate() {
        let slot = usize::from(slot);
        permutation[slot] = i as u16;
        orientation[slot] = if ori == 0 { 0 } else { orientation_count - ori };
    }

    OrbitTransformation {
        permutation,
        orientation,
    }
}

impl PuzzleDef {
    /// The transformation that leaves every piece in place, unoriented.
    #[must_use]
    pub fn identity_transformation(&self) -> Transformation {
        Transformation {
            orbits: self.orbits().iter().map(identity_orbit).collect(),
        }
    }

    fn check_shape(&self, t: &Transformation) -> Result<(), ShapeMismatch> {
        if t.orbits.len() != self.orbits().len() {
            return Err(ShapeMismatch::OrbitCount {
                expected: self.orbits().len(),
                actual: t.orbits.len(),
            });
        }
        for (orbit_def, orbit) in self.orbits().iter().zip(t.orbits.iter()) {
            let expected = orbit_def.piece_count.get();
            if orbit.permutation.len() != usize::from(expected) {
                return Err(ShapeMismatch::PieceCount {
                    expected,
                    actual: orbit.permutation.len(),
                });
            }
            if orbit.orientation.len() != usize::from(expected) {
                return Err(ShapeMismatch::PieceCount {
                    expected,
                    actual: orbit.orientation.len(),
                });
            }
        }
        Ok(())
    }

    /// Compose two transformations: the result applies `a`, then `b`.
    ///
    /// Per orbit, the result takes the piece for slot `i` from
    /// `a.permutation[b.permutation[i]]` and accumulates both orientation
    /// deltas mod the orbit's orientation count. The operand order is part
    /// of the contract: applying a move to a session state composes as
    /// `combine(state, move_transformation)`, and every caller in this
    /// crate follows that order.
    ///
    /// # Errors
    ///
    /// [`ShapeMismatch`] if either operand's orbit shapes differ from this
    /// definition's.
    pub fn combine(
        &self,
        a: &Transformation,
        b: &Transformation,
    ) -> Result<Transformation, ShapeMismatch> {
        self.check_shape(a)?;
        self.check_shape(b)?;
        Ok(Transformation {
            orbits: izip!(self.orbits(), a.orbits.iter(), b.orbits.iter())
                .map(|(orbit_def, a_orbit, b_orbit)| compose_orbit(orbit_def, a_orbit, b_orbit))
                .collect(),
        })
    }

    /// The transformation that undoes `a`.
    ///
    /// # Errors
    ///
    /// [`ShapeMismatch`] if `a`'s orbit shapes differ from this
    /// definition's.
    pub fn invert(&self, a: &Transformation) -> Result<Transformation, ShapeMismatch> {
        self.check_shape(a)?;
        Ok(Transformation {
            orbits: self
                .orbits()
                .iter()
                .zip(a.orbits.iter())
                .map(|(orbit_def, a_orbit)| invert_orbit(orbit_def, a_orbit))
                .collect(),
        })
    }

    /// Compose `a` with itself `amount` times, by squaring rather than one
    /// combine per repetition. Zero yields the identity and negative
    /// amounts repeat the inverse.
    ///
    /// # Errors
    ///
    /// [`ShapeMismatch`] if `a`'s orbit shapes differ from this
    /// definition's.
    pub fn multiply(
        &self,
        a: &Transformation,
        amount: i64,
    ) -> Result<Transformation, ShapeMismatch> {
        self.check_shape(a)?;
        let mut base = if amount < 0 { self.invert(a)? } else { a.clone() };
        let mut remaining = amount.unsigned_abs();
        let mut result = self.identity_transformation();

        while remaining > 0 {
            if remaining & 1 == 1 {
                result = self.combine(&result, &base)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = self.combine(&base, &base)?;
            }
        }

        Ok(result)
    }

    /// Whether `a` and `b` have element-wise equal permutation and
    /// orientation arrays in every orbit. No canonicalization: two states
    /// that merely look alike under relabeling are not equivalent.
    ///
    /// # Errors
    ///
    /// [`ShapeMismatch`] if either operand's orbit shapes differ from this
    /// definition's.
    pub fn equivalent(
        &self,
        a: &Transformation,
        b: &Transformation,
    ) -> Result<bool, ShapeMismatch> {
        self.check_shape(a)?;
        self.check_shape(b)?;
        Ok(a == b)
    }
}
