use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};

/// One position of a reactivity profile.
///
/// `fshape` is the primary chemical-probing value and may be missing (NaN).
/// `base` defaults to `'N'` when the source file carries no sequence, and
/// `shape` is an optional secondary measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nucleotide {
    pub fshape: f64,
    pub base: char,
    pub shape: f64,
}

impl Nucleotide {
    pub fn new(fshape: f64) -> Self {
        Self {
            fshape,
            base: 'N',
            shape: f64::NAN,
        }
    }

    pub fn with_base(fshape: f64, base: char) -> Self {
        Self {
            fshape,
            base,
            shape: f64::NAN,
        }
    }
}

/// A named reactivity profile, stored column-wise.
///
/// The three columns always have equal length. A series is immutable once
/// loaded; the only exception is [`Series::scramble`], the robustness-test
/// mode that permutes all columns with one shared permutation.
#[derive(Debug, Clone)]
pub struct Series {
    name: String,
    fshapes: Vec<f64>,
    shapes: Vec<f64>,
    bases: Vec<char>,
}

impl Series {
    pub fn new(name: impl Into<String>, nucleotides: &[Nucleotide]) -> Self {
        Self {
            name: name.into(),
            fshapes: nucleotides.iter().map(|nt| nt.fshape).collect(),
            shapes: nucleotides.iter().map(|nt| nt.shape).collect(),
            bases: nucleotides.iter().map(|nt| nt.base).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.fshapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fshapes.is_empty()
    }

    pub fn fshapes(&self) -> &[f64] {
        &self.fshapes
    }

    pub fn shapes(&self) -> &[f64] {
        &self.shapes
    }

    pub fn bases(&self) -> &[char] {
        &self.bases
    }

    /// Number of positions with a finite fSHAPE value.
    pub fn finite_count(&self) -> usize {
        self.fshapes.iter().filter(|v| v.is_finite()).count()
    }

    /// The base sequence over `[start, start + len)` as a string.
    pub fn sequence(&self, start: usize, len: usize) -> String {
        self.bases[start..start + len].iter().collect()
    }

    /// Smallest and largest finite fSHAPE values.
    ///
    /// Fails when the series contains no finite value at all, so an
    /// all-missing input surfaces here instead of propagating NaN.
    pub fn finite_min_max(&self) -> Result<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in &self.fshapes {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min > max {
            return Err(Error::NoFiniteValues {
                name: self.name.clone(),
            });
        }
        Ok((min, max))
    }

    /// Permute all positions in place with one shared random permutation.
    ///
    /// Robustness-test mode only: a scrambled series should no longer carry
    /// the motif structure of the original.
    pub fn scramble<R: Rng>(&mut self, rng: &mut R) {
        let mut perm: Vec<usize> = (0..self.len()).collect();
        perm.shuffle(rng);
        self.fshapes = perm.iter().map(|&i| self.fshapes[i]).collect();
        self.shapes = perm.iter().map(|&i| self.shapes[i]).collect();
        self.bases = perm.iter().map(|&i| self.bases[i]).collect();
    }
}
