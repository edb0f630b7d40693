use crate::error::{CorniceError, CorniceResult};

/// Maps `in_count` source indices onto `out_count <= in_count` destination
/// slots via `map(x) = x * (out_count - 1) / (in_count - 1)`.
///
/// Integer-only, truncating. Several source indices may collapse onto one
/// destination slot; callers average the collapsed pixels (see
/// [`crate::average::PixelAverager`]).
#[derive(Clone, Copy, Debug)]
pub struct Downsampler {
    numerator: u64,
    denominator: u64,
}

impl Downsampler {
    pub fn new(in_count: u32, out_count: u32) -> CorniceResult<Self> {
        if in_count < 2 {
            return Err(CorniceError::validation(
                "downsampler requires at least 2 source indices",
            ));
        }
        if out_count == 0 || out_count > in_count {
            return Err(CorniceError::validation(format!(
                "downsampler requires 1 <= out_count <= in_count, got {out_count}/{in_count}"
            )));
        }
        Ok(Self {
            numerator: u64::from(out_count - 1),
            denominator: u64::from(in_count - 1),
        })
    }

    pub fn map(&self, x: u32) -> u32 {
        (u64::from(x) * self.numerator / self.denominator) as u32
    }
}

const BIG_FACTOR: u64 = 256;

/// Maps `out_count >= in_count` destination indices back to a pair of
/// adjacent source indices to blend with equal weight.
///
/// True linear interpolation is approximated in fixed point: the ratio
/// `x * (2 * (in_count - 1) + f) / (out_count - 1)` with a fractional term
/// `f` infinitely close to (but below) 1 is scaled by a power-of-two factor
/// so the whole computation stays in integers. Halving the result (floor
/// and ceiling) yields the sample pair: equal halves mean a single-sample
/// copy, unequal halves an equal-weight average of two neighbors.
#[derive(Clone, Copy, Debug)]
pub struct Upsampler {
    numerator: u64,
    denominator: u64,
}

impl Upsampler {
    pub fn new(in_count: u32, out_count: u32) -> CorniceResult<Self> {
        if in_count < 2 {
            return Err(CorniceError::validation(
                "upsampler requires at least 2 source indices",
            ));
        }
        if out_count < in_count {
            return Err(CorniceError::validation(format!(
                "upsampler requires out_count >= in_count, got {out_count}/{in_count}"
            )));
        }
        Ok(Self {
            numerator: 2 * u64::from(in_count - 1) * BIG_FACTOR + (BIG_FACTOR - 1),
            denominator: u64::from(out_count - 1) * BIG_FACTOR,
        })
    }

    /// Source sample pair `(a, b)` for destination index `x`, with
    /// `a <= b <= a + 1`.
    pub fn map(&self, x: u32) -> (u32, u32) {
        let n = u64::from(x) * self.numerator / self.denominator;
        ((n / 2) as u32, ((n + 1) / 2) as u32)
    }
}
