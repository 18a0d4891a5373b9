//! Random deviate helpers shared by the optimizers.

use core::f64::consts::TAU;

/// Generate a random `f64` in the range `[low, high)`.
#[inline]
pub(crate) fn f64_range(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

/// Draws a normally distributed deviate with the given mean and standard
/// deviation using the Box–Muller transform (sine branch).
///
/// Two uniform deviates are consumed per draw. They are taken as
/// `1.0 - rng.f64()` so they fall in `(0, 1]` and the logarithm stays
/// finite. Each returned value is a valid normal deviate, but consecutive
/// draws are not independent pairs — the cosine branch is discarded.
///
/// # Examples
///
/// ```
/// use downhill::gaussian;
///
/// let mut rng = fastrand::Rng::with_seed(7);
/// let deviate = gaussian(&mut rng, 10.0, 2.0);
/// assert!(deviate.is_finite());
/// ```
#[must_use]
pub fn gaussian(rng: &mut fastrand::Rng, mean: f64, std_dev: f64) -> f64 {
    let u1 = 1.0 - rng.f64();
    let u2 = 1.0 - rng.f64();
    let standard = (-2.0 * u1.ln()).sqrt() * (TAU * u2).sin();
    mean + std_dev * standard
}
