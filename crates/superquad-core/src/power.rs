//! Signed power functions
//!
//! The superquadric formulas raise trigonometric terms to arbitrary real
//! exponents. A plain `powf` is undefined for a negative base with a
//! fractional exponent, so every term is evaluated as
//! `sign(t) * |t|^m`, with `sign(0) = 0`.
//!
//! An exactly zero term short-circuits to `0.0` for every exponent. Without
//! that, `0^m` with `m < 0` is `inf` and the product `0 * inf` would be `NaN`
//! at every grid boundary where `sin` or `cos` vanishes.

/// Sign of `v` with `sign(0) = 0`
///
/// Unlike [`f64::signum`], zero (of either sign) maps to `0.0`. `NaN` stays `NaN`.
#[inline]
pub fn sgn(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v.signum() }
}

/// `sign(v) * |v|^m`
#[inline]
pub fn signed_pow(v: f64, m: f64) -> f64 {
    if v == 0.0 {
        return 0.0;
    }
    sgn(v) * v.abs().powf(m)
}

/// `sign(sin w) * |sin w|^m`
#[inline]
pub fn signed_sin(w: f64, m: f64) -> f64 {
    signed_pow(w.sin(), m)
}

/// `sign(cos w) * |cos w|^m`
#[inline]
pub fn signed_cos(w: f64, m: f64) -> f64 {
    signed_pow(w.cos(), m)
}

/// `sign(tan w) * |tan w|^m`
#[inline]
pub fn signed_tan(w: f64, m: f64) -> f64 {
    signed_pow(w.tan(), m)
}

/// `sign(sec w) * |sec w|^m` with `sec w = 1 / cos w`
///
/// An exactly zero cosine gives `inf` (no error is raised).
#[inline]
pub fn signed_sec(w: f64, m: f64) -> f64 {
    signed_pow(w.cos().recip(), m)
}
