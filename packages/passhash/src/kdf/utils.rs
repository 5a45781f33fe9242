//! Key derivation utility functions

/// Constant-time comparison for derived keys and digests
///
/// Runs in time independent of where the inputs first differ. Inputs of
/// different length compare unequal.
#[must_use]
#[inline]
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    a.ct_eq(b).into()
}
