use serde::{Deserialize, Serialize};

pub const MM_TO_CM: f64 = 0.1;
pub const MM_TO_M: f64 = 0.001;
pub const M_TO_KM: f64 = 0.001;

/// Stack thickness after a number of folds, in every unit the display needs.
///
/// Growth is unbounded: past roughly 1000 folds the values become `inf`, which the
/// display prints as `Infinity`. Serialized as JSON, non-finite values become `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thickness {
    pub millimeters: f64,
    pub centimeters: f64,
    pub meters: f64,
    pub kilometers: f64,
}

impl Thickness {
    /// `base * 2^folds`, converted from millimetres.
    pub fn after_folds(base_thickness_mm: f64, folds: u32) -> Self {
        let millimeters = base_thickness_mm * doubling_factor(folds);
        let meters = millimeters * MM_TO_M;
        Self {
            millimeters,
            centimeters: millimeters * MM_TO_CM,
            meters,
            kilometers: meters * M_TO_KM,
        }
    }
}

/// `2^folds`, exact up to 2^1023 and `inf` beyond.
fn doubling_factor(folds: u32) -> f64 {
    match i32::try_from(folds) {
        Ok(n) => 2f64.powi(n),
        Err(_) => f64::INFINITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_folds_is_base() {
        let t = Thickness::after_folds(0.1, 0);
        assert_eq!(t.millimeters, 0.1);
    }

    #[test]
    fn test_seven_folds_of_copy_paper() {
        let t = Thickness::after_folds(0.1, 7);
        assert!((t.millimeters - 12.8).abs() < 1e-12);
        assert!((t.centimeters - 1.28).abs() < 1e-12);
        assert!((t.meters - 0.0128).abs() < 1e-15);
        assert!((t.kilometers - 0.0000128).abs() < 1e-18);
    }

    #[test]
    fn test_doubling_law_is_exact() {
        for n in 0..200 {
            let this = Thickness::after_folds(0.1, n).millimeters;
            let next = Thickness::after_folds(0.1, n + 1).millimeters;
            assert_eq!(next, 2.0 * this, "fold {n}");
        }
    }

    #[test]
    fn test_overflow_degrades_to_infinity() {
        assert!(Thickness::after_folds(0.1, 1100).millimeters.is_infinite());
        assert!(Thickness::after_folds(0.1, u32::MAX).meters.is_infinite());
    }
}
