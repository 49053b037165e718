use serde::{Deserialize, Serialize};

/// Face of the folded sheet in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetSize {
    pub width_cm: f64,
    pub length_cm: f64,
}

impl SheetSize {
    pub fn square(side_cm: f64) -> Self {
        Self {
            width_cm: side_cm,
            length_cm: side_cm,
        }
    }

    /// Folds `folds` times across the longer side. Equal sides fold the width, so a
    /// square alternates width, length, width, ...
    ///
    /// Once both sides have underflowed to zero nothing changes, so the loop stops
    /// there instead of running to very large fold counts.
    pub fn after_folds(side_cm: f64, folds: u32) -> Self {
        let mut size = Self::square(side_cm);
        for _ in 0..folds {
            if size.width_cm == 0.0 && size.length_cm == 0.0 {
                break;
            }
            size.fold_once();
        }
        size
    }

    pub fn fold_once(&mut self) {
        if self.width_cm >= self.length_cm {
            self.width_cm /= 2.0;
        } else {
            self.length_cm /= 2.0;
        }
    }
}
