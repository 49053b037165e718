// Fold simulation core: thickness doubling, sheet halving, landmark comparison and
// the display text built from them. No HTTP types in here; `sessions` and `routes`
// drive it.

pub mod comparison;
pub mod format;
pub mod params;
pub mod sheet;
pub mod simulator;
pub mod text;
pub mod thickness;

pub use params::{NumericInput, ParameterError, SimulationParameters};
pub use simulator::{compute, FoldResult, FoldSimulator, FoldView};
pub use text::Locale;
