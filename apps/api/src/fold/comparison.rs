use serde::{Deserialize, Serialize};

/// Landmark the folded stack is compared against.
///
/// Variants are declared from lowest to highest so the derived `Ord` ranks tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonTier {
    /// No folds yet: prompt to start.
    NotStarted,
    /// Folded, but below every landmark.
    Progress,
    /// ~50 m, a 15-storey building.
    Building,
    /// 634 m, Tokyo Skytree.
    Tower,
    /// 8,848 m.
    Everest,
    /// 100 km, the Kármán line.
    KarmanLine,
    /// 384,400 km.
    Moon,
    /// Beyond the Moon, on the way to Mars.
    Mars,
}

/// Landmark thresholds in metres, in evaluation order. The first match wins.
///
/// Mars is checked before the Moon with a lower threshold, so the Moon tier is never
/// selected: anything past 300,000 km already reads as heading for Mars.
pub const THRESHOLDS_M: &[(f64, ComparisonTier)] = &[
    (300_000_000.0, ComparisonTier::Mars),
    (384_400_000.0, ComparisonTier::Moon),
    (100_000.0, ComparisonTier::KarmanLine),
    (8_848.0, ComparisonTier::Everest),
    (634.0, ComparisonTier::Tower),
    (50.0, ComparisonTier::Building),
];

impl ComparisonTier {
    pub fn select(thickness_m: f64, folds: u32) -> Self {
        THRESHOLDS_M
            .iter()
            .find(|(threshold, _)| thickness_m >= *threshold)
            .map(|(_, tier)| *tier)
            .unwrap_or(if folds > 0 {
                ComparisonTier::Progress
            } else {
                ComparisonTier::NotStarted
            })
    }
}
