//! Fold Simulator: one session's fold count and parameters.
//!
//! Commands (`increment`, `decrement`, `set_parameters`) only mutate state. Every
//! derived value is recomputed from scratch by `compute` / `view`, so nothing derived
//! can go stale between commands.

use serde::{Deserialize, Serialize};

use crate::fold::comparison::ComparisonTier;
use crate::fold::format::{to_exponential, to_fixed, to_js_string, to_locale_grouped};
use crate::fold::params::{NumericInput, ParameterError, SimulationParameters};
use crate::fold::sheet::SheetSize;
use crate::fold::text::Locale;
use crate::fold::thickness::Thickness;

/// Kilometre readings at or above this switch from 4 decimals to grouped digits.
const KM_GROUPING_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    pub fold_count: u32,
}

/// Everything derived from (state, parameters). Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoldResult {
    pub fold_count: u32,
    pub thickness: Thickness,
    pub sheet: SheetSize,
    pub tier: ComparisonTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewStatus {
    Valid,
    Invalid,
}

/// The text fields a user sees, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldView {
    pub status: ViewStatus,
    pub fold_count: u32,
    pub thickness_meters: String,
    pub thickness_kilometers: String,
    pub thickness_centimeters: String,
    pub dimensions: String,
    pub comparison: String,
    /// `None` in the invalid state.
    pub tier: Option<ComparisonTier>,
}

impl FoldView {
    /// `base_label` is the base thickness as echoed in the progress message.
    pub fn from_result(result: &FoldResult, base_label: &str, locale: Locale) -> Self {
        let t = &result.thickness;
        let meters = to_fixed(t.meters, 2);

        let kilometers = if t.kilometers >= KM_GROUPING_THRESHOLD {
            to_locale_grouped(t.kilometers)
        } else {
            to_fixed(t.kilometers, 4)
        };

        let comparison = locale.comparison(
            result.tier,
            result.fold_count,
            base_label,
            &meters,
        );

        Self {
            status: ViewStatus::Valid,
            fold_count: result.fold_count,
            thickness_meters: format!("{meters} {}", locale.meters_unit()),
            thickness_kilometers: format!("{kilometers} {}", locale.kilometers_unit()),
            thickness_centimeters: format!("{} cm", to_exponential(t.centimeters, 2)),
            dimensions: format!(
                "{} cm × {} cm",
                to_fixed(result.sheet.width_cm, 2),
                to_fixed(result.sheet.length_cm, 2)
            ),
            comparison,
            tier: Some(result.tier),
        }
    }

    /// Fixed placeholder text shown while the parameters are invalid.
    pub fn invalid(fold_count: u32, locale: Locale) -> Self {
        Self {
            status: ViewStatus::Invalid,
            fold_count,
            thickness_meters: format!("0.00 {}", locale.meters_unit()),
            thickness_kilometers: format!("0.00 {}", locale.kilometers_unit()),
            thickness_centimeters: locale.cannot_compute().to_string(),
            dimensions: locale.cannot_compute().to_string(),
            comparison: locale.invalid_parameters().to_string(),
            tier: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldSimulator {
    state: SimulationState,
    params: SimulationParameters,
    /// Base thickness exactly as typed, when it arrived as text.
    base_label: Option<String>,
}

impl FoldSimulator {
    /// A fresh simulator starts unfolded. Invalid parameters are accepted here and
    /// surface on the first computation.
    pub fn new(params: SimulationParameters) -> Self {
        Self {
            state: SimulationState::default(),
            params,
            base_label: None,
        }
    }

    /// Like [`FoldSimulator::new`], from client input (numbers or field text).
    pub fn from_inputs(base_thickness_mm: &NumericInput, side_length_cm: &NumericInput) -> Self {
        let mut sim = Self::new(SimulationParameters::new(f64::NAN, f64::NAN));
        sim.set_parameter_inputs(base_thickness_mm, side_length_cm);
        sim
    }

    pub fn fold_count(&self) -> u32 {
        self.state.fold_count
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn increment(&mut self) {
        self.state.fold_count = self.state.fold_count.saturating_add(1);
    }

    /// Unfolds once. At zero folds this is a no-op; returns whether anything changed.
    pub fn decrement(&mut self) -> bool {
        if self.state.fold_count > 0 {
            self.state.fold_count -= 1;
            true
        } else {
            false
        }
    }

    pub fn set_parameters(&mut self, base_thickness_mm: f64, initial_side_length_cm: f64) {
        self.params = SimulationParameters::new(base_thickness_mm, initial_side_length_cm);
        self.base_label = None;
    }

    /// Sets parameters from client input, keeping the base thickness text so the
    /// progress message echoes it as typed.
    pub fn set_parameter_inputs(
        &mut self,
        base_thickness_mm: &NumericInput,
        side_length_cm: &NumericInput,
    ) {
        self.set_parameters(base_thickness_mm.value(), side_length_cm.value());
        if let NumericInput::Text(text) = base_thickness_mm {
            self.base_label = Some(text.clone());
        }
    }

    /// Base thickness as the progress message shows it.
    pub fn base_label(&self) -> String {
        self.base_label
            .clone()
            .unwrap_or_else(|| to_js_string(self.params.base_thickness_mm))
    }

    pub fn compute(&self) -> Result<FoldResult, ParameterError> {
        compute(&self.params, self.state.fold_count)
    }

    /// Current display fields, or the placeholder fields if the parameters are invalid.
    pub fn view(&self, locale: Locale) -> FoldView {
        match self.compute() {
            Ok(result) => FoldView::from_result(&result, &self.base_label(), locale),
            Err(_) => FoldView::invalid(self.state.fold_count, locale),
        }
    }
}

/// Stateless form of [`FoldSimulator::compute`].
pub fn compute(params: &SimulationParameters, folds: u32) -> Result<FoldResult, ParameterError> {
    params.validate()?;

    let thickness = Thickness::after_folds(params.base_thickness_mm, folds);
    let sheet = SheetSize::after_folds(params.initial_side_length_cm, folds);
    let tier = ComparisonTier::select(thickness.meters, folds);

    Ok(FoldResult {
        fold_count: folds,
        thickness,
        sheet,
        tier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fold::params::Parameter;

    fn copy_paper() -> FoldSimulator {
        FoldSimulator::new(SimulationParameters::new(0.1, 21.0))
    }

    fn folded(times: u32) -> FoldSimulator {
        let mut sim = copy_paper();
        for _ in 0..times {
            sim.increment();
        }
        sim
    }

    #[test]
    fn test_starts_unfolded() {
        assert_eq!(copy_paper().fold_count(), 0);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut sim = folded(3);
        assert_eq!(sim.fold_count(), 3);
        assert!(sim.decrement());
        assert_eq!(sim.fold_count(), 2);
    }

    #[test]
    fn test_decrement_at_zero_is_noop() {
        let mut sim = copy_paper();
        let before = sim.clone();
        assert!(!sim.decrement());
        assert_eq!(sim, before);
    }

    #[test]
    fn test_increment_saturates() {
        let mut sim = FoldSimulator {
            state: SimulationState {
                fold_count: u32::MAX,
            },
            params: SimulationParameters::new(0.1, 21.0),
            base_label: None,
        };
        sim.increment();
        assert_eq!(sim.fold_count(), u32::MAX);
        assert!(sim.view(Locale::Ja).thickness_meters.starts_with("Infinity"));
    }

    #[test]
    fn test_seven_folds_example() {
        let sim = folded(7);
        let result = sim.compute().unwrap();
        assert!((result.thickness.millimeters - 12.8).abs() < 1e-12);

        let view = sim.view(Locale::Ja);
        assert_eq!(view.status, ViewStatus::Valid);
        assert_eq!(view.fold_count, 7);
        assert_eq!(view.thickness_meters, "0.01 メートル");
        assert_eq!(view.thickness_kilometers, "0.0000 キロメートル");
        assert_eq!(view.thickness_centimeters, "1.28e+0 cm");
        assert_eq!(view.dimensions, "1.31 cm × 2.63 cm");
        assert_eq!(view.tier, Some(ComparisonTier::Progress));
        assert_eq!(
            view.comparison,
            "🤏 最初の紙の厚さ 0.1mm から 7回折って、0.01m になりました。"
        );
    }

    #[test]
    fn test_zero_folds_view() {
        let view = copy_paper().view(Locale::En);
        assert_eq!(view.thickness_meters, "0.00 meters");
        assert_eq!(view.thickness_kilometers, "0.0000 kilometers");
        assert_eq!(view.thickness_centimeters, "1.00e-2 cm");
        assert_eq!(view.dimensions, "21.00 cm × 21.00 cm");
        assert_eq!(view.comparison, Locale::En.start_prompt());
    }

    #[test]
    fn test_kilometers_switch_to_grouping() {
        // 0.1 mm * 2^27 = 13.42 km
        let view = folded(27).view(Locale::En);
        assert_eq!(view.thickness_kilometers, "13.422 kilometers");
        assert_eq!(view.thickness_meters, "13421.77 meters");
        assert_eq!(view.tier, Some(ComparisonTier::Everest));

        // 0.1 mm * 2^40 = 109,951.16 km
        let view = folded(40).view(Locale::En);
        assert_eq!(view.thickness_kilometers, "109,951.163 kilometers");
    }

    #[test]
    fn test_invalid_parameters_show_placeholders() {
        let mut sim = folded(5);
        sim.set_parameters(0.0, 21.0);
        assert!(matches!(
            sim.compute(),
            Err(ParameterError::InvalidParameters {
                parameter: Parameter::BaseThickness,
                ..
            })
        ));

        let view = sim.view(Locale::Ja);
        assert_eq!(view.status, ViewStatus::Invalid);
        assert_eq!(view.fold_count, 5);
        assert_eq!(view.thickness_meters, "0.00 メートル");
        assert_eq!(view.thickness_kilometers, "0.00 キロメートル");
        assert_eq!(view.thickness_centimeters, "計算不能");
        assert_eq!(view.dimensions, "計算不能");
        assert_eq!(view.tier, None);
    }

    #[test]
    fn test_recovers_after_invalid_parameters() {
        let mut sim = folded(2);
        sim.set_parameters(0.1, -5.0);
        assert!(sim.compute().is_err());
        sim.increment();
        sim.set_parameters(0.1, 21.0);
        let result = sim.compute().unwrap();
        assert_eq!(result.fold_count, 3);
    }

    #[test]
    fn test_stateless_compute_matches_simulator() {
        let params = SimulationParameters::new(0.08, 30.0);
        let mut sim = FoldSimulator::new(params);
        for _ in 0..12 {
            sim.increment();
        }
        assert_eq!(compute(&params, 12).unwrap(), sim.compute().unwrap());
    }

    #[test]
    fn test_progress_echoes_typed_base_thickness() {
        let mut sim = FoldSimulator::from_inputs(
            &NumericInput::Text("1e-1".into()),
            &NumericInput::Number(21.0),
        );
        sim.increment();
        assert_eq!(sim.parameters().base_thickness_mm, 0.1);
        assert_eq!(
            sim.view(Locale::Ja).comparison,
            "🤏 最初の紙の厚さ 1e-1mm から 1回折って、0.00m になりました。"
        );
    }

    #[test]
    fn test_numeric_input_echoes_shortest_form() {
        let mut sim = folded(1);
        sim.set_parameter_inputs(
            &NumericInput::Text("0.10".into()),
            &NumericInput::Number(21.0),
        );
        assert_eq!(sim.base_label(), "0.10");
        sim.set_parameter_inputs(
            &NumericInput::Number(0.1),
            &NumericInput::Text("21".into()),
        );
        assert_eq!(sim.base_label(), "0.1");
        sim.set_parameters(0.25, 21.0);
        assert_eq!(sim.base_label(), "0.25");
    }
}
