use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::fold::comparison::ComparisonTier;

/// Language of the display text. Number formatting is the same in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{0}' (expected 'ja' or 'en')")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "ja-jp" => Ok(Locale::Ja),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Ja => f.write_str("ja"),
            Locale::En => f.write_str("en"),
        }
    }
}

impl Locale {
    pub fn meters_unit(self) -> &'static str {
        match self {
            Locale::Ja => "メートル",
            Locale::En => "meters",
        }
    }

    pub fn kilometers_unit(self) -> &'static str {
        match self {
            Locale::Ja => "キロメートル",
            Locale::En => "kilometers",
        }
    }

    /// Shown in place of the dimensions and centimetre fields when parameters are invalid.
    pub fn cannot_compute(self) -> &'static str {
        match self {
            Locale::Ja => "計算不能",
            Locale::En => "Cannot compute",
        }
    }

    pub fn invalid_parameters(self) -> &'static str {
        match self {
            Locale::Ja => "初期厚さおよび辺の長さを正の値で入力してください。",
            Locale::En => "Enter positive values for the initial thickness and side length.",
        }
    }

    pub fn start_prompt(self) -> &'static str {
        match self {
            Locale::Ja => "ボタンを押してシミュレーションを開始してください。",
            Locale::En => "Press the button to start the simulation.",
        }
    }

    /// Comparison sentence for `tier`. `base` and `meters` are preformatted and only
    /// appear in the progress message.
    pub fn comparison(self, tier: ComparisonTier, folds: u32, base: &str, meters: &str) -> String {
        match (self, tier) {
            (_, ComparisonTier::NotStarted) => self.start_prompt().to_string(),

            (Locale::Ja, ComparisonTier::Mars) => format!(
                "🪐 {folds}回で到達！ 地球から月までの距離 384,400km を超え、火星へGo!!(平均約2億2500万km)"
            ),
            (Locale::Ja, ComparisonTier::Moon) => {
                format!("🌕 {folds}回で月へ到達！ 約384,400km先に到達しました！")
            }
            (Locale::Ja, ComparisonTier::KarmanLine) => format!(
                "🌌 {folds}回で宇宙の境界！ 宇宙の始まりとされるカーマン・ライン（100km）を突破しました！"
            ),
            (Locale::Ja, ComparisonTier::Everest) => format!(
                "🏔️ {folds}回でエベレスト！ 地球上の最高峰、エベレスト（約8,848m）を超えました！"
            ),
            (Locale::Ja, ComparisonTier::Tower) => format!(
                "🗼 {folds}回でスカイツリー！ 東京スカイツリー（634m）の高さを超えました！"
            ),
            (Locale::Ja, ComparisonTier::Building) => format!(
                "🏢 {folds}回でビル！ 15階建て程度の高層ビル（約50m）に匹敵します。"
            ),
            (Locale::Ja, ComparisonTier::Progress) => format!(
                "🤏 最初の紙の厚さ {base}mm から {folds}回折って、{meters}m になりました。"
            ),

            (Locale::En, ComparisonTier::Mars) => format!(
                "🪐 Reached in {folds} folds! Past the 384,400 km to the Moon and on to Mars (about 225 million km on average)!"
            ),
            (Locale::En, ComparisonTier::Moon) => {
                format!("🌕 The Moon in {folds} folds! You are about 384,400 km away!")
            }
            (Locale::En, ComparisonTier::KarmanLine) => format!(
                "🌌 The edge of space in {folds} folds! You crossed the Kármán line (100 km), where space begins!"
            ),
            (Locale::En, ComparisonTier::Everest) => format!(
                "🏔️ Everest in {folds} folds! Taller than Mount Everest (about 8,848 m), the highest peak on Earth!"
            ),
            (Locale::En, ComparisonTier::Tower) => format!(
                "🗼 Skytree in {folds} folds! Taller than the Tokyo Skytree (634 m)!"
            ),
            (Locale::En, ComparisonTier::Building) => format!(
                "🏢 A high-rise in {folds} folds! As tall as a 15-storey building (about 50 m)."
            ),
            (Locale::En, ComparisonTier::Progress) => format!(
                "🤏 Starting from {base} mm paper, {folds} folds made it {meters} m thick."
            ),
        }
    }
}
