//! Road-damage image classifier
//!
//! Wraps the pretrained ONNX model. The model is loaded once at startup and
//! shared read-only across request handlers; inference runs on the blocking
//! thread pool.

mod damage_model;

pub use damage_model::{Classification, DamageClassifier};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Classifier output label, stored verbatim in the reports table.
///
/// The index mapping is fixed by the training data:
/// 0 = Normal, 1 = Rusak Berat, 2 = Rusak Ringan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "damage_label")]
pub enum DamageLabel {
    Normal,
    #[sqlx(rename = "Rusak Berat")]
    #[serde(rename = "Rusak Berat")]
    RusakBerat,
    #[sqlx(rename = "Rusak Ringan")]
    #[serde(rename = "Rusak Ringan")]
    RusakRingan,
    Unknown,
}

impl DamageLabel {
    /// Map a model output index to its label. Unrecognized indices are Unknown.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => DamageLabel::Normal,
            1 => DamageLabel::RusakBerat,
            2 => DamageLabel::RusakRingan,
            _ => DamageLabel::Unknown,
        }
    }

    /// Priority is a pure function of the label: severe damage ranks highest.
    pub fn priority_score(&self) -> i32 {
        match self {
            DamageLabel::RusakBerat => 3,
            DamageLabel::RusakRingan => 2,
            DamageLabel::Normal | DamageLabel::Unknown => 1,
        }
    }
}

impl std::fmt::Display for DamageLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DamageLabel::Normal => write!(f, "Normal"),
            DamageLabel::RusakBerat => write!(f, "Rusak Berat"),
            DamageLabel::RusakRingan => write!(f, "Rusak Ringan"),
            DamageLabel::Unknown => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_index_mapping() {
        assert_eq!(DamageLabel::from_index(0), DamageLabel::Normal);
        assert_eq!(DamageLabel::from_index(1), DamageLabel::RusakBerat);
        assert_eq!(DamageLabel::from_index(2), DamageLabel::RusakRingan);
        assert_eq!(DamageLabel::from_index(3), DamageLabel::Unknown);
        assert_eq!(DamageLabel::from_index(99), DamageLabel::Unknown);
    }

    #[test]
    fn test_priority_is_pure_function_of_label() {
        assert_eq!(DamageLabel::from_index(0).priority_score(), 1);
        assert_eq!(DamageLabel::from_index(1).priority_score(), 3);
        assert_eq!(DamageLabel::from_index(2).priority_score(), 2);
        assert_eq!(DamageLabel::from_index(7).priority_score(), 1);
    }

    #[test]
    fn test_label_display_matches_stored_values() {
        assert_eq!(DamageLabel::RusakBerat.to_string(), "Rusak Berat");
        assert_eq!(DamageLabel::RusakRingan.to_string(), "Rusak Ringan");
        assert_eq!(DamageLabel::Normal.to_string(), "Normal");
    }
}
