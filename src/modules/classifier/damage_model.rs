use std::path::Path;

use image::imageops::FilterType;
use tract_onnx::prelude::*;

use crate::core::config::ClassifierConfig;
use crate::core::error::{AppError, Result};
use crate::modules::classifier::DamageLabel;

type OnnxModel = TypedRunnableModel<TypedModel>;

/// Result of classifying a single image
#[derive(Debug, Clone, Copy)]
pub struct Classification {
    pub label: DamageLabel,
    /// Max class probability as a percentage, rounded to one decimal
    pub confidence: f64,
    pub priority_score: i32,
}

impl Classification {
    fn from_prediction(index: usize, probability: f32) -> Self {
        let label = DamageLabel::from_index(index);
        Self {
            label,
            confidence: round_confidence(probability),
            priority_score: label.priority_score(),
        }
    }
}

/// Pretrained ONNX damage classifier.
///
/// A failed model load is remembered rather than panicking: the server still
/// starts so admin routes work, but every classification attempt fails loudly
/// and intake refuses to persist.
pub struct DamageClassifier {
    model: Option<OnnxModel>,
    input_size: u32,
}

impl DamageClassifier {
    pub fn load(config: &ClassifierConfig) -> Self {
        let model = match Self::load_model(&config.model_path) {
            Ok(model) => {
                tracing::info!("Damage model loaded from {}", config.model_path);
                Some(model)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to load damage model from {}: {}. Classification will be rejected.",
                    config.model_path,
                    e
                );
                None
            }
        };

        Self {
            model,
            input_size: config.input_size,
        }
    }

    fn load_model(path: &str) -> TractResult<OnnxModel> {
        tract_onnx::onnx()
            .model_for_path(path)?
            .into_optimized()?
            .into_runnable()
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    /// Classify the image at `path`.
    ///
    /// Resizes to the fixed input shape, scales pixels to [0,1] and feeds the
    /// model a NHWC f32 tensor. Errors are hard: callers must not fall back to
    /// a guessed label.
    pub fn classify_file(&self, path: &Path) -> Result<Classification> {
        let model = self.model.as_ref().ok_or_else(|| {
            AppError::ClassifierUnavailable(
                "Damage model is not loaded; check MODEL_PATH".to_string(),
            )
        })?;

        let img = image::open(path)
            .map_err(|e| AppError::Classification(format!("Failed to decode image: {}", e)))?;

        let size = self.input_size as usize;
        let rgb = img
            .resize_exact(self.input_size, self.input_size, FilterType::Triangle)
            .to_rgb8();
        let pixels: Vec<f32> = rgb.into_raw().iter().map(|&v| v as f32 / 255.0).collect();

        let input = Tensor::from_shape(&[1, size, size, 3], &pixels)
            .map_err(|e| AppError::Classification(format!("Failed to build input tensor: {}", e)))?;

        let outputs = model
            .run(tvec!(input.into()))
            .map_err(|e| AppError::Classification(format!("Inference failed: {}", e)))?;

        let view = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| AppError::Classification(format!("Unexpected output tensor: {}", e)))?;
        let scores: Vec<f32> = view.iter().copied().collect();

        if scores.is_empty() {
            return Err(AppError::Classification(
                "Model produced an empty output".to_string(),
            ));
        }

        let probabilities = to_probabilities(&scores);
        let (index, probability) = argmax(&probabilities);

        Ok(Classification::from_prediction(index, probability))
    }
}

/// Normalize raw model output to probabilities.
///
/// The exported Keras model ends in a softmax layer, so the output usually
/// already sums to one; models exported without it produce logits, which get
/// the softmax applied here.
fn to_probabilities(scores: &[f32]) -> Vec<f32> {
    let sum: f32 = scores.iter().sum();
    let looks_normalized = scores.iter().all(|&s| (0.0..=1.0).contains(&s))
        && (sum - 1.0).abs() < 1e-3;

    if looks_normalized {
        return scores.to_vec();
    }

    // Softmax with max subtracted for numerical stability
    let max = scores.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exp: Vec<f32> = scores.iter().map(|&s| (s - max).exp()).collect();
    let total: f32 = exp.iter().sum();
    exp.iter().map(|&e| e / total).collect()
}

fn argmax(values: &[f32]) -> (usize, f32) {
    values
        .iter()
        .copied()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |best, (i, v)| {
            if v > best.1 {
                (i, v)
            } else {
                best
            }
        })
}

/// Max probability as a percentage rounded to one decimal place
fn round_confidence(probability: f32) -> f64 {
    (probability as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_model_fails_loudly() {
        let classifier = DamageClassifier::load(&ClassifierConfig {
            model_path: "does-not-exist.onnx".to_string(),
            input_size: 150,
        });
        assert!(!classifier.is_available());

        let err = classifier
            .classify_file(Path::new("irrelevant.jpg"))
            .unwrap_err();
        assert!(matches!(err, AppError::ClassifierUnavailable(_)));
    }

    #[test]
    fn test_round_confidence_one_decimal() {
        assert_eq!(round_confidence(0.873_21), 87.3);
        assert_eq!(round_confidence(1.0), 100.0);
        assert_eq!(round_confidence(0.0), 0.0);
        assert_eq!(round_confidence(0.999_99), 100.0);
    }

    #[test]
    fn test_probabilities_pass_through_when_normalized() {
        let scores = vec![0.1, 0.7, 0.2];
        assert_eq!(to_probabilities(&scores), scores);
    }

    #[test]
    fn test_logits_get_softmaxed() {
        let probs = to_probabilities(&[2.0, 5.0, -1.0]);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert_eq!(argmax(&probs).0, 1);
    }

    #[test]
    fn test_argmax_picks_first_of_equal() {
        assert_eq!(argmax(&[0.5, 0.5]).0, 0);
        assert_eq!(argmax(&[0.1, 0.2, 0.9]).0, 2);
    }

    #[test]
    fn test_classification_from_prediction() {
        let c = Classification::from_prediction(1, 0.873);
        assert_eq!(c.label, DamageLabel::RusakBerat);
        assert_eq!(c.confidence, 87.3);
        assert_eq!(c.priority_score, 3);

        let unknown = Classification::from_prediction(5, 0.4);
        assert_eq!(unknown.label, DamageLabel::Unknown);
        assert_eq!(unknown.priority_score, 1);
    }
}
