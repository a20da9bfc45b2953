use crate::{error::ClassifierError, roast_level::RoastLevel};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub label: RoastLevel,
    /// Percentage in [0, 100].
    pub confidence: f32,
    pub probabilities: Vec<f32>,
}

impl PredictionResult {
    pub fn display_label(&self) -> String {
        self.label.display_name()
    }

    pub fn display_confidence(&self) -> String {
        format!("{:.2}%", self.confidence)
    }

    pub fn progress(&self) -> u8 {
        self.confidence.floor().clamp(0.0, 100.0) as u8
    }
}

/// JSON shape returned by the classification API.
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub label: RoastLevel,
    pub display_label: String,
    pub confidence: f32,
    pub display_confidence: String,
    pub progress: u8,
    pub probabilities: Vec<f32>,
}

impl From<&PredictionResult> for PredictionResponse {
    fn from(result: &PredictionResult) -> Self {
        Self {
            label: result.label,
            display_label: result.display_label(),
            confidence: result.confidence,
            display_confidence: result.display_confidence(),
            progress: result.progress(),
            probabilities: result.probabilities.clone(),
        }
    }
}

/// Picks the most probable class. Ties go to the lowest index.
pub fn select_prediction(probabilities: Vec<f32>) -> Result<PredictionResult, ClassifierError> {
    if probabilities.len() != RoastLevel::COUNT {
        return Err(ClassifierError::Inference(format!(
            "expected {} class probabilities, model returned {}",
            RoastLevel::COUNT,
            probabilities.len()
        )));
    }

    if probabilities.iter().any(|p| p.is_nan()) {
        return Err(ClassifierError::Inference(format!(
            "model returned NaN probabilities: {:?}",
            probabilities
        )));
    }

    let (index, prob) = probabilities
        .iter()
        .copied()
        .enumerate()
        .reduce(|accum, row| if row.1 > accum.1 { row } else { accum })
        .ok_or_else(|| ClassifierError::Inference("empty model output".to_string()))?;

    let label = RoastLevel::from_index(index)
        .ok_or_else(|| ClassifierError::Inference(format!("unknown class index {}", index)))?;

    Ok(PredictionResult {
        label,
        confidence: prob * 100.,
        probabilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_roast_scenario() {
        let result = select_prediction(vec![0.91, 0.02, 0.03, 0.04]).unwrap();

        assert_eq!(result.label, RoastLevel::Dark);
        assert_eq!(result.display_label(), "DARK");
        assert_eq!(result.display_confidence(), "91.00%");
        assert_eq!(result.progress(), 91);
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let result = select_prediction(vec![0.1, 0.4, 0.4, 0.1]).unwrap();
        assert_eq!(result.label, RoastLevel::Green);

        let result = select_prediction(vec![0.25, 0.25, 0.25, 0.25]).unwrap();
        assert_eq!(result.label, RoastLevel::Dark);
    }

    #[test]
    fn test_last_class_can_win() {
        let result = select_prediction(vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(result.label, RoastLevel::Medium);
        assert_eq!(result.display_confidence(), "40.00%");
        assert_eq!(result.progress(), 40);
    }

    #[test]
    fn test_confidence_rounding_and_progress_truncation() {
        let result = select_prediction(vec![0.05, 0.87456, 0.03, 0.04544]).unwrap();
        assert_eq!(result.display_confidence(), "87.46%");
        assert_eq!(result.progress(), 87);
    }

    #[test]
    fn test_progress_is_clamped() {
        let result = PredictionResult {
            label: RoastLevel::Light,
            confidence: 100.4,
            probabilities: vec![],
        };
        assert_eq!(result.progress(), 100);

        let result = PredictionResult {
            confidence: -3.0,
            ..result
        };
        assert_eq!(result.progress(), 0);
    }

    #[test]
    fn test_confidence_in_range_for_distributions() {
        let outputs = [
            vec![1.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0],
            vec![0.3, 0.3, 0.2, 0.2],
            vec![0.0, 0.0, 0.0, 0.0],
        ];
        for output in outputs {
            let result = select_prediction(output).unwrap();
            assert!((0.0..=100.0).contains(&result.confidence));
            assert!(RoastLevel::ALL.contains(&result.label));
        }
    }

    #[test]
    fn test_wrong_output_length_is_an_inference_error() {
        let err = select_prediction(vec![0.5, 0.5]).unwrap_err();
        assert!(matches!(err, ClassifierError::Inference(_)));

        let err = select_prediction(vec![]).unwrap_err();
        assert!(matches!(err, ClassifierError::Inference(_)));
    }

    #[test]
    fn test_nan_output_is_rejected() {
        let err = select_prediction(vec![f32::NAN, f32::NAN, f32::NAN, f32::NAN]).unwrap_err();
        assert!(matches!(err, ClassifierError::Inference(_)));
    }

    #[test]
    fn test_nan_anywhere_is_rejected() {
        for output in [
            vec![f32::NAN, 0.1, 0.5, 0.2],
            vec![0.1, f32::NAN, 0.5, 0.2],
            vec![0.1, 0.2, 0.5, f32::NAN],
        ] {
            let err = select_prediction(output).unwrap_err();
            assert!(matches!(err, ClassifierError::Inference(_)));
        }
    }

    #[test]
    fn test_response_conversion() {
        let result = select_prediction(vec![0.02, 0.03, 0.9, 0.05]).unwrap();
        let response = PredictionResponse::from(&result);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["label"], "light");
        assert_eq!(json["display_label"], "LIGHT");
        assert_eq!(json["display_confidence"], "90.00%");
        assert_eq!(json["progress"], 90);
    }
}
