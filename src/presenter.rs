use serde::Serialize;

use crate::category::{Category, CategoryInfo};
use crate::collector::InputCollector;
use crate::error::EvaluateError;
use crate::model::Predictor;
use crate::types::PredictionRequest;

/// A category together with its fixed display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionResult {
    pub category: Category,
    pub info: &'static CategoryInfo,
}

impl PredictionResult {
    pub fn new(category: Category) -> Self {
        Self { category, info: category.info() }
    }
}

/// JSON shape returned by the API.
#[derive(Debug, Serialize)]
pub struct PredictionOut {
    pub category: Category,
    pub description: &'static str,
    pub color: &'static str,
    pub health_advice: &'static str,
    pub band: &'static str,
}

impl From<PredictionResult> for PredictionOut {
    fn from(r: PredictionResult) -> Self {
        Self {
            category: r.category,
            description: r.info.description,
            color: r.info.color,
            health_advice: r.info.health_advice,
            band: r.info.band,
        }
    }
}

/// Runs one prediction and resolves its display metadata.
///
/// Model faults come back as `EvaluateError::Failure` with the model's
/// message. A label the table does not know is `UnrecognizedCategory`.
pub fn evaluate(
    request: &PredictionRequest,
    predictor: &dyn Predictor,
) -> Result<PredictionResult, EvaluateError> {
    let record = request.to_record();
    let label = predictor
        .predict(&record)
        .map_err(|e| EvaluateError::Failure(e.to_string()))?;

    let category = label.parse::<Category>().map_err(|e| {
        tracing::error!(
            "model '{}' emitted '{}', which has no display entry; model and category table are out of sync",
            predictor.name(),
            label
        );
        e
    })?;
    tracing::debug!("predicted {} for {:?}", category, request);
    Ok(PredictionResult::new(category))
}

/// What the result area currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Empty,
    Showing(PredictionResult),
    Failed(String),
}

impl DisplayState {
    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            DisplayState::Showing(r) => Some(r),
            _ => None,
        }
    }
}

/// Per-visitor state: the controls and the last displayed outcome.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub inputs: InputCollector,
    display: DisplayState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Evaluates the current inputs; the outcome replaces whatever was shown.
    pub fn submit(&mut self, predictor: &dyn Predictor) -> &DisplayState {
        let request = self.inputs.request();
        self.display = match evaluate(&request, predictor) {
            Ok(result) => DisplayState::Showing(result),
            Err(e) => DisplayState::Failed(e.to_string()),
        };
        &self.display
    }
}
