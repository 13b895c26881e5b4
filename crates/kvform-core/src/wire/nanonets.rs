//! Hosted-model prediction responses (`result[].prediction[]`).
//!
//! These responses carry labelled fields directly, so no block resolution is
//! needed: each prediction becomes a row with its `label` as the field name and
//! its `ocr_text` as the value.

use serde::Deserialize;

use crate::error::InputError;
use crate::output::FieldRow;

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    result: Vec<PageResult>,
}

#[derive(Debug, Deserialize)]
struct PageResult {
    prediction: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    #[serde(default)]
    ocr_text: Option<String>,
}

/// Flatten every page's predictions into rows, one per prediction.
///
/// Labels may repeat (one `line_item` per invoice line); every occurrence is kept.
pub fn predictions_to_rows(json: &str) -> Result<Vec<FieldRow>, InputError> {
    let response: PredictionResponse = serde_json::from_str(json)?;

    Ok(response
        .result
        .into_iter()
        .flat_map(|page| page.prediction)
        .map(|prediction| (prediction.label, prediction.ocr_text.unwrap_or_default()))
        .collect())
}
