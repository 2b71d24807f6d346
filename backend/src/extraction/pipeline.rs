use super::ExtractError;
use crate::state::AppState;
use common::{parse_response, w2_prompt, ExtractedFields, ParseFailure};
use log::{error, info, warn};
use std::path::Path;

/// Result of running one uploaded image through the model.
#[derive(Debug)]
pub enum ExtractionOutcome {
    /// The reply parsed into at least one field.
    Parsed {
        raw: String,
        fields: ExtractedFields,
        saved: bool,
    },
    /// The reply was not a usable JSON object; nothing was stored.
    Unparsed(ParseFailure),
}

/// Sends the image to the model, parses the reply and appends it to the CSV.
///
/// External-service and image errors propagate. A failed CSV write is logged
/// and reported through `saved: false`; the parsed fields are still returned.
pub async fn extract_and_store(
    state: &AppState,
    image_path: &Path,
) -> Result<ExtractionOutcome, ExtractError> {
    let raw = state.extractor.extract(image_path, w2_prompt()).await?;

    let fields = match parse_response(&raw) {
        Ok(fields) if fields.is_empty() => {
            warn!("Model returned an empty object: {}", raw);
            return Ok(ExtractionOutcome::Unparsed(ParseFailure::new(
                raw,
                "model returned no fields",
            )));
        }
        Ok(fields) => fields,
        Err(failure) => {
            warn!("JSON parsing failed ({}): {}", failure.reason, failure.raw);
            return Ok(ExtractionOutcome::Unparsed(failure));
        }
    };

    info!("Extracted {} fields", fields.len());
    let saved = store_fields(state, &fields).await;
    Ok(ExtractionOutcome::Parsed { raw, fields, saved })
}

async fn store_fields(state: &AppState, fields: &ExtractedFields) -> bool {
    let store = state.csv.clone();
    let row = fields.clone();
    match tokio::task::spawn_blocking(move || store.append(&row)).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            error!("Could not save extraction to {}: {}", state.csv.path().display(), e);
            false
        }
        Err(e) => {
            error!("CSV write task failed: {}", e);
            false
        }
    }
}
