use crate::{llm::LanguageModel, types::SongCandidate};

use super::{GENERATION_ERROR, PipelineError};

/// Asks the language model for a fixed number of song candidates matching
/// the user's input.
///
/// The reply must be a raw JSON array; a single attempt is made and a parse
/// failure is returned as [`PipelineError::MalformedModelOutput`] rather
/// than retried.
pub async fn generate(
    llm: &dyn LanguageModel,
    input: &str,
) -> Result<Vec<SongCandidate>, PipelineError> {
    let prompt = format!(
        "Based on the user's input: {input}\n\
         Generate a list of 3 disco songs. Return only a JSON array of objects, \
         each with 'song_name', 'artist' and 'mood_match' fields, where \
         'mood_match' briefly explains how the song fits the mood. Do not \
         include any additional text, explanations, or formatting such as \
         code blocks."
    );

    let raw = llm
        .complete(&prompt)
        .await
        .map_err(PipelineError::ModelRequest)?;
    tracing::debug!(%raw, "raw song list from language model");

    match serde_json::from_str::<Vec<SongCandidate>>(&raw) {
        Ok(candidates) => Ok(candidates),
        Err(e) => {
            tracing::error!(error = %e, %raw, "failed to parse model reply as a song list");
            Err(PipelineError::MalformedModelOutput(GENERATION_ERROR))
        }
    }
}
