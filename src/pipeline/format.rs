use crate::{
    llm::LanguageModel,
    types::{EnrichedSong, RecommendationResponse},
};

use super::{GENERATION_ERROR, PipelineError};

/// Asks the language model to wrap the enriched song list in a friendly
/// response object, adding descriptive fields from its own knowledge.
///
/// Same single-attempt, strict-parse policy as the generator. The song list
/// may be empty; it is passed through to the model unchanged.
pub async fn format_response(
    llm: &dyn LanguageModel,
    input: &str,
    songs: &[EnrichedSong],
) -> Result<RecommendationResponse, PipelineError> {
    let songs_json = serde_json::to_string(songs)?;

    let prompt = format!(
        "You are a helpful disco music assistant.\n\
         Given the user input and the list of songs with links, create a \
         friendly response.\n\
         User input: {input}\n\
         Songs: {songs_json}\n\
         For each song keep its fields and add 'album', 'language' and \
         'release_year' fields from your own knowledge.\n\
         Format your response as a JSON object with 'greeting' and \
         'recommendations' fields. Return only the JSON object without any \
         additional text, explanations, or formatting such as code blocks."
    );

    let raw = llm
        .complete(&prompt)
        .await
        .map_err(PipelineError::ModelRequest)?;
    tracing::debug!(%raw, "raw formatted response from language model");

    match serde_json::from_str::<RecommendationResponse>(&raw) {
        Ok(response) => Ok(response),
        Err(e) => {
            tracing::error!(error = %e, %raw, "failed to parse model reply as a response object");
            Err(PipelineError::MalformedModelOutput(GENERATION_ERROR))
        }
    }
}
