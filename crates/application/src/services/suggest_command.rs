//! Suggestion pipeline: validate → command → build → limit

use std::fmt;

use async_trait::async_trait;
use domain::{GeocoderError, Query, SuggestQuery, Suggestion, SuggestionBuilder};
use serde_json::Value;
use tracing::{debug, instrument};

use super::command::{Command, PipelineContext, apply_limit, validate_query};
use super::provider::SuggestCapability;

type BoxedSuggestionCommand<Q> = Box<dyn Command<Q, Output = SuggestionBuilder>>;

/// Pipeline for suggestion-returning operations
pub struct SuggestionCommand<Q: Query> {
    command: BoxedSuggestionCommand<Q>,
    context: PipelineContext,
}

impl<Q: Query> SuggestionCommand<Q> {
    pub fn new(
        command: impl Command<Q, Output = SuggestionBuilder> + 'static,
        context: PipelineContext,
    ) -> Self {
        Self {
            command: Box::new(command),
            context,
        }
    }

    #[instrument(skip_all, fields(query = std::any::type_name::<Q>()))]
    pub async fn execute(&self, raw: &Value) -> Result<Vec<Suggestion>, GeocoderError> {
        let query: Q = validate_query(raw, self.context.logger.as_ref())?;

        let suggestions = self
            .command
            .execute(&query)
            .await?
            .into_iter()
            .map(SuggestionBuilder::build)
            .collect::<Result<Vec<_>, _>>()?;

        let limited = apply_limit(suggestions, query.limit());
        debug!(results = limited.len(), "Suggestion pipeline finished");
        Ok(limited)
    }
}

impl<Q: Query> fmt::Debug for SuggestionCommand<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestionCommand")
            .field("query", &std::any::type_name::<Q>())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SuggestCapability for SuggestionCommand<SuggestQuery> {
    async fn suggest(&self, query: &Value) -> Result<Vec<Suggestion>, GeocoderError> {
        self.execute(query).await
    }
}
