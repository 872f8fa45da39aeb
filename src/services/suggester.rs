use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::SuggestionMode;
use crate::wellness::mood::MoodCategory;
use crate::wellness::suggestions::{pick_general, pick_suggestion, FALLBACK_SUGGESTION};

/// Produces the supportive text shown after a check-in.
///
/// Implementations may be remote or slow; callers go through
/// [`suggest_or_fallback`] so a failure never reaches the user.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Short label stored with each entry.
    fn name(&self) -> &'static str;

    async fn suggest(&self, mood_input: &str, category: MoodCategory) -> anyhow::Result<String>;
}

/// Draws from the pool matching the classified category.
pub struct KeywordSuggester;

#[async_trait]
impl SuggestionSource for KeywordSuggester {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn suggest(&self, _mood_input: &str, category: MoodCategory) -> anyhow::Result<String> {
        let text = pick_suggestion(category, &mut rand::thread_rng());
        Ok(text.to_string())
    }
}

/// Ignores the category and draws from the general list.
pub struct GeneralSuggester;

#[async_trait]
impl SuggestionSource for GeneralSuggester {
    fn name(&self) -> &'static str {
        "general"
    }

    async fn suggest(&self, _mood_input: &str, _category: MoodCategory) -> anyhow::Result<String> {
        let text = pick_general(&mut rand::thread_rng());
        Ok(text.to_string())
    }
}

pub fn from_mode(mode: SuggestionMode) -> Arc<dyn SuggestionSource> {
    match mode {
        SuggestionMode::Category => Arc::new(KeywordSuggester),
        SuggestionMode::General => Arc::new(GeneralSuggester),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub text: String,
    pub source: &'static str,
}

/// Ask the source for a suggestion; on error log a warning and use the fixed
/// fallback text instead.
pub async fn suggest_or_fallback(
    source: &dyn SuggestionSource,
    mood_input: &str,
    category: MoodCategory,
) -> Suggestion {
    match source.suggest(mood_input, category).await {
        Ok(text) => Suggestion {
            text,
            source: source.name(),
        },
        Err(e) => {
            tracing::warn!(
                error = %e,
                source = source.name(),
                "Suggestion source failed, using fallback"
            );
            Suggestion {
                text: FALLBACK_SUGGESTION.to_string(),
                source: "fallback",
            }
        }
    }
}
