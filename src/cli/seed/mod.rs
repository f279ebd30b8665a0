//! Seed command - bulk-load known question/answer pairs

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::infrastructure::services::QuestionService;
use crate::infrastructure::storage::StorageType;

#[derive(Debug, Deserialize)]
pub struct SeedEntry {
    pub question: String,
    pub answer: String,
}

pub async fn run(file: &Path) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    if config.storage.backend.parse::<StorageType>()? == StorageType::InMemory {
        warn!("Storage backend is in-memory; seeded questions are lost when this command exits");
    }

    let entries = read_entries(file).await?;
    let state = crate::create_app_state_with_config(&config).await?;

    let added = seed(&state.question_service, &entries).await?;
    info!(added, file = %file.display(), "Seeding complete");

    Ok(())
}

async fn read_entries(file: &Path) -> anyhow::Result<Vec<SeedEntry>> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file.display(), e))?;

    parse_entries(&raw)
}

fn parse_entries(raw: &str) -> anyhow::Result<Vec<SeedEntry>> {
    serde_json::from_str(raw).map_err(|e| {
        anyhow::anyhow!("Seed file must be a JSON array of {{question, answer}}: {}", e)
    })
}

/// Add every entry in order, stopping at the first failure
async fn seed(service: &QuestionService, entries: &[SeedEntry]) -> anyhow::Result<usize> {
    for (index, entry) in entries.iter().enumerate() {
        service
            .add_question(&entry.question, &entry.answer)
            .await
            .map_err(|e| anyhow::anyhow!("Entry {} failed: {}", index, e))?;
    }

    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::question::MockQuestionRepository;

    #[test]
    fn test_parse_entries() {
        let entries =
            parse_entries(r#"[{"question": "What is 2+2?", "answer": "4"}]"#).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].answer, "4");
    }

    #[test]
    fn test_parse_rejects_object() {
        assert!(parse_entries(r#"{"question": "q", "answer": "a"}"#).is_err());
    }

    #[tokio::test]
    async fn test_seed_adds_in_order_and_stops_on_failure() {
        let repo = Arc::new(MockQuestionRepository::new());
        let service =
            QuestionService::new(Arc::new(MockEmbeddingProvider::new("mock", 4)), repo.clone());

        let entries = parse_entries(
            r#"[
                {"question": "first", "answer": "1"},
                {"question": "second", "answer": ""},
                {"question": "third", "answer": "3"}
            ]"#,
        )
        .unwrap();

        let err = seed(&service, &entries).await.unwrap_err();

        assert!(err.to_string().contains("Entry 1"));
        let stored = repo.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].question(), "first");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        assert!(read_entries(Path::new("/nonexistent/seed.json")).await.is_err());
    }
}
