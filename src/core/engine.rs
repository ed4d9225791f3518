use crate::core::pipeline::{CardPipeline, GENERATION_ORDER};
use crate::domain::model::CardDescription;
use crate::domain::ports::{Storage, TextGenerator};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// JSON document written for every saved card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCard {
    pub generated_at: DateTime<Utc>,
    pub model: Option<String>,
    pub card: CardDescription,
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub card: CardDescription,
    /// Every record the run produced, from the concept-only card to `card` itself.
    pub stages: Vec<CardDescription>,
    pub saved_to: Option<String>,
}

pub struct CardEngine<G: TextGenerator, S: Storage> {
    pipeline: CardPipeline<G>,
    storage: Option<S>,
    model: Option<String>,
}

impl<G: TextGenerator, S: Storage> CardEngine<G, S> {
    pub fn new(pipeline: CardPipeline<G>) -> Self {
        Self {
            pipeline,
            storage: None,
            model: None,
        }
    }

    pub fn with_storage(mut self, storage: S, model: Option<String>) -> Self {
        self.storage = Some(storage);
        self.model = model;
        self
    }

    /// Generate one card, starting from `concept` when given, otherwise from a
    /// concept the service makes up. Saves the result when storage is set.
    pub async fn run(&self, concept: Option<&str>) -> Result<GenerationOutcome> {
        let started = Instant::now();
        tracing::info!("Starting card generation...");

        let mut card = match concept {
            Some(concept) => {
                tracing::info!("Using supplied concept");
                CardDescription::create(concept)?
            }
            None => {
                tracing::info!("Generating concept...");
                self.pipeline.generate_concept().await?
            }
        };

        let mut stages = Vec::with_capacity(GENERATION_ORDER.len() + 1);
        stages.push(card.clone());

        for field in GENERATION_ORDER {
            let step_started = Instant::now();
            tracing::info!("Generating {}...", field);

            card = self.pipeline.generate_field(card, field).await?;
            tracing::debug!("{} done in {:?}", field, step_started.elapsed());

            stages.push(card.clone());
        }

        tracing::info!("Card generated in {:?}", started.elapsed());

        let saved_to = match &self.storage {
            Some(storage) => Some(self.save(storage, &card).await?),
            None => None,
        };

        Ok(GenerationOutcome {
            card,
            stages,
            saved_to,
        })
    }

    async fn save(&self, storage: &S, card: &CardDescription) -> Result<String> {
        let generated_at = Utc::now();
        let file_name = format!("card_{}.json", generated_at.format("%Y%m%d_%H%M%S_%6f"));

        let document = SavedCard {
            generated_at,
            model: self.model.clone(),
            card: card.clone(),
        };
        let json = serde_json::to_string_pretty(&document)?;

        tracing::debug!("Writing {} ({} bytes) to storage", file_name, json.len());
        storage.write_file(&file_name, json.as_bytes()).await?;

        let location = storage.location(&file_name);
        tracing::info!("Card saved to: {}", location);
        Ok(location)
    }
}
