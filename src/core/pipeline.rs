use crate::core::prompts;
use crate::domain::model::{CardDescription, CardField};
use crate::domain::ports::TextGenerator;
use crate::utils::error::{CardError, Result};

/// Order in which the fields of a card are generated after its concept.
///
/// Power/toughness comes before flavor text so the flavor text can reflect it.
pub const GENERATION_ORDER: [CardField; 6] = [
    CardField::Name,
    CardField::ManaCost,
    CardField::CardType,
    CardField::RulesText,
    CardField::PowerToughness,
    CardField::FlavorText,
];

pub struct CardPipeline<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> CardPipeline<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Ask the service for a fresh concept and start a card from it.
    pub async fn generate_concept(&self) -> Result<CardDescription> {
        let concept = self.generator.respond_to_prompt(&prompts::concept_prompt()).await?;
        tracing::debug!("Generated concept ({} chars)", concept.len());
        CardDescription::create(concept)
    }

    pub async fn generate_name(&self, card: CardDescription) -> Result<CardDescription> {
        self.fill(card, CardField::Name, prompts::name_prompt).await
    }

    pub async fn generate_mana_cost(&self, card: CardDescription) -> Result<CardDescription> {
        self.fill(card, CardField::ManaCost, prompts::mana_cost_prompt).await
    }

    pub async fn generate_card_type(&self, card: CardDescription) -> Result<CardDescription> {
        self.fill(card, CardField::CardType, prompts::card_type_prompt).await
    }

    pub async fn generate_rules_text(&self, card: CardDescription) -> Result<CardDescription> {
        self.fill(card, CardField::RulesText, prompts::rules_text_prompt).await
    }

    pub async fn generate_power_toughness(
        &self,
        card: CardDescription,
    ) -> Result<CardDescription> {
        self.fill(card, CardField::PowerToughness, prompts::power_toughness_prompt)
            .await
    }

    pub async fn generate_flavor_text(&self, card: CardDescription) -> Result<CardDescription> {
        self.fill(card, CardField::FlavorText, prompts::flavor_text_prompt).await
    }

    /// Run the step that produces `field`.
    ///
    /// The concept is not a step of its own here; asking for it yields
    /// `InvalidArgument`, use [`CardPipeline::generate_concept`] instead.
    pub async fn generate_field(
        &self,
        card: CardDescription,
        field: CardField,
    ) -> Result<CardDescription> {
        match field {
            CardField::Name => self.generate_name(card).await,
            CardField::ManaCost => self.generate_mana_cost(card).await,
            CardField::CardType => self.generate_card_type(card).await,
            CardField::RulesText => self.generate_rules_text(card).await,
            CardField::PowerToughness => self.generate_power_toughness(card).await,
            CardField::FlavorText => self.generate_flavor_text(card).await,
            CardField::Concept => Err(CardError::InvalidArgument {
                message: "the concept is generated by generate_concept, not as a field step"
                    .to_string(),
            }),
        }
    }

    /// Generate a whole card: concept, name, mana cost, card type, rules text,
    /// power/toughness and flavor text, in that order.
    pub async fn generate_card(&self) -> Result<CardDescription> {
        let card = self.generate_concept().await?;
        self.complete(card).await
    }

    /// Generate every field of a card whose concept the caller already has.
    pub async fn generate_card_from(&self, concept: &str) -> Result<CardDescription> {
        let card = CardDescription::create(concept)?;
        self.complete(card).await
    }

    async fn complete(&self, card: CardDescription) -> Result<CardDescription> {
        let card = self.generate_name(card).await?;
        let card = self.generate_mana_cost(card).await?;
        let card = self.generate_card_type(card).await?;
        let card = self.generate_rules_text(card).await?;
        let card = self.generate_power_toughness(card).await?;
        self.generate_flavor_text(card).await
    }

    async fn fill(
        &self,
        card: CardDescription,
        field: CardField,
        build_prompt: fn(&CardDescription) -> String,
    ) -> Result<CardDescription> {
        let prompt = build_prompt(&card);
        tracing::debug!("Requesting {} ({} prompt chars)", field, prompt.len());

        let response = self.generator.respond_to_prompt(&prompt).await?;
        tracing::debug!("Received {}: {:?}", field, response);

        card.with(field, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers each call with `marker-<n>` and remembers every prompt.
    struct MarkerGenerator {
        prompts: Mutex<Vec<String>>,
        fail_on_call: Option<usize>,
    }

    impl MarkerGenerator {
        fn new() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                fail_on_call: None,
            }
        }

        fn failing_on(call: usize) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                fail_on_call: Some(call),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for MarkerGenerator {
        async fn respond_to_prompt(&self, prompt: &str) -> Result<String> {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            let call = prompts.len();

            if self.fail_on_call == Some(call) {
                return Err(CardError::ExternalServiceError {
                    status: Some(503),
                    message: "service unavailable".to_string(),
                });
            }
            Ok(format!("marker-{}", call))
        }
    }

    #[tokio::test]
    async fn test_generate_card_fills_fields_in_order() {
        let generator = MarkerGenerator::new();
        let pipeline = CardPipeline::new(&generator);

        let card = pipeline.generate_card().await.unwrap();

        assert_eq!(card.concept(), "marker-1");
        assert_eq!(card.name(), "marker-2");
        assert_eq!(card.mana_cost(), "marker-3");
        assert_eq!(card.card_type(), "marker-4");
        assert_eq!(card.rules_text(), "marker-5");
        assert_eq!(card.power_toughness(), "marker-6");
        assert_eq!(card.flavor_text(), "marker-7");
        assert!(card.is_complete());

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 7);
        assert!(prompts[0].contains("basic concept"));
        assert!(prompts[1].contains("give me a name"));
        assert!(prompts[5].contains("power and toughness"));
        assert!(prompts[6].contains("flavor text"));
    }

    #[tokio::test]
    async fn test_later_prompts_see_earlier_answers() {
        let generator = MarkerGenerator::new();
        let pipeline = CardPipeline::new(&generator);

        pipeline.generate_card().await.unwrap();

        let prompts = generator.prompts();
        // mana cost prompt carries the decided name
        assert!(prompts[2].contains("NAME: marker-2"));
        // flavor text prompt carries power/toughness and rules text
        assert!(prompts[6].contains("POWER AND TOUGHNESS: marker-6"));
        assert!(prompts[6].contains("\nTEXT: marker-5\n"));
        assert!(prompts[6].contains("FLAVOR TEXT: (Not decided yet)"));
    }

    #[tokio::test]
    async fn test_step_does_not_touch_input_record() {
        let generator = MarkerGenerator::new();
        let pipeline = CardPipeline::new(&generator);
        let start = CardDescription::create("An ancient lighthouse keeper").unwrap();

        let named = pipeline.generate_name(start.clone()).await.unwrap();

        assert_eq!(start.name(), "");
        assert_eq!(named.name(), "marker-1");
        assert_eq!(named.concept(), start.concept());
    }

    #[tokio::test]
    async fn test_generate_card_from_skips_concept_step() {
        let generator = MarkerGenerator::new();
        let pipeline = CardPipeline::new(&generator);

        let card = pipeline
            .generate_card_from("An ancient lighthouse keeper")
            .await
            .unwrap();

        assert_eq!(card.concept(), "An ancient lighthouse keeper");
        assert_eq!(card.name(), "marker-1");
        assert_eq!(card.flavor_text(), "marker-6");
        assert_eq!(generator.prompts().len(), 6);
    }

    #[tokio::test]
    async fn test_service_failure_aborts_pipeline() {
        let generator = MarkerGenerator::failing_on(3);
        let pipeline = CardPipeline::new(&generator);

        let err = pipeline.generate_card().await.unwrap_err();

        assert!(matches!(
            err,
            CardError::ExternalServiceError { status: Some(503), .. }
        ));
        assert_eq!(generator.prompts().len(), 3);
    }

    #[test]
    fn test_blank_concept_response_is_rejected() {
        struct BlankGenerator;

        #[async_trait]
        impl TextGenerator for BlankGenerator {
            async fn respond_to_prompt(&self, _prompt: &str) -> Result<String> {
                Ok("   ".to_string())
            }
        }

        let pipeline = CardPipeline::new(BlankGenerator);
        let result = tokio_test::block_on(pipeline.generate_card());

        assert!(matches!(result, Err(CardError::InvalidArgument { .. })));
    }

    #[test]
    fn test_generate_field_dispatch_and_concept_refusal() {
        let generator = MarkerGenerator::new();
        let pipeline = CardPipeline::new(&generator);
        let card = CardDescription::create("A clockwork owl").unwrap();

        let typed =
            tokio_test::block_on(pipeline.generate_field(card.clone(), CardField::CardType))
                .unwrap();
        assert_eq!(typed.card_type(), "marker-1");
        assert!(generator.prompts()[0].contains("card type(s)"));

        let refused = tokio_test::block_on(pipeline.generate_field(card, CardField::Concept));
        assert!(matches!(refused, Err(CardError::InvalidArgument { .. })));
        assert_eq!(generator.prompts().len(), 1);
    }
}
