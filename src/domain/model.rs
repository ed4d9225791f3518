use crate::utils::error::{CardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder shown for any field the pipeline has not filled in yet.
pub const NOT_DECIDED: &str = "(Not decided yet)";

/// Literal the service is asked to answer when a card has no power/toughness.
pub const NOT_APPLICABLE: &str = "(not applicable)";

/// Every attribute of a [`CardDescription`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardField {
    Concept,
    Name,
    ManaCost,
    CardType,
    RulesText,
    PowerToughness,
    FlavorText,
}

impl CardField {
    /// Label used in the text rendering of a card.
    pub fn label(&self) -> &'static str {
        match self {
            CardField::Concept => "CONCEPT",
            CardField::Name => "NAME",
            CardField::ManaCost => "MANA COST",
            CardField::CardType => "CARD TYPE",
            CardField::RulesText => "TEXT",
            CardField::PowerToughness => "POWER AND TOUGHNESS",
            CardField::FlavorText => "FLAVOR TEXT",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardField::Concept => "concept",
            CardField::Name => "name",
            CardField::ManaCost => "mana_cost",
            CardField::CardType => "card_type",
            CardField::RulesText => "rules_text",
            CardField::PowerToughness => "power_toughness",
            CardField::FlavorText => "flavor_text",
        }
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardField {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "concept" => Ok(CardField::Concept),
            "name" => Ok(CardField::Name),
            "mana_cost" | "manaCost" => Ok(CardField::ManaCost),
            "card_type" | "cardType" => Ok(CardField::CardType),
            "rules_text" | "rulesText" | "text" => Ok(CardField::RulesText),
            "power_toughness" | "powerToughness" | "power_and_toughness" => {
                Ok(CardField::PowerToughness)
            }
            "flavor_text" | "flavorText" => Ok(CardField::FlavorText),
            other => Err(CardError::UnknownField {
                field: other.to_string(),
            }),
        }
    }
}

/// The evolving description of a generated card.
///
/// Updates never happen in place: [`CardDescription::with`] and
/// [`CardDescription::with_field`] return a copy with one field replaced, so
/// every stage of a generation run stays available to whoever kept it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDescription {
    concept: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    mana_cost: String,
    #[serde(default)]
    card_type: String,
    #[serde(default)]
    rules_text: String,
    #[serde(default)]
    flavor_text: String,
    #[serde(default)]
    power_toughness: String,
}

impl CardDescription {
    /// Start a card from its concept. Fails on an empty or blank concept.
    pub fn create(concept: impl Into<String>) -> Result<Self> {
        let concept = concept.into();
        ensure_concept(&concept)?;

        Ok(Self {
            concept,
            name: String::new(),
            mana_cost: String::new(),
            card_type: String::new(),
            rules_text: String::new(),
            flavor_text: String::new(),
            power_toughness: String::new(),
        })
    }

    pub fn concept(&self) -> &str {
        &self.concept
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mana_cost(&self) -> &str {
        &self.mana_cost
    }

    pub fn card_type(&self) -> &str {
        &self.card_type
    }

    pub fn rules_text(&self) -> &str {
        &self.rules_text
    }

    pub fn flavor_text(&self) -> &str {
        &self.flavor_text
    }

    pub fn power_toughness(&self) -> &str {
        &self.power_toughness
    }

    pub fn get(&self, field: CardField) -> &str {
        match field {
            CardField::Concept => &self.concept,
            CardField::Name => &self.name,
            CardField::ManaCost => &self.mana_cost,
            CardField::CardType => &self.card_type,
            CardField::RulesText => &self.rules_text,
            CardField::PowerToughness => &self.power_toughness,
            CardField::FlavorText => &self.flavor_text,
        }
    }

    /// Copy of this card with `field` set to `value`.
    ///
    /// The concept may be replaced but never with blank text.
    pub fn with(&self, field: CardField, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let mut updated = self.clone();

        match field {
            CardField::Concept => {
                ensure_concept(&value)?;
                updated.concept = value;
            }
            CardField::Name => updated.name = value,
            CardField::ManaCost => updated.mana_cost = value,
            CardField::CardType => updated.card_type = value,
            CardField::RulesText => updated.rules_text = value,
            CardField::PowerToughness => updated.power_toughness = value,
            CardField::FlavorText => updated.flavor_text = value,
        }

        Ok(updated)
    }

    /// Like [`CardDescription::with`], with the field given by name.
    pub fn with_field(&self, field_name: &str, value: impl Into<String>) -> Result<Self> {
        let field = field_name.parse::<CardField>()?;
        self.with(field, value)
    }

    /// Multi-line text of the card. Unset fields show as `(Not decided yet)`.
    pub fn render(&self, include_concept: bool) -> String {
        let mut out = String::new();

        if include_concept {
            out.push_str(&format!("{}:\n{}\n\n", CardField::Concept.label(), self.concept));
        }

        for field in RENDER_ORDER {
            let value = self.get(field);
            let shown = if value.is_empty() { NOT_DECIDED } else { value };
            out.push_str(&format!("{}: {}\n", field.label(), shown));
        }

        out
    }

    /// True once every generated field holds some text.
    pub fn is_complete(&self) -> bool {
        RENDER_ORDER.iter().all(|field| !self.get(*field).is_empty())
    }
}

impl fmt::Display for CardDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true))
    }
}

const RENDER_ORDER: [CardField; 6] = [
    CardField::Name,
    CardField::ManaCost,
    CardField::CardType,
    CardField::RulesText,
    CardField::FlavorText,
    CardField::PowerToughness,
];

fn ensure_concept(concept: &str) -> Result<()> {
    if concept.trim().is_empty() {
        return Err(CardError::InvalidArgument {
            message: "card concept cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
