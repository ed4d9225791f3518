//! Instruction text sent to the text generation service, one builder per
//! pipeline step. Every builder after the concept embeds the full rendering
//! of the card so far, so each answer can stay consistent with the previous
//! ones.

use crate::domain::model::{CardDescription, NOT_APPLICABLE};

pub fn concept_prompt() -> String {
    "Please come up with a basic concept for a Magic the Gathering card. \
     Keep it high level, no specifics yet: theme, color(s), card type, possible lore, etc."
        .to_string()
}

pub fn name_prompt(card: &CardDescription) -> String {
    format!(
        "Please give me a name for a Magic the Gathering card. {}\n\
         Respond with the name only. No quotation marks needed.",
        current_card(card)
    )
}

pub fn mana_cost_prompt(card: &CardDescription) -> String {
    format!(
        "Please give me a mana cost for a Magic the Gathering card. {}\n\
         Use the usual symbols for the kinds of mana:\n\
         \x20 - W for white\n\
         \x20 - U for blue\n\
         \x20 - B for black\n\
         \x20 - R for red\n\
         \x20 - G for green\n\
         \x20 - a plain number for colorless\n\
         \n\
         Respond with the mana cost only.",
        current_card(card)
    )
}

pub fn card_type_prompt(card: &CardDescription) -> String {
    format!(
        "Please give me the card type(s) for a Magic the Gathering card. {}\n\
         Card types include: artifact, creature, enchantment, instant, land, planeswalker, tribal, sorcery.\n\
         Include super- and subtypes where they fit.\n\
         \n\
         Respond with the card type only.",
        current_card(card)
    )
}

pub fn rules_text_prompt(card: &CardDescription) -> String {
    format!(
        "Please write the rules text (not the flavor text) for a Magic the Gathering card. {}\n\
         Respond only with the rules text that goes inside the card's text box.",
        current_card(card)
    )
}

pub fn power_toughness_prompt(card: &CardDescription) -> String {
    format!(
        "Please decide the power and toughness for a Magic the Gathering card, if applicable. {}\n\
         Respond either with the power and toughness in the form \"6 / 5\" or with \"{}\". \
         Leave out the quotes.",
        current_card(card),
        NOT_APPLICABLE
    )
}

pub fn flavor_text_prompt(card: &CardDescription) -> String {
    format!(
        "Please give me the flavor text for a Magic the Gathering card. {}\n\
         Respond with the flavor text only.",
        current_card(card)
    )
}

fn current_card(card: &CardDescription) -> String {
    format!(
        "Here's the current state of the card:\n\n{}\n",
        card.render(true)
    )
}
