use crate::decode::{self, object};
use crate::error::{SchemaError, SchemaResult};
use crate::slide::Slide;
use crate::theme::{resolve_theme, ResolvedTheme, Theme};
use crate::transition::{describe_transition, Transition, TransitionDescriptor};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A complete slide deck
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Deck {
    /// The title of the deck
    pub title: String,
    /// Theme applied to slides that have none of their own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// Animation used for every slide change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transitions: Option<Transition>,
    /// Slides in presentation order
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Parse a deck from JSON text.
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Deck::from_value(&value)
    }

    /// Decode a deck. Any failure outside the lenient slide fields fails the
    /// whole deck.
    pub fn from_value(value: &Value) -> SchemaResult<Self> {
        let map = object(value, "deck")?;

        let title = decode::required_str(map, "deck", "title")?;
        let theme = decode::field(map, "theme")
            .map(Theme::from_value)
            .transpose()
            .map_err(|e| SchemaError::in_field("deck", "theme", e))?;
        let transitions = decode::field(map, "transitions")
            .map(Transition::from_value)
            .transpose()
            .map_err(|e| SchemaError::in_field("deck", "transitions", e))?;
        let slides = decode::required_array(map, "deck", "slides")?
            .iter()
            .enumerate()
            .map(|(index, slide)| {
                Slide::from_value(slide).map_err(|e| SchemaError::InSlide {
                    index,
                    source: Box::new(e),
                })
            })
            .collect::<SchemaResult<Vec<_>>>()?;

        tracing::debug!(title = %title, slides = slides.len(), "decoded deck");

        Ok(Deck {
            title,
            theme,
            transitions,
            slides,
        })
    }

    pub fn to_json(&self) -> SchemaResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> SchemaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> SchemaResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Resolved theme for the slide at `index`, or `None` if out of range.
    pub fn resolved_theme(&self, index: usize) -> Option<ResolvedTheme> {
        self.slides
            .get(index)
            .map(|slide| resolve_theme(slide.theme.as_ref(), self.theme.as_ref()))
    }

    /// Transition descriptor used for every slide change in this deck.
    pub fn transition(&self) -> TransitionDescriptor {
        describe_transition(self.transitions.as_ref())
    }

    pub fn slide(&self, id: &str) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }
}

impl<'de> Deserialize<'de> for Deck {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Deck::from_value(&value).map_err(serde::de::Error::custom)
    }
}
