use crate::block::Block;
use crate::decode::{self, object};
use crate::error::{SchemaError, SchemaResult};
use crate::theme::Theme;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Padding a renderer uses when a slide does not set one.
pub const DEFAULT_SLIDE_PADDING: f64 = 60.0;

/// A single slide in a deck
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Slide {
    /// Identifier for the slide; generated at decode time when absent
    #[schemars(with = "Option<String>")]
    pub id: String,
    /// Alignment of content within the slide
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<SlideAlignment>,
    /// Padding around the slide content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    /// Per-slide theme override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// Content blocks in display order
    #[schemars(with = "Option<Vec<Block>>")]
    pub blocks: Vec<Block>,
}

/// Alignment options for slide content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SlideAlignment {
    #[default]
    Leading,
    Center,
    Trailing,
}

/// A fresh slide identifier.
pub fn generate_slide_id() -> String {
    Uuid::new_v4().to_string()
}

impl Slide {
    /// A slide with a generated id and no layout hints.
    pub fn new(blocks: Vec<Block>) -> Self {
        Slide {
            id: generate_slide_id(),
            alignment: None,
            padding: None,
            theme: None,
            blocks,
        }
    }

    /// Decode a slide.
    ///
    /// Only a non-object input is an error. `alignment`, `padding` and `theme`
    /// become `None` when malformed, and malformed `blocks` become an empty list.
    pub fn from_value(value: &Value) -> SchemaResult<Self> {
        let map = object(value, "slide")?;

        let id = match decode::field(map, "id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                let id = generate_slide_id();
                tracing::debug!(%id, "slide has no id, generated one");
                id
            }
        };

        let alignment = decode::field(map, "alignment").and_then(|v| {
            SlideAlignment::deserialize(v)
                .map_err(|e| tracing::debug!(slide = %id, error = %e, "ignoring malformed alignment"))
                .ok()
        });

        let padding = decode::field(map, "padding").and_then(|v| {
            let padding = v.as_f64();
            if padding.is_none() {
                tracing::debug!(slide = %id, value = %v, "ignoring malformed padding");
            }
            padding
        });

        let theme = decode::field(map, "theme").and_then(|v| {
            Theme::from_value(v)
                .map_err(|e| tracing::debug!(slide = %id, error = %e, "ignoring malformed theme"))
                .ok()
        });

        let blocks = match decode::field(map, "blocks") {
            None => Vec::new(),
            Some(v) => decode_blocks(v).unwrap_or_else(|e| {
                tracing::warn!(slide = %id, error = %e, "dropping slide blocks that failed to decode");
                Vec::new()
            }),
        };

        Ok(Slide {
            id,
            alignment,
            padding,
            theme,
            blocks,
        })
    }

    pub fn effective_alignment(&self) -> SlideAlignment {
        self.alignment.unwrap_or_default()
    }

    pub fn effective_padding(&self) -> f64 {
        self.padding.unwrap_or(DEFAULT_SLIDE_PADDING)
    }

    /// Number of blocks on the slide, including those nested in columns.
    pub fn block_count(&self) -> usize {
        self.blocks.iter().map(Block::count).sum()
    }
}

fn decode_blocks(value: &Value) -> SchemaResult<Vec<Block>> {
    let items = value.as_array().ok_or(SchemaError::InvalidField {
        kind: "slide",
        field: "blocks",
        expected: "an array",
    })?;
    items.iter().map(Block::from_value).collect()
}

impl<'de> Deserialize<'de> for Slide {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Slide::from_value(&value).map_err(serde::de::Error::custom)
    }
}
