use crate::decode::{self, object, Object};
use crate::error::{SchemaError, SchemaResult};
use crate::media::MediaSource;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

/// Deepest allowed nesting of `columns` blocks inside one another.
pub const MAX_COLUMN_DEPTH: usize = 16;

/// A content block within a slide
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    /// Heading with an optional subtitle line
    Title {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
    },
    /// Plain paragraph
    Words { text: String },
    /// Bulleted list
    Bullets {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<BulletStyle>,
        items: Vec<String>,
    },
    /// Still image
    Media { source: MediaSource },
    /// Video player
    Video {
        source: MediaSource,
        autoplay: bool,
        #[serde(rename = "loop")]
        looping: bool,
    },
    /// Tappable link
    Link { text: String, url: Url },
    /// Side-by-side columns, each holding its own blocks
    Columns { columns: Vec<Vec<Block>> },
    /// Monospaced code listing
    Code {
        code: String,
        #[serde(
            rename = "enableHighlight",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        enable_highlight: Option<bool>,
    },
}

/// Bullet glyph style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BulletStyle {
    #[default]
    Bullets,
    Dash,
}

impl BulletStyle {
    pub fn glyph(self) -> &'static str {
        match self {
            BulletStyle::Bullets => "•",
            BulletStyle::Dash => "–",
        }
    }
}

const KINDS: &[&str] = &[
    "title", "words", "bullets", "media", "video", "link", "columns", "code",
];

impl Block {
    /// Decode a block from its JSON object form.
    ///
    /// Fails when the `type` discriminator is missing or unknown, or when a
    /// field the kind requires is missing or has the wrong type.
    pub fn from_value(value: &Value) -> SchemaResult<Self> {
        decode_block(value, 0)
    }

    /// The wire value of the `type` discriminator.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Title { .. } => "title",
            Block::Words { .. } => "words",
            Block::Bullets { .. } => "bullets",
            Block::Media { .. } => "media",
            Block::Video { .. } => "video",
            Block::Link { .. } => "link",
            Block::Columns { .. } => "columns",
            Block::Code { .. } => "code",
        }
    }

    /// Bullet style with the default applied, for bullets blocks only.
    pub fn bullet_style(&self) -> Option<BulletStyle> {
        match self {
            Block::Bullets { style, .. } => Some(style.unwrap_or_default()),
            _ => None,
        }
    }

    /// Number of blocks in this subtree, counting this one.
    pub fn count(&self) -> usize {
        match self {
            Block::Columns { columns } => {
                1 + columns.iter().flatten().map(Block::count).sum::<usize>()
            }
            _ => 1,
        }
    }
}

fn decode_block(value: &Value, depth: usize) -> SchemaResult<Block> {
    let map = object(value, "block")?;
    let block = match decode::discriminator(map, "type", KINDS)? {
        "title" => Block::Title {
            text: decode::required_str(map, "title block", "text")?,
            subtitle: decode::optional_str(map, "title block", "subtitle")?,
        },
        "words" => Block::Words {
            text: decode::required_str(map, "words block", "text")?,
        },
        "bullets" => Block::Bullets {
            style: decode_bullet_style(map)?,
            items: decode::required_string_list(map, "bullets block", "items")?,
        },
        "media" => Block::Media {
            source: decode_source(map, "media block")?,
        },
        "video" => Block::Video {
            source: decode_source(map, "video block")?,
            autoplay: decode::required_bool(map, "video block", "autoplay")?,
            looping: decode::required_bool(map, "video block", "loop")?,
        },
        "link" => Block::Link {
            text: decode::required_str(map, "link block", "text")?,
            url: decode::required_url(map, "link block", "url")?,
        },
        "columns" => Block::Columns {
            columns: decode_columns(map, depth)?,
        },
        "code" => Block::Code {
            code: decode::required_str(map, "code block", "code")?,
            enable_highlight: decode::optional_bool(map, "code block", "enableHighlight")?,
        },
        other => {
            return Err(SchemaError::UnknownKind {
                tag: "type",
                value: other.to_string(),
            })
        }
    };
    Ok(block)
}

fn decode_bullet_style(map: &Object) -> SchemaResult<Option<BulletStyle>> {
    decode::field(map, "style")
        .map(|v| {
            BulletStyle::deserialize(v).map_err(|_| SchemaError::InvalidField {
                kind: "bullets block",
                field: "style",
                expected: "\"bullets\" or \"dash\"",
            })
        })
        .transpose()
}

fn decode_source(map: &Object, kind: &'static str) -> SchemaResult<MediaSource> {
    let value = decode::required(map, kind, "source")?;
    MediaSource::from_value(value).map_err(|e| SchemaError::in_field(kind, "source", e))
}

fn decode_columns(map: &Object, depth: usize) -> SchemaResult<Vec<Vec<Block>>> {
    if depth >= MAX_COLUMN_DEPTH {
        return Err(SchemaError::NestingTooDeep {
            limit: MAX_COLUMN_DEPTH,
        });
    }
    let columns = decode::required_array(map, "columns block", "columns")?;
    columns
        .iter()
        .enumerate()
        .map(|(column, blocks)| -> SchemaResult<Vec<Block>> {
            let blocks = blocks.as_array().ok_or(SchemaError::InvalidField {
                kind: "columns block",
                field: "columns",
                expected: "an array of block arrays",
            })?;
            blocks
                .iter()
                .enumerate()
                .map(|(index, block)| {
                    decode_block(block, depth + 1).map_err(|e| match e {
                        // keep a single limit error instead of one wrapper per level
                        SchemaError::NestingTooDeep { .. } => e,
                        e => SchemaError::InColumns {
                            column,
                            index,
                            source: Box::new(e),
                        },
                    })
                })
                .collect()
        })
        .collect()
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Block::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn video_block_decodes() {
        let block = Block::from_value(&json!({
            "type": "video",
            "source": { "kind": "videoRemote", "url": "https://example.com/video.mp4" },
            "autoplay": true,
            "loop": false
        }))
        .unwrap();

        match block {
            Block::Video { source, autoplay, looping } => {
                assert_eq!(
                    source.remote_url().map(Url::as_str),
                    Some("https://example.com/video.mp4")
                );
                assert!(autoplay);
                assert!(!looping);
            }
            other => panic!("expected video block, got {:?}", other),
        }
    }

    #[test]
    fn link_block_decodes() {
        let block = Block::from_value(&json!({
            "type": "link",
            "text": "Visit Site",
            "url": "https://example.com"
        }))
        .unwrap();

        match block {
            Block::Link { text, url } => {
                assert_eq!(text, "Visit Site");
                assert_eq!(url.host_str(), Some("example.com"));
            }
            other => panic!("expected link block, got {:?}", other),
        }
    }

    #[test]
    fn unknown_type_fails() {
        let err = Block::from_value(&json!({ "type": "table", "rows": [] })).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownKind { tag: "type", .. }), "unexpected error: {}", err);
    }

    #[test]
    fn missing_type_fails() {
        let err = Block::from_value(&json!({ "text": "hello" })).unwrap_err();
        assert!(matches!(err, SchemaError::MissingDiscriminator { tag: "type", .. }));
    }

    #[test]
    fn bullets_require_items() {
        let err = Block::from_value(&json!({ "type": "bullets", "style": "dash" })).unwrap_err();
        assert!(matches!(err, SchemaError::MissingField { field: "items", .. }));
    }

    #[test]
    fn bullet_items_must_be_strings() {
        let err = Block::from_value(&json!({ "type": "bullets", "items": ["a", 2] })).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidField { field: "items", .. }));
    }

    #[test]
    fn unknown_bullet_style_fails() {
        let err = Block::from_value(&json!({ "type": "bullets", "style": "stars", "items": [] })).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidField { field: "style", .. }));
    }

    #[test]
    fn bullet_style_defaults_to_bullets() {
        let block = Block::from_value(&json!({ "type": "bullets", "items": ["a"] })).unwrap();
        assert_eq!(block.bullet_style(), Some(BulletStyle::Bullets));
        assert_eq!(BulletStyle::Dash.glyph(), "–");
    }

    #[test]
    fn video_requires_loop_flag() {
        let err = Block::from_value(&json!({
            "type": "video",
            "source": { "kind": "videoAsset", "name": "demo" },
            "autoplay": true
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::MissingField { field: "loop", .. }));
    }

    #[test]
    fn media_source_errors_name_the_field() {
        let err = Block::from_value(&json!({ "type": "media", "source": { "kind": "tape" } })).unwrap_err();
        assert!(matches!(err, SchemaError::InField { field: "source", .. }));
        assert!(matches!(err.root_cause(), SchemaError::Json(_)));
        assert!(err.root_cause().to_string().contains("unknown variant `tape`"));
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let title = Block::Title {
            text: "Hello".into(),
            subtitle: None,
        };
        assert_eq!(serde_json::to_value(&title).unwrap(), json!({ "type": "title", "text": "Hello" }));

        let code = Block::Code {
            code: "fn main() {}".into(),
            enable_highlight: Some(true),
        };
        assert_eq!(
            serde_json::to_value(&code).unwrap(),
            json!({ "type": "code", "code": "fn main() {}", "enableHighlight": true })
        );
    }

    #[test]
    fn nested_columns_decode() {
        let value = json!({
            "type": "columns",
            "columns": [
                [{ "type": "words", "text": "left" }],
                [{ "type": "columns", "columns": [[{ "type": "code", "code": "x" }]] }]
            ]
        });
        let block = Block::from_value(&value).unwrap();
        assert_eq!(block.count(), 4);
        assert_eq!(serde_json::to_value(&block).unwrap(), value);
    }

    #[test]
    fn column_errors_are_wrapped() {
        let err = Block::from_value(&json!({
            "type": "columns",
            "columns": [[], [{ "type": "words" }]]
        }))
        .unwrap_err();
        match &err {
            SchemaError::InColumns { column, index, .. } => {
                assert_eq!((*column, *index), (1, 0));
            }
            other => panic!("expected columns error, got {:?}", other),
        }
        assert!(matches!(err.root_cause(), SchemaError::MissingField { field: "text", .. }));
    }

    #[test]
    fn runaway_nesting_is_rejected() {
        let mut value = json!({ "type": "words", "text": "deep" });
        for _ in 0..=MAX_COLUMN_DEPTH {
            value = json!({ "type": "columns", "columns": [[value]] });
        }
        let err = Block::from_value(&value).unwrap_err();
        assert!(matches!(err, SchemaError::NestingTooDeep { limit: MAX_COLUMN_DEPTH }));
    }

    #[test]
    fn nesting_at_the_limit_is_accepted() {
        let mut value = json!({ "type": "words", "text": "deep" });
        for _ in 0..MAX_COLUMN_DEPTH {
            value = json!({ "type": "columns", "columns": [[value]] });
        }
        assert!(Block::from_value(&value).is_ok());
    }
}
