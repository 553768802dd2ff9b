use crate::block::Block;
use crate::deck::Deck;
use crate::media::MediaSource;
use crate::slide::Slide;
use crate::theme::Theme;
use crate::transition::Transition;
use schemars::{schema_for, JsonSchema};
use serde_json::Value;
use std::collections::BTreeMap;

/// Generate JSON schemas for every wire type, keyed by type name
pub fn generate_schemas() -> BTreeMap<String, Value> {
    let mut schemas = BTreeMap::new();

    schemas.insert("Deck".to_string(), generate_schema::<Deck>());
    schemas.insert("Slide".to_string(), generate_schema::<Slide>());
    schemas.insert("Block".to_string(), generate_schema::<Block>());
    schemas.insert("MediaSource".to_string(), generate_schema::<MediaSource>());
    schemas.insert("Theme".to_string(), generate_schema::<Theme>());
    schemas.insert("Transition".to_string(), generate_schema::<Transition>());

    schemas
}

/// Generate a single schema for a given type
pub fn generate_schema<T: JsonSchema>() -> Value {
    // RootSchema is plain data; serializing it cannot fail
    serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null)
}

/// Get the JSON schema for Deck
pub fn deck_schema() -> Value {
    generate_schema::<Deck>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_schema_lists_every_kind() {
        let schema = generate_schema::<Block>().to_string();
        for kind in ["title", "words", "bullets", "media", "video", "link", "columns", "code"] {
            assert!(schema.contains(&format!("\"{}\"", kind)), "missing block kind {}", kind);
        }
        assert!(schema.contains("enableHighlight"));
    }

    #[test]
    fn media_schema_uses_kind_discriminator() {
        let schema = generate_schema::<MediaSource>().to_string();
        assert!(schema.contains("\"kind\""));
        assert!(schema.contains("\"videoRemote\""));
    }

    #[test]
    fn slide_id_is_optional_in_schema() {
        let schema = generate_schema::<Slide>();
        let required = schema["required"].as_array().cloned().unwrap_or_default();
        assert!(!required.iter().any(|v| v == "id"));
        assert!(!required.iter().any(|v| v == "blocks"));
    }

    #[test]
    fn all_schemas_are_generated() {
        let schemas = generate_schemas();
        assert_eq!(schemas.len(), 6);
        assert_eq!(deck_schema()["title"], "Deck");
    }
}
