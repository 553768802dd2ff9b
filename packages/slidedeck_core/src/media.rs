use crate::decode::object;
use crate::error::SchemaResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Where an image or video comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MediaSource {
    /// Image from the host application's asset catalog
    Asset { name: String },
    /// Image file shipped alongside the host application
    Bundle { file: String },
    /// Image fetched from an absolute URL
    Remote { url: Url },
    /// Video from the host application's asset catalog
    VideoAsset { name: String },
    /// Video file shipped alongside the host application
    VideoBundle { file: String },
    /// Video fetched from an absolute URL
    VideoRemote { url: Url },
}

impl MediaSource {
    /// Strict decode from the JSON object form.
    pub fn from_value(value: &Value) -> SchemaResult<Self> {
        object(value, "media source")?;
        Ok(MediaSource::deserialize(value)?)
    }

    /// The wire value of the `kind` discriminator.
    pub fn kind_name(&self) -> &'static str {
        match self {
            MediaSource::Asset { .. } => "asset",
            MediaSource::Bundle { .. } => "bundle",
            MediaSource::Remote { .. } => "remote",
            MediaSource::VideoAsset { .. } => "videoAsset",
            MediaSource::VideoBundle { .. } => "videoBundle",
            MediaSource::VideoRemote { .. } => "videoRemote",
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(
            self,
            MediaSource::VideoAsset { .. } | MediaSource::VideoBundle { .. } | MediaSource::VideoRemote { .. }
        )
    }

    pub fn remote_url(&self) -> Option<&Url> {
        match self {
            MediaSource::Remote { url } | MediaSource::VideoRemote { url } => Some(url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_every_kind() {
        let cases = [
            (json!({ "kind": "asset", "name": "logo" }), "asset"),
            (json!({ "kind": "bundle", "file": "intro.png" }), "bundle"),
            (json!({ "kind": "remote", "url": "https://example.com/a.png" }), "remote"),
            (json!({ "kind": "videoAsset", "name": "demo" }), "videoAsset"),
            (json!({ "kind": "videoBundle", "file": "demo.mov" }), "videoBundle"),
            (json!({ "kind": "videoRemote", "url": "https://example.com/v.mp4" }), "videoRemote"),
        ];
        for (value, kind) in cases {
            let source = MediaSource::from_value(&value).unwrap();
            assert_eq!(source.kind_name(), kind);
            assert_eq!(serde_json::to_value(&source).unwrap(), value);
        }
    }

    fn decode_err(value: Value) -> String {
        MediaSource::from_value(&value).unwrap_err().to_string()
    }

    #[test]
    fn unknown_kind_fails() {
        let msg = decode_err(json!({ "kind": "gif", "name": "x" }));
        assert!(msg.contains("unknown variant `gif`"), "unexpected error: {}", msg);
    }

    #[test]
    fn missing_kind_fails() {
        let msg = decode_err(json!({ "name": "x" }));
        assert!(msg.contains("missing field `kind`"), "unexpected error: {}", msg);
    }

    #[test]
    fn payload_field_must_match_kind() {
        let msg = decode_err(json!({ "kind": "asset", "file": "x.png" }));
        assert!(msg.contains("missing field `name`"), "unexpected error: {}", msg);
    }

    #[test]
    fn remote_requires_absolute_url() {
        let msg = decode_err(json!({ "kind": "remote", "url": "images/a.png" }));
        assert!(msg.contains("relative URL without a base"), "unexpected error: {}", msg);
    }

    #[test]
    fn non_object_source_fails() {
        assert!(matches!(
            MediaSource::from_value(&json!("logo.png")),
            Err(crate::SchemaError::NotAnObject { what: "media source" })
        ));
    }

    #[test]
    fn video_kinds_are_flagged() {
        let video = MediaSource::VideoBundle { file: "a.mov".into() };
        let image = MediaSource::Bundle { file: "a.png".into() };
        assert!(video.is_video());
        assert!(!image.is_video());
    }
}
