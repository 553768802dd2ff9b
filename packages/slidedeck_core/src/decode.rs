//! Field accessors shared by the hand-written decoders.
//!
//! JSON `null` counts as absent for every optional field, matching what the
//! serde-derived types do with `Option`.

use crate::error::{SchemaError, SchemaResult};
use serde_json::{Map, Value};
use url::Url;

pub(crate) type Object = Map<String, Value>;

pub(crate) fn object<'a>(value: &'a Value, what: &'static str) -> SchemaResult<&'a Object> {
    value.as_object().ok_or(SchemaError::NotAnObject { what })
}

/// Look up a field, treating `null` the same as a missing key.
pub(crate) fn field<'a>(map: &'a Object, name: &str) -> Option<&'a Value> {
    map.get(name).filter(|v| !v.is_null())
}

pub(crate) fn required<'a>(
    map: &'a Object,
    kind: &'static str,
    name: &'static str,
) -> SchemaResult<&'a Value> {
    field(map, name).ok_or(SchemaError::MissingField { kind, field: name })
}

/// Read the discriminator and return its string value.
pub(crate) fn discriminator<'a>(
    map: &'a Object,
    tag: &'static str,
    known: &[&str],
) -> SchemaResult<&'a str> {
    let value = field(map, tag).ok_or_else(|| SchemaError::MissingDiscriminator {
        tag,
        expected: known.join(", "),
    })?;
    let value = value.as_str().ok_or_else(|| SchemaError::UnknownKind {
        tag,
        value: value.to_string(),
    })?;
    if known.contains(&value) {
        Ok(value)
    } else {
        Err(SchemaError::UnknownKind {
            tag,
            value: value.to_string(),
        })
    }
}

pub(crate) fn required_str(map: &Object, kind: &'static str, name: &'static str) -> SchemaResult<String> {
    required(map, kind, name)?
        .as_str()
        .map(str::to_string)
        .ok_or(SchemaError::InvalidField {
            kind,
            field: name,
            expected: "a string",
        })
}

pub(crate) fn optional_str(
    map: &Object,
    kind: &'static str,
    name: &'static str,
) -> SchemaResult<Option<String>> {
    field(map, name)
        .map(|v| {
            v.as_str().map(str::to_string).ok_or(SchemaError::InvalidField {
                kind,
                field: name,
                expected: "a string",
            })
        })
        .transpose()
}

pub(crate) fn required_bool(map: &Object, kind: &'static str, name: &'static str) -> SchemaResult<bool> {
    required(map, kind, name)?
        .as_bool()
        .ok_or(SchemaError::InvalidField {
            kind,
            field: name,
            expected: "a boolean",
        })
}

pub(crate) fn optional_bool(
    map: &Object,
    kind: &'static str,
    name: &'static str,
) -> SchemaResult<Option<bool>> {
    field(map, name)
        .map(|v| {
            v.as_bool().ok_or(SchemaError::InvalidField {
                kind,
                field: name,
                expected: "a boolean",
            })
        })
        .transpose()
}

pub(crate) fn required_array<'a>(
    map: &'a Object,
    kind: &'static str,
    name: &'static str,
) -> SchemaResult<&'a Vec<Value>> {
    required(map, kind, name)?
        .as_array()
        .ok_or(SchemaError::InvalidField {
            kind,
            field: name,
            expected: "an array",
        })
}

pub(crate) fn required_string_list(
    map: &Object,
    kind: &'static str,
    name: &'static str,
) -> SchemaResult<Vec<String>> {
    required_array(map, kind, name)?
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or(SchemaError::InvalidField {
                kind,
                field: name,
                expected: "an array of strings",
            })
        })
        .collect()
}

/// Read a field that must hold an absolute URL.
pub(crate) fn required_url(map: &Object, kind: &'static str, name: &'static str) -> SchemaResult<Url> {
    let raw = required_str(map, kind, name)?;
    Url::parse(&raw).map_err(|e| SchemaError::InvalidUrl {
        kind,
        field: name,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_counts_as_absent() {
        let value = json!({ "subtitle": null });
        let map = object(&value, "title block").unwrap();
        assert_eq!(optional_str(map, "title", "subtitle").unwrap(), None);
        assert!(matches!(
            required_str(map, "title", "subtitle"),
            Err(SchemaError::MissingField { field: "subtitle", .. })
        ));
    }

    #[test]
    fn relative_url_is_rejected() {
        let value = json!({ "url": "/just/a/path" });
        let map = object(&value, "link block").unwrap();
        let err = required_url(map, "link", "url").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidUrl { field: "url", .. }), "unexpected error: {}", err);
    }

    #[test]
    fn non_string_discriminator_is_unknown() {
        let value = json!({ "type": 7 });
        let map = object(&value, "block").unwrap();
        let err = discriminator(map, "type", &["title"]).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownKind { tag: "type", .. }));
    }
}
