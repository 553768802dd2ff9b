use crate::block::Block;
use crate::deck::Deck;
use crate::slide::Slide;
use crate::theme::{parse_hex, Theme};
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

/// Validation errors with diagnostic codes
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code")]
pub enum ValidationError {
    #[error("SD1001: Slide id duplicated: {id}")]
    #[serde(rename = "SD1001")]
    DuplicateSlideId { id: String },

    #[error("SD1002: Slide {index} has an empty id")]
    #[serde(rename = "SD1002")]
    EmptySlideId { index: usize },

    #[error("SD2001: Invalid color in {owner} theme field {field}: {value:?}")]
    #[serde(rename = "SD2001")]
    InvalidThemeColor {
        owner: String,
        field: String,
        value: String,
    },

    #[error("SD2002: Transition duration must be a non-negative number, got {duration}")]
    #[serde(rename = "SD2002")]
    InvalidTransitionDuration { duration: f64 },
}

/// Validation context and results
#[derive(Debug, Default, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Valid, and in strict mode also free of warnings.
    pub fn passes(&self, strict: bool) -> bool {
        self.is_valid() && (!strict || self.warnings.is_empty())
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

/// Validate a decoded deck.
///
/// Decoding accepts everything here; these checks catch problems a renderer
/// would silently paper over, such as duplicate ids or colors that fall back.
pub fn validate_deck(deck: &Deck) -> ValidationResult {
    let mut result = ValidationResult::new();

    if deck.slides.is_empty() {
        result.add_warning("Deck has no slides".to_string());
    }

    if let Some(theme) = &deck.theme {
        validate_theme(theme, "deck", &mut result);
    }

    if let Some(transition) = &deck.transitions {
        if !transition.duration.is_finite() || transition.duration < 0.0 {
            result.add_error(ValidationError::InvalidTransitionDuration {
                duration: transition.duration,
            });
        }
    }

    let mut slide_ids = HashSet::new();
    for (index, slide) in deck.slides.iter().enumerate() {
        if !slide_ids.insert(slide.id.as_str()) {
            result.add_error(ValidationError::DuplicateSlideId {
                id: slide.id.clone(),
            });
        }
        validate_slide_internal(index, slide, &mut result);
    }

    tracing::debug!(
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validated deck"
    );
    result
}

/// Validate a single slide
pub fn validate_slide(slide: &Slide) -> ValidationResult {
    let mut result = ValidationResult::new();
    validate_slide_internal(0, slide, &mut result);
    result
}

fn validate_slide_internal(index: usize, slide: &Slide, result: &mut ValidationResult) {
    if slide.id.trim().is_empty() {
        result.add_error(ValidationError::EmptySlideId { index });
    }

    if let Some(theme) = &slide.theme {
        validate_theme(theme, &format!("slide '{}'", slide.id), result);
    }

    if slide.blocks.is_empty() {
        result.add_warning(format!("Slide '{}' has no blocks", slide.id));
    }

    for block in &slide.blocks {
        validate_block(block, &slide.id, result);
    }
}

fn validate_theme(theme: &Theme, owner: &str, result: &mut ValidationResult) {
    for (field, hex) in theme.color_fields() {
        if let Some(hex) = hex {
            if parse_hex(hex).is_none() {
                result.add_error(ValidationError::InvalidThemeColor {
                    owner: owner.to_string(),
                    field: field.to_string(),
                    value: hex.to_string(),
                });
            }
        }
    }
}

fn validate_block(block: &Block, slide_id: &str, result: &mut ValidationResult) {
    match block {
        Block::Bullets { items, .. } if items.is_empty() => {
            result.add_warning(format!("Empty bullets block in slide '{}'", slide_id));
        }
        Block::Media { source } if source.is_video() => {
            result.add_warning(format!(
                "Media block in slide '{}' uses video source '{}'",
                slide_id,
                source.kind_name()
            ));
        }
        Block::Video { source, .. } if !source.is_video() => {
            result.add_warning(format!(
                "Video block in slide '{}' uses image source '{}'",
                slide_id,
                source.kind_name()
            ));
        }
        Block::Columns { columns } => {
            for block in columns.iter().flatten() {
                validate_block(block, slide_id, result);
            }
        }
        _ => {}
    }
}
