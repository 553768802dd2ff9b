//! Deck schema and theme resolution for JSON slide decks.
//!
//! ```
//! use slidedeck_core::{resolve_theme, Deck};
//!
//! let deck = Deck::from_json(r#"{"title":"T","slides":[{"blocks":[{"type":"bullets","items":["a","b"]}]}]}"#)?;
//! let slide = &deck.slides[0];
//! let theme = resolve_theme(slide.theme.as_ref(), deck.theme.as_ref());
//! assert_eq!(theme.background.to_hex(), "#1a1a1a");
//! # Ok::<(), slidedeck_core::SchemaError>(())
//! ```

pub mod block;
mod decode;
pub mod deck;
pub mod error;
pub mod media;
pub mod schema;
pub mod slide;
pub mod theme;
pub mod transition;
pub mod validation;

pub use block::{Block, BulletStyle, MAX_COLUMN_DEPTH};
pub use deck::Deck;
pub use error::{SchemaError, SchemaResult};
pub use media::MediaSource;
pub use slide::{generate_slide_id, Slide, SlideAlignment, DEFAULT_SLIDE_PADDING};
pub use theme::{parse_hex, resolve_theme, ResolvedTheme, Rgba, Slot, Theme};
pub use transition::{
    animation_for, describe_transition, transition_for, Animation, Transition, TransitionDescriptor,
    TransitionEffect, TransitionKind,
};
pub use validation::{validate_deck, validate_slide, ValidationError, ValidationResult};
