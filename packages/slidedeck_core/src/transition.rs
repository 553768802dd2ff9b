use crate::decode::object;
use crate::error::SchemaResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Deck-wide slide change animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transition {
    /// Type of transition animation
    #[serde(rename = "type")]
    pub kind: TransitionKind,
    /// Duration of the transition in seconds
    #[serde(serialize_with = "finite_duration")]
    pub duration: f64,
}

/// JSON has no NaN or infinity; encode those as 0, matching `animation_for`.
fn finite_duration<S: Serializer>(duration: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(if duration.is_finite() { *duration } else { 0.0 })
}

/// Available transition types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    None,
    Slide,
    Fade,
    Scale,
    Push,
}

impl Transition {
    pub fn from_value(value: &Value) -> SchemaResult<Self> {
        object(value, "transition")?;
        Ok(Transition::deserialize(value)?)
    }
}

/// Visual behavior a renderer applies when swapping slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionEffect {
    /// Instant swap
    Identity,
    /// New slide enters from the trailing edge, old one leaves to the leading edge
    SlideInRightOutLeft,
    Fade,
    Scale,
    /// Like `SlideInRightOutLeft`, combined with a fade
    PushWithFade,
}

/// Timing of a slide change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "curve", rename_all = "kebab-case")]
pub enum Animation {
    /// No animation
    Instant,
    EaseInOut {
        /// Seconds
        duration: f64,
    },
}

impl Animation {
    pub fn duration(&self) -> f64 {
        match self {
            Animation::Instant => 0.0,
            Animation::EaseInOut { duration } => *duration,
        }
    }
}

/// Everything a renderer needs to animate an index change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct TransitionDescriptor {
    pub effect: TransitionEffect,
    pub animation: Animation,
}

pub fn transition_for(transition: Option<&Transition>) -> TransitionEffect {
    match transition.map(|t| t.kind) {
        None | Some(TransitionKind::None) => TransitionEffect::Identity,
        Some(TransitionKind::Slide) => TransitionEffect::SlideInRightOutLeft,
        Some(TransitionKind::Fade) => TransitionEffect::Fade,
        Some(TransitionKind::Scale) => TransitionEffect::Scale,
        Some(TransitionKind::Push) => TransitionEffect::PushWithFade,
    }
}

/// Negative or non-finite durations are clamped to zero.
pub fn animation_for(transition: Option<&Transition>) -> Animation {
    match transition {
        None => Animation::Instant,
        Some(t) => {
            let duration = if t.duration.is_finite() { t.duration.max(0.0) } else { 0.0 };
            Animation::EaseInOut { duration }
        }
    }
}

/// Computed fresh for every slide index change; there is no cached state.
pub fn describe_transition(transition: Option<&Transition>) -> TransitionDescriptor {
    TransitionDescriptor {
        effect: transition_for(transition),
        animation: animation_for(transition),
    }
}
