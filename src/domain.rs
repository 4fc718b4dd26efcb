//! Domain models: questions and their kinds, color swatches, answers, respondent identity.

use serde::{Deserialize, Serialize};

/// Positive, unique question id. Also defines display and jump order.
pub type QuestionId = u32;

/// Drop zone id used by `SelectTarget` questions.
pub const TARGET_ZONE: &str = "target";

/// Swatch count used when a question does not set one.
pub const DEFAULT_OPTION_COUNT: usize = 4;

fn default_option_count() -> usize { DEFAULT_OPTION_COUNT }

/// Which end of the lightness scale comes first.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
  /// Highest lightness first.
  #[default]
  LightToDark,
  /// Lowest lightness first.
  DarkToLight,
}

impl Direction {
  /// Instruction line shown under the prompt.
  pub fn instruction(&self) -> &'static str {
    match self {
      Direction::LightToDark => "Drag to arrange from lightest to darkest.",
      Direction::DarkToLight => "Drag to arrange from darkest to lightest.",
    }
  }
}

/// HSL triple. `hue` in [0, 360), `saturation` and `lightness` in [0, 100].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Hsl {
  pub hue: u16,
  pub saturation: f32,
  pub lightness: u8,
}

impl Hsl {
  /// CSS functional notation, e.g. `hsl(210, 70.0%, 30%)`.
  pub fn to_css(&self) -> String {
    format!("hsl({}, {:.1}%, {}%)", self.hue, self.saturation, self.lightness)
  }
}

/// One draggable color swatch.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StimulusItem {
  pub id: String,
  pub color: Hsl,
  /// Copy of `color.lightness`, the only ranking key.
  pub lightness: u8,
}

/// What a question asks the respondent to do, with the fields each variant needs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
  /// Sort generated swatches by lightness; scored by exact sequence equality.
  OrderByLightness {
    #[serde(default)] direction: Direction,
    #[serde(default = "default_option_count")] option_count: usize,
  },
  /// Arrange labels freely; never scored.
  FreeReorder {
    options: Vec<String>,
  },
  /// Drop one label onto the target zone.
  SelectTarget {
    options: Vec<String>,
  },
}

impl QuestionKind {
  pub fn tag(&self) -> &'static str {
    match self {
      QuestionKind::OrderByLightness { .. } => "order_by_lightness",
      QuestionKind::FreeReorder { .. } => "free_reorder",
      QuestionKind::SelectTarget { .. } => "select_target",
    }
  }

  /// Label set for the label-based variants, empty for swatch ordering.
  pub fn options(&self) -> &[String] {
    match self {
      QuestionKind::OrderByLightness { .. } => &[],
      QuestionKind::FreeReorder { options } | QuestionKind::SelectTarget { options } => options,
    }
  }
}

/// Catalog entry. Shared read-only across all attempts.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Question {
  pub id: QuestionId,
  pub prompt: String,
  #[serde(flatten)]
  pub kind: QuestionKind,
}

impl Question {
  pub fn instruction(&self) -> Option<&'static str> {
    match &self.kind {
      QuestionKind::OrderByLightness { direction, .. } => Some(direction.instruction()),
      _ => None,
    }
  }
}

/// Result of the last completed drag for one question.
///
/// Serialized untagged so the submission payload carries the plain shapes
/// `{isCorrect, order}`, `{order}` and `{value}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AnswerRecord {
  Ordered {
    #[serde(rename = "isCorrect")]
    is_correct: bool,
    order: Vec<String>,
  },
  Arranged {
    order: Vec<String>,
  },
  Selected {
    value: String,
  },
}

/// Respondent identity captured before an attempt starts.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
  pub name: String,
  pub age: u32,
}
