//! Built-in question catalog so the app is usable without external config.

use crate::domain::{Direction, Question, QuestionKind, DEFAULT_OPTION_COUNT};

/// Default catalog: mostly lightness ordering, one free arrangement, one target pick.
pub fn seed_questions() -> Vec<Question> {
  let order = |id, prompt: &str, direction, option_count| Question {
    id,
    prompt: prompt.into(),
    kind: QuestionKind::OrderByLightness { direction, option_count },
  };

  vec![
    order(1, "Arrange the shades by how light they are.", Direction::LightToDark, DEFAULT_OPTION_COUNT),
    order(2, "Arrange the shades by how dark they are.", Direction::DarkToLight, DEFAULT_OPTION_COUNT),
    order(3, "Put these shades in order.", Direction::LightToDark, 5),
    order(4, "Put these shades in order.", Direction::DarkToLight, 5),
    order(5, "Sort the full range of shades.", Direction::LightToDark, 6),
    order(6, "Sort the full range of shades.", Direction::DarkToLight, 6),
    Question {
      id: 7,
      prompt: "Arrange these words however feels natural to you.".into(),
      kind: QuestionKind::FreeReorder {
        options: vec!["calm".into(), "warm".into(), "bold".into(), "soft".into()],
      },
    },
    Question {
      id: 8,
      prompt: "Drag the color that feels warmest into the box.".into(),
      kind: QuestionKind::SelectTarget {
        options: vec!["red".into(), "blue".into(), "green".into(), "yellow".into()],
      },
    },
  ]
}
