use serde::{Deserialize, Serialize};

use crate::score::ItemValue;

/// Jury marks of the research work presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResearchEvaluationScore {
    /// Whether the team presented its work at all
    pub shown: bool,
    pub topic: u32,
    pub research: u32,
    pub presentation: u32,
    pub poster: u32,
}

impl ResearchEvaluationScore {
    pub fn new(topic: u32, research: u32, presentation: u32, poster: u32) -> Self {
        Self {
            shown: true,
            topic,
            research,
            presentation,
            poster,
        }
    }

    /// Entry for a team which did not show up at its presentation.
    pub fn not_shown() -> Self {
        Self::default()
    }

    /// Sum of the marks, or 0 if the work was not presented whatever the stored marks.
    pub fn evaluate(&self) -> i64 {
        if !self.shown {
            return 0;
        }
        [self.topic, self.research, self.presentation, self.poster]
            .iter()
            .map(|&mark| i64::from(mark))
            .sum()
    }

    pub fn items(&self) -> Vec<(&'static str, ItemValue)> {
        vec![
            ("shown", self.shown.into()),
            ("topic", self.topic.into()),
            ("research", self.research.into()),
            ("presentation", self.presentation.into()),
            ("poster", self.poster.into()),
        ]
    }
}

/// Overall evaluation of the team given by the jury.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JuryEvaluationScore {
    pub evaluation: u32,
}

impl JuryEvaluationScore {
    pub fn new(evaluation: u32) -> Self {
        Self { evaluation }
    }

    pub fn evaluate(&self) -> i64 {
        i64::from(self.evaluation)
    }

    pub fn items(&self) -> Vec<(&'static str, ItemValue)> {
        vec![("evaluation", self.evaluation.into())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_research_sum() {
        assert_eq!(ResearchEvaluationScore::new(15, 17, 12, 18).evaluate(), 62);
    }

    #[test]
    fn test_research_not_shown_ignores_marks() {
        let score = ResearchEvaluationScore {
            shown: false,
            topic: 15,
            research: 17,
            presentation: 12,
            poster: 18,
        };
        assert_eq!(score.evaluate(), 0);
        assert_eq!(ResearchEvaluationScore::not_shown().evaluate(), 0);
    }

    #[test]
    fn test_jury_evaluation() {
        assert_eq!(JuryEvaluationScore::new(16).evaluate(), 16);
    }
}
