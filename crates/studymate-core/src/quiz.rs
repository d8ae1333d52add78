//! Quiz domain model and the quiz workflow state.

use crate::error::{Result, StudyError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One multiple-choice question.
///
/// Field names match the backend wire format: `options` maps option letters
/// to their text, `correct_answer` names the correct letter, and
/// `explanation` is an optional rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub question: String,
    /// Option letter to option text.
    pub options: BTreeMap<String, String>,
    /// The letter of the correct option.
    pub correct_answer: String,
    /// Optional rationale for the correct answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A generated quiz over a selected subset of pages.
///
/// The correct-answer key is trusted and rendered directly; there is no
/// client-side scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// The generated questions, in presentation order.
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Validates a quiz received from the backend.
    ///
    /// A quiz with fewer questions than requested, a question without
    /// options, or a `correct_answer` letter absent from its `options` is
    /// rejected as a malformed response rather than repaired.
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` describing the first violation found.
    pub fn validate(&self, expected_questions: usize) -> Result<()> {
        if self.questions.len() < expected_questions {
            return Err(StudyError::malformed(format!(
                "quiz has {} questions, expected {}",
                self.questions.len(),
                expected_questions
            )));
        }

        for (idx, q) in self.questions.iter().enumerate() {
            if q.options.is_empty() {
                return Err(StudyError::malformed(format!(
                    "question {} has no options",
                    idx + 1
                )));
            }
            if !q.options.contains_key(&q.correct_answer) {
                return Err(StudyError::malformed(format!(
                    "question {} marks '{}' correct but offers no such option",
                    idx + 1,
                    q.correct_answer
                )));
            }
        }

        Ok(())
    }
}

/// Lifecycle of a quiz-generation attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum QuizStatus {
    /// The modal is open and pages can be selected.
    #[default]
    Idle,
    /// A generation request is in flight.
    Generating,
    /// The quiz arrived and is being rendered.
    Ready(Quiz),
    /// The last generation attempt failed; retriable.
    Failed {
        message: String,
    },
}

impl QuizStatus {
    /// Check if a generation request is currently in flight.
    pub fn is_generating(&self) -> bool {
        matches!(self, Self::Generating)
    }
}

/// The quiz workflow: the page selection and the generation status.
///
/// Independent of page navigation - the quiz is a modal overlay with its own
/// lifecycle, opened and closed explicitly by the user. Closing resets the
/// whole workflow, selection included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizWorkflow {
    /// Pages the quiz should cover. Iterates in ascending order.
    pub selected_pages: BTreeSet<u32>,
    /// Current generation status.
    pub status: QuizStatus,
}

impl QuizWorkflow {
    /// Resets the workflow to its initial state: `Idle`, selection cleared.
    pub fn reset(&mut self) {
        self.selected_pages.clear();
        self.status = QuizStatus::Idle;
    }

    /// Toggles a page's membership in the selection.
    pub fn toggle_page(&mut self, page: u32) {
        if !self.selected_pages.remove(&page) {
            self.selected_pages.insert(page);
        }
    }

    /// Check if the selection can currently be edited.
    ///
    /// Selection is frozen while generating and while a quiz is rendered.
    pub fn selection_editable(&self) -> bool {
        matches!(self.status, QuizStatus::Idle | QuizStatus::Failed { .. })
    }

    /// Returns the selected pages in ascending order.
    pub fn sorted_pages(&self) -> Vec<u32> {
        self.selected_pages.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: &str) -> Question {
        let options = [("A", "one"), ("B", "two"), ("C", "three"), ("D", "four")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Question {
            question: "Which one?".to_string(),
            options,
            correct_answer: correct.to_string(),
            explanation: None,
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_quiz() {
        let quiz = Quiz {
            questions: vec![question("A"), question("C")],
        };
        assert!(quiz.validate(2).is_ok());
    }

    #[test]
    fn test_validate_rejects_short_quiz() {
        let quiz = Quiz {
            questions: vec![question("A")],
        };
        assert!(quiz.validate(5).unwrap_err().is_malformed());
    }

    #[test]
    fn test_validate_rejects_missing_answer_key() {
        let quiz = Quiz {
            questions: vec![question("E")],
        };
        assert!(quiz.validate(1).unwrap_err().is_malformed());
    }

    #[test]
    fn test_toggle_is_idempotent_pair() {
        let mut workflow = QuizWorkflow::default();
        workflow.toggle_page(2);
        workflow.toggle_page(2);
        assert!(workflow.selected_pages.is_empty());
    }

    #[test]
    fn test_sorted_pages_ascend() {
        let mut workflow = QuizWorkflow::default();
        for page in [7, 2, 5] {
            workflow.toggle_page(page);
        }
        assert_eq!(workflow.sorted_pages(), vec![2, 5, 7]);
    }
}
