//! Chapter quizzes.
//!
//! Each chapter carries one multiple-choice question, offered once the
//! chapter is complete. A correct answer earns the quiz's Bharat Points.
//! Right or wrong, a quiz can only be answered once per session.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chapter::ChapterPhase;
use crate::config::ConfigError;

/// Points a built-in quiz is worth.
pub const QUIZ_POINTS: u64 = 50;

/// One chapter question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Chapter the quiz belongs to.
    pub chapter: u32,
    /// Question text.
    pub question: String,
    /// Answer options, in display order.
    pub options: Vec<String>,
    /// Zero-based index of the correct option.
    pub answer: usize,
    /// Shown after answering.
    pub explanation: String,
    /// Points for a correct answer.
    #[serde(default = "default_points")]
    pub bharat_points: u64,
}

const fn default_points() -> u64 {
    QUIZ_POINTS
}

/// Why a quiz answer was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    /// Quizzes open when the chapter is complete.
    #[error("quizzes open once the chapter is complete (phase is {0:?})")]
    NotComplete(ChapterPhase),

    /// Only the chapter in play can be quizzed.
    #[error("chapter {requested} is not the chapter in play ({current})")]
    WrongChapter {
        /// Chapter the answer was for.
        requested: u32,
        /// Chapter in play.
        current: u32,
    },

    /// No quiz exists for the chapter.
    #[error("chapter {0} has no quiz")]
    NoQuiz(u32),

    /// The quiz was answered before.
    #[error("the chapter {0} quiz has already been answered")]
    AlreadyAnswered(u32),

    /// The choice is not one of the options.
    #[error("option {} does not exist, pick 1 to {options}", .choice.saturating_add(1))]
    InvalidChoice {
        /// Zero-based choice.
        choice: usize,
        /// Number of options.
        options: usize,
    },
}

/// Result of answering a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOutcome {
    /// Chapter quizzed.
    pub chapter: u32,
    /// Whether the choice was right.
    pub correct: bool,
    /// Zero-based index of the correct option.
    pub answer: usize,
    /// Points added to the farm.
    pub points_earned: u64,
    /// Explanation text.
    pub explanation: String,
}

/// The session's quizzes and which chapters have been answered.
#[derive(Debug, Clone, Default)]
pub struct QuizBook {
    quizzes: Vec<Quiz>,
    answered: BTreeSet<u32>,
}

impl QuizBook {
    /// Wrap a quiz list. The first quiz listed for a chapter is the one asked.
    pub const fn new(quizzes: Vec<Quiz>) -> Self {
        Self {
            quizzes,
            answered: BTreeSet::new(),
        }
    }

    /// The built-in quizzes, one per story chapter.
    pub fn builtin() -> Self {
        Self::new(builtin_quizzes())
    }

    /// Load a YAML list of quizzes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or [`ConfigError::Yaml`] if the file
    /// cannot be read or parsed, and [`ConfigError::Invalid`] if a quiz's
    /// answer is not one of its options.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let quizzes: Vec<Quiz> = serde_yml::from_str(&contents)?;
        if let Some(bad) = quizzes.iter().find(|q| q.answer >= q.options.len()) {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "chapter {} quiz answer {} is outside its {} options",
                    bad.chapter,
                    bad.answer,
                    bad.options.len()
                ),
            });
        }
        tracing::info!(path = %path.display(), count = quizzes.len(), "Loaded quizzes");
        Ok(Self::new(quizzes))
    }

    /// The quiz for `chapter`.
    pub fn quiz(&self, chapter: u32) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.chapter == chapter)
    }

    /// Whether the chapter's quiz has been answered.
    pub fn is_answered(&self, chapter: u32) -> bool {
        self.answered.contains(&chapter)
    }

    /// Grade a zero-based `choice` and close the quiz.
    ///
    /// Points are reported, not credited.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::NoQuiz`], [`QuizError::AlreadyAnswered`] or
    /// [`QuizError::InvalidChoice`]. An invalid choice leaves the quiz open.
    pub fn answer(&mut self, chapter: u32, choice: usize) -> Result<QuizOutcome, QuizError> {
        if self.is_answered(chapter) {
            return Err(QuizError::AlreadyAnswered(chapter));
        }
        let quiz = self.quiz(chapter).ok_or(QuizError::NoQuiz(chapter))?;
        if choice >= quiz.options.len() {
            return Err(QuizError::InvalidChoice {
                choice,
                options: quiz.options.len(),
            });
        }
        let correct = choice == quiz.answer;
        let outcome = QuizOutcome {
            chapter,
            correct,
            answer: quiz.answer,
            points_earned: if correct { quiz.bharat_points } else { 0 },
            explanation: quiz.explanation.clone(),
        };
        self.answered.insert(chapter);
        Ok(outcome)
    }
}

fn quiz(chapter: u32, question: &str, options: [&str; 4], answer: usize, explanation: &str) -> Quiz {
    Quiz {
        chapter,
        question: question.to_owned(),
        options: options.iter().map(|s| (*s).to_owned()).collect(),
        answer,
        explanation: explanation.to_owned(),
        bharat_points: QUIZ_POINTS,
    }
}

/// One quiz for each built-in chapter.
pub fn builtin_quizzes() -> Vec<Quiz> {
    vec![
        quiz(
            1,
            "Why is pearl millet ideal for Rajasthan's climate?",
            [
                "It needs lots of water",
                "It's drought-resistant and heat-tolerant",
                "It grows best in cold weather",
                "It requires rich, fertile soil",
            ],
            1,
            "Pearl millet is adapted to hot, dry climates. Deep roots reach \
             moisture and it withstands temperatures up to 42C.",
        ),
        quiz(
            2,
            "What is the main risk during monsoon season for rice farming?",
            ["Drought", "Frost damage", "Waterlogging and flooding", "Excessive heat"],
            2,
            "Heavy monsoon rain can waterlog fields and starve roots of oxygen. \
             Good drainage is essential.",
        ),
        quiz(
            3,
            "What temperature range is ideal for wheat growth?",
            ["30-35C", "15-20C", "5-10C", "25-30C"],
            1,
            "Wheat is a cool-season crop that thrives at 15-20C. Hotter weather \
             cuts yield and grain quality.",
        ),
        quiz(
            4,
            "Why is coffee grown under shade?",
            [
                "To hide it from birds",
                "To protect from excessive sun and maintain quality",
                "To save water",
                "To prevent frost",
            ],
            1,
            "Shade keeps coffee plants cool and produces better beans while \
             reducing water stress.",
        ),
        quiz(
            5,
            "Why do apple trees need winter chill?",
            [
                "For pest control",
                "To break dormancy and ensure good flowering",
                "To save water",
                "They don't need cold",
            ],
            1,
            "Apple trees need 800 to 1200 hours below 7C to break dormancy, \
             or they flower and fruit poorly.",
        ),
    ]
}
