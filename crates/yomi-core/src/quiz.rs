use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use yomi_types::VocabEntry;

/// Which facet of the word a question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Reading,
    Meaning,
}

#[derive(Debug, Clone)]
pub struct Question {
    pub entry: VocabEntry,
    pub kind: QuestionKind,
}

/// What the quiz reports back after each action.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizReport {
    NoItems,
    Prompt {
        question: String,
        correct: u32,
        total: u32,
    },
    /// An empty answer; the turn is not consumed.
    NeedAnswer,
    Feedback {
        is_correct: bool,
        expected: String,
        correct: u32,
        total: u32,
    },
}

/// Stateful question/answer loop over a vocabulary snapshot. The snapshot
/// is taken at `start`; later vocabulary edits do not affect a session.
pub struct QuizEngine {
    items: Vec<VocabEntry>,
    current: Option<Question>,
    correct: u32,
    total: u32,
    rng: StdRng,
}

impl QuizEngine {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            items: Vec::new(),
            current: None,
            correct: 0,
            total: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Begins a session over `items` with a reset score. An empty snapshot
    /// reports `NoItems` and poses no question; otherwise the first
    /// question is posed immediately.
    pub fn start(&mut self, items: Vec<VocabEntry>, mixed: bool) -> QuizReport {
        self.items = items;
        self.current = None;
        self.correct = 0;
        self.total = 0;

        if self.items.is_empty() {
            return QuizReport::NoItems;
        }
        self.next(mixed)
    }

    /// Poses a fresh question: uniform random item, and a coin flip for
    /// the question type when `mixed`, otherwise always a reading question.
    pub fn next(&mut self, mixed: bool) -> QuizReport {
        if self.items.is_empty() {
            return QuizReport::NoItems;
        }

        let index = self.rng.gen_range(0..self.items.len());
        let entry = self.items[index].clone();
        let kind = if mixed && self.rng.gen_bool(0.5) {
            QuestionKind::Meaning
        } else {
            QuestionKind::Reading
        };

        let question = match kind {
            QuestionKind::Reading => format!("Reading for: {}", entry.word),
            QuestionKind::Meaning => format!("Meaning for: {}", entry.word),
        };
        self.current = Some(Question { entry, kind });

        QuizReport::Prompt {
            question,
            correct: self.correct,
            total: self.total,
        }
    }

    /// Scores `answer` against the posed question. `None` when no question
    /// is pending. Reading questions need exact equality after
    /// normalization; meaning questions accept a bidirectional substring
    /// match against any definition, English or Chinese.
    pub fn check(&mut self, answer: &str) -> Option<QuizReport> {
        let question = self.current.as_ref()?;

        let answer = normalize(answer);
        if answer.is_empty() {
            return Some(QuizReport::NeedAnswer);
        }

        let is_correct = match question.kind {
            QuestionKind::Reading => answer == normalize(&question.entry.reading),
            QuestionKind::Meaning => question
                .entry
                .english_defs
                .iter()
                .chain(&question.entry.chinese_defs)
                .map(|def| normalize(def))
                .any(|def| !def.is_empty() && (answer.contains(&def) || def.contains(&answer))),
        };

        self.total += 1;
        if is_correct {
            self.correct += 1;
        }

        let expected = match question.kind {
            QuestionKind::Reading => {
                if question.entry.reading.is_empty() {
                    "N/A".to_string()
                } else {
                    question.entry.reading.clone()
                }
            }
            QuestionKind::Meaning => question
                .entry
                .english_defs
                .iter()
                .chain(&question.entry.chinese_defs)
                .cloned()
                .collect::<Vec<_>>()
                .join("; "),
        };

        Some(QuizReport::Feedback {
            is_correct,
            expected,
            correct: self.correct,
            total: self.total,
        })
    }

    pub fn current(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    pub fn score(&self) -> (u32, u32) {
        (self.correct, self.total)
    }

    #[cfg(test)]
    fn pose(&mut self, entry: VocabEntry, kind: QuestionKind) {
        self.current = Some(Question { entry, kind });
    }
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase + trim, nothing more; hiragana and katakana stay distinct.
fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
