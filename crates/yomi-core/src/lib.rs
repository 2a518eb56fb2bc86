pub mod cache;
pub mod error;
pub mod furigana;
pub mod lookup;
pub mod quiz;
pub mod settings;
pub mod store;
pub mod vocab;

pub use cache::LookupCache;
pub use error::{LookupError, StoreError};
pub use furigana::{FuriganaConverter, SentenceAnnotator};
pub use lookup::Aggregator;
pub use quiz::{QuestionKind, QuizEngine, QuizReport};
pub use settings::QuizSettingsStore;
pub use store::{JsonFileStore, MemoryStore, RecordStore};
pub use vocab::VocabStore;
