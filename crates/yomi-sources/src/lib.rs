pub mod dictionary;
pub mod error;
pub mod sentences;
pub mod translate;

pub use dictionary::{DictEntry, DictionarySource, JishoClient, MAX_DEFINITIONS};
pub use error::SourceError;
pub use sentences::{MAX_SENTENCES, SentenceSource, TatoebaClient};
pub use translate::{LibreTranslateClient, TranslationSource};
