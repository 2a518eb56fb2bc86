pub mod protocol;
pub mod types;

pub use protocol::{AgentReply, AgentRequest, PopupPayload};
pub use types::{
    AppEvent, CacheEntry, LookupResult, QuizSettings, Selection, SelectionRect, VocabEntry,
};
