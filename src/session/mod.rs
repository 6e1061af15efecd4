pub mod history;
pub mod state;

pub use history::{HistoryEntry, HistoryLog, HISTORY_CAPACITY};
pub use state::SessionState;
