//! Session state for LexQA
//!
//! A session holds the history of completed exchanges, the number of
//! submitted questions, the selected model, and the last rating. There is
//! no global state: every session owns its own `SessionStore`.

pub mod record;
pub mod stats;
pub mod store;

pub use record::{QueryRecord, TIMESTAMP_FORMAT};
pub use stats::SessionStats;
pub use store::{SessionSnapshot, SessionStore, MAX_RATING, MIN_RATING};
