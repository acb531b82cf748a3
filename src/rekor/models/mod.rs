pub mod dsse;
pub use self::dsse::Dsse;
pub mod error;
pub use self::error::Error;
pub mod hashedrekord;
pub use self::hashedrekord::HashedRekord;
pub mod log_entry;
pub use self::log_entry::LogEntry;
pub mod search_index;
pub use self::search_index::SearchIndex;
