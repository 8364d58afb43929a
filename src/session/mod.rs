/// The edit session state machine.
pub mod edit_session;
/// Session configuration and JSON edit documents.
pub mod opts;
/// Debounce for caption text edits.
pub mod scheduler;
