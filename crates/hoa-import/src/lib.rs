//! Import execution: session lifecycle, persistence contract, and the
//! chunked batch executor with progress reporting.

pub mod executor;
pub mod progress;
pub mod repository;
pub mod session;

pub use executor::{DEFAULT_CHUNK_SIZE, ImportExecutor};
pub use progress::{CancelToken, NoopObserver, ProgressObserver};
pub use repository::{InMemoryRepository, RecordRepository};
pub use session::{ImportSession, SessionState};
