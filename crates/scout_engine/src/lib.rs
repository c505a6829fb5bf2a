//! Recipe Scout engine: HTTP gateway, job status polling and history storage.
mod auth;
mod client;
mod endpoints;
mod engine;
mod error;
mod history;
mod persist;
mod poller;
mod settings;

pub use client::ApiClient;
pub use engine::{EngineCommand, EngineError, EngineEvent, EngineHandle};
pub use error::ApiError;
pub use history::{
    HistoryCache, HistoryStore, HistoryStoreError, JsonFileStore, MemoryStore, HISTORY_FILENAME,
};
pub use persist::{ensure_dir, remove_if_exists, write_atomic, PersistError};
pub use poller::{CompletionCallback, FailureCallback, StatusPoller, StatusSource};
pub use settings::{ApiSettings, PollSettings, DEFAULT_POLL_INTERVAL};
