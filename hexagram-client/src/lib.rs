//! HEXAGRAM Client - Gateway to the game backend
//!
//! This crate provides:
//! - One async call per REST endpoint ([`ApiClient`])
//! - Session state persisted to a key/value [`Storage`]
//! - Live room updates over server-sent events ([`RoomEvents`])
//! - Environment-dependent backend address ([`ClientConfig`])

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;

pub use api::ApiClient;
pub use config::{ClientConfig, Environment};
pub use error::{ClientError, Result};
pub use events::{RoomEvents, SseDecoder};
pub use session::{Session, SESSION_KEYS};
pub use storage::{FileStorage, MemoryStorage, Storage};
