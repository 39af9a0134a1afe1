//! tally-core — ingest pipeline for the bitable expense bridge.
//!
//! This crate holds everything below the HTTP layer: the canonical record
//! types, the field normalizer, the record processor, the payload validator,
//! the format converter, and the flat-file store.
//!
//! # Architecture
//!
//! ```text
//! Receive ──► Validate ──► Convert ──► Process ──► Store
//!    │                                               │
//!    └──────────────── raw envelope ─────────────────┘
//! ```
//!
//! The validator is advisory: its report is attached to the response, but a
//! failing payload still flows through conversion and processing. The store
//! is the single source of truth; the HTTP layer reads from it, never from
//! the request directly.

pub mod config;
pub mod convert;
pub mod normalize;
pub mod process;
pub mod store;
pub mod types;
pub mod validate;

pub use store::{FileStore, StoreError, StoreStats};
pub use types::{Action, ProcessedRecord, ReceivedEntry, ReceivedHeaders, RecordMetadata};
pub use validate::ValidationReport;
