//! tally — bitable expense webhook bridge.
//!
//! A small server that accepts webhook-style data pushes from a
//! spreadsheet/bitable platform, normalizes each record, and persists both
//! the raw envelopes and the processed records to flat JSON files. The two
//! layers live in their own crates and are re-exported here so integration
//! harnesses can import them through one door.
//!
//! # Architecture
//!
//! ```text
//! HTTP (tally-server) ──► Validate ──► Convert ──► Process ──► FileStore
//!                                                  (tally-core)
//! ```

pub use tally_core::{
    Action, FileStore, ProcessedRecord, ReceivedEntry, ReceivedHeaders, RecordMetadata,
    StoreError, StoreStats, ValidationReport,
};
pub use tally_server::{router, ApiError, AppState};
