//! Audit logging for DayPlan
//!
//! Plan generation, recorded spending and every redistribution transfer are
//! appended to a line-delimited JSON log (`audit.log`).
//!
//! - `AuditEntry`: one operation with timestamp, entity and before/after state.
//! - `AuditLogger`: appends entries and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
