//! Semester grade-point average engine behind a JSON-lines sidecar.
//!
//! The UI shell owns the widgets; this crate owns the course table, the latest
//! calculation outcome and the SGPA rule itself.

pub mod calc;
pub mod config;
pub mod form;
pub mod grades;
pub mod ipc;
pub mod logging;
pub mod numeric;
pub mod table;
