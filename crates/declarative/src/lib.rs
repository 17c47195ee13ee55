//! # Declarative
//!
//! Desired-state reconciliation for named configuration settings.
//!
//! A table of [`Setting`] descriptors states what each setting should be
//! and how to reach its actual value. The engine either verifies the table
//! (read-only, one report row per setting) or applies it (write each
//! divergent setting, re-read, stop at the first that does not converge).
//!
//! ## Core Concepts
//!
//! - **Value**: a loosely-compared scalar (`Null | Bool | Int | Str`)
//! - **VariableStore**: direct access to the host's named variables
//! - **Setting**: label + expected value + [`Access`] strategy
//! - **verify / apply / preview**: the passes, always in table order
//!
//! ## Example
//!
//! ```
//! use declarative::{apply, preview, verify, MemoryStore, Setting, Silent};
//!
//! let table: Vec<Setting<MemoryStore>> = vec![
//!     Setting::variable("Cache rebuild", "cache_rebuild_files", 1),
//!     Setting::variable("Compress pages", "cache_compression", 0),
//! ];
//!
//! let mut store = MemoryStore::new().with("cache_rebuild_files", "0");
//! assert_eq!(verify(&table, &store, &mut Silent).divergent, 1);
//!
//! let planned = preview(&table, store.clone(), &mut Silent)?;
//! let summary = apply(&table, &mut store, &mut Silent)?;
//! assert_eq!(planned, summary);
//! assert_eq!(summary.updated, 1);
//! assert!(verify(&table, &store, &mut Silent).is_clean());
//! # Ok::<(), declarative::Error>(())
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod setting;
pub mod store;
pub mod value;

pub use context::{ApplyObserver, Recorder, Silent};
pub use engine::{apply, preview, verify, ApplySummary, ReportRow, Verification};
pub use error::{Error, Result};
pub use setting::{Access, Getter, Setter, Setting};
pub use store::{MemoryStore, VariableStore};
pub use value::{Value, DISABLED, ENABLED};
