//! Editor surface for the salary-setting configuration.
//!
//! [`editor::SettingEditor`] owns a [`salary_core::SectionStore`] and drives
//! the synchronous event chain: every mutation re-serializes the touched
//! section, recomputes its derived values, and rewrites the canonical text
//! field before the next event is processed. [`adapter`] projects store
//! state into renderable view models (it is never the system of record),
//! and [`lock`] decides once, at construction, whether the whole surface
//! opens read-only.

pub mod adapter;
pub mod editor;
pub mod lock;
pub mod logging;

pub use adapter::{FieldKey, FieldValue, SectionView, ViewMode};
pub use editor::{EditorInput, SerializedForms, SettingEditor};
pub use lock::LockSignals;
