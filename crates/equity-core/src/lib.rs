pub mod bilingual;
pub mod editor;
pub mod error;
pub mod format;
pub mod path;
pub mod reconcile;
pub mod sample;
pub mod session;
pub mod settings;
pub mod statement;
pub mod types;
pub mod upload;
pub mod value;

#[cfg(feature = "extract")]
pub mod extract;

pub use editor::{EditedField, EquityEditor, LogSink, PersistenceSink};
pub use error::EquityError;
pub use path::{FieldPath, Year};
pub use types::*;
pub use value::{FieldKind, FieldValue};

/// Standard result type for all equity operations
pub type EquityResult<T> = Result<T, EquityError>;
