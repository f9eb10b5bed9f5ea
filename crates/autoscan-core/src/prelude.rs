pub use crate::config::{ConfigValidationError, TargetConfig};
pub use crate::error::{AutoscanError, Result};
pub use crate::library::{Library, LibraryCatalog, LibraryId};
pub use crate::logging::TargetLog;
pub use crate::rewrite::{RewriteRule, Rewriter};
pub use crate::server::ServerTarget;
pub use crate::target::{LibraryClient, Scan, Target, TargetEvent};
pub use crate::version::MinimumVersion;
