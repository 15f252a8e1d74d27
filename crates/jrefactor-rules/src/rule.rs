//! The rule abstraction

use jrefactor_core::lst::CompilationUnit;
use jrefactor_core::{Result, ScopedEdit};

/// A refactoring rule
///
/// Rules inspect a tree and describe the changes they want as scoped edits
/// anchored on identities of that tree. Building the new tree is the
/// mutation engine's job.
pub trait Rule: Send + Sync {
    /// Stable identifier, e.g. `java/add-field`
    fn id(&self) -> &str;

    fn description(&self) -> &str;

    /// Edits this rule wants applied to `unit`, in application order
    ///
    /// An empty list means the rule has nothing to do; applying a rule to
    /// its own output should produce no edits.
    fn scan(&self, unit: &CompilationUnit) -> Result<Vec<ScopedEdit>>;
}
