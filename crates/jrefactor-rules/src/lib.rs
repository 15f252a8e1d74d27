//! jrefactor rules
//!
//! Built-in refactoring rules, a runner that applies rule lists to one tree,
//! and a pipeline that does so for many files in parallel.

pub mod builtin;
pub mod pipeline;
pub mod rule;
pub mod rule_list;
pub mod runner;

pub use builtin::{AddField, AddImport, ChangeStringLiteral};
pub use pipeline::{BatchPipeline, BatchReport, FileResult, SourceInput};
pub use rule::Rule;
pub use rule_list::{FieldTemplate, RuleSpec, SpecError, load_rules, rules_from_json};
pub use runner::{RuleRunner, RunOutcome};
