//! Sequential rule application with fail-safe rollback

use crate::rule::Rule;
use anyhow::Context;
use jrefactor_core::lst::CompilationUnit;
use jrefactor_core::{MutationEngine, RefactorError, Result};
use std::sync::Arc;

/// Result of running a rule list over one tree
#[derive(Debug)]
pub struct RunOutcome {
    /// Final tree, or the input tree when a rule failed
    pub unit: Arc<CompilationUnit>,
    /// Rules that produced at least one edit, in run order
    pub applied: Vec<String>,
    pub error: Option<anyhow::Error>,
}

impl RunOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs rules one after another, each scanning the latest tree
#[derive(Debug, Clone, Default)]
pub struct RuleRunner {
    engine: MutationEngine,
}

impl RuleRunner {
    pub fn new(engine: MutationEngine) -> Self {
        Self { engine }
    }

    pub fn run(&self, unit: &Arc<CompilationUnit>, rules: &[Box<dyn Rule>]) -> RunOutcome {
        match self.try_run(unit, rules) {
            Ok((next, applied)) => RunOutcome {
                unit: next,
                applied,
                error: None,
            },
            Err(error) => {
                tracing::warn!("Keeping original tree: {:#}", error);
                RunOutcome {
                    unit: unit.clone(),
                    applied: Vec::new(),
                    error: Some(error),
                }
            }
        }
    }

    fn try_run(
        &self,
        unit: &Arc<CompilationUnit>,
        rules: &[Box<dyn Rule>],
    ) -> anyhow::Result<(Arc<CompilationUnit>, Vec<String>)> {
        let mut current = unit.clone();
        let mut applied = Vec::new();

        for rule in rules {
            let next = self
                .apply_rule(&current, rule.as_ref())
                .with_context(|| format!("rule '{}' failed", rule.id()))?;
            if let Some(next) = next {
                applied.push(rule.id().to_string());
                current = next;
            }
        }
        Ok((current, applied))
    }

    /// New tree after one rule, `None` when the rule had nothing to do
    fn apply_rule(
        &self,
        unit: &Arc<CompilationUnit>,
        rule: &dyn Rule,
    ) -> Result<Option<Arc<CompilationUnit>>> {
        let edits = rule.scan(unit).map_err(|err| rule_failure(rule, err))?;
        if edits.is_empty() {
            return Ok(None);
        }
        tracing::debug!(rule = rule.id(), edits = edits.len(), "Applying rule");
        self.engine
            .apply_all(unit, &edits)
            .map(Some)
            .map_err(|err| rule_failure(rule, err))
    }
}

fn rule_failure(rule: &dyn Rule, err: RefactorError) -> RefactorError {
    RefactorError::rule_error(rule.id(), err.to_string())
}
