//! Parallel batch processing
//!
//! Files are independent: each is parsed, run through the rule list and
//! printed on a rayon worker. Trees are never shared between files, and the
//! only process-wide state touched is the read-only style defaults.

use crate::rule::Rule;
use crate::runner::RuleRunner;
use anyhow::Context;
use jrefactor_core::{RefactorError, TreeDiff, parse_compilation_unit, render};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span};

/// One file to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    pub path: PathBuf,
    pub text: String,
}

impl SourceInput {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn read(path: &Path) -> jrefactor_core::Result<Self> {
        let text =
            fs::read_to_string(path).map_err(|e| RefactorError::io_error(path, e))?;
        Ok(Self::new(path, text))
    }
}

/// Outcome for one file
#[derive(Debug)]
pub struct FileResult {
    pub path: PathBuf,
    pub original: String,
    /// Rewritten text, or the original text when processing failed
    pub output: String,
    pub changed: bool,
    pub error: Option<anyhow::Error>,
    /// Unified diff of the change, when there is one
    pub diff: Option<String>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// One result per input, in input order
    pub results: Vec<FileResult>,
    /// Paths given more than once, each listed once
    pub collisions: Vec<PathBuf>,
}

impl BatchReport {
    pub fn changed_count(&self) -> usize {
        self.results.iter().filter(|r| r.changed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }
}

/// Runs a rule list over many files in parallel
pub struct BatchPipeline {
    rules: Vec<Box<dyn Rule>>,
    runner: RuleRunner,
}

impl BatchPipeline {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self::with_runner(rules, RuleRunner::default())
    }

    pub fn with_runner(rules: Vec<Box<dyn Rule>>, runner: RuleRunner) -> Self {
        Self { rules, runner }
    }

    pub fn run(&self, inputs: Vec<SourceInput>) -> BatchReport {
        let collisions = colliding_paths(&inputs);
        for path in &collisions {
            tracing::warn!("Source path given more than once: {}", path.display());
        }

        let mut indexed: Vec<(usize, FileResult)> = inputs
            .into_par_iter()
            .enumerate()
            .map(|(index, input)| (index, self.process(input)))
            .collect();
        indexed.sort_by_key(|(index, _)| *index);

        let report = BatchReport {
            results: indexed.into_iter().map(|(_, result)| result).collect(),
            collisions,
        };
        info!(
            files = report.results.len(),
            changed = report.changed_count(),
            failed = report.failed_count(),
            "Batch complete"
        );
        report
    }

    fn process(&self, input: SourceInput) -> FileResult {
        let span = span!(Level::DEBUG, "process_file", file = %input.path.display());
        let _enter = span.enter();

        let unit = match parse_compilation_unit(&input.text)
            .with_context(|| format!("failed to parse '{}'", input.path.display()))
        {
            Ok(unit) => unit,
            Err(error) => {
                tracing::warn!("{:#}", error);
                return unchanged(input, error);
            }
        };

        let outcome = self.runner.run(&unit, &self.rules);
        if let Some(error) = outcome.error {
            return unchanged(input, error);
        }

        let output = render(&outcome.unit);
        let changed = output != input.text;
        let path = input.path.display().to_string();
        let diff = changed
            .then(|| TreeDiff::from_text(path, input.text.clone(), output.clone()).unified());
        debug!(changed, rules = ?outcome.applied, "File processed");

        FileResult {
            path: input.path,
            original: input.text,
            output,
            changed,
            error: None,
            diff,
        }
    }
}

fn unchanged(input: SourceInput, error: anyhow::Error) -> FileResult {
    FileResult {
        path: input.path,
        output: input.text.clone(),
        original: input.text,
        changed: false,
        error: Some(error),
        diff: None,
    }
}

fn colliding_paths(inputs: &[SourceInput]) -> Vec<PathBuf> {
    let mut counts: HashMap<&Path, usize> = HashMap::new();
    for input in inputs {
        *counts.entry(input.path.as_path()).or_default() += 1;
    }
    let mut collisions: Vec<PathBuf> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(path, _)| path.to_path_buf())
        .collect();
    collisions.sort();
    collisions
}
