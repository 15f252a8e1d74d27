//! Line diffs between two tree generations

use crate::lst::CompilationUnit;
use crate::printer::render;
use similar::{ChangeTag, TextDiff};
use std::sync::Arc;

/// Printed text of two generations of the same file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDiff {
    path: String,
    before: String,
    after: String,
}

impl TreeDiff {
    /// Diff between two trees of the file at `path`
    pub fn between(
        path: impl Into<String>,
        before: &Arc<CompilationUnit>,
        after: &Arc<CompilationUnit>,
    ) -> Self {
        Self::from_text(path, render(before), render(after))
    }

    pub fn from_text(path: impl Into<String>, before: String, after: String) -> Self {
        Self {
            path: path.into(),
            before,
            after,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.before == self.after
    }

    /// Number of inserted and deleted lines
    pub fn stats(&self) -> (usize, usize) {
        let diff = TextDiff::from_lines(&self.before, &self.after);
        diff.iter_all_changes()
            .fold((0, 0), |(ins, del), change| match change.tag() {
                ChangeTag::Insert => (ins + 1, del),
                ChangeTag::Delete => (ins, del + 1),
                ChangeTag::Equal => (ins, del),
            })
    }

    /// Unified diff with three lines of context; empty when nothing changed
    pub fn unified(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let diff = TextDiff::from_lines(&self.before, &self.after);
        let mut output = format!("--- {}\n+++ {} (modified)\n", self.path, self.path);

        for group in diff.grouped_ops(3) {
            let (Some(first), Some(last)) = (group.first(), group.last()) else {
                continue;
            };
            let old_start = first.old_range().start;
            let new_start = first.new_range().start;
            let old_len = last.old_range().end - old_start;
            let new_len = last.new_range().end - new_start;
            output.push_str(&format!(
                "@@ -{},{} +{},{} @@\n",
                old_start + 1,
                old_len,
                new_start + 1,
                new_len
            ));

            for op in &group {
                for change in diff.iter_changes(op) {
                    let sign = match change.tag() {
                        ChangeTag::Delete => '-',
                        ChangeTag::Insert => '+',
                        ChangeTag::Equal => ' ',
                    };
                    output.push(sign);
                    output.push_str(change.value());
                    if change.missing_newline() {
                        output.push_str("\n\\ No newline at end of file\n");
                    }
                }
            }
        }

        output
    }
}
