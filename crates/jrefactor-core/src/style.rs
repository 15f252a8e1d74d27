//! Style inference for synthesized nodes
//!
//! Derives the indentation of new material from the text around the
//! insertion point. Inference is purely textual and never fails: when a file
//! gives no usable evidence, the configured defaults apply.

use crate::config::{IndentStyle, StyleConfiguration, style_defaults};
use crate::lst::{Block, Formatting, NodeKind, NodeRef, Piece, line_break_in};
use crate::visitor::NodePath;
use std::sync::Arc;

/// One level of indentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentUnit {
    pub style: IndentStyle,
    pub width: usize,
}

impl IndentUnit {
    pub fn new(style: IndentStyle, width: usize) -> Self {
        Self { style, width }
    }

    pub fn from_config(config: &StyleConfiguration) -> Self {
        match config.indent_style {
            IndentStyle::Tabs => Self::new(IndentStyle::Tabs, 1),
            IndentStyle::Spaces => Self::new(IndentStyle::Spaces, config.indent_size),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.width == 0
    }

    /// Indentation text for `depth` levels
    pub fn repeat(&self, depth: usize) -> String {
        std::iter::repeat_n(self.style.as_char(), self.width * depth).collect()
    }
}

/// Leading run of one repeated indent character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    style: Option<IndentStyle>,
    len: usize,
}

impl Run {
    fn of(indent: &str) -> Self {
        let Some(style) = indent.chars().next().and_then(IndentStyle::from_char) else {
            return Run { style: None, len: 0 };
        };
        let c = style.as_char();
        Run {
            style: Some(style),
            len: indent.chars().take_while(|&x| x == c).count(),
        }
    }
}

/// Indentation inference seeded with fallback defaults
#[derive(Debug, Clone)]
pub struct StyleInference {
    default_unit: IndentUnit,
}

impl Default for StyleInference {
    fn default() -> Self {
        Self::new(style_defaults())
    }
}

impl StyleInference {
    pub fn new(config: &StyleConfiguration) -> Self {
        Self {
            default_unit: IndentUnit::from_config(config),
        }
    }

    pub fn default_unit(&self) -> IndentUnit {
        self.default_unit
    }

    /// Indent unit in effect at the target of `path`
    ///
    /// Walks outward from the target to the first block whose statements
    /// start on their own lines and measures them.
    pub fn infer_indent(&self, path: &NodePath<'_>) -> IndentUnit {
        self.infer_indent_near(path, 0)
    }

    fn infer_indent_near(&self, path: &NodePath<'_>, position: usize) -> IndentUnit {
        let steps = path.steps();
        let mut near = position;

        for j in (0..steps.len()).rev() {
            if let NodeRef::Block(block) = steps[j].node {
                if let Some(unit) = self.measure_block(path, j, block, near) {
                    tracing::debug!(
                        style = ?unit.style,
                        width = unit.width,
                        "Inferred indent unit"
                    );
                    return unit;
                }
            }
            near = steps[j].index;
        }

        tracing::debug!("No indentation evidence, using configured default");
        self.default_unit
    }

    /// Unit implied by the statements of `block` (at step `j` of `path`),
    /// sampled nearest-first around `near`
    fn measure_block(
        &self,
        path: &NodePath<'_>,
        j: usize,
        block: &Arc<Block>,
        near: usize,
    ) -> Option<IndentUnit> {
        let mut samples: Vec<(usize, Run)> = block
            .statements
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.fmt().indent().map(|indent| (i.abs_diff(near), Run::of(indent))))
            .collect();
        if samples.is_empty() {
            return None;
        }
        samples.sort_by_key(|(distance, _)| *distance);

        let nearest = samples[0].1;
        let agree = samples.iter().all(|(_, run)| {
            run.style.is_none() || nearest.style.is_none() || run.style == nearest.style
        });
        let run = if agree {
            let style = samples.iter().find_map(|(_, run)| run.style);
            let len = samples.iter().map(|(_, run)| run.len).min().unwrap_or(0);
            Run { style, len }
        } else {
            nearest
        };

        let Some(style) = run.style.filter(|_| run.len > 0) else {
            return Some(IndentUnit::new(self.default_unit.style, 0));
        };

        let owner = Run::of(&line_indent(path, j));
        let owner_matches = owner.style.is_none() || owner.style == Some(style);
        let width = if owner_matches && owner.len <= run.len {
            run.len - owner.len
        } else {
            let depth = path.truncated(j + 1).block_depth().max(1);
            run.len / depth
        };
        Some(IndentUnit::new(style, width))
    }

    /// Prefix for a statement inserted at `position` of the block targeted by
    /// `path`
    pub fn insertion_prefix(&self, path: &NodePath<'_>, position: usize) -> Formatting {
        let Some(NodeRef::Block(block)) = path.target() else {
            let br = line_break_near(path, None);
            return Formatting::synthesized(format!("{br}{}", self.default_unit.repeat(1)));
        };
        let statements = &block.statements;

        if let Some(next) = statements.get(position) {
            let fmt = next.fmt();
            if fmt.is_whitespace() {
                return Formatting::synthesized(fmt.prefix.clone());
            }
            return match fmt.indent() {
                Some(indent) => {
                    let br = line_break_near(path, Some(fmt));
                    Formatting::synthesized(format!("{br}{indent}"))
                }
                None => Formatting::space(),
            };
        }

        if let Some(last) = statements.last() {
            let fmt = last.fmt();
            return match fmt.indent() {
                Some(indent) => {
                    let br = line_break_near(path, Some(fmt));
                    Formatting::synthesized(format!("{br}{indent}"))
                }
                None if fmt.is_whitespace() => Formatting::synthesized(fmt.prefix.clone()),
                None => Formatting::space(),
            };
        }

        let unit = self.infer_indent_near(path, position);
        let depth = path.block_depth();
        tracing::debug!(depth, width = unit.width, "Indenting into empty block");
        let br = line_break_near(path, Some(&block.end));
        Formatting::synthesized(format!("{br}{}", unit.repeat(depth)))
    }

    /// New closing-brace whitespace for an empty block that is about to
    /// receive its first statement, when `}` shares the line with `{`
    pub fn closing_prefix(&self, path: &NodePath<'_>) -> Option<Formatting> {
        let Some(NodeRef::Block(block)) = path.target() else {
            return None;
        };
        if !block.statements.is_empty() || block.end.has_newline() {
            return None;
        }
        let j = path.len() - 1;
        let br = line_break_near(path, None);
        Some(Formatting::synthesized(format!("{br}{}", line_indent(path, j))))
    }
}

/// Line break of `sample` if it has one, otherwise that of the file
fn line_break_near(path: &NodePath<'_>, sample: Option<&Formatting>) -> &'static str {
    sample
        .and_then(Formatting::line_break)
        .or_else(|| path.root().map(file_line_break))
        .unwrap_or("\n")
}

/// Line break sequence used by the file under `root`: that of its first
/// line break, `\n` for a file on one line
pub fn file_line_break(root: NodeRef<'_>) -> &'static str {
    let mut stack = vec![Piece::Node(root)];
    while let Some(piece) = stack.pop() {
        let text = match piece {
            Piece::Text(text) => text,
            Piece::Node(node) => {
                stack.extend(node.pieces().into_iter().rev());
                node.formatting().prefix.as_str()
            }
        };
        if let Some(br) = line_break_in(text) {
            return br;
        }
    }
    line_break_in(&root.formatting().suffix).unwrap_or("\n")
}

/// Indentation of the line on which the node at step `j` of `path` starts
///
/// Walks up until a node whose prefix breaks the line; a top-level
/// declaration with no line break in its prefix contributes its leading
/// whitespace.
pub fn line_indent(path: &NodePath<'_>, j: usize) -> String {
    let steps = path.steps();
    for i in (0..=j.min(steps.len().saturating_sub(1))).rev() {
        let node = steps[i].node;
        let fmt = node.formatting();
        if let Some(indent) = fmt.indent() {
            return indent.to_string();
        }
        if i == 1 || node.kind() == NodeKind::CompilationUnit {
            return fmt.leading_whitespace().to_string();
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lst::{NodeRef, Statement};
    use crate::parser::parse_compilation_unit;
    use crate::visitor::find_path;

    fn body_path_prefix(source: &str, position: usize) -> (IndentUnit, String) {
        let unit = parse_compilation_unit(source).unwrap();
        let body = &unit.classes[0].body;
        let path = find_path(NodeRef::CompilationUnit(&unit), body.id).unwrap();
        let inference = StyleInference::new(&StyleConfiguration::default());
        (
            inference.infer_indent(&path),
            inference.insertion_prefix(&path, position).prefix,
        )
    }

    #[test]
    fn test_tab_indent() {
        let (unit, prefix) = body_path_prefix("class A {\n\tList l;\n}", 0);
        assert_eq!(unit, IndentUnit::new(IndentStyle::Tabs, 1));
        assert_eq!(prefix, "\n\t");
    }

    #[test]
    fn test_odd_space_width() {
        let (unit, prefix) = body_path_prefix("class A {\n           List l;\n}", 0);
        assert_eq!(unit.width, 11);
        assert_eq!(prefix, "\n           ");
    }

    #[test]
    fn test_empty_block_uses_default() {
        let (unit, prefix) = body_path_prefix("class A {\n}", 0);
        assert_eq!(unit, IndentUnit::new(IndentStyle::Spaces, 4));
        assert_eq!(prefix, "\n    ");
    }

    #[test]
    fn test_column_zero_members_give_zero_width() {
        let (unit, prefix) = body_path_prefix("class A {\nint a;\n}", 1);
        assert!(unit.is_zero());
        assert_eq!(prefix, "\n");
    }

    #[test]
    fn test_nearest_sample_wins_on_mixed_characters() {
        let (unit, _) = body_path_prefix("class A {\n\tint a;\n  int b;\n  int c;\n}", 2);
        assert_eq!(unit.style, IndentStyle::Tabs);

        let source = "class A {\n\tint a;\n  int b;\n  int c;\n}";
        let parsed = parse_compilation_unit(source).unwrap();
        let body = &parsed.classes[0].body;
        let path = find_path(NodeRef::CompilationUnit(&parsed), body.id).unwrap();
        let near_end = StyleInference::default().infer_indent_near(&path, 2);
        assert_eq!(near_end, IndentUnit::new(IndentStyle::Spaces, 2));
    }

    #[test]
    fn test_comment_prefix_is_not_duplicated() {
        let (_, prefix) = body_path_prefix("class A {\n    // the list\n    List l;\n}", 0);
        assert_eq!(prefix, "\n    ");
    }

    #[test]
    fn test_nested_empty_block_is_depth_times_unit() {
        let source = "class A {\n  void m() {}\n}";
        let unit = parse_compilation_unit(source).unwrap();
        let method = unit.classes[0].methods().next().unwrap();
        let block = method.body_block().unwrap();
        let path = find_path(NodeRef::CompilationUnit(&unit), block.id).unwrap();
        let inference = StyleInference::default();

        assert_eq!(inference.insertion_prefix(&path, 0).prefix, "\n    ");
        assert_eq!(inference.closing_prefix(&path).unwrap().prefix, "\n  ");
    }

    #[test]
    fn test_crlf_files_get_crlf_prefixes() {
        let (_, prefix) = body_path_prefix("class A {\r\n    int x;\r\n}\r\n", 1);
        assert_eq!(prefix, "\r\n    ");

        let (_, prefix) = body_path_prefix("class A {}\r\n", 0);
        assert_eq!(prefix, "\r\n    ");

        let unit = parse_compilation_unit("class A {\r\n  void m() {}\r\n}").unwrap();
        let block = unit.classes[0].methods().next().unwrap().body_block().unwrap();
        let path = find_path(NodeRef::CompilationUnit(&unit), block.id).unwrap();
        let closing = StyleInference::default().closing_prefix(&path).unwrap();
        assert_eq!(closing.prefix, "\r\n  ");
    }

    #[test]
    fn test_file_line_break_defaults_to_lf() {
        let unit = parse_compilation_unit("class A { int x; }").unwrap();
        assert_eq!(file_line_break(NodeRef::CompilationUnit(&unit)), "\n");
    }

    #[test]
    fn test_append_after_last_statement() {
        let source = "class A {\n  void m() {\n      a();\n      b();\n  }\n}";
        let unit = parse_compilation_unit(source).unwrap();
        let statement = unit.first_method_statement().unwrap();
        let path = find_path(NodeRef::CompilationUnit(&unit), statement.id()).unwrap();
        let block_path = path.truncated(path.len() - 1);
        let inference = StyleInference::default();

        assert_eq!(inference.insertion_prefix(&block_path, 2).prefix, "\n      ");
        assert!(matches!(statement, Statement::Expression(_)));
    }
}
