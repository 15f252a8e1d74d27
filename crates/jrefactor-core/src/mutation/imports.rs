//! Import bookkeeping: deciding how a type is spelled and where a new
//! import line goes

use super::ImportSpec;
use crate::lst::{ClassDecl, CompilationUnit, Formatting, Import, NodeId, NodeRef, Tree, TypeTree};
use crate::result::Result;
use crate::style::file_line_break;
use std::sync::Arc;

/// How a type should be written at a use site, and the import it needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    pub text: String,
    pub import: Option<String>,
}

/// Decide how `type_name` is spelled inside `unit`
///
/// Types that are primitive, in `java.lang`, in the unit's own package or
/// already imported are written by simple name with no import. A simple name
/// already taken by another import or a top-level class forces the fully
/// qualified spelling, again with no import.
pub fn plan_type_reference(unit: &CompilationUnit, type_name: &str) -> TypeReference {
    let written = type_name.trim();
    let split = written.find(['<', '[']).unwrap_or(written.len());
    let (head, rest) = written.split_at(split);
    let base: String = head.chars().filter(|c| !c.is_whitespace()).collect();
    let base = base.as_str();

    let Some((package, simple)) = base.rsplit_once('.') else {
        return TypeReference {
            text: written.to_string(),
            import: None,
        };
    };
    let short = format!("{simple}{rest}");

    if package == "java.lang" || unit.package_name().as_deref() == Some(package) {
        return TypeReference {
            text: short,
            import: None,
        };
    }
    if unit.imports_type(base) {
        return TypeReference {
            text: short,
            import: None,
        };
    }

    let taken = unit.imports.iter().any(|import| {
        !import.is_static() && import.simple_name().as_deref() == Some(simple)
    }) || unit.classes.iter().any(|class| class.name.name == simple);
    if taken {
        tracing::debug!(type_name = base, "Simple name already in use, keeping qualified name");
        return TypeReference {
            text: written.to_string(),
            import: None,
        };
    }

    TypeReference {
        text: short,
        import: Some(base.to_string()),
    }
}

/// Whether `unit` already has exactly this import
pub fn has_import(unit: &CompilationUnit, request: &ImportSpec) -> bool {
    let wanted = normalized(&request.qualified_name);
    unit.imports
        .iter()
        .any(|import| import.is_static() == request.is_static && import.qualified_name() == wanted)
}

/// Copy of `unit` with the import added, or `None` when it is already
/// present
///
/// Imports are kept ordered by qualified name, static imports after type
/// imports: the new one goes right before the first existing import that
/// sorts after it, or last. Where it lands therefore does not depend on
/// which other imports were added first, even when the file's own imports
/// are not sorted. The first import of a file goes after the package
/// declaration with a blank line, or at the top of a file without one,
/// after any header comment; the first class is then kept a blank line
/// below. Line breaks follow the file's.
pub fn with_import(
    unit: &Arc<CompilationUnit>,
    request: &ImportSpec,
) -> Result<Option<(CompilationUnit, NodeId)>> {
    if has_import(unit, request) {
        tracing::debug!(import = %request.qualified_name, "Import already present");
        return Ok(None);
    }

    let br = file_line_break(NodeRef::CompilationUnit(unit));
    let key = (request.is_static, normalized(&request.qualified_name));
    let index = unit
        .imports
        .iter()
        .position(|import| (import.is_static(), import.qualified_name()) > key)
        .unwrap_or(unit.imports.len());

    let mut next = CompilationUnit::clone(unit);
    let prefix = if let Some(previous) = index.checked_sub(1).map(|i| &unit.imports[i]) {
        format!("{br}{}", previous.fmt.indent().unwrap_or(""))
    } else if let Some(first) = unit.imports.first() {
        let shifted = format!("{br}{}", first.fmt.indent().unwrap_or(""));
        next.imports[0] = Tree::from(first.clone())
            .with_formatting(first.fmt.with_prefix(shifted))
            .into_import()?;
        first.fmt.prefix.clone()
    } else if unit.package.is_some() {
        separate_first_class(&mut next, br, |prefix| prefix.to_string())?;
        format!("{br}{br}")
    } else {
        let mut header = String::new();
        separate_first_class(&mut next, br, |prefix| match split_header(prefix, br) {
            Some((head, tail)) => {
                header = format!("{}{br}{br}", head.trim_end());
                tail.to_string()
            }
            None => prefix.to_string(),
        })?;
        header
    };

    let import = Import {
        id: NodeId::next(),
        fmt: Formatting::synthesized(prefix),
        static_kw: request.is_static.then(Formatting::space),
        name: Arc::new(TypeTree::new(request.qualified_name.trim(), Formatting::space())),
        terminator: Formatting::synthesized(""),
    };
    let id = import.id;
    next.imports.insert(index, Arc::new(import));
    Ok(Some((next, id)))
}

fn normalized(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Rewrite the first class prefix with `rewrite`, then make sure it starts
/// with a blank line
fn separate_first_class(
    unit: &mut CompilationUnit,
    br: &str,
    rewrite: impl FnOnce(&str) -> String,
) -> Result<()> {
    let Some(first) = unit.classes.first().cloned() else {
        return Ok(());
    };
    let rewritten = rewrite(&first.fmt.prefix);
    let leading = rewritten
        .chars()
        .take_while(|c| c.is_whitespace())
        .filter(|&c| c == '\n')
        .count();
    let prefix = format!("{}{}", br.repeat(2usize.saturating_sub(leading)), rewritten);
    if prefix != first.fmt.prefix {
        let class: Arc<ClassDecl> = Tree::from(first.clone())
            .with_formatting(first.fmt.with_prefix(prefix))
            .into_class()?;
        unit.classes[0] = class;
    }
    Ok(())
}

/// Split a file-leading prefix into a header comment block and the part
/// belonging to the class, at the last blank line following a comment
fn split_header<'p>(prefix: &'p str, br: &str) -> Option<(&'p str, &'p str)> {
    let at = prefix.rfind(&format!("{br}{br}"))?;
    let head = &prefix[..at];
    let has_comment = head.contains("//") || head.contains("/*");
    has_comment.then(|| (head, &prefix[at..]))
}
