//! Built-in rules

mod add_field;
mod add_import;
mod change_literal;

pub use add_field::{ADD_FIELD, AddField};
pub use add_import::{ADD_IMPORT, AddImport};
pub use change_literal::{CHANGE_STRING_LITERAL, ChangeStringLiteral};
