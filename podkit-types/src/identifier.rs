//! Identifier derivation.
//!
//! An identifier is `object_type[/parent][/name]`. It is the key entities are
//! registered under and the form in which `parent`/`group` references are
//! stored.

use crate::value::arg_to_string;
use crate::Args;

/// Separator between identifier segments.
pub const IDENTIFIER_SEPARATOR: &str = "/";

/// Derives an identifier from an argument bag.
///
/// Returns `None` when `object_type` is missing or empty. `parent` and `name`
/// are appended only when non-empty.
pub fn identifier_from_args(args: &Args) -> Option<String> {
    let object_type = arg_to_string(args.get("object_type"));
    if object_type.is_empty() {
        return None;
    }

    let mut parts = vec![object_type];

    for key in ["parent", "name"] {
        let part = arg_to_string(args.get(key));
        if !part.is_empty() {
            parts.push(part);
        }
    }

    Some(parts.join(IDENTIFIER_SEPARATOR))
}
