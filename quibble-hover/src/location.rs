//! Resolving a rendered token back to its source location.
//!
//! A token span only knows its own character offsets; the file and commit it
//! belongs to are carried by an enclosing container element. [`resolve`]
//! combines the two into a [`SymbolLocation`], or `None` when the element is
//! not a resolvable token. "Not resolvable" is a normal outcome here, not an
//! error: most elements under the pointer are whitespace chunks, diff
//! scaffolding, or tokens the renderer emitted without offsets.

use crate::markup::{ElementRef, ATTR_COMMIT, ATTR_END, ATTR_FILE, ATTR_START};

/// The source position a rendered token stands for.
///
/// Derived on demand from the markup and never cached; `start` and `end` are
/// always present together by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolLocation {
    /// Path of the file within the repository.
    pub file: String,
    /// Commit the file was rendered at.
    pub commit: String,
    /// Character offset of the token's first character.
    pub start: u32,
    /// Character offset one past the token's last character.
    pub end: u32,
}

/// Resolve a token element to its source location.
///
/// Reads the element's own offset attributes, then walks upward (starting at
/// the element itself) to the nearest ancestor carrying both the file and
/// commit attributes. Returns `None` when either offset is missing or not a
/// base-10 integer, or when no such ancestor exists.
///
/// Pure function of the markup subtree; no side effects.
pub fn resolve<E: ElementRef>(element: &E) -> Option<SymbolLocation> {
    let start = parse_offset(element.attribute(ATTR_START))?;
    let end = parse_offset(element.attribute(ATTR_END))?;

    let mut current = Some(element.clone());
    while let Some(el) = current {
        if let (Some(file), Some(commit)) = (el.attribute(ATTR_FILE), el.attribute(ATTR_COMMIT)) {
            return Some(SymbolLocation {
                file,
                commit,
                start,
                end,
            });
        }
        current = el.parent();
    }
    None
}

fn parse_offset(raw: Option<String>) -> Option<u32> {
    raw?.parse().ok()
}
