//! Read-only view of the rendered source markup.
//!
//! The review surface renders syntax-highlighted source as HTML: each token
//! is a span carrying its character offsets, and some ancestor carries the
//! identity of the file (and the commit it was rendered at). This crate never
//! touches a concrete DOM type; host adapters and tests implement
//! [`ElementRef`] over whatever element representation they have.

/// Attribute holding a token's start offset (base-10 characters into the file).
pub const ATTR_START: &str = "data-start";

/// Attribute holding a token's end offset (exclusive).
pub const ATTR_END: &str = "data-end";

/// Attribute on a container element naming the rendered file.
pub const ATTR_FILE: &str = "data-file";

/// Attribute on a container element naming the commit the file was rendered at.
pub const ATTR_COMMIT: &str = "data-commit";

/// Class marking an element as a syntax token eligible for hover lookups.
pub const TOKEN_CLASS: &str = "token";

/// A handle to one element of the rendered markup.
///
/// Implementations are cheap to clone (a real adapter wraps a node handle,
/// the test double wraps an `Rc`). All operations are read-only; the markup
/// is owned by the rendering layer.
pub trait ElementRef: Clone {
    /// The value of the named attribute, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// The parent element, or `None` at the top of the tree.
    fn parent(&self) -> Option<Self>;

    /// The rendered text content of the element.
    fn text(&self) -> String;

    /// Whether the element carries the given class.
    fn has_class(&self, class: &str) -> bool;
}
