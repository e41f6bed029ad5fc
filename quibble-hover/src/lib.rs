//! Quibble Hover - symbol hover tooltips for the code review surface
//!
//! When the pointer interacts with a rendered syntax token, this crate
//! resolves the token back to its source location, asks the review server's
//! language-analysis endpoint for hover information, and floats the answer
//! in an overlay just above the token.
//!
//! ## Quick Start
//!
//! ```no_run
//! use quibble_hover::{HoverClient, HoverConfig};
//!
//! let config = HoverConfig::default().with_origin("http://localhost:8080");
//! let client = HoverClient::new(config.endpoint.origin.clone());
//! ```
//!
//! The webview shell then implements [`ElementRef`] over its DOM nodes and
//! [`SurfaceHost`] over the document, calls [`HoverController::install`],
//! and forwards its pointer, scroll, and resize events to the controller.
//!
//! ## Architecture
//!
//! The crate never touches a concrete DOM: rendered markup is read through
//! the [`ElementRef`] trait and the overlay element is driven through the
//! [`SurfaceHost`] trait, so the same core runs under the production webview
//! shell and under the test doubles.
//!
//! 1. `markup` / `location` - recover `{file, commit, start, end}` from a
//!    token element's attributes and its ancestor chain
//! 2. `client` - one GET per interaction against the hover endpoint
//! 3. `overlay` - the single overlay surface: mount, position, dismiss
//! 4. `controller` - eligibility filtering and the generation counter that
//!    keeps late fetch results from resurrecting a dismissed overlay
//!
//! Everything runs on the UI thread; the only suspension points are the
//! network calls, which are plain `async fn`s awaited by the host.

// Public library modules
pub mod client;
pub mod config;
pub mod controller;
pub mod location;
pub mod markup;
pub mod overlay;

#[cfg(test)]
mod test_helpers;

// Convenience re-exports
pub use client::{
    decode_file_path, encode_file_path, repository_from_path, HoverClient, HoverError,
    HoverSource, HOVER_ENDPOINT_PREFIX,
};
pub use config::HoverConfig;
pub use controller::{is_hover_target, HoverController, InstallError};
pub use location::{resolve, SymbolLocation};
pub use markup::ElementRef;
pub use overlay::{OverlayManager, OverlayState, Point, Rect, Size, SurfaceHost};
