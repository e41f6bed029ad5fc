//! Interaction handling for hover tooltips.
//!
//! [`HoverController`] is the glue between the host's pointer/scroll/resize
//! events and the overlay: it filters eligible targets, resolves them to
//! source locations, drives the fetch, and keeps the overlay consistent with
//! the viewport. The host shell wires its real events to [`pointer_down`],
//! [`pointer_leave`], [`page_scrolled`] and [`viewport_resized`] after a
//! successful [`install`].
//!
//! All state lives behind one mutex and the lock is never held across an
//! await, so overlapping interactions are safe: fetches run concurrently and
//! a generation counter decides which resolution is still allowed to touch
//! the overlay. A dismissal always wins over an in-flight fetch, whatever
//! order the responses arrive in.
//!
//! [`pointer_down`]: HoverController::pointer_down
//! [`pointer_leave`]: HoverController::pointer_leave
//! [`page_scrolled`]: HoverController::page_scrolled
//! [`viewport_resized`]: HoverController::viewport_resized
//! [`install`]: HoverController::install

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use thiserror::Error;

use crate::client::{repository_from_path, HoverError, HoverSource};
use crate::config::HoverConfig;
use crate::location::{self, SymbolLocation};
use crate::markup::{ElementRef, TOKEN_CLASS};
use crate::overlay::{OverlayManager, OverlayState, Rect, SurfaceHost};

/// Identifier-like token text: a letter or underscore followed by at least
/// one letter, digit, or underscore, anywhere in the rendered text.
/// Punctuation and single-character tokens fail this.
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new("[A-Za-z_][A-Za-z0-9_]").expect("identifier pattern is valid"));

/// Fatal setup failure: the feature cannot run in this document.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The document has no review surface to attach to.
    #[error("review surface root not found in document")]
    MissingReviewSurface,
}

/// Whether an interaction target qualifies for a hover lookup.
///
/// The target must be marked as a syntax token and its rendered text must be
/// identifier-like; everything else (operators, punctuation, scaffolding)
/// dismisses instead.
pub fn is_hover_target<E: ElementRef>(element: &E) -> bool {
    element.has_class(TOKEN_CLASS) && IDENTIFIER.is_match(&element.text())
}

struct ControllerState<H: SurfaceHost> {
    overlay: OverlayManager<H>,
    /// Bumped on every transition into Pending and on every dismissal; a
    /// fetch continuation may only touch the overlay while it still holds
    /// the current value.
    generation: u64,
}

/// Drives hover lookups and the overlay from host interaction events.
pub struct HoverController<H: SurfaceHost, S: HoverSource> {
    state: Mutex<ControllerState<H>>,
    source: S,
    config: HoverConfig,
}

impl<H: SurfaceHost, S: HoverSource> HoverController<H, S> {
    /// Set up hover handling for a document.
    ///
    /// Fails when the document has no review surface root; the feature
    /// cannot function at all in that case, so the failure is surfaced
    /// through the host's blocking alert before the error is returned.
    pub fn install(host: H, source: S, config: HoverConfig) -> Result<Self, InstallError> {
        if !host.has_review_surface() {
            host.alert("Hover is unavailable: no review surface in this document");
            return Err(InstallError::MissingReviewSurface);
        }
        let gap = config.overlay.gap;
        Ok(Self {
            state: Mutex::new(ControllerState {
                overlay: OverlayManager::new(host, gap),
                generation: 0,
            }),
            source,
            config,
        })
    }

    /// Current overlay lifecycle state.
    pub fn overlay_state(&self) -> OverlayState {
        self.state.lock().overlay.state()
    }

    /// Handle a pointer interaction on `target`, anchored at its bounding box.
    ///
    /// Ineligible or unresolvable targets dismiss the overlay without any
    /// network traffic. Eligible ones show the waiting message immediately,
    /// then resolve to content or dismissal when the fetch completes. If a
    /// newer interaction or a dismissal arrived in the meantime, the stale
    /// result is dropped instead.
    pub async fn pointer_down<E: ElementRef>(&self, target: Option<&E>, anchor: Rect) {
        let Some(target) = target.filter(|el| is_hover_target(*el)) else {
            self.dismiss();
            return;
        };
        let Some(location) = location::resolve(target) else {
            self.dismiss();
            return;
        };
        let Some(repository) = self.current_repository() else {
            log::debug!("page path has no repository segment, skipping hover");
            self.dismiss();
            return;
        };

        let generation = {
            let mut state = self.state.lock();
            state.generation += 1;
            state
                .overlay
                .show_waiting(anchor, &self.config.overlay.waiting_message);
            state.generation
        };

        let outcome = self.source.fetch(&repository, &location).await;
        self.apply_fetch_outcome(generation, &location, outcome);
    }

    /// The pointer left the review surface.
    pub fn pointer_leave(&self) {
        self.dismiss();
    }

    /// The document scrolled. Only page-level scrolls dismiss; scrolling a
    /// nested region (including the overlay's own content) does not.
    pub fn page_scrolled(&self, page_level: bool) {
        if page_level {
            self.dismiss();
        }
    }

    /// The viewport was resized.
    pub fn viewport_resized(&self) {
        self.dismiss();
    }

    fn current_repository(&self) -> Option<String> {
        let path = self.state.lock().overlay.host().page_path();
        repository_from_path(&path).map(str::to_owned)
    }

    fn apply_fetch_outcome(
        &self,
        generation: u64,
        location: &SymbolLocation,
        outcome: Result<Option<String>, HoverError>,
    ) {
        let mut state = self.state.lock();
        if state.generation != generation {
            log::debug!("dropping stale hover response for {}", location.file);
            return;
        }
        match outcome {
            Ok(Some(markup)) => state.overlay.show_content(&markup),
            Ok(None) => {
                state.generation += 1;
                state.overlay.dismiss();
            }
            Err(err) => {
                log::error!("hover lookup for {} failed: {err}", location.file);
                state.generation += 1;
                state.overlay.dismiss();
            }
        }
    }

    fn dismiss(&self) {
        let mut state = self.state.lock();
        state.generation += 1;
        state.overlay.dismiss();
    }
}
