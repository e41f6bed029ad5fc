//! The floating overlay that displays hover content near a token.
//!
//! [`OverlayManager`] owns the single overlay surface: it mounts the surface
//! on first need, repositions it as content changes, and removes it from the
//! document on every dismissal. The surface itself (the actual element in
//! the page) is created and mutated through the [`SurfaceHost`] seam, so
//! the manager never queries the document by identifier and the "at most one
//! overlay" invariant is carried by its single owned slot.
//!
//! Dismissal removes the surface outright rather than hiding it; the next
//! interaction starts over from a fresh surface and a waiting message, so no
//! stale content can leak across hover cycles.

mod position;

pub use position::{place, Point, Rect, Size};

/// Lifecycle state of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    /// No surface exists in the document.
    #[default]
    Absent,
    /// Surface visible, showing the waiting message.
    Pending,
    /// Surface visible, showing fetched content.
    Shown,
}

/// The document-side operations the overlay needs.
///
/// Implemented by the webview shell over the real page, and by a recording
/// double in tests. The mounted surface must not intercept pointer events:
/// hovering the overlay itself must not retrigger interaction handling.
pub trait SurfaceHost {
    /// Handle to a mounted overlay surface.
    type Surface;

    /// Whether the review surface root exists in the document.
    fn has_review_surface(&self) -> bool;

    /// Path component of the page currently being viewed.
    fn page_path(&self) -> String;

    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Raise a blocking alert. Only used for fatal setup failures.
    fn alert(&self, message: &str);

    /// Insert a fresh overlay surface into the document.
    fn mount_surface(&self) -> Self::Surface;

    /// Show a plain-text waiting message on the surface.
    fn set_waiting(&self, surface: &Self::Surface, message: &str);

    /// Replace the surface content with a pre-rendered markup fragment.
    fn set_markup(&self, surface: &Self::Surface, markup: &str);

    /// Measure the surface after layout.
    ///
    /// Adapters schedule the measurement after the next render pass so the
    /// reported size reflects the content set immediately before.
    fn surface_size(&self, surface: &Self::Surface) -> Size;

    /// Move the surface's top-left corner to a viewport position.
    fn move_surface(&self, surface: &Self::Surface, to: Point);

    /// Remove the surface from the document.
    fn remove_surface(&self, surface: Self::Surface);
}

/// Owner of the single hover overlay surface.
pub struct OverlayManager<H: SurfaceHost> {
    host: H,
    surface: Option<H::Surface>,
    anchor: Option<Rect>,
    state: OverlayState,
    gap: f64,
}

impl<H: SurfaceHost> OverlayManager<H> {
    /// Create a manager with no mounted surface.
    pub fn new(host: H, gap: f64) -> Self {
        Self {
            host,
            surface: None,
            anchor: None,
            state: OverlayState::Absent,
            gap,
        }
    }

    /// The host this manager drives.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Current lifecycle state.
    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Show the waiting message anchored to a token's bounding box.
    ///
    /// Mounts the surface if none exists, reuses it otherwise.
    pub fn show_waiting(&mut self, anchor: Rect, message: &str) {
        let surface = self
            .surface
            .take()
            .unwrap_or_else(|| self.host.mount_surface());
        self.host.set_waiting(&surface, message);
        self.surface = Some(surface);
        self.anchor = Some(anchor);
        self.state = OverlayState::Pending;
        self.reposition();
    }

    /// Replace the waiting message with fetched content and reposition.
    ///
    /// Content changes the measured size, so placement is recomputed from a
    /// fresh measurement. A call with no live surface is ignored.
    pub fn show_content(&mut self, markup: &str) {
        let Some(surface) = self.surface.as_ref() else {
            log::debug!("dropping hover content with no overlay surface");
            return;
        };
        self.host.set_markup(surface, markup);
        self.state = OverlayState::Shown;
        self.reposition();
    }

    /// Remove the surface from the document. No-op when already absent.
    pub fn dismiss(&mut self) {
        if let Some(surface) = self.surface.take() {
            self.host.remove_surface(surface);
        }
        self.anchor = None;
        self.state = OverlayState::Absent;
    }

    fn reposition(&mut self) {
        let (Some(surface), Some(anchor)) = (self.surface.as_ref(), self.anchor) else {
            return;
        };
        let overlay = self.host.surface_size(surface);
        let viewport = self.host.viewport();
        self.host.move_surface(surface, place(anchor, overlay, viewport, self.gap));
    }
}
