//! Test doubles for hover tests.
//!
//! Provides a fake element tree implementing [`ElementRef`], a recording
//! [`SurfaceHost`] that also enforces the single-overlay invariant, and
//! hover sources with canned or scripted replies. Used by the per-module
//! unit tests and by `integration_tests`.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::client::{HoverError, HoverSource};
use crate::location::SymbolLocation;
use crate::markup::ElementRef;
use crate::overlay::{Point, Size, SurfaceHost};

// --- Fake markup -----------------------------------------------------------

struct ElementData {
    text: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    parent: Option<FakeElement>,
}

/// An element in a hand-built markup tree.
#[derive(Clone)]
pub(crate) struct FakeElement {
    inner: Rc<ElementData>,
}

impl FakeElement {
    pub fn builder(text: &str) -> FakeElementBuilder {
        FakeElementBuilder {
            data: ElementData {
                text: text.to_string(),
                classes: Vec::new(),
                attributes: Vec::new(),
                parent: None,
            },
        }
    }
}

pub(crate) struct FakeElementBuilder {
    data: ElementData,
}

impl FakeElementBuilder {
    pub fn class(mut self, name: &str) -> Self {
        self.data.classes.push(name.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.data.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn parent(mut self, parent: &FakeElement) -> Self {
        self.data.parent = Some(parent.clone());
        self
    }

    pub fn build(self) -> FakeElement {
        FakeElement {
            inner: Rc::new(self.data),
        }
    }
}

impl ElementRef for FakeElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.inner
            .attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.clone())
    }

    fn parent(&self) -> Option<Self> {
        self.inner.parent.clone()
    }

    fn text(&self) -> String {
        self.inner.text.clone()
    }

    fn has_class(&self, class: &str) -> bool {
        self.inner.classes.iter().any(|c| c == class)
    }
}

// --- Fake document host ----------------------------------------------------

struct HostState {
    has_review_surface: bool,
    page_path: String,
    viewport: Size,
    waiting_size: Size,
    content_size: Size,
    current_size: Size,
    next_surface: u32,
    live: Vec<u32>,
    total_mounts: u32,
    waiting_message: Option<String>,
    markup: Option<String>,
    positions: Vec<Point>,
    alerts: Vec<String>,
}

/// Recording [`SurfaceHost`].
///
/// Panics on a second concurrent mount: at most one overlay surface may
/// exist, and a violation should fail the test that caused it.
#[derive(Clone)]
pub(crate) struct FakeHost {
    state: Arc<Mutex<HostState>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(HostState {
                has_review_surface: true,
                page_path: "/x/myrepo/compare/abc123..def456".to_string(),
                viewport: Size {
                    width: 1280.0,
                    height: 720.0,
                },
                waiting_size: Size {
                    width: 160.0,
                    height: 24.0,
                },
                content_size: Size {
                    width: 320.0,
                    height: 120.0,
                },
                current_size: Size::default(),
                next_surface: 0,
                live: Vec::new(),
                total_mounts: 0,
                waiting_message: None,
                markup: None,
                positions: Vec::new(),
                alerts: Vec::new(),
            })),
        }
    }

    pub fn without_review_surface() -> Self {
        let host = Self::new();
        host.state.lock().has_review_surface = false;
        host
    }

    pub fn set_page_path(&self, path: &str) {
        self.state.lock().page_path = path.to_string();
    }

    pub fn set_waiting_size(&self, size: Size) {
        self.state.lock().waiting_size = size;
    }

    pub fn set_content_size(&self, size: Size) {
        self.state.lock().content_size = size;
    }

    pub fn live_surfaces(&self) -> usize {
        self.state.lock().live.len()
    }

    pub fn total_mounts(&self) -> u32 {
        self.state.lock().total_mounts
    }

    pub fn waiting_message(&self) -> Option<String> {
        self.state.lock().waiting_message.clone()
    }

    pub fn markup(&self) -> Option<String> {
        self.state.lock().markup.clone()
    }

    pub fn last_position(&self) -> Option<Point> {
        self.state.lock().positions.last().copied()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.lock().alerts.clone()
    }
}

impl SurfaceHost for FakeHost {
    type Surface = u32;

    fn has_review_surface(&self) -> bool {
        self.state.lock().has_review_surface
    }

    fn page_path(&self) -> String {
        self.state.lock().page_path.clone()
    }

    fn viewport(&self) -> Size {
        self.state.lock().viewport
    }

    fn alert(&self, message: &str) {
        self.state.lock().alerts.push(message.to_string());
    }

    fn mount_surface(&self) -> u32 {
        let mut state = self.state.lock();
        assert!(
            state.live.is_empty(),
            "at most one overlay surface may exist in the document"
        );
        let id = state.next_surface;
        state.next_surface += 1;
        state.live.push(id);
        state.total_mounts += 1;
        id
    }

    fn set_waiting(&self, surface: &u32, message: &str) {
        let mut state = self.state.lock();
        assert!(state.live.contains(surface), "surface {surface} is not live");
        state.waiting_message = Some(message.to_string());
        state.markup = None;
        state.current_size = state.waiting_size;
    }

    fn set_markup(&self, surface: &u32, markup: &str) {
        let mut state = self.state.lock();
        assert!(state.live.contains(surface), "surface {surface} is not live");
        state.markup = Some(markup.to_string());
        state.current_size = state.content_size;
    }

    fn surface_size(&self, surface: &u32) -> Size {
        let state = self.state.lock();
        assert!(state.live.contains(surface), "surface {surface} is not live");
        state.current_size
    }

    fn move_surface(&self, surface: &u32, to: Point) {
        let mut state = self.state.lock();
        assert!(state.live.contains(surface), "surface {surface} is not live");
        state.positions.push(to);
    }

    fn remove_surface(&self, surface: u32) {
        let mut state = self.state.lock();
        state.live.retain(|id| *id != surface);
        state.waiting_message = None;
        state.markup = None;
    }
}

// --- Hover sources ---------------------------------------------------------

/// What a [`StaticSource`] answers with.
pub(crate) enum Reply {
    Content(&'static str),
    NoContent,
    TransportError,
}

/// Source that resolves immediately with a fixed reply, recording calls.
///
/// Clones share the recorded calls, so a test can keep a handle after the
/// controller takes ownership of its copy.
#[derive(Clone)]
pub(crate) struct StaticSource {
    reply: Arc<Reply>,
    calls: Arc<Mutex<Vec<(String, SymbolLocation)>>>,
}

impl StaticSource {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply: Arc::new(reply),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<(String, SymbolLocation)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl HoverSource for StaticSource {
    async fn fetch(
        &self,
        repository: &str,
        location: &SymbolLocation,
    ) -> Result<Option<String>, HoverError> {
        self.calls
            .lock()
            .push((repository.to_string(), location.clone()));
        match *self.reply {
            Reply::Content(markup) => Ok(Some(markup.to_string())),
            Reply::NoContent => Ok(None),
            Reply::TransportError => Err(HoverError::Unavailable("connection refused".to_string())),
        }
    }
}

/// Source whose replies are sent by the test, keyed by file, so tests
/// control exactly when and in which order fetches resolve.
#[derive(Clone)]
pub(crate) struct ScriptedSource {
    pending: Arc<Mutex<HashMap<String, oneshot::Receiver<Result<Option<String>, HoverError>>>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Register a pending fetch for `file`; the returned sender releases it.
    pub fn script(&self, file: &str) -> oneshot::Sender<Result<Option<String>, HoverError>> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(file.to_string(), rx);
        tx
    }
}

#[async_trait]
impl HoverSource for ScriptedSource {
    async fn fetch(
        &self,
        _repository: &str,
        location: &SymbolLocation,
    ) -> Result<Option<String>, HoverError> {
        let rx = self
            .pending
            .lock()
            .remove(&location.file)
            .expect("a scripted reply for the requested file");
        rx.await.expect("reply sender should not be dropped")
    }
}
