//! Recording presentation surface and notifier for testing.

use std::sync::{Mutex, MutexGuard};

use crate::modal::{Notifier, PresentationSurface};

/// A call made on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    ShowContainer,
    HideContainer,
    ShowLoading,
    HideLoading,
    SetImageSource(String),
    SetDownload { uri: String, file_name: String },
}

/// Visible state of a [`RecordingSurface`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceView {
    pub container_visible: bool,
    pub loading_visible: bool,
    pub image_source: String,
    pub download_uri: Option<String>,
    pub download_file_name: Option<String>,
}

impl SurfaceView {
    /// Loading indicator and a rendered image both showing.
    pub fn loading_and_image_visible(&self) -> bool {
        self.loading_visible && !self.image_source.is_empty()
    }
}

#[derive(Debug, Default)]
struct Recording {
    view: SurfaceView,
    calls: Vec<SurfaceCall>,
    overlap_observed: bool,
}

/// In-memory [`PresentationSurface`] that records every call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    inner: Mutex<Recording>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current visible state.
    pub fn snapshot(&self) -> SurfaceView {
        self.lock().view.clone()
    }

    /// All calls in order.
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Whether the loading indicator and an image were ever visible together.
    pub fn overlap_observed(&self) -> bool {
        self.lock().overlap_observed
    }

    fn record(&self, call: SurfaceCall) {
        let mut inner = self.lock();
        match &call {
            SurfaceCall::ShowContainer => inner.view.container_visible = true,
            SurfaceCall::HideContainer => inner.view.container_visible = false,
            SurfaceCall::ShowLoading => inner.view.loading_visible = true,
            SurfaceCall::HideLoading => inner.view.loading_visible = false,
            SurfaceCall::SetImageSource(uri) => inner.view.image_source = uri.clone(),
            SurfaceCall::SetDownload { uri, file_name } => {
                inner.view.download_uri = Some(uri.clone());
                inner.view.download_file_name = Some(file_name.clone());
            }
        }
        if inner.view.loading_and_image_visible() {
            inner.overlap_observed = true;
        }
        inner.calls.push(call);
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PresentationSurface for RecordingSurface {
    fn show_container(&self) {
        self.record(SurfaceCall::ShowContainer);
    }

    fn hide_container(&self) {
        self.record(SurfaceCall::HideContainer);
    }

    fn show_loading(&self) {
        self.record(SurfaceCall::ShowLoading);
    }

    fn hide_loading(&self) {
        self.record(SurfaceCall::HideLoading);
    }

    fn set_image_source(&self, uri: &str) {
        self.record(SurfaceCall::SetImageSource(uri.to_string()));
    }

    fn set_download(&self, uri: &str, file_name: &str) {
        self.record(SurfaceCall::SetDownload {
            uri: uri.to_string(),
            file_name: file_name.to_string(),
        });
    }
}

/// [`Notifier`] that keeps every message.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}
