//! Seams between the controller and whatever renders the modal.

/// The modal dialog and its sub-elements.
///
/// Calls are synchronous and infallible: they mirror visibility flags and
/// element attributes on the host UI.
pub trait PresentationSurface: Send + Sync {
    /// Makes the modal container visible.
    fn show_container(&self);

    /// Hides the modal container.
    fn hide_container(&self);

    /// Shows the loading indicator.
    fn show_loading(&self);

    /// Hides the loading indicator.
    fn hide_loading(&self);

    /// Sets the image element source. An empty string clears it.
    fn set_image_source(&self, uri: &str);

    /// Points the download control at `uri` with a suggested filename.
    fn set_download(&self, uri: &str, file_name: &str);
}

/// Blocking user notification (alert-style).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
