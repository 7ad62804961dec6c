//! The ticket modal controller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, error, info, warn};

use super::traits::{Notifier, PresentationSurface};
use super::types::{ModalState, RequestOutcome, GENERIC_FAILURE_MESSAGE, SERVICE_FAILURE_PREFIX};
use crate::service::{TicketId, TicketImage, TicketResponse, TicketService, TicketServiceError};

/// Drives the ticket modal: open in a loading state, fetch the ticket,
/// then either display it or notify and close.
///
/// One request may be in flight at a time. Further calls are rejected with
/// [`RequestOutcome::Busy`] until it settles.
pub struct TicketModalController {
    service: Arc<dyn TicketService>,
    surface: Arc<dyn PresentationSurface>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ModalState>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the request future completes or is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl TicketModalController {
    pub fn new(
        service: Arc<dyn TicketService>,
        surface: Arc<dyn PresentationSurface>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            service,
            surface,
            notifier,
            state: Mutex::new(ModalState::Closed),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ModalState {
        self.lock_state().clone()
    }

    /// Whether a request is currently awaiting the service.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Opens the modal, fetches the ticket and renders it.
    ///
    /// The surface is in the loading state before the service is called.
    /// Failures of either kind notify the user and close the modal.
    pub async fn request_and_show(&self, ticket_id: impl Into<TicketId>) -> RequestOutcome {
        let ticket_id = ticket_id.into();

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(ticket_id = %ticket_id, "Ticket request already in flight, ignoring");
            return RequestOutcome::Busy;
        }
        let _guard = InFlightGuard(&self.in_flight);

        self.enter_loading(&ticket_id);

        let result = self.service.fetch_ticket(&ticket_id).await;

        match result {
            Ok(TicketResponse::Success {
                ticket_image,
                ticket_number,
            }) => match TicketImage::from_payload(ticket_image, ticket_number) {
                Ok(image) => self.display(&ticket_id, image),
                Err(e) => self.fail_transport(&ticket_id, &e),
            },
            Ok(TicketResponse::Failure { message }) => self.fail_reported(&ticket_id, message),
            Err(e) => self.fail_transport(&ticket_id, &e),
        }
    }

    /// Hides the modal. No effect when already closed.
    pub fn close(&self) {
        let previous = {
            let mut state = self.lock_state();
            if state.is_closed() {
                return;
            }
            std::mem::take(&mut *state)
        };

        self.surface.hide_container();
        info!("Ticket modal closed (was {})", previous.name());
    }

    fn enter_loading(&self, ticket_id: &TicketId) {
        // Image goes before the indicator so the two are never visible together.
        self.surface.set_image_source("");
        self.surface.show_loading();
        self.surface.show_container();
        *self.lock_state() = ModalState::Loading;

        info!(ticket_id = %ticket_id, "Ticket modal loading");
    }

    fn display(&self, ticket_id: &TicketId, image: TicketImage) -> RequestOutcome {
        let uri = image.data_uri();
        let ticket_number = image.ticket_number().to_string();

        self.surface.hide_loading();
        self.surface.set_image_source(&uri);
        self.surface.set_download(&uri, &image.file_name());

        let mut state = self.lock_state();
        if state.is_loading() {
            info!(
                ticket_id = %ticket_id,
                ticket_number = %ticket_number,
                size_bytes = image.bytes().len(),
                "Ticket displayed"
            );
            *state = ModalState::Displaying(image);
        } else {
            // Closed while the request was in flight: slots are updated, modal stays hidden.
            debug!(ticket_id = %ticket_id, "Ticket arrived after modal was closed");
        }

        RequestOutcome::Displayed { ticket_number }
    }

    fn fail_reported(&self, ticket_id: &TicketId, message: String) -> RequestOutcome {
        warn!(ticket_id = %ticket_id, "Ticket service reported failure: {}", message);

        self.notifier
            .notify(&format!("{}{}", SERVICE_FAILURE_PREFIX, message));
        self.close();

        RequestOutcome::ServiceFailure { message }
    }

    fn fail_transport(&self, ticket_id: &TicketId, err: &TicketServiceError) -> RequestOutcome {
        error!(ticket_id = %ticket_id, "Ticket request failed: {}", err);

        self.notifier.notify(GENERIC_FAILURE_MESSAGE);
        self.close();

        RequestOutcome::TransportFailure
    }

    fn lock_state(&self) -> MutexGuard<'_, ModalState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::testing::{
        fixtures, MockTicketService, RecordingNotifier, RecordingSurface, SurfaceCall, SurfaceView,
    };

    struct Harness {
        service: Arc<MockTicketService>,
        surface: Arc<RecordingSurface>,
        notifier: Arc<RecordingNotifier>,
        controller: Arc<TicketModalController>,
    }

    fn harness() -> Harness {
        let service = Arc::new(MockTicketService::new());
        let surface = Arc::new(RecordingSurface::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let controller = Arc::new(TicketModalController::new(
            service.clone(),
            surface.clone(),
            notifier.clone(),
        ));
        Harness {
            service,
            surface,
            notifier,
            controller,
        }
    }

    /// Captures the surface as it looks when the service is called.
    struct ProbeService {
        surface: Arc<RecordingSurface>,
        seen: Mutex<Option<SurfaceView>>,
    }

    #[async_trait]
    impl TicketService for ProbeService {
        fn name(&self) -> &str {
            "probe"
        }

        async fn fetch_ticket(
            &self,
            _ticket_id: &TicketId,
        ) -> Result<TicketResponse, TicketServiceError> {
            *self.seen.lock().unwrap() = Some(self.surface.snapshot());
            Ok(fixtures::success_response("1"))
        }
    }

    #[tokio::test]
    async fn test_loading_shown_before_request() {
        let surface = Arc::new(RecordingSurface::new());
        let service = Arc::new(ProbeService {
            surface: surface.clone(),
            seen: Mutex::new(None),
        });
        let controller = TicketModalController::new(
            service.clone(),
            surface.clone(),
            Arc::new(RecordingNotifier::new()),
        );

        controller.request_and_show("1").await;

        let seen = service.seen.lock().unwrap().clone().unwrap();
        assert!(seen.container_visible);
        assert!(seen.loading_visible);
        assert!(seen.image_source.is_empty());
    }

    #[tokio::test]
    async fn test_success_displays_ticket() {
        let h = harness();
        h.service
            .set_response("7", fixtures::success_response("42"))
            .await;

        let outcome = h.controller.request_and_show("7").await;

        assert_eq!(
            outcome,
            RequestOutcome::Displayed {
                ticket_number: "42".to_string()
            }
        );
        let view = h.surface.snapshot();
        let expected_uri = format!("data:image/png;base64,{}", fixtures::png_payload());
        assert!(view.container_visible);
        assert!(!view.loading_visible);
        assert_eq!(view.image_source, expected_uri);
        assert_eq!(view.download_uri.as_deref(), Some(expected_uri.as_str()));
        assert_eq!(view.download_file_name.as_deref(), Some("ticket_42.png"));
        assert!(h.controller.state().is_displaying());
        assert_eq!(h.notifier.count(), 0);
        assert!(!h.surface.overlap_observed());
    }

    #[tokio::test]
    async fn test_displayed_state_holds_image() {
        let h = harness();
        h.service
            .set_response("7", fixtures::success_response("AB123456"))
            .await;

        h.controller.request_and_show("7").await;

        match h.controller.state() {
            ModalState::Displaying(image) => {
                assert_eq!(image.ticket_number(), "AB123456");
                assert_eq!(image.bytes(), &fixtures::PNG_BYTES);
            }
            other => panic!("expected displaying, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reported_failure_notifies_and_closes() {
        let h = harness();
        h.service
            .set_response("9", fixtures::failure_response("Ticket expired"))
            .await;

        let outcome = h.controller.request_and_show("9").await;

        assert_eq!(
            outcome,
            RequestOutcome::ServiceFailure {
                message: "Ticket expired".to_string()
            }
        );
        let messages = h.notifier.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Ticket expired"));
        assert!(h.controller.state().is_closed());
        assert!(!h.surface.snapshot().container_visible);
    }

    #[tokio::test]
    async fn test_transport_failure_uses_generic_message() {
        let h = harness();
        h.service
            .set_next_error(TicketServiceError::Parse("connection reset by peer".to_string()))
            .await;

        let outcome = h.controller.request_and_show("3").await;

        assert_eq!(outcome, RequestOutcome::TransportFailure);
        assert_eq!(h.notifier.messages(), vec![GENERIC_FAILURE_MESSAGE]);
        assert!(h.controller.state().is_closed());
        assert!(!h.surface.snapshot().container_visible);
    }

    #[tokio::test]
    async fn test_invalid_image_payload_is_transport_failure() {
        let h = harness();
        h.service
            .set_response("5", TicketResponse::success("%%% not base64 %%%", "5"))
            .await;

        let outcome = h.controller.request_and_show("5").await;

        assert_eq!(outcome, RequestOutcome::TransportFailure);
        assert_eq!(h.notifier.messages(), vec![GENERIC_FAILURE_MESSAGE]);
        assert!(h.controller.state().is_closed());
        assert!(h.surface.snapshot().image_source.is_empty());
    }

    #[tokio::test]
    async fn test_close_when_closed_is_noop() {
        let h = harness();

        h.controller.close();
        h.controller.close();

        assert!(h.controller.state().is_closed());
        assert_eq!(h.surface.call_count(), 0);
        assert_eq!(h.notifier.count(), 0);
    }

    #[tokio::test]
    async fn test_close_twice_equals_close_once() {
        let h = harness();
        h.service
            .set_response("1", fixtures::success_response("1"))
            .await;
        h.controller.request_and_show("1").await;

        h.controller.close();
        let after_first = (h.surface.snapshot(), h.surface.call_count());
        h.controller.close();

        assert_eq!((h.surface.snapshot(), h.surface.call_count()), after_first);
        assert_eq!(h.surface.calls().last(), Some(&SurfaceCall::HideContainer));
        assert!(h.controller.state().is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_request_is_rejected() {
        let h = harness();
        h.service
            .set_response("1", fixtures::success_response("1"))
            .await;
        h.service.set_response_delay(Duration::from_millis(200)).await;

        let controller = h.controller.clone();
        let first = tokio::spawn(async move { controller.request_and_show("1").await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(h.controller.is_busy());
        assert!(h.controller.state().is_loading());

        let calls_before = h.surface.call_count();
        let second = h.controller.request_and_show("1").await;
        assert_eq!(second, RequestOutcome::Busy);
        assert_eq!(h.surface.call_count(), calls_before);

        assert!(first.await.unwrap().is_displayed());
        assert!(!h.controller.is_busy());
        assert_eq!(h.service.request_count().await, 1);
    }

    #[tokio::test]
    async fn test_request_again_after_display() {
        let h = harness();
        h.service
            .set_response("1", fixtures::success_response("1"))
            .await;
        h.service
            .set_response("2", fixtures::success_response("2"))
            .await;

        h.controller.request_and_show("1").await;
        let outcome = h.controller.request_and_show("2").await;

        assert!(outcome.is_displayed());
        assert_eq!(
            h.surface.snapshot().download_file_name.as_deref(),
            Some("ticket_2.png")
        );
        assert!(!h.surface.overlap_observed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_during_flight_keeps_modal_hidden() {
        let h = harness();
        h.service
            .set_response("1", fixtures::success_response("1"))
            .await;
        h.service.set_response_delay(Duration::from_millis(100)).await;

        let controller = h.controller.clone();
        let pending = tokio::spawn(async move { controller.request_and_show("1").await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        h.controller.close();
        assert!(pending.await.unwrap().is_displayed());

        let view = h.surface.snapshot();
        assert!(!view.container_visible);
        assert_eq!(view.download_file_name.as_deref(), Some("ticket_1.png"));
        assert!(h.controller.state().is_closed());
    }
}
