// SPDX-License-Identifier: GPL-3.0-only

//! Camera session lifecycle
//!
//! The session owns the readiness state machine for one camera:
//! - Binding picks a device by facing and a 3:2 capture format
//! - Readiness is published on a watch channel
//! - Captures are only accepted while ready, one at a time
//!
//! Binding while already ready keeps the current camera and returns its
//! handle; binding while a bind is pending fails with
//! [`BindError::AlreadyBinding`].
//!
//! Every bind attempt gets a generation number. An attempt that finishes
//! after a fault or a newer bind superseded it leaves the session alone.

use super::CameraBackend;
use super::format_selection::select_photo_format;
use super::types::*;
use crate::errors::{BindError, CaptureError};
use chrono::Local;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

type ReadyListener = Box<dyn Fn(&BoundCamera) + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Clears the in-flight flag once the hardware is done with a capture
///
/// Owned by the task driving the backend, so a caller that stops waiting
/// does not release the camera early.
struct CaptureGuard(Arc<AtomicBool>);

impl CaptureGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// One camera, its readiness, and the capture entry point
///
/// `bound` and `last_fault` only change inside state transitions, while the
/// watch channel's lock is held.
pub struct CameraSession {
    backend: Arc<dyn CameraBackend>,
    target_aspect_ratio: f64,
    aspect_ratio_tolerance: f64,
    state: watch::Sender<CameraSessionState>,
    bind_generation: AtomicU64,
    bound: Mutex<Option<BoundCamera>>,
    last_fault: Mutex<Option<String>>,
    ready_listeners: Mutex<Vec<ReadyListener>>,
    capture_in_flight: Arc<AtomicBool>,
}

impl CameraSession {
    /// Create an unbound session
    ///
    /// # Arguments
    /// * `backend` - Device access for this session
    /// * `target_aspect_ratio` - Preferred width/height ratio of captures
    /// * `aspect_ratio_tolerance` - Accepted deviation before falling back
    pub fn new(
        backend: Arc<dyn CameraBackend>,
        target_aspect_ratio: f64,
        aspect_ratio_tolerance: f64,
    ) -> Self {
        let (state, _) = watch::channel(CameraSessionState::Unbound);
        Self {
            backend,
            target_aspect_ratio,
            aspect_ratio_tolerance,
            state,
            bind_generation: AtomicU64::new(0),
            bound: Mutex::new(None),
            last_fault: Mutex::new(None),
            ready_listeners: Mutex::new(Vec::new()),
            capture_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> CameraSessionState {
        *self.state.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == CameraSessionState::Ready
    }

    /// Whether the hardware is still working on a capture
    pub fn is_capturing(&self) -> bool {
        self.capture_in_flight.load(Ordering::Acquire)
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<CameraSessionState> {
        self.state.subscribe()
    }

    /// Device and format of the current binding, if ready
    pub fn bound(&self) -> Option<BoundCamera> {
        lock(&self.bound).clone()
    }

    /// Reason for the most recent fault
    pub fn last_fault(&self) -> Option<String> {
        lock(&self.last_fault).clone()
    }

    /// Register a callback run once for every successful bind
    ///
    /// A listener registered from inside a callback first fires on the next
    /// bind.
    pub fn on_ready(&self, listener: impl Fn(&BoundCamera) + Send + Sync + 'static) {
        lock(&self.ready_listeners).push(Box::new(listener));
    }

    /// Bind a camera with the given facing
    ///
    /// Allowed from Unbound or Error. Device or format selection failures
    /// return the session to its previous state; an initialization failure
    /// moves it to Error.
    pub async fn bind(&self, facing: Facing) -> Result<BoundCamera, BindError> {
        let mut previous = CameraSessionState::Unbound;
        let mut generation = 0;
        let started = self.state.send_if_modified(|state| {
            previous = *state;
            match state {
                CameraSessionState::Unbound | CameraSessionState::Error => {
                    generation = self.bind_generation.fetch_add(1, Ordering::AcqRel) + 1;
                    *state = CameraSessionState::Binding;
                    true
                }
                CameraSessionState::Binding | CameraSessionState::Ready => false,
            }
        });

        if !started {
            if previous == CameraSessionState::Ready
                && let Some(bound) = self.bound()
            {
                debug!(device = %bound.device.name, "Already bound, keeping current camera");
                return Ok(bound);
            }
            warn!("Bind requested while another bind is pending");
            return Err(BindError::AlreadyBinding);
        }

        info!(%facing, generation, backend = self.backend.backend_name(), "Binding camera");

        let (device, format) = match self.select_device(facing) {
            Ok(selection) => selection,
            Err(e) => {
                warn!(error = %e, "Camera selection failed");
                self.state.send_if_modified(|state| {
                    if self.owns_binding(generation, *state) {
                        *state = previous;
                        true
                    } else {
                        false
                    }
                });
                return Err(e);
            }
        };

        if let Err(e) = self.backend.initialize(&device, &format).await {
            let reason = e.to_string();
            let faulted = self.state.send_if_modified(|state| {
                if self.owns_binding(generation, *state) {
                    self.fault_locked(state, reason.clone());
                    true
                } else {
                    false
                }
            });
            if faulted {
                error!(reason = %reason, "Camera initialization failed");
            } else {
                debug!(generation, reason = %reason, "Superseded bind failed to initialize");
            }
            return Err(BindError::Initialization(reason));
        }

        let bound = BoundCamera { device, format };

        // A fault or newer bind during initialization wins over this success
        let became_ready = self.state.send_if_modified(|state| {
            if self.owns_binding(generation, *state) {
                *lock(&self.bound) = Some(bound.clone());
                *lock(&self.last_fault) = None;
                *state = CameraSessionState::Ready;
                true
            } else {
                false
            }
        });
        if !became_ready {
            warn!(generation, "Bind superseded while initializing");
            let reason = self
                .last_fault()
                .unwrap_or_else(|| "bind superseded by a newer attempt".to_string());
            return Err(BindError::Initialization(reason));
        }

        info!(device = %bound.device.name, format = %bound.format, "Camera ready");
        self.notify_ready(&bound);

        Ok(bound)
    }

    /// Wait until the session is ready
    ///
    /// Fails if the session faults first. Waits indefinitely while nothing
    /// binds the session.
    pub async fn wait_ready(&self) -> Result<BoundCamera, BindError> {
        let mut receiver = self.state.subscribe();
        let reached = receiver
            .wait_for(|state| {
                matches!(
                    state,
                    CameraSessionState::Ready | CameraSessionState::Error
                )
            })
            .await
            .map(|state| *state);

        match reached {
            Ok(CameraSessionState::Ready) => self
                .bound()
                .ok_or_else(|| BindError::Initialization("camera was released".to_string())),
            _ => Err(BindError::Initialization(
                self.last_fault()
                    .unwrap_or_else(|| "camera fault".to_string()),
            )),
        }
    }

    /// Record a hardware fault reported by the platform
    pub fn report_fault(&self, reason: impl Into<String>) {
        self.enter_error(reason.into());
    }

    /// Take a photo
    ///
    /// Rejected with [`CaptureError::NotReady`] unless the session is ready,
    /// and with [`CaptureError::Busy`] while the hardware is still working on
    /// another capture, even one whose caller gave up waiting. Neither
    /// rejection touches the hardware.
    pub async fn capture(&self) -> Result<CapturedPhoto, CaptureError> {
        let state = self.state();
        if state != CameraSessionState::Ready {
            warn!(%state, "Camera not ready yet, rejecting capture");
            return Err(CaptureError::NotReady);
        }

        let Some(in_flight) = CaptureGuard::acquire(&self.capture_in_flight) else {
            warn!("Capture already in progress, rejecting capture");
            return Err(CaptureError::Busy);
        };

        let captured_at = Local::now();
        info!("Capturing photo");

        let backend = Arc::clone(&self.backend);
        let hardware = tokio::spawn(async move {
            let _in_flight = in_flight;
            backend.capture_photo().await
        });

        let outcome = hardware
            .await
            .map_err(|e| BackendError::CaptureFailed(format!("Capture task error: {}", e)))
            .and_then(|result| result);

        match outcome {
            Ok(transient_path) => {
                debug!(path = %transient_path.display(), "Photo captured");
                Ok(CapturedPhoto {
                    transient_path,
                    captured_at,
                })
            }
            Err(e) => {
                error!(error = %e, "Error capturing photo");
                if e.is_device_fault() {
                    self.enter_error(e.to_string());
                }
                Err(CaptureError::Hardware(e.to_string()))
            }
        }
    }

    fn select_device(&self, facing: Facing) -> Result<(CameraDevice, CameraFormat), BindError> {
        let device = self
            .backend
            .enumerate_cameras()
            .into_iter()
            .find(|device| device.facing == facing)
            .ok_or(BindError::NoDevice(facing))?;

        let formats = self.backend.get_formats(&device);
        let format = select_photo_format(
            &formats,
            self.target_aspect_ratio,
            self.aspect_ratio_tolerance,
        )
        .ok_or_else(|| BindError::NoFormat(device.name.clone()))?;

        Ok((device, format))
    }

    /// Whether bind attempt `generation` is still the one in progress
    fn owns_binding(&self, generation: u64, state: CameraSessionState) -> bool {
        state == CameraSessionState::Binding
            && self.bind_generation.load(Ordering::Acquire) == generation
    }

    fn notify_ready(&self, bound: &BoundCamera) {
        let listeners = std::mem::take(&mut *lock(&self.ready_listeners));
        for listener in &listeners {
            listener(bound);
        }

        let mut registered = lock(&self.ready_listeners);
        let added = std::mem::replace(&mut *registered, listeners);
        registered.extend(added);
    }

    fn fault_locked(&self, state: &mut CameraSessionState, reason: String) {
        *lock(&self.bound) = None;
        *lock(&self.last_fault) = Some(reason);
        *state = CameraSessionState::Error;
    }

    fn enter_error(&self, reason: String) {
        error!(reason = %reason, "Camera error");
        self.state.send_modify(|state| self.fault_locked(state, reason));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct FakeBackend {
        fail_init: AtomicBool,
        hold_next_init: AtomicBool,
        init_entered: Notify,
        init_release: Notify,
        hold_capture: AtomicBool,
        capture_fault: Mutex<Option<BackendError>>,
        captures: AtomicUsize,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl CameraBackend for FakeBackend {
        fn enumerate_cameras(&self) -> Vec<CameraDevice> {
            vec![CameraDevice {
                id: "cam0".to_string(),
                name: "Rear".to_string(),
                facing: Facing::Back,
            }]
        }

        fn get_formats(&self, _device: &CameraDevice) -> Vec<CameraFormat> {
            vec![
                CameraFormat::new(1920, 1080),
                CameraFormat::new(4500, 3000),
                CameraFormat::new(4032, 3024),
            ]
        }

        async fn initialize(
            &self,
            _device: &CameraDevice,
            _format: &CameraFormat,
        ) -> BackendResult<()> {
            if self.hold_next_init.swap(false, Ordering::SeqCst) {
                self.init_entered.notify_one();
                self.init_release.notified().await;
            }
            if self.fail_init.load(Ordering::SeqCst) {
                Err(BackendError::InitializationFailed("sensor timeout".into()))
            } else {
                Ok(())
            }
        }

        async fn capture_photo(&self) -> BackendResult<PathBuf> {
            self.captures.fetch_add(1, Ordering::SeqCst);
            if self.hold_capture.load(Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.notified().await;
            }
            if let Some(fault) = lock(&self.capture_fault).take() {
                return Err(fault);
            }
            Ok(PathBuf::from("/tmp/transient.jpg"))
        }

        fn backend_name(&self) -> &'static str {
            "fake"
        }
    }

    fn session_with(backend: Arc<FakeBackend>) -> CameraSession {
        CameraSession::new(backend, 1.5, 0.01)
    }

    #[tokio::test]
    async fn test_bind_selects_three_by_two_and_fires_ready_once() {
        let session = session_with(Arc::new(FakeBackend::default()));
        let ready_calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ready_calls);
        session.on_ready(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let bound = session.bind(Facing::Back).await.unwrap();
        assert_eq!(bound.format, CameraFormat::new(4500, 3000));
        assert_eq!(session.state(), CameraSessionState::Ready);

        // Rebinding while ready is a no-op
        let again = session.bind(Facing::Back).await.unwrap();
        assert_eq!(again, bound);
        assert_eq!(ready_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_facing_returns_to_unbound() {
        let session = session_with(Arc::new(FakeBackend::default()));
        let err = session.bind(Facing::Front).await.unwrap_err();
        assert!(matches!(err, BindError::NoDevice(Facing::Front)));
        assert_eq!(session.state(), CameraSessionState::Unbound);
    }

    #[tokio::test]
    async fn test_capture_before_ready_never_reaches_hardware() {
        let backend = Arc::new(FakeBackend::default());
        let session = session_with(Arc::clone(&backend));

        let err = session.capture().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotReady);
        assert_eq!(backend.captures.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_init_failure_enters_error_and_rebind_recovers() {
        let backend = Arc::new(FakeBackend::default());
        backend.fail_init.store(true, Ordering::SeqCst);
        let session = session_with(Arc::clone(&backend));

        assert!(session.bind(Facing::Back).await.is_err());
        assert_eq!(session.state(), CameraSessionState::Error);
        assert!(session.last_fault().is_some());
        assert!(session.wait_ready().await.is_err());

        backend.fail_init.store(false, Ordering::SeqCst);
        session.bind(Facing::Back).await.unwrap();
        assert!(session.is_ready());
        assert!(session.last_fault().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_capture_is_busy() {
        let backend = Arc::new(FakeBackend::default());
        backend.hold_capture.store(true, Ordering::SeqCst);
        let session = Arc::new(session_with(Arc::clone(&backend)));
        session.bind(Facing::Back).await.unwrap();

        let first = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.capture().await }
        });
        backend.entered.notified().await;
        assert!(session.is_capturing());

        let second = session.capture().await.unwrap_err();
        assert_eq!(second.kind(), ErrorKind::Busy);

        backend.release.notify_one();
        let photo = first.await.unwrap().unwrap();
        assert_eq!(photo.transient_path, PathBuf::from("/tmp/transient.jpg"));
        assert_eq!(backend.captures.load(Ordering::SeqCst), 1);
        assert!(!session.is_capturing());
    }

    #[tokio::test]
    async fn test_device_fault_during_capture_enters_error() {
        let backend = Arc::new(FakeBackend::default());
        let session = session_with(Arc::clone(&backend));
        session.bind(Facing::Back).await.unwrap();

        *lock(&backend.capture_fault) = Some(BackendError::Disconnected("usb reset".into()));
        let err = session.capture().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CaptureError);
        assert_eq!(session.state(), CameraSessionState::Error);
        assert!(session.bound().is_none());
    }

    #[tokio::test]
    async fn test_single_capture_failure_keeps_session_ready() {
        let backend = Arc::new(FakeBackend::default());
        let session = session_with(Arc::clone(&backend));
        session.bind(Facing::Back).await.unwrap();

        *lock(&backend.capture_fault) = Some(BackendError::CaptureFailed("blurred".into()));
        assert!(session.capture().await.is_err());
        assert!(session.is_ready());
        assert!(session.capture().await.is_ok());
    }

    #[tokio::test]
    async fn test_wait_ready_resolves_after_bind() {
        let session = Arc::new(session_with(Arc::new(FakeBackend::default())));
        let waiter = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.wait_ready().await }
        });

        session.bind(Facing::Back).await.unwrap();
        let bound = waiter.await.unwrap().unwrap();
        assert_eq!(bound.device.id, "cam0");
    }

    #[tokio::test]
    async fn test_fault_during_bind_wins_over_late_success() {
        let backend = Arc::new(FakeBackend::default());
        backend.hold_next_init.store(true, Ordering::SeqCst);
        let session = Arc::new(session_with(Arc::clone(&backend)));

        let pending = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.bind(Facing::Back).await }
        });
        backend.init_entered.notified().await;
        session.report_fault("usb reset");
        backend.init_release.notify_one();

        assert!(pending.await.unwrap().is_err());
        assert_eq!(session.state(), CameraSessionState::Error);
        assert!(session.bound().is_none());
        assert_eq!(session.last_fault().as_deref(), Some("usb reset"));
    }

    #[tokio::test]
    async fn test_superseded_bind_leaves_newer_binding_alone() {
        let backend = Arc::new(FakeBackend::default());
        backend.hold_next_init.store(true, Ordering::SeqCst);
        let session = Arc::new(session_with(Arc::clone(&backend)));

        let stale = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.bind(Facing::Back).await }
        });
        backend.init_entered.notified().await;
        assert_eq!(session.state(), CameraSessionState::Binding);

        session.report_fault("usb reset");
        let current = session.bind(Facing::Back).await.unwrap();

        backend.init_release.notify_one();
        assert!(stale.await.unwrap().is_err());

        assert_eq!(session.state(), CameraSessionState::Ready);
        assert_eq!(session.bound(), Some(current.clone()));
        assert_eq!(session.wait_ready().await.unwrap(), current);
    }

    #[tokio::test]
    async fn test_ready_listener_may_register_listeners() {
        let session = Arc::new(session_with(Arc::new(FakeBackend::default())));
        let outer_calls = Arc::new(AtomicUsize::new(0));
        let inner_calls = Arc::new(AtomicUsize::new(0));

        let weak = Arc::downgrade(&session);
        let outer = Arc::clone(&outer_calls);
        let inner = Arc::clone(&inner_calls);
        session.on_ready(move |_| {
            outer.fetch_add(1, Ordering::SeqCst);
            if let Some(session) = weak.upgrade() {
                let inner = Arc::clone(&inner);
                session.on_ready(move |_| {
                    inner.fetch_add(1, Ordering::SeqCst);
                });
            }
        });

        session.bind(Facing::Back).await.unwrap();
        assert_eq!(outer_calls.load(Ordering::SeqCst), 1);
        assert_eq!(inner_calls.load(Ordering::SeqCst), 0);

        session.report_fault("lens cap");
        session.bind(Facing::Back).await.unwrap();
        assert_eq!(outer_calls.load(Ordering::SeqCst), 2);
        assert_eq!(inner_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_abandoned_capture_stays_busy_until_hardware_finishes() {
        let backend = Arc::new(FakeBackend::default());
        backend.hold_capture.store(true, Ordering::SeqCst);
        let session = session_with(Arc::clone(&backend));
        session.bind(Facing::Back).await.unwrap();

        let abandoned = tokio::time::timeout(Duration::from_millis(20), session.capture()).await;
        assert!(abandoned.is_err());
        assert!(session.is_capturing());
        assert_eq!(session.capture().await.unwrap_err().kind(), ErrorKind::Busy);
        assert_eq!(backend.captures.load(Ordering::SeqCst), 1);

        backend.hold_capture.store(false, Ordering::SeqCst);
        backend.release.notify_one();
        tokio::time::timeout(Duration::from_secs(5), async {
            while session.is_capturing() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        assert!(session.capture().await.is_ok());
        assert_eq!(backend.captures.load(Ordering::SeqCst), 2);
    }
}
