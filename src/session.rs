// src/session.rs

//! The caller-facing windowing session.
//!
//! A [`Session`] owns a provider (the loaded native library, or a mock) and
//! the callback registry, and exposes every forwarded operation. Construction
//! runs native initialization; dropping it uninstalls callbacks and
//! terminates the native side, which invalidates every handle obtained
//! through it.
//!
//! Handles are plain addresses, so validity is the caller's side of the
//! contract: using a handle after its window was destroyed (or after the
//! session ended) is exactly as undefined here as it is in the native API.
//! Native-reported failures never surface as `Err`; calls return zeroed or
//! none values and the diagnostic arrives through the error callback
//! (register one first). `Err` is reserved for binding-boundary precondition
//! violations and for failure to load or initialize the library itself.
//!
//! The native library is process-global state, so at most one live session
//! is intended; its thread affinity (main-thread-only on some platforms) is
//! also inherited by the session.

use crate::api::NativeApi;
use crate::callbacks::{self, CallbackRegistry};
use crate::config::WindowConfig;
use crate::enums::{ErrorCode, MonitorEvent, WindowAttrib};
use crate::error::Error;
use crate::ffi;
use crate::handle::{MonitorHandle, WindowHandle};
use crate::hints::WindowHint;
use crate::keys::{Key, KeyAction, Modifiers};
use crate::linked::LinkedApi;
use crate::marshal::{self, GammaRamp, VideoMode};
use libc::{c_char, c_void};
use log::{debug, info, warn};
use std::ffi::{CStr, CString};

fn decode_text(raw: *const c_char) -> String {
    if raw.is_null() {
        return String::new();
    }
    // ANSI on the wire; anything non-UTF-8 is replaced, not rejected.
    unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned()
}

pub struct Session<A: NativeApi = LinkedApi> {
    api: A,
    registry: CallbackRegistry,
}

impl Session<LinkedApi> {
    /// Loads the native library and initializes it.
    pub fn init() -> Result<Self, Error> {
        Session::with_api(LinkedApi::open()?)
    }
}

impl<A: NativeApi> Session<A> {
    /// Initializes the native side through the given provider.
    ///
    /// On failure nothing is terminated; the native library cleans up its
    /// own partial initialization.
    pub fn with_api(api: A) -> Result<Self, Error> {
        if !api.init() {
            return Err(Error::Init);
        }
        let (major, minor, rev) = api.version();
        info!("windowing session initialized (native {major}.{minor}.{rev})");
        Ok(Session {
            api,
            registry: CallbackRegistry::new(),
        })
    }

    /// The underlying provider. Mostly useful with a mock provider in tests.
    pub fn api(&self) -> &A {
        &self.api
    }

    // --- Version ---

    pub fn version(&self) -> (i32, i32, i32) {
        self.api.version()
    }

    pub fn version_string(&self) -> String {
        decode_text(self.api.version_string())
    }

    // --- Monitors ---

    /// Snapshot of the currently connected monitors. Later connection
    /// changes do not affect the returned Vec.
    pub fn monitors(&self) -> Vec<MonitorHandle> {
        let mut count = 0;
        unsafe {
            let base = self.api.monitors(&mut count);
            marshal::monitor_array(base, count)
        }
    }

    /// The primary monitor; none when no monitor is connected.
    pub fn primary_monitor(&self) -> MonitorHandle {
        MonitorHandle::from_raw(self.api.primary_monitor())
    }

    pub fn monitor_pos(&self, monitor: MonitorHandle) -> (i32, i32) {
        unsafe { self.api.monitor_pos(monitor.as_raw()) }
    }

    /// Physical size of the display in millimetres.
    pub fn monitor_physical_size(&self, monitor: MonitorHandle) -> (i32, i32) {
        unsafe { self.api.monitor_physical_size(monitor.as_raw()) }
    }

    pub fn monitor_name(&self, monitor: MonitorHandle) -> String {
        decode_text(unsafe { self.api.monitor_name(monitor.as_raw()) })
    }

    /// Snapshot of the monitor's supported video modes.
    pub fn video_modes(&self, monitor: MonitorHandle) -> Vec<VideoMode> {
        let mut count = 0;
        unsafe {
            let base = self.api.video_modes(monitor.as_raw(), &mut count);
            marshal::video_mode_array(base, count)
        }
    }

    /// The monitor's current video mode, if the query succeeded.
    pub fn video_mode(&self, monitor: MonitorHandle) -> Option<VideoMode> {
        unsafe { marshal::video_mode_at(self.api.video_mode(monitor.as_raw())) }
    }

    // --- Gamma ---

    /// Convenience exponent ramp; the native side generates the table.
    pub fn set_gamma(&self, monitor: MonitorHandle, gamma: f32) {
        unsafe { self.api.set_gamma(monitor.as_raw(), gamma) }
    }

    /// Copies the monitor's current ramp out. `None` when the native query
    /// fails or reports a channel size other than 256.
    pub fn gamma_ramp(&self, monitor: MonitorHandle) -> Option<GammaRamp> {
        unsafe { GammaRamp::from_raw(self.api.gamma_ramp(monitor.as_raw())) }
    }

    pub fn set_gamma_ramp(&self, monitor: MonitorHandle, ramp: &GammaRamp) {
        ramp.with_raw(|raw| unsafe { self.api.set_gamma_ramp(monitor.as_raw(), raw) })
    }

    // --- Window hints ---

    /// Resets all pending hints to the native defaults.
    pub fn default_window_hints(&self) {
        self.api.default_window_hints();
    }

    /// Normalizes and forwards one hint for the next window creation.
    pub fn window_hint(&self, hint: WindowHint) {
        let (target, value) = hint.encode();
        self.api.window_hint(target, value);
    }

    // --- Window lifecycle ---

    /// Creates a window (and context, per the pending hints).
    ///
    /// A non-none `monitor` requests fullscreen on that monitor; `share`
    /// names a window whose context objects the new context shares. Returns
    /// the none handle when the native side fails — the diagnostic arrives
    /// through the error callback, not here. `Err` only for a title that
    /// cannot cross the boundary.
    pub fn create_window(
        &self,
        width: i32,
        height: i32,
        title: &str,
        monitor: Option<MonitorHandle>,
        share: Option<WindowHandle>,
    ) -> Result<WindowHandle, Error> {
        let title = CString::new(title)?;
        let monitor = monitor.unwrap_or(MonitorHandle::NONE);
        let share = share.unwrap_or(WindowHandle::NONE);
        let raw = unsafe {
            self.api.create_window(
                width,
                height,
                title.as_ptr(),
                monitor.as_raw(),
                share.as_raw(),
            )
        };
        if raw.is_null() {
            warn!("window creation failed natively; check the error callback");
            return Ok(WindowHandle::NONE);
        }
        // Attach the per-window trampolines up front. Delivery is decided
        // by the process-wide slots, so windows created before a callback
        // was registered still report events afterwards.
        unsafe {
            self.api
                .set_window_pos_callback(raw, Some(callbacks::window_pos_trampoline));
            self.api
                .set_window_size_callback(raw, Some(callbacks::window_size_trampoline));
            self.api
                .set_window_close_callback(raw, Some(callbacks::window_close_trampoline));
            self.api
                .set_key_callback(raw, Some(callbacks::key_trampoline));
        }
        debug!("created window {raw:p} ({width}x{height})");
        Ok(WindowHandle::from_raw(raw))
    }

    /// Applies the configuration's hints (on top of defaults) and creates
    /// the window it describes.
    pub fn create_window_from(&self, config: &WindowConfig) -> Result<WindowHandle, Error> {
        self.default_window_hints();
        for hint in config.hints() {
            self.window_hint(hint);
        }
        self.create_window(config.width, config.height, &config.title, None, None)
    }

    /// Destroys the window. The handle (and any handle equal to it) must
    /// not be used afterwards.
    pub fn destroy_window(&self, window: WindowHandle) {
        debug!("destroying window {:p}", window.as_raw());
        unsafe { self.api.destroy_window(window.as_raw()) }
    }

    pub fn window_should_close(&self, window: WindowHandle) -> bool {
        unsafe { self.api.window_should_close(window.as_raw()) != ffi::FALSE }
    }

    pub fn set_window_should_close(&self, window: WindowHandle, value: bool) {
        let value = if value { ffi::TRUE } else { ffi::FALSE };
        unsafe { self.api.set_window_should_close(window.as_raw(), value) }
    }

    pub fn set_window_title(&self, window: WindowHandle, title: &str) -> Result<(), Error> {
        let title = CString::new(title)?;
        unsafe { self.api.set_window_title(window.as_raw(), title.as_ptr()) };
        Ok(())
    }

    // --- Window geometry ---

    pub fn window_pos(&self, window: WindowHandle) -> (i32, i32) {
        unsafe { self.api.window_pos(window.as_raw()) }
    }

    pub fn set_window_pos(&self, window: WindowHandle, x: i32, y: i32) {
        unsafe { self.api.set_window_pos(window.as_raw(), x, y) }
    }

    pub fn window_size(&self, window: WindowHandle) -> (i32, i32) {
        unsafe { self.api.window_size(window.as_raw()) }
    }

    pub fn set_window_size(&self, window: WindowHandle, width: i32, height: i32) {
        unsafe { self.api.set_window_size(window.as_raw(), width, height) }
    }

    /// Size of the framebuffer in pixels, which may differ from the window
    /// size in screen coordinates.
    pub fn framebuffer_size(&self, window: WindowHandle) -> (i32, i32) {
        unsafe { self.api.framebuffer_size(window.as_raw()) }
    }

    /// Decoration extents as (left, top, right, bottom).
    pub fn window_frame_size(&self, window: WindowHandle) -> (i32, i32, i32, i32) {
        unsafe { self.api.window_frame_size(window.as_raw()) }
    }

    // --- Window state ---

    pub fn iconify_window(&self, window: WindowHandle) {
        unsafe { self.api.iconify_window(window.as_raw()) }
    }

    pub fn restore_window(&self, window: WindowHandle) {
        unsafe { self.api.restore_window(window.as_raw()) }
    }

    pub fn show_window(&self, window: WindowHandle) {
        unsafe { self.api.show_window(window.as_raw()) }
    }

    pub fn hide_window(&self, window: WindowHandle) {
        unsafe { self.api.hide_window(window.as_raw()) }
    }

    /// The fullscreen monitor, or none for a windowed window.
    pub fn window_monitor(&self, window: WindowHandle) -> MonitorHandle {
        MonitorHandle::from_raw(unsafe { self.api.window_monitor(window.as_raw()) })
    }

    pub fn window_attrib(&self, window: WindowHandle, attrib: WindowAttrib) -> bool {
        unsafe { self.api.window_attrib(window.as_raw(), attrib.to_native()) != ffi::FALSE }
    }

    /// Associates an arbitrary caller-owned pointer with the window. The
    /// binding never dereferences it.
    pub fn set_window_user_pointer(&self, window: WindowHandle, pointer: *mut c_void) {
        unsafe { self.api.set_window_user_pointer(window.as_raw(), pointer) }
    }

    pub fn window_user_pointer(&self, window: WindowHandle) -> *mut c_void {
        unsafe { self.api.window_user_pointer(window.as_raw()) }
    }

    // --- Context and presentation ---

    /// Binds the window's context to the calling thread.
    pub fn make_context_current(&self, window: WindowHandle) {
        unsafe { self.api.make_context_current(window.as_raw()) }
    }

    pub fn swap_buffers(&self, window: WindowHandle) {
        unsafe { self.api.swap_buffers(window.as_raw()) }
    }

    // --- Callbacks ---
    //
    // One slot per event kind; a new registration replaces the previous
    // one, and the clear_* twin empties the slot. Callbacks run
    // synchronously on the thread inside `poll_events`.

    pub fn set_error_callback<F>(&mut self, callback: F)
    where
        F: FnMut(ErrorCode, &str) + Send + 'static,
    {
        self.registry.install_error(Some(Box::new(callback)));
        self.api
            .set_error_callback(Some(callbacks::error_trampoline));
    }

    pub fn clear_error_callback(&mut self) {
        self.registry.install_error(None);
        self.api.set_error_callback(None);
    }

    pub fn set_monitor_callback<F>(&mut self, callback: F)
    where
        F: FnMut(MonitorHandle, MonitorEvent) + Send + 'static,
    {
        self.registry.install_monitor(Some(Box::new(callback)));
        self.api
            .set_monitor_callback(Some(callbacks::monitor_trampoline));
    }

    pub fn clear_monitor_callback(&mut self) {
        self.registry.install_monitor(None);
        self.api.set_monitor_callback(None);
    }

    pub fn set_window_pos_callback<F>(&mut self, callback: F)
    where
        F: FnMut(WindowHandle, i32, i32) + Send + 'static,
    {
        self.registry.install_window_pos(Some(Box::new(callback)));
    }

    pub fn clear_window_pos_callback(&mut self) {
        self.registry.install_window_pos(None);
    }

    pub fn set_window_size_callback<F>(&mut self, callback: F)
    where
        F: FnMut(WindowHandle, i32, i32) + Send + 'static,
    {
        self.registry.install_window_size(Some(Box::new(callback)));
    }

    pub fn clear_window_size_callback(&mut self) {
        self.registry.install_window_size(None);
    }

    pub fn set_window_close_callback<F>(&mut self, callback: F)
    where
        F: FnMut(WindowHandle) + Send + 'static,
    {
        self.registry.install_window_close(Some(Box::new(callback)));
    }

    pub fn clear_window_close_callback(&mut self) {
        self.registry.install_window_close(None);
    }

    pub fn set_key_callback<F>(&mut self, callback: F)
    where
        F: FnMut(WindowHandle, Key, i32, KeyAction, Modifiers) + Send + 'static,
    {
        self.registry.install_key(Some(Box::new(callback)));
    }

    pub fn clear_key_callback(&mut self) {
        self.registry.install_key(None);
    }

    // --- Event pump ---

    /// Drains pending native events, dispatching registered callbacks
    /// synchronously on this thread before returning.
    pub fn poll_events(&self) {
        self.api.poll_events();
    }
}

impl<A: NativeApi> Drop for Session<A> {
    fn drop(&mut self) {
        debug!("terminating windowing session");
        self.api.set_error_callback(None);
        self.api.set_monitor_callback(None);
        self.api.terminate();
        // The registry field drops after this body and clears the slots it
        // installed.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callbacks::serial_guard;
    use crate::enums::ClientApi;
    use crate::mock::RecordingApi;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use std::ffi::CString;

    fn session() -> Session<RecordingApi> {
        Session::with_api(RecordingApi::new()).expect("mock init failed")
    }

    fn mode(width: i32, height: i32, refresh: i32) -> VideoMode {
        VideoMode {
            width,
            height,
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            refresh_rate: refresh,
        }
    }

    #[test]
    fn init_failure_surfaces_as_error() {
        let api = RecordingApi::new();
        api.fail_init();
        assert!(matches!(Session::with_api(api), Err(Error::Init)));
    }

    #[test]
    fn version_queries_pass_through() {
        let session = session();
        assert_eq!(session.version(), (3, 1, 0));
        assert_eq!(session.version_string(), "3.1.0 recording mock");
    }

    #[test]
    fn monitor_enumeration_decodes_handles() {
        let session = session();
        assert!(session.monitors().is_empty());
        assert!(session.primary_monitor().is_none());

        let first = session.api().add_monitor("First", &[mode(1920, 1080, 60)]);
        let second = session.api().add_monitor("Second", &[]);

        assert_eq!(session.monitors(), vec![first, second]);
        assert_eq!(session.primary_monitor(), first);
        assert_eq!(session.monitor_name(first), "First");
        assert_eq!(session.monitor_pos(second), (1920, 0));
        assert_eq!(session.monitor_physical_size(first), (510, 290));
    }

    #[test]
    fn video_mode_queries_decode_records() {
        let session = session();
        let monitor = session.api().add_monitor(
            "M",
            &[mode(2560, 1440, 144), mode(1920, 1080, 60), mode(640, 480, 60)],
        );

        let modes = session.video_modes(monitor);
        assert_eq!(modes.len(), 3);
        assert_eq!(modes[0], mode(2560, 1440, 144));
        assert_eq!(modes[2], mode(640, 480, 60));

        assert_eq!(session.video_mode(monitor), Some(mode(2560, 1440, 144)));

        let bare = session.api().add_monitor("Bare", &[]);
        assert!(session.video_modes(bare).is_empty());
        assert_eq!(session.video_mode(bare), None);
    }

    #[test]
    fn gamma_round_trips_through_the_boundary() {
        let session = session();
        let monitor = session.api().add_monitor("M", &[]);

        session.set_gamma(monitor, 2.2);
        assert_eq!(session.api().last_gamma(monitor), Some(2.2));

        assert_eq!(session.gamma_ramp(monitor), None);
        let ramp = GammaRamp::linear();
        session.set_gamma_ramp(monitor, &ramp);
        assert_eq!(session.gamma_ramp(monitor), Some(ramp));
    }

    #[test]
    fn hints_cross_the_boundary_normalized() {
        let session = session();
        session.window_hint(WindowHint::ContextVersionMajor(-1));
        session.window_hint(WindowHint::ContextVersionMinor(-3));
        session.window_hint(WindowHint::DepthBits(-5));
        session.window_hint(WindowHint::Resizable(false));
        session.window_hint(WindowHint::ClientApi(ClientApi::OpenGlEs));
        session.default_window_hints();

        assert_eq!(
            session.api().hint_log(),
            vec![
                (ffi::CONTEXT_VERSION_MAJOR, 1),
                (ffi::CONTEXT_VERSION_MINOR, 0),
                (ffi::DEPTH_BITS, ffi::DONT_CARE),
                (ffi::RESIZABLE, ffi::FALSE),
                (ffi::CLIENT_API, ffi::OPENGL_ES_API),
            ]
        );
        assert!(session.api().calls().contains(&"default_window_hints"));
    }

    #[test]
    fn window_lifecycle_and_should_close() {
        let session = session();
        let window = session
            .create_window(800, 600, "title", None, None)
            .unwrap();
        assert!(!window.is_none());
        assert_eq!(session.api().window_title(window).as_deref(), Some("title"));
        assert_eq!(session.window_size(window), (800, 600));

        assert!(!session.window_should_close(window));
        session.set_window_should_close(window, true);
        assert!(session.window_should_close(window));
        session.set_window_should_close(window, false);
        assert!(!session.window_should_close(window));

        session.destroy_window(window);
        assert!(session.api().is_destroyed(window));
    }

    #[test]
    fn fullscreen_creation_records_the_monitor() {
        let session = session();
        let monitor = session.api().add_monitor("M", &[mode(1920, 1080, 60)]);
        let window = session
            .create_window(1920, 1080, "full", Some(monitor), None)
            .unwrap();
        assert_eq!(session.window_monitor(window), monitor);

        let windowed = session.create_window(640, 480, "w", None, None).unwrap();
        assert!(session.window_monitor(windowed).is_none());
    }

    #[test]
    fn interior_nul_title_is_a_precondition_violation() {
        let session = session();
        let result = session.create_window(800, 600, "bad\0title", None, None);
        assert!(matches!(result, Err(Error::InvalidText(_))));
        // The violation was caught before the boundary.
        assert!(!session.api().calls().contains(&"create_window"));
    }

    #[test]
    fn native_creation_failure_returns_the_none_handle() {
        let session = session();
        session.api().fail_next_window();
        let window = session.create_window(800, 600, "w", None, None).unwrap();
        assert!(window.is_none());
    }

    #[test]
    fn title_and_geometry_forward() {
        let session = session();
        let window = session.create_window(320, 200, "first", None, None).unwrap();

        session.set_window_title(window, "second").unwrap();
        assert_eq!(
            session.api().window_title(window).as_deref(),
            Some("second")
        );
        assert!(session.set_window_title(window, "x\0y").is_err());

        session.set_window_pos(window, 40, 60);
        assert_eq!(session.window_pos(window), (40, 60));
        session.set_window_size(window, 1024, 768);
        assert_eq!(session.window_size(window), (1024, 768));
        assert_eq!(session.framebuffer_size(window), (1024, 768));
        assert_eq!(session.window_frame_size(window), (1, 24, 1, 1));
    }

    #[test]
    fn attribs_reflect_hints_and_state_changes() {
        let session = session();
        session.window_hint(WindowHint::Resizable(false));
        let window = session.create_window(100, 100, "w", None, None).unwrap();

        assert!(!session.window_attrib(window, WindowAttrib::Resizable));
        assert!(session.window_attrib(window, WindowAttrib::Visible));
        assert!(!session.window_attrib(window, WindowAttrib::Iconified));

        session.iconify_window(window);
        assert!(session.window_attrib(window, WindowAttrib::Iconified));
        session.restore_window(window);
        assert!(!session.window_attrib(window, WindowAttrib::Iconified));

        session.hide_window(window);
        assert!(!session.window_attrib(window, WindowAttrib::Visible));
        session.show_window(window);
        assert!(session.window_attrib(window, WindowAttrib::Visible));
    }

    #[test]
    fn user_pointer_round_trips_untouched() {
        let session = session();
        let window = session.create_window(100, 100, "w", None, None).unwrap();
        assert!(session.window_user_pointer(window).is_null());

        let mut payload = 7usize;
        let pointer = &mut payload as *mut usize as *mut c_void;
        session.set_window_user_pointer(window, pointer);
        assert_eq!(session.window_user_pointer(window), pointer);
    }

    #[test]
    fn context_calls_forward() {
        let session = session();
        let window = session.create_window(100, 100, "w", None, None).unwrap();
        session.make_context_current(window);
        session.swap_buffers(window);
        let calls = session.api().calls();
        assert!(calls.contains(&"make_context_current"));
        assert!(calls.contains(&"swap_buffers"));
    }

    #[test]
    fn error_callback_replacement_delivers_to_the_last_only() {
        let _guard = serial_guard();
        let mut session = session();

        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(Mutex::new(Vec::new()));

        let counter = first.clone();
        session.set_error_callback(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let sink = second.clone();
        session.set_error_callback(move |code, description| {
            sink.lock().unwrap().push((code, description.to_owned()));
        });

        session
            .api()
            .queue_error(ErrorCode::ApiUnavailable, "no client API");
        session.poll_events();

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(
            *second.lock().unwrap(),
            vec![(ErrorCode::ApiUnavailable, "no client API".to_owned())]
        );
    }

    #[test]
    fn cleared_error_callback_stops_delivery() {
        let _guard = serial_guard();
        let mut session = session();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        session.set_error_callback(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        session.clear_error_callback();

        session.api().queue_error(ErrorCode::OutOfMemory, "dropped");
        session.poll_events();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unknown_native_error_codes_never_reach_the_callback() {
        let _guard = serial_guard();
        let mut session = session();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        session.set_error_callback(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        session.api().queue_raw_error(0x0001_0042, "from the future");
        session.poll_events();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn monitor_callback_decodes_connection_events() {
        let _guard = serial_guard();
        let mut session = session();
        let monitor = session.api().add_monitor("M", &[]);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        session.set_monitor_callback(move |monitor, event| {
            sink.lock().unwrap().push((monitor, event));
        });

        session
            .api()
            .queue_monitor_event(monitor, MonitorEvent::Disconnected);
        session
            .api()
            .queue_monitor_event(monitor, MonitorEvent::Connected);
        session.poll_events();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (monitor, MonitorEvent::Disconnected),
                (monitor, MonitorEvent::Connected),
            ]
        );
    }

    #[test]
    fn window_callbacks_decode_their_window_and_payload() {
        let _guard = serial_guard();
        let mut session = session();
        let window = session.create_window(100, 100, "w", None, None).unwrap();

        let positions = Arc::new(Mutex::new(Vec::new()));
        let sizes = Arc::new(Mutex::new(Vec::new()));
        let closes = Arc::new(AtomicUsize::new(0));

        let sink = positions.clone();
        session.set_window_pos_callback(move |window, x, y| {
            sink.lock().unwrap().push((window, x, y));
        });
        let sink = sizes.clone();
        session.set_window_size_callback(move |window, width, height| {
            sink.lock().unwrap().push((window, width, height));
        });
        let counter = closes.clone();
        session.set_window_close_callback(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        session.api().queue_window_pos(window, 10, 20);
        session.api().queue_window_size(window, 640, 480);
        session.api().queue_window_close(window);
        session.poll_events();

        assert_eq!(*positions.lock().unwrap(), vec![(window, 10, 20)]);
        assert_eq!(*sizes.lock().unwrap(), vec![(window, 640, 480)]);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn key_callback_receives_decoded_symbols() {
        let _guard = serial_guard();
        let mut session = session();
        let window = session.create_window(100, 100, "w", None, None).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        session.set_key_callback(move |window, key, scancode, action, mods| {
            sink.lock().unwrap().push((window, key, scancode, action, mods));
        });

        session
            .api()
            .queue_key(window, 256, 9, ffi::PRESS, ffi::MOD_CONTROL);
        session.api().queue_key(window, 256, 9, ffi::RELEASE, 0);
        session.poll_events();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (window, Key::Escape, 9, KeyAction::Press, Modifiers::CONTROL),
                (window, Key::Escape, 9, KeyAction::Release, Modifiers::empty()),
            ]
        );
    }

    #[test]
    fn callbacks_registered_before_creation_still_fire() {
        let _guard = serial_guard();
        let mut session = session();

        let sizes = Arc::new(Mutex::new(Vec::new()));
        let sink = sizes.clone();
        session.set_window_size_callback(move |_, width, height| {
            sink.lock().unwrap().push((width, height));
        });

        // The window (and its trampolines) arrive after registration.
        let window = session.create_window(100, 100, "w", None, None).unwrap();
        session.api().queue_window_size(window, 333, 444);
        session.poll_events();

        assert_eq!(*sizes.lock().unwrap(), vec![(333, 444)]);
    }

    #[test]
    fn dropping_the_session_terminates_and_uninstalls() {
        let _guard = serial_guard();
        let api = RecordingApi::new();
        let terminated = api.termination_flag();
        let fired = Arc::new(AtomicUsize::new(0));
        {
            let mut session = Session::with_api(api).unwrap();
            let counter = fired.clone();
            session.set_error_callback(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert!(terminated.load(Ordering::SeqCst));

        // The registry cleared its slot on drop; a stray dispatch from the
        // native side is a no-op.
        let description = CString::new("late").unwrap();
        unsafe { callbacks::error_trampoline(ffi::PLATFORM_ERROR, description.as_ptr()) };
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
