use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, StartCause, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use folio_core::boot::TimeDaemon;

use crate::app_initialized::AppInitialized;
use crate::app_uninit::App;

pub struct InstantClock {
    pub instant: Instant,
}

impl TimeDaemon for InstantClock {
    fn get_now_ms(&self) -> f64 {
        self.instant.elapsed().as_millis() as f64
    }
}

/// The app before and after GPU setup. Winit hands every callback to this
/// enum; once the uninitialized half has produced an `AppInitialized`, the
/// delegate swaps itself over and stays there.
pub enum DelegatedApp {
    Uninitialized(App),
    Initialized(AppInitialized),
}

impl ApplicationHandler for DelegatedApp {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        match self {
            DelegatedApp::Uninitialized(app) => app.new_events(event_loop, cause),
            DelegatedApp::Initialized(app) => app.new_events(event_loop, cause),
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        match self {
            DelegatedApp::Uninitialized(app) => app.resumed(event_loop),
            DelegatedApp::Initialized(app) => app.resumed(event_loop),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        match self {
            DelegatedApp::Uninitialized(app) => app.window_event(event_loop, window_id, event),
            DelegatedApp::Initialized(app) => app.window_event(event_loop, window_id, event),
        }
    }

    fn device_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        device_id: DeviceId,
        event: DeviceEvent,
    ) {
        match self {
            DelegatedApp::Uninitialized(app) => app.device_event(event_loop, device_id, event),
            DelegatedApp::Initialized(app) => app.device_event(event_loop, device_id, event),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        match self {
            DelegatedApp::Uninitialized(app) => {
                app.about_to_wait(event_loop);

                if let Some(app_initialized) = app.app_initialized.take() {
                    *self = DelegatedApp::Initialized(app_initialized);
                }
            }
            DelegatedApp::Initialized(app) => app.about_to_wait(event_loop),
        }
    }

    fn suspended(&mut self, event_loop: &ActiveEventLoop) {
        match self {
            DelegatedApp::Uninitialized(app) => app.suspended(event_loop),
            DelegatedApp::Initialized(app) => app.suspended(event_loop),
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        match self {
            DelegatedApp::Uninitialized(app) => app.exiting(event_loop),
            DelegatedApp::Initialized(app) => app.exiting(event_loop),
        }
    }
}
