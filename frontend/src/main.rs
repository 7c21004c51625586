mod app_delegation;
mod app_initialized;
mod app_ui;
mod app_uninit;
mod audio;
mod egui_renderer;
mod graphics;

use std::future::Future;

use tracing::info;
use winit::event_loop::EventLoop;

use crate::app_delegation::DelegatedApp;
use crate::app_uninit::App;

/// Drives a setup future off the event-loop thread.
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    std::thread::spawn(move || pollster::block_on(future));
}

fn main() {
    tracing_subscriber::fmt::init();

    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = DelegatedApp::Uninitialized(App::new());

    info!("starting portfolio console");
    event_loop.run_app(&mut app).expect("event loop error");
}
