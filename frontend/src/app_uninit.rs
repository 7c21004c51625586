use std::sync::{mpsc, Arc};
use std::time::Instant;

use tracing::info;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowAttributes, WindowId};

use folio_core::console::Console;
use folio_core::prefs::PrefStore;

use crate::app_delegation::InstantClock;
use crate::app_initialized::AppInitialized;
use crate::app_ui::game_scene::{SCENE_HEIGHT, SCENE_WIDTH};
use crate::egui_renderer::EguiRenderer;
use crate::graphics::GraphicsContext;

pub struct App {
    pub console: Option<Console<InstantClock>>,
    pub prefs: Option<PrefStore>,
    pub gc: Option<GraphicsContext>,
    pub window: Option<Arc<Window>>,
    pub egui_renderer: Option<EguiRenderer>,

    pub app_initialized: Option<AppInitialized>,

    pub gc_tx: mpsc::Sender<GraphicsContext>,
    pub gc_rx: mpsc::Receiver<GraphicsContext>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        // preferences are read once, here at mount
        let prefs = PrefStore::open(PrefStore::default_path());
        let clock = InstantClock {
            instant: Instant::now(),
        };
        let console = Console::new(clock, prefs.boot_skipped());

        Self {
            console: Some(console),
            prefs: Some(prefs),
            gc: None,
            window: None,
            egui_renderer: None,
            app_initialized: None,
            gc_tx: tx,
            gc_rx: rx,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) {
        info!("initializing...");
        let window_attributes = WindowAttributes::default()
            .with_title("Portfolio")
            .with_inner_size(LogicalSize::new(SCENE_WIDTH, SCENE_HEIGHT))
            .with_min_inner_size(LogicalSize::new(SCENE_WIDTH / 2, SCENE_HEIGHT / 2));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .expect("failed to create window"),
        );
        self.window = Some(window.clone());

        let window_clone = window.clone();
        let tx_clone = self.gc_tx.clone();
        crate::spawn(async move {
            let gc = GraphicsContext::new(window_clone).await;
            tx_clone.send(gc).expect("couldn't send graphics context");
        });

        self.try_graphics_context();

        info!("initialized");
    }

    fn try_graphics_context(&mut self) {
        if let Some(window) = self.window.as_ref() {
            if let Ok(gc) = self.gc_rx.try_recv() {
                let fmt = gc.surface_config.format;
                self.egui_renderer = Some(EguiRenderer::new(&gc.device, fmt, None, 1, window));
                self.gc = Some(gc);
                info!("graphics context ready");
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            // keep the loop spinning until the graphics context lands
            event_loop.set_control_flow(ControlFlow::Poll);
            self.init_window(event_loop);
        }
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, _: WindowEvent) {
        if self.gc.is_none() {
            self.try_graphics_context();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.gc.is_none() {
            self.try_graphics_context();
            return;
        }

        if self.egui_renderer.is_some() && self.window.is_some() && self.console.is_some() {
            info!("app initialized");
            event_loop.set_control_flow(ControlFlow::Wait);
            let app_init = AppInitialized::from(&mut *self);
            app_init.window.request_redraw();
            self.app_initialized = Some(app_init);
        }
    }
}
