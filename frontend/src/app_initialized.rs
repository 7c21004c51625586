use std::collections::HashMap;
use std::sync::Arc;

use egui::{Color32, Margin};
use egui_wgpu::ScreenDescriptor;
use tracing::{info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use folio_core::boot::Phase;
use folio_core::inputs::{InputCommand, KeyState};
use folio_core::prefs::PrefStore;

use crate::app_ui::console_page::ConsolePage;
use crate::app_ui::game_scene::GameScene;
use crate::app_uninit::App;
use crate::audio;
use crate::egui_renderer::EguiRenderer;
use crate::graphics::GraphicsContext;

pub enum View {
    Console(ConsolePage),
    Game(GameScene),
}

pub struct AppInitialized {
    pub gc: GraphicsContext,
    pub window: Arc<Window>,
    pub egui_renderer: EguiRenderer,
    pub prefs: PrefStore,

    view: View,

    input_bindings: HashMap<Key, InputCommand>,
    input_state: HashMap<InputCommand, KeyState>,
}

fn default_bindings() -> HashMap<Key, InputCommand> {
    let mut bindings = HashMap::new();
    bindings.insert(Key::Named(NamedKey::Enter), InputCommand::Start);
    bindings.insert(Key::Named(NamedKey::Space), InputCommand::Start);
    bindings
}

impl From<&mut App> for AppInitialized {
    fn from(app: &mut App) -> Self {
        let console = app.console.take().unwrap();
        let prefs = app.prefs.take().unwrap();
        let gc = app.gc.take().unwrap();
        let window = app.window.take().unwrap();
        let egui_renderer = app.egui_renderer.take().unwrap();

        Self {
            gc,
            window,
            egui_renderer,
            prefs,
            view: View::Console(ConsolePage::new(console)),
            input_bindings: default_bindings(),
            input_state: HashMap::new(),
        }
    }
}

impl AppInitialized {
    fn handle_redraw(&mut self) {
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [self.gc.surface_config.width, self.gc.surface_config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let surface_texture = match self.gc.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                self.gc
                    .surface
                    .configure(&self.gc.device, &self.gc.surface_config);
                return;
            }
            Err(err) => {
                warn!("skipping frame: {err}");
                return;
            }
        };

        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gc
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        self.egui_renderer.begin_frame(&self.window);

        let inner_margin = match self.view {
            View::Console(_) => Margin::symmetric(24, 24),
            View::Game(_) => Margin::same(0),
        };
        let frame = egui::Frame {
            inner_margin,
            outer_margin: Margin::same(0),
            fill: Color32::BLACK,
            ..Default::default()
        };

        let ctx = self.egui_renderer.context().clone();
        let audio_on = self.prefs.audio_on();
        let mut action = None;

        egui::CentralPanel::default()
            .frame(frame)
            .show(&ctx, |ui| match &mut self.view {
                View::Console(page) => action = page.draw(ui, audio_on),
                View::Game(scene) => scene.draw(ui),
            });

        self.egui_renderer.end_frame_and_draw(
            &self.gc.device,
            &self.gc.queue,
            &mut encoder,
            &self.window,
            &surface_view,
            screen_descriptor,
        );

        self.gc.queue.submit(Some(encoder.finish()));
        surface_texture.present();

        if let Some(cmd) = action {
            self.dispatch(cmd);
        }
    }

    fn handle_resized(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.gc.surface_config.width = width;
        self.gc.surface_config.height = height;
        self.gc
            .surface
            .configure(&self.gc.device, &self.gc.surface_config);
    }

    // Keys are read straight off the window event stream, before any widget
    // gets a chance to swallow them.
    fn handle_key(&mut self, logical_key: Key, pressed: bool) {
        let Some(&cmd) = self.input_bindings.get(&logical_key) else {
            return;
        };
        let next = match self.input_state.get(&cmd) {
            Some(state) => state.update_state(pressed),
            None => KeyState::new(pressed),
        };
        self.input_state.insert(cmd, next);
        if next.is_just_pressed() {
            self.dispatch(cmd);
        }
    }

    fn dispatch(&mut self, cmd: InputCommand) {
        match cmd {
            InputCommand::Start => self.start_game(),
            InputCommand::ToggleAudio => self.toggle_audio(),
            InputCommand::ReplayBoot => self.replay_boot(),
        }
    }

    /// The one-way transition into the game shell: beep (best effort),
    /// remember to skip the boot next time, swap the view.
    fn start_game(&mut self) {
        let View::Console(page) = &self.view else {
            return;
        };
        if page.console.phase != Phase::Ready {
            return;
        }

        audio::play_beep(self.prefs.audio_on());
        if let Err(err) = self.prefs.set_boot_skipped(true) {
            warn!("couldn't persist boot skip: {err:#}");
        }

        let mut scene = GameScene::new();
        scene.mount(self.egui_renderer.context());
        info!("entering game shell");
        self.view = View::Game(scene);
    }

    fn toggle_audio(&mut self) {
        let on = !self.prefs.audio_on();
        if let Err(err) = self.prefs.set_audio_on(on) {
            warn!("couldn't persist audio preference: {err:#}");
        }
        info!("audio {}", if on { "on" } else { "off" });
    }

    fn replay_boot(&mut self) {
        if let View::Console(page) = &mut self.view {
            if let Err(err) = self.prefs.set_boot_skipped(false) {
                warn!("couldn't clear boot skip: {err:#}");
            }
            page.console.replay();
        }
    }
}

impl ApplicationHandler for AppInitialized {
    fn resumed(&mut self, _: &ActiveEventLoop) {}

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        self.egui_renderer.handle_input(&self.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                info!("close requested; stopping");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.handle_redraw();
                self.window.request_redraw();
            }
            WindowEvent::Resized(new_size) => {
                self.handle_resized(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let KeyEvent {
                    logical_key, state, ..
                } = event;
                self.handle_key(logical_key, state == ElementState::Pressed);
            }
            _ => (),
        }
    }

    fn exiting(&mut self, _: &ActiveEventLoop) {
        if let View::Game(scene) = &mut self.view {
            if scene.is_mounted() {
                scene.unmount();
            }
        }
        info!("shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_space_both_map_to_start() {
        let bindings = default_bindings();
        assert_eq!(
            bindings.get(&Key::Named(NamedKey::Enter)),
            Some(&InputCommand::Start)
        );
        assert_eq!(
            bindings.get(&Key::Named(NamedKey::Space)),
            Some(&InputCommand::Start)
        );
        assert_eq!(bindings.len(), 2);
    }
}
