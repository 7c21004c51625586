use egui::{Align, Color32, Frame, Layout, Margin, RichText, Stroke, Ui};

use folio_core::boot::Phase;
use folio_core::console::Console;
use folio_core::inputs::InputCommand;

use crate::app_delegation::InstantClock;

const CRT_GREEN: Color32 = Color32::from_rgb(51, 255, 102);
const CRT_DIM: Color32 = Color32::from_rgb(31, 122, 63);
const CRT_FADED: Color32 = Color32::from_rgb(140, 200, 160);

/// The boot/start page: header controls, the transcript panel, and the
/// press-start footer. Button and key actions bubble up as `InputCommand`s;
/// the app owns the preference store and the navigation.
pub struct ConsolePage {
    pub console: Console<InstantClock>,
}

impl ConsolePage {
    pub fn new(console: Console<InstantClock>) -> Self {
        Self { console }
    }

    pub fn draw(&mut self, ui: &mut Ui, audio_on: bool) -> Option<InputCommand> {
        self.console.process_boot();

        let mut action = None;

        ui.horizontal(|ui| {
            ui.label(RichText::new("PORTFOLIO SYSTEM").monospace().color(CRT_FADED));
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button(RichText::new("Replay").monospace()).clicked() {
                    action = Some(InputCommand::ReplayBoot);
                }
                let audio_label = if audio_on { "Audio: ON" } else { "Audio: OFF" };
                if ui.button(RichText::new(audio_label).monospace()).clicked() {
                    action = Some(InputCommand::ToggleAudio);
                }
            });
        });

        ui.add_space(16.0);

        Frame {
            stroke: Stroke::new(1.0, CRT_DIM),
            inner_margin: Margin::same(14),
            ..Default::default()
        }
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            for line in &self.console.transcript {
                ui.label(RichText::new(*line).monospace().color(CRT_GREEN));
            }
            if self.console.phase == Phase::Booting {
                // blinking cursor line while the script reveals
                let t = ui.input(|i| i.time);
                let alpha = (128.0 + 100.0 * (t * std::f64::consts::TAU).sin()) as u8;
                let cursor = Color32::from_rgba_unmultiplied(
                    CRT_GREEN.r(),
                    CRT_GREEN.g(),
                    CRT_GREEN.b(),
                    alpha,
                );
                ui.label(RichText::new("...").monospace().color(cursor));
            }
        });

        ui.with_layout(Layout::bottom_up(Align::Center), |ui| {
            ui.add_space(24.0);
            match self.console.phase {
                Phase::Ready => {
                    ui.label(
                        RichText::new("Tip: after the first run, boot will auto-skip.")
                            .monospace()
                            .small()
                            .color(CRT_DIM),
                    );
                    ui.add_space(10.0);
                    if ui
                        .button(RichText::new("  START  ").monospace().color(CRT_GREEN))
                        .clicked()
                    {
                        action = Some(InputCommand::Start);
                    }
                    ui.add_space(10.0);
                    ui.label(
                        RichText::new("PRESS ENTER / SPACE TO START")
                            .monospace()
                            .color(CRT_GREEN),
                    );
                }
                Phase::Booting => {
                    ui.label(RichText::new("Booting...").monospace().small().color(CRT_DIM));
                }
            }
        });

        action
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn ready_page() -> ConsolePage {
        let clock = InstantClock {
            instant: Instant::now(),
        };
        ConsolePage::new(Console::new(clock, true))
    }

    #[test]
    fn draws_a_ready_console_without_actions() {
        let ctx = egui::Context::default();
        let mut page = ready_page();

        let _ = ctx.run(Default::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let action = page.draw(ui, true);
                assert_eq!(action, None);
            });
        });

        assert_eq!(page.console.phase, Phase::Ready);
        assert_eq!(page.console.transcript.len(), page.console.script().len());
    }

    #[test]
    fn booting_page_keeps_revealing_across_frames() {
        let clock = InstantClock {
            instant: Instant::now(),
        };
        let mut page = ConsolePage::new(Console::new(clock, false));

        let ctx = egui::Context::default();
        let _ = ctx.run(Default::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let _ = page.draw(ui, true);
            });
        });

        // the first line is due immediately, the rest are still pending
        assert_eq!(page.console.phase, Phase::Booting);
        assert_eq!(page.console.transcript.len(), 1);
    }
}
