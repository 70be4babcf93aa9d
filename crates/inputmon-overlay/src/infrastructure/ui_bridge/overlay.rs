//! The overlay window itself.
//!
//! [`OverlayApp`] owns the [`MonitorInputUseCase`] and is the only place it is
//! mutated.  Each frame it drains the event channel, ticks the clear timer,
//! takes an [`OverlayView`] snapshot and draws it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, FontId, RichText};
use inputmon_core::{DisplayContent, IconKind, LockState, Rgb, Segment, TextStyle};
use tokio::sync::watch;
use tracing::{info, warn};

use super::{drain_events, repaint_delay, spawn_event_pump, MAX_EVENTS_PER_FRAME, WINDOW_TITLE};
use crate::application::monitor_input::{MonitorInputUseCase, MonitorSettings, OverlayView};
use crate::infrastructure::icons::{IconImage, IconSet};
use crate::infrastructure::input_capture::{InputSource, RawInputEvent};
use crate::infrastructure::storage::config::{AppConfig, AppearanceConfig};

/// Diameter of a lock-key LED.
const LED_SIZE: f32 = 10.0;

/// Side of the `×` close button hit area.
const CLOSE_BUTTON_SIZE: f32 = 18.0;

fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

/// Resolved colours and font sizes.
#[derive(Debug, Clone, Copy)]
struct Palette {
    background: Color32,
    border: Color32,
    text: Color32,
    input: Color32,
    mouse: Color32,
    selection: Color32,
    led_on: Color32,
    led_off: Color32,
    input_size: f32,
    selection_size: f32,
    small_size: f32,
}

impl From<&AppearanceConfig> for Palette {
    fn from(a: &AppearanceConfig) -> Self {
        Self {
            background: color(a.background),
            border: color(a.border),
            text: color(a.text),
            input: color(a.input),
            mouse: color(a.mouse),
            selection: color(a.selection),
            led_on: color(a.led_on),
            led_off: color(a.led_off),
            input_size: a.input_font_size,
            selection_size: a.selection_font_size,
            small_size: a.small_font_size,
        }
    }
}

pub struct OverlayApp {
    use_case: MonitorInputUseCase,
    events: Option<Receiver<RawInputEvent>>,
    source: Box<dyn InputSource>,
    leds: watch::Receiver<LockState>,
    textures: HashMap<IconKind, egui::TextureHandle>,
    palette: Palette,
    led_poll: Duration,
    running: Arc<AtomicBool>,
    stopped: bool,
}

impl OverlayApp {
    /// Builds the overlay and starts capturing input.
    ///
    /// A capture start failure is logged; the window still opens and shows
    /// LEDs and the static lines.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        source: Box<dyn InputSource>,
        leds: watch::Receiver<LockState>,
        icons: IconSet,
        running: Arc<AtomicBool>,
    ) -> Self {
        let ctx = cc.egui_ctx.clone();
        let events = source
            .start()
            .and_then(|raw| spawn_event_pump(raw, move || ctx.request_repaint()));
        let events = match events {
            Ok(rx) => Some(rx),
            Err(e) => {
                warn!("input capture unavailable: {e}");
                None
            }
        };

        Self {
            use_case: MonitorInputUseCase::new(MonitorSettings::from(config)),
            events,
            source,
            leds,
            textures: upload_icons(&cc.egui_ctx, &icons),
            palette: Palette::from(&config.appearance),
            led_poll: config.timing.led_poll_interval(),
            running,
            stopped: false,
        }
    }

    /// Stops the input source and signals every background thread to exit.
    fn shutdown(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.source.stop();
        self.running.store(false, Ordering::Relaxed);
        info!("overlay closed");
    }

    fn pump_events(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.events else {
            return;
        };
        let (applied, disconnected) = drain_events(rx, &mut self.use_case, MAX_EVENTS_PER_FRAME);
        if disconnected {
            warn!("input capture ended; live input will no longer update");
            self.events = None;
        } else if applied == MAX_EVENTS_PER_FRAME {
            ctx.request_repaint();
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    /// Draws one frame.  Returns `true` when the close button was clicked.
    fn draw(&self, ctx: &egui::Context, view: &OverlayView, leds: LockState) -> bool {
        let p = self.palette;
        let frame = egui::Frame::default()
            .fill(p.background)
            .stroke(egui::Stroke::new(1.0, p.border))
            .inner_margin(8.0);

        let mut close = false;
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            // Registered first so every widget drawn later sits above it.
            let background = ui.interact(
                ui.max_rect(),
                ui.id().with("drag-area"),
                egui::Sense::click_and_drag(),
            );
            if background.drag_started() {
                ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
            }

            close = self.draw_close_button(ui);

            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(WINDOW_TITLE)
                        .font(FontId::proportional(p.small_size))
                        .strong()
                        .color(p.text),
                );
                ui.add_space(4.0);
                self.draw_input_line(ui, view.content.as_ref());
            });

            ui.add_space(2.0);
            ui.label(
                RichText::new(&view.pointer_line)
                    .font(FontId::monospace(p.small_size))
                    .color(p.mouse),
            );
            ui.label(
                RichText::new(&view.selection_line)
                    .font(FontId::monospace(p.small_size))
                    .color(p.selection),
            );
            ui.add_space(4.0);
            ui.vertical_centered(|ui| self.draw_leds(ui, leds));
        });
        close
    }

    fn draw_close_button(&self, ui: &mut egui::Ui) -> bool {
        let corner = ui.max_rect().right_top();
        let rect = egui::Rect::from_min_size(
            egui::pos2(corner.x - CLOSE_BUTTON_SIZE, corner.y),
            egui::vec2(CLOSE_BUTTON_SIZE, CLOSE_BUTTON_SIZE),
        );
        let button = egui::Button::new(
            RichText::new("×")
                .font(FontId::proportional(self.palette.small_size + 4.0))
                .color(self.palette.text),
        )
        .frame(false);
        ui.put(rect, button).clicked()
    }

    fn draw_input_line(&self, ui: &mut egui::Ui, content: Option<&DisplayContent>) {
        let p = self.palette;
        let Some(content) = content else {
            // Keep the row height stable while nothing is shown.
            ui.label(RichText::new(" ").font(FontId::monospace(p.input_size)));
            return;
        };
        let size = match content.style {
            TextStyle::Input => p.input_size,
            TextStyle::Selection => p.selection_size,
        };

        ui.horizontal_wrapped(|ui| {
            for segment in content.segments() {
                match segment {
                    Segment::Text(text) => {
                        ui.label(RichText::new(text).font(FontId::monospace(size)).color(p.input));
                    }
                    Segment::Icon(kind) => {
                        if let Some(texture) = self.textures.get(&kind) {
                            ui.add(egui::Image::new(egui::load::SizedTexture::from_handle(
                                texture,
                            )));
                        }
                    }
                }
            }
        });
    }

    fn draw_leds(&self, ui: &mut egui::Ui, leds: LockState) {
        let p = self.palette;
        ui.horizontal(|ui| {
            for (name, on) in [("Num", leds.num), ("Caps", leds.caps), ("Scroll", leds.scroll)] {
                ui.vertical(|ui| {
                    let (rect, _) = ui.allocate_exact_size(
                        egui::vec2(LED_SIZE, LED_SIZE),
                        egui::Sense::hover(),
                    );
                    let fill = if on { p.led_on } else { p.led_off };
                    ui.painter().circle_filled(rect.center(), LED_SIZE / 2.0 - 1.0, fill);
                    ui.label(
                        RichText::new(name)
                            .font(FontId::proportional(p.small_size - 2.0))
                            .color(p.text),
                    );
                });
                ui.add_space(8.0);
            }
        });
    }
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.running.load(Ordering::Relaxed) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if ctx.input(|i| i.viewport().close_requested()) {
            self.shutdown();
        }

        self.pump_events(ctx);
        let now = Instant::now();
        self.use_case.tick(now);

        let view = self.use_case.view();
        let leds = *self.leds.borrow_and_update();
        if self.draw(ctx, &view, leds) {
            self.shutdown();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // LED changes and Ctrl-C do not wake the UI, so poll at the LED rate.
        let wake = repaint_delay(self.use_case.next_deadline(), now)
            .map_or(self.led_poll, |d| d.min(self.led_poll));
        ctx.request_repaint_after(wake);
    }
}

fn upload_icons(ctx: &egui::Context, icons: &IconSet) -> HashMap<IconKind, egui::TextureHandle> {
    [
        IconKind::Win,
        IconKind::MouseLeft,
        IconKind::MouseRight,
        IconKind::MouseMiddle,
    ]
    .into_iter()
    .filter_map(|kind| {
        let icon = icons.get(kind)?;
        Some((kind, ctx.load_texture(format!("{kind:?}"), color_image(icon), Default::default())))
    })
    .collect()
}

fn color_image(icon: &IconImage) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [icon.width as usize, icon.height as usize],
        &icon.rgba,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_from_default_appearance() {
        let palette = Palette::from(&AppearanceConfig::default());
        assert_eq!(palette.background, Color32::from_rgb(0x2b, 0x2b, 0x2b));
        assert_eq!(palette.input, Color32::from_rgb(0x00, 0xff, 0x00));
        assert_eq!(palette.led_off, Color32::from_rgb(0x1a, 0x1a, 0x1a));
        assert_eq!(palette.input_size, 20.0);
    }

    #[test]
    fn test_color_image_keeps_dimensions() {
        let icon = IconImage {
            width: 2,
            height: 3,
            rgba: vec![255; 2 * 3 * 4],
        };
        let image = color_image(&icon);
        assert_eq!(image.size, [2, 3]);
        assert_eq!(image.pixels.len(), 6);
    }
}
