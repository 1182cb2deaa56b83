// ui.rs - egui front end: controls, the grid texture and statistics

use std::time::{Duration, Instant};

use eframe::egui;
use egui::{Color32, Rect, Vec2, pos2};
use life_engine::{PATTERNS, Preset};

use crate::app::LifeApp;
use crate::render;

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-update if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.update_generation();
            self.last_update = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Life Sim");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.last_update = Instant::now();
                    }
                }

                if ui.button("⏭ Step").clicked() {
                    self.is_running = false;
                    self.update_generation();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.is_running = false;
                    self.clear_grid();
                }

                if ui.button("🎲 Random").clicked() {
                    self.is_running = false;
                    self.randomize();
                }

                ui.separator();

                ui.label("Rule:");
                let preset_text = self.selected_preset.map_or("Custom", |i| Preset::ALL[i].name());
                let mut choice = self.selected_preset;
                egui::ComboBox::from_id_source("preset_selector")
                    .selected_text(preset_text)
                    .show_ui(ui, |ui| {
                        for (i, preset) in Preset::ALL.iter().enumerate() {
                            ui.selectable_value(&mut choice, Some(i), preset.name());
                        }
                    });
                if choice != self.selected_preset {
                    if let Some(index) = choice {
                        self.switch_preset(index);
                    }
                }

                ui.separator();
                ui.label(format!("Generation: {}", self.engine().generation()));
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.is_running = false;
                    self.apply_selected_pattern();
                }

                ui.separator();

                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                let before = (self.live_color, self.dead_color);
                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
                if before != (self.live_color, self.dead_color) {
                    self.texture_stale = true;
                }
            });

            if let Some(status) = &self.status {
                ui.colored_label(Color32::YELLOW, status);
            }

            ui.separator();

            if self.texture_stale || self.texture.is_none() {
                let image = render::to_color_image(self.engine().sample(), self.dead_color, self.live_color);
                match &mut self.texture {
                    Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                    None => {
                        self.texture = Some(ctx.load_texture("life_grid", image, egui::TextureOptions::NEAREST));
                    }
                }
                self.texture_stale = false;
            }

            let (width, height) = (self.engine().width(), self.engine().height());
            let total_size = Vec2::new(width as f32, height as f32) * self.scale;
            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

            if let Some(texture) = &self.texture {
                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                painter.image(texture.id(), response.rect, uv, Color32::WHITE);
            }

            // Handle clicking (only when not running)
            if !self.is_running && response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let local = (pos - response.rect.min) / self.scale;
                    if local.x >= 0.0 && local.y >= 0.0 {
                        self.toggle_cell(local.x as usize, local.y as usize);
                    }
                }
            }

            ui.separator();

            let cells = (width * height) as f32;
            let population = self.engine().population();
            ui.horizontal(|ui| {
                ui.label(format!("Aliveness: {population:.1}"));
                ui.label(format!("Mean: {:.1}%", population / cells * 100.0));
                ui.label(format!("Grid: {width}x{height}"));
            });
        });

        // Request repaint if running to keep animation smooth
        if self.is_running {
            ctx.request_repaint();
        }
    }
}
