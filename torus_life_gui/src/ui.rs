// ui.rs - Frame loop, control panel and board canvas

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::Instant;
use torus_life::config::{CELL_SIZE_RANGE, TICK_RATE_RANGE};
use torus_life::{Rgb, StabilityTag, patterns};
use tracing::info;

use crate::LifeApp;

fn color(rgb: Rgb) -> Color32 {
    let [r, g, b] = rgb.0;
    Color32::from_rgb(r, g, b)
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-update if running
        if self.host.tick_due(Instant::now()) {
            self.update_generation();
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.playback_controls(ui);
            ui.separator();
            self.rule_controls(ui);
            ui.separator();
            self.display_controls(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("statistics").show(ctx, |ui| {
            self.statistics(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::WHITE))
            .show(ctx, |ui| {
                self.fit_canvas(ui.available_size());
                self.board_canvas(ui);
            });

        if self.host.in_gesture() {
            ctx.request_repaint();
        } else if self.host.is_running() {
            ctx.request_repaint_after(self.host.time_until_tick(Instant::now()));
        }
    }
}

impl LifeApp {
    fn playback_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let paused = self.host.is_paused();
            let button_text = if paused { "▶ Continue" } else { "⏸ Stop" };
            if ui.button(button_text).clicked() {
                if paused {
                    self.host.resume(Instant::now());
                } else {
                    self.host.stop();
                }
            }

            if ui.add_enabled(paused, egui::Button::new("⏭ Step")).clicked() {
                self.update_generation();
            }

            if ui.button("🎲 Reset").clicked() {
                self.reset();
            }

            if ui.button("⏹ Clear").clicked() {
                self.state.clear();
            }

            ui.separator();

            // Pattern dropdown
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                self.apply_selected_pattern();
            }

            ui.separator();

            // Speed control
            ui.label("Speed:");
            let mut tick_rate = self.host.tick_rate();
            if ui
                .add(egui::Slider::new(&mut tick_rate, TICK_RATE_RANGE).suffix(" gen/sec"))
                .changed()
            {
                self.config.tick_rate = tick_rate;
                self.host.set_tick_rate(tick_rate);
            }

            ui.label("Cell size:");
            if ui
                .add(egui::Slider::new(&mut self.config.cell_size, CELL_SIZE_RANGE).suffix(" px"))
                .changed()
            {
                info!(cell_size = self.config.cell_size, "cell size changed");
                self.refit_pending = true;
            }
        });
    }

    fn rule_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut changed = false;

            ui.label("Die below:");
            changed |= ui
                .add(egui::TextEdit::singleline(&mut self.config.survival_lower).desired_width(60.0))
                .changed();

            ui.label("Die above:");
            changed |= ui
                .add(egui::TextEdit::singleline(&mut self.config.survival_upper).desired_width(60.0))
                .changed();

            ui.label("Born on:");
            changed |= ui
                .add(egui::TextEdit::singleline(&mut self.config.reproduction).desired_width(80.0))
                .changed();

            if changed {
                self.state.apply_rule_text(&self.config);
            }

            let rules = self.state.rules();
            let ignored = rules.diagnostics().count();
            let tokens = [&rules.survival_lower, &rules.survival_upper, &rules.reproduction]
                .iter()
                .map(|list| list.token_count())
                .sum::<usize>();
            if ignored > 0 {
                ui.colored_label(
                    Color32::from_rgb(200, 120, 0),
                    format!("{ignored} of {tokens} token(s) ignored"),
                );
            }
        });
    }

    fn display_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Alive:");
            ui.color_edit_button_srgb(&mut self.config.alive_color.0);
            ui.label("Stable:");
            ui.add_enabled_ui(self.config.stable_highlight, |ui| {
                ui.color_edit_button_srgb(&mut self.config.stable_color.0);
            });
            ui.label("Edge:");
            ui.color_edit_button_srgb(&mut self.config.edge_color.0);
            ui.checkbox(&mut self.config.stable_highlight, "Highlight stable cells");
        });
    }

    fn statistics(&self, ui: &mut egui::Ui) {
        let (columns, rows) = self.state.dimensions();
        let total = columns * rows;
        let live_cells = self.state.board().population();
        let report = self.state.last_report();

        ui.horizontal(|ui| {
            ui.label(format!("Generation: {}", self.state.generation()));
            ui.label(format!("Speed: {} gen/sec", self.host.tick_rate()));
            ui.separator();
            ui.label(format!("Board: {columns}x{rows}"));
            ui.label(format!("Live cells: {live_cells}"));
            ui.label(format!("Population: {:.1}%", live_cells as f32 / total as f32 * 100.0));
            ui.separator();
            ui.label(format!("Births: {}", report.births));
            ui.label(format!("Deaths: {}", report.deaths));
            ui.label(format!("Stable: {}", self.state.stability().stable_count()));
        });
    }

    fn board_canvas(&mut self, ui: &mut egui::Ui) {
        let unit = self.state.interaction().unit_length();
        let (columns, rows) = self.state.dimensions();
        let total_size = Vec2::new(unit * columns as f32, unit * rows as f32);

        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click_and_drag());
        let origin = response.rect.min;

        // Press starts a paint gesture and suspends ticking until release
        let (pressed, down, released, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });
        if pressed && pointer.is_some_and(|pos| response.rect.contains(pos)) {
            self.host.begin_gesture();
        }
        if self.host.in_gesture() && (down || pressed) {
            if let Some(pos) = pointer {
                let local = pos - origin;
                self.state.paint_at(local.x, local.y);
            }
        }
        if released {
            self.host.end_gesture(Instant::now());
        }

        let edge = Stroke::new(1.0, color(self.config.edge_color));
        let board = self.state.board();
        let stability = self.state.stability();
        for y in 0..rows {
            for x in 0..columns {
                let rect = Rect::from_min_size(
                    origin + Vec2::new(x as f32 * unit, y as f32 * unit),
                    Vec2::splat(unit),
                );

                let fill = if board.is_alive(x, y) {
                    let stable = stability.tag(x, y) == StabilityTag::AliveStable;
                    color(self.config.alive_fill(stable))
                } else {
                    Color32::WHITE
                };

                painter.rect_filled(rect, 0.0, fill);
                painter.rect_stroke(rect, 0.0, edge);
            }
        }
    }
}
