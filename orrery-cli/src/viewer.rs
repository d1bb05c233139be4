//! Interactive viewer for orrery scenarios
//!
//! Draws every body on a fixed ±2.2 AU canvas over a sprinkled star field and
//! advances the simulation a configurable number of steps per frame.

use eframe::egui;
use glam::DVec2;
use orrery_core::{format_sim_error, get_body_states, step_simulation, Rgb, SimulationContext};
use rand::Rng;
use std::collections::VecDeque;

/// Half-width of the visible region in AU
const VIEW_EXTENT: f32 = 2.2;
const STAR_COUNT: usize = 37;
const MAX_TRAIL_POINTS: usize = 4000;

pub struct ViewerApp {
    ctx: SimulationContext,
    playing: bool,
    speed_multiplier: f32,
    stars: Vec<egui::Vec2>,
    trails: Vec<Trail>,
    last_error: Option<String>,
}

impl ViewerApp {
    pub fn new(ctx: SimulationContext, _cc: &eframe::CreationContext<'_>) -> Self {
        let mut rng = rand::thread_rng();
        let stars = (0..STAR_COUNT)
            .map(|_| {
                egui::vec2(
                    rng.gen_range(-VIEW_EXTENT..VIEW_EXTENT),
                    rng.gen_range(-VIEW_EXTENT..VIEW_EXTENT),
                )
            })
            .collect();

        let mut app = Self {
            ctx,
            playing: true,
            speed_multiplier: 1.0,
            stars,
            trails: Vec::new(),
            last_error: None,
        };
        app.reset_trails();
        app
    }

    fn reset_trails(&mut self) {
        self.trails = get_body_states(&self.ctx)
            .iter()
            .map(|s| Trail::starting_at(s.pos_au))
            .collect();
    }

    fn reset(&mut self) {
        self.ctx.reset();
        self.last_error = None;
        self.playing = false;
        self.reset_trails();
    }

    /// Advance one tick and record the new positions. Returns `true` when the
    /// run should stop, either finished or failed.
    fn advance(&mut self) -> bool {
        if self.ctx.is_finished() || self.last_error.is_some() {
            return true;
        }
        match step_simulation(&mut self.ctx) {
            Ok(finished) => {
                for (trail, state) in self.trails.iter_mut().zip(get_body_states(&self.ctx)) {
                    trail.push(state.pos_au);
                }
                finished
            }
            Err(e) => {
                log::warn!("simulation halted at step {}: {}", self.ctx.current_step, e);
                self.last_error = Some(format_sim_error(&e));
                true
            }
        }
    }
}

/// Recent positions of one body in AU, oldest first, capped at `capacity`
struct Trail {
    points: VecDeque<DVec2>,
    capacity: usize,
}

impl Trail {
    fn with_capacity(start: DVec2, capacity: usize) -> Self {
        let mut points = VecDeque::with_capacity(capacity);
        points.push_back(start);
        Self { points, capacity }
    }

    fn starting_at(start: DVec2) -> Self {
        Self::with_capacity(start, MAX_TRAIL_POINTS)
    }

    fn push(&mut self, p: DVec2) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(p);
    }

    fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.points.iter().copied()
    }
}

fn color32(c: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(c.0, c.1, c.2)
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let states = get_body_states(&self.ctx);

        // Top bar with controls
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                    self.playing = !self.playing;
                }

                if ui.button("⏮ Reset").clicked() {
                    self.reset();
                }

                if ui.button("⏭ Step").clicked() {
                    self.advance();
                }

                ui.separator();

                ui.label("Speed:");
                ui.add(egui::Slider::new(&mut self.speed_multiplier, 0.1..=10.0));

                ui.separator();

                ui.label(format!(
                    "Step: {} / {}  ({:.0} days)",
                    self.ctx.current_step,
                    self.ctx.max_steps,
                    self.ctx.elapsed_seconds() / orrery_core::DAY
                ));
            });

            // Legend
            ui.horizontal_wrapped(|ui| {
                for state in &states {
                    ui.label(egui::RichText::new("●").color(color32(state.color)));
                    ui.label(state.name.as_str());
                    ui.add_space(12.0);
                }
            });
        });

        if let Some(ref error) = self.last_error {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.label(egui::RichText::new(error).color(egui::Color32::RED));
            });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let painter = ui.painter();

                // Map AU to screen, y up
                let center = rect.center();
                let scale = rect.width().min(rect.height()) / (2.0 * VIEW_EXTENT);
                let to_screen =
                    |p: DVec2| center + egui::vec2(p.x as f32 * scale, -(p.y as f32) * scale);

                for star in &self.stars {
                    painter.circle_filled(
                        center + egui::vec2(star.x * scale, -star.y * scale),
                        1.0,
                        egui::Color32::WHITE,
                    );
                }

                for (trail, state) in self.trails.iter().zip(&states) {
                    let points: Vec<egui::Pos2> = trail.points().map(to_screen).collect();
                    painter.add(egui::Shape::line(
                        points,
                        egui::Stroke::new(1.0, color32(state.color).gamma_multiply(0.4)),
                    ));
                }

                for state in &states {
                    let radius = (state.marker_size * 0.5).max(1.5);
                    painter.circle_filled(to_screen(state.pos_au), radius, color32(state.color));
                }
            });

        // Simulation stepping
        if self.playing {
            let steps_per_frame = self.speed_multiplier.max(0.1).round().max(1.0) as usize;
            for _ in 0..steps_per_frame {
                if self.advance() {
                    self.playing = false;
                    break;
                }
            }
        }

        // Request repaint for animation
        if self.playing {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_drops_oldest_point_at_capacity() {
        let mut trail = Trail::with_capacity(DVec2::ZERO, 3);
        for x in 1..=4 {
            trail.push(DVec2::new(x as f64, 0.0));
        }

        let xs: Vec<f64> = trail.points().map(|p| p.x).collect();
        assert_eq!(xs, [2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_trail_keeps_everything_below_capacity() {
        let mut trail = Trail::starting_at(DVec2::new(1.0, 1.0));
        trail.push(DVec2::new(2.0, 2.0));
        assert_eq!(trail.points().count(), 2);
        assert_eq!(trail.points().next(), Some(DVec2::new(1.0, 1.0)));
    }
}
