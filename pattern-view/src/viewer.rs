//! Interactive pattern gallery built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns one instance of every
//! generator from `pattern-core`, steps the selected one once per paced
//! animation frame, and draws the result with the egui painter.

use eframe::App;
use glam::Vec2;
use pattern_core::{
    config::{RoomConfig, TreeConfig, VenationConfig},
    geom::PolarCoord,
    leaf::LeafMode,
    rooms::RoomLayout,
    tree::Tree,
    venation::Venation,
};
use std::f32::consts::TAU;

/// Side length of one room grid cell in world units.
const CELL_SIZE: f32 = 12.0;

/// Vertex count of the venation border polygon.
const BORDER_SEGMENTS: usize = 48;

/// Which generator is being driven and drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pattern {
    Rooms,
    Tree,
    Venation,
}

/// Main application state for the gallery viewer.
///
/// The per-frame update is:
/// 1. Handle UI interactions (pattern choice, config edits, pan).
/// 2. If `running` and enough time has passed, call [`Viewer::step_once`].
/// 3. Draw the selected pattern.
///
/// Room layouts are generated eagerly, so for them "stepping" is a no-op
/// and the interesting action is `Regenerate`; the tree and venation
/// simulations advance one tick per step.
pub struct Viewer {
    pattern: Pattern,

    room_cfg: RoomConfig,
    tree_cfg: TreeConfig,
    venation_cfg: VenationConfig,
    border_radius: f32,

    rooms: RoomLayout,
    tree: Tree,
    venation: Venation,

    rng: rand::rngs::ThreadRng,

    running: bool,
    zoom: f32,
    pan: egui::Vec2,
    hover_world: Option<Vec2>,

    step_interval: f64,
    last_step_time: f64,

    /// Validation message from the last rejected regeneration, shown in
    /// the config panel until a regeneration succeeds.
    config_error: Option<String>,
}

impl Viewer {
    /// Creates a viewer with one freshly generated instance of every
    /// pattern under its default configuration.
    pub fn new() -> Self {
        let mut rng = rand::rng();
        let room_cfg = RoomConfig::default();
        let tree_cfg = TreeConfig::default();
        let venation_cfg = VenationConfig::default();

        let rooms =
            RoomLayout::generate(&room_cfg, &mut rng).expect("default room config is valid");
        let tree = Tree::new(tree_cfg, &mut rng).expect("default tree config is valid");
        let venation =
            Venation::new(venation_cfg, &mut rng).expect("default venation config is valid");

        Self {
            pattern: Pattern::Tree,
            room_cfg,
            tree_cfg,
            venation_cfg,
            border_radius: 130.0,
            rooms,
            tree,
            venation,
            rng,
            running: false,
            zoom: 2.0,
            pan: egui::vec2(0.0, 0.0),
            hover_world: None,
            step_interval: 0.05,
            last_step_time: 0.0,
            config_error: None,
        }
    }

    /// Rebuilds the selected pattern from its current config.
    ///
    /// A config rejected by validation leaves the previous generation on
    /// screen and surfaces the error in the config panel.
    fn regenerate(&mut self) {
        let result = match self.pattern {
            Pattern::Rooms => {
                RoomLayout::generate(&self.room_cfg, &mut self.rng).map(|r| self.rooms = r)
            }
            Pattern::Tree => Tree::new(self.tree_cfg, &mut self.rng).map(|t| self.tree = t),
            Pattern::Venation => {
                Venation::new(self.venation_cfg, &mut self.rng).map(|v| self.venation = v)
            }
        };

        match result {
            Ok(()) => self.config_error = None,
            Err(err) => self.config_error = Some(err.to_string()),
        }
    }

    /// Advances the selected simulation by one tick.
    fn step_once(&mut self) {
        match self.pattern {
            // Layouts are eager; there is nothing to step.
            Pattern::Rooms => {}
            Pattern::Tree => self.tree.grow(),
            Pattern::Venation => {
                let border = self.border();
                self.venation.fill_by_one(&border, &mut self.rng);
            }
        }
    }

    /// The venation border polygon: a regular polygon circle around the
    /// venation origin.
    fn border(&self) -> Vec<PolarCoord> {
        (0..BORDER_SEGMENTS)
            .map(|i| {
                PolarCoord::new(i as f32 / BORDER_SEGMENTS as f32 * TAU, self.border_radius)
            })
            .collect()
    }

    /// Converts a world-space position to screen-space.
    ///
    /// World coordinates are scaled by `zoom`, offset by `pan`, and
    /// centered inside `rect`. World y grows downward, matching the
    /// core's screen-space angle convention, so no flip is applied.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        egui::pos2(
            center.x + p.x * self.zoom + self.pan.x,
            center.y + p.y * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`Viewer::world_to_screen`] up to floating point
    /// rounding.
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        Vec2::new(
            (p.x - center.x - self.pan.x) / self.zoom,
            (p.y - center.y - self.pan.y) / self.zoom,
        )
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `u32` [`egui::DragValue`].
    fn labeled_drag_u32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut u32,
        range: std::ops::RangeInclusive<u32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel (pattern choice, run controls, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (pattern, label) in [
                    (Pattern::Rooms, "Rooms"),
                    (Pattern::Tree, "Tree"),
                    (Pattern::Venation, "Venation"),
                ] {
                    if ui
                        .selectable_label(self.pattern == pattern, label)
                        .clicked()
                        && self.pattern != pattern
                    {
                        self.pattern = pattern;
                        self.config_error = None;
                    }
                }

                ui.separator();

                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                ui.add(
                    egui::DragValue::new(&mut self.step_interval)
                        .prefix("dt target = ")
                        .range(0.01..=1.0)
                        .speed(0.01),
                );

                if ui.button("Step").clicked() {
                    self.step_once();
                }

                if ui.button("Regenerate").clicked() {
                    self.regenerate();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.1..=10.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar with per-pattern counts.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(p) = self.hover_world {
                    ui.label(format!("cursor = ({:.1}, {:.1})", p.x, p.y));
                    ui.separator();
                }
                match self.pattern {
                    Pattern::Rooms => {
                        ui.label(format!("rooms = {}", self.rooms.room_count()));
                        ui.label(format!("cells = {}", self.rooms.cell_count()));
                    }
                    Pattern::Tree => {
                        ui.label(format!("branches = {}", self.tree.branch_count()));
                        ui.label(format!("leaves left = {}", self.tree.leaves_remaining()));
                    }
                    Pattern::Venation => {
                        ui.label(format!("veins = {}", self.venation.branches().len()));
                        ui.label(format!("growing = {}", self.venation.live_branch_count()));
                    }
                }
            });
        });
    }

    /// Builds the right-hand config panel for the selected pattern.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");
                ui.separator();

                match self.pattern {
                    Pattern::Rooms => {
                        Self::labeled_drag_usize(ui, "n:", &mut self.room_cfg.n, 1..=64, 1.0);
                        Self::labeled_drag_f32(
                            ui,
                            "unity:",
                            &mut self.room_cfg.unity,
                            0.0..=1.0,
                            0.01,
                        );
                    }
                    Pattern::Tree => {
                        Self::labeled_drag_usize(
                            ui,
                            "leaves:",
                            &mut self.tree_cfg.num_leaves,
                            0..=2000,
                            5.0,
                        );
                        Self::labeled_drag_f32(
                            ui,
                            "branch_length:",
                            &mut self.tree_cfg.branch_length,
                            0.5..=50.0,
                            0.5,
                        );
                        Self::labeled_drag_f32(
                            ui,
                            "min_dist:",
                            &mut self.tree_cfg.min_dist,
                            0.5..=100.0,
                            0.5,
                        );
                        Self::labeled_drag_u32(
                            ui,
                            "influence_threshold:",
                            &mut self.tree_cfg.influence_threshold,
                            0..=20,
                            1.0,
                        );
                        Self::labeled_drag_f32(
                            ui,
                            "shape_width:",
                            &mut self.tree_cfg.shape_width,
                            10.0..=600.0,
                            2.0,
                        );

                        egui::ComboBox::from_label("leaf mode")
                            .selected_text(format!("{:?}", self.tree_cfg.leaf_mode))
                            .show_ui(ui, |ui| {
                                for mode in [
                                    LeafMode::Scatter,
                                    LeafMode::Cross,
                                    LeafMode::Ring,
                                    LeafMode::Perimeter,
                                ] {
                                    ui.selectable_value(
                                        &mut self.tree_cfg.leaf_mode,
                                        mode,
                                        format!("{mode:?}"),
                                    );
                                }
                            });
                    }
                    Pattern::Venation => {
                        Self::labeled_drag_f32(
                            ui,
                            "branch_resolution:",
                            &mut self.venation_cfg.branch_resolution,
                            0.5..=10.0,
                            0.1,
                        );
                        Self::labeled_drag_f32(
                            ui,
                            "branch_length:",
                            &mut self.venation_cfg.branch_length,
                            1.0..=60.0,
                            0.5,
                        );
                        Self::labeled_drag_f32(
                            ui,
                            "variance:",
                            &mut self.venation_cfg.variance,
                            0.0..=1.5,
                            0.01,
                        );
                        Self::labeled_drag_f32(
                            ui,
                            "border radius:",
                            &mut self.border_radius,
                            20.0..=400.0,
                            1.0,
                        );
                    }
                }

                ui.separator();
                if ui.button("Regenerate").clicked() {
                    self.regenerate();
                }

                if let Some(err) = &self.config_error {
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });
    }

    /// Draws the room layout as one bounding-box outline per room.
    fn draw_rooms(&self, painter: &egui::Painter, rect: egui::Rect) {
        let offset = -(self.rooms.n() as f32 * CELL_SIZE) * 0.5;
        let stroke = egui::Stroke::new(1.5, egui::Color32::LIGHT_BLUE);

        self.rooms.for_each(|room| {
            let Some((min, max)) = room.bounds() else {
                return;
            };
            let corners = [
                Vec2::new(min.c as f32, min.r as f32),
                Vec2::new(max.c as f32 + 1.0, min.r as f32),
                Vec2::new(max.c as f32 + 1.0, max.r as f32 + 1.0),
                Vec2::new(min.c as f32, max.r as f32 + 1.0),
            ];
            let points: Vec<egui::Pos2> = corners
                .iter()
                .map(|&corner| {
                    self.world_to_screen(corner * CELL_SIZE + Vec2::splat(offset), rect)
                })
                .collect();
            painter.add(egui::Shape::closed_line(points, stroke));
        });
    }

    /// Draws the tree's segments, root, and remaining leaves.
    fn draw_tree(&self, painter: &egui::Painter, rect: egui::Rect) {
        for (from, to) in self.tree.segments() {
            let a = self.world_to_screen(from, rect);
            let b = self.world_to_screen(to, rect);
            painter.line_segment([a, b], egui::Stroke::new(1.0, egui::Color32::LIGHT_GREEN));
        }

        if let Some(root) = self.tree.branches().first() {
            let p = self.world_to_screen(root.pos, rect);
            painter.circle_filled(p, 3.0, egui::Color32::LIGHT_BLUE);
        }

        for leaf in self.tree.leaves() {
            let p = self.world_to_screen(leaf, rect);
            painter.circle_filled(p, 2.0, egui::Color32::LIGHT_RED);
        }
    }

    /// Draws the venation polylines and the border polygon.
    fn draw_venation(&self, painter: &egui::Painter, rect: egui::Rect) {
        let border: Vec<egui::Pos2> = self
            .border()
            .iter()
            .map(|p| self.world_to_screen(p.to_cartesian(self.venation_cfg.origin), rect))
            .collect();
        painter.add(egui::Shape::closed_line(
            border,
            egui::Stroke::new(1.0, egui::Color32::YELLOW),
        ));

        for polyline in self.venation.cartesian_polylines() {
            if polyline.len() < 2 {
                continue;
            }
            let points: Vec<egui::Pos2> = polyline
                .iter()
                .map(|&p| self.world_to_screen(p, rect))
                .collect();
            painter.add(egui::Shape::line(
                points,
                egui::Stroke::new(1.0, egui::Color32::LIGHT_GREEN),
            ));
        }
    }

    /// Builds the central panel where the selected pattern is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            self.hover_world = response.hover_pos().map(|p| self.screen_to_world(p, rect));

            match self.pattern {
                Pattern::Rooms => self.draw_rooms(&painter, rect),
                Pattern::Tree => self.draw_tree(&painter, rect),
                Pattern::Venation => self.draw_venation(&painter, rect),
            }

            // Auto-run the simulation if requested.
            if self.running {
                let now = ctx.input(|i| i.time);
                if now - self.last_step_time >= self.step_interval {
                    self.step_once();
                    self.last_step_time = now;
                }

                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn world_to_screen_and_back_is_roundtrip() {
        let mut viewer = Viewer::new();
        // Non-trivial zoom and pan to exercise the math.
        viewer.zoom = 2.0;
        viewer.pan = egui::vec2(15.0, -7.0);
        let rect = test_rect();

        let world_points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, -5.0),
            Vec2::new(-3.5, 8.25),
        ];

        let eps = 1e-4;

        for p in world_points {
            let screen = viewer.world_to_screen(p, rect);
            let back = viewer.screen_to_world(screen, rect);

            assert!(
                (back.x - p.x).abs() < eps && (back.y - p.y).abs() < eps,
                "roundtrip mismatch: p={p:?}, back={back:?}"
            );
        }
    }

    #[test]
    fn regenerate_applies_the_edited_room_config() {
        let mut viewer = Viewer::new();
        viewer.pattern = Pattern::Rooms;
        viewer.room_cfg = RoomConfig { n: 4, unity: 0.0 };

        viewer.regenerate();

        assert!(viewer.config_error.is_none());
        assert_eq!(viewer.rooms.room_count(), 16);
        assert_eq!(viewer.rooms.cell_count(), 16);
    }

    #[test]
    fn rejected_config_keeps_the_previous_generation() {
        let mut viewer = Viewer::new();
        viewer.pattern = Pattern::Rooms;
        let rooms_before = viewer.rooms.room_count();

        viewer.room_cfg = RoomConfig { n: 0, unity: 0.5 };
        viewer.regenerate();

        assert!(viewer.config_error.is_some());
        assert_eq!(viewer.rooms.room_count(), rooms_before);

        // A valid config clears the error again.
        viewer.room_cfg = RoomConfig { n: 3, unity: 0.0 };
        viewer.regenerate();
        assert!(viewer.config_error.is_none());
        assert_eq!(viewer.rooms.room_count(), 9);
    }

    #[test]
    fn stepping_the_tree_pattern_grows_it() {
        let mut viewer = Viewer::new();
        viewer.pattern = Pattern::Tree;
        let before = viewer.tree.branch_count();

        viewer.step_once();

        // The default scatter cloud influences the root immediately.
        assert!(viewer.tree.branch_count() > before);
    }

    #[test]
    fn stepping_the_venation_pattern_extends_the_trunk() {
        let mut viewer = Viewer::new();
        viewer.pattern = Pattern::Venation;

        viewer.step_once();

        assert!(viewer.venation.branches()[0].points.len() > 1);
    }

    #[test]
    fn stepping_the_rooms_pattern_is_a_no_op() {
        let mut viewer = Viewer::new();
        viewer.pattern = Pattern::Rooms;
        let before = viewer.rooms.room_count();

        viewer.step_once();

        assert_eq!(viewer.rooms.room_count(), before);
    }
}
