//! Scene rasterizer for desktop snapshots
//!
//! Draws window frames, header controls, the focus highlight, the
//! notification strip and the shutdown progress bar using tiny-skia. Layout
//! is computed separately from rendering so geometry can be tested without
//! touching pixels.

use std::path::Path;

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect as SkiaRect, Stroke, Transform};

use crate::app::shell::Theme;
use crate::domain::core::{Rect, Viewport};
use crate::domain::shutdown::{ShutdownStage, ShutdownState};
use crate::domain::window::{Window, WindowControl, WindowId, WindowState};

/// Height of the taskbar strip along the top edge
pub const TASKBAR_HEIGHT: i32 = 30;

const NOTIFICATION_WIDTH: i32 = 300;
const NOTIFICATION_HEIGHT: i32 = 40;
const PROGRESS_WIDTH: i32 = 400;
const PROGRESS_HEIGHT: i32 = 8;

#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create pixmap for rendering")]
    PixmapCreationFailed,

    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidCanvas { width: i32, height: i32 },

    #[error("Failed to write snapshot: {0}")]
    EncodeFailed(String),
}

/// What the rasterizer needs to know about the desktop
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub viewport: Viewport,
    pub windows: &'a [Window],
    pub focused: Option<WindowId>,
    pub theme: Theme,
    pub notification: bool,
    pub shutdown: ShutdownState,
}

/// Filled rectangle
#[derive(Debug, Clone)]
pub struct Panel {
    pub rect: SkiaRect,
    pub color: Color,
}

/// Single stroked segment
#[derive(Debug, Clone)]
pub struct Line {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
    pub color: Color,
}

/// Filled circle, used for the power glyph
#[derive(Debug, Clone)]
pub struct Marker {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Color,
}

struct Palette {
    desktop: Color,
    taskbar: Color,
    body: Color,
    header: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                desktop: Color::from_rgba8(15, 17, 26, 255),
                taskbar: Color::from_rgba8(30, 33, 45, 255),
                body: Color::from_rgba8(10, 10, 10, 255),
                header: Color::from_rgba8(40, 44, 60, 255),
            },
            Theme::Light => Self {
                desktop: Color::from_rgba8(230, 233, 240, 255),
                taskbar: Color::from_rgba8(200, 204, 215, 255),
                body: Color::from_rgba8(250, 250, 250, 255),
                header: Color::from_rgba8(180, 186, 200, 255),
            },
        }
    }
}

fn accent() -> Color {
    Color::from_rgba8(28, 184, 44, 255)
}

fn control_color(control: WindowControl) -> Color {
    match control {
        WindowControl::Close => Color::from_rgba8(255, 95, 86, 255),
        WindowControl::Maximize => Color::from_rgba8(39, 201, 63, 255),
        WindowControl::Minimize => Color::from_rgba8(255, 189, 46, 255),
    }
}

fn skia_rect(rect: Rect) -> Option<SkiaRect> {
    SkiaRect::from_xywh(rect.x as f32, rect.y as f32, rect.w as f32, rect.h as f32)
}

/// Pre-calculated drawing commands for one scene
#[derive(Debug, Clone)]
pub struct SceneLayout {
    /// Filled rectangles in paint order
    pub panels: Vec<Panel>,
    /// Outlines drawn over the panels
    pub lines: Vec<Line>,
    pub markers: Vec<Marker>,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl SceneLayout {
    pub fn from_scene(scene: &Scene<'_>, dpi_scale: f32) -> Result<Self, RendererError> {
        let Viewport { width, height } = scene.viewport;
        if width <= 0 || height <= 0 {
            return Err(RendererError::InvalidCanvas { width, height });
        }

        let mut layout = Self {
            panels: Vec::new(),
            lines: Vec::new(),
            markers: Vec::new(),
            canvas_width: width as f32,
            canvas_height: height as f32,
        };

        match scene.shutdown.stage {
            ShutdownStage::Idle => layout.calculate_desktop(scene, dpi_scale),
            ShutdownStage::Running | ShutdownStage::FadingOut => layout.calculate_progress(scene),
            ShutdownStage::Terminal => layout.calculate_power_off(scene),
        }
        Ok(layout)
    }

    fn push_panel(&mut self, rect: Rect, color: Color) {
        if let Some(rect) = skia_rect(rect) {
            self.panels.push(Panel { rect, color });
        }
    }

    fn calculate_desktop(&mut self, scene: &Scene<'_>, dpi_scale: f32) {
        let palette = Palette::for_theme(scene.theme);
        let viewport = scene.viewport;
        self.push_panel(viewport.bounds(), palette.desktop);
        self.push_panel(Rect::new(0, 0, viewport.width, TASKBAR_HEIGHT), palette.taskbar);

        // Focused window paints last so it sits on top.
        let mut visible: Vec<&Window> = scene.windows.iter().filter(|w| w.is_visible()).collect();
        visible.sort_by_key(|w| scene.focused == Some(w.id));

        for window in visible {
            let fade = if window.state == WindowState::Minimized { 0.4 } else { 1.0 };
            let mut body = palette.body;
            body.apply_opacity(fade);
            let mut header = palette.header;
            header.apply_opacity(fade);

            self.push_panel(window.geometry, body);
            self.push_panel(window.header_rect(), header);
            for region in window.control_regions() {
                let inset = region.rect.w / 4;
                let dot = Rect::new(
                    region.rect.x + inset,
                    region.rect.y + inset,
                    region.rect.w - inset * 2,
                    region.rect.h - inset * 2,
                );
                self.push_panel(dot, control_color(region.control));
            }
            if scene.focused == Some(window.id) {
                self.calculate_outline(window.geometry, dpi_scale);
            }
        }

        if scene.notification {
            let strip = Rect::new(
                viewport.width - NOTIFICATION_WIDTH - 10,
                TASKBAR_HEIGHT + 10,
                NOTIFICATION_WIDTH,
                NOTIFICATION_HEIGHT,
            );
            self.push_panel(strip, palette.taskbar);
            self.push_panel(Rect::new(strip.x, strip.y, 4, strip.h), accent());
        }
    }

    fn calculate_outline(&mut self, rect: Rect, dpi_scale: f32) {
        let width = (2.0 * dpi_scale).max(1.0);
        let (left, top) = (rect.x as f32, rect.y as f32);
        let (right, bottom) = (rect.right() as f32, rect.bottom() as f32);
        let edges = [
            (left, top, right, top),
            (right, top, right, bottom),
            (right, bottom, left, bottom),
            (left, bottom, left, top),
        ];
        for (x1, y1, x2, y2) in edges {
            self.lines.push(Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color: accent(),
            });
        }
    }

    fn calculate_progress(&mut self, scene: &Scene<'_>) {
        let viewport = scene.viewport;
        self.push_panel(viewport.bounds(), Color::BLACK);

        let track_w = PROGRESS_WIDTH.min(viewport.width - 20);
        let track = Rect::new(
            (viewport.width - track_w) / 2,
            viewport.height / 2,
            track_w,
            PROGRESS_HEIGHT,
        );
        self.push_panel(track, Color::from_rgba8(51, 51, 51, 255));

        let filled = track.w * i32::from(scene.shutdown.progress_percent) / 100;
        if filled > 0 {
            let mut bar = accent();
            if scene.shutdown.stage == ShutdownStage::FadingOut {
                bar.apply_opacity(0.5);
            }
            self.push_panel(Rect::new(track.x, track.y, filled, track.h), bar);
        }
    }

    fn calculate_power_off(&mut self, scene: &Scene<'_>) {
        let viewport = scene.viewport;
        self.push_panel(viewport.bounds(), Color::BLACK);
        self.markers.push(Marker {
            x: viewport.width as f32 / 2.0,
            y: viewport.height as f32 / 2.0,
            radius: 24.0,
            color: accent(),
        });
    }
}

/// Rasterizes scene layouts with tiny-skia
#[derive(Debug, Default)]
pub struct SceneRenderer;

impl SceneRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_layout(&self, layout: &SceneLayout) -> Result<Pixmap, RendererError> {
        let mut pixmap = Pixmap::new(layout.canvas_width as u32, layout.canvas_height as u32)
            .ok_or(RendererError::PixmapCreationFailed)?;
        pixmap.fill(Color::TRANSPARENT);

        self.render_panels(&mut pixmap, &layout.panels);
        self.render_lines(&mut pixmap, &layout.lines);
        self.render_markers(&mut pixmap, &layout.markers);
        Ok(pixmap)
    }

    /// Lays out and rasterizes a scene in one step
    pub fn render_scene(&self, scene: &Scene<'_>, dpi_scale: f32) -> Result<Pixmap, RendererError> {
        let layout = SceneLayout::from_scene(scene, dpi_scale)?;
        self.render_layout(&layout)
    }

    fn render_panels(&self, pixmap: &mut Pixmap, panels: &[Panel]) {
        for panel in panels {
            let mut paint = Paint::default();
            paint.set_color(panel.color);
            pixmap.fill_rect(panel.rect, &paint, Transform::identity(), None);
        }
    }

    fn render_lines(&self, pixmap: &mut Pixmap, lines: &[Line]) {
        for line in lines {
            let mut path_builder = PathBuilder::new();
            path_builder.move_to(line.x1, line.y1);
            path_builder.line_to(line.x2, line.y2);

            if let Some(path) = path_builder.finish() {
                let mut paint = Paint::default();
                paint.set_color(line.color);
                let stroke = Stroke {
                    width: line.width,
                    ..Stroke::default()
                };
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
    }

    fn render_markers(&self, pixmap: &mut Pixmap, markers: &[Marker]) {
        for marker in markers {
            let mut path_builder = PathBuilder::new();
            path_builder.push_circle(marker.x, marker.y, marker.radius);
            if let Some(path) = path_builder.finish() {
                let mut paint = Paint::default();
                paint.set_color(marker.color);
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
    }

    /// Writes a rendered pixmap as PNG
    pub fn save_png(&self, pixmap: &Pixmap, path: &Path) -> Result<(), RendererError> {
        pixmap
            .save_png(path)
            .map_err(|err| RendererError::EncodeFailed(err.to_string()))
    }
}
