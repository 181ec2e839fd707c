use std::f32::consts::TAU;

use eframe::egui::{Color32, Mesh, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use crate::config::Palette;
use crate::connections::Connection;
use crate::field::ParticleField;

const GRADIENT_SEGMENTS: usize = 64;
const CONNECTION_WIDTH: f32 = 1.0;

pub trait RenderSurface {
    fn clear(&mut self);

    /// Fills the whole surface, blending from `inner` at `center` to `outer`
    /// at `radius` and beyond.
    fn fill_radial_gradient(
        &mut self,
        center: Pos2,
        radius: f32,
        inner: Color32,
        outer: Color32,
    );

    fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32);

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);
}

pub struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn to_screen(&self, position: Pos2) -> Pos2 {
        self.rect.min + position.to_vec2()
    }
}

impl RenderSurface for PainterSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, Color32::BLACK);
    }

    fn fill_radial_gradient(
        &mut self,
        center: Pos2,
        radius: f32,
        inner: Color32,
        outer: Color32,
    ) {
        self.painter.rect_filled(self.rect, 0.0, outer);
        if radius <= 0.0 {
            return;
        }

        let center = self.to_screen(center);
        let mut mesh = Mesh::default();
        mesh.colored_vertex(center, inner);
        for segment in 0..GRADIENT_SEGMENTS {
            let angle = (segment as f32 / GRADIENT_SEGMENTS as f32) * TAU;
            mesh.colored_vertex(center + Vec2::angled(angle) * radius, outer);
        }
        for segment in 0..GRADIENT_SEGMENTS as u32 {
            let current = 1 + segment;
            let next = 1 + ((segment + 1) % GRADIENT_SEGMENTS as u32);
            mesh.add_triangle(0, current, next);
        }
        self.painter.add(Shape::mesh(mesh));
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            Stroke::new(width, color),
        );
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter
            .circle_filled(self.to_screen(center), radius, color);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    RadialGradient {
        center: Pos2,
        radius: f32,
        inner: Color32,
        outer: Color32,
    },
    Line {
        from: Pos2,
        to: Pos2,
        width: f32,
        color: Color32,
    },
    Circle {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Circle { .. }))
            .count()
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_radial_gradient(
        &mut self,
        center: Pos2,
        radius: f32,
        inner: Color32,
        outer: Color32,
    ) {
        self.commands.push(DrawCommand::RadialGradient {
            center,
            radius,
            inner,
            outer,
        });
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FrameRenderer {
    palette: Palette,
}

impl FrameRenderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn draw(
        &self,
        surface: &mut impl RenderSurface,
        field: &ParticleField,
        connections: &[Connection],
    ) {
        let extent = field.extent();
        surface.clear();
        surface.fill_radial_gradient(
            extent.center(),
            extent.width * 0.5,
            self.palette.background_center(),
            self.palette.background_edge(),
        );

        let particles = field.particles();
        for connection in connections {
            let (Some(from), Some(to)) =
                (particles.get(connection.from), particles.get(connection.to))
            else {
                continue;
            };
            surface.stroke_line(
                from.position,
                to.position,
                CONNECTION_WIDTH,
                self.palette.accent_with_alpha(connection.opacity),
            );
        }

        let particle_color = self.palette.particle();
        for particle in particles {
            surface.fill_circle(particle.position, particle.size, particle_color);
        }
    }
}
