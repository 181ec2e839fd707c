use eframe::egui::{self, Align2, Color32, Context, FontId, Pos2, Rect, Sense, Ui, vec2};

use crate::config::FieldConfig;
use crate::driver::{FrameDriver, InputEvent, TickSource};
use crate::error::EngineError;
use crate::field::Extent;
use crate::render::PainterSurface;

mod fps;

use fps::FpsCounter;

struct RepaintTicks<'a>(&'a Context);

impl TickSource for RepaintTicks<'_> {
    fn request_frame(&mut self) {
        self.0.request_repaint();
    }
}

fn require_surface<T>(gl: Option<&T>) -> Result<&T, EngineError> {
    gl.ok_or(EngineError::SurfaceUnavailable(
        "eframe did not provide a glow rendering context",
    ))
}

pub struct ParticleFieldApp {
    driver: FrameDriver,
    pointer_inside: bool,
    show_fps: bool,
    fps: FpsCounter,
}

impl ParticleFieldApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &FieldConfig,
        initial_extent: Extent,
    ) -> Result<Self, EngineError> {
        require_surface(cc.gl.as_deref())?;

        let mut driver = FrameDriver::new(config, initial_extent);
        driver.start(&mut RepaintTicks(&cc.egui_ctx));

        Ok(Self {
            driver,
            pointer_inside: false,
            show_fps: config.show_fps,
            fps: FpsCounter::default(),
        })
    }

    fn forward_input(&mut self, ui: &Ui, rect: Rect) {
        self.driver
            .handle_input(InputEvent::Resize(Extent::from_size(rect.size())));

        let hover = ui.input(|input| input.pointer.hover_pos());
        match hover {
            Some(pointer) => {
                self.pointer_inside = true;
                let local = Pos2::ZERO + (pointer - rect.min);
                self.driver.handle_input(InputEvent::PointerMove(local));
            }
            None if self.pointer_inside => {
                self.pointer_inside = false;
                self.driver.handle_input(InputEvent::PointerLeave);
            }
            None => {}
        }
    }
}

impl eframe::App for ParticleFieldApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if self.show_fps {
            self.fps.update(ctx);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, _response) =
                    ui.allocate_exact_size(ui.available_size(), Sense::hover());
                self.forward_input(ui, rect);

                let painter = ui.painter_at(rect);
                let mut surface = PainterSurface::new(&painter, rect);
                self.driver
                    .on_frame(&mut surface, &mut RepaintTicks(ui.ctx()));

                if self.show_fps {
                    painter.text(
                        rect.left_top() + vec2(10.0, 10.0),
                        Align2::LEFT_TOP,
                        self.fps.display_text(self.driver.stats().connections),
                        FontId::proportional(13.0),
                        Color32::from_gray(240),
                    );
                }
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.driver.stop();
    }
}
