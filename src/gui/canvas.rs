use crate::draw::render::{render_strokes_to_rgba, RenderSettings};
use crate::draw::session::DrawSession;
use eframe::egui::{self, Color32, Pos2, Rect, Sense, TextureHandle, TextureOptions};

/// Pointer transition derived from one frame of input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down((f64, f64)),
    Move((f64, f64)),
    Up,
}

/// Turns raw pointer state into canvas events. Positions are relative to the
/// canvas origin.
pub fn pointer_events(
    pressed: bool,
    released: bool,
    hovered: bool,
    active: bool,
    position: Option<Pos2>,
    last_position: Option<Pos2>,
    origin: Pos2,
) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    let local = position.map(|pos| ((pos.x - origin.x) as f64, (pos.y - origin.y) as f64));
    if pressed && hovered {
        if let Some(point) = local {
            events.push(PointerEvent::Down(point));
        }
    } else if active && position != last_position {
        if let Some(point) = local {
            events.push(PointerEvent::Move(point));
        }
    }
    if released && (active || pressed) {
        events.push(PointerEvent::Up);
    }
    events
}

/// Texture mirror of the stroke store, refreshed when the store or size changes.
#[derive(Default)]
pub struct CanvasView {
    texture: Option<TextureHandle>,
    rendered: Option<(u64, [usize; 2])>,
    last_pointer: Option<Pos2>,
}

impl CanvasView {
    /// Pixel size of the last rendered frame.
    pub fn pixel_size(&self) -> Option<(u32, u32)> {
        self.rendered
            .map(|(_, [w, h])| (w as u32, h as u32))
    }

    pub fn show(&mut self, ui: &mut egui::Ui, session: &mut DrawSession) {
        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, Sense::click_and_drag());
        session.resize_viewport((rect.width() as f64, rect.height() as f64));

        let (pressed, released, position) = ui.ctx().input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });
        for event in pointer_events(
            pressed,
            released,
            response.hovered(),
            session.is_pointer_active(),
            position,
            self.last_pointer,
            rect.min,
        ) {
            match event {
                PointerEvent::Down(point) => {
                    session.pointer_down(point);
                }
                PointerEvent::Move(point) => {
                    session.pointer_move(point);
                }
                PointerEvent::Up => session.pointer_up(),
            }
        }
        self.last_pointer = position;

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::WHITE);
        if let Some(texture) = self.refresh_texture(ui.ctx(), session, rect) {
            painter.image(
                texture.id(),
                rect,
                Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }

    fn refresh_texture(
        &mut self,
        ctx: &egui::Context,
        session: &DrawSession,
        rect: Rect,
    ) -> Option<&TextureHandle> {
        let scale = ctx.pixels_per_point();
        let size = [
            (rect.width() * scale).round().max(0.0) as usize,
            (rect.height() * scale).round().max(0.0) as usize,
        ];
        if size[0] == 0 || size[1] == 0 {
            return None;
        }

        let key = (session.revision(), size);
        if self.rendered != Some(key) || self.texture.is_none() {
            let pixels = render_strokes_to_rgba(
                session.strokes(),
                RenderSettings { scale },
                (size[0] as u32, size[1] as u32),
            );
            let image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
            if let Some(texture) = self.texture.as_mut() {
                texture.set(image, TextureOptions::LINEAR);
            } else {
                self.texture = Some(ctx.load_texture("canvas", image, TextureOptions::LINEAR));
            }
            self.rendered = Some(key);
        }
        self.texture.as_ref()
    }
}
