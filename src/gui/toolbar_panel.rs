use crate::draw::session::DrawSession;
use crate::draw::toolbar::{ToolbarCommand, ToolbarControl, TOOLBAR_CONTROLS};
use crate::draw::toolbar_icons::{icon_cells, icon_for_control};
use crate::draw::StrokeColor;
use eframe::egui::{self, Color32, Rect, Sense, Stroke, Vec2};

const BUTTON_SIZE: f32 = 28.0;
const ICON_CELL: f32 = 3.0;
const SELECTED_FILL: Color32 = Color32::from_rgb(196, 181, 253);
const HOVER_FILL: Color32 = Color32::from_rgb(237, 233, 254);
const ICON_COLOR: Color32 = Color32::from_rgb(30, 30, 30);
const DISABLED_ICON_COLOR: Color32 = Color32::from_rgb(170, 170, 170);

/// Draws the toolbar row and returns the commands clicked this frame.
pub fn show_toolbar(ui: &mut egui::Ui, session: &DrawSession) -> Vec<ToolbarCommand> {
    let mut commands = Vec::new();
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 6.0;
        for control in TOOLBAR_CONTROLS {
            if control == ToolbarControl::ColorPicker {
                if let Some(color) = color_picker(ui, session.color()) {
                    commands.push(ToolbarCommand::SetColor(color));
                }
                continue;
            }
            if let Some(command) = icon_button(ui, session, control) {
                commands.push(command);
            }
        }
        ui.separator();
        if let Some(command) = icon_button(ui, session, ToolbarControl::Fullscreen) {
            commands.push(command);
        }
    });
    commands
}

fn color_picker(ui: &mut egui::Ui, current: StrokeColor) -> Option<StrokeColor> {
    let mut rgb = [current.r, current.g, current.b];
    let response = ui
        .color_edit_button_srgb(&mut rgb)
        .on_hover_text(ToolbarControl::ColorPicker.tooltip());
    response
        .changed()
        .then(|| StrokeColor::rgb(rgb[0], rgb[1], rgb[2]))
}

fn icon_button(
    ui: &mut egui::Ui,
    session: &DrawSession,
    control: ToolbarControl,
) -> Option<ToolbarCommand> {
    let enabled = control.is_enabled(session);
    let sense = if enabled { Sense::click() } else { Sense::hover() };
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(BUTTON_SIZE), sense);
    let response = response.on_hover_text(control.tooltip());

    let painter = ui.painter_at(rect);
    if control.is_selected(session) {
        painter.rect_filled(rect, 4.0, SELECTED_FILL);
    } else if enabled && response.hovered() {
        painter.rect_filled(rect, 4.0, HOVER_FILL);
    }

    if let Some(icon) = icon_for_control(control) {
        let color = if enabled { ICON_COLOR } else { DISABLED_ICON_COLOR };
        let origin = rect.center() - Vec2::splat(ICON_CELL * 3.5);
        for (col, row) in icon_cells(icon) {
            let min = origin + Vec2::new(col as f32 * ICON_CELL, row as f32 * ICON_CELL);
            painter.rect_filled(Rect::from_min_size(min, Vec2::splat(ICON_CELL)), 0.0, color);
        }
    } else {
        painter.rect_stroke(rect.shrink(4.0), 2.0, Stroke::new(1.0, ICON_COLOR));
    }

    if enabled && response.clicked() {
        control.command()
    } else {
        None
    }
}
