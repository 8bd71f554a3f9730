mod canvas;
mod toolbar_panel;

pub use canvas::{pointer_events, CanvasView, PointerEvent};
pub use toolbar_panel::show_toolbar;

use crate::draw::export::{export_png_to_folder, resolve_export_folder};
use crate::draw::render::RenderSettings;
use crate::draw::session::DrawSession;
use crate::draw::toolbar::ToolbarCommand;
use crate::settings::Settings;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};

const TOAST_SECONDS: f64 = 3.0;

pub struct ScribbleApp {
    session: DrawSession,
    settings: Settings,
    canvas: CanvasView,
    toasts: Toasts,
}

impl ScribbleApp {
    pub fn new(session: DrawSession, settings: Settings) -> Self {
        Self {
            session,
            settings,
            canvas: CanvasView::default(),
            toasts: Toasts::new().anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0]),
        }
    }

    fn handle_command(&mut self, ctx: &egui::Context, command: ToolbarCommand) {
        match command {
            ToolbarCommand::Export => self.export(ctx),
            ToolbarCommand::ToggleFullscreen => {
                let fullscreen = ctx.input(|i| i.viewport().fullscreen).unwrap_or(false);
                tracing::debug!(fullscreen = !fullscreen, "toggling fullscreen");
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
            }
            other => self.session.apply_command(other),
        }
    }

    fn export(&mut self, ctx: &egui::Context) {
        let Some(size) = self.canvas.pixel_size() else {
            self.notify(ToastKind::Warning, "Nothing to export yet".into());
            return;
        };
        let scale = ctx.pixels_per_point();
        let result = resolve_export_folder(self.settings.export_dir.as_deref()).and_then(|dir| {
            export_png_to_folder(self.session.strokes(), RenderSettings { scale }, size, &dir)
        });
        match result {
            Ok(export) => {
                ctx.output_mut(|o| o.copied_text = export.data_uri);
                self.notify(
                    ToastKind::Success,
                    format!("Saved {} and copied it as a data URI", export.path.display()),
                );
            }
            Err(e) => {
                tracing::error!("export failed: {e:#}");
                self.notify(ToastKind::Error, format!("Export failed: {e}"));
            }
        }
    }

    fn notify(&mut self, kind: ToastKind, text: String) {
        self.toasts.add(Toast {
            text: text.into(),
            kind,
            options: ToastOptions::default().duration_in_seconds(TOAST_SECONDS),
        });
    }

    fn shortcut_commands(ctx: &egui::Context) -> Vec<ToolbarCommand> {
        ctx.input(|i| {
            let mut commands = Vec::new();
            let redo = (i.key_pressed(egui::Key::Y) && i.modifiers.command)
                || (i.key_pressed(egui::Key::Z) && i.modifiers.command && i.modifiers.shift);
            if redo {
                commands.push(ToolbarCommand::Redo);
            } else if i.key_pressed(egui::Key::Z) && i.modifiers.command {
                commands.push(ToolbarCommand::Undo);
            }
            if i.key_pressed(egui::Key::F11) {
                commands.push(ToolbarCommand::ToggleFullscreen);
            }
            commands
        })
    }
}

impl eframe::App for ScribbleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut commands = Self::shortcut_commands(ctx);

        egui::Area::new(egui::Id::new("toolbar"))
            .anchor(egui::Align2::CENTER_TOP, [0.0, 10.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    commands.extend(show_toolbar(ui, &self.session));
                });
            });

        for command in commands {
            self.handle_command(ctx, command);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.canvas.show(ui, &mut self.session);
            });

        self.toasts.show(ctx);
    }
}
