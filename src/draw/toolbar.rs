use crate::draw::input::DrawTool;
use crate::draw::model::StrokeColor;
use crate::draw::session::{DrawSession, SessionAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarCommand {
    SelectTool(DrawTool),
    SetColor(StrokeColor),
    ClearAll,
    Undo,
    Redo,
    Export,
    ToggleFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarControl {
    Tool(DrawTool),
    ClearAll,
    Undo,
    Redo,
    ColorPicker,
    Export,
    Fullscreen,
}

/// Controls in display order.
pub const TOOLBAR_CONTROLS: [ToolbarControl; 8] = [
    ToolbarControl::Tool(DrawTool::Pen),
    ToolbarControl::Tool(DrawTool::StrokeEraser),
    ToolbarControl::Tool(DrawTool::ElementEraser),
    ToolbarControl::ClearAll,
    ToolbarControl::Undo,
    ToolbarControl::Redo,
    ToolbarControl::ColorPicker,
    ToolbarControl::Export,
];

impl ToolbarControl {
    pub fn tooltip(self) -> &'static str {
        match self {
            ToolbarControl::Tool(DrawTool::Pen) => "Pen",
            ToolbarControl::Tool(DrawTool::StrokeEraser) => "Eraser",
            ToolbarControl::Tool(DrawTool::ElementEraser) => "Erase whole strokes",
            ToolbarControl::ClearAll => "Clear canvas",
            ToolbarControl::Undo => "Undo",
            ToolbarControl::Redo => "Redo",
            ToolbarControl::ColorPicker => "Stroke colour",
            ToolbarControl::Export => "Export image.png",
            ToolbarControl::Fullscreen => "Toggle fullscreen",
        }
    }

    /// Command fired by a click. The colour picker reports its value instead.
    pub fn command(self) -> Option<ToolbarCommand> {
        match self {
            ToolbarControl::Tool(tool) => Some(ToolbarCommand::SelectTool(tool)),
            ToolbarControl::ClearAll => Some(ToolbarCommand::ClearAll),
            ToolbarControl::Undo => Some(ToolbarCommand::Undo),
            ToolbarControl::Redo => Some(ToolbarCommand::Redo),
            ToolbarControl::ColorPicker => None,
            ToolbarControl::Export => Some(ToolbarCommand::Export),
            ToolbarControl::Fullscreen => Some(ToolbarCommand::ToggleFullscreen),
        }
    }

    pub fn is_selected(self, session: &DrawSession) -> bool {
        let locked_by = |action: SessionAction| {
            session.is_drawing_locked() && session.last_action() == Some(action)
        };
        match self {
            ToolbarControl::Tool(tool) => !session.is_drawing_locked() && session.tool() == tool,
            ToolbarControl::ClearAll => locked_by(SessionAction::ClearAll),
            ToolbarControl::Undo => locked_by(SessionAction::Undo),
            ToolbarControl::Redo => locked_by(SessionAction::Redo),
            ToolbarControl::ColorPicker | ToolbarControl::Export | ToolbarControl::Fullscreen => {
                false
            }
        }
    }

    pub fn is_enabled(self, session: &DrawSession) -> bool {
        match self {
            ToolbarControl::Undo => session.history().can_undo(),
            ToolbarControl::Redo => session.history().can_redo(),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::model::StrokeStore;
    use crate::draw::session::SessionOptions;

    #[test]
    fn controls_map_to_commands() {
        assert_eq!(
            ToolbarControl::Tool(DrawTool::ElementEraser).command(),
            Some(ToolbarCommand::SelectTool(DrawTool::ElementEraser))
        );
        assert_eq!(ToolbarControl::ColorPicker.command(), None);
        assert_eq!(
            ToolbarControl::Fullscreen.command(),
            Some(ToolbarCommand::ToggleFullscreen)
        );
    }

    #[test]
    fn undo_redo_availability_follows_history() {
        let mut session = DrawSession::new(StrokeStore::new(), SessionOptions::default());
        assert!(!ToolbarControl::Undo.is_enabled(&session));
        assert!(!ToolbarControl::Redo.is_enabled(&session));

        session.pointer_down((0.0, 0.0));
        session.pointer_up();
        assert!(ToolbarControl::Undo.is_enabled(&session));

        session.undo();
        assert!(ToolbarControl::Redo.is_enabled(&session));
        assert!(!ToolbarControl::Undo.is_enabled(&session));
    }

    #[test]
    fn legacy_lock_moves_highlight_to_action() {
        let options = SessionOptions {
            legacy_inert_actions: true,
            ..SessionOptions::default()
        };
        let mut session = DrawSession::new(StrokeStore::new(), options);
        assert!(ToolbarControl::Tool(DrawTool::Pen).is_selected(&session));

        session.clear_all();
        assert!(ToolbarControl::ClearAll.is_selected(&session));
        assert!(!ToolbarControl::Tool(DrawTool::Pen).is_selected(&session));
    }
}
