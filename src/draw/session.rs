use crate::draw::history::DrawHistory;
use crate::draw::input::{DrawTool, InputCapture, PointerOutcome};
use crate::draw::model::{Stroke, StrokeColor, StrokeStore};
use crate::draw::toolbar::ToolbarCommand;
use crate::draw::viewport::Viewport;

/// Receives the full stroke sequence after every store mutation.
pub trait StoreObserver {
    fn store_changed(&mut self, strokes: &[Stroke]);
}

/// The most recent action performed, tracked apart from the selected tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Draw,
    EraseElement,
    ClearAll,
    Undo,
    Redo,
    Rescale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub tool: DrawTool,
    pub color: StrokeColor,
    /// Undo, redo and clear-all block drawing until a tool is picked again.
    pub legacy_inert_actions: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tool: DrawTool::Pen,
            color: StrokeColor::RED,
            legacy_inert_actions: false,
        }
    }
}

/// Owns every piece of drawing state and publishes store changes.
pub struct DrawSession {
    store: StrokeStore,
    history: DrawHistory,
    input: InputCapture,
    viewport: Viewport,
    tool: DrawTool,
    color: StrokeColor,
    last_action: Option<SessionAction>,
    drawing_locked: bool,
    legacy_inert_actions: bool,
    observers: Vec<Box<dyn StoreObserver>>,
}

impl DrawSession {
    pub fn new(store: StrokeStore, options: SessionOptions) -> Self {
        let history = DrawHistory::from_store(&store);
        Self {
            store,
            history,
            input: InputCapture::default(),
            viewport: Viewport::default(),
            tool: options.tool,
            color: options.color,
            last_action: None,
            drawing_locked: false,
            legacy_inert_actions: options.legacy_inert_actions,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.store.strokes()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn history(&self) -> &DrawHistory {
        &self.history
    }

    pub fn tool(&self) -> DrawTool {
        self.tool
    }

    pub fn color(&self) -> StrokeColor {
        self.color
    }

    pub fn last_action(&self) -> Option<SessionAction> {
        self.last_action
    }

    pub fn is_drawing_locked(&self) -> bool {
        self.drawing_locked
    }

    pub fn is_pointer_active(&self) -> bool {
        self.input.is_active()
    }

    pub fn select_tool(&mut self, tool: DrawTool) {
        self.tool = tool;
        self.drawing_locked = false;
        tracing::debug!(?tool, "tool selected");
    }

    pub fn set_color(&mut self, color: StrokeColor) {
        self.color = color;
    }

    pub fn pointer_down(&mut self, point: (f64, f64)) -> PointerOutcome {
        if self.drawing_locked {
            return PointerOutcome::Ignored;
        }
        let outcome = self
            .input
            .pointer_down(self.tool, self.color, point, &mut self.store);
        self.after_pointer(&outcome);
        outcome
    }

    pub fn pointer_move(&mut self, point: (f64, f64)) -> PointerOutcome {
        let outcome = self.input.pointer_move(self.tool, point, &mut self.store);
        self.after_pointer(&outcome);
        outcome
    }

    pub fn pointer_up(&mut self) {
        self.input.pointer_up();
    }

    pub fn undo(&mut self) -> bool {
        if !self.history.undo(&mut self.store) {
            return false;
        }
        self.record_inert_action(SessionAction::Undo);
        self.notify();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.redo(&mut self.store) {
            return false;
        }
        self.record_inert_action(SessionAction::Redo);
        self.notify();
        true
    }

    /// Empties the canvas. History is left untouched, so this cannot be undone.
    pub fn clear_all(&mut self) -> bool {
        self.input.pointer_up();
        self.record_inert_action(SessionAction::ClearAll);
        if !self.store.clear() {
            return false;
        }
        tracing::info!("canvas cleared");
        self.notify();
        true
    }

    /// Scales strokes to follow a new surface size.
    pub fn resize_viewport(&mut self, size: (f64, f64)) -> bool {
        let Some((scale_x, scale_y)) = self.viewport.resize(size) else {
            return false;
        };
        tracing::debug!(scale_x, scale_y, "rescaling strokes to viewport");
        self.history.rescale(scale_x, scale_y);
        if self.store.is_empty() {
            return false;
        }
        self.store.rescale(scale_x, scale_y);
        self.last_action = Some(SessionAction::Rescale);
        self.notify();
        true
    }

    pub fn apply_command(&mut self, command: ToolbarCommand) {
        match command {
            ToolbarCommand::SelectTool(tool) => self.select_tool(tool),
            ToolbarCommand::SetColor(color) => self.set_color(color),
            ToolbarCommand::ClearAll => {
                self.clear_all();
            }
            ToolbarCommand::Undo => {
                self.undo();
            }
            ToolbarCommand::Redo => {
                self.redo();
            }
            ToolbarCommand::Export | ToolbarCommand::ToggleFullscreen => {
                tracing::debug!(?command, "command handled by the shell");
            }
        }
    }

    fn after_pointer(&mut self, outcome: &PointerOutcome) {
        if !outcome.changed_store() {
            return;
        }
        if outcome.produced_stroke() {
            self.history.sync(&self.store);
            self.last_action = Some(SessionAction::Draw);
        } else {
            if let PointerOutcome::Erased { id, removed } = outcome {
                tracing::debug!(id = %id, removed, "erased stroke");
            }
            self.last_action = Some(SessionAction::EraseElement);
        }
        self.notify();
    }

    fn record_inert_action(&mut self, action: SessionAction) {
        self.last_action = Some(action);
        if self.legacy_inert_actions {
            self.drawing_locked = true;
        }
    }

    fn notify(&mut self) {
        let strokes = self.store.strokes();
        for observer in &mut self.observers {
            observer.store_changed(strokes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<usize>>>);

    impl StoreObserver for Recorder {
        fn store_changed(&mut self, strokes: &[Stroke]) {
            self.0.borrow_mut().push(strokes.len());
        }
    }

    fn draw(session: &mut DrawSession, points: &[(f64, f64)]) {
        let mut iter = points.iter().copied();
        if let Some(first) = iter.next() {
            session.pointer_down(first);
        }
        for point in iter {
            session.pointer_move(point);
        }
        session.pointer_up();
    }

    #[test]
    fn draw_undo_redo_scenario() {
        let mut session = DrawSession::new(StrokeStore::new(), SessionOptions::default());
        draw(&mut session, &[(0.0, 0.0), (5.0, 5.0)]);
        draw(&mut session, &[(10.0, 10.0)]);
        let both = session.strokes().to_vec();

        assert!(session.undo());
        assert_eq!(session.strokes(), &both[..1]);
        assert!(session.redo());
        assert_eq!(session.strokes(), both.as_slice());
        assert_eq!(session.strokes()[0].points, vec![0.0, 0.0, 5.0, 5.0]);
    }

    #[test]
    fn observers_see_every_mutation() {
        let recorder = Recorder::default();
        let mut session = DrawSession::new(StrokeStore::new(), SessionOptions::default());
        session.subscribe(Box::new(recorder.clone()));

        draw(&mut session, &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        session.undo();
        session.undo();
        session.clear_all();

        assert_eq!(*recorder.0.borrow(), vec![1, 1, 1, 0]);
    }

    #[test]
    fn undo_keeps_tool_usable_by_default() {
        let mut session = DrawSession::new(StrokeStore::new(), SessionOptions::default());
        draw(&mut session, &[(0.0, 0.0)]);
        session.undo();

        assert_eq!(session.last_action(), Some(SessionAction::Undo));
        assert!(!session.is_drawing_locked());
        assert!(matches!(
            session.pointer_down((1.0, 1.0)),
            PointerOutcome::StrokeStarted(_)
        ));
    }

    #[test]
    fn legacy_mode_blocks_drawing_until_tool_reselected() {
        let options = SessionOptions {
            legacy_inert_actions: true,
            ..SessionOptions::default()
        };
        let mut session = DrawSession::new(StrokeStore::new(), options);
        draw(&mut session, &[(0.0, 0.0)]);
        session.undo();

        assert_eq!(session.pointer_down((1.0, 1.0)), PointerOutcome::Ignored);
        assert!(session.strokes().is_empty());

        session.select_tool(DrawTool::Pen);
        assert!(matches!(
            session.pointer_down((1.0, 1.0)),
            PointerOutcome::StrokeStarted(_)
        ));
    }

    #[test]
    fn legacy_mode_clear_all_also_blocks_drawing() {
        let options = SessionOptions {
            legacy_inert_actions: true,
            ..SessionOptions::default()
        };
        let mut session = DrawSession::new(StrokeStore::new(), options);
        session.clear_all();
        assert!(session.is_drawing_locked());
        assert_eq!(session.pointer_down((1.0, 1.0)), PointerOutcome::Ignored);
    }

    #[test]
    fn legacy_mode_redo_also_blocks_drawing() {
        let options = SessionOptions {
            legacy_inert_actions: true,
            ..SessionOptions::default()
        };
        let mut session = DrawSession::new(StrokeStore::new(), options);
        draw(&mut session, &[(0.0, 0.0)]);
        session.undo();
        session.select_tool(DrawTool::Pen);

        assert!(session.redo());
        assert_eq!(session.last_action(), Some(SessionAction::Redo));
        assert!(session.is_drawing_locked());
        assert_eq!(session.pointer_down((1.0, 1.0)), PointerOutcome::Ignored);
        assert_eq!(session.strokes().len(), 1);

        session.select_tool(DrawTool::StrokeEraser);
        assert!(matches!(
            session.pointer_down((1.0, 1.0)),
            PointerOutcome::StrokeStarted(_)
        ));
    }

    #[test]
    fn resize_rescales_store_and_timeline() {
        let mut session = DrawSession::new(StrokeStore::new(), SessionOptions::default());
        assert!(!session.resize_viewport((100.0, 100.0)));
        draw(&mut session, &[(10.0, 20.0), (30.0, 40.0)]);

        assert!(session.resize_viewport((200.0, 50.0)));
        assert_eq!(session.strokes()[0].points, vec![20.0, 10.0, 60.0, 20.0]);

        session.undo();
        session.redo();
        assert_eq!(session.strokes()[0].points, vec![20.0, 10.0, 60.0, 20.0]);
    }

    #[test]
    fn minimized_surface_does_not_collapse_drawing() {
        let recorder = Recorder::default();
        let mut session = DrawSession::new(StrokeStore::new(), SessionOptions::default());
        session.resize_viewport((800.0, 600.0));
        draw(&mut session, &[(100.0, 200.0), (300.0, 400.0)]);
        session.subscribe(Box::new(recorder.clone()));

        assert!(!session.resize_viewport((0.0, 0.0)));
        assert!(!session.resize_viewport((800.0, 0.0)));
        assert!(!session.resize_viewport((800.0, 600.0)));

        assert_eq!(session.strokes()[0].points, vec![100.0, 200.0, 300.0, 400.0]);
        assert!(recorder.0.borrow().is_empty());
        session.undo();
        session.redo();
        assert_eq!(session.strokes()[0].points, vec![100.0, 200.0, 300.0, 400.0]);
    }

    #[test]
    fn toolbar_commands_drive_session() {
        let mut session = DrawSession::new(StrokeStore::new(), SessionOptions::default());
        session.apply_command(ToolbarCommand::SelectTool(DrawTool::StrokeEraser));
        session.apply_command(ToolbarCommand::SetColor(StrokeColor::BLACK));
        draw(&mut session, &[(0.0, 0.0)]);

        assert_eq!(session.strokes()[0].tool, crate::draw::model::StrokeTool::Eraser);
        assert_eq!(session.strokes()[0].color, StrokeColor::BLACK);

        session.apply_command(ToolbarCommand::Undo);
        assert!(session.strokes().is_empty());
        session.apply_command(ToolbarCommand::Redo);
        assert_eq!(session.strokes().len(), 1);
        session.apply_command(ToolbarCommand::ClearAll);
        assert!(session.strokes().is_empty());
    }
}
