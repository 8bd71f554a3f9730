use crate::draw::hit::stroke_at;
use crate::draw::model::{Stroke, StrokeColor, StrokeId, StrokeStore, StrokeTool};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DrawTool {
    #[default]
    Pen,
    /// Paints an eraser stroke over existing ink.
    StrokeEraser,
    /// Deletes whole strokes under the pointer.
    ElementEraser,
}

impl DrawTool {
    pub fn stroke_tool(self) -> Option<StrokeTool> {
        match self {
            DrawTool::Pen => Some(StrokeTool::Pen),
            DrawTool::StrokeEraser => Some(StrokeTool::Eraser),
            DrawTool::ElementEraser => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerOutcome {
    Ignored,
    StrokeStarted(StrokeId),
    PointAppended,
    Erased { id: StrokeId, removed: usize },
}

impl PointerOutcome {
    pub fn changed_store(&self) -> bool {
        !matches!(self, PointerOutcome::Ignored)
    }

    /// Whether the history timeline should follow this change.
    pub fn produced_stroke(&self) -> bool {
        matches!(
            self,
            PointerOutcome::StrokeStarted(_) | PointerOutcome::PointAppended
        )
    }
}

/// Pointer down/move/up translated into store mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputCapture {
    active: bool,
}

impl InputCapture {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pointer_down(
        &mut self,
        tool: DrawTool,
        color: StrokeColor,
        point: (f64, f64),
        store: &mut StrokeStore,
    ) -> PointerOutcome {
        self.active = true;
        match tool.stroke_tool() {
            Some(kind) => {
                let stroke = Stroke::begin(kind, color, point);
                let id = stroke.id.clone();
                if store.push(stroke) {
                    PointerOutcome::StrokeStarted(id)
                } else {
                    PointerOutcome::Ignored
                }
            }
            None => erase_under(store, point),
        }
    }

    pub fn pointer_move(
        &mut self,
        tool: DrawTool,
        point: (f64, f64),
        store: &mut StrokeStore,
    ) -> PointerOutcome {
        if !self.active {
            return PointerOutcome::Ignored;
        }
        if tool == DrawTool::ElementEraser {
            return erase_under(store, point);
        }
        if store.extend_last(point) {
            PointerOutcome::PointAppended
        } else {
            PointerOutcome::Ignored
        }
    }

    pub fn pointer_up(&mut self) {
        self.active = false;
    }
}

fn erase_under(store: &mut StrokeStore, point: (f64, f64)) -> PointerOutcome {
    let Some(id) = stroke_at(store, point).cloned() else {
        return PointerOutcome::Ignored;
    };
    let removed = store.remove_by_id(&id);
    PointerOutcome::Erased { id, removed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pen_drag_builds_single_stroke() {
        let mut store = StrokeStore::new();
        let mut input = InputCapture::default();

        let outcome = input.pointer_down(DrawTool::Pen, StrokeColor::RED, (1.0, 2.0), &mut store);
        assert!(matches!(outcome, PointerOutcome::StrokeStarted(_)));
        assert_eq!(
            input.pointer_move(DrawTool::Pen, (3.0, 4.0), &mut store),
            PointerOutcome::PointAppended
        );
        input.pointer_up();

        assert_eq!(store.len(), 1);
        assert_eq!(store.strokes()[0].points, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(store.strokes()[0].tool, StrokeTool::Pen);
        assert_eq!(store.strokes()[0].color, StrokeColor::RED);
    }

    #[test]
    fn move_after_pointer_up_is_ignored() {
        let mut store = StrokeStore::new();
        let mut input = InputCapture::default();
        input.pointer_down(DrawTool::StrokeEraser, StrokeColor::RED, (0.0, 0.0), &mut store);
        input.pointer_up();

        assert_eq!(
            input.pointer_move(DrawTool::StrokeEraser, (5.0, 5.0), &mut store),
            PointerOutcome::Ignored
        );
        assert_eq!(store.strokes()[0].points, vec![0.0, 0.0]);
        assert_eq!(store.strokes()[0].tool, StrokeTool::Eraser);
    }

    #[test]
    fn element_eraser_drag_deletes_every_stroke_it_crosses() {
        let mut store = StrokeStore::new();
        let mut input = InputCapture::default();
        for x in [0.0, 20.0, 40.0] {
            input.pointer_down(DrawTool::Pen, StrokeColor::BLACK, (x, 0.0), &mut store);
            input.pointer_move(DrawTool::Pen, (x, 10.0), &mut store);
            input.pointer_up();
        }

        let down = input.pointer_down(DrawTool::ElementEraser, StrokeColor::BLACK, (0.0, 5.0), &mut store);
        assert!(matches!(down, PointerOutcome::Erased { removed: 1, .. }));
        assert_eq!(
            input.pointer_move(DrawTool::ElementEraser, (10.0, 5.0), &mut store),
            PointerOutcome::Ignored
        );
        let moved = input.pointer_move(DrawTool::ElementEraser, (40.0, 5.0), &mut store);
        assert!(matches!(moved, PointerOutcome::Erased { removed: 1, .. }));
        input.pointer_up();

        assert_eq!(store.len(), 1);
        assert_eq!(store.strokes()[0].points[0], 20.0);
    }
}
