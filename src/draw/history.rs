use crate::draw::model::{Stroke, StrokeStore};

/// Linear stroke history.
///
/// `step` counts how many timeline strokes are currently applied: position 0
/// is the empty origin and `timeline.len()` is the latest recorded position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawHistory {
    step: usize,
    timeline: Vec<Stroke>,
}

impl DrawHistory {
    /// History mirroring `store`, positioned at its latest entry.
    pub fn from_store(store: &StrokeStore) -> Self {
        let mut history = Self::default();
        history.sync(store);
        history
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn timeline(&self) -> &[Stroke] {
        &self.timeline
    }

    pub fn can_undo(&self) -> bool {
        self.step > 0
    }

    pub fn can_redo(&self) -> bool {
        self.step < self.timeline.len()
    }

    /// Re-records the timeline from the store and moves to the latest position.
    pub fn sync(&mut self, store: &StrokeStore) {
        self.timeline = store.strokes().to_vec();
        self.step = self.timeline.len();
    }

    /// Removes the last stroke of the store. Returns `false` at the origin.
    pub fn undo(&mut self, store: &mut StrokeStore) -> bool {
        if !self.can_undo() {
            return false;
        }
        let removed = store.pop();
        self.step -= 1;
        tracing::debug!(
            step = self.step,
            removed = removed.as_ref().map(|s| s.id.as_str()),
            "undo"
        );
        true
    }

    /// Re-appends the next recorded stroke. Returns `false` at the latest position.
    pub fn redo(&mut self, store: &mut StrokeStore) -> bool {
        let Some(next) = self.timeline.get(self.step).cloned() else {
            return false;
        };
        let id = next.id.clone();
        if !store.push(next) {
            tracing::debug!(id = %id, "redo skipped stroke already present");
        }
        self.step += 1;
        tracing::debug!(step = self.step, "redo");
        true
    }

    pub fn rescale(&mut self, scale_x: f64, scale_y: f64) {
        for stroke in &mut self.timeline {
            stroke.rescale(scale_x, scale_y);
        }
    }
}
