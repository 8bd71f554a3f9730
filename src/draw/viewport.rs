/// Tracks the drawing surface size so strokes can follow it when it changes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    size: Option<(f64, f64)>,
}

impl Viewport {
    pub fn size(&self) -> Option<(f64, f64)> {
        self.size
    }

    /// Records `size` and returns the `(x, y)` scale relative to the previous
    /// size, or `None` when there is nothing to rescale.
    ///
    /// Empty or non-finite sizes (a minimized window) are ignored and the last
    /// usable size is kept.
    pub fn resize(&mut self, size: (f64, f64)) -> Option<(f64, f64)> {
        if !is_usable(size) {
            tracing::debug!(?size, previous = ?self.size, "ignoring degenerate viewport");
            return None;
        }
        let previous = self.size.replace(size)?;
        if previous == size || !is_usable(previous) {
            return None;
        }
        Some((size.0 / previous.0, size.1 / previous.1))
    }
}

fn is_usable((width, height): (f64, f64)) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_size_is_recorded_without_rescale() {
        let mut viewport = Viewport::default();
        assert_eq!(viewport.resize((800.0, 600.0)), None);
        assert_eq!(viewport.size(), Some((800.0, 600.0)));
    }

    #[test]
    fn later_sizes_report_ratios() {
        let mut viewport = Viewport::default();
        viewport.resize((800.0, 600.0));
        assert_eq!(viewport.resize((1600.0, 300.0)), Some((2.0, 0.5)));
        assert_eq!(viewport.resize((1600.0, 300.0)), None);
    }

    #[test]
    fn degenerate_sizes_are_ignored() {
        let mut viewport = Viewport::default();
        assert_eq!(viewport.resize((0.0, 600.0)), None);
        assert_eq!(viewport.size(), None);

        viewport.resize((800.0, 600.0));
        assert_eq!(viewport.resize((0.0, 0.0)), None);
        assert_eq!(viewport.resize((800.0, 0.0)), None);
        assert_eq!(viewport.resize((f64::NAN, 600.0)), None);
        assert_eq!(viewport.resize((f64::INFINITY, 600.0)), None);
        assert_eq!(viewport.size(), Some((800.0, 600.0)));

        assert_eq!(viewport.resize((800.0, 600.0)), None);
        assert_eq!(viewport.resize((400.0, 300.0)), Some((0.5, 0.5)));
    }
}
