/// Which pane a scroll offset was observed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    TaskList,
    Chart,
}

/// Keeps the task-list pane and the timeline surface vertically aligned.
///
/// Source-tagged rather than timer-guarded: each frame we record which pane
/// moved away from the shared offset, and on the next frame the *other* pane
/// is pinned to it. A pane is never pinned to an offset it produced itself,
/// so mirrored scrolls cannot cascade back.
#[derive(Debug, Default)]
pub struct ScrollSync {
    offset: f32,
    source: Option<Pane>,
}

impl ScrollSync {
    /// Offset this pane should be pinned to this frame, if the other pane
    /// drove a change.
    pub fn target_for(&self, pane: Pane) -> Option<f32> {
        match self.source {
            Some(source) if source != pane => Some(self.offset),
            _ => None,
        }
    }

    /// Record both panes' observed offsets after rendering. When both moved
    /// in the same frame the task list wins.
    pub fn end_frame(&mut self, list_offset: f32, chart_offset: f32) {
        if list_offset != self.offset {
            self.offset = list_offset;
            self.source = Some(Pane::TaskList);
        } else if chart_offset != self.offset {
            self.offset = chart_offset;
            self.source = Some(Pane::Chart);
        } else {
            self.source = None;
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_scroll_pins_the_chart_next_frame() {
        let mut sync = ScrollSync::default();
        sync.end_frame(120.0, 0.0);
        assert_eq!(sync.target_for(Pane::Chart), Some(120.0));
        assert_eq!(sync.target_for(Pane::TaskList), None);
    }

    #[test]
    fn chart_scroll_pins_the_list_next_frame() {
        let mut sync = ScrollSync::default();
        sync.end_frame(0.0, 64.0);
        assert_eq!(sync.target_for(Pane::TaskList), Some(64.0));
        assert_eq!(sync.target_for(Pane::Chart), None);
    }

    #[test]
    fn mirrored_offset_does_not_cascade_back() {
        let mut sync = ScrollSync::default();
        sync.end_frame(80.0, 0.0);
        // Next frame: the chart was pinned to 80, the list stayed put.
        sync.end_frame(80.0, 80.0);
        assert_eq!(sync.target_for(Pane::TaskList), None);
        assert_eq!(sync.target_for(Pane::Chart), None);
        assert_eq!(sync.offset(), 80.0);
    }

    #[test]
    fn continuous_scrolling_keeps_the_same_source() {
        let mut sync = ScrollSync::default();
        sync.end_frame(10.0, 0.0);
        sync.end_frame(20.0, 10.0);
        sync.end_frame(30.0, 20.0);
        assert_eq!(sync.target_for(Pane::Chart), Some(30.0));
    }

    #[test]
    fn simultaneous_movement_favors_the_task_list() {
        let mut sync = ScrollSync::default();
        sync.end_frame(40.0, 55.0);
        assert_eq!(sync.target_for(Pane::Chart), Some(40.0));
    }
}
