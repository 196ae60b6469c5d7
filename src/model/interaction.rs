use chrono::Duration;
use uuid::Uuid;

use super::task::{MaintenanceTask, PendingDates};
use super::timeline::pixel_delta_to_days;

/// Which end of a bar a resize grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEdge {
    Start,
    End,
}

/// The drag/resize state machine. At most one interaction is live at a time;
/// the enum value itself is the single active slot.
///
/// Day deltas are always computed from the origin pointer position against
/// the task's committed dates, so intermediate moves never accumulate
/// rounding error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    Idle,
    Dragging { task: Uuid, origin_x: f32 },
    Resizing { task: Uuid, edge: DragEdge, origin_x: f32 },
}

impl Default for Interaction {
    fn default() -> Self {
        Interaction::Idle
    }
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    /// The task currently being manipulated, if any.
    pub fn subject(&self) -> Option<Uuid> {
        match *self {
            Interaction::Idle => None,
            Interaction::Dragging { task, .. } | Interaction::Resizing { task, .. } => Some(task),
        }
    }

    /// Pointer-down on a bar body. A second pointer-down while an interaction
    /// is already live is ignored until the current one resolves.
    pub fn begin_move(&mut self, task: Uuid, pointer_x: f32) {
        if self.is_idle() {
            *self = Interaction::Dragging {
                task,
                origin_x: pointer_x,
            };
        }
    }

    /// Pointer-down on an edge handle. Same single-slot rule as `begin_move`.
    pub fn begin_resize(&mut self, task: Uuid, edge: DragEdge, pointer_x: f32) {
        if self.is_idle() {
            *self = Interaction::Resizing {
                task,
                edge,
                origin_x: pointer_x,
            };
        }
    }

    /// Pointer-move self-loop. Writes the subject task's pending override and
    /// returns whether anything changed, so the caller can skip a repaint on
    /// zero-delta moves.
    ///
    /// A subject task with malformed committed dates skips this move
    /// silently; the interaction stays live so a later move (or release) can
    /// still resolve it.
    pub fn pointer_moved(
        &self,
        tasks: &mut [MaintenanceTask],
        pointer_x: f32,
        timeline_width: f32,
        total_days: i64,
    ) -> bool {
        let (task_id, origin_x) = match *self {
            Interaction::Idle => return false,
            Interaction::Dragging { task, origin_x } => (task, origin_x),
            Interaction::Resizing { task, origin_x, .. } => (task, origin_x),
        };

        let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) else {
            return false;
        };
        let (Some(start), Some(end)) = (task.start(), task.end()) else {
            log::debug!("skipping move for task with malformed dates: {}", task.title);
            return false;
        };

        let delta = pixel_delta_to_days(pointer_x - origin_x, timeline_width, total_days);
        if delta == 0 {
            return false;
        }
        let shift = Duration::days(delta);

        let pending = match *self {
            Interaction::Dragging { .. } => PendingDates {
                start: start + shift,
                end: end + shift,
            },
            Interaction::Resizing {
                edge: DragEdge::Start,
                ..
            } => PendingDates {
                // Duration may collapse to zero but never inverts.
                start: (start + shift).min(end),
                end,
            },
            Interaction::Resizing {
                edge: DragEdge::End,
                ..
            } => PendingDates {
                start,
                end: (end + shift).max(start),
            },
            Interaction::Idle => unreachable!(),
        };

        if task.pending == Some(pending) {
            return false;
        }
        task.pending = Some(pending);
        true
    }

    /// Pointer-up. Commits the subject's pending override (if any) into its
    /// committed dates, clears pending state on every task, and returns the
    /// committed task's id so the owner can persist the change. A click with
    /// zero net movement commits nothing.
    pub fn release(&mut self, tasks: &mut [MaintenanceTask]) -> Option<Uuid> {
        let subject = self.subject();
        *self = Interaction::Idle;

        let mut committed = None;
        for task in tasks.iter_mut() {
            if let Some(pending) = task.pending.take() {
                if Some(task.id) == subject {
                    task.set_dates(pending.start, pending.end);
                    committed = Some(task.id);
                }
            }
        }
        committed
    }

    /// Abort the interaction, discarding pending overrides on every task.
    pub fn cancel(&mut self, tasks: &mut [MaintenanceTask]) {
        *self = Interaction::Idle;
        for task in tasks.iter_mut() {
            task.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // 310 px surface over 31 days: 10 px per day.
    const WIDTH: f32 = 310.0;
    const DAYS: i64 = 31;

    fn task(start: NaiveDate, end: NaiveDate) -> MaintenanceTask {
        MaintenanceTask::new("test", start, end)
    }

    #[test]
    fn move_preserves_duration_exactly() {
        let mut tasks = vec![task(d(2024, 1, 5), d(2024, 1, 7))];
        let id = tasks[0].id;
        let mut ix = Interaction::Idle;

        ix.begin_move(id, 100.0);
        // +30 px = +3 days.
        assert!(ix.pointer_moved(&mut tasks, 130.0, WIDTH, DAYS));
        let pending = tasks[0].pending.unwrap();
        assert_eq!(pending.start, d(2024, 1, 8));
        assert_eq!(pending.end, d(2024, 1, 10));

        let committed = ix.release(&mut tasks);
        assert_eq!(committed, Some(id));
        assert_eq!(tasks[0].start_date, "2024-01-08");
        assert_eq!(tasks[0].end_date, "2024-01-10");
        assert!(tasks[0].pending.is_none());
        assert!(ix.is_idle());
    }

    #[test]
    fn zero_delta_move_is_a_noop() {
        let mut tasks = vec![task(d(2024, 1, 5), d(2024, 1, 7))];
        let id = tasks[0].id;
        let mut ix = Interaction::Idle;

        ix.begin_move(id, 100.0);
        // 4 px rounds to 0 days.
        assert!(!ix.pointer_moved(&mut tasks, 104.0, WIDTH, DAYS));
        assert!(tasks[0].pending.is_none());
    }

    #[test]
    fn repeated_same_delta_publishes_once() {
        let mut tasks = vec![task(d(2024, 1, 5), d(2024, 1, 7))];
        let id = tasks[0].id;
        let mut ix = Interaction::Idle;

        ix.begin_move(id, 100.0);
        assert!(ix.pointer_moved(&mut tasks, 120.0, WIDTH, DAYS));
        assert!(!ix.pointer_moved(&mut tasks, 121.0, WIDTH, DAYS));
    }

    #[test]
    fn resize_start_clamps_at_end_date() {
        let mut tasks = vec![task(d(2024, 1, 5), d(2024, 1, 7))];
        let id = tasks[0].id;
        let mut ix = Interaction::Idle;

        ix.begin_resize(id, DragEdge::Start, 100.0);
        // +100 px = +10 days, far past the end date.
        assert!(ix.pointer_moved(&mut tasks, 200.0, WIDTH, DAYS));
        let pending = tasks[0].pending.unwrap();
        assert_eq!(pending.start, d(2024, 1, 7));
        assert_eq!(pending.end, d(2024, 1, 7));
    }

    #[test]
    fn resize_end_clamps_at_start_date() {
        let mut tasks = vec![task(d(2024, 1, 5), d(2024, 1, 7))];
        let id = tasks[0].id;
        let mut ix = Interaction::Idle;

        ix.begin_resize(id, DragEdge::End, 200.0);
        assert!(ix.pointer_moved(&mut tasks, 100.0, WIDTH, DAYS));
        let pending = tasks[0].pending.unwrap();
        assert_eq!(pending.start, d(2024, 1, 5));
        assert_eq!(pending.end, d(2024, 1, 5));
    }

    #[test]
    fn resize_end_extends_duration() {
        let mut tasks = vec![task(d(2024, 1, 5), d(2024, 1, 7))];
        let id = tasks[0].id;
        let mut ix = Interaction::Idle;

        ix.begin_resize(id, DragEdge::End, 100.0);
        assert!(ix.pointer_moved(&mut tasks, 150.0, WIDTH, DAYS));
        assert_eq!(ix.release(&mut tasks), Some(id));
        assert_eq!(tasks[0].start_date, "2024-01-05");
        assert_eq!(tasks[0].end_date, "2024-01-12");
    }

    #[test]
    fn click_without_movement_commits_nothing() {
        let mut tasks = vec![task(d(2024, 1, 5), d(2024, 1, 7))];
        let id = tasks[0].id;
        let mut ix = Interaction::Idle;

        ix.begin_move(id, 100.0);
        assert_eq!(ix.release(&mut tasks), None);
        assert_eq!(tasks[0].start_date, "2024-01-05");
        assert_eq!(tasks[0].end_date, "2024-01-07");
        assert!(ix.is_idle());
    }

    #[test]
    fn second_pointer_down_is_ignored_while_live() {
        let mut tasks = vec![
            task(d(2024, 1, 5), d(2024, 1, 7)),
            task(d(2024, 1, 10), d(2024, 1, 12)),
        ];
        let first = tasks[0].id;
        let second = tasks[1].id;
        let mut ix = Interaction::Idle;

        ix.begin_move(first, 100.0);
        ix.begin_resize(second, DragEdge::End, 50.0);
        assert_eq!(ix.subject(), Some(first));
    }

    #[test]
    fn malformed_dates_skip_the_move_but_keep_interaction_live() {
        let mut tasks = vec![task(d(2024, 1, 5), d(2024, 1, 7))];
        let id = tasks[0].id;
        tasks[0].end_date = "not-a-date".to_string();
        let mut ix = Interaction::Idle;

        ix.begin_move(id, 100.0);
        assert!(!ix.pointer_moved(&mut tasks, 150.0, WIDTH, DAYS));
        assert!(tasks[0].pending.is_none());
        assert!(!ix.is_idle());

        // Data corrected mid-interaction: the next move applies.
        tasks[0].end_date = "2024-01-07".to_string();
        assert!(ix.pointer_moved(&mut tasks, 150.0, WIDTH, DAYS));
    }

    #[test]
    fn release_clears_stale_pending_on_other_tasks() {
        let mut tasks = vec![
            task(d(2024, 1, 5), d(2024, 1, 7)),
            task(d(2024, 1, 10), d(2024, 1, 12)),
        ];
        let id = tasks[0].id;
        tasks[1].pending = Some(PendingDates {
            start: d(2024, 2, 1),
            end: d(2024, 2, 2),
        });
        let mut ix = Interaction::Idle;

        ix.begin_move(id, 100.0);
        ix.pointer_moved(&mut tasks, 110.0, WIDTH, DAYS);
        ix.release(&mut tasks);
        assert!(tasks.iter().all(|t| t.pending.is_none()));
        // The stale override on the non-subject task was discarded, not committed.
        assert_eq!(tasks[1].start_date, "2024-01-10");
    }

    #[test]
    fn cancel_discards_pending_and_restores_committed_dates() {
        let mut tasks = vec![task(d(2024, 1, 5), d(2024, 1, 7))];
        let id = tasks[0].id;
        let mut ix = Interaction::Idle;

        ix.begin_move(id, 100.0);
        ix.pointer_moved(&mut tasks, 160.0, WIDTH, DAYS);
        assert!(tasks[0].pending.is_some());
        ix.cancel(&mut tasks);
        assert!(ix.is_idle());
        assert!(tasks[0].pending.is_none());
        assert_eq!(tasks[0].start_date, "2024-01-05");
    }

    #[test]
    fn moves_track_the_latest_pointer_position() {
        let mut tasks = vec![task(d(2024, 1, 5), d(2024, 1, 7))];
        let id = tasks[0].id;
        let mut ix = Interaction::Idle;

        ix.begin_move(id, 100.0);
        ix.pointer_moved(&mut tasks, 150.0, WIDTH, DAYS);
        // Drag back toward the origin: delta shrinks from +5 to +1.
        ix.pointer_moved(&mut tasks, 110.0, WIDTH, DAYS);
        let pending = tasks[0].pending.unwrap();
        assert_eq!(pending.start, d(2024, 1, 6));
        assert_eq!(pending.end, d(2024, 1, 8));
    }
}
