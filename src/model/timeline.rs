use chrono::{Datelike, Duration, NaiveDate};

use super::task::MaintenanceTask;

/// How far past today the window extends when there is nothing to show.
const EMPTY_WINDOW_DAYS: i64 = 30;

/// The visible `[start, end]` window of the timeline.
///
/// Derived from the task set on every frame, never persisted. Pending
/// overrides participate so the window follows a bar being dragged toward
/// either edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// One month column in the timeline header.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSegment {
    /// "January 2024" style label.
    pub label: String,
    /// Share of the total width, 0..=100.
    pub width_percent: f32,
}

/// Horizontal placement of one task bar, as percentages of the day span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub offset_percent: f32,
    pub width_percent: f32,
}

impl TimeRange {
    /// Span the minimum effective start to the maximum effective end across
    /// all tasks. A date that fails to parse is skipped individually; an
    /// empty list (or one where nothing parses) falls back to a 30-day
    /// window starting today.
    pub fn from_tasks(tasks: &[MaintenanceTask]) -> Self {
        let min_start = tasks.iter().filter_map(|t| t.effective_start()).min();
        let max_end = tasks.iter().filter_map(|t| t.effective_end()).max();

        match (min_start, max_end) {
            (Some(start), Some(end)) => Self {
                start,
                end: end.max(start),
            },
            _ => {
                let today = today();
                Self {
                    start: today,
                    end: today + Duration::days(EMPTY_WINDOW_DAYS),
                }
            }
        }
    }

    /// Inclusive day count of the window, never below 1.
    pub fn total_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(1)
    }

    /// Month columns for the header. A month only partially inside the window
    /// contributes its visible slice, not its calendar length.
    pub fn month_segments(&self) -> Vec<MonthSegment> {
        let total = self.total_days();
        if self.end < self.start {
            return Vec::new();
        }

        let mut segments = Vec::new();
        let mut cursor = self.start;
        while cursor <= self.end {
            let month_end = last_day_of_month(cursor);
            let slice_end = month_end.min(self.end);
            let days_in_slice = (slice_end - cursor).num_days() + 1;
            segments.push(MonthSegment {
                label: cursor.format("%B %Y").to_string(),
                width_percent: days_in_slice as f32 / total as f32 * 100.0,
            });
            cursor = slice_end + Duration::days(1);
        }
        segments
    }

    /// Offset of today within the window, in days. `None` when today is
    /// outside the visible span.
    pub fn today_offset(&self) -> Option<i64> {
        let offset = (today() - self.start).num_days();
        if offset >= 0 && offset < self.total_days() {
            Some(offset)
        } else {
            None
        }
    }
}

/// Map a task's effective dates to horizontal bar placement.
///
/// Returns `None` when either date is malformed, and culls bars whose offset
/// lands outside `[-total_days, total_days]` — far-flung dates must not blow
/// up the layout.
pub fn bar_geometry(range: &TimeRange, task: &MaintenanceTask) -> Option<BarGeometry> {
    let start = task.effective_start()?;
    let end = task.effective_end()?;
    let total = range.total_days();

    let offset_days = (start - range.start).num_days();
    if offset_days < -total || offset_days > total {
        return None;
    }

    let duration_days = (end - start).num_days() + 1;
    Some(BarGeometry {
        offset_percent: offset_days as f32 / total as f32 * 100.0,
        width_percent: duration_days as f32 / total as f32 * 100.0,
    })
}

/// Convert a pointer delta in pixels to a whole-day delta, rounding to the
/// nearest day. Zero when the surface has no extent yet.
pub fn pixel_delta_to_days(pixel_delta: f32, timeline_width: f32, total_days: i64) -> i64 {
    if timeline_width <= 0.0 || total_days <= 0 {
        return 0;
    }
    let day_width = timeline_width / total_days as f32;
    (pixel_delta / day_width).round() as i64
}

/// Today at day granularity, in local time.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first - Duration::days(1))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn task(start: NaiveDate, end: NaiveDate) -> MaintenanceTask {
        MaintenanceTask::new("test", start, end)
    }

    #[test]
    fn range_spans_min_start_to_max_end() {
        let tasks = vec![
            task(d(2024, 1, 10), d(2024, 1, 20)),
            task(d(2024, 1, 3), d(2024, 1, 8)),
            task(d(2024, 1, 15), d(2024, 2, 2)),
        ];
        let range = TimeRange::from_tasks(&tasks);
        assert_eq!(range.start, d(2024, 1, 3));
        assert_eq!(range.end, d(2024, 2, 2));
    }

    #[test]
    fn range_prefers_pending_overrides() {
        let mut t = task(d(2024, 1, 10), d(2024, 1, 12));
        t.pending = Some(crate::model::task::PendingDates {
            start: d(2024, 1, 1),
            end: d(2024, 1, 20),
        });
        let range = TimeRange::from_tasks(&[t]);
        assert_eq!(range.start, d(2024, 1, 1));
        assert_eq!(range.end, d(2024, 1, 20));
    }

    #[test]
    fn empty_list_falls_back_to_thirty_day_window() {
        let range = TimeRange::from_tasks(&[]);
        assert_eq!(range.start, today());
        assert_eq!(range.end, today() + Duration::days(30));
        assert_eq!(range.total_days(), 31);
    }

    #[test]
    fn malformed_task_is_skipped_individually() {
        let mut bad = task(d(2024, 1, 1), d(2024, 1, 2));
        bad.start_date = "not-a-date".to_string();
        bad.end_date = "also bad".to_string();
        let good = task(d(2024, 3, 5), d(2024, 3, 9));
        let range = TimeRange::from_tasks(&[bad, good]);
        assert_eq!(range.start, d(2024, 3, 5));
        assert_eq!(range.end, d(2024, 3, 9));
    }

    #[test]
    fn all_malformed_falls_back_to_default_window() {
        let mut bad = task(d(2024, 1, 1), d(2024, 1, 2));
        bad.start_date = "??".to_string();
        bad.end_date = "??".to_string();
        let range = TimeRange::from_tasks(&[bad]);
        assert_eq!(range.start, today());
        assert_eq!(range.end, today() + Duration::days(30));
    }

    #[test]
    fn total_days_is_inclusive_and_at_least_one() {
        let range = TimeRange {
            start: d(2024, 1, 1),
            end: d(2024, 1, 31),
        };
        assert_eq!(range.total_days(), 31);

        let single = TimeRange {
            start: d(2024, 1, 5),
            end: d(2024, 1, 5),
        };
        assert_eq!(single.total_days(), 1);
    }

    #[test]
    fn month_segments_split_partial_months() {
        // Jan 20 .. Feb 10: 12 days of January, 10 of February, 22 total.
        let range = TimeRange {
            start: d(2024, 1, 20),
            end: d(2024, 2, 10),
        };
        let segs = range.month_segments();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].label, "January 2024");
        assert_eq!(segs[1].label, "February 2024");
        assert!((segs[0].width_percent - 12.0 / 22.0 * 100.0).abs() < 1e-4);
        assert!((segs[1].width_percent - 10.0 / 22.0 * 100.0).abs() < 1e-4);
        let sum: f32 = segs.iter().map(|s| s.width_percent).sum();
        assert!((sum - 100.0).abs() < 1e-3);
    }

    #[test]
    fn month_segments_cross_year_boundary() {
        let range = TimeRange {
            start: d(2024, 12, 15),
            end: d(2025, 1, 15),
        };
        let segs = range.month_segments();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].label, "December 2024");
        assert_eq!(segs[1].label, "January 2025");
    }

    #[test]
    fn degenerate_range_renders_nothing() {
        let range = TimeRange {
            start: d(2024, 1, 10),
            end: d(2024, 1, 1),
        };
        assert!(range.month_segments().is_empty());
        assert_eq!(range.total_days(), 1);
    }

    #[test]
    fn geometry_matches_reference_scenario() {
        // Range [2024-01-01, 2024-01-31], task 01-05 .. 01-07.
        let range = TimeRange {
            start: d(2024, 1, 1),
            end: d(2024, 1, 31),
        };
        let t = task(d(2024, 1, 5), d(2024, 1, 7));
        let geo = bar_geometry(&range, &t).unwrap();
        assert!((geo.offset_percent - 12.903).abs() < 0.01);
        assert!((geo.width_percent - 9.677).abs() < 0.01);
    }

    #[test]
    fn geometry_round_trip_at_range_bounds() {
        let range = TimeRange {
            start: d(2024, 1, 1),
            end: d(2024, 1, 31),
        };
        let t = task(d(2024, 1, 1), d(2024, 1, 31));
        let geo = bar_geometry(&range, &t).unwrap();
        assert_eq!(geo.offset_percent, 0.0);
        assert!((geo.width_percent - 100.0).abs() < 1e-4);
    }

    #[test]
    fn far_out_of_window_bars_are_culled() {
        let range = TimeRange {
            start: d(2024, 1, 1),
            end: d(2024, 1, 31),
        };
        let far = task(d(2030, 6, 1), d(2030, 6, 2));
        assert!(bar_geometry(&range, &far).is_none());

        let mut bad = task(d(2024, 1, 5), d(2024, 1, 6));
        bad.end_date = "garbage".to_string();
        assert!(bar_geometry(&range, &bad).is_none());
    }

    #[test]
    fn pixel_delta_rounds_to_nearest_day() {
        // 310 px over 31 days: 10 px per day.
        assert_eq!(pixel_delta_to_days(30.0, 310.0, 31), 3);
        assert_eq!(pixel_delta_to_days(-25.0, 310.0, 31), -3);
        assert_eq!(pixel_delta_to_days(4.9, 310.0, 31), 0);
        assert_eq!(pixel_delta_to_days(5.1, 310.0, 31), 1);
    }

    #[test]
    fn pixel_delta_guards_degenerate_surface() {
        assert_eq!(pixel_delta_to_days(50.0, 0.0, 31), 0);
        assert_eq!(pixel_delta_to_days(50.0, -10.0, 31), 0);
        assert_eq!(pixel_delta_to_days(50.0, 310.0, 0), 0);
    }

    #[test]
    fn today_offset_only_inside_window() {
        let now = today();
        let range = TimeRange {
            start: now - Duration::days(5),
            end: now + Duration::days(5),
        };
        assert_eq!(range.today_offset(), Some(5));

        let past = TimeRange {
            start: now - Duration::days(20),
            end: now - Duration::days(10),
        };
        assert_eq!(past.today_offset(), None);

        let future = TimeRange {
            start: now + Duration::days(1),
            end: now + Duration::days(9),
        };
        assert_eq!(future.today_offset(), None);
    }
}
