use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exchange format for all calendar dates: ISO `YYYY-MM-DD`, day granularity.
pub const DATE_FMT: &str = "%Y-%m-%d";

/// Parse a date in the exchange format. Returns `None` for anything malformed.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FMT).ok()
}

/// Format a date in the exchange format.
pub fn format_iso_date(d: NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

/// Workflow status of a maintenance task. Display only — the timeline engine
/// never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Scheduled,
    InProgress,
    Completed,
    Overdue,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Scheduled => "Scheduled",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Overdue => "Overdue",
        }
    }

    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Scheduled,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Overdue,
    ];
}

/// Priority of a maintenance task. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    pub fn label(self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Critical => "Critical",
        }
    }

    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Critical,
    ];
}

/// In-flight date override written by the drag/resize controller.
///
/// Present only while its task is the subject of an active interaction;
/// committed or cleared on pointer release. Never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDates {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A single scheduled maintenance task.
///
/// Committed dates are kept in the exchange format (ISO strings) because that
/// is what external stores hand us; a task with an unparsable date stays in
/// the list but drops out of timeline math until corrected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceTask {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Resource responsible for the work, resolved via the plan's lookup.
    #[serde(default)]
    pub assignee: Option<Uuid>,
    pub start_date: String,
    pub end_date: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Display color for the task bar (stored as RGBA).
    #[serde(with = "color_serde")]
    pub color: Color32,
    #[serde(skip)]
    pub pending: Option<PendingDates>,
}

impl MaintenanceTask {
    /// Create a new task with sensible defaults.
    pub fn new(title: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            assignee: None,
            start_date: format_iso_date(start),
            end_date: format_iso_date(end.max(start)),
            status: TaskStatus::Scheduled,
            priority: TaskPriority::Medium,
            color: Color32::from_rgb(70, 130, 180), // Steel blue
            pending: None,
        }
    }

    /// Committed start date, if it parses.
    pub fn start(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.start_date)
    }

    /// Committed end date, if it parses.
    pub fn end(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.end_date)
    }

    /// Start date the timeline should use: pending override first.
    pub fn effective_start(&self) -> Option<NaiveDate> {
        self.pending.map(|p| p.start).or_else(|| self.start())
    }

    /// End date the timeline should use: pending override first.
    pub fn effective_end(&self) -> Option<NaiveDate> {
        self.pending.map(|p| p.end).or_else(|| self.end())
    }

    /// Write committed dates, restoring the `start <= end` invariant.
    pub fn set_dates(&mut self, start: NaiveDate, end: NaiveDate) {
        let end = end.max(start);
        self.start_date = format_iso_date(start);
        self.end_date = format_iso_date(end);
    }
}

/// Serde helper for `Color32`.
mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rgba = [color.r(), color.g(), color.b(), color.a()];
        rgba.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgba: [u8; 4] = Deserialize::deserialize(deserializer)?;
        Ok(Color32::from_rgba_premultiplied(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn new_task_keeps_start_before_end() {
        let t = MaintenanceTask::new("Pump check", d(2024, 3, 10), d(2024, 3, 5));
        assert_eq!(t.start_date, "2024-03-10");
        assert_eq!(t.end_date, "2024-03-10");
    }

    #[test]
    fn effective_dates_prefer_pending_override() {
        let mut t = MaintenanceTask::new("Filter swap", d(2024, 1, 5), d(2024, 1, 7));
        assert_eq!(t.effective_start(), Some(d(2024, 1, 5)));
        t.pending = Some(PendingDates {
            start: d(2024, 1, 8),
            end: d(2024, 1, 10),
        });
        assert_eq!(t.effective_start(), Some(d(2024, 1, 8)));
        assert_eq!(t.effective_end(), Some(d(2024, 1, 10)));
        // Committed strings untouched until a commit happens.
        assert_eq!(t.start_date, "2024-01-05");
    }

    #[test]
    fn malformed_date_yields_none() {
        let mut t = MaintenanceTask::new("Boiler audit", d(2024, 6, 1), d(2024, 6, 3));
        t.start_date = "06/01/2024".to_string();
        assert_eq!(t.start(), None);
        assert_eq!(t.effective_start(), None);
        assert_eq!(t.end(), Some(d(2024, 6, 3)));
    }

    #[test]
    fn set_dates_clamps_inverted_input() {
        let mut t = MaintenanceTask::new("Inspection", d(2024, 2, 1), d(2024, 2, 2));
        t.set_dates(d(2024, 2, 10), d(2024, 2, 4));
        assert_eq!(t.start(), Some(d(2024, 2, 10)));
        assert_eq!(t.end(), Some(d(2024, 2, 10)));
    }

    #[test]
    fn pending_is_not_serialized() {
        let mut t = MaintenanceTask::new("Valve test", d(2024, 4, 1), d(2024, 4, 2));
        t.pending = Some(PendingDates {
            start: d(2024, 4, 3),
            end: d(2024, 4, 4),
        });
        let json = serde_json::to_string(&t).unwrap();
        let back: MaintenanceTask = serde_json::from_str(&json).unwrap();
        assert!(back.pending.is_none());
        assert_eq!(back.start_date, "2024-04-01");
    }
}
