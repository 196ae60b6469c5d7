use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;

use crate::model::task::{TaskPriority, TaskStatus};
use crate::model::{MaintenanceTask, Resource};
use crate::ui::theme;

/// Map a status string to a task status.
fn parse_status(status: &str) -> TaskStatus {
    match status.trim().to_lowercase().as_str() {
        "finished" | "done" | "complete" | "completed" => TaskStatus::Completed,
        "in progress" | "in-progress" | "active" | "started" => TaskStatus::InProgress,
        "overdue" | "late" => TaskStatus::Overdue,
        _ => TaskStatus::Scheduled,
    }
}

fn parse_priority(priority: &str) -> TaskPriority {
    match priority.trim().to_lowercase().as_str() {
        "critical" | "urgent" => TaskPriority::Critical,
        "high" => TaskPriority::High,
        "low" => TaskPriority::Low,
        _ => TaskPriority::Medium,
    }
}

/// Try parsing a date string with several common formats.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

/// Map a normalized header to our column index:
///   0 = title, 1 = start, 2 = end, 3 = status, 4 = priority,
///   5 = description, 6 = assignee
fn header_to_col(normalized: &str) -> Option<usize> {
    match normalized {
        "title" | "name" | "task" | "taskname" | "label" | "activity" | "workorder" => Some(0),

        "start" | "startdate" | "from" | "begin" | "begindate" | "scheduled" => Some(1),

        "end" | "enddate" | "to" | "finish" | "finishdate" | "due" | "duedate" => Some(2),

        "status" | "state" | "stage" => Some(3),

        "priority" | "pri" | "importance" | "severity" => Some(4),

        "description" | "notes" | "note" | "details" | "comment" | "comments" => Some(5),

        "assignee" | "assignedto" | "technician" | "crew" | "owner" | "resource" => Some(6),

        _ => None,
    }
}

/// Import tasks from a CSV file.
pub fn import_csv(path: &Path) -> Result<(Vec<MaintenanceTask>, Vec<Resource>, usize), String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file: {}", e))?;
    import_csv_from_str(&content)
}

/// Import tasks from CSV text.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches column headers
/// flexibly (e.g. "Work Order", "Assigned To", "Due Date"). Unknown assignee
/// names become new resources. Returns `(tasks, resources, skipped_count)`;
/// rows with a missing title or unparsable dates are skipped and counted.
pub fn import_csv_from_str(
    content: &str,
) -> Result<(Vec<MaintenanceTask>, Vec<Resource>, usize), String> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read CSV headers: {}", e))?
        .clone();

    let col_map: Vec<Option<usize>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    let has_title = col_map.iter().any(|c| *c == Some(0));
    let has_start = col_map.iter().any(|c| *c == Some(1));
    let has_end = col_map.iter().any(|c| *c == Some(2));

    if !has_title || !has_start || !has_end {
        let found: Vec<&str> = headers.iter().collect();
        return Err(format!(
            "CSV is missing required columns. Found headers: {:?}. \
             Need columns for: title, start date, end date.",
            found
        ));
    }

    let mut tasks: Vec<MaintenanceTask> = Vec::new();
    let mut resources: Vec<Resource> = Vec::new();
    let mut resource_ids: HashMap<String, uuid::Uuid> = HashMap::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("skipping CSV row {}: {}", i + 2, e);
                skipped += 1;
                continue;
            }
        };

        let mut fields: [Option<String>; 7] = Default::default();
        for (col_idx, field) in record.iter().enumerate() {
            if let Some(Some(slot)) = col_map.get(col_idx) {
                fields[*slot] = Some(field.trim().to_string());
            }
        }
        let [title, start, end, status, priority, description, assignee] = fields;

        let title = match title {
            Some(t) if !t.is_empty() => t,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let start = match start.as_deref().and_then(parse_date) {
            Some(d) => d,
            None => {
                log::warn!(
                    "skipping row {}: invalid start date '{}'",
                    i + 2,
                    start.as_deref().unwrap_or("")
                );
                skipped += 1;
                continue;
            }
        };

        let end = match end.as_deref().and_then(parse_date) {
            Some(d) => d,
            None => {
                log::warn!(
                    "skipping row {}: invalid end date '{}'",
                    i + 2,
                    end.as_deref().unwrap_or("")
                );
                skipped += 1;
                continue;
            }
        };

        let mut task = MaintenanceTask::new(title, start, end);
        task.status = status.as_deref().map(parse_status).unwrap_or(TaskStatus::Scheduled);
        task.priority = priority
            .as_deref()
            .map(parse_priority)
            .unwrap_or(TaskPriority::Medium);
        task.description = description.unwrap_or_default();
        task.color = theme::task_color(tasks.len());

        // Assignee names become resources, deduplicated case-insensitively.
        if let Some(name) = assignee.filter(|s| !s.is_empty()) {
            let key = name.to_lowercase();
            let id = *resource_ids.entry(key).or_insert_with(|| {
                let resource = Resource::new(name);
                let id = resource.id;
                resources.push(resource);
                id
            });
            task.assignee = Some(id);
        }

        tasks.push(task);
    }

    if tasks.is_empty() && skipped > 0 {
        return Err(format!("No valid tasks found in CSV ({} rows skipped)", skipped));
    }
    if tasks.is_empty() {
        return Err("CSV file is empty or has no data rows".to_string());
    }

    Ok((tasks, resources, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imports_flexible_headers_and_assignees() {
        let csv = "Work Order,Assigned To,Start Date,Due Date,Status,Priority\n\
                   Pump overhaul,Dana,2024-03-01,2024-03-05,In Progress,High\n\
                   Filter swap,dana,2024-03-06,2024-03-06,Scheduled,Low\n";
        let (tasks, resources, skipped) = import_csv_from_str(csv).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(skipped, 0);
        // Same name, different case: one resource, shared by both tasks.
        assert_eq!(resources.len(), 1);
        assert_eq!(tasks[0].assignee, tasks[1].assignee);
        assert_eq!(tasks[0].status, TaskStatus::InProgress);
        assert_eq!(tasks[0].priority, TaskPriority::High);
        assert_eq!(tasks[0].start_date, "2024-03-01");
    }

    #[test]
    fn skips_rows_with_bad_dates_and_counts_them() {
        let csv = "Title;Start;End\n\
                   Good;2024-01-02;2024-01-04\n\
                   Bad;yesterday;2024-01-05\n\
                   ;2024-01-06;2024-01-07\n";
        let (tasks, _, skipped) = import_csv_from_str(csv).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(skipped, 2);
        assert_eq!(tasks[0].title, "Good");
    }

    #[test]
    fn non_iso_dates_are_normalized_to_the_exchange_format() {
        let csv = "Title,Start,End\nInspection,01/02/2024,05/02/2024\n";
        let (tasks, _, _) = import_csv_from_str(csv).unwrap();
        assert_eq!(tasks[0].start_date, "2024-02-01");
        assert_eq!(tasks[0].end_date, "2024-02-05");
    }

    #[test]
    fn missing_required_columns_is_an_error() {
        let csv = "Title,Notes\nSomething,whatever\n";
        assert!(import_csv_from_str(csv).is_err());
    }

    #[test]
    fn inverted_dates_are_clamped() {
        let csv = "Title,Start,End\nFlipped,2024-05-10,2024-05-01\n";
        let (tasks, _, _) = import_csv_from_str(csv).unwrap();
        assert_eq!(tasks[0].start_date, "2024-05-10");
        assert_eq!(tasks[0].end_date, "2024-05-10");
    }
}
