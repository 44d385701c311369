use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::NaiveDateTime;

pub type RecordId = u64;

/// The record kinds administered by the console, one table view each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Exams,
    Venues,
    Invigilators,
}

/// One table column: the field it reads, its header label, whether header
/// clicks may sort by it, and whether it renders right-aligned as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub numeric: bool,
}

/// A record field as seen by the sort comparator.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Number(f64),
    Time(NaiveDateTime),
    Missing,
}

impl FieldValue<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Native ordering for two present values. Mismatched kinds fall back to
    /// comparing their textual forms, mirroring how partially numeric columns
    /// degrade to string order.
    pub fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Number(a), FieldValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Time(a), FieldValue::Time(b)) => a.cmp(b),
            (FieldValue::Missing, FieldValue::Missing) => Ordering::Equal,
            (FieldValue::Missing, _) => Ordering::Greater,
            (_, FieldValue::Missing) => Ordering::Less,
            (a, b) => a.as_text().cmp(&b.as_text()),
        }
    }

    fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Time(t) => t.to_string(),
            FieldValue::Missing => String::new(),
        }
    }
}

/// A domain entity rendered as one table row.
pub trait Record {
    fn id(&self) -> RecordId;
    /// Value of a field for sorting. Unknown keys and absent values are `Missing`.
    fn field(&self, key: &str) -> FieldValue<'_>;
    /// Display text of a field, as rendered in its cell.
    fn cell(&self, key: &str) -> String;
    /// Lowercased concatenation of the display fields, matched against the
    /// search query. Formatted timestamps are included exactly as displayed.
    fn search_text(&self) -> String;
    /// Lines revealed when the row is expanded.
    fn detail_lines(&self) -> Vec<String>;

    fn columns() -> &'static [Column]
    where
        Self: Sized;

    fn title() -> &'static str
    where
        Self: Sized;
}

// ---------------------------------------------------------------- exams ----

/// One scheduled sitting of an exam in a venue. The core slot is the main
/// location; the rest are overflow or provision rooms.
#[derive(Debug, Clone)]
pub struct ExamSlot {
    pub venue: String,
    pub start: Option<NaiveDateTime>,
    pub length_minutes: Option<i64>,
    pub core: bool,
    pub provisions: Vec<String>,
}

impl ExamSlot {
    pub fn end(&self) -> Option<NaiveDateTime> {
        match (self.start, self.length_minutes) {
            (Some(start), Some(mins)) => Some(start + chrono::Duration::minutes(mins)),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        let mut line = format!(
            "{} — {} – {}",
            self.venue,
            format_when(self.start),
            format_when(self.end())
        );
        if self.core {
            line.push_str(" [core]");
        }
        if !self.provisions.is_empty() {
            line.push_str(" · ");
            line.push_str(&self.provisions.join(", "));
        }
        line
    }
}

#[derive(Debug, Clone)]
pub struct Exam {
    pub id: RecordId,
    pub code: String,
    pub subject: String,
    pub school: Option<String>,
    pub students: Option<u32>,
    pub slots: Vec<ExamSlot>,
}

const EXAM_COLUMNS: [Column; 6] = [
    Column { key: "code", label: "Exam Code", sortable: true, numeric: false },
    Column { key: "subject", label: "Subject", sortable: true, numeric: false },
    Column { key: "venues", label: "Venues", sortable: true, numeric: false },
    Column { key: "start", label: "Start Time", sortable: true, numeric: false },
    Column { key: "end", label: "End Time", sortable: true, numeric: false },
    Column { key: "duration", label: "Duration", sortable: false, numeric: false },
];

impl Exam {
    /// The main sitting: the core slot when one is flagged, else the first.
    pub fn primary_slot(&self) -> Option<&ExamSlot> {
        self.slots.iter().find(|s| s.core).or_else(|| self.slots.first())
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.primary_slot().and_then(|s| s.start)
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.primary_slot().and_then(|s| s.end())
    }

    pub fn venue_names(&self) -> String {
        self.slots
            .iter()
            .map(|s| s.venue.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn duration_text(&self) -> String {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => format_duration(start, end),
            _ => "N/A".to_string(),
        }
    }
}

impl Record for Exam {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "code" => FieldValue::Text(Cow::Borrowed(&self.code)),
            "subject" => FieldValue::Text(Cow::Borrowed(&self.subject)),
            "venues" => FieldValue::Text(Cow::Owned(self.venue_names())),
            "start" => self.start().map(FieldValue::Time).unwrap_or(FieldValue::Missing),
            "end" => self.end().map(FieldValue::Time).unwrap_or(FieldValue::Missing),
            _ => FieldValue::Missing,
        }
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "code" => self.code.clone(),
            "subject" => self.subject.clone(),
            "venues" => self.venue_names(),
            "start" => format_when(self.start()),
            "end" => format_when(self.end()),
            "duration" => self.duration_text(),
            _ => String::new(),
        }
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.code,
            self.subject,
            self.venue_names(),
            format_when(self.start()),
            format_when(self.end())
        )
        .to_lowercase()
    }

    fn detail_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(school) = &self.school {
            lines.push(format!("School: {school}"));
        }
        if let Some(students) = self.students {
            lines.push(format!("Students: {students}"));
        }
        if self.slots.is_empty() {
            lines.push("No venues scheduled".to_string());
        } else {
            lines.extend(self.slots.iter().map(ExamSlot::describe));
        }
        lines
    }

    fn columns() -> &'static [Column] {
        &EXAM_COLUMNS
    }

    fn title() -> &'static str {
        "Exams"
    }
}

// --------------------------------------------------------------- venues ----

#[derive(Debug, Clone)]
pub struct Venue {
    pub id: RecordId,
    pub code: String,
    pub name: String,
    pub building: String,
    pub capacity: u32,
    pub kind: String,
    pub accessible: bool,
    /// Exam sittings held here, filled in by the data source after loading.
    pub scheduled: Vec<String>,
}

const VENUE_COLUMNS: [Column; 5] = [
    Column { key: "code", label: "Venue Code", sortable: true, numeric: false },
    Column { key: "name", label: "Name", sortable: true, numeric: false },
    Column { key: "building", label: "Building", sortable: true, numeric: false },
    Column { key: "capacity", label: "Capacity", sortable: true, numeric: true },
    Column { key: "type", label: "Type", sortable: true, numeric: false },
];

impl Record for Venue {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "code" => FieldValue::Text(Cow::Borrowed(&self.code)),
            "name" => FieldValue::Text(Cow::Borrowed(&self.name)),
            "building" => FieldValue::Text(Cow::Borrowed(&self.building)),
            "capacity" => FieldValue::Number(f64::from(self.capacity)),
            "type" => FieldValue::Text(Cow::Borrowed(&self.kind)),
            _ => FieldValue::Missing,
        }
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "code" => self.code.clone(),
            "name" => self.name.clone(),
            "building" => self.building.clone(),
            "capacity" => self.capacity.to_string(),
            "type" => self.kind.clone(),
            _ => String::new(),
        }
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.code, self.name, self.building, self.kind, self.capacity
        )
        .to_lowercase()
    }

    fn detail_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Accessible: {}",
            if self.accessible { "yes" } else { "no" }
        )];
        if self.scheduled.is_empty() {
            lines.push("No exams scheduled".to_string());
        } else {
            lines.extend(self.scheduled.iter().cloned());
        }
        lines
    }

    fn columns() -> &'static [Column] {
        &VENUE_COLUMNS
    }

    fn title() -> &'static str {
        "Venues"
    }
}

// --------------------------------------------------------- invigilators ----

#[derive(Debug, Clone)]
pub struct Invigilator {
    pub id: RecordId,
    pub full_name: Option<String>,
    pub preferred_name: Option<String>,
    pub email: Option<String>,
    pub available_slots: Vec<NaiveDateTime>,
}

const INVIGILATOR_COLUMNS: [Column; 3] = [
    Column { key: "name", label: "Name", sortable: true, numeric: false },
    Column { key: "email", label: "Email", sortable: true, numeric: false },
    Column { key: "slots", label: "Availability", sortable: true, numeric: true },
];

impl Invigilator {
    pub fn display_name(&self) -> &str {
        self.preferred_name
            .as_deref()
            .or(self.full_name.as_deref())
            .unwrap_or("(unnamed)")
    }
}

impl Record for Invigilator {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "name" => FieldValue::Text(Cow::Borrowed(self.display_name())),
            "email" => match self.email.as_deref() {
                Some(email) => FieldValue::Text(Cow::Borrowed(email)),
                None => FieldValue::Missing,
            },
            "slots" => FieldValue::Number(self.available_slots.len() as f64),
            _ => FieldValue::Missing,
        }
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "name" => self.display_name().to_string(),
            "email" => self.email.clone().unwrap_or_default(),
            "slots" => self.available_slots.len().to_string(),
            _ => String::new(),
        }
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.full_name.as_deref().unwrap_or_default(),
            self.preferred_name.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }

    fn detail_lines(&self) -> Vec<String> {
        if self.available_slots.is_empty() {
            return vec!["No availability submitted".to_string()];
        }
        self.available_slots
            .iter()
            .map(|slot| format_when(Some(*slot)))
            .collect()
    }

    fn columns() -> &'static [Column] {
        &INVIGILATOR_COLUMNS
    }

    fn title() -> &'static str {
        "Invigilators"
    }
}

// ----------------------------------------------------------- formatting ----

/// "Nov 15, 09:00 AM", or "N/A" when the timestamp is absent.
pub fn format_when(when: Option<NaiveDateTime>) -> String {
    match when {
        Some(t) => t.format("%b %-d, %I:%M %p").to_string(),
        None => "N/A".to_string(),
    }
}

/// "2h 30m" style span between two timestamps; "N/A" when not positive.
pub fn format_duration(start: NaiveDateTime, end: NaiveDateTime) -> String {
    let minutes = (end - start).num_minutes();
    if minutes <= 0 {
        return "N/A".to_string();
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if rest > 0 {
        parts.push(format!("{rest}m"));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn exam() -> Exam {
        Exam {
            id: 1,
            code: "MATH201".to_string(),
            subject: "Calculus II".to_string(),
            school: Some("Mathematics".to_string()),
            students: Some(120),
            slots: vec![
                ExamSlot {
                    venue: "Hall C".to_string(),
                    start: Some(at(2025, 11, 16, 14, 0)),
                    length_minutes: Some(150),
                    core: false,
                    provisions: vec![],
                },
                ExamSlot {
                    venue: "Room B205".to_string(),
                    start: Some(at(2025, 11, 16, 14, 0)),
                    length_minutes: Some(150),
                    core: true,
                    provisions: vec!["extra_time".to_string()],
                },
            ],
        }
    }

    #[test]
    fn primary_slot_prefers_core() {
        let exam = exam();
        assert_eq!(exam.primary_slot().unwrap().venue, "Room B205");
    }

    #[test]
    fn first_slot_is_primary_without_core_flag() {
        let mut exam = exam();
        for slot in &mut exam.slots {
            slot.core = false;
        }
        assert_eq!(exam.primary_slot().unwrap().venue, "Hall C");
    }

    #[test]
    fn end_time_is_start_plus_length() {
        let exam = exam();
        assert_eq!(exam.end(), Some(at(2025, 11, 16, 16, 30)));
        assert_eq!(exam.duration_text(), "2h 30m");
    }

    #[test]
    fn when_formatting_matches_display_style() {
        assert_eq!(format_when(Some(at(2025, 11, 15, 9, 0))), "Nov 15, 09:00 AM");
        assert_eq!(format_when(None), "N/A");
    }

    #[test]
    fn duration_edge_cases() {
        let start = at(2025, 11, 15, 9, 0);
        assert_eq!(format_duration(start, at(2025, 11, 15, 11, 0)), "2h");
        assert_eq!(format_duration(start, at(2025, 11, 15, 9, 45)), "45m");
        assert_eq!(format_duration(start, start), "N/A");
        assert_eq!(format_duration(start, at(2025, 11, 15, 8, 0)), "N/A");
    }

    #[test]
    fn search_text_includes_formatted_times() {
        let text = exam().search_text();
        assert!(text.contains("math201"));
        assert!(text.contains("calculus"));
        assert!(text.contains("nov 16, 02:00 pm"));
        assert!(text.contains("hall c"));
    }

    #[test]
    fn missing_fields_compare_last() {
        let missing = FieldValue::Missing;
        let text = FieldValue::Text(Cow::Borrowed("a"));
        assert_eq!(missing.compare(&text), Ordering::Greater);
        assert_eq!(text.compare(&missing), Ordering::Less);
        assert_eq!(missing.compare(&FieldValue::Missing), Ordering::Equal);
    }

    #[test]
    fn invigilator_name_fallbacks() {
        let mut inv = Invigilator {
            id: 7,
            full_name: Some("Alexandra Chen".to_string()),
            preferred_name: Some("Alex Chen".to_string()),
            email: Some("alex.chen@uni.example".to_string()),
            available_slots: vec![],
        };
        assert_eq!(inv.display_name(), "Alex Chen");
        inv.preferred_name = None;
        assert_eq!(inv.display_name(), "Alexandra Chen");
        inv.full_name = None;
        assert_eq!(inv.display_name(), "(unnamed)");
    }
}
