use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::InvigilError;
use crate::health::StoreHealth;
use crate::records::{Exam, ExamSlot, Invigilator, Kind, Venue, format_when};

#[derive(Debug, Clone, Copy, PartialEq)]
enum FileType {
    JSON,
    CSV,
    PARQUET,
    ARROW,
}

#[derive(Debug)]
struct FileInfo {
    path: PathBuf,
    file_type: FileType,
}

/// One immutable snapshot of every record kind. Replaced wholesale on
/// reload; nothing downstream mutates it.
#[derive(Debug, Default)]
pub struct DataSet {
    pub exams: Vec<Exam>,
    pub venues: Vec<Venue>,
    pub invigilators: Vec<Invigilator>,
}

/// Where records come from: a directory of per-kind data files, or the
/// built-in demo dataset when nothing is configured. Constructed once and
/// passed into the model, probed by the health check.
#[derive(Debug, Clone)]
pub struct DataSource {
    root: Option<PathBuf>,
}

impl DataSource {
    pub fn new(root: Option<PathBuf>) -> Self {
        DataSource { root }
    }

    pub fn describe(&self) -> String {
        match &self.root {
            Some(root) => root.display().to_string(),
            None => "demo dataset".to_string(),
        }
    }

    /// Fetch a fresh snapshot. The three kinds load in parallel; each missing
    /// file yields an empty set rather than a failure, an unreadable one
    /// fails the whole load.
    pub fn load(&self) -> Result<DataSet, InvigilError> {
        let Some(root) = &self.root else {
            info!("No data path configured, using the demo dataset");
            let mut set = demo_dataset();
            link_schedule(&mut set);
            return Ok(set);
        };
        check_root(root)?;

        let (exams, rest) = rayon::join(
            || load_exams(root),
            || rayon::join(|| load_venues(root), || load_invigilators(root)),
        );
        let (venues, invigilators) = rest;
        let mut set = DataSet {
            exams: exams?,
            venues: venues?,
            invigilators: invigilators?,
        };
        link_schedule(&mut set);
        info!(
            "Loaded {} exams, {} venues, {} invigilators from {}",
            set.exams.len(),
            set.venues.len(),
            set.invigilators.len(),
            root.display()
        );
        Ok(set)
    }

    /// The trivial-read probe behind the health report: skipped when no path
    /// is configured, ok when the directory holds at least one readable data
    /// file, error otherwise.
    pub fn probe(&self) -> StoreHealth {
        let Some(root) = &self.root else {
            return StoreHealth::Skipped {
                reason: "data path not configured".to_string(),
            };
        };
        if let Err(e) = fs::read_dir(root) {
            return StoreHealth::Error {
                error: format!("{}: {e}", root.display()),
            };
        }
        let found: Vec<FileInfo> = ["exams", "venues", "invigilators"]
            .iter()
            .filter_map(|stem| find_data_file(root, stem))
            .collect();
        let Some(first) = found.first() else {
            return StoreHealth::Error {
                error: format!("no data files found in {}", root.display()),
            };
        };
        match File::open(&first.path) {
            Ok(_) => StoreHealth::Ok,
            Err(e) => StoreHealth::Error {
                error: format!("{}: {e}", first.path.display()),
            },
        }
    }
}

fn check_root(root: &Path) -> Result<(), InvigilError> {
    let metadata = fs::metadata(root).map_err(|e| match e.kind() {
        ErrorKind::NotFound => InvigilError::FileNotFound(root.to_path_buf()),
        ErrorKind::PermissionDenied => InvigilError::PermissionDenied(root.to_path_buf()),
        _ => InvigilError::IoError(e),
    })?;
    if !metadata.is_dir() {
        return Err(InvigilError::LoadingFailed(format!(
            "{} is not a directory",
            root.display()
        )));
    }
    Ok(())
}

fn detect_file_type(path: &Path) -> Result<FileType, InvigilError> {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_uppercase())
        .as_deref()
    {
        Some("JSON") => Ok(FileType::JSON),
        Some("CSV") => Ok(FileType::CSV),
        Some("PARQUET") | Some("PQ") => Ok(FileType::PARQUET),
        Some("ARROW") | Some("IPC") | Some("FEATHER") => Ok(FileType::ARROW),
        _ => Err(InvigilError::UnknownFileType(path.to_path_buf())),
    }
}

fn find_data_file(root: &Path, stem: &str) -> Option<FileInfo> {
    const EXTENSIONS: [&str; 7] = ["json", "csv", "parquet", "pq", "arrow", "ipc", "feather"];
    for ext in EXTENSIONS {
        let path = root.join(format!("{stem}.{ext}"));
        if path.is_file()
            && let Ok(file_type) = detect_file_type(&path)
        {
            return Some(FileInfo { path, file_type });
        }
    }
    None
}

// ------------------------------------------------------------ JSON shape ----
// Mirrors the REST payloads the admin views consumed.

#[derive(Debug, Deserialize)]
struct ApiExamVenue {
    venue_name: String,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    exam_length: Option<i64>,
    #[serde(default)]
    core: bool,
    #[serde(default)]
    provision_capabilities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiExam {
    exam_id: u64,
    exam_name: String,
    course_code: String,
    #[serde(default)]
    exam_school: Option<String>,
    #[serde(default)]
    no_students: Option<u32>,
    #[serde(default)]
    exam_venues: Vec<ApiExamVenue>,
}

impl ApiExam {
    fn into_exam(self) -> Exam {
        Exam {
            id: self.exam_id,
            code: self.course_code,
            subject: self.exam_name,
            school: self.exam_school,
            students: self.no_students,
            slots: self
                .exam_venues
                .into_iter()
                .map(|v| ExamSlot {
                    start: v.start_time.as_deref().and_then(parse_when),
                    venue: v.venue_name,
                    length_minutes: v.exam_length,
                    core: v.core,
                    provisions: v.provision_capabilities,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiVenue {
    id: u64,
    code: String,
    name: String,
    #[serde(default)]
    building: String,
    #[serde(default)]
    capacity: u32,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default = "default_accessible")]
    accessible: bool,
}

fn default_accessible() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ApiInvigilator {
    id: u64,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    preferred_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, alias = "availableSlots")]
    available_slots: Vec<String>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, InvigilError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

// --------------------------------------------------------- tabular shape ----
// Timetable exports arrive as spreadsheets with messy headers. Every column
// is read as text, headers are normalized and mapped to canonical names, and
// unparseable cells become absent fields rather than load failures.

struct Table {
    height: usize,
    columns: HashMap<String, Vec<Option<String>>>,
}

impl Table {
    fn cell(&self, key: &str, row: usize) -> Option<String> {
        self.columns
            .get(key)
            .and_then(|col| col.get(row).cloned())
            .flatten()
    }
}

fn load_table(info: &FileInfo, kind: Kind) -> Result<Table, InvigilError> {
    let frame = match info.file_type {
        FileType::CSV => load_csv(&info.path)?,
        FileType::PARQUET => load_parquet(&info.path)?,
        FileType::ARROW => load_arrow(&info.path)?,
        FileType::JSON => {
            return Err(InvigilError::LoadingFailed(format!(
                "{} is not a tabular file",
                info.path.display()
            )));
        }
    };
    let df = frame.collect()?;
    let mut columns = HashMap::new();
    for name in df.get_column_names() {
        let canonical = canonical_header(kind, &normalize_header(name));
        let col = df.column(name)?.cast(&DataType::String)?;
        let series = col.str()?;
        let values: Vec<Option<String>> = series
            .into_iter()
            .map(|v| {
                v.map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
            })
            .collect();
        columns.insert(canonical, values);
    }
    debug!(
        "Loaded {} ({} rows, columns: {:?})",
        info.path.display(),
        df.height(),
        columns.keys().collect::<Vec<_>>()
    );
    Ok(Table {
        height: df.height(),
        columns,
    })
}

fn load_csv(path: &PathBuf) -> Result<LazyFrame, PolarsError> {
    LazyCsvReader::new(PlPath::Local(path.as_path().into()))
        .with_has_header(true)
        .finish()
}

fn load_parquet(path: &PathBuf) -> Result<LazyFrame, PolarsError> {
    LazyFrame::scan_parquet(
        PlPath::Local(path.as_path().into()),
        ScanArgsParquet::default(),
    )
}

fn load_arrow(path: &PathBuf) -> Result<LazyFrame, PolarsError> {
    LazyFrame::scan_ipc(
        PlPath::Local(path.as_path().into()),
        polars::io::ipc::IpcScanOptions,
        UnifiedScanArgs::default(),
    )
}

/// Lowercase, spaces to underscores, punctuation stripped.
fn normalize_header(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Map the spreadsheet-of-the-day header spellings onto canonical field
/// names, per record kind. Unknown headers pass through unchanged.
fn canonical_header(kind: Kind, name: &str) -> String {
    let canonical = match kind {
        Kind::Exams => match name {
            "course_code" | "code" | "paper_code" => "exam_code",
            "subject" | "title" | "exam" => "exam_name",
            "venue" | "venues" | "location" | "room" | "rooms" => "main_venue",
            "start" | "start_time" | "adj_starttime" => "exam_start",
            "end" | "end_time" | "finish" => "exam_end",
            "date" | "date_exam" => "exam_date",
            "length" | "duration" | "duration_mins" | "minutes" => "exam_length",
            "students" | "student_count" | "cohort" => "no_students",
            "school" | "department" | "faculty" => "exam_school",
            other => other,
        },
        Kind::Venues => match name {
            "name" | "venue" | "room" => "venue_name",
            "code" => "venue_code",
            "seats" | "size" => "capacity",
            "type" | "kind" => "venuetype",
            "is_accessible" => "accessible",
            other => other,
        },
        Kind::Invigilators => match name {
            "name" | "invigilator" => "full_name",
            "preferred" => "preferred_name",
            "mail" | "email_address" => "email",
            "availability" | "slots" | "availableslots" => "available_slots",
            other => other,
        },
    };
    canonical.to_string()
}

/// A timetable cell may name several rooms at once: "Room A101 / Hall C".
fn split_venues(cell: &str) -> Vec<String> {
    cell.split(['/', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}

pub(crate) fn parse_when(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 5] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%d/%m/%Y %H:%M",
    ];
    let s = s.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
    let s = s.trim();
    FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    const FORMATS: [&str; 3] = ["%H:%M", "%H:%M:%S", "%I:%M %p"];
    let s = s.trim();
    FORMATS
        .iter()
        .find_map(|f| NaiveTime::parse_from_str(s, f).ok())
}

/// Start may arrive as a full timestamp in one column, or split across a
/// date column and a time-of-day column.
fn parse_start(date: Option<&str>, start: Option<&str>) -> Option<NaiveDateTime> {
    if let Some(s) = start
        && let Some(when) = parse_when(s)
    {
        return Some(when);
    }
    match (date.and_then(parse_date), start.and_then(parse_time)) {
        (Some(d), Some(t)) => Some(d.and_time(t)),
        (Some(d), None) => d.and_hms_opt(0, 0, 0),
        _ => None,
    }
}

// ------------------------------------------------------------- per kind ----

fn load_exams(root: &Path) -> Result<Vec<Exam>, InvigilError> {
    let Some(info) = find_data_file(root, "exams") else {
        warn!("No exams file under {}", root.display());
        return Ok(Vec::new());
    };
    if info.file_type == FileType::JSON {
        let raw: Vec<ApiExam> = read_json(&info.path)?;
        return Ok(raw.into_iter().map(ApiExam::into_exam).collect());
    }
    let table = load_table(&info, Kind::Exams)?;
    let mut exams = Vec::new();
    for row in 0..table.height {
        let Some(code) = table.cell("exam_code", row) else {
            debug!("Skipping exam row {row} with no code");
            continue;
        };
        let start = parse_start(
            table.cell("exam_date", row).as_deref(),
            table.cell("exam_start", row).as_deref(),
        );
        let length_minutes = table
            .cell("exam_length", row)
            .and_then(|s| s.parse::<i64>().ok())
            .or_else(|| {
                let end = table.cell("exam_end", row).as_deref().and_then(parse_when)?;
                Some((end - start?).num_minutes())
            });
        let venues = table
            .cell("main_venue", row)
            .map(|cell| split_venues(&cell))
            .unwrap_or_default();
        let slots = venues
            .into_iter()
            .enumerate()
            .map(|(i, venue)| ExamSlot {
                venue,
                start,
                length_minutes,
                core: i == 0,
                provisions: Vec::new(),
            })
            .collect();
        exams.push(Exam {
            id: row as u64 + 1,
            code,
            subject: table.cell("exam_name", row).unwrap_or_default(),
            school: table.cell("exam_school", row),
            students: table.cell("no_students", row).and_then(|s| s.parse().ok()),
            slots,
        });
    }
    Ok(exams)
}

fn load_venues(root: &Path) -> Result<Vec<Venue>, InvigilError> {
    let Some(info) = find_data_file(root, "venues") else {
        warn!("No venues file under {}", root.display());
        return Ok(Vec::new());
    };
    if info.file_type == FileType::JSON {
        let raw: Vec<ApiVenue> = read_json(&info.path)?;
        return Ok(raw
            .into_iter()
            .map(|v| Venue {
                id: v.id,
                code: v.code,
                name: v.name,
                building: v.building,
                capacity: v.capacity,
                kind: v.kind,
                accessible: v.accessible,
                scheduled: Vec::new(),
            })
            .collect());
    }
    let table = load_table(&info, Kind::Venues)?;
    let mut venues = Vec::new();
    for row in 0..table.height {
        let Some(name) = table.cell("venue_name", row) else {
            debug!("Skipping venue row {row} with no name");
            continue;
        };
        venues.push(Venue {
            id: row as u64 + 1,
            code: table.cell("venue_code", row).unwrap_or_else(|| name.clone()),
            name,
            building: table.cell("building", row).unwrap_or_default(),
            capacity: table
                .cell("capacity", row)
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            kind: table.cell("venuetype", row).unwrap_or_default(),
            accessible: table
                .cell("accessible", row)
                .map(|s| parse_bool(&s))
                .unwrap_or(true),
            scheduled: Vec::new(),
        });
    }
    Ok(venues)
}

fn load_invigilators(root: &Path) -> Result<Vec<Invigilator>, InvigilError> {
    let Some(info) = find_data_file(root, "invigilators") else {
        warn!("No invigilators file under {}", root.display());
        return Ok(Vec::new());
    };
    if info.file_type == FileType::JSON {
        let raw: Vec<ApiInvigilator> = read_json(&info.path)?;
        return Ok(raw
            .into_iter()
            .map(|i| Invigilator {
                id: i.id,
                full_name: i.full_name,
                preferred_name: i.preferred_name,
                email: i.email,
                available_slots: i
                    .available_slots
                    .iter()
                    .filter_map(|s| parse_when(s))
                    .collect(),
            })
            .collect());
    }
    let table = load_table(&info, Kind::Invigilators)?;
    let mut invigilators = Vec::new();
    for row in 0..table.height {
        let full_name = table.cell("full_name", row);
        let email = table.cell("email", row);
        if full_name.is_none() && email.is_none() {
            debug!("Skipping invigilator row {row} with no name or email");
            continue;
        }
        invigilators.push(Invigilator {
            id: row as u64 + 1,
            full_name,
            preferred_name: table.cell("preferred_name", row),
            email,
            available_slots: table
                .cell("available_slots", row)
                .map(|cell| cell.split(';').filter_map(parse_when).collect())
                .unwrap_or_default(),
        });
    }
    Ok(invigilators)
}

/// Fill each venue's scheduled-sittings list from the exam slots naming it.
fn link_schedule(set: &mut DataSet) {
    for venue in &mut set.venues {
        venue.scheduled = set
            .exams
            .iter()
            .flat_map(|exam| {
                exam.slots
                    .iter()
                    .filter(|slot| slot.venue == venue.name || slot.venue == venue.code)
                    .map(|slot| {
                        format!(
                            "{} — {} – {}",
                            exam.code,
                            format_when(slot.start),
                            format_when(slot.end())
                        )
                    })
            })
            .collect();
    }
}

// ------------------------------------------------------------ demo data ----
// The mock rows the admin views shipped with, so the console works out of
// the box without a data directory.

fn demo_when(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(y, mo, d).and_then(|date| date.and_hms_opt(h, mi, 0))
}

fn demo_exam(
    id: u64,
    code: &str,
    subject: &str,
    school: &str,
    students: u32,
    slots: Vec<ExamSlot>,
) -> Exam {
    Exam {
        id,
        code: code.to_string(),
        subject: subject.to_string(),
        school: Some(school.to_string()),
        students: Some(students),
        slots,
    }
}

fn demo_slot(venue: &str, start: Option<NaiveDateTime>, length: i64, core: bool) -> ExamSlot {
    ExamSlot {
        venue: venue.to_string(),
        start,
        length_minutes: Some(length),
        core,
        provisions: Vec::new(),
    }
}

fn demo_venue(id: u64, code: &str, name: &str, building: &str, capacity: u32, kind: &str) -> Venue {
    Venue {
        id,
        code: code.to_string(),
        name: name.to_string(),
        building: building.to_string(),
        capacity,
        kind: kind.to_string(),
        accessible: true,
        scheduled: Vec::new(),
    }
}

fn demo_invigilator(id: u64, full: &str, preferred: &str, email: &str, slots: &[Option<NaiveDateTime>]) -> Invigilator {
    Invigilator {
        id,
        full_name: Some(full.to_string()),
        preferred_name: Some(preferred.to_string()),
        email: Some(email.to_string()),
        available_slots: slots.iter().copied().flatten().collect(),
    }
}

fn demo_dataset() -> DataSet {
    let exams = vec![
        demo_exam(
            1,
            "CS101",
            "Introduction to Computer Science",
            "Computing",
            180,
            vec![demo_slot("Room A101", demo_when(2025, 11, 15, 9, 0), 120, true)],
        ),
        demo_exam(
            2,
            "MATH201",
            "Calculus II",
            "Mathematics",
            140,
            vec![
                demo_slot("Room B205", demo_when(2025, 11, 16, 14, 0), 150, true),
                ExamSlot {
                    venue: "Hall C".to_string(),
                    start: demo_when(2025, 11, 16, 14, 0),
                    length_minutes: Some(188),
                    core: false,
                    provisions: vec!["extra_time".to_string(), "use_computer".to_string()],
                },
            ],
        ),
        demo_exam(
            3,
            "PHY301",
            "Quantum Mechanics",
            "Physics",
            60,
            vec![demo_slot("Lab Building 3", demo_when(2025, 11, 17, 9, 0), 180, true)],
        ),
        demo_exam(
            4,
            "ENG102",
            "English Literature",
            "Humanities",
            95,
            vec![demo_slot("Hall C", demo_when(2025, 11, 18, 10, 0), 120, true)],
        ),
        demo_exam(
            5,
            "CHEM202",
            "Organic Chemistry",
            "Chemistry",
            110,
            vec![demo_slot("Science Block 2", demo_when(2025, 11, 19, 13, 0), 150, true)],
        ),
        demo_exam(
            6,
            "BIO110",
            "Human Biology",
            "Life Sciences",
            160,
            vec![demo_slot("Lecture Theatre 1", demo_when(2025, 11, 20, 9, 30), 120, true)],
        ),
        demo_exam(
            7,
            "HIST210",
            "Modern European History",
            "Humanities",
            70,
            vec![demo_slot("Computer Lab 301", demo_when(2025, 11, 21, 11, 0), 90, true)],
        ),
    ];

    let mut venues = vec![
        demo_venue(1, "A101", "Room A101", "Main Building A", 50, "Classroom"),
        demo_venue(2, "B205", "Room B205", "Science Building B", 75, "Lecture Hall"),
        demo_venue(3, "LAB3", "Lab Building 3", "Engineering Complex", 30, "Laboratory"),
        demo_venue(4, "HALL-C", "Hall C", "Arts Building", 150, "Auditorium"),
        demo_venue(5, "SCI-2", "Science Block 2", "Science Complex", 60, "Laboratory"),
        demo_venue(6, "LT-1", "Lecture Theatre 1", "Main Building A", 200, "Lecture Hall"),
        demo_venue(7, "COM-301", "Computer Lab 301", "Computer Science Building", 40, "Computer Lab"),
    ];
    venues[2].accessible = false;

    let invigilators = vec![
        demo_invigilator(
            1,
            "Alexandra Chen",
            "Alex Chen",
            "alex.chen@uni.example",
            &[demo_when(2025, 11, 15, 9, 0), demo_when(2025, 11, 20, 9, 0)],
        ),
        demo_invigilator(
            2,
            "Rajesh Kumar",
            "Rajesh Kumar",
            "rajesh.kumar@uni.example",
            &[demo_when(2025, 11, 16, 14, 0)],
        ),
        demo_invigilator(
            3,
            "Maria Garcia",
            "Maria Garcia",
            "maria.garcia@uni.example",
            &[demo_when(2025, 11, 17, 9, 0), demo_when(2025, 11, 18, 10, 0)],
        ),
        demo_invigilator(
            4,
            "Benjamin Okoro",
            "Ben Okoro",
            "ben.okoro@uni.example",
            &[demo_when(2025, 11, 19, 13, 0)],
        ),
        demo_invigilator(
            5,
            "Li Wei",
            "Li Wei",
            "li.wei@uni.example",
            &[demo_when(2025, 11, 22, 9, 0)],
        ),
        demo_invigilator(
            6,
            "Sarah Johnson",
            "Sarah Johnson",
            "sarah.johnson@uni.example",
            &[],
        ),
        demo_invigilator(
            7,
            "Emma Wilson",
            "Emma Wilson",
            "emma.wilson@uni.example",
            &[demo_when(2025, 11, 24, 9, 0)],
        ),
        demo_invigilator(
            8,
            "Ahmed Hassan",
            "Ahmed Hassan",
            "ahmed.hassan@uni.example",
            &[demo_when(2025, 11, 20, 9, 30), demo_when(2025, 11, 21, 11, 0)],
        ),
        demo_invigilator(
            9,
            "Carlos Martinez",
            "Carlos Martinez",
            "carlos.martinez@uni.example",
            &[demo_when(2025, 11, 25, 9, 0)],
        ),
    ];

    DataSet {
        exams,
        venues,
        invigilators,
    }
}
