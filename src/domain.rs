use std::fmt;
use std::io::Error;
use std::path::PathBuf;

use derive_setters::Setters;
use polars::error::PolarsError;
use ratatui::crossterm::event::KeyEvent;

/// Page sizes offered by the table footer, in cycling order.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 25];

pub const HELP_TEXT: &str = "\
invigil - exam invigilation admin console

  0 / d        dashboard
  1 / 2 / 3    exams / venues / invigilators
  j,k / arrows move row cursor
  h,l / arrows move column cursor
  s            sort by the cursor column (toggles direction)
  /            search (live, Enter keeps, Esc restores)
  n / p        next / previous page
  r            cycle rows per page (5, 10, 25)
  space        select row          a  select all / clear
  e / Enter    expand row details
  c            copy selected rows as CSV
  R            reload data from the source
  Esc          clear search / close popup
  ?            this help
  q            quit";

#[derive(Debug)]
pub enum InvigilError {
    IoError(Error),
    PolarsError(PolarsError),
    JsonError(serde_json::Error),
    LoadingFailed(String),
    FileNotFound(PathBuf),
    PermissionDenied(PathBuf),
    UnknownFileType(PathBuf),
}

impl From<Error> for InvigilError {
    fn from(err: Error) -> Self {
        InvigilError::IoError(err)
    }
}

impl From<PolarsError> for InvigilError {
    fn from(err: PolarsError) -> Self {
        InvigilError::PolarsError(err)
    }
}

impl From<serde_json::Error> for InvigilError {
    fn from(err: serde_json::Error) -> Self {
        InvigilError::JsonError(err)
    }
}

impl fmt::Display for InvigilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvigilError::IoError(e) => write!(f, "io error: {e}"),
            InvigilError::PolarsError(e) => write!(f, "data file error: {e}"),
            InvigilError::JsonError(e) => write!(f, "json error: {e}"),
            InvigilError::LoadingFailed(msg) => write!(f, "loading failed: {msg}"),
            InvigilError::FileNotFound(p) => write!(f, "file not found: {}", p.display()),
            InvigilError::PermissionDenied(p) => write!(f, "permission denied: {}", p.display()),
            InvigilError::UnknownFileType(p) => write!(f, "unknown file type: {}", p.display()),
        }
    }
}

#[derive(Debug, Clone, Setters)]
#[setters(prefix = "with_")]
pub struct AppConfig {
    /// Milliseconds to block on the terminal event queue per loop turn.
    pub event_poll_time: u64,
    /// Directory holding exams/venues/invigilators data files.
    /// The built-in demo dataset is used when unset.
    pub data_root: Option<PathBuf>,
    /// Log destination; the terminal is owned by the UI, so logs go to a file or nowhere.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            event_poll_time: 100,
            data_root: None,
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    Quit,
    ShowDashboard,
    ShowExams,
    ShowVenues,
    ShowInvigilators,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    NextPage,
    PrevPage,
    CycleRowsPerPage,
    RequestSort,
    ToggleSelect,
    ToggleSelectAll,
    ToggleExpand,
    CopyRows,
    Refresh,
    EnterSearch,
    RawKey(KeyEvent),
    Help,
    Exit,
}
