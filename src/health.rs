use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::source::DataSource;

/// Outcome of probing the configured data store. `Skipped` is deliberately
/// distinct from `Error`: a console running without a data directory is not
/// an incident, a configured directory that cannot be read is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StoreHealth {
    Ok,
    Error { error: String },
    Skipped { reason: String },
}

impl StoreHealth {
    pub fn is_error(&self) -> bool {
        matches!(self, StoreHealth::Error { .. })
    }

    /// One-line rendering for the dashboard.
    pub fn summary(&self) -> String {
        match self {
            StoreHealth::Ok => "ok".to_string(),
            StoreHealth::Error { error } => format!("error: {error}"),
            StoreHealth::Skipped { reason } => format!("skipped: {reason}"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Services {
    pub database: StoreHealth,
}

/// The health report body. Field names and shapes are the wire contract;
/// `/healthz` consumers key off `status` and `services.database.status`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub services: Services,
}

impl HealthReport {
    pub fn new(database: StoreHealth) -> Self {
        let status = if database.is_error() { "error" } else { "ok" };
        HealthReport {
            status,
            services: Services { database },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "ok"
    }

    /// The status code an HTTP surface would answer with.
    pub fn http_status(&self) -> u16 {
        if self.is_healthy() { 200 } else { 503 }
    }
}

/// `--check` mode: print the report body as JSON. The caller exits 0 when
/// the report is healthy and 1 otherwise, the exit-code rendering of 200 vs
/// 503.
pub fn run_check(
    source: &DataSource,
    out: &mut impl Write,
) -> Result<HealthReport, serde_json::Error> {
    let report = HealthReport::new(source.probe());
    info!(
        "Health check: {} (http {})",
        report.status,
        report.http_status()
    );
    serde_json::to_writer_pretty(&mut *out, &report)?;
    let _ = writeln!(out);
    Ok(report)
}
