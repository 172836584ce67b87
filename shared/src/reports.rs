//! Report routes and the re-entry guard for report buttons.

use std::collections::BTreeSet;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Same set `encodeURIComponent` leaves alone
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode one path segment (student names are Arabic text and may
/// contain spaces).
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// A PDF report the server can generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportKind {
    Today,
    Month { start_date: Option<String> },
    Student { name: String, start_date: Option<String> },
    Unpaid { name: String },
    LastSeven { name: String },
}

impl ReportKind {
    pub fn path(&self) -> String {
        match self {
            ReportKind::Today => "/report/today".to_string(),
            ReportKind::Month { .. } => "/report/month".to_string(),
            ReportKind::Student { name, .. } => format!("/report/student/{}", encode_segment(name)),
            ReportKind::Unpaid { name } => format!("/report/unpaid/{}", encode_segment(name)),
            ReportKind::LastSeven { name } => format!("/report/last7/{}", encode_segment(name)),
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            ReportKind::Month { start_date: Some(date) }
            | ReportKind::Student { start_date: Some(date), .. }
                if !date.trim().is_empty() =>
            {
                vec![("startDate", date.trim().to_string())]
            }
            _ => Vec::new(),
        }
    }

    /// Name the browser saves the PDF under
    pub fn file_name(&self) -> String {
        match self {
            ReportKind::Today => "today-report.pdf".to_string(),
            ReportKind::Month { .. } => "month-report.pdf".to_string(),
            ReportKind::Student { name, .. } => format!("تقرير-{name}.pdf"),
            ReportKind::Unpaid { name } => format!("تقرير-غير-المدفوع-{name}.pdf"),
            ReportKind::LastSeven { name } => format!("تقرير-آخر-7-حصص-{name}.pdf"),
        }
    }

    /// Identifies the button that triggered the report. The start date is
    /// not part of it: a control stays busy whatever range it asked for.
    pub fn control_key(&self) -> String {
        match self {
            ReportKind::Today => "today".to_string(),
            ReportKind::Month { .. } => "month".to_string(),
            ReportKind::Student { name, .. } => format!("student:{name}"),
            ReportKind::Unpaid { name } => format!("unpaid:{name}"),
            ReportKind::LastSeven { name } => format!("last7:{name}"),
        }
    }
}

/// Tracks which report controls have a download in flight.
///
/// `try_begin` is a synchronous check-and-set so a double click cannot
/// start two downloads for the same control.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportTracker {
    in_flight: BTreeSet<String>,
}

impl ReportTracker {
    /// `false` when the control is already busy; the trigger is then a no-op.
    pub fn try_begin(&mut self, kind: &ReportKind) -> bool {
        self.in_flight.insert(kind.control_key())
    }

    pub fn finish(&mut self, kind: &ReportKind) {
        self.in_flight.remove(&kind.control_key());
    }

    pub fn is_pending(&self, kind: &ReportKind) -> bool {
        self.in_flight.contains(&kind.control_key())
    }
}
