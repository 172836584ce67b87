use shared::{ReportKind, ReportTracker};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::download::save_file;
use crate::services::logging::Logger;
use crate::services::notify::report_failure;

const COMPONENT: &str = "report-downloads";
const PDF_MIME_TYPE: &str = "application/pdf";
const REPORT_FAILED_MESSAGE: &str = "فشل في إصدار التقرير";

#[derive(Clone, PartialEq)]
pub struct UseReportDownloads {
    pending: ReportTracker,
    pub download: Callback<ReportKind>,
}

impl UseReportDownloads {
    /// Whether the control that triggers `kind` should show its busy label
    pub fn is_pending(&self, kind: &ReportKind) -> bool {
        self.pending.is_pending(kind)
    }
}

/// Download generated PDF reports.
///
/// Each control has its own busy flag. Triggering a busy control does
/// nothing, so a double click never issues two requests.
#[hook]
pub fn use_report_downloads(api_client: &ApiClient) -> UseReportDownloads {
    // The ref is the source of truth and is checked synchronously; the state
    // copy only drives re-renders.
    let tracker = use_mut_ref(ReportTracker::default);
    let pending = use_state(ReportTracker::default);

    let download = {
        let tracker = tracker.clone();
        let pending = pending.clone();
        use_callback(api_client.clone(), move |kind: ReportKind, api_client| {
            if !tracker.borrow_mut().try_begin(&kind) {
                Logger::debug_with_component(
                    COMPONENT,
                    &format!("Ignoring repeat trigger for {}", kind.control_key()),
                );
                return;
            }
            pending.set(tracker.borrow().clone());

            let api_client = api_client.clone();
            let tracker = tracker.clone();
            let pending = pending.clone();
            spawn_local(async move {
                match api_client.download_report(&kind).await {
                    Ok(bytes) => {
                        if let Err(e) = save_file(&bytes, &kind.file_name(), PDF_MIME_TYPE) {
                            report_failure(COMPONENT, "Failed to save report", e, REPORT_FAILED_MESSAGE);
                        } else {
                            Logger::info_with_component(
                                COMPONENT,
                                &format!("Downloaded {}", kind.file_name()),
                            );
                        }
                    }
                    Err(e) => {
                        report_failure(COMPONENT, "Failed to download report", e, REPORT_FAILED_MESSAGE);
                    }
                }
                tracker.borrow_mut().finish(&kind);
                pending.set(tracker.borrow().clone());
            });
        })
    };

    UseReportDownloads {
        pending: (*pending).clone(),
        download,
    }
}
