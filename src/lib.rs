//! Paginated medical diagnostic reports.
//!
//! A [`ReportDataset`] snapshot is laid out by the [`ReportAssembler`] onto
//! any [`Canvas`](medreport_canvas::Canvas), normally the lopdf backend, with
//! advisory text from an [`AdvisoryProvider`] rendered as light markdown.

pub mod advisory;
pub mod assembler;
pub mod checklist;
pub mod config;
pub mod dataset;
pub mod error;

pub use advisory::{AdvisoryProvider, FALLBACK_PRECAUTIONS, HttpAdvisoryProvider, build_prompt};
pub use assembler::{
    AdvisorySource, ReportAssembler, ReportBranch, ReportOutline, ReportStage, report_file_stem,
};
pub use checklist::CompletionChecklist;
pub use config::{AdvisoryConfig, ReportConfig};
pub use dataset::{
    MedicalData, PatientInfo, PredictionResult, ReportDataset, TreatmentInfo, humanize_key,
};
pub use error::{AdvisoryError, ReportError};

pub use medreport_canvas::{Canvas, CanvasError, RecordingCanvas};
pub use medreport_layout::{PageGeometry, Theme};
pub use medreport_render_lopdf::LopdfCanvas;
