//! Report orchestration.
//!
//! [`ReportAssembler`] walks a fixed sequence of stages, choosing between the
//! complete and incomplete branch from the dataset's [`CompletionChecklist`],
//! and finishes with a pass over every page that stamps the footer.

use chrono::{Local, NaiveDate};
use medreport_canvas::{Canvas, CanvasError, Font, TextStyle};
use medreport_layout::{
    ContentBlock, LabeledField, LayoutState, PageGeometry, Rect, ResultBanner, SectionHeader,
    StatusBox, TableRow, Theme, Tone, TwoColumnTable,
};
use medreport_markdown::{MarkdownRenderer, MarkdownStats};
use medreport_render_lopdf::LopdfCanvas;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::advisory::{AdvisoryProvider, FALLBACK_PRECAUTIONS, HttpAdvisoryProvider, build_prompt};
use crate::checklist::CompletionChecklist;
use crate::config::ReportConfig;
use crate::dataset::{ReportDataset, humanize_key, non_blank};
use crate::error::{AdvisoryError, ReportError};

const DISCLAIMER: &str = "This report was generated automatically from diagnostic model outputs. \
    It supports, and does not replace, the judgement of a qualified physician. Confirm all \
    findings clinically before making treatment decisions.";

/// Gap between the content area and the footer rule.
const FOOTER_GAP: f32 = 6.0;

/// Stages of one report, in the only order they can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStage {
    Header,
    PatientInfo,
    AnalysisResults,
    CompleteBranch,
    IncompleteBranch,
    TreatmentInfo,
    Precautions,
    Disclaimer,
    PageNumberPass,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportBranch {
    Complete,
    Incomplete,
}

/// Where the precautions text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisorySource {
    Generated,
    Provided,
    Fallback,
}

/// What a generation run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutline {
    pub branch: ReportBranch,
    /// Stages that drew something, in order.
    pub sections: Vec<ReportStage>,
    pub advisory: Option<AdvisorySource>,
    pub advisory_stats: Option<MarkdownStats>,
    pub page_count: usize,
}

impl ReportOutline {
    pub fn rendered(&self, stage: ReportStage) -> bool {
        self.sections.contains(&stage)
    }
}

/// Builds reports from datasets. Holds only configuration, so one assembler
/// can serve concurrent generations.
#[derive(Clone)]
pub struct ReportAssembler {
    title: String,
    theme: Theme,
    geometry: PageGeometry,
    advisory: Option<Arc<dyn AdvisoryProvider>>,
    advisory_timeout: Duration,
    report_date: Option<NaiveDate>,
}

impl std::fmt::Debug for ReportAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportAssembler")
            .field("title", &self.title)
            .field("geometry", &self.geometry)
            .field("advisory", &self.advisory.is_some())
            .field("advisory_timeout", &self.advisory_timeout)
            .finish()
    }
}

impl ReportAssembler {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            theme: Theme::default(),
            geometry: PageGeometry::a4(),
            advisory: None,
            advisory_timeout: Duration::from_secs(15),
            report_date: None,
        }
    }

    /// An assembler set up from configuration, with the HTTP advisory
    /// client when the service is enabled.
    pub fn from_config(config: &ReportConfig) -> Self {
        let mut assembler = Self::new(config.title.clone())
            .with_theme(config.theme.clone())
            .with_geometry(config.page);
        if config.advisory.enabled {
            let provider =
                HttpAdvisoryProvider::new(&config.advisory.endpoint, &config.advisory.model);
            assembler = assembler.with_advisory(Arc::new(provider), config.advisory.timeout());
        }
        assembler
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_advisory(mut self, provider: Arc<dyn AdvisoryProvider>, timeout: Duration) -> Self {
        self.advisory = Some(provider);
        self.advisory_timeout = timeout;
        self
    }

    /// Fixes the date printed in the header instead of using today's.
    pub fn with_report_date(mut self, date: NaiveDate) -> Self {
        self.report_date = Some(date);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Draws the whole report onto `canvas`, which must be fresh and sized to
    /// this assembler's geometry.
    pub async fn assemble(
        &self,
        dataset: &ReportDataset,
        canvas: &mut dyn Canvas,
    ) -> Result<ReportOutline, ReportError> {
        dataset.validate()?;
        let checklist = CompletionChecklist::from_dataset(dataset);
        let branch = if checklist.is_complete() {
            ReportBranch::Complete
        } else {
            ReportBranch::Incomplete
        };
        log::info!(
            "Generating report for patient {} ({:?} branch)",
            dataset.patient.id,
            branch
        );

        let mut state = LayoutState::new(self.geometry);
        let mut outline = ReportOutline {
            branch,
            sections: Vec::new(),
            advisory: None,
            advisory_stats: None,
            page_count: 0,
        };

        let mut stage = ReportStage::Header;
        loop {
            log::debug!(
                "Stage {:?} on page {} at y={:.1}",
                stage,
                state.current_page_index() + 1,
                state.cursor_y()
            );
            let (drawn, next) = match stage {
                ReportStage::Header => {
                    self.draw_header(canvas, &mut state, dataset)?;
                    (true, ReportStage::PatientInfo)
                }
                ReportStage::PatientInfo => {
                    self.draw_patient_info(canvas, &mut state, dataset)?;
                    (true, ReportStage::AnalysisResults)
                }
                ReportStage::AnalysisResults => {
                    self.draw_analysis_results(canvas, &mut state, dataset)?;
                    let next = match branch {
                        ReportBranch::Complete => ReportStage::CompleteBranch,
                        ReportBranch::Incomplete => ReportStage::IncompleteBranch,
                    };
                    (true, next)
                }
                ReportStage::CompleteBranch => {
                    self.draw_medical_tables(canvas, &mut state, dataset)?;
                    (true, ReportStage::TreatmentInfo)
                }
                ReportStage::IncompleteBranch => {
                    self.draw_incomplete_notice(canvas, &mut state, &checklist)?;
                    (true, ReportStage::TreatmentInfo)
                }
                ReportStage::TreatmentInfo => {
                    let drawn = self.draw_treatment(canvas, &mut state, dataset)?;
                    let next = match branch {
                        ReportBranch::Complete => ReportStage::Precautions,
                        ReportBranch::Incomplete => ReportStage::Disclaimer,
                    };
                    (drawn, next)
                }
                ReportStage::Precautions => {
                    let (source, stats) =
                        self.draw_precautions(canvas, &mut state, dataset).await?;
                    outline.advisory = Some(source);
                    outline.advisory_stats = Some(stats);
                    (true, ReportStage::Disclaimer)
                }
                ReportStage::Disclaimer => {
                    StatusBox::new("Disclaimer", DISCLAIMER, Tone::Info).draw(
                        canvas,
                        &mut state,
                        &self.theme,
                    )?;
                    (true, ReportStage::PageNumberPass)
                }
                ReportStage::PageNumberPass => {
                    outline.page_count = self.stamp_footers(canvas)?;
                    (true, ReportStage::Done)
                }
                ReportStage::Done => break,
            };
            if drawn {
                outline.sections.push(stage);
            }
            stage = next;
        }

        log::info!(
            "Report for patient {} finished: {} page(s)",
            dataset.patient.id,
            outline.page_count
        );
        Ok(outline)
    }

    /// Renders the report to a PDF named after the patient in `output_dir`.
    pub async fn generate_report_file(
        &self,
        dataset: &ReportDataset,
        output_dir: &Path,
    ) -> Result<(PathBuf, ReportOutline), ReportError> {
        dataset.validate()?;
        std::fs::create_dir_all(output_dir)?;

        let mut canvas = LopdfCanvas::new(&self.geometry).with_title(self.title.clone());
        let outline = self.assemble(dataset, &mut canvas).await?;

        let stem = report_file_stem(&dataset.patient.name);
        let path = output_dir.join(format!("{stem}.pdf"));
        canvas.save(&path)?;
        log::info!("Saved report to {}", path.display());
        Ok((path, outline))
    }

    fn draw_header(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        dataset: &ReportDataset,
    ) -> Result<(), ReportError> {
        let theme = &self.theme;
        let title_size = theme.heading_size * 1.5;
        let title_height = title_size * 1.4;
        state.ensure_space(canvas, title_height + theme.line_height + theme.block_gap)?;

        let left = state.geometry().content_left();
        let width = state.geometry().content_width();
        canvas.draw_text(
            left,
            state.cursor_y(),
            &self.title,
            TextStyle::bold(title_size, theme.accent_color),
        )?;
        state.advance(title_height);

        let date = self.report_date.unwrap_or_else(|| Local::now().date_naive());
        let subtitle = format!(
            "Generated on {}    Report ID: {}",
            date.format("%B %-d, %Y"),
            dataset.patient.id.trim()
        );
        canvas.draw_text(
            left,
            state.cursor_y(),
            &subtitle,
            TextStyle::regular(theme.small_size, theme.muted_color),
        )?;
        state.advance(theme.line_height);

        canvas.fill_rect(Rect::new(left, state.cursor_y(), width, 1.5), theme.accent_color)?;
        state.advance(theme.block_gap);
        Ok(())
    }

    fn draw_patient_info(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        dataset: &ReportDataset,
    ) -> Result<(), ReportError> {
        let patient = &dataset.patient;
        let medical = &dataset.medical;
        let fields = [
            LabeledField::new("Patient ID", Some(patient.id.trim())),
            LabeledField::new("Name", Some(patient.name.trim())),
            LabeledField::new("Age", medical.age.map(|a| a.to_string())),
            LabeledField::new("Gender", non_blank(&medical.gender)),
            LabeledField::new("Date of Birth", non_blank(&patient.date_of_birth)),
            LabeledField::new("Email", non_blank(&patient.email)),
            LabeledField::new("Phone", non_blank(&patient.phone)),
            LabeledField::new("Address", non_blank(&patient.address)),
        ];

        SectionHeader::new("Patient Information").draw(canvas, state, &self.theme)?;
        for field in &fields {
            field.draw(canvas, state, &self.theme)?;
        }
        state.advance(self.theme.block_gap);
        Ok(())
    }

    fn draw_analysis_results(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        dataset: &ReportDataset,
    ) -> Result<(), ReportError> {
        let results: [(&str, _, fn(&str) -> bool); 3] = [
            ("Image Analysis", &dataset.image, image_is_adverse),
            ("Biopsy Analysis", &dataset.biopsy, biopsy_is_adverse),
            ("Risk Assessment", &dataset.risk, risk_is_adverse),
        ];

        SectionHeader::new("Diagnostic Analysis Results").draw(canvas, state, &self.theme)?;
        for (title, result, is_adverse) in results {
            let Some(result) = result.as_ref() else {
                continue;
            };
            let Some(label) = result.label() else {
                continue;
            };
            ResultBanner::new(title, label)
                .with_confidence(result.confidence)
                .adverse(is_adverse(label))
                .draw(canvas, state, &self.theme)?;
        }
        Ok(())
    }

    fn draw_medical_tables(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        dataset: &ReportDataset,
    ) -> Result<(), ReportError> {
        let medical = &dataset.medical;
        for (title, flags) in [
            ("Risk Factors", &medical.risk_factors),
            ("Reported Symptoms", &medical.symptoms),
        ] {
            if flags.is_empty() {
                continue;
            }
            SectionHeader::new(title).draw(canvas, state, &self.theme)?;
            flag_table(flags).draw(canvas, state, &self.theme)?;
        }
        Ok(())
    }

    fn draw_incomplete_notice(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        checklist: &CompletionChecklist,
    ) -> Result<(), ReportError> {
        let message = format!(
            "The following diagnostic steps are still pending: {}. Precautions and \
             recommendations will be added once every step is complete.",
            checklist.missing().join(", ")
        );
        StatusBox::new("Report Incomplete", message, Tone::Warning).draw(
            canvas,
            state,
            &self.theme,
        )?;

        let rows = checklist
            .entries()
            .into_iter()
            .map(|(name, done)| {
                TableRow::new(name, if done { "Complete" } else { "Incomplete" }).emphasized(!done)
            })
            .collect();
        SectionHeader::new("Completion Checklist").draw(canvas, state, &self.theme)?;
        TwoColumnTable::new(rows).draw(canvas, state, &self.theme)?;
        Ok(())
    }

    /// Returns whether anything was drawn.
    fn draw_treatment(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        dataset: &ReportDataset,
    ) -> Result<bool, ReportError> {
        let treatment = &dataset.treatment;
        if !treatment.has_any() {
            return Ok(false);
        }
        let fields = [
            LabeledField::new("Diagnosis", non_blank(&treatment.diagnosis)),
            LabeledField::new("Treatment Plan", non_blank(&treatment.treatment_plan)),
            LabeledField::new("Medications", treatment.medication_list().map(|m| m.join(", "))),
            LabeledField::new("Procedures", treatment.procedure_list().map(|p| p.join(", "))),
            LabeledField::new("Follow-up Date", non_blank(&treatment.follow_up_date)),
            LabeledField::new("Doctor's Notes", non_blank(&treatment.doctor_notes)),
        ];

        SectionHeader::new("Treatment Information").draw(canvas, state, &self.theme)?;
        for field in &fields {
            field.draw(canvas, state, &self.theme)?;
        }
        state.advance(self.theme.block_gap);
        Ok(true)
    }

    async fn draw_precautions(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        dataset: &ReportDataset,
    ) -> Result<(AdvisorySource, MarkdownStats), ReportError> {
        let (text, source) = self.advisory_text(dataset).await;
        SectionHeader::new("Precautions & Recommendations").draw(canvas, state, &self.theme)?;
        let stats = MarkdownRenderer::new(self.theme.clone()).render(canvas, state, &text)?;
        state.advance(self.theme.block_gap);
        Ok((source, stats))
    }

    /// Picks the precautions text. Service failures only select the fallback.
    async fn advisory_text(&self, dataset: &ReportDataset) -> (String, AdvisorySource) {
        if let Some(text) = dataset.provided_advisory() {
            return (text.to_string(), AdvisorySource::Provided);
        }
        let Some(provider) = &self.advisory else {
            log::info!("Advisory service disabled, using fallback precautions");
            return (FALLBACK_PRECAUTIONS.to_string(), AdvisorySource::Fallback);
        };

        let prompt = build_prompt(dataset);
        let fetch = tokio::time::timeout(self.advisory_timeout, provider.generate(&prompt));
        let result = match fetch.await {
            Ok(Ok(text)) if text.trim().is_empty() => Err(AdvisoryError::Empty),
            Ok(result) => result,
            Err(_) => Err(AdvisoryError::Timeout(self.advisory_timeout.as_millis() as u64)),
        };
        match result {
            Ok(text) => (text, AdvisorySource::Generated),
            Err(e) => {
                log::warn!("Advisory text unavailable ({e}), using fallback precautions");
                (FALLBACK_PRECAUTIONS.to_string(), AdvisorySource::Fallback)
            }
        }
    }

    /// Stamps the title and `Page i of N` below the content area of every
    /// page. Returns the page count.
    fn stamp_footers(&self, canvas: &mut dyn Canvas) -> Result<usize, CanvasError> {
        let theme = &self.theme;
        let geometry = &self.geometry;
        let total = canvas.page_count();
        let style = TextStyle::regular(theme.small_size, theme.muted_color);
        // Narrow margins pull the footer up so it stays on the page.
        let text_y = (geometry.content_bottom() + 2.0 * FOOTER_GAP)
            .min(geometry.height() - theme.small_size);
        let rule_y = text_y - FOOTER_GAP;

        for index in 0..total {
            canvas.set_active_page(index)?;
            canvas.fill_rect(
                Rect::new(geometry.content_left(), rule_y, geometry.content_width(), 0.5),
                theme.muted_color,
            )?;
            canvas.draw_text(geometry.content_left(), text_y, &self.title, style)?;
            let label = format!("Page {} of {}", index + 1, total);
            let width = canvas.measure_text_width(&label, Font::Regular, theme.small_size);
            canvas.draw_text(geometry.content_right() - width, text_y, &label, style)?;
        }
        log::debug!("Stamped footers on {total} page(s)");
        Ok(total)
    }
}

fn flag_table(flags: &BTreeMap<String, bool>) -> TwoColumnTable {
    TwoColumnTable::new(
        flags
            .iter()
            .map(|(key, present)| {
                TableRow::new(humanize_key(key), if *present { "Yes" } else { "No" })
                    .emphasized(*present)
            })
            .collect(),
    )
}

/// A cancer finding that is not negated ("non-cancerous").
pub fn image_is_adverse(prediction: &str) -> bool {
    let p = prediction.to_lowercase();
    p.contains("cancer") && !p.contains("non")
}

/// Anything other than a normal or benign biopsy.
pub fn biopsy_is_adverse(prediction: &str) -> bool {
    let p = prediction.to_lowercase();
    let normal = p.contains("normal") && !p.contains("abnormal");
    !(normal || p.contains("benign"))
}

pub fn risk_is_adverse(prediction: &str) -> bool {
    prediction.to_lowercase().contains("high")
}

/// File stem for a patient's report: every character that is not
/// alphanumeric becomes `_`.
pub fn report_file_stem(display_name: &str) -> String {
    let sanitized: String = display_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("{sanitized}_Medical_Report")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_replaces_non_alphanumerics() {
        assert_eq!(report_file_stem("Ann Lee"), "Ann_Lee_Medical_Report");
        assert_eq!(report_file_stem("O'Brien, J."), "O_Brien__J__Medical_Report");
        assert_eq!(report_file_stem("José"), "José_Medical_Report");
    }

    #[test]
    fn adverse_rules() {
        assert!(image_is_adverse("Cancer detected"));
        assert!(!image_is_adverse("Non-cancerous"));
        assert!(!image_is_adverse("Normal"));

        assert!(!biopsy_is_adverse("Benign"));
        assert!(!biopsy_is_adverse("Normal tissue"));
        assert!(biopsy_is_adverse("Abnormal cells"));
        assert!(biopsy_is_adverse("Malignant"));

        assert!(risk_is_adverse("High Risk"));
        assert!(!risk_is_adverse("Low"));
    }

    #[test]
    fn flag_table_emphasizes_present_flags() {
        let mut flags = BTreeMap::new();
        flags.insert("smoking".to_string(), true);
        flags.insert("family_history".to_string(), false);
        let table = flag_table(&flags);
        assert_eq!(
            table.rows,
            vec![
                TableRow::new("Family History", "No"),
                TableRow::new("Smoking", "Yes").emphasized(true),
            ]
        );
    }
}
