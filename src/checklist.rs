use crate::dataset::{ReportDataset, non_blank};

/// Which diagnostic categories hold enough data for a complete report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionChecklist {
    pub image: bool,
    pub biopsy: bool,
    pub risk: bool,
    pub medical_data: bool,
}

impl CompletionChecklist {
    pub fn from_dataset(dataset: &ReportDataset) -> Self {
        let image = dataset
            .image
            .as_ref()
            .is_some_and(|r| r.label().is_some() && r.confidence.is_some());
        let biopsy = dataset.biopsy.as_ref().is_some_and(|r| r.label().is_some());
        let risk = dataset.risk.as_ref().is_some_and(|r| r.label().is_some());
        let medical = &dataset.medical;
        let medical_data = medical.age.is_some()
            && non_blank(&medical.gender).is_some()
            && medical.has_any_flag();

        Self {
            image,
            biopsy,
            risk,
            medical_data,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.image && self.biopsy && self.risk && self.medical_data
    }

    /// Category names with their status, in display order.
    pub fn entries(&self) -> [(&'static str, bool); 4] {
        [
            ("Image Analysis", self.image),
            ("Biopsy Analysis", self.biopsy),
            ("Risk Assessment", self.risk),
            ("Medical Data", self.medical_data),
        ]
    }

    pub fn missing(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter(|(_, done)| !done)
            .map(|(name, _)| name)
            .collect()
    }
}
