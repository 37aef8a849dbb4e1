use serde::{Deserialize, Serialize};

/// Section of a guidance completion the parser is currently filling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Overview,
    Symptoms,
    Treatment,
    MedicalCare,
    Prevention,
}

impl SectionKind {
    /// All sections, in the order the completion is asked to produce them
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Overview,
        SectionKind::Symptoms,
        SectionKind::Treatment,
        SectionKind::MedicalCare,
        SectionKind::Prevention,
    ];

    /// Marker text that opens this section in a completion
    pub fn marker(self) -> &'static str {
        match self {
            SectionKind::Overview => "Medical Description:",
            SectionKind::Symptoms => "Symptoms & Signs:",
            SectionKind::Treatment => "Treatment Options:",
            SectionKind::MedicalCare => "When to Seek Medical Care:",
            SectionKind::Prevention => "Prevention & Management:",
        }
    }

    /// Short human-readable name
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Overview => "Overview",
            SectionKind::Symptoms => "Symptoms",
            SectionKind::Treatment => "Treatment",
            SectionKind::MedicalCare => "When to Seek Medical Care",
            SectionKind::Prevention => "Prevention",
        }
    }
}

/// Structured guidance extracted from a free-text completion.
///
/// Every field is always present. Lists keep the order in which items
/// appeared in the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceRecord {
    pub overview: String,
    pub symptoms: Vec<String>,
    pub treatment: Vec<String>,
    pub medical_care: Vec<String>,
    pub prevention: Vec<String>,
}

impl GuidanceRecord {
    /// True when no section received any content
    pub fn is_empty(&self) -> bool {
        self.overview.is_empty()
            && self.symptoms.is_empty()
            && self.treatment.is_empty()
            && self.medical_care.is_empty()
            && self.prevention.is_empty()
    }

    /// Sections that received no content
    pub fn empty_sections(&self) -> Vec<SectionKind> {
        SectionKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                SectionKind::Overview => self.overview.is_empty(),
                SectionKind::Symptoms => self.symptoms.is_empty(),
                SectionKind::Treatment => self.treatment.is_empty(),
                SectionKind::MedicalCare => self.medical_care.is_empty(),
                SectionKind::Prevention => self.prevention.is_empty(),
            })
            .collect()
    }

    /// Mutable access to a list section. `Overview` is a text block, not a list.
    pub fn items_mut(&mut self, kind: SectionKind) -> Option<&mut Vec<String>> {
        match kind {
            SectionKind::Overview => None,
            SectionKind::Symptoms => Some(&mut self.symptoms),
            SectionKind::Treatment => Some(&mut self.treatment),
            SectionKind::MedicalCare => Some(&mut self.medical_care),
            SectionKind::Prevention => Some(&mut self.prevention),
        }
    }
}
