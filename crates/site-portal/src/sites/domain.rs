use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::evaluation::SiteInputs;

/// Identifier wrapper for tracked sites.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiteId(pub String);

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Acquisition pipeline stages, in the order a site moves through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteStage {
    Identified,
    Screening,
    Evaluation,
    LetterOfIntent,
    DueDiligence,
    DeRisking,
    Closed,
}

impl SiteStage {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Identified,
            Self::Screening,
            Self::Evaluation,
            Self::LetterOfIntent,
            Self::DueDiligence,
            Self::DeRisking,
            Self::Closed,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Identified => "Identified",
            Self::Screening => "Screening",
            Self::Evaluation => "Evaluation",
            Self::LetterOfIntent => "Letter of Intent",
            Self::DueDiligence => "Due Diligence",
            Self::DeRisking => "De-Risking",
            Self::Closed => "Closed",
        }
    }

    /// Following stage, or `None` once the site has closed.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Identified => Some(Self::Screening),
            Self::Screening => Some(Self::Evaluation),
            Self::Evaluation => Some(Self::LetterOfIntent),
            Self::LetterOfIntent => Some(Self::DueDiligence),
            Self::DueDiligence => Some(Self::DeRisking),
            Self::DeRisking => Some(Self::Closed),
            Self::Closed => None,
        }
    }
}

/// Intake payload for a new site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSubmission {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub inputs: SiteInputs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Created,
    InputsUpdated,
    StageAdvanced,
}

/// One line of a site's activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub on: NaiveDate,
    pub kind: ActivityKind,
    pub detail: String,
}

/// Stored site: identity, pipeline position, raw evaluation inputs, and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub id: SiteId,
    pub name: String,
    pub location: String,
    pub stage: SiteStage,
    pub inputs: SiteInputs,
    pub created_on: NaiveDate,
    pub activity: Vec<ActivityEntry>,
}

impl SiteRecord {
    pub(crate) fn log(&mut self, on: NaiveDate, kind: ActivityKind, detail: impl Into<String>) {
        self.activity.push(ActivityEntry {
            on,
            kind,
            detail: detail.into(),
        });
    }

    pub fn view(&self) -> SiteView {
        SiteView {
            id: self.id.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
            stage: self.stage,
            stage_label: self.stage.label(),
            created_on: self.created_on,
            inputs: self.inputs.clone(),
            activity: self.activity.clone(),
        }
    }
}

/// API representation of a site.
#[derive(Debug, Clone, Serialize)]
pub struct SiteView {
    pub id: SiteId,
    pub name: String,
    pub location: String,
    pub stage: SiteStage,
    pub stage_label: &'static str,
    pub created_on: NaiveDate,
    pub inputs: SiteInputs,
    pub activity: Vec<ActivityEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_advance_in_order_and_stop_at_closed() {
        let stages = SiteStage::ordered();
        for pair in stages.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(SiteStage::Closed.next(), None);
    }

    #[test]
    fn submission_inputs_default_when_omitted() {
        let submission: SiteSubmission =
            serde_json::from_str(r#"{ "name": "Brazos Yard" }"#).expect("parses");
        assert_eq!(submission.location, "");
        assert_eq!(submission.inputs, SiteInputs::default());
    }
}
