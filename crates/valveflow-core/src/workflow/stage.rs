//! Stage identifiers for the valve production flow.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Normalizes a raw stage key as typed by an operator or sent by the backend.
///
/// Leading and trailing whitespace is dropped, the text is lowercased and every
/// run of internal whitespace becomes a single hyphen, so `"Material Issue"`,
/// `"material-issue"` and `"  MATERIAL   ISSUE "` all yield `"material-issue"`.
///
/// # Examples
///
/// ```rust
/// use valveflow_core::workflow::normalize_stage_key;
///
/// assert_eq!(normalize_stage_key("  MATERIAL   ISSUE "), "material-issue");
/// assert_eq!(normalize_stage_key("pdi1"), "pdi1");
/// ```
pub fn normalize_stage_key(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Type-safe enumeration of the stages in the production graph.
///
/// Variants are listed in declaration order of the workflow, which is also the
/// column order used by progress tables and stage filters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Order received and scheduled
    Planning,
    /// Raw material handed to the shop floor
    MaterialIssue,
    /// Inspection of machined parts before surface treatment
    SemiQc,
    /// Phosphate coating and its inspection
    Phosphating,
    /// Valve assembly (lines A to D)
    Assembly,
    Testing1,
    Testing2,
    Marking1,
    Marking2,
    /// Pre-dispatch inspection, line 1
    Pdi1,
    /// Pre-dispatch inspection, line 2
    Pdi2,
    /// Stock valve store; finished valves pulled from stock
    Svs,
    /// Third-party inspection
    Tpi,
    Dispatch,
}

impl Stage {
    /// Every stage of the graph in declaration order.
    pub const ALL: [Stage; 14] = [
        Stage::Planning,
        Stage::MaterialIssue,
        Stage::SemiQc,
        Stage::Phosphating,
        Stage::Assembly,
        Stage::Testing1,
        Stage::Testing2,
        Stage::Marking1,
        Stage::Marking2,
        Stage::Pdi1,
        Stage::Pdi2,
        Stage::Svs,
        Stage::Tpi,
        Stage::Dispatch,
    ];

    /// Machine key used by the backend and in URLs.
    pub fn key(&self) -> &'static str {
        match self {
            Stage::Planning => "planning",
            Stage::MaterialIssue => "material-issue",
            Stage::SemiQc => "semi-qc",
            Stage::Phosphating => "phosphating",
            Stage::Assembly => "assembly",
            Stage::Testing1 => "testing1",
            Stage::Testing2 => "testing2",
            Stage::Marking1 => "marking1",
            Stage::Marking2 => "marking2",
            Stage::Pdi1 => "pdi1",
            Stage::Pdi2 => "pdi2",
            Stage::Svs => "svs",
            Stage::Tpi => "tpi",
            Stage::Dispatch => "dispatch",
        }
    }

    /// Curated display label. These strings are exchanged with the backend as
    /// `currentSteps`/`nextSteps` and used as `stage_progress` keys.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Planning => "Planning",
            Stage::MaterialIssue => "Material Issue",
            Stage::SemiQc => "Semi QC",
            Stage::Phosphating => "Phosphating QC",
            Stage::Assembly => "Assembly",
            Stage::Testing1 => "Testing 1",
            Stage::Testing2 => "Testing 2",
            Stage::Marking1 => "Marking 1",
            Stage::Marking2 => "Marking 2",
            Stage::Pdi1 => "PDI 1",
            Stage::Pdi2 => "PDI 2",
            Stage::Svs => "SVS",
            Stage::Tpi => "TPI",
            Stage::Dispatch => "Dispatch",
        }
    }

    /// Valid successor stages, in the order they are offered to operators.
    pub fn successors(&self) -> &'static [Stage] {
        match self {
            Stage::Planning => &[Stage::MaterialIssue],
            Stage::MaterialIssue => &[Stage::SemiQc],
            Stage::SemiQc => &[Stage::Phosphating],
            Stage::Phosphating => &[Stage::Assembly],
            Stage::Assembly => &[Stage::Testing1, Stage::Testing2],
            Stage::Testing1 => &[Stage::Marking1],
            Stage::Testing2 => &[Stage::Marking2],
            Stage::Marking1 => &[Stage::Pdi1],
            Stage::Marking2 => &[Stage::Pdi2],
            Stage::Pdi1 | Stage::Pdi2 => &[Stage::Tpi, Stage::Dispatch],
            Stage::Svs => &[Stage::Marking1],
            Stage::Tpi => &[Stage::Dispatch],
            Stage::Dispatch => &[],
        }
    }

    /// Parses any spelling of a stage key or curated label, returning `None`
    /// for names that are not part of the graph.
    pub fn parse_lenient(raw: &str) -> Option<Stage> {
        raw.parse().ok()
    }

    /// Looks up a normalized graph key. Labels do not match here.
    pub fn from_key(key: &str) -> Option<Stage> {
        Stage::ALL.iter().copied().find(|stage| stage.key() == key)
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_stage_key(s);
        Stage::ALL
            .iter()
            .copied()
            .find(|stage| stage.key() == key || normalize_stage_key(stage.label()) == key)
            .ok_or_else(|| format!("Invalid stage: {s}"))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
