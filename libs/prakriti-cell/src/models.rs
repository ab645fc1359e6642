use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::error::AppError;

// ==============================================================================
// DOMAIN ENUMS
// ==============================================================================

/// The three doshas (constitution archetypes). Closed enum so the
/// classification switch is checked for exhaustiveness by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    /// Canonical ordering, also used as the deterministic tie-break when
    /// two doshas score the same percentage.
    pub const ALL: [Dosha; 3] = [Dosha::Vata, Dosha::Pitta, Dosha::Kapha];

    /// Position in [`Dosha::ALL`], used for tally and ceiling arrays.
    pub(crate) fn index(&self) -> usize {
        match self {
            Dosha::Vata => 0,
            Dosha::Pitta => 1,
            Dosha::Kapha => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dosha::Vata => "Vata",
            Dosha::Pitta => "Pitta",
            Dosha::Kapha => "Kapha",
        }
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Question grouping for organized display. Never affects scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Physical,
    Digestive,
    Mental,
    Sleep,
    Lifestyle,
}

/// Which questionnaire a respondent was shown. The two banks have different
/// scoring ceilings and must never be cross-normalized, so the variant is
/// carried on both the bank and the answer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankVariant {
    Full,
    Onboarding,
}

impl fmt::Display for BankVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankVariant::Full => f.write_str("full"),
            BankVariant::Onboarding => f.write_str("onboarding"),
        }
    }
}

// ==============================================================================
// QUESTION BANK MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct QuestionOption {
    pub text: &'static str,
    pub dosha: Dosha,
    /// Clinical diagnostic importance, 1-5.
    pub weight: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub category: Category,
    pub prompt: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtext: Option<&'static str>,
    /// Exactly one option per dosha. The weights are intentionally
    /// asymmetric for some questions (clinical asymmetry).
    pub options: [QuestionOption; 3],
}

impl Question {
    pub fn option_for(&self, dosha: Dosha) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.dosha == dosha)
    }

    /// Weight of this question's option for the given dosha. Bank
    /// construction guarantees one option per dosha.
    pub fn weight_for(&self, dosha: Dosha) -> u8 {
        self.option_for(dosha).map(|o| o.weight).unwrap_or(0)
    }
}

// ==============================================================================
// ANSWER MODELS
// ==============================================================================

/// One respondent choice: which dosha-labeled option was picked for a
/// question. At most one answer per question id; ordering is irrelevant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub dosha: Dosha,
}

/// A respondent's full submission, tagged with the bank it was collected
/// against so a collection/scoring mismatch is rejected instead of silently
/// normalized against the wrong ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSet {
    #[serde(rename = "bank")]
    pub variant: BankVariant,
    pub answers: Vec<Answer>,
}

// ==============================================================================
// RESULT MODELS
// ==============================================================================

/// Independent match-strength scores in [0,100], one per dosha. These are
/// not a partition - they need not sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoshaPercentages {
    pub vata: u8,
    pub pitta: u8,
    pub kapha: u8,
}

impl DoshaPercentages {
    pub fn get(&self, dosha: Dosha) -> u8 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }
}

/// Final categorical label. Dual constitutions are named more-dominant
/// first, so Pitta-Vata and Vata-Pitta are distinct labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constitution {
    Single(Dosha),
    Dual(Dosha, Dosha),
    Tridoshic,
}

impl fmt::Display for Constitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constitution::Single(dosha) => f.write_str(dosha.name()),
            Constitution::Dual(primary, secondary) => {
                write!(f, "{}-{}", primary.name(), secondary.name())
            }
            Constitution::Tridoshic => f.write_str("Tridoshic"),
        }
    }
}

impl Serialize for Constitution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// How trustworthy the assessment is, derived from completeness and how
/// clearly one dosha leads.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentQuality {
    pub questions_answered: usize,
    pub questions_total: usize,
    /// Share of the bank actually answered, rounded percentage.
    pub completeness: u8,
    pub recommendation: &'static str,
}

/// Outcome of one scoring run. Computed fresh per answer set, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ConstitutionResult {
    pub percentages: DoshaPercentages,
    pub dominant: Dosha,
    /// Present only for dual or tridoshic classifications.
    pub secondary: Option<Dosha>,
    pub classification: Constitution,
    pub quality: AssessmentQuality,
}

/// HTTP envelope around a scoring result. The identifier and timestamp live
/// here, not in ConstitutionResult, so the engine stays referentially
/// transparent.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    pub assessment_id: Uuid,
    pub assessed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: ConstitutionResult,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrakritiError {
    #[error("Unknown question id: {0}")]
    UnknownQuestion(String),

    #[error("Duplicate answer for question id: {0}")]
    DuplicateAnswer(String),

    #[error("Answers collected against the {answers} bank cannot be scored against the {bank} bank")]
    BankMismatch {
        bank: BankVariant,
        answers: BankVariant,
    },
}

impl From<PrakritiError> for AppError {
    fn from(err: PrakritiError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
