// Prakriti Cell - birth-constitution assessment
pub mod bank;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

// Re-export commonly used types for convenience
pub use models::{
    Answer,
    AnswerSet,
    BankVariant,
    Category,
    Constitution,
    ConstitutionResult,
    Dosha,
    DoshaPercentages,
    PrakritiError,
    Question,
    QuestionOption,
};

// Re-export main router for integration
pub use router::prakriti_routes;

// Public services API
pub mod api {
    pub use crate::bank::{full_bank, onboarding_bank, QuestionBank};
    pub use crate::services::scoring::ScoringEngine;
}
