use std::collections::HashSet;

use tracing::debug;

use shared_config::DEFAULT_CLOSE_THRESHOLD;

use crate::bank::QuestionBank;
use crate::models::{
    AnswerSet, AssessmentQuality, Constitution, ConstitutionResult, Dosha, DoshaPercentages,
    PrakritiError,
};

/// Below this completeness the result should be taken with a grain of salt.
const LOW_COMPLETENESS_PCT: u8 = 60;

const RECOMMEND_MORE_ANSWERS: &str =
    "Consider answering more questions for a more accurate assessment";
const RECOMMEND_PULSE_DIAGNOSIS: &str =
    "Consider in-person pulse diagnosis (Nadi Pariksha) for precise assessment";
const RECOMMEND_CONFIDENT: &str = "Good quality assessment - confidence is high";

/// Weighted Prakriti scoring. Stateless apart from the classification
/// threshold; safe to build per request and call concurrently.
pub struct ScoringEngine {
    close_threshold: u8,
}

impl ScoringEngine {
    /// `close_threshold` is the margin, in percentage points, within which
    /// two doshas count as "close" for dual/tridoshic classification.
    pub fn new(close_threshold: u8) -> Self {
        Self { close_threshold }
    }

    /// Scores an answer set against a question bank.
    ///
    /// Validation is all-or-nothing: any unknown question id, duplicate
    /// answer or bank-variant mismatch fails the whole run before a tally
    /// is derived. Partial completion is allowed; percentages are always
    /// normalized against the bank's full ceiling, so an incomplete
    /// questionnaire yields uniformly lower percentages. That is the
    /// intended behavior, not a bug.
    pub fn score(
        &self,
        bank: &QuestionBank,
        answer_set: &AnswerSet,
    ) -> Result<ConstitutionResult, PrakritiError> {
        if answer_set.variant != bank.variant() {
            return Err(PrakritiError::BankMismatch {
                bank: bank.variant(),
                answers: answer_set.variant,
            });
        }

        let mut seen = HashSet::new();
        let mut tally = [0u32; 3];
        for answer in &answer_set.answers {
            let question = bank
                .question(&answer.question_id)
                .ok_or_else(|| PrakritiError::UnknownQuestion(answer.question_id.clone()))?;
            if !seen.insert(question.id) {
                return Err(PrakritiError::DuplicateAnswer(answer.question_id.clone()));
            }
            tally[answer.dosha.index()] += question.weight_for(answer.dosha) as u32;
        }

        let percentages = DoshaPercentages {
            vata: percent(tally[0], bank.max_attainable(Dosha::Vata)),
            pitta: percent(tally[1], bank.max_attainable(Dosha::Pitta)),
            kapha: percent(tally[2], bank.max_attainable(Dosha::Kapha)),
        };

        // Stable sort over canonical dosha order keeps equal percentages
        // deterministic (vata before pitta before kapha).
        let mut ranked: Vec<(Dosha, u8)> =
            Dosha::ALL.iter().map(|d| (*d, percentages.get(*d))).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let (top, top_pct) = ranked[0];
        let (second, second_pct) = ranked[1];
        let (_, third_pct) = ranked[2];

        let threshold = self.close_threshold;
        let classification = if top_pct - second_pct <= threshold {
            if second_pct - third_pct <= threshold {
                Constitution::Tridoshic
            } else {
                Constitution::Dual(top, second)
            }
        } else {
            Constitution::Single(top)
        };

        let secondary = match classification {
            Constitution::Single(_) => None,
            Constitution::Dual(..) | Constitution::Tridoshic => Some(second),
        };

        let quality = self.assess_quality(
            answer_set.answers.len(),
            bank.len(),
            top_pct - second_pct,
        );

        debug!(
            "Scored {} answers against {} bank: {:?} -> {}",
            answer_set.answers.len(),
            bank.variant(),
            percentages,
            classification
        );

        Ok(ConstitutionResult {
            percentages,
            dominant: top,
            secondary,
            classification,
            quality,
        })
    }

    fn assess_quality(&self, answered: usize, total: usize, margin: u8) -> AssessmentQuality {
        let completeness = percent(answered as u32, total as u32);
        let recommendation = if completeness < LOW_COMPLETENESS_PCT {
            RECOMMEND_MORE_ANSWERS
        } else if margin <= self.close_threshold {
            RECOMMEND_PULSE_DIAGNOSIS
        } else {
            RECOMMEND_CONFIDENT
        };
        AssessmentQuality {
            questions_answered: answered,
            questions_total: total,
            completeness,
            recommendation,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSE_THRESHOLD)
    }
}

// Ceilings are asserted positive at bank construction.
fn percent(tally: u32, ceiling: u32) -> u8 {
    (100.0 * tally as f64 / ceiling as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    use crate::bank::{full_bank, onboarding_bank};
    use crate::models::{Answer, BankVariant};

    fn answers_for(ids: &[&str], dosha: Dosha) -> Vec<Answer> {
        ids.iter()
            .map(|id| Answer {
                question_id: id.to_string(),
                dosha,
            })
            .collect()
    }

    fn all_of(bank: &QuestionBank, dosha: Dosha) -> AnswerSet {
        AnswerSet {
            variant: bank.variant(),
            answers: bank
                .questions()
                .iter()
                .map(|q| Answer {
                    question_id: q.id.to_string(),
                    dosha,
                })
                .collect(),
        }
    }

    #[test]
    fn all_vata_on_full_bank_scores_exactly_one_hundred() {
        let bank = full_bank();
        let result = ScoringEngine::default()
            .score(bank, &all_of(bank, Dosha::Vata))
            .unwrap();

        assert_eq!(result.percentages.vata, 100);
        assert!(result.percentages.pitta < 100);
        assert!(result.percentages.kapha < 100);
        assert_eq!(result.classification, Constitution::Single(Dosha::Vata));
        assert_eq!(result.dominant, Dosha::Vata);
        assert_eq!(result.secondary, None);
        assert_eq!(result.quality.completeness, 100);
        assert_eq!(result.quality.recommendation, RECOMMEND_CONFIDENT);
    }

    #[test]
    fn all_vata_on_onboarding_bank_is_single_vata() {
        let bank = onboarding_bank();
        let result = ScoringEngine::default()
            .score(bank, &all_of(bank, Dosha::Vata))
            .unwrap();

        // Every answer picked the vata option, so the other tallies are
        // empty and vata leads by far more than the 10-point threshold.
        assert_eq!(result.percentages.vata, 100);
        assert_eq!(result.percentages.pitta, 0);
        assert_eq!(result.percentages.kapha, 0);
        assert_eq!(result.classification, Constitution::Single(Dosha::Vata));
    }

    #[test]
    fn empty_answer_set_is_trivially_tridoshic() {
        let bank = onboarding_bank();
        let result = ScoringEngine::default()
            .score(
                bank,
                &AnswerSet {
                    variant: BankVariant::Onboarding,
                    answers: vec![],
                },
            )
            .unwrap();

        assert_eq!(
            result.percentages,
            DoshaPercentages {
                vata: 0,
                pitta: 0,
                kapha: 0
            }
        );
        assert_eq!(result.classification, Constitution::Tridoshic);
        // Canonical order breaks the three-way tie.
        assert_eq!(result.dominant, Dosha::Vata);
        assert_eq!(result.secondary, Some(Dosha::Pitta));
        assert_eq!(result.quality.questions_answered, 0);
        assert_eq!(result.quality.recommendation, RECOMMEND_MORE_ANSWERS);
    }

    #[test]
    fn evenly_spread_answers_classify_as_tridoshic() {
        // Onboarding ceilings are vata 55, pitta 50, kapha 52. This split
        // lands at 31 / 34 / 38 percent - all within 10 points.
        let mut answers = answers_for(&["P1", "P2", "P6", "D2"], Dosha::Vata);
        answers.extend(answers_for(&["P7", "D1", "D7", "M2"], Dosha::Pitta));
        answers.extend(answers_for(&["D8", "M1", "M3", "S1"], Dosha::Kapha));

        let result = ScoringEngine::default()
            .score(
                onboarding_bank(),
                &AnswerSet {
                    variant: BankVariant::Onboarding,
                    answers,
                },
            )
            .unwrap();

        assert_eq!(result.percentages.vata, 31);
        assert_eq!(result.percentages.pitta, 34);
        assert_eq!(result.percentages.kapha, 38);
        assert_eq!(result.classification, Constitution::Tridoshic);
        assert_eq!(result.dominant, Dosha::Kapha);
        assert_eq!(result.secondary, Some(Dosha::Pitta));
    }

    #[test]
    fn close_top_two_classify_as_dual_with_dominant_first() {
        // Pitta 54% vs vata 47% (7-point gap), kapha 0.
        let mut answers = answers_for(&["P1", "P2", "P6", "P7", "D2", "D8"], Dosha::Vata);
        answers.extend(answers_for(&["D1", "D7", "M1", "M2", "M3", "S1"], Dosha::Pitta));

        let result = ScoringEngine::default()
            .score(
                onboarding_bank(),
                &AnswerSet {
                    variant: BankVariant::Onboarding,
                    answers,
                },
            )
            .unwrap();

        assert_eq!(result.percentages.pitta, 54);
        assert_eq!(result.percentages.vata, 47);
        assert_eq!(
            result.classification,
            Constitution::Dual(Dosha::Pitta, Dosha::Vata)
        );
        assert_eq!(result.classification.to_string(), "Pitta-Vata");
        assert_eq!(result.dominant, Dosha::Pitta);
        assert_eq!(result.secondary, Some(Dosha::Vata));
        assert_eq!(result.quality.recommendation, RECOMMEND_PULSE_DIAGNOSIS);
    }

    #[test]
    fn answer_order_does_not_change_the_result() {
        let mut answers = answers_for(&["P1", "P2", "P6", "P7", "D2", "D8"], Dosha::Vata);
        answers.extend(answers_for(&["D1", "D7", "M1", "M2", "M3", "S1"], Dosha::Pitta));

        let forward = AnswerSet {
            variant: BankVariant::Onboarding,
            answers: answers.clone(),
        };
        answers.reverse();
        let backward = AnswerSet {
            variant: BankVariant::Onboarding,
            answers,
        };

        let engine = ScoringEngine::default();
        let a = engine.score(onboarding_bank(), &forward).unwrap();
        let b = engine.score(onboarding_bank(), &backward).unwrap();

        assert_eq!(a.percentages, b.percentages);
        assert_eq!(a.classification, b.classification);
        assert_eq!(a.dominant, b.dominant);
        assert_eq!(a.secondary, b.secondary);
    }

    #[test]
    fn scoring_twice_is_deterministic() {
        let bank = full_bank();
        let set = all_of(bank, Dosha::Kapha);
        let engine = ScoringEngine::default();

        let first = engine.score(bank, &set).unwrap();
        let second = engine.score(bank, &set).unwrap();
        assert_eq!(first.percentages, second.percentages);
        assert_eq!(first.classification, second.classification);
    }

    #[test]
    fn percentages_stay_in_range_for_arbitrary_mixes() {
        let bank = full_bank();
        // Cycle answers across the three doshas per question position.
        let answers: Vec<Answer> = bank
            .questions()
            .iter()
            .enumerate()
            .map(|(i, q)| Answer {
                question_id: q.id.to_string(),
                dosha: Dosha::ALL[i % 3],
            })
            .collect();

        let result = ScoringEngine::default()
            .score(
                bank,
                &AnswerSet {
                    variant: BankVariant::Full,
                    answers,
                },
            )
            .unwrap();

        for dosha in Dosha::ALL {
            assert!(result.percentages.get(dosha) <= 100);
        }
    }

    #[test]
    fn unknown_question_id_is_rejected() {
        let result = ScoringEngine::default().score(
            onboarding_bank(),
            &AnswerSet {
                variant: BankVariant::Onboarding,
                answers: answers_for(&["P1", "X9"], Dosha::Vata),
            },
        );
        assert_matches!(result, Err(PrakritiError::UnknownQuestion(id)) if id == "X9");
    }

    #[test]
    fn duplicate_answer_is_rejected() {
        let result = ScoringEngine::default().score(
            onboarding_bank(),
            &AnswerSet {
                variant: BankVariant::Onboarding,
                answers: vec![
                    Answer {
                        question_id: "P1".to_string(),
                        dosha: Dosha::Vata,
                    },
                    Answer {
                        question_id: "P1".to_string(),
                        dosha: Dosha::Pitta,
                    },
                ],
            },
        );
        assert_matches!(result, Err(PrakritiError::DuplicateAnswer(id)) if id == "P1");
    }

    #[test]
    fn bank_variant_mismatch_is_rejected() {
        let result = ScoringEngine::default().score(
            full_bank(),
            &AnswerSet {
                variant: BankVariant::Onboarding,
                answers: answers_for(&["P1"], Dosha::Vata),
            },
        );
        assert_matches!(
            result,
            Err(PrakritiError::BankMismatch {
                bank: BankVariant::Full,
                answers: BankVariant::Onboarding,
            })
        );
    }

    #[test]
    fn partial_completion_normalizes_against_the_full_ceiling() {
        // One vata answer out of twelve: 5 of 55 points, 9 percent. The
        // fixed denominator deliberately penalizes incomplete
        // questionnaires instead of rescaling to the answered subset.
        let result = ScoringEngine::default()
            .score(
                onboarding_bank(),
                &AnswerSet {
                    variant: BankVariant::Onboarding,
                    answers: answers_for(&["P1"], Dosha::Vata),
                },
            )
            .unwrap();

        assert_eq!(result.percentages.vata, 9);
        assert_eq!(result.percentages.pitta, 0);
        assert_eq!(result.percentages.kapha, 0);
        assert_eq!(result.quality.completeness, 8);
        assert_eq!(result.quality.recommendation, RECOMMEND_MORE_ANSWERS);
    }

    #[test]
    fn threshold_is_tunable() {
        // With a zero threshold the 7-point pitta/vata gap becomes a
        // clear single classification.
        let mut answers = answers_for(&["P1", "P2", "P6", "P7", "D2", "D8"], Dosha::Vata);
        answers.extend(answers_for(&["D1", "D7", "M1", "M2", "M3", "S1"], Dosha::Pitta));

        let result = ScoringEngine::new(0)
            .score(
                onboarding_bank(),
                &AnswerSet {
                    variant: BankVariant::Onboarding,
                    answers,
                },
            )
            .unwrap();

        assert_eq!(result.classification, Constitution::Single(Dosha::Pitta));
        assert_eq!(result.secondary, None);
    }
}
