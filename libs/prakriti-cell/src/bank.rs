//! Immutable question banks for the Prakriti assessment.
//!
//! Two banks share one schema: the full 60-question assessment and a
//! hand-picked 12-question onboarding subset (the highest-weight, most
//! diagnostic items). Authored-data integrity is asserted when a bank is
//! first constructed, not at scoring time.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::models::{BankVariant, Category, Dosha, Question, QuestionOption};

/// Question ids of the onboarding subset, in full-bank order.
const ONBOARDING_IDS: [&str; 12] = [
    "P1", "P2", "P6", "P7", "D1", "D2", "D7", "D8", "M1", "M2", "M3", "S1",
];

#[derive(Debug)]
pub struct QuestionBank {
    variant: BankVariant,
    questions: Vec<Question>,
    // Per-dosha normalization ceilings, indexed in Dosha::ALL order.
    max_attainable: [u32; 3],
}

impl QuestionBank {
    /// Builds a bank and asserts the integrity of the authored data:
    /// unique ids, exactly one option per dosha, every weight in [1,5].
    /// Panics on authoring bugs - these are compile-time-adjacent data
    /// errors, not runtime conditions.
    fn new(variant: BankVariant, questions: Vec<Question>) -> Self {
        let mut seen = HashSet::new();
        for question in &questions {
            assert!(
                seen.insert(question.id),
                "duplicate question id {} in {} bank",
                question.id,
                variant
            );
            for dosha in Dosha::ALL {
                let matching = question
                    .options
                    .iter()
                    .filter(|o| o.dosha == dosha)
                    .count();
                assert_eq!(
                    matching, 1,
                    "question {} must have exactly one {} option",
                    question.id, dosha
                );
            }
            for option in &question.options {
                assert!(
                    (1..=5).contains(&option.weight),
                    "question {} option weight {} out of range",
                    question.id,
                    option.weight
                );
            }
        }

        let mut max_attainable = [0u32; 3];
        for (i, dosha) in Dosha::ALL.iter().enumerate() {
            max_attainable[i] = questions
                .iter()
                .map(|q| q.weight_for(*dosha) as u32)
                .sum();
            assert!(
                max_attainable[i] > 0,
                "{} bank has a zero {} ceiling",
                variant,
                dosha
            );
        }

        Self {
            variant,
            questions,
            max_attainable,
        }
    }

    pub fn for_variant(variant: BankVariant) -> &'static QuestionBank {
        match variant {
            BankVariant::Full => full_bank(),
            BankVariant::Onboarding => onboarding_bank(),
        }
    }

    pub fn variant(&self) -> BankVariant {
        self.variant
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Normalization ceiling for a dosha: the sum over every question of
    /// the weight carried by that dosha's option. Not necessarily the sum
    /// of per-question maximum weights.
    pub fn max_attainable(&self, dosha: Dosha) -> u32 {
        self.max_attainable[dosha.index()]
    }
}

/// The complete 60-question assessment, fixed content across calls.
pub fn full_bank() -> &'static QuestionBank {
    static FULL: LazyLock<QuestionBank> =
        LazyLock::new(|| QuestionBank::new(BankVariant::Full, full_questions()));
    &FULL
}

/// The 12-question onboarding assessment: a fixed subset of the full bank,
/// sharing its option and weight semantics but carrying its own ceilings.
pub fn onboarding_bank() -> &'static QuestionBank {
    static ONBOARDING: LazyLock<QuestionBank> = LazyLock::new(|| {
        let questions = full_questions()
            .into_iter()
            .filter(|q| ONBOARDING_IDS.contains(&q.id))
            .collect();
        QuestionBank::new(BankVariant::Onboarding, questions)
    });
    &ONBOARDING
}

fn q(
    id: &'static str,
    category: Category,
    prompt: &'static str,
    subtext: Option<&'static str>,
    vata: (&'static str, u8),
    pitta: (&'static str, u8),
    kapha: (&'static str, u8),
) -> Question {
    Question {
        id,
        category,
        prompt,
        subtext,
        options: [
            QuestionOption {
                text: vata.0,
                dosha: Dosha::Vata,
                weight: vata.1,
            },
            QuestionOption {
                text: pitta.0,
                dosha: Dosha::Pitta,
                weight: pitta.1,
            },
            QuestionOption {
                text: kapha.0,
                dosha: Dosha::Kapha,
                weight: kapha.1,
            },
        ],
    }
}

#[rustfmt::skip]
fn full_questions() -> Vec<Question> {
    use Category::{Digestive, Mental, Physical, Sleep};

    vec![
        // ============== PHYSICAL CHARACTERISTICS (20 questions) ==============
        q("P1", Physical, "What is your natural body frame since adolescence?",
            Some("Consider your build when at a healthy weight"),
            ("Thin, light, hard to gain weight", 5),
            ("Medium, muscular, athletic", 5),
            ("Large, solid, tendency to gain weight", 5)),
        q("P2", Physical, "Describe your natural skin type (without products)", None,
            ("Dry, rough, thin, cool to touch", 4),
            ("Warm, oily, prone to redness/inflammation", 4),
            ("Thick, smooth, moist, cool, pale", 4)),
        q("P3", Physical, "What is your natural hair texture?", None,
            ("Dry, kinky, brittle, thin", 3),
            ("Fine, oily, early graying/balding", 3),
            ("Thick, lustrous, oily, strong, wavy", 3)),
        q("P4", Physical, "Describe your eyes naturally", None,
            ("Small, dry, active, dark brown/black", 2),
            ("Medium, penetrating, light sensitive, green/gray/hazel", 2),
            ("Large, moist, calm, blue/brown", 2)),
        q("P5", Physical, "What are your teeth like?", None,
            ("Irregular, protruding, thin gums, cracks easily", 2),
            ("Medium, yellowish, bleeding gums", 2),
            ("Strong, white, healthy gums", 2)),
        q("P6", Physical, "How are your joints naturally?", None,
            ("Prominent, cracking sounds, thin, flexible", 4),
            ("Medium, loose, flexible", 3),
            ("Large, well-formed, padded, stable", 3)),
        q("P7", Physical, "What is your natural body temperature preference?", None,
            ("Always cold, love warmth, hate wind/cold", 4),
            ("Run warm/hot, prefer cool/cold, hate heat", 4),
            ("Adaptable, dislike cold-damp weather", 3)),
        q("P8", Physical, "How do you sweat naturally?", None,
            ("Scanty, only with extreme heat/exercise", 2),
            ("Profuse, even with mild exertion, strong odor", 3),
            ("Moderate, pleasant odor", 2)),
        q("P9", Physical, "Describe your natural voice", None,
            ("Weak, low, hoarse, cracks easily", 2),
            ("Sharp, penetrating, clear, argumentative tone", 2),
            ("Deep, melodious, pleasant, slow speech", 2)),
        q("P10", Physical, "What is your natural walking pace?", None,
            ("Quick, light, irregular, restless", 2),
            ("Moderate, purposeful, determined", 2),
            ("Slow, steady, graceful", 2)),
        q("P11", Physical, "How is your physical endurance?", None,
            ("Low stamina, quick bursts, tire easily, inconsistent", 3),
            ("Moderate stamina, competitive drive", 3),
            ("High endurance, slow and steady, strong", 4)),
        q("P12", Physical, "What is your natural muscle tone?", None,
            ("Low muscle mass, lean, veins/tendons visible", 3),
            ("Medium, well-defined, athletic", 3),
            ("Solid, well-developed, strong", 3)),
        q("P13", Physical, "How do your hands and feet tend to be?", None,
            ("Small, thin, dry, cold, rough", 2),
            ("Medium, warm, pink, moist", 2),
            ("Large, thick, firm, cool, smooth", 2)),
        q("P14", Physical, "What are your fingernails like?", None,
            ("Dry, brittle, break easily, rough", 1),
            ("Soft, pink, lustrous, flexible", 1),
            ("Thick, strong, smooth, shiny, pale", 1)),
        q("P15", Physical, "How is your facial bone structure?", None,
            ("Angular, thin face, prominent bones", 3),
            ("Heart-shaped or triangular, well-defined features", 3),
            ("Round, full, smooth contours", 3)),
        q("P16", Physical, "What is your natural circulation like?", None,
            ("Poor, cold extremities, irregular pulse", 3),
            ("Good, warm body, strong pulse", 2),
            ("Moderate, steady, slow pulse", 2)),
        q("P17", Physical, "How quickly do you generally move and act?", None,
            ("Very quick, restless, can't sit still", 3),
            ("Moderate speed, focused, efficient", 2),
            ("Slow, methodical, unhurried", 3)),
        q("P18", Physical, "Describe your natural flexibility", None,
            ("Very flexible, hypermobile joints", 3),
            ("Moderate flexibility", 2),
            ("Stiff, less flexible, solid", 2)),
        q("P19", Physical, "What is your typical urine output?", None,
            ("Scanty, yellowish", 1),
            ("Profuse, yellowish", 1),
            ("Moderate, whitish", 1)),
        q("P20", Physical, "How is your sense of smell?", None,
            ("Variable, often diminished", 1),
            ("Sharp, sensitive", 1),
            ("Moderate but enjoys aromas", 1)),

        // ============== DIGESTIVE & METABOLIC PATTERNS (15 questions) ==============
        q("D1", Digestive, "What is your natural appetite pattern since childhood?",
            Some("Think about your tendency, not current state"),
            ("Variable/irregular - sometimes hungry, sometimes not", 5),
            ("Strong/regular - get \"hangry\" if meals delayed", 5),
            ("Low/steady - can easily skip meals", 5)),
        q("D2", Digestive, "How quickly do you naturally digest food?", None,
            ("Variable - sometimes fast, sometimes sluggish", 4),
            ("Quick - digest rapidly, get hungry soon", 4),
            ("Slow - feel full for long time", 4)),
        q("D3", Digestive, "What food quantities do you naturally prefer?", None,
            ("Small, frequent meals", 3),
            ("Large meals, can eat a lot", 3),
            ("Moderate meals, feel uncomfortable with too much", 3)),
        q("D4", Digestive, "What is your natural thirst level?", None,
            ("Variable, often forget to drink", 2),
            ("High, drink frequently", 3),
            ("Low, can go long without water", 2)),
        q("D5", Digestive, "What food temperatures do you naturally crave?", None,
            ("Warm/hot foods, dislike cold", 3),
            ("Cool/cold foods and drinks", 3),
            ("Moderate temperature", 2)),
        q("D6", Digestive, "What tastes do you naturally gravitate toward?", None,
            ("Sweet, sour, salty - comforting foods", 2),
            ("Sweet, bitter, astringent - cooling foods", 2),
            ("Pungent, bitter, astringent - stimulating foods", 2)),
        q("D7", Digestive, "How is your natural bowel movement pattern?", None,
            ("Irregular, tendency to constipation, dry/hard stools", 4),
            ("Regular, 2-3 times daily, loose/soft stools", 4),
            ("Heavy, once daily or less, well-formed", 3)),
        q("D8", Digestive, "How do you tend to gain or lose weight?", None,
            ("Hard to gain, lose easily", 5),
            ("Moderate, weight fluctuates with stress/diet", 3),
            ("Gain easily, lose with great difficulty", 5)),
        q("D9", Digestive, "How do you feel after eating a large meal?", None,
            ("Bloated, gassy, uncomfortable", 3),
            ("Warm, possibly acidic or burning", 3),
            ("Heavy, lethargic, sleepy", 4)),
        q("D10", Digestive, "What is your natural eating speed?", None,
            ("Quick, eat on the go, irregular times", 2),
            ("Moderate, focused, enjoy food intensely", 2),
            ("Slow, savor food, relaxed", 2)),
        q("D11", Digestive, "How sensitive is your stomach to different foods?", None,
            ("Very sensitive, many foods cause gas/bloating", 3),
            ("Sensitive to spicy/acidic foods", 3),
            ("Can digest most foods well", 2)),
        q("D12", Digestive, "What is your metabolism rate naturally?", None,
            ("High but irregular", 3),
            ("Strong and fast", 4),
            ("Slow and steady", 4)),
        q("D13", Digestive, "How do you handle skipping a meal?", None,
            ("Spacey, anxious, weak, unfocused", 3),
            ("Irritable, \"hangry\", headache", 4),
            ("Fine, no problem", 3)),
        q("D14", Digestive, "What is your natural relationship with food?", None,
            ("Often forget to eat, irregular", 3),
            ("Food is very important, plan meals", 2),
            ("Love food, emotional eating tendency", 3)),
        q("D15", Digestive, "How is your sense of taste?", None,
            ("Changeable, inconsistent", 1),
            ("Sharp, distinguish flavors well", 2),
            ("Loves sweet/rich flavors", 1)),

        // ============== MENTAL & EMOTIONAL TRAITS (15 questions) ==============
        q("M1", Mental, "How would you describe your natural thinking style?",
            Some("Your lifelong pattern, not current state"),
            ("Quick, creative, restless, many ideas", 5),
            ("Sharp, analytical, focused, critical", 5),
            ("Slow, methodical, steady, thorough", 5)),
        q("M2", Mental, "How do you typically learn new things?", None,
            ("Quick to grasp but forget easily", 5),
            ("Sharp intelligence, good recall, precise", 4),
            ("Slow to learn but never forget", 5)),
        q("M3", Mental, "What is your natural emotional response under stress?", None,
            ("Anxiety, worry, fear, overwhelm", 5),
            ("Anger, frustration, impatience, criticism", 5),
            ("Withdrawal, sadness, attachment, denial", 5)),
        q("M4", Mental, "How is your memory naturally?", None,
            ("Poor long-term, good short-term, forgetful", 4),
            ("Sharp, clear, accurate recall", 4),
            ("Excellent long-term, slow recall", 4)),
        q("M5", Mental, "How do you make decisions typically?", None,
            ("Quickly, impulsively, change mind often", 4),
            ("Decisively, confidently, stick to it", 4),
            ("Slowly, deliberately, resist change", 4)),
        q("M6", Mental, "What is your natural communication style?", None,
            ("Talkative, scattered, fast speech", 3),
            ("Articulate, precise, persuasive, debater", 3),
            ("Quiet, thoughtful, good listener", 3)),
        q("M7", Mental, "How do you handle change and new situations?", None,
            ("Love change, thrive on variety, adaptable", 4),
            ("Welcome challenge, want to lead/fix it", 3),
            ("Resist change, prefer routine and stability", 4)),
        q("M8", Mental, "What is your natural work/study style?", None,
            ("Creative bursts, multitask, inconsistent", 3),
            ("Intense focus, competitive, perfectionist", 4),
            ("Steady, patient, methodical, complete tasks", 3)),
        q("M9", Mental, "How do you handle conflict typically?", None,
            ("Avoid, run away, anxiety", 3),
            ("Confront directly, argue, competitively", 4),
            ("Withdraw, hold grudges, passive", 3)),
        q("M10", Mental, "What is your natural spending pattern with money?", None,
            ("Impulsive, spend quickly on whims", 3),
            ("Plan spending, invest wisely, generous", 2),
            ("Save, reluctant to spend, accumulate", 3)),
        q("M11", Mental, "How is your natural creativity?", None,
            ("Highly creative, artistic, imaginative", 4),
            ("Inventive, problem-solver, strategic", 3),
            ("Practical creativity, builds on tradition", 2)),
        q("M12", Mental, "What is your natural attention span?", None,
            ("Short, easily distracted, mind wanders", 4),
            ("Good when interested, otherwise impatient", 3),
            ("Long, can focus for extended periods", 3)),
        q("M13", Mental, "How would you describe your faith/spirituality tendency?", None,
            ("Variable, explore many paths, mystical", 2),
            ("Logical, questioning, need proof", 2),
            ("Steady, traditional, devoted, loyal", 3)),
        q("M14", Mental, "What is your imagination like?", None,
            ("Very active, vivid, dreamlike", 3),
            ("Practical, focused on goals", 2),
            ("Mildly active, realistic", 1)),
        q("M15", Mental, "How do you typically show love/affection?", None,
            ("Words, enthusiasm, changeable", 2),
            ("Actions, protectiveness, passion", 2),
            ("Loyalty, nurturing, stable presence", 3)),

        // ============== SLEEP & ENERGY PATTERNS (10 questions) ==============
        q("S1", Sleep, "What is your natural sleep pattern since childhood?",
            Some("How you sleep when unaffected by stress"),
            ("Light, interrupted, wake frequently, trouble falling asleep", 5),
            ("Moderate, sound, wake refreshed", 4),
            ("Deep, heavy, hard to wake, need 8+ hours", 5)),
        q("S2", Sleep, "How much sleep do you naturally need to feel rested?", None,
            ("Variable, 5-7 hours, inconsistent", 3),
            ("6-8 hours, regular pattern", 3),
            ("8-10 hours, love sleeping", 4)),
        q("S3", Sleep, "What are your dreams typically like?", None,
            ("Active, anxious, flying, running, fearful", 3),
            ("Colorful, intense, passionate, fighting, achieving", 3),
            ("Romantic, watery, sentimental, few dreams", 2)),
        q("S4", Sleep, "What is your natural energy level throughout the day?", None,
            ("Variable, energy comes in bursts, crashes", 4),
            ("Consistent, strong, purposeful", 3),
            ("Slow start, steady, dips after meals", 3)),
        q("S5", Sleep, "How easily do you fall asleep at night?", None,
            ("Difficulty, mind races, takes long time", 4),
            ("Moderate, can take time if stressed", 2),
            ("Easily, fall asleep quickly", 3)),
        q("S6", Sleep, "What is your natural waking pattern?", None,
            ("Early riser, but tired", 2),
            ("Wake easily, alert quickly", 3),
            ("Hard to wake, groggy, need alarm", 4)),
        q("S7", Sleep, "How do you feel after a nap?", None,
            ("Rarely nap, feel disoriented if I do", 2),
            ("Short naps refresh me", 2),
            ("Love long naps, wake foggy", 3)),
        q("S8", Sleep, "What time of day do you feel most energetic?", None,
            ("Evening, night owl", 2),
            ("Midday, peak performance", 3),
            ("Morning, after slow start", 2)),
        q("S9", Sleep, "How do you recover from physical exertion?", None,
            ("Slowly, get exhausted easily, need rest", 3),
            ("Quickly, bounce back, ready for more", 3),
            ("Moderately, steady recovery", 2)),
        q("S10", Sleep, "What is your natural activity preference?", None,
            ("Short bursts, variety, need frequent breaks", 2),
            ("Intense activity, competitive sports, challenges", 3),
            ("Steady, endurance activities, relaxed pace", 3)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_bank_has_sixty_questions() {
        let bank = full_bank();
        assert_eq!(bank.len(), 60);
        assert_eq!(bank.variant(), BankVariant::Full);
    }

    #[test]
    fn onboarding_bank_is_the_fixed_subset() {
        let bank = onboarding_bank();
        assert_eq!(bank.len(), 12);
        assert_eq!(bank.variant(), BankVariant::Onboarding);

        let ids: Vec<&str> = bank.questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, ONBOARDING_IDS);

        // Every onboarding question carries the full bank's weights.
        let full = full_bank();
        for question in bank.questions() {
            let original = full.question(question.id).unwrap();
            for dosha in Dosha::ALL {
                assert_eq!(question.weight_for(dosha), original.weight_for(dosha));
            }
        }
    }

    #[test]
    fn every_question_has_one_option_per_dosha_with_valid_weight() {
        for bank in [full_bank(), onboarding_bank()] {
            for question in bank.questions() {
                for dosha in Dosha::ALL {
                    let option = question.option_for(dosha).unwrap();
                    assert!((1..=5).contains(&option.weight));
                }
            }
        }
    }

    #[test]
    fn question_ids_are_unique_and_ordered_by_section() {
        let bank = full_bank();
        let mut seen = std::collections::HashSet::new();
        for question in bank.questions() {
            assert!(seen.insert(question.id));
        }
        assert_eq!(bank.questions()[0].id, "P1");
        assert_eq!(bank.questions()[20].id, "D1");
        assert_eq!(bank.questions()[35].id, "M1");
        assert_eq!(bank.questions()[50].id, "S1");
    }

    #[test]
    fn ceilings_differ_between_banks() {
        // The two banks must never be cross-normalized.
        for dosha in Dosha::ALL {
            assert!(full_bank().max_attainable(dosha) > onboarding_bank().max_attainable(dosha));
        }
    }

    #[test]
    fn ceilings_match_the_authored_weight_table() {
        let onboarding = onboarding_bank();
        assert_eq!(onboarding.max_attainable(Dosha::Vata), 55);
        assert_eq!(onboarding.max_attainable(Dosha::Pitta), 50);
        assert_eq!(onboarding.max_attainable(Dosha::Kapha), 52);

        let full = full_bank();
        assert_eq!(full.max_attainable(Dosha::Vata), 183);
        assert_eq!(full.max_attainable(Dosha::Pitta), 176);
        assert_eq!(full.max_attainable(Dosha::Kapha), 177);
    }
}
