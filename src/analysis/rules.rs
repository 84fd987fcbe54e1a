//! The pattern rule database: a fixed, versioned table of keyword rules
//! backing the deterministic fallback matcher.
//!
//! A rule fires when ANY of its keywords appears as a case-insensitive
//! substring of the normalized symptom text. Rules are independent and may
//! overlap; row order carries no priority — priority is resolved by the
//! triage level resolver.
//!
//! Keywords deliberately avoid apostrophes and HTML-significant characters:
//! the matcher runs on sanitized (escaped) text.

use std::sync::LazyLock;

use super::types::TriageLevel;

/// Table version, bumped whenever a row changes.
pub const RULE_TABLE_VERSION: u32 = 4;

/// A static keyword-to-condition mapping.
///
/// Invariants: non-empty keyword and condition sets, likelihood in
/// [0,100], non-empty recommendation. Checked by [`verify_rule_table`].
#[derive(Debug)]
pub struct PatternRule {
    /// Stable identifier for the audit log.
    pub id: &'static str,
    pub keywords: &'static [&'static str],
    /// Condition names this rule proposes when it fires.
    pub conditions: &'static [&'static str],
    pub base_level: TriageLevel,
    /// Base likelihood (0-100) assigned to each proposed condition.
    pub likelihood: u8,
    /// Emergency rules force `high` triage regardless of other signals.
    pub emergency: bool,
    pub recommendation: &'static str,
    pub self_care: &'static str,
}

// ── Keyword sets ────────────────────────────────────────────

static CARDIAC_KEYWORDS: &[&str] = &[
    "chest pain", "chest pressure", "chest tightness", "crushing chest",
    "pain radiating", "radiating to my arm", "heart attack",
];

static BREATHING_KEYWORDS: &[&str] = &[
    "difficulty breathing", "trouble breathing", "struggling to breathe",
    "gasping for air", "turning blue", "choking",
];

static STROKE_KEYWORDS: &[&str] = &[
    "slurred speech", "face drooping", "sudden numbness",
    "sudden weakness on one side", "worst headache of my life",
];

static COLLAPSE_KEYWORDS: &[&str] = &[
    "severe bleeding", "bleeding heavily", "passed out", "unconscious",
    "seizure", "fainted",
];

static URINARY_KEYWORDS: &[&str] = &[
    "burning during urination", "burning urination", "painful urination",
    "pain when urinating", "burning when i pee", "frequent urination",
];

static RESPIRATORY_KEYWORDS: &[&str] = &[
    "shortness of breath", "persistent cough", "wheezing", "coughing fits",
];

static GENITAL_SYMPTOM_KEYWORDS: &[&str] = &[
    "genital itching", "genital discharge", "unusual discharge",
    "pelvic pain", "genital pain",
];

static GENITAL_MASS_KEYWORDS: &[&str] = &[
    "genital lump", "lump in groin", "testicular lump", "lump on testicle",
    "breast lump", "lump in my breast",
];

static HEADACHE_KEYWORDS: &[&str] = &[
    "headache", "head pain", "migraine", "pressure in my head",
];

static SKIN_KEYWORDS: &[&str] = &[
    "rash", "itchy skin", "skin irritation", "hives", "red patches",
];

static FEVER_KEYWORDS: &[&str] = &[
    "fever", "high temperature", "chills", "night sweats",
];

static GI_KEYWORDS: &[&str] = &[
    "stomach pain", "abdominal pain", "nausea", "vomiting", "diarrhea",
];

static MSK_KEYWORDS: &[&str] = &[
    "back pain", "joint pain", "muscle ache", "sprained", "stiff neck",
];

// ── Rule table ──────────────────────────────────────────────

pub static RULE_TABLE: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        // Emergency tier
        PatternRule {
            id: "TRI-CARD-01",
            keywords: CARDIAC_KEYWORDS,
            conditions: &["Possible cardiac event", "Angina"],
            base_level: TriageLevel::High,
            likelihood: 90,
            emergency: true,
            recommendation: "Call emergency services (911) now, or have someone take you \
                             to the nearest emergency department without delay.",
            self_care: "Stop all activity and sit or lie down while waiting for help.",
        },
        PatternRule {
            id: "TRI-RESP-01",
            keywords: BREATHING_KEYWORDS,
            conditions: &["Acute respiratory distress"],
            base_level: TriageLevel::High,
            likelihood: 85,
            emergency: true,
            recommendation: "Breathing difficulty needs immediate attention. Call emergency \
                             services (911) now.",
            self_care: "Sit upright and loosen tight clothing while waiting for help.",
        },
        PatternRule {
            id: "TRI-NEURO-01",
            keywords: STROKE_KEYWORDS,
            conditions: &["Possible stroke"],
            base_level: TriageLevel::High,
            likelihood: 88,
            emergency: true,
            recommendation: "These symptoms can indicate a stroke. Call emergency services \
                             (911) immediately — minutes matter.",
            self_care: "Note the time the symptoms started; responders will ask.",
        },
        PatternRule {
            id: "TRI-EMER-01",
            keywords: COLLAPSE_KEYWORDS,
            conditions: &["Medical emergency"],
            base_level: TriageLevel::High,
            likelihood: 85,
            emergency: true,
            recommendation: "Call emergency services (911) immediately.",
            self_care: "Do not eat or drink anything until evaluated.",
        },
        // Urgent tier
        PatternRule {
            id: "TRI-URO-01",
            keywords: URINARY_KEYWORDS,
            conditions: &["Urinary tract infection", "Bladder infection"],
            base_level: TriageLevel::Medium,
            likelihood: 82,
            emergency: false,
            recommendation: "Arrange to see a clinician within 24 hours; untreated urinary \
                             infections can spread to the kidneys.",
            self_care: "Drink plenty of water and avoid caffeine until seen.",
        },
        PatternRule {
            id: "TRI-RESP-02",
            keywords: RESPIRATORY_KEYWORDS,
            conditions: &["Respiratory infection", "Bronchitis"],
            base_level: TriageLevel::Medium,
            likelihood: 72,
            emergency: false,
            recommendation: "See a clinician within a day or two, sooner if breathing \
                             becomes harder or you develop a high fever.",
            self_care: "Rest, fluids, and a humidifier can ease symptoms meanwhile.",
        },
        PatternRule {
            id: "TRI-GYN-01",
            keywords: GENITAL_SYMPTOM_KEYWORDS,
            conditions: &["Genitourinary infection"],
            base_level: TriageLevel::Medium,
            likelihood: 70,
            emergency: false,
            recommendation: "Book an appointment with a clinician this week for an \
                             examination.",
            self_care: "Avoid irritant soaps and wear breathable fabrics until seen.",
        },
        PatternRule {
            id: "TRI-GYN-02",
            keywords: GENITAL_MASS_KEYWORDS,
            conditions: &["New lump or mass"],
            base_level: TriageLevel::High,
            likelihood: 75,
            emergency: false,
            recommendation: "A new lump should be examined promptly. Request an urgent \
                             appointment with your doctor this week.",
            self_care: "Note any change in size or tenderness to report at the visit.",
        },
        PatternRule {
            id: "TRI-FEVER-01",
            keywords: FEVER_KEYWORDS,
            conditions: &["Viral infection", "Influenza"],
            base_level: TriageLevel::Medium,
            likelihood: 68,
            emergency: false,
            recommendation: "Monitor your temperature; see a clinician if the fever lasts \
                             more than three days or climbs above 39.5\u{00b0}C.",
            self_care: "Rest, fluids, and fever reducers as directed on the label.",
        },
        PatternRule {
            id: "TRI-GI-01",
            keywords: GI_KEYWORDS,
            conditions: &["Gastroenteritis"],
            base_level: TriageLevel::Medium,
            likelihood: 66,
            emergency: false,
            recommendation: "See a clinician if symptoms persist beyond 48 hours, or sooner \
                             if you cannot keep fluids down.",
            self_care: "Small sips of water or oral rehydration solution; bland food only.",
        },
        // Low tier
        PatternRule {
            id: "TRI-HEAD-01",
            keywords: HEADACHE_KEYWORDS,
            conditions: &["Tension headache", "Migraine"],
            base_level: TriageLevel::Low,
            likelihood: 70,
            emergency: false,
            recommendation: "Rest in a quiet, dark room; see a clinician if the headache \
                             persists beyond a few days or worsens suddenly.",
            self_care: "Hydration and over-the-counter pain relief as directed on the label.",
        },
        PatternRule {
            id: "TRI-SKIN-01",
            keywords: SKIN_KEYWORDS,
            conditions: &["Contact dermatitis", "Allergic skin reaction"],
            base_level: TriageLevel::Low,
            likelihood: 65,
            emergency: false,
            recommendation: "See a clinician if the rash spreads, blisters, or is \
                             accompanied by fever.",
            self_care: "Avoid scratching; a cool compress and fragrance-free moisturizer \
                        can help.",
        },
        PatternRule {
            id: "TRI-MSK-01",
            keywords: MSK_KEYWORDS,
            conditions: &["Musculoskeletal strain"],
            base_level: TriageLevel::Low,
            likelihood: 60,
            emergency: false,
            recommendation: "See a clinician if the pain does not improve within a week or \
                             limits daily activity.",
            self_care: "Relative rest, ice for the first day or two, then gentle movement.",
        },
    ]
});

/// Check the table invariants. A violation means a corrupt entry — the
/// matcher must not run against it.
pub fn verify_rule_table() -> Result<(), String> {
    for rule in RULE_TABLE.iter() {
        if rule.keywords.is_empty() {
            return Err(format!("rule {} has an empty keyword set", rule.id));
        }
        if rule.conditions.is_empty() {
            return Err(format!("rule {} has no conditions", rule.id));
        }
        if rule.likelihood > 100 {
            return Err(format!(
                "rule {} likelihood {} out of range",
                rule.id, rule.likelihood
            ));
        }
        if rule.recommendation.trim().is_empty() {
            return Err(format!("rule {} has an empty recommendation", rule.id));
        }
        if rule.keywords.iter().any(|kw| kw.trim().is_empty()) {
            return Err(format!("rule {} contains a blank keyword", rule.id));
        }
    }
    Ok(())
}
