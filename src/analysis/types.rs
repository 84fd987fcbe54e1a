use serde::{Deserialize, Serialize};

/// Coarse urgency classification: how quickly the user should seek care.
///
/// Ordered so severity comparisons read naturally (`Low < Medium < High`);
/// the resolver relies on this for its escalation-only merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageLevel {
    Low,
    Medium,
    High,
}

/// Which analysis path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMethod {
    #[serde(rename = "ai")]
    Ai,
    #[serde(rename = "rule-based")]
    RuleBased,
}

/// How long the symptoms have been present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomDuration {
    UnderOneDay,
    OneToThreeDays,
    FourToSevenDays,
    OneToFourWeeks,
    OverOneMonth,
}

impl SymptomDuration {
    /// Plain-language label for prompt construction.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnderOneDay => "less than a day",
            Self::OneToThreeDays => "1-3 days",
            Self::FourToSevenDays => "4-7 days",
            Self::OneToFourWeeks => "1-4 weeks",
            Self::OverOneMonth => "more than a month",
        }
    }
}

/// Rough body region the symptoms concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyLocation {
    Head,
    Chest,
    Abdomen,
    Back,
    Limbs,
    Skin,
    Pelvis,
    General,
}

impl BodyLocation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Chest => "chest",
            Self::Abdomen => "abdomen",
            Self::Back => "back",
            Self::Limbs => "arms or legs",
            Self::Skin => "skin",
            Self::Pelvis => "pelvic region",
            Self::General => "general / whole body",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
    Other,
}

/// Whose symptoms are being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Adult,
    Child,
}

/// Structured interview answers collected alongside the free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewAnswers {
    /// Self-reported pain on a 1-10 scale.
    pub pain_scale: u8,
    pub fever: bool,
    pub duration: SymptomDuration,
    pub body_location: BodyLocation,
}

/// Optional demographic context. Every field is optional — the interview
/// never requires these.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub age: Option<u32>,
    pub sex: Option<Sex>,
    pub profile: Option<ProfileKind>,
}

/// One symptom intake. Consumed exactly once to produce exactly one
/// [`TriageResult`]; never mutated by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomReport {
    /// Free-text symptom description. The validator normalizes this
    /// before either analysis path sees it.
    pub description: String,
    pub answers: InterviewAnswers,
    pub demographics: Option<Demographics>,
}

/// Confidence tier the advisory model may attach per condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

/// A candidate condition, produced by either analysis path.
/// Never persisted by the engine itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionCandidate {
    pub name: String,
    /// 0-100.
    pub likelihood: u8,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_tier: Option<ConfidenceTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_care: Option<String>,
}

/// Final output of one analysis call. Both analysis paths produce this
/// exact shape; callers need no knowledge of which path executed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResult {
    /// Most severe level implied by any input signal. Escalation-only:
    /// never below what a single signal implies.
    pub triage_level: TriageLevel,
    /// Highest likelihood first, capped at 3, never empty.
    pub conditions: Vec<ConditionCandidate>,
    pub recommended_actions: String,
    pub analysis_method: AnalysisMethod,
    /// Self-assessed reliability, 0.0-1.0.
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limitations: Option<String>,
}
