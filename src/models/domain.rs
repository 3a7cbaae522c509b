use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the marketplace a profile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Startup,
    Investor,
}

impl Role {
    /// The side a profile of this role is matched against
    pub fn opposite(self) -> Self {
        match self {
            Role::Startup => Role::Investor,
            Role::Investor => Role::Startup,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Startup => "Startup",
            Role::Investor => "Investor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Development stage a startup reports during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DevelopmentStage {
    Idea,
    #[serde(rename = "MVP")]
    Mvp,
    #[serde(rename = "Early_traction")]
    EarlyTraction,
    Growth,
    Expansion,
}

impl DevelopmentStage {
    pub const ALL: [DevelopmentStage; 5] = [
        DevelopmentStage::Idea,
        DevelopmentStage::Mvp,
        DevelopmentStage::EarlyTraction,
        DevelopmentStage::Growth,
        DevelopmentStage::Expansion,
    ];

    /// Funding-round keywords an investor's free-text stage preferences are
    /// searched for when scoring a startup at this stage
    pub fn funding_keywords(self) -> &'static [&'static str] {
        match self {
            DevelopmentStage::Idea => &["Idea", "Seed"],
            DevelopmentStage::Mvp => &["MVP", "Pre-seed", "Seed"],
            DevelopmentStage::EarlyTraction => &["Early traction", "Seed", "Series A"],
            DevelopmentStage::Growth => &["Growth", "Series A", "Series B"],
            DevelopmentStage::Expansion => &["Expansion", "Series B", "Series C+"],
        }
    }

    /// Name as stored in the profile store
    pub fn as_str(self) -> &'static str {
        match self {
            DevelopmentStage::Idea => "Idea",
            DevelopmentStage::Mvp => "MVP",
            DevelopmentStage::EarlyTraction => "Early_traction",
            DevelopmentStage::Growth => "Growth",
            DevelopmentStage::Expansion => "Expansion",
        }
    }
}

impl FromStr for DevelopmentStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DevelopmentStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| format!("unknown development stage: {}", s))
    }
}

/// Startup profile fields read by the match engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Startup {
    pub id: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(rename = "developmentStage", default)]
    pub development_stage: Option<DevelopmentStage>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Investor profile fields read by the match engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    pub id: String,
    #[serde(rename = "preferredIndustries", default)]
    pub preferred_industries: Vec<String>,
    #[serde(rename = "excludedIndustries", default)]
    pub excluded_industries: Vec<String>,
    #[serde(rename = "preferredFundingStages", default)]
    pub preferred_funding_stages: Vec<String>,
    #[serde(rename = "geographicFocus", default)]
    pub geographic_focus: Vec<String>,
    #[serde(rename = "valueProposition", default)]
    pub value_proposition: Vec<String>,
    #[serde(rename = "involvementLevel", default)]
    pub involvement_level: Option<String>,
    /// Carried for completeness; scoring does not read it yet
    #[serde(rename = "typicalCheckSize", default)]
    pub typical_check_size: Option<i64>,
}

/// Either side of the marketplace, for role-agnostic callers
#[derive(Debug, Clone, PartialEq)]
pub enum Profile {
    Startup(Startup),
    Investor(Investor),
}

/// Per-dimension contributions behind a match percentage
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFactors {
    pub industry_match: f64,
    pub stage_match: f64,
    pub geographic_match: f64,
    pub check_size_match: f64,
    pub involvement_match: f64,
    pub value_proposition_match: f64,
    /// Subtracted from the positive contributions
    pub penalty: f64,
}

impl MatchFactors {
    /// Sum of positive contributions minus the penalty
    pub fn net_score(&self) -> f64 {
        self.industry_match
            + self.stage_match
            + self.geographic_match
            + self.check_size_match
            + self.involvement_match
            + self.value_proposition_match
            - self.penalty
    }
}

/// Scored (investor, startup) pair
///
/// The percentage is derived from the factors at construction time and
/// cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatchResultRecord")]
pub struct MatchResult {
    #[serde(rename = "startupId")]
    startup_id: String,
    #[serde(rename = "investorId")]
    investor_id: String,
    #[serde(rename = "matchPercentage")]
    match_percentage: u8,
    #[serde(rename = "matchFactors")]
    match_factors: MatchFactors,
}

impl MatchResult {
    /// Build a result, deriving the percentage from the factors
    pub fn new(
        startup_id: impl Into<String>,
        investor_id: impl Into<String>,
        match_factors: MatchFactors,
        max_possible_score: f64,
    ) -> Self {
        // Scale before dividing so half points land exactly on .5
        let scaled = if max_possible_score > 0.0 {
            100.0 * match_factors.net_score() / max_possible_score
        } else {
            0.0
        };
        let match_percentage = scaled.round().clamp(0.0, 100.0) as u8;

        Self {
            startup_id: startup_id.into(),
            investor_id: investor_id.into(),
            match_percentage,
            match_factors,
        }
    }

    /// Rehydrate a persisted row without recomputing the percentage
    pub(crate) fn from_parts(
        startup_id: String,
        investor_id: String,
        match_percentage: u8,
        match_factors: MatchFactors,
    ) -> Result<Self, String> {
        if match_percentage > 100 {
            return Err(format!("match percentage out of range: {}", match_percentage));
        }

        Ok(Self {
            startup_id,
            investor_id,
            match_percentage,
            match_factors,
        })
    }

    pub fn startup_id(&self) -> &str {
        &self.startup_id
    }

    pub fn investor_id(&self) -> &str {
        &self.investor_id
    }

    pub fn match_percentage(&self) -> u8 {
        self.match_percentage
    }

    pub fn match_factors(&self) -> &MatchFactors {
        &self.match_factors
    }

    /// Storage key shared by every row describing this pair
    pub fn pair_key(&self) -> (&str, &str) {
        (self.investor_id.as_str(), self.startup_id.as_str())
    }

    /// Id of the profile on the given side of the pair
    pub fn id_for(&self, role: Role) -> &str {
        match role {
            Role::Startup => self.startup_id.as_str(),
            Role::Investor => self.investor_id.as_str(),
        }
    }
}

/// Wire shape of a [`MatchResult`]; checked before it becomes one
#[derive(Deserialize)]
struct MatchResultRecord {
    #[serde(rename = "startupId")]
    startup_id: String,
    #[serde(rename = "investorId")]
    investor_id: String,
    #[serde(rename = "matchPercentage")]
    match_percentage: u8,
    #[serde(rename = "matchFactors")]
    match_factors: MatchFactors,
}

impl TryFrom<MatchResultRecord> for MatchResult {
    type Error = String;

    fn try_from(record: MatchResultRecord) -> Result<Self, Self::Error> {
        MatchResult::from_parts(
            record.startup_id,
            record.investor_id,
            record.match_percentage,
            record.match_factors,
        )
    }
}
