use crate::models::{Investor, MatchFactors, MatchResult, Startup};

pub const INDUSTRY_WEIGHT: f64 = 25.0;
pub const STAGE_WEIGHT: f64 = 20.0;
pub const GEOGRAPHIC_WEIGHT: f64 = 15.0;
pub const CHECK_SIZE_WEIGHT: f64 = 15.0;
pub const INVOLVEMENT_WEIGHT: f64 = 10.0;
pub const VALUE_PROPOSITION_WEIGHT: f64 = 15.0;

/// Share of the industry weight subtracted when the startup's industry is excluded
pub const EXCLUDED_INDUSTRY_PENALTY_RATIO: f64 = 0.8;

/// Denominator for every pair, whatever fields are present
pub const MAX_POSSIBLE_SCORE: f64 = INDUSTRY_WEIGHT
    + STAGE_WEIGHT
    + GEOGRAPHIC_WEIGHT
    + CHECK_SIZE_WEIGHT
    + INVOLVEMENT_WEIGHT
    + VALUE_PROPOSITION_WEIGHT;

/// Calculate the compatibility of an investor with a startup
///
/// Scoring formula:
/// score = (
///     industry           25   # preferred industry, minus 20 if also excluded
///   + stage              20   # stage keywords found in funding-stage prefs
///   + geographic         15   # city and focus overlap as substrings
///   + check_size         15   # not scored yet, always 0
///   + involvement        10   # half weight when an involvement level is set
///   + value_proposition  15   # share of value props echoed in keywords
/// ) / 100
///
/// Missing optional fields contribute zero; this never fails.
pub fn calculate_match_score(investor: &Investor, startup: &Startup) -> MatchResult {
    let (industry_match, penalty) = calculate_industry_score(investor, startup);

    let factors = MatchFactors {
        industry_match,
        stage_match: calculate_stage_score(investor, startup),
        geographic_match: calculate_geographic_score(investor, startup),
        check_size_match: 0.0,
        involvement_match: calculate_involvement_score(investor),
        value_proposition_match: calculate_value_proposition_score(investor, startup),
        penalty,
    };

    MatchResult::new(&startup.id, &investor.id, factors, MAX_POSSIBLE_SCORE)
}

/// Industry contribution and penalty
///
/// Both fire when the industry sits in the preferred and excluded lists at once.
#[inline]
fn calculate_industry_score(investor: &Investor, startup: &Startup) -> (f64, f64) {
    let Some(industry) = startup.industry.as_ref() else {
        return (0.0, 0.0);
    };

    let score = if investor.preferred_industries.contains(industry) {
        INDUSTRY_WEIGHT
    } else {
        0.0
    };

    let penalty = if investor.excluded_industries.contains(industry) {
        INDUSTRY_WEIGHT * EXCLUDED_INDUSTRY_PENALTY_RATIO
    } else {
        0.0
    };

    (score, penalty)
}

#[inline]
fn calculate_stage_score(investor: &Investor, startup: &Startup) -> f64 {
    let Some(stage) = startup.development_stage else {
        return 0.0;
    };

    let keywords: Vec<String> = stage
        .funding_keywords()
        .iter()
        .map(|k| k.to_lowercase())
        .collect();

    let matched = investor.preferred_funding_stages.iter().any(|preferred| {
        let preferred = preferred.to_lowercase();
        keywords.iter().any(|k| preferred.contains(k.as_str()))
    });

    if matched {
        STAGE_WEIGHT
    } else {
        0.0
    }
}

#[inline]
fn calculate_geographic_score(investor: &Investor, startup: &Startup) -> f64 {
    let Some(city) = startup.city.as_ref() else {
        return 0.0;
    };

    let matched = investor
        .geographic_focus
        .iter()
        .any(|focus| overlaps_ignore_case(focus, city));

    if matched {
        GEOGRAPHIC_WEIGHT
    } else {
        0.0
    }
}

/// Involvement is not compared against the startup
#[inline]
fn calculate_involvement_score(investor: &Investor) -> f64 {
    if investor.involvement_level.is_some() {
        INVOLVEMENT_WEIGHT * 0.5
    } else {
        0.0
    }
}

#[inline]
fn calculate_value_proposition_score(investor: &Investor, startup: &Startup) -> f64 {
    let total = investor.value_proposition.len();
    if total == 0 {
        return 0.0;
    }

    let matched = investor
        .value_proposition
        .iter()
        .filter(|value| {
            startup
                .keywords
                .iter()
                .any(|keyword| overlaps_ignore_case(value, keyword))
        })
        .count();

    let ratio = (matched as f64 / total as f64).min(1.0);
    VALUE_PROPOSITION_WEIGHT * ratio
}

/// True when either string contains the other, ignoring case
#[inline]
fn overlaps_ignore_case(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}
