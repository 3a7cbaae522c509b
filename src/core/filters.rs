use crate::models::{Investor, Profile, Startup};

/// Check whether an investor has stated enough preferences to be invited into matching
#[inline]
pub fn is_investor_complete(investor: &Investor) -> bool {
    !investor.preferred_industries.is_empty()
        || !investor.preferred_funding_stages.is_empty()
        || !investor.geographic_focus.is_empty()
}

/// Check whether a startup has filled in everything matching relies on
///
/// Stricter than [`is_candidate_startup`]: the city is required here.
#[inline]
pub fn is_startup_complete(startup: &Startup) -> bool {
    startup.industry.is_some() && startup.development_stage.is_some() && startup.city.is_some()
}

/// Completeness check for either side of the marketplace
pub fn is_complete(profile: &Profile) -> bool {
    match profile {
        Profile::Startup(startup) => is_startup_complete(startup),
        Profile::Investor(investor) => is_investor_complete(investor),
    }
}

/// Check if an investor is eligible to be scored against a startup anchor
///
/// Currently the same rule as [`is_investor_complete`], kept separate so the
/// two can diverge.
#[inline]
pub fn is_candidate_investor(investor: &Investor) -> bool {
    !investor.preferred_industries.is_empty()
        || !investor.preferred_funding_stages.is_empty()
        || !investor.geographic_focus.is_empty()
}

/// Check if a startup is eligible to be scored against an investor anchor
#[inline]
pub fn is_candidate_startup(startup: &Startup) -> bool {
    startup.industry.is_some() && startup.development_stage.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DevelopmentStage;

    fn create_test_startup() -> Startup {
        Startup {
            id: "startup_1".to_string(),
            industry: Some("Agritech".to_string()),
            development_stage: Some(DevelopmentStage::Growth),
            city: Some("Cebu".to_string()),
            keywords: vec![],
        }
    }

    fn create_test_investor() -> Investor {
        Investor {
            id: "investor_1".to_string(),
            preferred_industries: vec![],
            excluded_industries: vec!["Gaming".to_string()],
            preferred_funding_stages: vec![],
            geographic_focus: vec![],
            value_proposition: vec!["Mentorship".to_string()],
            involvement_level: Some("Board seat".to_string()),
            typical_check_size: Some(100_000),
        }
    }

    #[test]
    fn test_investor_needs_a_targeting_preference() {
        let mut investor = create_test_investor();
        assert!(!is_investor_complete(&investor));
        assert!(!is_candidate_investor(&investor));

        investor.geographic_focus = vec!["Visayas".to_string()];
        assert!(is_investor_complete(&investor));
        assert!(is_candidate_investor(&investor));
    }

    #[test]
    fn test_startup_without_city_is_candidate_but_incomplete() {
        let mut startup = create_test_startup();
        assert!(is_startup_complete(&startup));
        assert!(is_candidate_startup(&startup));

        startup.city = None;
        assert!(!is_startup_complete(&startup));
        assert!(is_candidate_startup(&startup));
    }

    #[test]
    fn test_startup_without_stage_is_excluded() {
        let mut startup = create_test_startup();
        startup.development_stage = None;
        assert!(!is_startup_complete(&startup));
        assert!(!is_candidate_startup(&startup));
    }

    #[test]
    fn test_profile_dispatch() {
        assert!(is_complete(&Profile::Startup(create_test_startup())));
        assert!(!is_complete(&Profile::Investor(create_test_investor())));
    }
}
