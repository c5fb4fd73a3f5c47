use lazy_static::lazy_static;
use std::collections::BTreeMap;

/// Supported Nigerian states and their areas (LGAs), embedded at build time.
static LOCATIONS_JSON: &str = include_str!("../../data/nigerian-states.json");

lazy_static! {
    pub static ref NIGERIA_LOCATIONS: BTreeMap<String, Vec<String>> =
        serde_json::from_str(LOCATIONS_JSON).expect("data/nigerian-states.json is malformed");
}

pub fn states() -> Vec<&'static str> {
    NIGERIA_LOCATIONS.keys().map(String::as_str).collect()
}

pub fn is_known_state(state: &str) -> bool {
    NIGERIA_LOCATIONS.contains_key(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_covers_all_states_and_the_fct() {
        assert_eq!(NIGERIA_LOCATIONS.len(), 37);
        assert!(is_known_state("Lagos"));
        assert!(is_known_state("FCT"));
        assert!(!is_known_state("Atlantis"));
    }

    #[test]
    fn lagos_lists_its_twenty_lgas() {
        let lagos = NIGERIA_LOCATIONS.get("Lagos").unwrap();
        assert_eq!(lagos.len(), 20);
        assert!(lagos.iter().any(|a| a == "Ikeja"));
    }

    #[test]
    fn states_are_sorted() {
        let states = states();
        let mut sorted = states.clone();
        sorted.sort();
        assert_eq!(states, sorted);
    }
}
