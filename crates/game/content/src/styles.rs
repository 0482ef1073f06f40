//! Named opponent fighting styles.
//!
//! A style is an [`OpponentTuning`] preset. Content files can add or override
//! styles by name; the built-in set covers the common archetypes.

use std::collections::BTreeMap;

use bout_core::OpponentTuning;

/// Registry of opponent styles keyed by name.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StyleRegistry {
    styles: BTreeMap<String, OpponentTuning>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in archetypes.
    ///
    /// - `balanced`: the default tuning
    /// - `slugger`: throws power early, rarely covers up
    /// - `counterpuncher`: waits behind the guard, finishes late
    /// - `survivor`: covers up at the first sign of trouble
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert("balanced", OpponentTuning::default());
        registry.insert(
            "slugger",
            OpponentTuning {
                aggressive_stamina_ratio: 0.35,
                finishing_health_ratio: 0.5,
                defensive_health_ratio: 0.15,
                defensive_stamina_ratio: 0.1,
            },
        );
        registry.insert(
            "counterpuncher",
            OpponentTuning {
                aggressive_stamina_ratio: 0.8,
                finishing_health_ratio: 0.25,
                defensive_health_ratio: 0.45,
                defensive_stamina_ratio: 0.35,
            },
        );
        registry.insert(
            "survivor",
            OpponentTuning {
                aggressive_stamina_ratio: 0.9,
                finishing_health_ratio: 0.15,
                defensive_health_ratio: 0.6,
                defensive_stamina_ratio: 0.5,
            },
        );
        registry
    }

    pub fn insert(&mut self, name: impl Into<String>, tuning: OpponentTuning) {
        self.styles.insert(name.into().to_ascii_lowercase(), tuning);
    }

    /// Looks a style up by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&OpponentTuning> {
        self.styles.get(&name.to_ascii_lowercase())
    }

    /// Like [`get`](Self::get) but reports the known names on a miss.
    pub fn resolve(&self, name: &str) -> Result<OpponentTuning, String> {
        self.get(name).cloned().ok_or_else(|| {
            format!(
                "unknown opponent style '{name}' (known: {})",
                self.names().join(", ")
            )
        })
    }

    /// Style names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.styles.keys().map(String::as_str).collect()
    }

    /// Adds every style from `other`, replacing same-named ones.
    pub fn merge(&mut self, other: StyleRegistry) {
        for (name, tuning) in other.styles {
            self.insert(name, tuning);
        }
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bout_core::MatchConfig;

    #[test]
    fn builtin_styles_are_valid() {
        let registry = StyleRegistry::builtin();
        assert_eq!(
            registry.names(),
            vec!["balanced", "counterpuncher", "slugger", "survivor"]
        );
        for name in registry.names() {
            let config = MatchConfig {
                opponent: registry.resolve(name).unwrap(),
                ..MatchConfig::default()
            };
            assert_eq!(config.validate(), Ok(()), "{name}");
        }
    }

    #[test]
    fn lookup_ignores_case() {
        let registry = StyleRegistry::builtin();
        assert!(registry.get("Slugger").is_some());
        let err = registry.resolve("brawler").unwrap_err();
        assert!(err.contains("balanced, counterpuncher, slugger, survivor"));
    }

    #[test]
    fn merge_overrides_by_name() {
        let mut registry = StyleRegistry::builtin();
        let mut custom = StyleRegistry::new();
        custom.insert(
            "slugger",
            OpponentTuning {
                aggressive_stamina_ratio: 0.0,
                ..OpponentTuning::default()
            },
        );
        custom.insert("brawler", OpponentTuning::default());
        registry.merge(custom);

        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get("slugger").unwrap().aggressive_stamina_ratio, 0.0);
    }
}
