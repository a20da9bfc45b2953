use serde::Serialize;
use std::fmt;

/// Roast levels in the order of the model's output vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoastLevel {
    Dark,
    Green,
    Light,
    Medium,
}

impl RoastLevel {
    pub const ALL: [RoastLevel; 4] = [
        RoastLevel::Dark,
        RoastLevel::Green,
        RoastLevel::Light,
        RoastLevel::Medium,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Education page order, from raw to darkest.
    pub const BY_ROAST: [RoastLevel; 4] = [
        RoastLevel::Green,
        RoastLevel::Light,
        RoastLevel::Medium,
        RoastLevel::Dark,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoastLevel::Dark => "dark",
            RoastLevel::Green => "green",
            RoastLevel::Light => "light",
            RoastLevel::Medium => "medium",
        }
    }

    pub fn display_name(&self) -> String {
        self.as_str().to_uppercase()
    }

    pub fn title(&self) -> &'static str {
        match self {
            RoastLevel::Dark => "Dark Roast",
            RoastLevel::Green => "Green Bean",
            RoastLevel::Light => "Light Roast",
            RoastLevel::Medium => "Medium Roast",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RoastLevel::Dark => {
                "Roasted past the second crack. Strongly bitter and smoky, well suited to espresso."
            }
            RoastLevel::Green => "Raw coffee beans that have not been roasted yet.",
            RoastLevel::Light => {
                "Pulled around the first crack. High acidity and fruity notes, suited to manual brewing."
            }
            RoastLevel::Medium => {
                "Balanced flavour between the first and second crack. The most common roast in cafes."
            }
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_order_matches_model_output() {
        assert_eq!(RoastLevel::from_index(0), Some(RoastLevel::Dark));
        assert_eq!(RoastLevel::from_index(1), Some(RoastLevel::Green));
        assert_eq!(RoastLevel::from_index(2), Some(RoastLevel::Light));
        assert_eq!(RoastLevel::from_index(3), Some(RoastLevel::Medium));
        assert_eq!(RoastLevel::from_index(4), None);
        assert_eq!(RoastLevel::COUNT, 4);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(RoastLevel::parse(" Medium "), Some(RoastLevel::Medium));
        assert_eq!(RoastLevel::parse("espresso"), None);
        assert_eq!(RoastLevel::Dark.display_name(), "DARK");
        assert_eq!(RoastLevel::Light.to_string(), "light");
    }
}
