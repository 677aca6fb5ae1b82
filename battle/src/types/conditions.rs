//! Weather and side conditions

/// Weather conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weather {
    Sun,
    Rain,
    Sand,
    Hail,
    Snow,
    HarshSun,
    HeavyRain,
    StrongWinds,
}

impl Weather {
    pub const ALL: [Weather; 8] = [
        Weather::Sun,
        Weather::Rain,
        Weather::Sand,
        Weather::Hail,
        Weather::Snow,
        Weather::HarshSun,
        Weather::HeavyRain,
        Weather::StrongWinds,
    ];

    /// Parse the weather name of a `-weather` line; "none" and unknown names give `None`
    pub fn from_protocol(s: &str) -> Option<Self> {
        let normalized = s.to_lowercase().replace([' ', '-'], "");

        match normalized.as_str() {
            "sunnyday" | "sun" => Some(Weather::Sun),
            "raindance" | "rain" => Some(Weather::Rain),
            "sandstorm" | "sand" => Some(Weather::Sand),
            "hail" => Some(Weather::Hail),
            "snow" | "snowscape" => Some(Weather::Snow),
            "desolateland" | "harshsun" => Some(Weather::HarshSun),
            "primordialsea" | "heavyrain" => Some(Weather::HeavyRain),
            "deltastream" | "strongwinds" => Some(Weather::StrongWinds),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Sun => "Sun",
            Weather::Rain => "Rain",
            Weather::Sand => "Sandstorm",
            Weather::Hail => "Hail",
            Weather::Snow => "Snow",
            Weather::HarshSun => "Harsh Sun",
            Weather::HeavyRain => "Heavy Rain",
            Weather::StrongWinds => "Strong Winds",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Side conditions tracked per team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideCondition {
    Spikes,
    ToxicSpikes,
    StealthRock,
    Reflect,
    LightScreen,
}

impl SideCondition {
    /// Parse a `-sidestart`/`-sideend` condition, with or without the "move: " prefix
    pub fn from_protocol(s: &str) -> Option<Self> {
        let clean = s.strip_prefix("move: ").unwrap_or(s);
        let normalized = clean.to_lowercase().replace([' ', '-'], "");

        match normalized.as_str() {
            "spikes" => Some(SideCondition::Spikes),
            "toxicspikes" => Some(SideCondition::ToxicSpikes),
            "stealthrock" => Some(SideCondition::StealthRock),
            "reflect" => Some(SideCondition::Reflect),
            "lightscreen" => Some(SideCondition::LightScreen),
            _ => None,
        }
    }

    /// Maximum stack for layered hazards
    pub fn max_layers(&self) -> u8 {
        match self {
            SideCondition::Spikes => 3,
            SideCondition::ToxicSpikes => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_from_protocol() {
        assert_eq!(Weather::from_protocol("SunnyDay"), Some(Weather::Sun));
        assert_eq!(Weather::from_protocol("RainDance"), Some(Weather::Rain));
        assert_eq!(Weather::from_protocol("Sandstorm"), Some(Weather::Sand));
        assert_eq!(Weather::from_protocol("DesolateLand"), Some(Weather::HarshSun));
        assert_eq!(Weather::from_protocol("none"), None);
    }

    #[test]
    fn test_weather_index_matches_all() {
        for (i, weather) in Weather::ALL.iter().enumerate() {
            assert_eq!(weather.index(), i);
        }
    }

    #[test]
    fn test_side_condition_from_protocol() {
        assert_eq!(SideCondition::from_protocol("move: Stealth Rock"), Some(SideCondition::StealthRock));
        assert_eq!(SideCondition::from_protocol("Spikes"), Some(SideCondition::Spikes));
        assert_eq!(SideCondition::from_protocol("move: Toxic Spikes"), Some(SideCondition::ToxicSpikes));
        assert_eq!(SideCondition::from_protocol("Reflect"), Some(SideCondition::Reflect));
        assert_eq!(SideCondition::from_protocol("Tailwind"), None);
        assert_eq!(SideCondition::Spikes.max_layers(), 3);
    }
}
