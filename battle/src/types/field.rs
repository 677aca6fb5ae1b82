//! Room-wide state

use psbot_protocol::PokemonId;

use super::conditions::Weather;

/// The current weather and who set it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherState {
    pub kind: Option<Weather>,
    /// Pokemon credited with starting it, when that could be determined
    pub source: Option<PokemonId>,
    /// Started by an ability rather than a move
    pub from_ability: bool,
    /// Upkeep ticks since it started
    pub turns: u32,
}

impl WeatherState {
    pub fn start(&mut self, kind: Weather, source: Option<PokemonId>, from_ability: bool) {
        *self = Self {
            kind: Some(kind),
            source,
            from_ability,
            turns: 0,
        };
    }

    pub fn tick(&mut self) {
        if self.kind.is_some() {
            self.turns += 1;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Global field state affecting both sides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomStatus {
    /// Gravity active (everything is grounded)
    pub gravity: bool,

    /// Trick Room active
    pub trick_room: bool,

    pub weather: WeatherState,
}

impl RoomStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a `-fieldstart` effect; returns false if the effect is not tracked
    pub fn apply_field_start(&mut self, effect: &str) -> bool {
        self.set_flag(effect, true)
    }

    /// Apply a `-fieldend` effect; returns false if the effect is not tracked
    pub fn apply_field_end(&mut self, effect: &str) -> bool {
        self.set_flag(effect, false)
    }

    fn set_flag(&mut self, effect: &str, value: bool) -> bool {
        let clean = effect.strip_prefix("move: ").unwrap_or(effect);
        let normalized = clean.to_lowercase().replace([' ', '-'], "");

        match normalized.as_str() {
            "gravity" => self.gravity = value,
            "trickroom" => self.trick_room = value,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_field_start_and_end() {
        let mut room = RoomStatus::new();
        assert!(room.apply_field_start("move: Gravity"));
        assert!(room.gravity);
        assert!(room.apply_field_start("move: Trick Room"));
        assert!(room.trick_room);

        assert!(room.apply_field_end("move: Gravity"));
        assert!(!room.gravity);
        assert!(room.trick_room);
    }

    #[test]
    fn test_untracked_field_effect() {
        let mut room = RoomStatus::new();
        assert!(!room.apply_field_start("move: Electric Terrain"));
        assert_eq!(room, RoomStatus::default());
    }

    #[test]
    fn test_weather_lifecycle() {
        let mut weather = WeatherState::default();
        weather.tick();
        assert_eq!(weather.turns, 0);

        let source = PokemonId::parse("p2a: Tyranitar").unwrap();
        weather.start(Weather::Sand, Some(source.clone()), true);
        weather.tick();
        weather.tick();
        assert_eq!(weather.turns, 2);
        assert_eq!(weather.source, Some(source));

        weather.clear();
        assert_eq!(weather.kind, None);
        assert!(!weather.from_ability);
    }
}
