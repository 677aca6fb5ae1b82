//! Volatile status names as they appear in `-start`, `-end`, `-activate` and
//! `-singleturn` lines

/// The volatile effects the tracker models
///
/// Anything else is [`VolatileName::Other`], which callers log and ignore.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VolatileName {
    Confusion,
    Disable,
    Substitute,
    LeechSeed,
    Ingrain,
    MagnetRise,
    Embargo,
    Roost,
    /// Protect, Detect, King's Shield and the rest of the stall family
    Stall,
    /// Endure counts toward the stall chain but blocks nothing
    Endure,
    MatBlock,
    /// Mean Look and the partial traps (Wrap, Fire Spin)
    Trapped,
    MustRecharge,
    Other(String),
}

impl VolatileName {
    /// Classify a protocol effect string
    pub fn from_protocol(s: &str) -> Self {
        let clean = s
            .strip_prefix("move: ")
            .or_else(|| s.strip_prefix("ability: "))
            .unwrap_or(s);

        let normalized = clean.to_lowercase().replace([' ', '-', '\''], "");

        match normalized.as_str() {
            "confusion" | "confused" => VolatileName::Confusion,
            "disable" | "disabled" => VolatileName::Disable,
            "substitute" => VolatileName::Substitute,
            "leechseed" => VolatileName::LeechSeed,
            "ingrain" => VolatileName::Ingrain,
            "magnetrise" => VolatileName::MagnetRise,
            "embargo" => VolatileName::Embargo,
            "roost" => VolatileName::Roost,
            "protect" | "detect" | "kingsshield" | "spikyshield" | "banefulbunker" | "obstruct"
            | "silktrap" | "burningbulwark" => VolatileName::Stall,
            "endure" => VolatileName::Endure,
            "matblock" => VolatileName::MatBlock,
            "trapped" | "meanlook" | "spiderweb" | "block" | "partiallytrapped" | "bind" | "wrap"
            | "firespin" | "clamp" | "whirlpool" | "sandtomb" | "magmastorm" | "infestation"
            | "snaptrap" | "thundercage" => VolatileName::Trapped,
            "mustrecharge" | "recharge" => VolatileName::MustRecharge,
            _ => VolatileName::Other(s.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, VolatileName::Other(_))
    }

    /// Effects whose activation means a stalling defender blocked a move
    pub fn blocks_moves(&self) -> bool {
        matches!(self, VolatileName::Stall | VolatileName::MatBlock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_protocol_basic() {
        assert_eq!(VolatileName::from_protocol("confusion"), VolatileName::Confusion);
        assert_eq!(VolatileName::from_protocol("Substitute"), VolatileName::Substitute);
        assert_eq!(VolatileName::from_protocol("Magnet Rise"), VolatileName::MagnetRise);
    }

    #[test]
    fn test_from_protocol_with_prefix() {
        assert_eq!(VolatileName::from_protocol("move: Leech Seed"), VolatileName::LeechSeed);
        assert_eq!(VolatileName::from_protocol("move: Mat Block"), VolatileName::MatBlock);
    }

    #[test]
    fn test_stall_family() {
        for name in ["Protect", "move: Detect", "King's Shield", "spikyshield"] {
            let volatile = VolatileName::from_protocol(name);
            assert_eq!(volatile, VolatileName::Stall, "{}", name);
            assert!(volatile.blocks_moves());
        }
        assert!(!VolatileName::Endure.blocks_moves());
    }

    #[test]
    fn test_partial_traps_are_trapping() {
        assert_eq!(VolatileName::from_protocol("move: Wrap"), VolatileName::Trapped);
        assert_eq!(VolatileName::from_protocol("Fire Spin"), VolatileName::Trapped);
        assert_eq!(VolatileName::from_protocol("trapped"), VolatileName::Trapped);
    }

    #[test]
    fn test_unknown_volatile() {
        let volatile = VolatileName::from_protocol("Smack Down");
        assert_eq!(volatile, VolatileName::Other("Smack Down".to_string()));
        assert!(!volatile.is_known());
    }
}
