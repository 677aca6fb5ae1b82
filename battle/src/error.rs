use psbot_protocol::PokemonId;
use thiserror::Error;

/// A lookup against the static reference data failed
#[derive(Error, Debug)]
pub enum DexError {
    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    #[error("Unknown move: {0}")]
    UnknownMove(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Unknown ability: {0}")]
    UnknownAbility(String),

    #[error("Malformed dex data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The tracker can no longer mirror server state
///
/// Every variant is fatal for the battle being tracked.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Dex(#[from] DexError),

    #[error("No slot for {0}: every team slot is already revealed")]
    TeamFull(PokemonId),

    #[error("Event names {0}, who has not been revealed")]
    UnknownPokemon(PokemonId),

    #[error("Own side is unknown until the first request")]
    NoPerspective,
}
