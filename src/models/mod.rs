//! PokeAPI models
//!
//! Serde types for the JSON bodies the client decodes.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    LocationArea, LocationAreaPage, NamedResource, Pokemon, PokemonEncounter, PokemonStat,
    PokemonType,
};
