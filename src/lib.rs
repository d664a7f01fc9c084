//! Pokecache - A Pokedex REPL backed by an expiring response cache
//!
//! The core is [`cache::Cache`], a mutex-guarded key/value store swept by a
//! background reaper. The REPL and PokeAPI client sit on top of it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pokedex;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::Cache;
pub use config::{CacheConfig, Config};
pub use error::{PokedexError, Result};
