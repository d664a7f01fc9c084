//! REPL Commands
//!
//! Command registry and the session state commands act on.

use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::api::PokeApiClient;
use crate::error::{PokedexError, Result};
use crate::pokedex::{is_caught, CaughtPokemon, Pokedex};

// == Command ==
/// Every command the REPL understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

impl Command {
    /// All commands, in the order `help` lists them.
    pub const ALL: [Command; 8] = [
        Command::Help,
        Command::Exit,
        Command::Map,
        Command::MapBack,
        Command::Explore,
        Command::Catch,
        Command::Inspect,
        Command::Pokedex,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Help => "Displays a help message",
            Command::Exit => "Exit the Pokedex",
            Command::Map => "Show the next page of location areas",
            Command::MapBack => "Show the previous page of location areas",
            Command::Explore => "Explore a specific location area",
            Command::Catch => "Try to catch a Pokemon by name",
            Command::Inspect => "Show details of a caught Pokemon",
            Command::Pokedex => "List all caught Pokemon",
        }
    }

    /// Looks a command up by its exact (already lowercased) name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

// == Session ==
/// State threaded through every command: the API client, the Pokedex and the
/// map paging cursor.
#[derive(Debug)]
pub struct Session {
    client: PokeApiClient,
    pokedex: Pokedex,
    /// Page `map` fetches next; `None` once the last page was shown
    next_page: Option<String>,
    /// Page `mapb` fetches; `None` while on the first page
    previous_page: Option<String>,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a session with a caller-supplied RNG for catch rolls.
    pub fn with_rng(client: PokeApiClient, rng: StdRng) -> Self {
        let next_page = Some(client.location_areas_url());
        Self {
            client,
            pokedex: Pokedex::new(),
            next_page,
            previous_page: None,
            rng,
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    pub fn pokedex_mut(&mut self) -> &mut Pokedex {
        &mut self.pokedex
    }

    // == Execute ==
    /// Runs one command, writing its output to `out`.
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        args: &[String],
        out: &mut W,
    ) -> Result<Flow> {
        debug!("Executing {} with {:?}", command.name(), args);

        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore => {
                let area = first_arg(args, "a location area to explore")?;
                self.explore(area, out).await?;
            }
            Command::Catch => {
                let name = first_arg(args, "a Pokemon name to catch")?;
                self.catch(name, out).await?;
            }
            Command::Inspect => {
                let name = first_arg(args, "a Pokemon name to inspect")?;
                self.inspect(name, out)?;
            }
            Command::Pokedex => self.list_pokedex(out)?,
        }

        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for command in Command::ALL {
            writeln!(out, "{}: {}", command.name(), command.description())?;
        }
        Ok(())
    }

    async fn map<W: Write>(&mut self, out: &mut W) -> Result<()> {
        match self.next_page.clone() {
            Some(url) => self.show_page(&url, out).await,
            None => {
                writeln!(out, "You're on the last page")?;
                Ok(())
            }
        }
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        match self.previous_page.clone() {
            Some(url) => self.show_page(&url, out).await,
            None => {
                writeln!(out, "You're on the first page")?;
                Ok(())
            }
        }
    }

    async fn show_page<W: Write>(&mut self, url: &str, out: &mut W) -> Result<()> {
        let page = self.client.location_areas(Some(url)).await?;

        self.next_page = page.next;
        self.previous_page = page.previous;

        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<()> {
        let location = self.client.location_area(area).await?;

        writeln!(out, "Exploring {}...", area)?;
        if location.pokemon_encounters.is_empty() {
            writeln!(out, "No Pokemon found")?;
            return Ok(());
        }
        writeln!(out, "Found Pokemon:")?;
        for encounter in &location.pokemon_encounters {
            writeln!(out, " - {}", encounter.pokemon.name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        if self.pokedex.contains(name) {
            writeln!(out, "{} is already caught!", name)?;
            return Ok(());
        }

        writeln!(out, "Throwing a Pokeball at {}...", name)?;
        let pokemon = self.client.pokemon(name).await?;

        let roll = self.rng.gen_range(0..100);
        let base_experience = pokemon.base_experience.unwrap_or(0);
        if is_caught(roll, base_experience) {
            writeln!(out, "{} was caught!", name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.insert(CaughtPokemon::from(&pokemon));
        } else {
            writeln!(out, "{} escaped!", name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let Some(pokemon) = self.pokedex.get(name) else {
            writeln!(out, "You have not caught that Pokemon.")?;
            return Ok(());
        };

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for (stat, value) in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat, value)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind)?;
        }
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "You have not caught any Pokemon yet.")?;
            return Ok(());
        }

        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }
}

fn first_arg<'a>(args: &'a [String], what: &'static str) -> Result<&'a str> {
    args.first()
        .map(String::as_str)
        .ok_or(PokedexError::MissingArgument(what))
}
