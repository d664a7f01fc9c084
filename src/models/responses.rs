//! PokeAPI response models
//!
//! Only the fields the REPL prints are decoded; everything else in the
//! payloads is ignored.

use serde::Deserialize;

/// A `{ name, url }` reference, the way PokeAPI links resources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One page of `GET /location-area/`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationAreaPage {
    #[serde(default)]
    pub count: u32,
    /// Absolute URL of the next page
    pub next: Option<String>,
    /// Absolute URL of the previous page
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// `GET /location-area/{name}/`, reduced to the encounter list.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationArea {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

/// `GET /pokemon/{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    /// Missing for a handful of alternate forms
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonType {
    #[serde(default)]
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_area_page_deserialize() {
        let json = r#"{
            "count": 1089,
            "next": "https://pokeapi.co/api/v2/location-area/?offset=20&limit=20",
            "previous": null,
            "results": [
                {"name": "canalave-city-area", "url": "https://pokeapi.co/api/v2/location-area/1/"},
                {"name": "eterna-city-area", "url": "https://pokeapi.co/api/v2/location-area/2/"}
            ]
        }"#;
        let page: LocationAreaPage = serde_json::from_str(json).unwrap();

        assert_eq!(page.count, 1089);
        assert!(page.next.is_some());
        assert!(page.previous.is_none());
        assert_eq!(page.results[1].name, "eterna-city-area");
    }

    #[test]
    fn test_location_area_ignores_unknown_fields() {
        let json = r#"{
            "id": 1,
            "name": "canalave-city-area",
            "game_index": 1,
            "pokemon_encounters": [
                {"pokemon": {"name": "tentacool", "url": "u"}, "version_details": []}
            ]
        }"#;
        let area: LocationArea = serde_json::from_str(json).unwrap();

        assert_eq!(area.pokemon_encounters.len(), 1);
        assert_eq!(area.pokemon_encounters[0].pokemon.name, "tentacool");
    }

    #[test]
    fn test_pokemon_deserialize() {
        let json = r#"{
            "name": "pidgey",
            "height": 3,
            "weight": 18,
            "base_experience": 50,
            "stats": [{"base_stat": 40, "effort": 0, "stat": {"name": "hp", "url": "u"}}],
            "types": [{"slot": 1, "type": {"name": "normal", "url": "u"}}]
        }"#;
        let pokemon: Pokemon = serde_json::from_str(json).unwrap();

        assert_eq!(pokemon.base_experience, Some(50));
        assert_eq!(pokemon.stats[0].stat.name, "hp");
        assert_eq!(pokemon.types[0].kind.name, "normal");
    }

    #[test]
    fn test_pokemon_null_base_experience() {
        let json = r#"{"name": "x", "height": 1, "weight": 1, "base_experience": null}"#;
        let pokemon: Pokemon = serde_json::from_str(json).unwrap();
        assert_eq!(pokemon.base_experience, None);
    }
}
