//! Static PokéAPI data served by the mock: the first 25 Pokémon, the
//! eighteen elemental types and the ten regions.

pub struct Species {
    pub id: u32,
    pub name: &'static str,
    pub height: u32,
    pub weight: u32,
    pub base_experience: u32,
    pub types: &'static [&'static str],
    /// `(name, is_hidden)`
    pub abilities: &'static [(&'static str, bool)],
}

const SEED: &[(&str, bool)] = &[("overgrow", false), ("chlorophyll", true)];
const FLAME: &[(&str, bool)] = &[("blaze", false), ("solar-power", true)];
const SHELL: &[(&str, bool)] = &[("torrent", false), ("rain-dish", true)];
const LARVA: &[(&str, bool)] = &[("shield-dust", false), ("run-away", true)];
const COCOON: &[(&str, bool)] = &[("shed-skin", false)];
const BIRD: &[(&str, bool)] = &[("keen-eye", false), ("tangled-feet", false), ("big-pecks", true)];
const MOUSE: &[(&str, bool)] = &[("run-away", false), ("guts", false), ("hustle", true)];
const BEAK: &[(&str, bool)] = &[("keen-eye", false), ("sniper", true)];
const SNAKE: &[(&str, bool)] = &[("intimidate", false), ("shed-skin", false), ("unnerve", true)];

const fn species(
    id: u32,
    name: &'static str,
    height: u32,
    weight: u32,
    base_experience: u32,
    types: &'static [&'static str],
    abilities: &'static [(&'static str, bool)],
) -> Species {
    Species {
        id,
        name,
        height,
        weight,
        base_experience,
        types,
        abilities,
    }
}

pub static POKEMON: &[Species] = &[
    species(1, "bulbasaur", 7, 69, 64, &["grass", "poison"], SEED),
    species(2, "ivysaur", 10, 130, 142, &["grass", "poison"], SEED),
    species(3, "venusaur", 20, 1000, 263, &["grass", "poison"], SEED),
    species(4, "charmander", 6, 85, 62, &["fire"], FLAME),
    species(5, "charmeleon", 11, 190, 142, &["fire"], FLAME),
    species(6, "charizard", 17, 905, 267, &["fire", "flying"], FLAME),
    species(7, "squirtle", 5, 90, 63, &["water"], SHELL),
    species(8, "wartortle", 10, 225, 142, &["water"], SHELL),
    species(9, "blastoise", 16, 855, 265, &["water"], SHELL),
    species(10, "caterpie", 3, 29, 39, &["bug"], LARVA),
    species(11, "metapod", 7, 99, 72, &["bug"], COCOON),
    species(
        12,
        "butterfree",
        11,
        320,
        198,
        &["bug", "flying"],
        &[("compound-eyes", false), ("tinted-lens", true)],
    ),
    species(13, "weedle", 3, 32, 39, &["bug", "poison"], LARVA),
    species(14, "kakuna", 6, 100, 72, &["bug", "poison"], COCOON),
    species(
        15,
        "beedrill",
        10,
        295,
        178,
        &["bug", "poison"],
        &[("swarm", false), ("sniper", true)],
    ),
    species(16, "pidgey", 3, 18, 50, &["normal", "flying"], BIRD),
    species(17, "pidgeotto", 11, 300, 122, &["normal", "flying"], BIRD),
    species(18, "pidgeot", 15, 395, 216, &["normal", "flying"], BIRD),
    species(19, "rattata", 3, 35, 51, &["normal"], MOUSE),
    species(20, "raticate", 7, 185, 145, &["normal"], MOUSE),
    species(21, "spearow", 3, 20, 52, &["normal", "flying"], BEAK),
    species(22, "fearow", 12, 380, 155, &["normal", "flying"], BEAK),
    species(23, "ekans", 20, 69, 58, &["poison"], SNAKE),
    species(24, "arbok", 35, 650, 157, &["poison"], SNAKE),
    species(
        25,
        "pikachu",
        4,
        60,
        112,
        &["electric"],
        &[("static", false), ("lightning-rod", true)],
    ),
];

/// Types in PokéAPI id order (id = index + 1).
pub static TYPES: &[&str] = &[
    "normal", "fighting", "flying", "poison", "ground", "rock", "bug", "ghost", "steel", "fire",
    "water", "grass", "electric", "psychic", "ice", "dragon", "dark", "fairy",
];

/// Regions in PokéAPI id order (id = index + 1).
pub static REGIONS: &[&str] = &[
    "kanto", "johto", "hoenn", "sinnoh", "unova", "kalos", "alola", "galar", "hisui", "paldea",
];

pub fn type_id(name: &str) -> Option<u32> {
    position(TYPES, name)
}

pub fn region_id(name: &str) -> Option<u32> {
    position(REGIONS, name)
}

fn position(names: &[&str], name: &str) -> Option<u32> {
    names
        .iter()
        .position(|n| *n == name)
        .and_then(|i| u32::try_from(i + 1).ok())
}
