//! PokéAPI-shaped mock server.
//!
//! Serves a static fixture under `/api/v2` with the same listing and detail
//! shapes as `https://pokeapi.co/api/v2`, plus an `/echo` route that
//! reflects method, query, headers and JSON body for any verb.

pub mod fixture;

use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::{Path, Query},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use fixture::{Species, POKEMON, REGIONS, TYPES};

pub const API_PREFIX: &str = "/api/v2";

const DEFAULT_LIMIT: usize = 20;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Paginated listing, as returned by `/pokemon`, `/type` and `/region`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    pub is_hidden: bool,
    pub slot: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub base_experience: u32,
    pub height: u32,
    pub weight: u32,
    pub order: u32,
    pub is_default: bool,
    pub types: Vec<TypeSlot>,
    pub abilities: Vec<AbilitySlot>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypePokemon {
    pub pokemon: NamedResource,
    pub slot: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PokemonType {
    pub id: u32,
    pub name: String,
    pub pokemon: Vec<TypePokemon>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Region {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// What `/echo` sends back.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub query: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub json: Value,
}

/// Non-2xx answer with the canonical reason phrase as a plain-text body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection(pub StatusCode);

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let reason = self.0.canonical_reason().unwrap_or("Error");
        (self.0, reason).into_response()
    }
}

pub fn app() -> Router {
    let api = Router::new()
        .route("/pokemon", get(list_pokemon))
        .route("/pokemon/{id_or_name}", get(get_pokemon))
        .route("/type", get(list_types))
        .route("/type/{id_or_name}", get(get_type))
        .route("/region", get(list_regions))
        .route("/region/{id_or_name}", get(get_region))
        .route("/echo", any(echo));
    Router::new()
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// A path segment naming a resource either by numeric id or by name.
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup {
    Id(i64),
    Name(String),
}

/// Segments may only contain `[a-z0-9-]` after lowercasing; anything else
/// is a bad request. Numeric segments become `Id` (negative values included,
/// they simply match nothing).
pub fn parse_lookup(raw: &str) -> Result<Lookup, Rejection> {
    let name = raw.to_ascii_lowercase();
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(Rejection(StatusCode::BAD_REQUEST));
    }
    match name.parse::<i64>() {
        Ok(id) => Ok(Lookup::Id(id)),
        Err(_) => Ok(Lookup::Name(name)),
    }
}

fn resource_url(kind: &str, id: u32) -> String {
    format!("{API_PREFIX}/{kind}/{id}/")
}

fn named(kind: &str, id: u32, name: &str) -> NamedResource {
    NamedResource {
        name: name.to_string(),
        url: resource_url(kind, id),
    }
}

/// Slice `items` the way PokéAPI paginates, with `next`/`previous` links.
fn paginate(kind: &str, items: Vec<NamedResource>, page: &Pagination) -> Page {
    let count = items.len();
    let limit = page.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = page.offset.unwrap_or(0);
    let link = |offset: usize| format!("{API_PREFIX}/{kind}?offset={offset}&limit={limit}");

    // A zero limit never advances, so it gets no `next` link.
    let next = (limit > 0 && offset.saturating_add(limit) < count)
        .then(|| link(offset.saturating_add(limit)));
    let previous = (offset > 0).then(|| link(offset.saturating_sub(limit)));
    let results = items.into_iter().skip(offset).take(limit).collect();

    Page {
        count,
        next,
        previous,
        results,
    }
}

fn find_by<'a, T>(
    items: impl IntoIterator<Item = T>,
    lookup: &Lookup,
    id: impl Fn(&T) -> u32,
    name: impl Fn(&T) -> &'a str,
) -> Result<T, Rejection> {
    items
        .into_iter()
        .find(|item| match lookup {
            Lookup::Id(wanted) => i64::from(id(item)) == *wanted,
            Lookup::Name(wanted) => name(item) == wanted.as_str(),
        })
        .ok_or(Rejection(StatusCode::NOT_FOUND))
}

fn pokemon_detail(species: &Species) -> Pokemon {
    Pokemon {
        id: species.id,
        name: species.name.to_string(),
        base_experience: species.base_experience,
        height: species.height,
        weight: species.weight,
        order: species.id,
        is_default: true,
        types: species
            .types
            .iter()
            .zip(1..)
            .map(|(name, slot)| TypeSlot {
                slot,
                kind: named("type", fixture::type_id(name).unwrap_or(0), name),
            })
            .collect(),
        abilities: species
            .abilities
            .iter()
            .zip(1..)
            .map(|((name, is_hidden), slot)| AbilitySlot {
                ability: NamedResource {
                    name: name.to_string(),
                    url: format!("{API_PREFIX}/ability/{name}/"),
                },
                is_hidden: *is_hidden,
                slot,
            })
            .collect(),
    }
}

async fn list_pokemon(Query(page): Query<Pagination>) -> Json<Page> {
    let items = POKEMON
        .iter()
        .map(|p| named("pokemon", p.id, p.name))
        .collect();
    Json(paginate("pokemon", items, &page))
}

async fn get_pokemon(Path(id_or_name): Path<String>) -> Result<Json<Pokemon>, Rejection> {
    let lookup = parse_lookup(&id_or_name)?;
    let species = find_by(POKEMON.iter(), &lookup, |p| p.id, |p| p.name)?;
    Ok(Json(pokemon_detail(species)))
}

fn indexed(names: &'static [&'static str]) -> impl Iterator<Item = (u32, &'static str)> {
    (1..).zip(names.iter().copied())
}

async fn list_types(Query(page): Query<Pagination>) -> Json<Page> {
    let items = indexed(TYPES).map(|(id, name)| named("type", id, name)).collect();
    Json(paginate("type", items, &page))
}

async fn get_type(Path(id_or_name): Path<String>) -> Result<Json<PokemonType>, Rejection> {
    let lookup = parse_lookup(&id_or_name)?;
    let (id, name) = find_by(indexed(TYPES), &lookup, |t| t.0, |t| t.1)?;
    let pokemon = POKEMON
        .iter()
        .filter_map(|p| {
            let slot = p.types.iter().position(|t| *t == name)?;
            Some(TypePokemon {
                pokemon: named("pokemon", p.id, p.name),
                slot: u32::try_from(slot + 1).ok()?,
            })
        })
        .collect();
    Ok(Json(PokemonType {
        id,
        name: name.to_string(),
        pokemon,
    }))
}

async fn list_regions(Query(page): Query<Pagination>) -> Json<Page> {
    let items = indexed(REGIONS)
        .map(|(id, name)| named("region", id, name))
        .collect();
    Json(paginate("region", items, &page))
}

async fn get_region(Path(id_or_name): Path<String>) -> Result<Json<Region>, Rejection> {
    let lookup = parse_lookup(&id_or_name)?;
    let (id, name) = find_by(indexed(REGIONS), &lookup, |r| r.0, |r| r.1)?;
    Ok(Json(Region {
        id,
        name: name.to_string(),
    }))
}

async fn echo(
    method: Method,
    Query(query): Query<BTreeMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                String::from_utf8_lossy(v.as_bytes()).into_owned(),
            )
        })
        .collect();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    Json(Echo {
        method: method.to_string(),
        query,
        headers,
        json,
    })
}
