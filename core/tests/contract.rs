//! PokéAPI contract suite.
//!
//! # Design
//! Every scenario is a plain function taking a freshly built client, so the
//! same assertions run twice: against the mock server on a random port
//! (deterministic, part of the normal test run) and against the live API
//! (`#[ignore]`d; run with `cargo test -- --ignored`, base URL from
//! `POKEAPI_BASE_URL`).

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use api_client::{ApiClient, ApiError, UreqTransport};
use serde_json::{json, Value};

const LIVE_BASE_URL: &str = "https://pokeapi.co/api/v2";
const LATENCY_BUDGET: Duration = Duration::from_millis(2000);

/// Start the mock server once per test binary and return its API base URL.
fn mock_base_url() -> &'static str {
    static BASE_URL: OnceLock<String> = OnceLock::new();
    BASE_URL.get_or_init(|| {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                pokeapi_mock::run(listener).await
            })
            .unwrap();
        });

        format!("http://{addr}{}", pokeapi_mock::API_PREFIX)
    })
}

fn mock_client() -> ApiClient<UreqTransport> {
    ApiClient::new(mock_base_url())
}

fn live_client() -> ApiClient<UreqTransport> {
    let base_url = std::env::var("POKEAPI_BASE_URL").unwrap_or_else(|_| LIVE_BASE_URL.to_string());
    ApiClient::new(&base_url)
}

fn data(client: &ApiClient, path: &str, params: &[(&str, &str)]) -> Value {
    let response = client.get(path, params).unwrap();
    assert_eq!(response.status, 200, "GET {path}");
    response.data().unwrap()
}

fn expect_status(client: &ApiClient, path: &str, status: u16) {
    match client.get(path, &[]) {
        Ok(response) => panic!("GET {path} should have failed, got {}", response.status),
        Err(err) => assert_eq!(err.status(), Some(status), "GET {path}: {err}"),
    }
}

mod scenarios {
    use super::*;

    pub fn list_pokemon(client: &ApiClient) {
        let body = data(client, "/pokemon?limit=10", &[]);
        let results = body["results"].as_array().unwrap();
        assert!(!results.is_empty());
    }

    pub fn pokemon_by_name(client: &ApiClient) {
        let body = data(client, "/pokemon/pikachu", &[]);
        assert!(body.get("id").is_some());
        assert_eq!(body["name"], "pikachu");
        assert!(body["height"].is_number());
        assert!(body["weight"].is_number());
        assert!(body["abilities"].is_array());
    }

    pub fn pokemon_by_id(client: &ApiClient) {
        let body = data(client, "/pokemon/25", &[]);
        assert_eq!(body["id"], 25);
        assert!(body["name"].is_string());
        assert!(body["abilities"].is_array());
    }

    pub fn list_types(client: &ApiClient) {
        let body = data(client, "/type", &[]);
        assert!(body["results"].is_array());
    }

    pub fn pokemon_by_type(client: &ApiClient) {
        let body = data(client, "/type/electric", &[]);
        assert_eq!(body["name"], "electric");
        let pokemon = body["pokemon"].as_array().unwrap();
        assert!(pokemon.iter().any(|p| p["pokemon"]["name"] == "pikachu"));
    }

    pub fn list_regions(client: &ApiClient) {
        let body = data(client, "/region", &[]);
        let names: Vec<_> = body["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].clone())
            .collect();
        assert!(names.contains(&json!("kanto")));
    }

    pub fn full_pokemon_structure(client: &ApiClient) {
        let pokemon = data(client, "/pokemon/charizard", &[]);
        assert!(pokemon.get("id").is_some());
        assert_eq!(pokemon["name"], "charizard");
        assert!(pokemon.get("height").is_some());
        assert!(pokemon.get("weight").is_some());
        assert!(!pokemon["types"].as_array().unwrap().is_empty());
        assert!(!pokemon["abilities"].as_array().unwrap().is_empty());
    }

    pub fn pokemon_field_types(client: &ApiClient) {
        let pokemon = data(client, "/pokemon/bulbasaur", &[]);
        assert!(pokemon["id"].is_u64());
        assert!(pokemon["name"].is_string());
        assert!(pokemon["height"].is_u64());
        assert!(pokemon["weight"].is_u64());
        assert!(pokemon["types"].is_array());
    }

    pub fn unknown_pokemon_is_404(client: &ApiClient) {
        expect_status(client, "/pokemon/invalidname999", 404);
    }

    pub fn invalid_characters_are_400(client: &ApiClient) {
        expect_status(client, "/pokemon/@@@", 400);
    }

    pub fn negative_id_is_404(client: &ApiClient) {
        expect_status(client, "/pokemon/-1", 404);
    }

    pub fn pagination_returns_requested_count(client: &ApiClient) {
        let limit = 7;
        let limit_param = limit.to_string();
        let body = data(client, "/pokemon", &[("limit", limit_param.as_str())]);
        assert_eq!(body["results"].as_array().unwrap().len(), limit);
    }

    pub fn pagination_offset_moves_window(client: &ApiClient) {
        let first = data(client, "/pokemon", &[("limit", "5"), ("offset", "0")]);
        let second = data(client, "/pokemon", &[("limit", "5"), ("offset", "5")]);
        assert_ne!(first["results"][0]["name"], second["results"][0]["name"]);
    }

    pub fn listed_pokemon_resolves_by_name(client: &ApiClient) {
        let listing = data(client, "/pokemon", &[("limit", "1")]);
        let name = listing["results"][0]["name"].as_str().unwrap().to_string();

        let detail = data(client, &format!("/pokemon/{name}"), &[]);
        assert_eq!(detail["name"], name.as_str());
    }

    pub fn response_time_is_acceptable(client: &ApiClient) {
        let start = Instant::now();
        let response = client.get("/pokemon/pikachu", &[]).unwrap();
        let elapsed = start.elapsed();

        assert_eq!(response.status, 200);
        assert!(elapsed < LATENCY_BUDGET, "took {elapsed:?}");
    }
}

macro_rules! contract_tests {
    ($($name:ident),* $(,)?) => {
        mod against_mock {
            $(
                #[test]
                fn $name() {
                    super::scenarios::$name(&super::mock_client());
                }
            )*
        }

        mod against_live_api {
            $(
                #[test]
                #[ignore = "requires network access to PokéAPI"]
                fn $name() {
                    super::scenarios::$name(&super::live_client());
                }
            )*
        }
    };
}

contract_tests!(
    list_pokemon,
    pokemon_by_name,
    pokemon_by_id,
    list_types,
    pokemon_by_type,
    list_regions,
    full_pokemon_structure,
    pokemon_field_types,
    unknown_pokemon_is_404,
    invalid_characters_are_400,
    negative_id_is_404,
    pagination_returns_requested_count,
    pagination_offset_moves_window,
    listed_pokemon_resolves_by_name,
    response_time_is_acceptable,
);

// --- client behaviour over real HTTP (mock only) ---

#[test]
fn auth_token_reaches_the_server_on_every_verb() {
    let mut client = mock_client();
    client.set_auth_token("t0ken");

    let responses = [
        client.get("/echo", &[("q", "1")]).unwrap(),
        client.post("/echo", Some(&json!({"verb": "post"}))).unwrap(),
        client.put("/echo", Some(&json!({"verb": "put"}))).unwrap(),
        client.patch("/echo", Some(&json!({"verb": "patch"}))).unwrap(),
        client.delete("/echo").unwrap(),
    ];

    let methods: Vec<_> = responses
        .iter()
        .map(|r| {
            let echo: pokeapi_mock::Echo = r.json().unwrap();
            assert_eq!(echo.headers["authorization"], "Bearer t0ken", "{}", echo.method);
            assert_eq!(echo.headers["content-type"], "application/json");
            if echo.method != "GET" && echo.method != "DELETE" {
                assert_eq!(echo.json["verb"], echo.method.to_lowercase());
            }
            echo.method
        })
        .collect();
    assert_eq!(methods, ["GET", "POST", "PUT", "PATCH", "DELETE"]);
}

#[test]
fn query_params_are_encoded_by_the_transport() {
    let client = mock_client();
    let response = client
        .get("/echo", &[("name", "mr mime"), ("tag", "a&b")])
        .unwrap();
    let echo: pokeapi_mock::Echo = response.json().unwrap();
    assert_eq!(echo.query["name"], "mr mime");
    assert_eq!(echo.query["tag"], "a&b");
}

#[test]
fn fresh_client_sends_no_authorization() {
    let response = mock_client().get("/echo", &[]).unwrap();
    let echo: pokeapi_mock::Echo = response.json().unwrap();
    assert!(!echo.headers.contains_key("authorization"));
}

#[test]
fn error_carries_plain_text_body() {
    let err = mock_client().get("/pokemon/invalidname999", &[]).unwrap_err();
    let response = err.response().unwrap();
    assert_eq!(response.body, "Not Found");
    assert!(matches!(response.data(), Err(ApiError::DeserializationError(_))));
}

#[test]
fn unreachable_host_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = ApiClient::new(&format!("http://{addr}")).get("/pokemon", &[]).unwrap_err();
    assert!(matches!(err, ApiError::TransportError(_)), "{err}");
    assert!(err.response().is_none());
}
