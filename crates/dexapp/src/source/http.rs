//! HTTP client for the PokeAPI endpoints.

use super::CatalogSource;
use crate::config::DexConfig;
use crate::error::{DexError, Result};
use crate::model::{Ability, CatalogEntry, CreatureDetail, StatValue};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct ListingResponse {
    results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct TypeResponse {
    pokemon: Vec<TypeMember>,
}

#[derive(Debug, Deserialize)]
struct TypeMember {
    pokemon: NamedResource,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    sprites: Sprites,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    stats: Vec<StatSlot>,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Deserialize)]
struct Sprites {
    front_default: Option<String>,
    #[serde(default)]
    other: Option<OtherSprites>,
}

#[derive(Debug, Deserialize)]
struct OtherSprites {
    #[serde(rename = "official-artwork")]
    official_artwork: Option<Artwork>,
}

#[derive(Debug, Deserialize)]
struct Artwork {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    slot: u32,
    #[serde(rename = "type")]
    type_ref: NamedResource,
}

#[derive(Debug, Deserialize)]
struct StatSlot {
    base_stat: u32,
    effort: u32,
    stat: NamedResource,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
    is_hidden: bool,
}

impl From<DetailResponse> for CreatureDetail {
    fn from(raw: DetailResponse) -> Self {
        let artwork_url = raw
            .sprites
            .other
            .and_then(|o| o.official_artwork)
            .and_then(|a| a.front_default)
            .or(raw.sprites.front_default);

        let mut types = raw.types;
        types.sort_by_key(|t| t.slot);

        CreatureDetail {
            id: raw.id,
            name: raw.name,
            height: raw.height,
            weight: raw.weight,
            types: types.into_iter().map(|t| t.type_ref.name).collect(),
            stats: raw
                .stats
                .into_iter()
                .map(|s| StatValue {
                    name: s.stat.name,
                    base_stat: s.base_stat,
                    effort: s.effort,
                })
                .collect(),
            abilities: raw
                .abilities
                .into_iter()
                .map(|a| Ability {
                    name: a.ability.name,
                    is_hidden: a.is_hidden,
                })
                .collect(),
            artwork_url,
        }
    }
}

/// Catalog source backed by the remote REST API.
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    /// Creates a client against `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DexError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &DexConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL extended with `segments`, each percent-encoded as one path
    /// segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let invalid = || DexError::Config(format!("Invalid base URL '{}'", self.base_url));
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        debug!(%url, "fetching {}", what);

        let response = self.client.get(url).send().await.map_err(|e| {
            DexError::SourceUnavailable(format!("Failed to fetch {}: {}", what, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DexError::SourceUnavailable(format!(
                "Failed to fetch {} ({})",
                what, status
            )));
        }

        response.json().await.map_err(|e| {
            DexError::SourceUnavailable(format!("Failed to parse {}: {}", what, e))
        })
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch_listing(&self, limit: usize) -> Result<Vec<CatalogEntry>> {
        let mut url = self.endpoint(&["pokemon"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        let listing: ListingResponse = self.get_json(url, "catalog listing").await?;

        Ok(listing
            .results
            .into_iter()
            .map(|r| CatalogEntry::from_locator(r.name, &r.url))
            .collect())
    }

    async fn fetch_type_members(&self, type_tag: &str) -> Result<Vec<String>> {
        let url = self.endpoint(&["type", type_tag])?;
        let what = format!("members of type '{}'", type_tag);
        let response: TypeResponse = self.get_json(url, &what).await?;

        Ok(response
            .pokemon
            .into_iter()
            .map(|m| m.pokemon.name)
            .collect())
    }

    async fn fetch_detail(&self, id: u32) -> Result<CreatureDetail> {
        let url = self.endpoint(&["pokemon", &id.to_string()])?;
        let what = format!("details for #{}", id);
        let detail: DetailResponse = self.get_json(url, &what).await?;
        Ok(detail.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> HttpSource {
        HttpSource::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_listing_maps_locators_to_ids() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon"))
            .and(query_param("limit", "1302"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [
                    {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                    {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let entries = source_for(&server).fetch_listing(1302).await.unwrap();

        assert_eq!(
            entries,
            vec![
                CatalogEntry::new("bulbasaur", Some(1)),
                CatalogEntry::new("ivysaur", Some(2)),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_listing_non_success_is_source_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_listing(10).await.unwrap_err();
        assert!(matches!(err, DexError::SourceUnavailable(_)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_fetch_listing_bad_body_is_source_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_listing(10).await.unwrap_err();
        assert!(matches!(err, DexError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_fetch_type_members() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/type/fire"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pokemon": [
                    {"pokemon": {"name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon/4/"}, "slot": 1},
                    {"pokemon": {"name": "vulpix", "url": "https://pokeapi.co/api/v2/pokemon/37/"}, "slot": 1}
                ]
            })))
            .mount(&server)
            .await;

        let members = source_for(&server).fetch_type_members("fire").await.unwrap();
        assert_eq!(members, vec!["charmander", "vulpix"]);
    }

    #[tokio::test]
    async fn test_fetch_type_members_unknown_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/type/plasma"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = source_for(&server)
            .fetch_type_members("plasma")
            .await
            .unwrap_err();
        assert!(matches!(err, DexError::SourceUnavailable(_)));
        assert!(err.to_string().contains("plasma"));
    }

    #[tokio::test]
    async fn test_type_tag_stays_inside_type_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(0)
            .mount(&server)
            .await;

        let err = source_for(&server)
            .fetch_type_members("../pokemon")
            .await
            .unwrap_err();
        assert!(matches!(err, DexError::SourceUnavailable(_)));
        assert!(err.to_string().contains("404"));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.path(), "/type/..%2Fpokemon");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let source = HttpSource::new("https://pokeapi.co/api/v2/", Duration::from_secs(1)).unwrap();
        let url = source.endpoint(&["type", "fire"]).unwrap();
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/type/fire");
    }

    #[test]
    fn test_endpoint_rejects_unparseable_base() {
        let source = HttpSource::new("not a url", Duration::from_secs(1)).unwrap();
        let err = source.endpoint(&["pokemon"]).unwrap_err();
        assert!(matches!(err, DexError::Config(_)));
    }

    #[tokio::test]
    async fn test_fetch_detail_prefers_official_artwork() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon/25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 25,
                "name": "pikachu",
                "height": 4,
                "weight": 60,
                "sprites": {
                    "front_default": "https://sprites.test/25.png",
                    "other": {"official-artwork": {"front_default": "https://art.test/25.png"}}
                },
                "types": [
                    {"slot": 1, "type": {"name": "electric", "url": "https://pokeapi.co/api/v2/type/13/"}}
                ],
                "stats": [
                    {"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "https://pokeapi.co/api/v2/stat/1/"}}
                ],
                "abilities": [
                    {"ability": {"name": "static", "url": "https://pokeapi.co/api/v2/ability/9/"}, "is_hidden": false, "slot": 1},
                    {"ability": {"name": "lightning-rod", "url": "https://pokeapi.co/api/v2/ability/31/"}, "is_hidden": true, "slot": 3}
                ]
            })))
            .mount(&server)
            .await;

        let detail = source_for(&server).fetch_detail(25).await.unwrap();

        assert_eq!(detail.name, "pikachu");
        assert_eq!(detail.types, vec!["electric"]);
        assert_eq!(detail.stats[0].name, "hp");
        assert_eq!(detail.stats[0].base_stat, 35);
        assert_eq!(detail.abilities.len(), 2);
        assert!(detail.abilities[1].is_hidden);
        assert_eq!(
            detail.artwork_url.as_deref(),
            Some("https://art.test/25.png")
        );
    }

    #[tokio::test]
    async fn test_fetch_detail_orders_types_by_slot_and_falls_back_to_sprite() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "name": "bulbasaur",
                "height": 7,
                "weight": 69,
                "sprites": {"front_default": "https://sprites.test/1.png", "other": {}},
                "types": [
                    {"slot": 2, "type": {"name": "poison", "url": "x"}},
                    {"slot": 1, "type": {"name": "grass", "url": "y"}}
                ]
            })))
            .mount(&server)
            .await;

        let detail = source_for(&server).fetch_detail(1).await.unwrap();

        assert_eq!(detail.types, vec!["grass", "poison"]);
        assert!(detail.stats.is_empty());
        assert_eq!(
            detail.artwork_url.as_deref(),
            Some("https://sprites.test/1.png")
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let source = HttpSource::new("https://pokeapi.co/api/v2/", Duration::from_secs(1)).unwrap();
        assert_eq!(source.base_url(), "https://pokeapi.co/api/v2");
    }
}
