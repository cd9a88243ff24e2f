use std::time::Duration;

use abstracts_core::models::{Municipality, Region};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::GeoLookup;

/// HTTP client for the IBGE localities API.
#[derive(Clone, Debug)]
pub struct IbgeClient {
    http_client: Client,
    base_url: String,
}

impl IbgeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create IBGE HTTP client")?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http_client
            .get(&url)
            .query(&[("orderBy", "nome")])
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?
            .error_for_status()
            .with_context(|| format!("Unexpected status from {}", url))?;

        response
            .json::<Vec<T>>()
            .await
            .with_context(|| format!("Failed to decode response from {}", url))
    }
}

#[async_trait]
impl GeoLookup for IbgeClient {
    #[tracing::instrument(skip(self))]
    async fn list_regions(&self) -> Vec<Region> {
        match self.fetch::<Region>("/localidades/estados").await {
            Ok(regions) => regions,
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "Failed to load regions");
                Vec::new()
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list_municipalities(&self, region_id: Option<u32>) -> Vec<Municipality> {
        let region_id = match region_id {
            Some(id) if id != 0 => id,
            _ => return Vec::new(),
        };

        let path = format!("/localidades/estados/{}/municipios", region_id);
        match self.fetch::<Municipality>(&path).await {
            Ok(municipalities) => municipalities,
            Err(e) => {
                tracing::warn!(
                    error = %format!("{:#}", e),
                    region_id,
                    "Failed to load municipalities"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const REGIONS: &str = r#"[
        {"id": 12, "sigla": "AC", "nome": "Acre", "regiao": {"id": 1, "sigla": "N", "nome": "Norte"}},
        {"id": 35, "sigla": "SP", "nome": "São Paulo", "regiao": {"id": 3, "sigla": "SE", "nome": "Sudeste"}}
    ]"#;

    fn client(server: &mockito::Server) -> IbgeClient {
        IbgeClient::new(server.url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_regions_ordered_by_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/localidades/estados")
            .match_query(Matcher::UrlEncoded("orderBy".into(), "nome".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(REGIONS)
            .create_async()
            .await;

        let regions = client(&server).list_regions().await;

        mock.assert_async().await;
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[1].sigla, "SP");
        assert_eq!(regions[1].id, 35);
    }

    #[tokio::test]
    async fn test_list_regions_upstream_error_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/localidades/estados")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        assert!(client(&server).list_regions().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_regions_bad_payload_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/localidades/estados")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        assert!(client(&server).list_regions().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_municipalities() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/localidades/estados/35/municipios")
            .match_query(Matcher::UrlEncoded("orderBy".into(), "nome".into()))
            .with_status(200)
            .with_body(r#"[{"id": 3509502, "nome": "Campinas"}, {"id": 3550308, "nome": "São Paulo"}]"#)
            .create_async()
            .await;

        let municipalities = client(&server).list_municipalities(Some(35)).await;

        mock.assert_async().await;
        assert_eq!(municipalities.len(), 2);
        assert_eq!(municipalities[0].nome, "Campinas");
    }

    #[tokio::test]
    async fn test_absent_region_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client(&server);
        assert!(client.list_municipalities(None).await.is_empty());
        assert!(client.list_municipalities(Some(0)).await.is_empty());

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_empty() {
        let client = IbgeClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        assert!(client.list_regions().await.is_empty());
        assert!(client.list_municipalities(Some(35)).await.is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = IbgeClient::new(
            "https://servicodados.ibge.gov.br/api/v1/",
            Duration::from_secs(30),
        )
        .unwrap();
        assert_eq!(client.base_url(), "https://servicodados.ibge.gov.br/api/v1");
    }
}
