use std::sync::Arc;

use abstracts_core::models::{Municipality, Region};

use super::GeoLookup;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Unknown municipality: {0}")]
    UnknownMunicipality(String),
}

/// Cascading region → municipality selection for one form.
///
/// The municipality list is derived from the selected region: changing the
/// region clears the selected municipality and refetches the list.
pub struct LocationSelection {
    lookup: Arc<dyn GeoLookup>,
    regions: Vec<Region>,
    region: Option<Region>,
    municipalities: Vec<Municipality>,
    municipality: Option<Municipality>,
}

impl LocationSelection {
    pub fn new(lookup: Arc<dyn GeoLookup>) -> Self {
        Self {
            lookup,
            regions: Vec::new(),
            region: None,
            municipalities: Vec::new(),
            municipality: None,
        }
    }

    pub async fn load_regions(&mut self) -> &[Region] {
        self.regions = self.lookup.list_regions().await;
        &self.regions
    }

    /// Select a region by its sigla, or clear the selection with `None`.
    pub async fn select_region(
        &mut self,
        sigla: Option<&str>,
    ) -> Result<&[Municipality], SelectionError> {
        self.municipality = None;
        self.municipalities.clear();

        let sigla = match sigla.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => {
                self.region = None;
                return Ok(&self.municipalities);
            }
        };

        let region = self
            .regions
            .iter()
            .find(|r| r.sigla.eq_ignore_ascii_case(sigla))
            .cloned();

        match region {
            Some(region) => {
                self.municipalities = self.lookup.list_municipalities(Some(region.id)).await;
                self.region = Some(region);
                Ok(&self.municipalities)
            }
            None => {
                self.region = None;
                Err(SelectionError::UnknownRegion(sigla.to_string()))
            }
        }
    }

    /// Select a municipality of the current region by name.
    pub fn select_municipality(&mut self, nome: &str) -> Result<&Municipality, SelectionError> {
        let found = self
            .municipalities
            .iter()
            .find(|m| m.nome == nome.trim())
            .cloned()
            .ok_or_else(|| SelectionError::UnknownMunicipality(nome.to_string()))?;

        Ok(self.municipality.insert(found))
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    pub fn municipalities(&self) -> &[Municipality] {
        &self.municipalities
    }

    pub fn municipality(&self) -> Option<&Municipality> {
        self.municipality.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::IbgeClient;
    use mockito::Matcher;
    use std::time::Duration;

    const REGIONS: &str = r#"[
        {"id": 31, "sigla": "MG", "nome": "Minas Gerais"},
        {"id": 35, "sigla": "SP", "nome": "São Paulo"}
    ]"#;

    async fn selection(server: &mut mockito::Server) -> LocationSelection {
        server
            .mock("GET", "/localidades/estados")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(REGIONS)
            .create_async()
            .await;
        let client = IbgeClient::new(server.url(), Duration::from_secs(5)).unwrap();
        let mut selection = LocationSelection::new(Arc::new(client));
        selection.load_regions().await;
        selection
    }

    #[tokio::test]
    async fn test_changing_region_clears_municipality_and_refetches() {
        let mut server = mockito::Server::new_async().await;
        let mut selection = selection(&mut server).await;

        let sp = server
            .mock("GET", "/localidades/estados/35/municipios")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"id": 3509502, "nome": "Campinas"}]"#)
            .create_async()
            .await;
        let mg = server
            .mock("GET", "/localidades/estados/31/municipios")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"id": 3106200, "nome": "Belo Horizonte"}]"#)
            .create_async()
            .await;

        selection.select_region(Some("SP")).await.unwrap();
        selection.select_municipality("Campinas").unwrap();
        assert_eq!(selection.municipality().unwrap().id, 3509502);

        let municipalities = selection.select_region(Some("MG")).await.unwrap();
        assert_eq!(municipalities[0].nome, "Belo Horizonte");
        assert!(selection.municipality().is_none());
        assert_eq!(selection.region().unwrap().id, 31);

        sp.assert_async().await;
        mg.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_region_means_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mut selection = selection(&mut server).await;
        let municipalities = server
            .mock("GET", Matcher::Regex("municipios".to_string()))
            .expect(0)
            .create_async()
            .await;

        assert!(selection.select_region(None).await.unwrap().is_empty());
        assert!(selection.select_region(Some("  ")).await.unwrap().is_empty());
        assert!(selection.region().is_none());

        municipalities.assert_async().await;
    }

    #[tokio::test]
    async fn test_unknown_region_and_municipality_rejected() {
        let mut server = mockito::Server::new_async().await;
        let mut selection = selection(&mut server).await;

        let err = selection.select_region(Some("XX")).await.unwrap_err();
        assert_eq!(err, SelectionError::UnknownRegion("XX".to_string()));
        assert!(selection.municipalities().is_empty());

        let err = selection.select_municipality("Campinas").unwrap_err();
        assert_eq!(err, SelectionError::UnknownMunicipality("Campinas".to_string()));
    }
}
