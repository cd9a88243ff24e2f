//! Mock geographic lookup for testing

use crate::geo::GeoLookup;
use abstracts_core::models::{Municipality, Region};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockGeoLookup {
    regions: Arc<Mutex<Vec<Region>>>,
    municipalities: Arc<Mutex<HashMap<u32, Vec<Municipality>>>>,
    municipality_requests: Arc<AtomicUsize>,
}

impl MockGeoLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// São Paulo and Minas Gerais with a couple of municipalities each.
    pub fn with_sample_data() -> Self {
        let lookup = Self::new();
        lookup.add_region(31, "MG", "Minas Gerais");
        lookup.add_region(35, "SP", "São Paulo");
        lookup.add_municipality(31, 3106200, "Belo Horizonte");
        lookup.add_municipality(31, 3170206, "Uberlândia");
        lookup.add_municipality(35, 3509502, "Campinas");
        lookup.add_municipality(35, 3550308, "São Paulo");
        lookup
    }

    pub fn add_region(&self, id: u32, sigla: &str, nome: &str) {
        self.regions.lock().unwrap().push(Region {
            id,
            sigla: sigla.to_string(),
            nome: nome.to_string(),
        });
    }

    pub fn add_municipality(&self, region_id: u32, id: u32, nome: &str) {
        self.municipalities
            .lock()
            .unwrap()
            .entry(region_id)
            .or_default()
            .push(Municipality {
                id,
                nome: nome.to_string(),
            });
    }

    /// Municipality lookups that reached the "upstream".
    pub fn municipality_requests(&self) -> usize {
        self.municipality_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoLookup for MockGeoLookup {
    async fn list_regions(&self) -> Vec<Region> {
        self.regions.lock().unwrap().clone()
    }

    async fn list_municipalities(&self, region_id: Option<u32>) -> Vec<Municipality> {
        let region_id = match region_id {
            Some(id) if id != 0 => id,
            _ => return Vec::new(),
        };
        self.municipality_requests.fetch_add(1, Ordering::SeqCst);
        self.municipalities
            .lock()
            .unwrap()
            .get(&region_id)
            .cloned()
            .unwrap_or_default()
    }
}
