use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// First-level administrative region (Brazilian state) as returned by IBGE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Region {
    #[schema(example = 35)]
    pub id: u32,
    #[schema(example = "SP")]
    pub sigla: String,
    #[schema(example = "São Paulo")]
    pub nome: String,
}

/// Municipality within a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Municipality {
    #[schema(example = 3550308)]
    pub id: u32,
    #[schema(example = "São Paulo")]
    pub nome: String,
}
