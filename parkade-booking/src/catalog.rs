use parkade_catalog::SpaceInventory;
use parkade_core::StoreError;
use parkade_shared::{ParkingSpace, SpaceType};
use parkade_store::ProfileRepository;
use serde::Serialize;
use tracing::info;

/// Spaces of one type plus how many of them can be booked
#[derive(Debug, Clone, Serialize)]
pub struct SpaceListing {
    pub space_type: SpaceType,
    pub spaces: Vec<ParkingSpace>,
    pub available_count: usize,
}

/// Reads the persisted catalog, falling back to the seed until first written
#[derive(Clone)]
pub struct CatalogService {
    repo: ProfileRepository,
    seed: SpaceInventory,
}

impl CatalogService {
    pub fn new(repo: ProfileRepository, seed: SpaceInventory) -> Self {
        Self { repo, seed }
    }

    pub async fn inventory(&self) -> Result<SpaceInventory, StoreError> {
        Ok(match self.repo.spaces().await? {
            Some(spaces) => SpaceInventory::new(spaces),
            None => self.seed.clone(),
        })
    }

    /// Persist the seed if the catalog key is absent
    pub async fn ensure_seeded(&self) -> Result<bool, StoreError> {
        let _guard = self.repo.lock().await;
        if self.repo.spaces().await?.is_some() {
            return Ok(false);
        }

        let mut uow = self.repo.begin();
        uow.put_spaces(self.seed.spaces())?;
        uow.commit().await?;

        info!("Seeded parking catalog with {} spaces", self.seed.spaces().len());
        Ok(true)
    }

    pub async fn listing(&self, space_type: SpaceType) -> Result<SpaceListing, StoreError> {
        let inventory = self.inventory().await?;
        Ok(SpaceListing {
            space_type,
            spaces: inventory.of_type(space_type).into_iter().cloned().collect(),
            available_count: inventory.available_count(space_type),
        })
    }
}
