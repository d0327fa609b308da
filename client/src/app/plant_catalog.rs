//! Plant catalog
//!
//! The list of plant types offered when composing a post, plus the AI
//! description lookup for a chosen type.

use std::sync::Arc;

use crate::domain::entities::Plant;
use crate::domain::ports::PlantApi;
use crate::error::{AppError, DomainError};

pub struct PlantCatalog<P>
where
    P: PlantApi,
{
    plants_api: Arc<P>,
    plants: Option<Vec<Plant>>,
}

impl<P> PlantCatalog<P>
where
    P: PlantApi,
{
    pub fn new(plants_api: Arc<P>) -> Self {
        Self {
            plants_api,
            plants: None,
        }
    }

    /// The plant list, fetched on first use. A failed fetch yields an empty
    /// list and is retried next time.
    pub async fn plants(&mut self) -> &[Plant] {
        if self.plants.is_none() {
            match self.plants_api.list_plants().await {
                Ok(plants) => {
                    tracing::debug!(count = plants.len(), "Plant catalog loaded");
                    self.plants = Some(plants);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load plants");
                    return &[];
                }
            }
        }
        self.plants.as_deref().unwrap_or_default()
    }

    pub async fn describe(&self, plant_type: &str) -> Result<String, AppError> {
        let plant_type = plant_type.trim();
        if plant_type.is_empty() {
            return Err(DomainError::Validation("Please select a plant first.".to_string()).into());
        }
        let description = self.plants_api.describe_plant(plant_type).await?;
        Ok(description.description)
    }
}
