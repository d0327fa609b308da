//! Plant catalog entry

use serde::{Deserialize, Serialize};

/// A plant species users can tag posts with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: i64,
    pub name: String,
    pub scientific_name: String,
    #[serde(default)]
    pub family_common_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// AI-generated description of a plant type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantDescription {
    pub description: String,
}
