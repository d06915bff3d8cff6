use axum::Json;

use crate::personas::{PersonaSummary, catalog};

// Static catalog, ids and display names only
pub async fn personas_handler() -> Json<Vec<PersonaSummary>> {
    Json(catalog())
}
