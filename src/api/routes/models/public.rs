//! Public types for the model listing API
use serde::Serialize;

#[derive(Serialize)]
pub struct ModelListResponse {
    pub models: Vec<String>,
}
