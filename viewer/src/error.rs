use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Dhm(#[from] dhm::DhmError),

    #[error("{0}")]
    Terrain(#[from] terrain::TerrainError),

    #[error("{0}")]
    Chart(#[from] chart::ChartError),

    #[error("config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("geojson: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("source index {0} out of range")]
    SourceIndex(usize),

    #[error("no line drawn")]
    NoLine,
}
