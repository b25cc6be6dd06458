use thiserror::Error;

#[derive(Error, Debug)]
pub enum DhmError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid date {value:?}, expected DD.MM.YYYY")]
    Date { value: String },

    #[error("no raster sources configured")]
    EmptyCatalog,

    #[error("malformed grid: {0}")]
    Grid(String),

    #[error("grid shape mismatch: {0}")]
    GridShape(String),

    #[error("band {band} out of range for a {count}-band grid")]
    Band { band: usize, count: usize },

    #[error("no layer data for source {0}")]
    UnknownSource(String),

    #[error("no resolution levels in {projection} metadata")]
    NoResolutions { projection: String },

    #[error("metadata for source {name:?} unavailable: {reason}")]
    SourceMetadata { name: String, reason: String },
}
