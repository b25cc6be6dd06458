use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("invalid step size {0}")]
    InvalidStep(f64),

    #[error("line has zero length")]
    DegenerateGeometry,

    #[error("line length {length} is shorter than step size {step}")]
    InsufficientLength { length: f64, step: f64 },
}
