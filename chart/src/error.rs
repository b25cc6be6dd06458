use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("render failed: {0}")]
    Render(String),
}
