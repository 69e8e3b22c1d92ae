use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlightPathError {
    #[error("failed to build GPX document: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
}
