use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("nothing to plot: {0}")]
    EmptySeries(&'static str),
}

pub type PlotResult<T> = Result<T, PlotError>;

impl PlotError {
    pub(crate) fn draw<E: std::fmt::Display>(err: E) -> Self {
        PlotError::Draw(err.to_string())
    }
}
