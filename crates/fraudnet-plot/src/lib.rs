//! PNG chart rendering for evaluation artifacts: confusion-matrix heatmap,
//! ROC curve and per-epoch training history.

pub mod charts;
pub mod error;

pub use charts::{confusion_heatmap, history_chart, roc_chart};
pub use error::{PlotError, PlotResult};
