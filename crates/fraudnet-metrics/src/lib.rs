pub mod classification;
pub mod report;
pub mod roc;

pub use classification::{
    accuracy, binarize, confusion_matrix, f1_score_class, log_loss, precision_class, recall_class,
};
pub use report::ClassificationReport;
pub use roc::{roc_auc, roc_curve};
