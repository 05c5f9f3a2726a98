use crate::error::{PlotError, PlotResult};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const CHART_SIZE: (u32, u32) = (800, 600);
const HISTORY_SIZE: (u32, u32) = (1200, 500);

// ─── Confusion Matrix Heatmap ───────────────────────────────────────────────

/// Render a confusion matrix as a heatmap. `cm[i][j]` counts actual class `i`
/// predicted as class `j`; `labels[i]` names class `i`.
pub fn confusion_heatmap(cm: &[Vec<usize>], labels: &[&str], path: &Path) -> PlotResult<()> {
    if cm.is_empty() || labels.len() != cm.len() {
        return Err(PlotError::EmptySeries("confusion matrix"));
    }
    let n = cm.len() as f64;
    let max = cm
        .iter()
        .flat_map(|row| row.iter())
        .copied()
        .max()
        .unwrap_or(1)
        .max(1) as f64;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(PlotError::draw)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Confusion Matrix", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0f64..n, 0f64..n)
        .map_err(PlotError::draw)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Predicted")
        .y_desc("Actual")
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|_| String::new())
        .draw()
        .map_err(PlotError::draw)?;

    for (i, row) in cm.iter().enumerate() {
        for (j, &count) in row.iter().enumerate() {
            let x0 = j as f64;
            // Row 0 on top.
            let y0 = n - 1.0 - i as f64;
            let t = count as f64 / max;
            let fill = RGBColor(
                (255.0 - 190.0 * t) as u8,
                (255.0 - 140.0 * t) as u8,
                255,
            );
            let text_color = if t > 0.5 { &WHITE } else { &BLACK };
            let centered = Pos::new(HPos::Center, VPos::Center);

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x0, y0), (x0 + 1.0, y0 + 1.0)],
                    fill.filled(),
                )))
                .map_err(PlotError::draw)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    format!("{} / {}", labels[i], labels[j]),
                    (x0 + 0.5, y0 + 0.7),
                    ("sans-serif", 16).into_font().color(text_color).pos(centered),
                )))
                .map_err(PlotError::draw)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    count.to_string(),
                    (x0 + 0.5, y0 + 0.45),
                    ("sans-serif", 26).into_font().color(text_color).pos(centered),
                )))
                .map_err(PlotError::draw)?;
        }
    }

    root.present().map_err(PlotError::draw)
}

// ─── ROC Curve ──────────────────────────────────────────────────────────────

/// Render the ROC curve with its AUC in the legend, plus the chance diagonal.
pub fn roc_chart(fpr: &[f64], tpr: &[f64], auc: f64, path: &Path) -> PlotResult<()> {
    if fpr.is_empty() || fpr.len() != tpr.len() {
        return Err(PlotError::EmptySeries("roc curve"));
    }

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(PlotError::draw)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("ROC Curve", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..1f64, 0f64..1.02f64)
        .map_err(PlotError::draw)?;

    chart
        .configure_mesh()
        .x_desc("False Positive Rate")
        .y_desc("True Positive Rate")
        .draw()
        .map_err(PlotError::draw)?;

    chart
        .draw_series(LineSeries::new(
            fpr.iter().copied().zip(tpr.iter().copied()),
            BLUE.stroke_width(2),
        ))
        .map_err(PlotError::draw)?
        .label(format!("AUC = {:.4}", auc))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    chart
        .draw_series(DashedLineSeries::new(
            [(0.0, 0.0), (1.0, 1.0)],
            6,
            4,
            RED.mix(0.6).stroke_width(1),
        ))
        .map_err(PlotError::draw)?
        .label("chance")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.mix(0.6)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(PlotError::draw)?;

    root.present().map_err(PlotError::draw)
}

// ─── Training History ───────────────────────────────────────────────────────

/// Render accuracy and loss curves side by side, one point per epoch.
/// Validation series may be empty when no holdout was used.
pub fn history_chart(
    loss: &[f64],
    val_loss: &[f64],
    accuracy: &[f64],
    val_accuracy: &[f64],
    path: &Path,
) -> PlotResult<()> {
    if loss.is_empty() || accuracy.is_empty() {
        return Err(PlotError::EmptySeries("training history"));
    }

    let root = BitMapBackend::new(path, HISTORY_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(PlotError::draw)?;
    let panels = root.split_evenly((1, 2));

    let epochs = loss.len() as f64;
    draw_panel(
        &panels[0],
        "Model Accuracy",
        "Accuracy",
        epochs,
        0.0..1.05,
        accuracy,
        val_accuracy,
    )?;

    let loss_max = loss
        .iter()
        .chain(val_loss.iter())
        .cloned()
        .fold(f64::MIN, f64::max);
    draw_panel(
        &panels[1],
        "Model Loss",
        "Loss",
        epochs,
        0.0..loss_max * 1.05,
        loss,
        val_loss,
    )?;

    root.present().map_err(PlotError::draw)
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    title: &str,
    y_desc: &str,
    epochs: f64,
    y_range: std::ops::Range<f64>,
    train: &[f64],
    validation: &[f64],
) -> PlotResult<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(1f64..epochs.max(2.0), y_range)
        .map_err(PlotError::draw)?;

    chart
        .configure_mesh()
        .x_desc("Epoch")
        .y_desc(y_desc)
        .draw()
        .map_err(PlotError::draw)?;

    chart
        .draw_series(LineSeries::new(
            train
                .iter()
                .enumerate()
                .map(|(i, &v)| ((i + 1) as f64, v)),
            BLUE.stroke_width(2),
        ))
        .map_err(PlotError::draw)?
        .label("train")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    if !validation.is_empty() {
        chart
            .draw_series(LineSeries::new(
                validation
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| ((i + 1) as f64, v)),
                RED.stroke_width(2),
            ))
            .map_err(PlotError::draw)?
            .label("validation")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(PlotError::draw)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_empty_confusion_matrix_rejected() {
        let path = PathBuf::from("unused.png");
        let err = confusion_heatmap(&[], &[], &path).unwrap_err();
        assert!(matches!(err, PlotError::EmptySeries(_)));
    }

    #[test]
    fn test_mismatched_roc_series_rejected() {
        let path = PathBuf::from("unused.png");
        let err = roc_chart(&[0.0, 1.0], &[0.0], 0.5, &path).unwrap_err();
        assert!(matches!(err, PlotError::EmptySeries(_)));
    }

    #[test]
    fn test_empty_history_rejected() {
        let path = PathBuf::from("unused.png");
        let err = history_chart(&[], &[], &[], &[], &path).unwrap_err();
        assert!(matches!(err, PlotError::EmptySeries(_)));
    }
}
