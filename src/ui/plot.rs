use std::f32::consts::FRAC_PI_4;

use eframe::egui::epaint::TextShape;
use eframe::egui::{self, Align2, FontId, RichText, Sense, Stroke, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoint, PlotPoints, PlotTransform, Text};

use crate::color::{DENSITY_LINE, SKY_BLUE, pastel_palette};
use crate::data::charts::{CategoricalChart, NumericChart};

const CHART_HEIGHT: f32 = 320.0;
const LABEL_FONT_SIZE: f32 = 12.0;
/// Longer category labels are cut with an ellipsis.
const MAX_LABEL_CHARS: usize = 24;

// ---------------------------------------------------------------------------
// Bar chart (categorical columns)
// ---------------------------------------------------------------------------

/// Frequency bar chart: most common value first, each bar labelled with its
/// count, category names rotated under the axis.
pub fn categorical_plot(ui: &mut Ui, idx: usize, chart: &CategoricalChart) {
    chart_title(ui, &format!("Distribution of '{}'", chart.column));

    let palette = pastel_palette(chart.bars.len());
    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, ((label, count), color))| {
            Bar::new(i as f64, *count as f64)
                .name(label)
                .fill(color)
                .width(0.8)
        })
        .collect();

    let n = chart.bars.len().max(1) as f64;
    let response = Plot::new(("categorical_plot", idx))
        .height(CHART_HEIGHT)
        .y_axis_label("Count")
        .x_axis_formatter(|_, _| String::new())
        .include_x(-0.5)
        .include_x(n - 0.5)
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(&chart.column));
            for (i, (_, count)) in chart.bars.iter().enumerate() {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(i as f64, *count as f64),
                        RichText::new(count.to_string()).size(11.0),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });

    rotated_labels(ui, &response.transform, &chart.bars);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(&chart.column);
    });
}

/// Paint category names under the plot, rotated 45° so they end at their bar.
fn rotated_labels(ui: &mut Ui, transform: &PlotTransform, bars: &[(String, usize)]) {
    let font = FontId::proportional(LABEL_FONT_SIZE);
    let color = ui.visuals().text_color();
    let galleys: Vec<_> = bars
        .iter()
        .map(|(label, _)| {
            ui.painter()
                .layout_no_wrap(truncate(label, MAX_LABEL_CHARS), font.clone(), color)
        })
        .collect();

    let (cos, sin) = ((-FRAC_PI_4).cos(), (-FRAC_PI_4).sin());
    let widest = galleys.iter().map(|g| g.size().x).fold(0.0, f32::max);
    let band = widest * cos + LABEL_FONT_SIZE * 2.0;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), band), Sense::hover());

    let painter = ui.painter();
    for (i, galley) in galleys.into_iter().enumerate() {
        let anchor = transform.position_from_point(&PlotPoint::new(i as f64, 0.0));
        let w = galley.size().x;
        let pos = egui::pos2(anchor.x - w * cos, rect.top() + 4.0 - w * sin);
        painter.add(TextShape::new(pos, galley, color).with_angle(-FRAC_PI_4));
    }
}

fn truncate(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let head: String = label.chars().take(max_chars - 1).collect();
        format!("{head}…")
    }
}

// ---------------------------------------------------------------------------
// Histogram (numeric columns)
// ---------------------------------------------------------------------------

/// Count histogram with the smoothed density drawn on top.
pub fn numeric_plot(ui: &mut Ui, idx: usize, chart: &NumericChart) {
    chart_title(ui, &format!("Histogram of '{}'", chart.column));

    if chart.histogram.is_empty() {
        ui.label("No finite values to plot.");
        return;
    }

    let bars: Vec<Bar> = chart
        .histogram
        .bins()
        .map(|(left, right, count)| {
            Bar::new((left + right) / 2.0, count as f64)
                .width(right - left)
                .fill(SKY_BLUE)
                .stroke(Stroke::new(1.0, DENSITY_LINE))
                .name(format!("{left:.3} – {right:.3}"))
        })
        .collect();

    Plot::new(("numeric_plot", idx))
        .height(CHART_HEIGHT)
        .x_axis_label(chart.column.clone())
        .y_axis_label("Frequency")
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("count"));
            if let Some(curve) = &chart.density {
                let points: PlotPoints = curve.iter().copied().collect();
                plot_ui.line(Line::new(points).name("density").color(DENSITY_LINE).width(2.0));
            }
        });
}

fn chart_title(ui: &mut Ui, title: &str) {
    ui.add_space(8.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(title).size(16.0).strong());
    });
}
