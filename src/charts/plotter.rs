//! Chart Plotter Module
//! Draws artifacts as interactive egui_plot widgets.

use crate::charts::{Artifact, ChartBody, ChartFigure, ComplexityPlot, IndexSeries, ValueAxis};
use crate::color::{annotation_color, diverging};
use crate::stats::{CorrelationMatrix, Histogram, SummaryTable};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

const PLOT_HEIGHT: f32 = 480.0;

/// Draws artifacts with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw any artifact. `id` keeps plot state separate per region.
    pub fn draw_artifact(ui: &mut egui::Ui, artifact: &Artifact, id: &str) {
        match artifact {
            Artifact::Chart(fig) => Self::draw_chart(ui, fig, id),
            Artifact::Correlation(matrix) => Self::draw_correlation(ui, matrix, id),
            Artifact::Summary(table) => Self::draw_summary(ui, table),
            Artifact::Complexity(plot) => Self::draw_complexity(ui, plot, id),
        }
    }

    fn draw_title(ui: &mut egui::Ui, title: &str) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(title).size(16.0).strong());
        });
        ui.add_space(4.0);
    }

    /// Draw a column chart with its title and axis labels.
    pub fn draw_chart(ui: &mut egui::Ui, fig: &ChartFigure, id: &str) {
        Self::draw_title(ui, &fig.title);
        let color = fig.color.to_color32();

        let plot = Plot::new(format!("{id}_chart"))
            .height(PLOT_HEIGHT)
            .x_axis_label(fig.x_label.clone())
            .y_axis_label(fig.y_label.clone());

        match &fig.body {
            ChartBody::Histogram(hist) => {
                plot.include_y(0.0)
                    .show(ui, |plot_ui| plot_ui.bar_chart(Self::histogram_bars(hist, color)));
            }
            ChartBody::Bars(counts) => {
                let labels: Vec<String> = counts.iter().map(|(v, _)| v.clone()).collect();
                let bars: Vec<Bar> = counts
                    .iter()
                    .enumerate()
                    .map(|(i, (value, count))| {
                        Bar::new(i as f64, *count as f64)
                            .width(0.8)
                            .fill(color)
                            .name(value)
                    })
                    .collect();

                plot.include_y(0.0)
                    .x_axis_formatter(move |mark, _range| Self::index_label(&labels, mark.value))
                    .show(ui, |plot_ui| {
                        plot_ui.bar_chart(BarChart::new(bars).color(color).name(&fig.column))
                    });
            }
            ChartBody::Line(series) => {
                let plot = match &series.axis {
                    ValueAxis::Categories(labels) => {
                        let labels = labels.clone();
                        plot.y_axis_formatter(move |mark, _range| {
                            Self::index_label(&labels, mark.value)
                        })
                    }
                    ValueAxis::Continuous => plot,
                };
                plot.show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new(Self::plot_points(series))
                            .color(color)
                            .width(2.0)
                            .name(&fig.column),
                    )
                });
            }
            ChartBody::Scatter(series) => {
                let plot = match &series.axis {
                    ValueAxis::Categories(labels) => {
                        let labels = labels.clone();
                        plot.y_axis_formatter(move |mark, _range| {
                            Self::index_label(&labels, mark.value)
                        })
                    }
                    ValueAxis::Continuous => plot,
                };
                plot.show(ui, |plot_ui| {
                    plot_ui.points(
                        Points::new(Self::plot_points(series))
                            .radius(3.0)
                            .color(color)
                            .name(&fig.column),
                    )
                });
            }
        }
    }

    fn histogram_bars(hist: &Histogram, color: Color32) -> BarChart {
        let bars: Vec<Bar> = hist
            .bins
            .iter()
            .map(|bin| {
                Bar::new(bin.center(), bin.height)
                    .width(bin.width())
                    .fill(color.gamma_multiply(0.7))
                    .stroke(egui::Stroke::new(1.0, color))
            })
            .collect();
        BarChart::new(bars).color(color)
    }

    fn plot_points(series: &IndexSeries) -> PlotPoints {
        series.points.iter().copied().collect()
    }

    /// Annotated heatmap. Row 0 is drawn at the top.
    pub fn draw_correlation(ui: &mut egui::Ui, matrix: &CorrelationMatrix, id: &str) {
        Self::draw_title(ui, "Correlation Matrix");

        let n = matrix.labels.len();
        let x_labels = matrix.labels.clone();
        let y_labels = matrix.labels.clone();

        Plot::new(format!("{id}_correlation"))
            .height(PLOT_HEIGHT)
            .data_aspect(1.0)
            .show_grid(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| Self::index_label(&x_labels, mark.value))
            .y_axis_formatter(move |mark, _range| {
                let row = n as f64 - 1.0 - mark.value;
                Self::index_label(&y_labels, row)
            })
            .show(ui, |plot_ui| {
                for (i, row) in matrix.values.iter().enumerate() {
                    for (j, &value) in row.iter().enumerate() {
                        let x = j as f64;
                        let y = (n - 1 - i) as f64;
                        let cell: PlotPoints = vec![
                            [x - 0.5, y - 0.5],
                            [x + 0.5, y - 0.5],
                            [x + 0.5, y + 0.5],
                            [x - 0.5, y + 0.5],
                        ]
                        .into();
                        plot_ui.polygon(
                            Polygon::new(cell)
                                .fill_color(diverging(value).to_color32())
                                .stroke(egui::Stroke::new(0.5, Color32::WHITE)),
                        );
                        plot_ui.text(Text::new(
                            PlotPoint::new(x, y),
                            RichText::new(CorrelationMatrix::format_value(value))
                                .color(annotation_color(value).to_color32())
                                .size(13.0),
                        ));
                    }
                }
            });
    }

    fn index_label(labels: &[String], value: f64) -> String {
        let idx = value.round();
        if (value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }

    /// Plain-text statistics table.
    pub fn draw_summary(ui: &mut egui::Ui, table: &SummaryTable) {
        Self::draw_title(ui, "Statistical Summary");

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::ScrollArea::both().show(ui, |ui| {
                    if table.rows.is_empty() {
                        ui.label("No numeric columns to summarise.");
                    } else {
                        ui.label(RichText::new(table.to_text()).monospace().size(12.0));
                    }
                });
            });
    }

    /// Line with markers for the complexity demos.
    pub fn draw_complexity(ui: &mut egui::Ui, plot: &ComplexityPlot, id: &str) {
        Self::draw_title(ui, &plot.title);
        let color = plot.color.to_color32();

        Plot::new(format!("{id}_complexity"))
            .height(PLOT_HEIGHT)
            .x_axis_label(plot.x_label.clone())
            .y_axis_label(plot.y_label.clone())
            .show(ui, |plot_ui| {
                let points: PlotPoints = plot.points.iter().copied().collect();
                plot_ui.line(Line::new(points).color(color).width(2.0));
                let markers: PlotPoints = plot.points.iter().copied().collect();
                plot_ui.points(Points::new(markers).radius(4.0).color(color));
            });
    }
}
