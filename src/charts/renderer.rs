//! Static Chart Renderer
//! Renders artifacts to PNG images with plotters for export.
//!
//! Layout mirrors the interactive view: caption on top, axis descriptions
//! from the figure, and the heatmap annotated with two-decimal values.

use crate::charts::{Artifact, ChartBody, ChartFigure, ComplexityPlot, ValueAxis};
use crate::color::{annotation_color, diverging, ChartColor};
use crate::stats::{CorrelationMatrix, SummaryTable};
use anyhow::Context;
use image::{ImageBuffer, ImageFormat, Rgb};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

const CAPTION_SIZE: u32 = 26;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Pixel buffer does not match a {0}x{1} image")]
    Buffer(u32, u32),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn rgb(color: ChartColor) -> RGBColor {
    let [r, g, b] = color.components();
    RGBColor(r, g, b)
}

/// Axis ranges must be finite or plotters never finishes laying out the mesh.
fn finite_bounds(bounds: &[f64]) -> Result<(), RenderError> {
    if bounds.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(RenderError::Draw(format!("axis range is not finite: {bounds:?}")))
    }
}

/// Pad a value range so it is never empty, including at large magnitudes.
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    let scale = lo.abs().max(hi.abs());
    let pad = if lo == hi {
        1.0_f64.max(scale * 1e-6)
    } else {
        ((hi - lo) * 0.05).max(scale * 1e-9)
    };
    (lo - pad, hi + pad)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render an artifact to PNG bytes.
    pub fn render_png(artifact: &Artifact, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            match artifact {
                Artifact::Chart(fig) => Self::draw_chart(&root, fig)?,
                Artifact::Correlation(matrix) => Self::draw_correlation(&root, matrix)?,
                Artifact::Summary(table) => Self::draw_summary(&root, table)?,
                Artifact::Complexity(plot) => Self::draw_complexity(&root, plot)?,
            }

            root.present().map_err(draw_err)?;
        }
        Self::encode_png(pixels, width, height)
    }

    /// Render and write a PNG file.
    pub fn save_png(artifact: &Artifact, path: &Path, width: u32, height: u32) -> anyhow::Result<()> {
        let bytes = Self::render_png(artifact, width, height)?;
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {} to {}", artifact.slug(), path.display());
        Ok(())
    }

    fn encode_png(pixels: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_raw(width, height, pixels).ok_or(RenderError::Buffer(width, height))?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn draw_chart(root: &Area, fig: &ChartFigure) -> Result<(), RenderError> {
        let color = rgb(fig.color);

        match &fig.body {
            ChartBody::Histogram(hist) => {
                let x0 = hist.bins.first().map(|b| b.start).unwrap_or(0.0);
                let x1 = hist.bins.last().map(|b| b.end).unwrap_or(1.0);
                let top = hist.max_height();
                let y1 = if top > 0.0 { top * 1.1 } else { 1.0 };
                finite_bounds(&[x0, x1, y1])?;

                let mut chart = ChartBuilder::on(root)
                    .caption(&fig.title, ("sans-serif", CAPTION_SIZE))
                    .margin(20)
                    .x_label_area_size(50)
                    .y_label_area_size(70)
                    .build_cartesian_2d(x0..x1, 0.0..y1)
                    .map_err(draw_err)?;

                chart
                    .configure_mesh()
                    .x_desc(fig.x_label.as_str())
                    .y_desc(fig.y_label.as_str())
                    .draw()
                    .map_err(draw_err)?;

                chart
                    .draw_series(hist.bins.iter().map(|b| {
                        Rectangle::new([(b.start, 0.0), (b.end, b.height)], color.mix(0.7).filled())
                    }))
                    .map_err(draw_err)?;
            }
            ChartBody::Bars(counts) => {
                let n = counts.len().max(1) as u32;
                let y1 = counts.iter().map(|(_, c)| *c).max().unwrap_or(0) as u32 + 1;

                let mut chart = ChartBuilder::on(root)
                    .caption(&fig.title, ("sans-serif", CAPTION_SIZE))
                    .margin(20)
                    .x_label_area_size(50)
                    .y_label_area_size(70)
                    .build_cartesian_2d((0u32..n).into_segmented(), 0u32..y1)
                    .map_err(draw_err)?;

                let x_fmt = |v: &SegmentValue<u32>| match v {
                    SegmentValue::CenterOf(i) => counts
                        .get(*i as usize)
                        .map(|(label, _)| label.clone())
                        .unwrap_or_default(),
                    _ => String::new(),
                };

                chart
                    .configure_mesh()
                    .disable_x_mesh()
                    .x_labels(counts.len().clamp(1, 40))
                    .x_label_formatter(&x_fmt)
                    .x_desc(fig.x_label.as_str())
                    .y_desc(fig.y_label.as_str())
                    .draw()
                    .map_err(draw_err)?;

                chart
                    .draw_series(
                        Histogram::vertical(&chart)
                            .style(color.filled())
                            .margin(8)
                            .data(counts.iter().enumerate().map(|(i, (_, c))| (i as u32, *c as u32))),
                    )
                    .map_err(draw_err)?;
            }
            ChartBody::Line(series) | ChartBody::Scatter(series) => {
                let ([x0, x1], [y0, y1]) = series.bounds().unwrap_or(([0.0, 1.0], [0.0, 1.0]));
                let (x0, x1) = padded(x0, x1);
                let (y0, y1) = padded(y0, y1);
                finite_bounds(&[x0, x1, y0, y1])?;

                let mut chart = ChartBuilder::on(root)
                    .caption(&fig.title, ("sans-serif", CAPTION_SIZE))
                    .margin(20)
                    .x_label_area_size(50)
                    .y_label_area_size(90)
                    .build_cartesian_2d(x0..x1, y0..y1)
                    .map_err(draw_err)?;

                let y_fmt = |v: &f64| series.category_label(*v).unwrap_or_default().to_string();

                {
                    let mut mesh = chart.configure_mesh();
                    mesh.x_desc(fig.x_label.as_str()).y_desc(fig.y_label.as_str());
                    if let ValueAxis::Categories(labels) = &series.axis {
                        mesh.y_labels(labels.len() + 1).y_label_formatter(&y_fmt);
                    }
                    mesh.draw().map_err(draw_err)?;
                }

                let points = series.points.iter().map(|p| (p[0], p[1]));
                if matches!(fig.body, ChartBody::Line(_)) {
                    chart
                        .draw_series(LineSeries::new(points, color.stroke_width(2)))
                        .map_err(draw_err)?;
                } else {
                    chart
                        .draw_series(points.map(|p| Circle::new(p, 4, color.filled())))
                        .map_err(draw_err)?;
                }
            }
        }

        Ok(())
    }

    /// Matrix heatmap with row 0 at the top and values written in each cell.
    fn draw_correlation(root: &Area, matrix: &CorrelationMatrix) -> Result<(), RenderError> {
        let n = matrix.labels.len().max(1) as i32;

        let mut chart = ChartBuilder::on(root)
            .caption("Correlation Matrix", ("sans-serif", CAPTION_SIZE))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(120)
            .build_cartesian_2d(0i32..n, n..0i32)
            .map_err(draw_err)?;

        let (plot_w, plot_h) = chart.plotting_area().dim_in_pixel();
        let cell_w = plot_w as i32 / n;
        let cell_h = plot_h as i32 / n;

        let label_fmt = |v: &i32| {
            usize::try_from(*v)
                .ok()
                .and_then(|i| matrix.labels.get(i))
                .cloned()
                .unwrap_or_default()
        };

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(n as usize + 1)
            .y_labels(n as usize + 1)
            .x_label_offset(cell_w / 2)
            .y_label_offset(cell_h / 2)
            .x_label_formatter(&label_fmt)
            .y_label_formatter(&label_fmt)
            .label_style(("sans-serif", 16))
            .draw()
            .map_err(draw_err)?;

        let cells: Vec<(i32, i32, f64)> = matrix
            .values
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(j, &v)| (i as i32, j as i32, v))
            })
            .collect();

        chart
            .draw_series(cells.iter().map(|&(i, j, v)| {
                Rectangle::new([(j, i), (j + 1, i + 1)], rgb(diverging(v)).filled())
            }))
            .map_err(draw_err)?;

        chart
            .draw_series(cells.iter().map(|&(i, j, v)| {
                let style = ("sans-serif", 18)
                    .into_font()
                    .color(&rgb(annotation_color(v)))
                    .pos(Pos::new(HPos::Center, VPos::Center));
                EmptyElement::at((j, i))
                    + Text::new(
                        CorrelationMatrix::format_value(v),
                        (cell_w / 2, cell_h / 2),
                        style,
                    )
            }))
            .map_err(draw_err)?;

        Ok(())
    }

    fn draw_summary(root: &Area, table: &SummaryTable) -> Result<(), RenderError> {
        let title_style = ("sans-serif", CAPTION_SIZE).into_font().color(&BLACK);
        root.draw(&Text::new("Statistical Summary", (20, 20), title_style))
            .map_err(draw_err)?;

        let text = if table.rows.is_empty() {
            "No numeric columns to summarise.".to_string()
        } else {
            table.to_text()
        };

        let body_style = ("monospace", 16).into_font().color(&BLACK);
        for (i, line) in text.lines().enumerate() {
            root.draw(&Text::new(line, (20, 70 + i as i32 * 22), body_style.clone()))
                .map_err(draw_err)?;
        }

        Ok(())
    }

    fn draw_complexity(root: &Area, plot: &ComplexityPlot) -> Result<(), RenderError> {
        let color = rgb(plot.color);
        let x1 = plot.points.iter().map(|p| p[0]).fold(1.0, f64::max);
        let top = plot.points.iter().map(|p| p[1]).fold(0.0, f64::max);
        let y1 = if top > 0.0 { top * 1.1 } else { 1e-6 };
        finite_bounds(&[x1, y1])?;

        let mut chart = ChartBuilder::on(root)
            .caption(&plot.title, ("sans-serif", CAPTION_SIZE))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(0.0..x1 * 1.05, 0.0..y1)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(plot.x_label.as_str())
            .y_desc(plot.y_label.as_str())
            .draw()
            .map_err(draw_err)?;

        let points = plot.points.iter().map(|p| (p[0], p[1]));
        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(draw_err)?;
        chart
            .draw_series(points.map(|p| Circle::new(p, 5, color.filled())))
            .map_err(draw_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_buffer_encodes_as_png() {
        let bytes = StaticChartRenderer::encode_png(vec![255; 4 * 3 * 3], 4, 3).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let err = StaticChartRenderer::encode_png(vec![0; 5], 4, 3).unwrap_err();
        assert!(matches!(err, RenderError::Buffer(4, 3)));
    }

    fn histogram_figure(values: &[f64]) -> Artifact {
        Artifact::Chart(ChartFigure {
            kind: crate::charts::ChartKind::Histogram,
            column: "id".to_string(),
            title: String::new(),
            x_label: "id".to_string(),
            y_label: "Frequency".to_string(),
            color: ChartColor::rgb(135, 206, 235),
            body: ChartBody::Histogram(crate::stats::histogram(values, 10, true)),
        })
    }

    #[test]
    fn non_finite_histogram_is_rejected_before_drawing() {
        let mut artifact = histogram_figure(&[1.0, 2.0]);
        if let Artifact::Chart(fig) = &mut artifact {
            if let ChartBody::Histogram(h) = &mut fig.body {
                h.bins[0].height = f64::INFINITY;
            }
        }
        let err = StaticChartRenderer::render_png(&artifact, 320, 240).unwrap_err();
        assert!(matches!(err, RenderError::Draw(_)));
    }

    #[test]
    fn huge_constant_histogram_export_returns() {
        let artifact = histogram_figure(&[1e16; 3]);
        // the result depends on system fonts; it only has to come back
        let _ = StaticChartRenderer::render_png(&artifact, 320, 240);
    }

    #[test]
    fn ranges_are_never_empty() {
        assert_eq!(padded(2.0, 2.0), (1.0, 3.0));
        let (lo, hi) = padded(1e16, 1e16);
        assert!(lo < hi);
        let (lo, hi) = padded(0.0, 10.0);
        assert!(lo < 0.0 && hi > 10.0);
    }
}
