//! SVG line chart of offsets and torque against rail position.

use super::escape_markup;
use crate::domain::AnalysisRecord;
use std::fmt::Write as _;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 210.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;
const TICKS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Cross,
    Square,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: &'static str,
    pub color: &'static str,
    pub marker: Marker,
    pub points: Vec<(f64, f64)>,
}

pub fn chart_series(records: &[AnalysisRecord]) -> [ChartSeries; 3] {
    let collect = |value: fn(&AnalysisRecord) -> f64| {
        records
            .iter()
            .map(|record| (record.position as f64, value(record)))
            .collect::<Vec<_>>()
    };

    [
        ChartSeries {
            label: "Raw offset",
            color: "#1f77b4",
            marker: Marker::Circle,
            points: collect(|record| record.offset as f64),
        },
        ChartSeries {
            label: "Predicted corrected offset",
            color: "#ff7f0e",
            marker: Marker::Cross,
            points: collect(|record| record.predicted_corrected_offset),
        },
        ChartSeries {
            label: "Suggested new torque",
            color: "#2ca02c",
            marker: Marker::Square,
            points: collect(|record| record.suggested_new_torque),
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisRange {
    min: f64,
    max: f64,
}

impl AxisRange {
    fn covering(values: impl Iterator<Item = f64>, pad_fraction: f64) -> Self {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        });
        if !min.is_finite() || !max.is_finite() {
            return Self { min: 0.0, max: 1.0 };
        }
        if max - min <= f64::EPSILON * max.abs().max(1.0) {
            return Self {
                min: min - 1.0,
                max: max + 1.0,
            };
        }
        let pad = (max - min) * pad_fraction;
        Self {
            min: min - pad,
            max: max + pad,
        }
    }

    fn project(&self, value: f64, start: f64, end: f64) -> f64 {
        start + (value - self.min) / (self.max - self.min) * (end - start)
    }

    fn tick(&self, index: usize) -> f64 {
        self.min + (self.max - self.min) * index as f64 / TICKS as f64
    }
}

fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1.0e-9 {
        format!("{:.0}", value.round())
    } else {
        format!("{:.2}", value)
    }
}

fn push_marker(svg: &mut String, marker: Marker, x: f64, y: f64, color: &str) {
    let _ = match marker {
        Marker::Circle => writeln!(
            svg,
            r#"<circle cx="{x:.2}" cy="{y:.2}" r="4" fill="{color}"/>"#
        ),
        Marker::Cross => writeln!(
            svg,
            r#"<path d="M{:.2},{:.2} L{:.2},{:.2} M{:.2},{:.2} L{:.2},{:.2}" stroke="{color}" stroke-width="2"/>"#,
            x - 4.0,
            y - 4.0,
            x + 4.0,
            y + 4.0,
            x - 4.0,
            y + 4.0,
            x + 4.0,
            y - 4.0,
        ),
        Marker::Square => writeln!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="7" height="7" fill="{color}"/>"#,
            x - 3.5,
            y - 3.5,
        ),
    };
}

/// Renders the three series as a standalone SVG document.
///
/// A single point or a flat series gets a padded axis so the chart is never
/// degenerate.
pub fn render_chart(records: &[AnalysisRecord]) -> String {
    let series = chart_series(records);
    let plot_left = MARGIN_LEFT;
    let plot_right = WIDTH - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let plot_bottom = HEIGHT - MARGIN_BOTTOM;

    let x_range = AxisRange::covering(
        records.iter().map(|record| record.position as f64),
        0.02,
    );
    let y_range = AxisRange::covering(
        series
            .iter()
            .flat_map(|entry| entry.points.iter().map(|&(_, y)| y)),
        0.05,
    );

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif" font-size="12">"#
    );
    let _ = writeln!(
        svg,
        r##"<rect x="0" y="0" width="{WIDTH}" height="{HEIGHT}" fill="#ffffff"/>"##
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="24" text-anchor="middle" font-size="15">Offset analysis</text>"#,
        (plot_left + plot_right) / 2.0
    );

    for index in 0..=TICKS {
        let x_value = x_range.tick(index);
        let x = x_range.project(x_value, plot_left, plot_right);
        let y_value = y_range.tick(index);
        let y = y_range.project(y_value, plot_bottom, plot_top);

        let _ = writeln!(
            svg,
            r##"<line x1="{x:.2}" y1="{plot_top:.2}" x2="{x:.2}" y2="{plot_bottom:.2}" stroke="#dddddd"/>"##
        );
        let _ = writeln!(
            svg,
            r#"<text x="{x:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            plot_bottom + 16.0,
            format_tick(x_value)
        );
        let _ = writeln!(
            svg,
            r##"<line x1="{plot_left:.2}" y1="{y:.2}" x2="{plot_right:.2}" y2="{y:.2}" stroke="#dddddd"/>"##
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
            plot_left - 6.0,
            y + 4.0,
            format_tick(y_value)
        );
    }

    let _ = writeln!(
        svg,
        r##"<rect x="{plot_left:.2}" y="{plot_top:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="#333333"/>"##,
        plot_right - plot_left,
        plot_bottom - plot_top
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">Position (mm)</text>"#,
        (plot_left + plot_right) / 2.0,
        HEIGHT - 12.0
    );
    let _ = writeln!(
        svg,
        r#"<text x="18" y="{0:.2}" text-anchor="middle" transform="rotate(-90 18 {0:.2})">Offset / torque (lbs)</text>"#,
        (plot_top + plot_bottom) / 2.0
    );

    for entry in &series {
        let projected = entry
            .points
            .iter()
            .map(|&(x, y)| {
                (
                    x_range.project(x, plot_left, plot_right),
                    y_range.project(y, plot_bottom, plot_top),
                )
            })
            .collect::<Vec<_>>();
        let path = projected
            .iter()
            .map(|(x, y)| format!("{x:.2},{y:.2}"))
            .collect::<Vec<_>>()
            .join(" ");

        let _ = writeln!(
            svg,
            r#"<polyline points="{path}" fill="none" stroke="{}" stroke-width="1.5"/>"#,
            entry.color
        );
        for &(x, y) in &projected {
            push_marker(&mut svg, entry.marker, x, y, entry.color);
        }
    }

    let legend_x = plot_right + 16.0;
    for (index, entry) in series.iter().enumerate() {
        let y = plot_top + 12.0 + index as f64 * 22.0;
        let _ = writeln!(
            svg,
            r#"<line x1="{legend_x:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="{}" stroke-width="1.5"/>"#,
            legend_x + 24.0,
            entry.color
        );
        push_marker(&mut svg, entry.marker, legend_x + 12.0, y, entry.color);
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}">{}</text>"#,
            legend_x + 30.0,
            y + 4.0,
            escape_markup(entry.label)
        );
    }

    svg.push_str("</svg>\n");
    svg
}
