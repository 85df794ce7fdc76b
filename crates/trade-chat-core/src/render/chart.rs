//! Chart rendering
//!
//! Points are drawn on a category x-axis: evenly spaced in input order, with
//! their x values used only as labels.

use super::text::format_number;
use crate::api::ChartPoint;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Widget};

const MIN_PLOT_WIDTH: u16 = 20;

/// Plot size in terminal cells for `count` points.
///
/// Grows with the number of points and is capped at 100 x 25 cells.
pub fn plot_size(count: usize) -> (u16, u16) {
    let count = count.min(1_000) as u32;
    let width_px = (200 + count * 30).min(600);
    let height_px = (200 + count * 20).min(500);
    ((width_px / 6) as u16, (height_px / 20) as u16)
}

/// Y-axis bounds with 5% padding; flat series get at least one unit each side
fn y_bounds(points: &[ChartPoint]) -> [f64; 2] {
    let (min, max) = points
        .iter()
        .map(|p| p.y)
        .filter(|y| y.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });

    if !min.is_finite() || !max.is_finite() {
        [0.0, 1.0]
    } else if (max - min).abs() < f64::EPSILON {
        let padding = (max.abs() * 0.05).max(1.0);
        [min - padding, max + padding]
    } else {
        let padding = (max - min) * 0.05;
        [min - padding, max + padding]
    }
}

fn x_labels(points: &[ChartPoint]) -> Vec<Span<'static>> {
    match points {
        [] => Vec::new(),
        [only] => vec![Span::raw(format_number(only.x))],
        [first, .., last] => {
            let middle = points[points.len() / 2];
            vec![
                Span::raw(format_number(first.x)),
                Span::raw(format_number(middle.x)),
                Span::raw(format_number(last.x)),
            ]
        }
    }
}

/// Draw `points` as a line plot no wider than `max_width` cells.
pub fn plot_lines(points: &[ChartPoint], max_width: u16) -> Vec<String> {
    let (width, height) = plot_size(points.len());
    let width = width.min(max_width).max(MIN_PLOT_WIDTH);

    let data: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.y))
        .collect();

    let x_bounds = if points.len() < 2 {
        [-1.0, 1.0]
    } else {
        [0.0, (points.len() - 1) as f64]
    };
    let y_bounds = y_bounds(points);
    let y_mid = f64::midpoint(y_bounds[0], y_bounds[1]);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(Block::bordered())
        .x_axis(
            Axis::default()
                .labels(x_labels(points))
                .labels_alignment(Alignment::Left)
                .bounds(x_bounds),
        )
        .y_axis(
            Axis::default()
                .labels(vec![
                    Span::raw(format_number(y_bounds[0])),
                    Span::raw(format_number(y_mid)),
                    Span::raw(format_number(y_bounds[1])),
                ])
                .bounds(y_bounds),
        );

    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    chart.render(area, &mut buffer);

    buffer
        .content
        .chunks(usize::from(width))
        .map(|row| {
            row.iter()
                .map(ratatui::buffer::Cell::symbol)
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Lay `points` out as an x/y table.
pub fn table_lines(points: &[ChartPoint], max_width: u16) -> Vec<String> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(max_width)
        .set_header(vec!["x", "y"]);

    for point in points {
        table.add_row(vec![format_number(point.x), format_number(point.y)]);
    }

    table.to_string().lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> Vec<ChartPoint> {
        (0..n)
            .map(|i| ChartPoint::new(2010.0 + i as f64, 50.0 + i as f64 * 2.5))
            .collect()
    }

    #[test]
    fn test_plot_size_grows_and_caps() {
        assert_eq!(plot_size(1), (38, 11));
        assert_eq!(plot_size(5), (58, 15));
        assert_eq!(plot_size(16), (100, 25));
        assert_eq!(plot_size(500), (100, 25));
    }

    #[test]
    fn test_y_bounds() {
        let bounds = y_bounds(&[ChartPoint::new(0.0, 10.0), ChartPoint::new(1.0, 20.0)]);
        assert!((bounds[0] - 9.5).abs() < 1e-9);
        assert!((bounds[1] - 20.5).abs() < 1e-9);

        let flat = y_bounds(&[ChartPoint::new(0.0, 5.0), ChartPoint::new(1.0, 5.0)]);
        assert_eq!(flat, [4.0, 6.0]);

        assert_eq!(y_bounds(&[]), [0.0, 1.0]);
    }

    #[test]
    fn test_plot_lines_dimensions_and_labels() {
        let points = series(16);
        let lines = plot_lines(&points, 200);

        assert_eq!(lines.len(), 25);
        assert!(lines.iter().all(|l| l.chars().count() <= 100));

        let joined = lines.join("\n");
        assert!(joined.contains("2010"));
        assert!(joined.contains("2025"));
        assert!(joined.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c)));
    }

    #[test]
    fn test_plot_respects_terminal_width() {
        let lines = plot_lines(&series(16), 60);
        assert!(lines.iter().all(|l| l.chars().count() <= 60));
    }

    #[test]
    fn test_plot_single_point() {
        let lines = plot_lines(&[ChartPoint::new(2024.0, 3.0)], 80);
        assert_eq!(lines.len(), 11);
        assert!(lines.iter().all(|l| l.chars().count() <= 38));
    }

    #[test]
    fn test_table_lines() {
        let lines = table_lines(&series(3), 80);
        let joined = lines.join("\n");
        assert!(joined.contains("2010"));
        assert!(joined.contains("55"));
        assert!(lines.len() >= 5);
    }
}
