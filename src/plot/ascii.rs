//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - zero line: `.`
//! - spread path: `-` line
//! - observations: `o` (normal), `x` (inverted)

use crate::domain::SpreadSeries;
use crate::report::to_bp;

/// Render the 2s10s spread (bp) against the series index.
pub fn render_spread_plot(series: &SpreadSeries, width: usize, height: usize) -> String {
    let (Some(first), Some(last)) = (series.points.first(), series.points.last()) else {
        return "2s10s spread: no data\n".to_string();
    };

    let width = width.max(10);
    let height = height.max(5);

    let values: Vec<f64> = series.points.iter().map(|p| to_bp(p.spread_2s10s)).collect();
    let (y_min, y_max) = y_range(&values);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);
    let x_max = (values.len() - 1).max(1) as f64;

    let mut grid = vec![vec![' '; width]; height];

    let zero_row = map_y(0.0, y_min, y_max, height);
    for cell in grid[zero_row].iter_mut() {
        *cell = '.';
    }

    let mut prev = None;
    for (i, &v) in values.iter().enumerate() {
        let x = map_x(i as f64, x_max, width);
        let y = map_y(v, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(&mut grid, x0, y0, x, y, '-');
        }
        prev = Some((x, y));
    }

    // Points go last so they overlay the path.
    for (i, &v) in values.iter().enumerate() {
        let x = map_x(i as f64, x_max, width);
        let y = map_y(v, y_min, y_max, height);
        grid[y][x] = if v < 0.0 { 'x' } else { 'o' };
    }

    let mut out = String::new();
    out.push_str(&format!(
        "2s10s spread (bp): {} .. {} | y=[{y_min:.1}, {y_max:.1}]\n",
        first.date, last.date
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

// Always include zero so the inversion line is on the chart.
fn y_range(values: &[f64]) -> (f64, f64) {
    let mut min_y = 0.0f64;
    let mut max_y = 0.0f64;
    for &v in values {
        min_y = min_y.min(v);
        max_y = max_y.max(v);
    }
    if max_y > min_y { (min_y, max_y) } else { (-1.0, 1.0) }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_max: f64, width: usize) -> usize {
    let u = (t / t_max).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
