//! ASCII plotting for terminal output.
//!
//! Fixed-size grid, deterministic output (helpful for golden tests).
//!
//! Plot elements:
//! - modeled series: `-` line
//! - observed samples: `o`
//! - statistic series: `*` line over a `.` zero reference

use chrono::NaiveDateTime;

use crate::domain::ComparisonResult;

/// Modeled line and observed points over the aligned dates.
pub fn render_comparison_plot(result: &ComparisonResult, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let xs = date_offsets(&result.dates);
    let (x_min, x_max) = x_range(&xs);

    let modeled: Vec<(f64, f64)> = finite_points(&xs, &result.modeled);
    let observed: Vec<(f64, f64)> = finite_points(&xs, &result.observed);

    let (y_min, y_max) = y_range(modeled.iter().chain(observed.iter())).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Line first so the samples overlay it.
    draw_polyline(&mut grid, &modeled, (x_min, x_max), (y_min, y_max), '-');
    for &(x, y) in &observed {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} | dates=[{}, {}] | y=[{y_min:.2}, {y_max:.2}]\n",
        result.parameter_name,
        date_label(&result.dates, 0),
        date_label(&result.dates, result.dates.len().saturating_sub(1)),
    ));
    push_grid(&mut out, grid);
    out.push_str(&format!(
        "- {}  o {}\n",
        result.model_name, result.observed_name
    ));
    out
}

/// A per-date statistic as a `*` line with a `.` zero reference line.
pub fn render_stat_plot(
    label: &str,
    dates: &[NaiveDateTime],
    values: &[f64],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let xs = date_offsets(dates);
    let (x_min, x_max) = x_range(&xs);
    let points = finite_points(&xs, values);

    // Zero always stays in view.
    let origin = (0.0, 0.0);
    let (y_min, y_max) =
        y_range(points.iter().chain(std::iter::once(&origin))).unwrap_or((-1.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    draw_polyline(&mut grid, &points, (x_min, x_max), (y_min, y_max), '*');

    let zero_row = map_y(0.0, y_min, y_max, height);
    for cell in grid[zero_row].iter_mut() {
        if *cell == ' ' {
            *cell = '.';
        }
    }

    let mut out = String::new();
    out.push_str(&format!("Plot: {label} | y=[{y_min:.2}, {y_max:.2}]\n"));
    push_grid(&mut out, grid);
    out
}

fn push_grid(out: &mut String, grid: Vec<Vec<char>>) {
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
}

fn date_label(dates: &[NaiveDateTime], idx: usize) -> String {
    dates
        .get(idx)
        .map_or_else(|| "-".to_string(), |d| d.to_string())
}

/// Seconds since the first date.
fn date_offsets(dates: &[NaiveDateTime]) -> Vec<f64> {
    let Some(&first) = dates.first() else {
        return Vec::new();
    };
    dates
        .iter()
        .map(|&d| (d - first).num_seconds() as f64)
        .collect()
}

fn x_range(xs: &[f64]) -> (f64, f64) {
    let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min.is_finite() && max.is_finite() && max > min {
        (min, max)
    } else {
        (0.0, 1.0)
    }
}

fn finite_points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter()
        .zip(ys)
        .filter(|(_, y)| y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect()
}

fn y_range<'a>(points: impl Iterator<Item = &'a (f64, f64)>) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in points {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // max value on row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(
    grid: &mut [Vec<char>],
    points: &[(f64, f64)],
    (x_min, x_max): (f64, f64),
    (y_min, y_max): (f64, f64),
    ch: char,
) {
    let height = grid.len();
    let Some(width) = grid.first().map(Vec::len) else {
        return;
    };

    let mut prev = None;
    for &(x, y) in points {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
            None => grid[row][col] = ch,
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham). Only blank cells are written.
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
        if let Some(cell) = grid
            .get_mut(y0 as usize)
            .and_then(|row| row.get_mut(x0 as usize))
        {
            if *cell == ' ' {
                *cell = ch;
            }
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
