//! ASCII rendering for the CLI surface: summary metrics, a line chart,
//! and the pivoted date × city table. Human output goes to stderr;
//! the JSON on stdout is produced elsewhere.

use crate::compare::{Comparison, PivotTable};

const CHART_WIDTH: usize = 52;
const CHART_HEIGHT: usize = 12;

/// Marker glyphs per city, in comparison order. Overlapping points
/// collapse to '◆'.
const MARKERS: [char; 2] = ['●', '○'];
const OVERLAP: char = '◆';

/// Two summary lines, one per city: label, marker, mean, day count.
pub fn render_metrics(cmp: &Comparison) -> String {
    let mut out = String::new();
    let label_width = cmp
        .cities
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(0);

    for (i, city) in cmp.cities.iter().enumerate() {
        let marker = MARKERS.get(i).copied().unwrap_or('?');
        let pad = label_width - city.label.chars().count();
        out.push_str(&format!(
            "  {} {}{}  avg max {:.1} °C over {} days\n",
            marker,
            city.label,
            " ".repeat(pad),
            city.mean_max_temp,
            city.days,
        ));
    }
    out
}

/// Render both series as a fixed-width line chart. The x axis spans
/// the union of dates in the pivot table; the y axis is scaled to the
/// combined min/max of both series.
pub fn render_chart(cmp: &Comparison) -> String {
    let mut out = String::new();

    let dates: Vec<_> = cmp.table.rows.iter().map(|r| r.date).collect();
    if dates.is_empty() {
        out.push_str("  (no data points to chart)\n");
        return out;
    }

    let values: Vec<f64> = cmp
        .cities
        .iter()
        .flat_map(|c| c.series.readings.iter().map(|r| r.max_temp))
        .collect();
    let mut min = values.iter().cloned().fold(f64::MAX, f64::min);
    let mut max = values.iter().cloned().fold(f64::MIN, f64::max);
    if (max - min).abs() < f64::EPSILON {
        // Flat series: open up a degree either side so the line sits
        // mid-chart instead of dividing by zero.
        min -= 1.0;
        max += 1.0;
    }

    let mut grid = vec![vec![' '; CHART_WIDTH]; CHART_HEIGHT];
    for (city_idx, city) in cmp.cities.iter().enumerate() {
        let marker = MARKERS.get(city_idx).copied().unwrap_or('?');
        for reading in &city.series.readings {
            let Some(date_idx) = dates.iter().position(|d| *d == reading.date) else {
                continue;
            };
            let x = if dates.len() > 1 {
                date_idx * (CHART_WIDTH - 1) / (dates.len() - 1)
            } else {
                CHART_WIDTH / 2
            };
            let frac = (max - reading.max_temp) / (max - min);
            let y = (frac * (CHART_HEIGHT - 1) as f64).round() as usize;
            let y = y.min(CHART_HEIGHT - 1);
            let cell = &mut grid[y][x];
            *cell = if *cell == ' ' { marker } else { OVERLAP };
        }
    }

    let inner = CHART_WIDTH + 9; // y-label gutter + axis bar
    out.push_str(&format!("  ╔{}╗\n", "═".repeat(inner)));
    for (row_idx, row) in grid.iter().enumerate() {
        let gutter = if row_idx == 0 {
            format!("{:6.1} ┤", max)
        } else if row_idx == CHART_HEIGHT - 1 {
            format!("{:6.1} ┤", min)
        } else if row_idx == CHART_HEIGHT / 2 {
            format!("{:6.1} ┤", (max + min) / 2.0)
        } else {
            "       │".to_string()
        };
        out.push_str("  ║");
        out.push_str(&gutter);
        out.push_str(&row.iter().collect::<String>());
        out.push_str(" ║\n");
    }
    out.push_str(&format!("  ╚{}╝\n", "═".repeat(inner)));

    // Date axis: first date left, last date right.
    let first = dates.first().map(|d| d.to_string()).unwrap_or_default();
    let last = dates.last().map(|d| d.to_string()).unwrap_or_default();
    if dates.len() > 1 {
        let gap = inner.saturating_sub(first.len() + last.len()).max(1);
        out.push_str(&format!("   {}{}{}\n", first, " ".repeat(gap), last));
    } else {
        out.push_str(&format!("   {}\n", first));
    }

    out
}

/// Render the pivoted table as fixed-width text. Missing cells show
/// as "--", never an error.
pub fn render_table(table: &PivotTable) -> String {
    let mut out = String::new();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .map(|c| c.chars().count().max(6))
        .collect();

    // Header
    out.push_str("  Date      ");
    for (col, w) in table.columns.iter().zip(&widths) {
        let pad = w - col.chars().count();
        out.push_str(&format!(" │ {}{}", col, " ".repeat(pad)));
    }
    out.push('\n');

    // Rule
    out.push_str("  ──────────");
    for w in &widths {
        out.push_str(&format!("─┼─{}", "─".repeat(*w)));
    }
    out.push('\n');

    // Rows
    for row in &table.rows {
        out.push_str(&format!("  {}", row.date));
        for (value, w) in row.values.iter().zip(&widths) {
            let cell = match value {
                Some(v) => format!("{:.1}", v),
                None => "--".to_string(),
            };
            out.push_str(&format!(" │ {:>width$}", cell, width = w));
        }
        out.push('\n');
    }

    out
}
