use plotters::prelude::*;
use tracing::debug;

use crate::trend::{TrendWindow, NOW_INDEX, WINDOW_LEN};
use crate::utils::format_amount;

pub const CHART_WIDTH: u32 = 1024;
pub const CHART_HEIGHT: u32 = 600;

/// Contiguous runs of filled slots as `(slot_index, value)` pairs.
///
/// Each run is drawn as its own line, so a `None` slot always breaks the line.
pub fn line_runs(window: &TrendWindow) -> Vec<Vec<(i32, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(i32, f64)> = Vec::new();

    for (index, value) in window.values().enumerate() {
        match value {
            Some(value) => current.push((index as i32, value)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

/// Y axis range with 10% padding; `0..1` for a window with no values
pub fn y_bounds(window: &TrendWindow) -> (f64, f64) {
    let Some((min, max)) = window.value_range() else {
        return (0.0, 1.0);
    };

    let range = (max - min).max(max.abs() * 0.01).max(1e-8);
    let padding = range * 0.1;
    let y_min = if min >= 0.0 { (min - padding).max(0.0) } else { min - padding };

    (y_min, max + padding)
}

fn slot_label(window: &TrendWindow, index: i32) -> String {
    usize::try_from(index)
        .ok()
        .and_then(|i| window.slots.get(i))
        .map(|slot| slot.label.clone())
        .unwrap_or_default()
}

/// Render a trend window as PNG bytes.
///
/// The "now" slot gets a drop line to the baseline and a large dot. A window
/// with no values still renders (axes only).
pub fn render_trend_chart(window: &TrendWindow, title: &str) -> Result<Vec<u8>, String> {
    let temp_file = std::env::temp_dir().join(format!("mockinvest_chart_{}.png", uuid::Uuid::new_v4()));
    let (y_min, y_max) = y_bounds(window);
    let runs = line_runs(window);
    debug!("Rendering '{}' with {} line run(s)", title, runs.len());

    {
        let backend = BitMapBackend::new(&temp_file, (CHART_WIDTH, CHART_HEIGHT));
        let root = backend.into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| format!("Failed to fill canvas: {}", e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 32.0).into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(80)
            .build_cartesian_2d(0i32..(WINDOW_LEN as i32 - 1), y_min..y_max)
            .map_err(|e| format!("Failed to build chart: {}", e))?;

        chart
            .configure_mesh()
            .x_labels(7)
            .x_label_formatter(&|index| slot_label(window, *index))
            .y_label_formatter(&|value| format_amount(*value))
            .x_desc(format!("{} ~ {}", window.first_label(), window.last_label()))
            .y_desc("Price")
            .draw()
            .map_err(|e| format!("Failed to draw mesh: {}", e))?;

        for run in runs {
            if run.len() == 1 {
                chart
                    .draw_series(std::iter::once(Circle::new(run[0], 3, BLUE.filled())))
                    .map_err(|e| format!("Failed to draw point: {}", e))?;
            } else {
                chart
                    .draw_series(LineSeries::new(run, BLUE.stroke_width(2)))
                    .map_err(|e| format!("Failed to draw line: {}", e))?;
            }
        }

        if let Some(now_value) = window.now_slot().value {
            let now_x = NOW_INDEX as i32;
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(now_x, y_min), (now_x, now_value)],
                    RED.mix(0.5).stroke_width(1),
                )))
                .map_err(|e| format!("Failed to draw now marker: {}", e))?;
            chart
                .draw_series(std::iter::once(Circle::new((now_x, now_value), 6, RED.filled())))
                .map_err(|e| format!("Failed to draw now marker: {}", e))?;
        }

        root.present()
            .map_err(|e| format!("Failed to render chart: {}", e))?;
    }

    take_chart_file(&temp_file)
}

/// Read a rendered chart and delete it, whether or not the read succeeded
fn take_chart_file(path: &std::path::Path) -> Result<Vec<u8>, String> {
    let image_data = std::fs::read(path);
    if let Err(e) = std::fs::remove_file(path) {
        debug!("Could not remove chart file {}: {}", path.display(), e);
    }

    image_data.map_err(|e| format!("Failed to read chart file: {}", e))
}
