use plotters::prelude::*;

use crate::error::AppResult;

/// One bar per load; loads without a successful request have no bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBar {
    pub label: String,
    pub mean_ms: Option<u64>,
}

/// Draws a bar chart of mean latency in milliseconds per load.
///
/// # Errors
///
/// Returns an error when the backend cannot draw or write the image.
pub fn plot_mean_latency(endpoint: &str, bars: &[ChartBar], path: &str) -> AppResult<()> {
    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let slots = u32::try_from(bars.len()).unwrap_or(u32::MAX).max(1);
    let y_top = bars
        .iter()
        .filter_map(|bar| bar.mean_ms)
        .max()
        .unwrap_or(1)
        .max(1);
    let y_max = y_top.saturating_add(y_top.checked_div(10).unwrap_or(0)).saturating_add(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Average Response Time: {}", endpoint),
            ("sans-serif", 30).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..slots).into_segmented(), 0u64..y_max)?;

    let label_for = |value: &SegmentValue<u32>| match value {
        SegmentValue::Exact(index) | SegmentValue::CenterOf(index) => usize::try_from(*index)
            .ok()
            .and_then(|index| bars.get(index))
            .map(|bar| bar.label.clone())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Test Configuration")
        .y_desc("Avg Response Time (ms)")
        .x_labels(bars.len().max(1))
        .x_label_formatter(&label_for)
        .draw()?;

    let data = bars.iter().enumerate().filter_map(|(index, bar)| {
        let slot = u32::try_from(index).ok()?;
        bar.mean_ms.map(|mean| (slot, mean))
    });
    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(0.7).filled())
            .margin(20)
            .data(data),
    )?;

    root.present()?;
    Ok(())
}
