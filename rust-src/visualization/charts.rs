//! Chart export: BMI categories, sleep vs BMI, steps vs calories.
//!
//! Charts are drawn as SVG, rasterised with resvg and written as JPEG.

use std::path::Path;

use anyhow::Context;

use crate::aggregation::category_counts;
use crate::config::ChartPaths;
use crate::error::{HealthError, Result};
use crate::models::{BmiCategory, HealthEntry};


const CHART_BG: &str = "#FFFFFF";
const AXIS_COLOR: &str = "#333333";
const GRID_COLOR: &str = "#E5E5E5";
const TEXT_COLOR: &str = "#222222";
const BAR_COLOR: &str = "#87CEEB";
const SLEEP_POINT_COLOR: &str = "#1F77B4";
const STEPS_POINT_COLOR: &str = "#008000";
const FONT_FAMILY: &str = "DejaVu Sans, Liberation Sans, Arial, Helvetica, sans-serif";

// Canvas in SVG units; output pixels are scaled up for sharp text.
const SCALE_FACTOR: f32 = 3.0;
const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 70.0;
const TARGET_TICKS: f64 = 5.0;
const JPEG_QUALITY: u8 = 90;


/// Inner drawing area of a chart.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}


impl PlotArea {
    fn standard() -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
            height: CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}


/// Value range of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Axis {
    min: f64,
    max: f64,
}


impl Axis {
    /// Padded range covering all values. A single value gets a unit-wide range.
    fn fit(values: impl Iterator<Item = f64>) -> Self {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        if !min.is_finite() || !max.is_finite() {
            return Self { min: 0.0, max: 1.0 };
        }
        if min == max {
            return Self { min: min - 1.0, max: max + 1.0 };
        }

        let pad = (max - min) * 0.05;
        Self { min: min - pad, max: max + pad }
    }

    fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` as a fraction of the axis.
    fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    /// Round-numbered ticks inside the range.
    fn ticks(&self) -> (Vec<f64>, f64) {
        let step = nice_step(self.span() / TARGET_TICKS);
        let mut ticks = Vec::new();
        let mut tick = (self.min / step).ceil() * step;
        while tick <= self.max + step * 1e-9 {
            ticks.push(tick);
            tick += step;
        }
        (ticks, step)
    }
}


/// Render all three charts. An empty entry list is an error.
pub fn render_charts(entries: &[HealthEntry], paths: &ChartPaths) -> Result<()> {
    if entries.is_empty() {
        return Err(HealthError::EmptyDataset);
    }

    let counts = category_counts(entries);
    save_jpeg(&bmi_category_svg(&counts), &paths.bmi_categories)?;

    let sleep_bmi: Vec<(f64, f64)> = entries.iter().map(|e| (e.sleep, e.bmi)).collect();
    let svg = scatter_svg(
        &sleep_bmi,
        "Sleep Hours vs BMI",
        "Sleep Hours",
        "BMI",
        SLEEP_POINT_COLOR,
        0.6,
    );
    save_jpeg(&svg, &paths.sleep_vs_bmi)?;

    let steps_calories: Vec<(f64, f64)> = entries
        .iter()
        .map(|e| (e.steps as f64, e.calories_intake))
        .collect();
    let svg = scatter_svg(
        &steps_calories,
        "Steps vs Calories Intake",
        "Steps",
        "Calories Intake",
        STEPS_POINT_COLOR,
        0.5,
    );
    save_jpeg(&svg, &paths.steps_vs_calories)?;

    Ok(())
}


/// Bar chart of entry counts per BMI category.
fn bmi_category_svg(counts: &[(BmiCategory, usize)]) -> String {
    let area = PlotArea::standard();
    let max_count = counts.iter().map(|(_, n)| *n).max().unwrap_or(1).max(1);
    let y_axis = Axis { min: 0.0, max: max_count as f64 };

    let mut parts = svg_header("BMI Category Distribution");
    parts.extend(y_grid(&area, &y_axis, true));

    let slot = area.width / counts.len().max(1) as f64;
    let bar_width = slot * 0.5;
    for (idx, (category, count)) in counts.iter().enumerate() {
        let bar_height = area.height * y_axis.fraction(*count as f64);
        let x = area.left + slot * idx as f64 + (slot - bar_width) / 2.0;
        let y = area.bottom() - bar_height;

        parts.push(format!(
            r#"<rect x="{x:.2}" y="{y:.2}" width="{bar_width:.2}" height="{bar_height:.2}" fill="{BAR_COLOR}"/>"#
        ));
        parts.push(text(
            x + bar_width / 2.0,
            area.bottom() + 18.0,
            12,
            "middle",
            category.as_str(),
        ));
    }

    parts.extend(axes(&area));
    parts.extend(axis_labels(&area, "BMI Category", "Count"));
    parts.push("</svg>".to_string());
    parts.join("\n")
}


/// Scatter plot of `(x, y)` points.
fn scatter_svg(
    points: &[(f64, f64)],
    title: &str,
    x_label: &str,
    y_label: &str,
    color: &str,
    opacity: f64,
) -> String {
    let area = PlotArea::standard();
    let x_axis = Axis::fit(points.iter().map(|p| p.0));
    let y_axis = Axis::fit(points.iter().map(|p| p.1));

    let mut parts = svg_header(title);
    parts.extend(y_grid(&area, &y_axis, false));
    parts.extend(x_ticks(&area, &x_axis));

    for (x, y) in points {
        let cx = area.left + area.width * x_axis.fraction(*x);
        let cy = area.bottom() - area.height * y_axis.fraction(*y);
        parts.push(format!(
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="5" fill="{color}" fill-opacity="{opacity}"/>"#
        ));
    }

    parts.extend(axes(&area));
    parts.extend(axis_labels(&area, x_label, y_label));
    parts.push("</svg>".to_string());
    parts.join("\n")
}


fn svg_header(title: &str) -> Vec<String> {
    vec![
        format!(
            r#"<svg width="{CHART_WIDTH}" height="{CHART_HEIGHT}" xmlns="http://www.w3.org/2000/svg">"#
        ),
        format!(r#"<rect width="{CHART_WIDTH}" height="{CHART_HEIGHT}" fill="{CHART_BG}"/>"#),
        format!(
            r#"<text x="{:.2}" y="30" font-family="{FONT_FAMILY}" font-size="16" font-weight="bold" fill="{TEXT_COLOR}" text-anchor="middle">{}</text>"#,
            CHART_WIDTH / 2.0,
            escape(title)
        ),
    ]
}


/// Horizontal grid lines with y tick labels.
fn y_grid(area: &PlotArea, axis: &Axis, whole_numbers: bool) -> Vec<String> {
    let (ticks, step) = axis.ticks();
    let step = if whole_numbers { step.max(1.0) } else { step };

    let mut parts = Vec::new();
    for tick in ticks {
        if whole_numbers && tick.fract() != 0.0 {
            continue;
        }
        let y = area.bottom() - area.height * axis.fraction(tick);
        parts.push(format!(
            r#"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="{GRID_COLOR}" stroke-width="1"/>"#,
            area.left,
            area.right()
        ));
        parts.push(text(area.left - 8.0, y + 4.0, 11, "end", &format_tick(tick, step)));
    }
    parts
}


/// Tick labels below the x axis.
fn x_ticks(area: &PlotArea, axis: &Axis) -> Vec<String> {
    let (ticks, step) = axis.ticks();
    ticks
        .into_iter()
        .flat_map(|tick| {
            let x = area.left + area.width * axis.fraction(tick);
            [
                format!(
                    r#"<line x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}" stroke="{AXIS_COLOR}" stroke-width="1"/>"#,
                    area.bottom(),
                    area.bottom() + 5.0
                ),
                text(x, area.bottom() + 18.0, 11, "middle", &format_tick(tick, step)),
            ]
        })
        .collect()
}


fn axes(area: &PlotArea) -> Vec<String> {
    vec![
        format!(
            r#"<line x1="{0:.2}" y1="{1:.2}" x2="{0:.2}" y2="{2:.2}" stroke="{AXIS_COLOR}" stroke-width="1.5"/>"#,
            area.left,
            area.top,
            area.bottom()
        ),
        format!(
            r#"<line x1="{0:.2}" y1="{2:.2}" x2="{1:.2}" y2="{2:.2}" stroke="{AXIS_COLOR}" stroke-width="1.5"/>"#,
            area.left,
            area.right(),
            area.bottom()
        ),
    ]
}


fn axis_labels(area: &PlotArea, x_label: &str, y_label: &str) -> Vec<String> {
    let x_center = area.left + area.width / 2.0;
    let y_center = area.top + area.height / 2.0;
    vec![
        text(x_center, CHART_HEIGHT - 20.0, 13, "middle", x_label),
        format!(
            r#"<text x="22" y="{y_center:.2}" font-family="{FONT_FAMILY}" font-size="13" fill="{TEXT_COLOR}" text-anchor="middle" transform="rotate(-90 22 {y_center:.2})">{}</text>"#,
            escape(y_label)
        ),
    ]
}


fn text(x: f64, y: f64, size: u32, anchor: &str, content: &str) -> String {
    format!(
        r#"<text x="{x:.2}" y="{y:.2}" font-family="{FONT_FAMILY}" font-size="{size}" fill="{TEXT_COLOR}" text-anchor="{anchor}">{}</text>"#,
        escape(content)
    )
}


fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}


/// Step of 1, 2 or 5 times a power of ten closest above `raw`.
fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}


fn format_tick(value: f64, step: f64) -> String {
    // Avoid "-0" from floating point drift around zero.
    let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
    if step >= 1.0 {
        format!("{value:.0}")
    } else if step >= 0.1 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}


/// Rasterise SVG content and save it as a JPEG.
fn save_jpeg(svg_content: &str, output_path: &Path) -> Result<()> {
    rasterise_jpeg(svg_content, output_path)
        .map_err(|e| HealthError::Chart(format!("{e:#}")))?;

    tracing::info!(path = %output_path.display(), "chart saved");
    Ok(())
}


fn rasterise_jpeg(svg_content: &str, output_path: &Path) -> anyhow::Result<()> {
    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = resvg::usvg::Tree::from_str(svg_content, &options)
        .context("Failed to parse SVG")?;

    let size = tree.size();
    let width = (size.width() * SCALE_FACTOR).ceil() as u32;
    let height = (size.height() * SCALE_FACTOR).ceil() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .context("Failed to create pixmap")?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(SCALE_FACTOR, SCALE_FACTOR),
        &mut pixmap.as_mut(),
    );

    // Opaque background, so premultiplied RGBA is plain RGB.
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    let rgb_image = image::RgbImage::from_raw(width, height, rgb)
        .context("Pixel buffer does not match image size")?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let file = std::fs::File::create(output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
        .encode_image(&rgb_image)
        .with_context(|| format!("Failed to encode JPEG to {}", output_path.display()))?;

    Ok(())
}


/// Open file with default application.
pub fn open_file(path: &Path) -> anyhow::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.to_string_lossy()])
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use crate::config::Settings;
    use crate::models::Measurements;

    fn create_test_entry(sleep: f64, steps: u32, weight: f64) -> HealthEntry {
        HealthEntry::record(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Measurements {
                sleep,
                steps,
                water_intake: 2.0,
                weight,
                height: 170.0,
                screen_time: 2.0,
                calories_intake: 1800.0 + steps as f64 / 10.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(1.0), 1.0);
        assert_eq!(nice_step(2.3), 2.0);
        assert_eq!(nice_step(450.0), 500.0);
        assert!((nice_step(0.08) - 0.1).abs() < 1e-12);
        assert_eq!(nice_step(0.0), 1.0);
    }

    #[test]
    fn test_axis_fit_single_value() {
        let axis = Axis::fit([5.0, 5.0].into_iter());
        assert_eq!(axis, Axis { min: 4.0, max: 6.0 });
    }

    #[test]
    fn test_axis_ticks_within_range() {
        let axis = Axis { min: 0.0, max: 10.0 };
        let (ticks, step) = axis.ticks();
        assert_eq!(step, 2.0);
        assert_eq!(ticks, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_bar_chart_lists_present_categories() {
        let svg = bmi_category_svg(&[(BmiCategory::Normal, 3), (BmiCategory::Obese, 1)]);
        assert!(svg.contains("BMI Category Distribution"));
        assert!(svg.contains(">Normal<"));
        assert!(svg.contains(">Obese<"));
        assert!(!svg.contains(">Underweight<"));
        assert_eq!(svg.matches(BAR_COLOR).count(), 2);
    }

    #[test]
    fn test_scatter_has_one_point_per_entry() {
        let points = [(6.0, 22.0), (7.5, 24.1), (8.0, 19.3)];
        let svg = scatter_svg(&points, "Sleep Hours vs BMI", "Sleep Hours", "BMI", SLEEP_POINT_COLOR, 0.6);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("Sleep Hours vs BMI"));
    }

    #[test]
    fn test_render_empty_is_error() {
        let tmp_dir = TempDir::new().unwrap();
        let paths = Settings::in_dir(tmp_dir.path()).chart_paths();
        let err = render_charts(&[], &paths).unwrap_err();
        assert!(matches!(err, HealthError::EmptyDataset));
        assert!(!paths.bmi_categories.exists());
    }

    #[test]
    fn test_render_writes_jpegs() {
        let tmp_dir = TempDir::new().unwrap();
        let paths = Settings::in_dir(tmp_dir.path()).chart_paths();
        let entries = vec![
            create_test_entry(6.0, 4000, 60.0),
            create_test_entry(7.5, 9000, 85.0),
            create_test_entry(8.0, 12000, 95.0),
        ];

        render_charts(&entries, &paths).unwrap();

        for path in paths.all() {
            let bytes = std::fs::read(path).unwrap();
            // JPEG SOI marker
            assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        }
    }
}
