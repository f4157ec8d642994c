//! One-page monthly PDF report.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::aggregation::MonthlyAverages;
use crate::error::{HealthError, Result};


const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;
const WRAP_COLUMNS: usize = 90;


/// Visual role of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Body,
    Heading,
    Bullet,
    Spacer,
}


impl LineStyle {
    /// Vertical advance after the line, in millimetres.
    fn advance_mm(&self) -> f32 {
        match self {
            LineStyle::Title => 10.0,
            LineStyle::Body | LineStyle::Heading => 8.0,
            LineStyle::Bullet => 6.0,
            LineStyle::Spacer => 5.0,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub style: LineStyle,
    pub text: String,
}


impl ReportLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self { style, text: text.into() }
    }
}


/// Lay out the report content, top to bottom.
pub fn report_lines(year: i32, month: u32, averages: &MonthlyAverages, tips: &[&str]) -> Vec<ReportLine> {
    let mut lines = vec![
        ReportLine::new(LineStyle::Title, format!("Monthly Health Report - {year}-{month:02}")),
        ReportLine::new(LineStyle::Spacer, ""),
        ReportLine::new(LineStyle::Body, format!("Average Sleep: {:.1} hrs", averages.sleep)),
        ReportLine::new(LineStyle::Body, format!("Average Steps: {:.0}", averages.steps)),
        ReportLine::new(LineStyle::Body, format!("Average Water Intake: {:.1} L", averages.water_intake)),
        ReportLine::new(LineStyle::Body, format!("Average BMI: {:.1}", averages.bmi)),
        ReportLine::new(LineStyle::Body, format!("Average Screen Time: {:.1} hrs", averages.screen_time)),
        ReportLine::new(LineStyle::Spacer, ""),
        ReportLine::new(LineStyle::Heading, "Recommendations:"),
    ];

    for tip in tips {
        for (idx, chunk) in wrap_text(tip, WRAP_COLUMNS - 2).into_iter().enumerate() {
            let prefix = if idx == 0 { "- " } else { "  " };
            lines.push(ReportLine::new(LineStyle::Bullet, format!("{prefix}{chunk}")));
        }
    }

    lines
}


/// Write the monthly report, creating the parent directory if needed.
pub fn write_monthly_report(
    output_path: &Path,
    year: i32,
    month: u32,
    averages: &MonthlyAverages,
    tips: &[&str],
) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let title = format!("Monthly Health Report {year}-{month:02}");
    let (doc, page, layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Report",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| HealthError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| HealthError::Pdf(e.to_string()))?;
    let layer = doc.get_page(page).get_layer(layer);

    let mut y = PAGE_HEIGHT_MM - MARGIN_MM - TITLE_SIZE * 0.35;
    for line in report_lines(year, month, averages, tips) {
        match line.style {
            LineStyle::Title => {
                layer.use_text(line.text, TITLE_SIZE, Mm(MARGIN_MM), Mm(y), &bold);
            }
            LineStyle::Heading => {
                layer.use_text(line.text, BODY_SIZE, Mm(MARGIN_MM), Mm(y), &bold);
            }
            LineStyle::Body | LineStyle::Bullet => {
                layer.use_text(line.text, BODY_SIZE, Mm(MARGIN_MM), Mm(y), &regular);
            }
            LineStyle::Spacer => {}
        }
        y -= line.style.advance_mm();
    }

    let file = File::create(output_path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| HealthError::Pdf(e.to_string()))?;

    tracing::info!(path = %output_path.display(), "monthly report saved");
    Ok(())
}


/// Greedy word wrap at `width` characters.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
