//! PDF report rendering for accepted submissions.
//!
//! The layout follows a single downward cursor: a title band, the basic
//! product block, then one card per answered question, breaking to a new
//! page whenever a card would overflow the space above the footer. Every
//! page receives a footer rule with the page index and total count. The
//! whole render is pure computation over the submission; nothing is written
//! until the document is complete.

use std::io::BufWriter;

use chrono::{DateTime, Utc};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerIndex, PdfLayerReference, PdfPageIndex, Point, Rect, Rgb,
};
use thiserror::Error;

use crate::domain::submission::Submission;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
/// Vertical space at the bottom of each page reserved for the footer.
const FOOTER_RESERVE: f32 = 30.0;
const LINE_HEIGHT: f32 = 5.0;

/// Errors raised while producing a report document.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to prepare report fonts: {0}")]
    Font(String),
    #[error("failed to write report document: {0}")]
    Write(String),
}

/// Render one submission into a self-contained PDF.
///
/// Deterministic for identical input and a fixed `generated_at`.
pub fn render(submission: &Submission, generated_at: DateTime<Utc>) -> Result<Vec<u8>, ReportError> {
    let mut layout = ReportLayout::new(&format!(
        "{} - Product Report",
        submission.product_name.as_str()
    ))?;

    layout.title_band(generated_at);
    layout.basic_info(submission);
    layout.separator();
    layout.answer_section(submission);
    layout.footers();

    layout.save()
}

/// Display-format a machine-readable question id: separators become spaces,
/// camelCase boundaries split, and each word gets a capital first letter.
/// Cosmetic only; the underlying id is never altered.
pub fn format_label(id: &str) -> String {
    let mut spaced = String::with_capacity(id.len() + 4);
    let mut prev: Option<char> = None;
    for ch in id.chars() {
        if ch == '_' || ch == '-' {
            spaced.push(' ');
            prev = Some(' ');
            continue;
        }
        if let Some(p) = prev
            && p.is_lowercase()
            && ch.is_uppercase()
        {
            spaced.push(' ');
        }
        spaced.push(ch);
        prev = Some(ch);
    }

    spaced
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Deterministic attachment name: non-alphanumeric characters replaced with
/// underscores, fixed suffix appended.
pub fn report_file_name(product_name: &str) -> String {
    let sanitized: String = product_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{sanitized}_Report.pdf")
}

struct ReportLayout {
    doc: PdfDocumentReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    /// Cursor measured from the top of the current page.
    y: f32,
}

impl ReportLayout {
    fn new(title: &str) -> Result<Self, ReportError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Font(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Font(e.to_string()))?;
        let oblique = doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| ReportError::Font(e.to_string()))?;

        Ok(Self {
            doc,
            regular,
            bold,
            oblique,
            pages: vec![(page, layer)],
            y: MARGIN,
        })
    }

    fn layer(&self) -> PdfLayerReference {
        let (page, layer) = self.pages[self.pages.len() - 1];
        self.doc.get_page(page).get_layer(layer)
    }

    fn layer_at(&self, index: usize) -> PdfLayerReference {
        let (page, layer) = self.pages[index];
        self.doc.get_page(page).get_layer(layer)
    }

    /// Break to a new page when `needed` millimetres would run into the
    /// footer area.
    fn ensure_room(&mut self, needed: f32) {
        if self.y + needed > PAGE_HEIGHT - FOOTER_RESERVE {
            let name = format!("Page {}", self.pages.len() + 1);
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), name);
            self.pages.push((page, layer));
            self.y = MARGIN;
        }
    }

    fn text(&self, text: &str, size: f32, x: f32, y_top: f32, font: &IndirectFontRef, color: Rgb) {
        let layer = self.layer();
        layer.set_fill_color(Color::Rgb(color));
        layer.use_text(text, size, Mm(x), Mm(PAGE_HEIGHT - y_top), font);
    }

    fn filled_rect(&self, layer: &PdfLayerReference, x: f32, y_top: f32, w: f32, h: f32, color: Rgb) {
        layer.set_fill_color(Color::Rgb(color));
        let rect = Rect::new(
            Mm(x),
            Mm(PAGE_HEIGHT - y_top - h),
            Mm(x + w),
            Mm(PAGE_HEIGHT - y_top),
        )
        .with_mode(PaintMode::Fill);
        layer.add_rect(rect);
    }

    fn stroked_rect(&self, layer: &PdfLayerReference, x: f32, y_top: f32, w: f32, h: f32, color: Rgb) {
        layer.set_outline_color(Color::Rgb(color));
        layer.set_outline_thickness(0.4);
        let rect = Rect::new(
            Mm(x),
            Mm(PAGE_HEIGHT - y_top - h),
            Mm(x + w),
            Mm(PAGE_HEIGHT - y_top),
        )
        .with_mode(PaintMode::Stroke);
        layer.add_rect(rect);
    }

    fn rule(&self, layer: &PdfLayerReference, y_top: f32, thickness: f32, color: Rgb) {
        layer.set_outline_color(Color::Rgb(color));
        layer.set_outline_thickness(thickness);
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN), Mm(PAGE_HEIGHT - y_top)), false),
                (
                    Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(PAGE_HEIGHT - y_top)),
                    false,
                ),
            ],
            is_closed: false,
        });
    }

    fn title_band(&mut self, generated_at: DateTime<Utc>) {
        let layer = self.layer();
        self.filled_rect(&layer, 0.0, 0.0, PAGE_WIDTH, 35.0, accent());
        self.text("Product Report", 20.0, MARGIN, 15.0, &self.bold, white());
        self.text(
            &generated_at.format("%B %-d, %Y").to_string(),
            9.0,
            MARGIN,
            22.0,
            &self.regular,
            white(),
        );
        self.y = 50.0;
    }

    fn labelled_value(&mut self, label: &str, value: &str, value_size: f32, gap: f32) {
        self.text(label, 9.0, MARGIN, self.y, &self.bold, gray(0.4));
        self.text(
            value,
            value_size,
            MARGIN,
            self.y + 7.0,
            &self.bold,
            gray(0.0),
        );
        self.y += gap;
    }

    fn basic_info(&mut self, submission: &Submission) {
        self.labelled_value("PRODUCT NAME", submission.product_name.as_str(), 16.0, 18.0);
        self.labelled_value(
            "PRODUCT TYPE",
            &format_label(submission.product_type.as_str()),
            11.0,
            16.0,
        );

        self.text("DESCRIPTION", 9.0, MARGIN, self.y, &self.bold, gray(0.4));
        self.y += 6.0;
        let lines = wrap_text(&submission.description, max_chars(CONTENT_WIDTH, 10.0));
        for line in &lines {
            self.text(line, 10.0, MARGIN, self.y, &self.regular, gray(0.0));
            self.y += LINE_HEIGHT;
        }
        self.y += 10.0;
    }

    fn separator(&mut self) {
        let layer = self.layer();
        self.rule(&layer, self.y, 0.5, gray(0.78));
        self.y += 10.0;
    }

    fn answer_section(&mut self, submission: &Submission) {
        let layer = self.layer();
        self.filled_rect(&layer, MARGIN - 2.0, self.y - 2.0, 3.0, 12.0, accent());
        self.text(
            "Product Review & Details",
            12.0,
            MARGIN + 3.0,
            self.y + 4.0,
            &self.bold,
            accent(),
        );
        self.text(
            "Generated questions and responses based on product information",
            8.0,
            MARGIN + 3.0,
            self.y + 9.0,
            &self.oblique,
            gray(0.47),
        );
        self.y += 18.0;

        if submission.answers.is_empty() {
            self.empty_state();
        } else {
            self.summary_box(submission);
            for (index, card) in plan_cards(&submission.answers).iter().enumerate() {
                self.answer_card(index, card);
            }
            self.end_note(submission.answers.len());
        }
    }

    fn empty_state(&mut self) {
        let layer = self.layer();
        self.filled_rect(&layer, MARGIN, self.y, CONTENT_WIDTH, 20.0, gray(0.98));
        self.text(
            "No questions were answered during the review process.",
            10.0,
            MARGIN + 8.0,
            self.y + 10.0,
            &self.oblique,
            gray(0.59),
        );
        self.text(
            "Complete the multi-step form to generate detailed review questions.",
            8.0,
            MARGIN + 8.0,
            self.y + 15.0,
            &self.oblique,
            gray(0.59),
        );
        self.y += 24.0;
    }

    fn summary_box(&mut self, submission: &Submission) {
        let layer = self.layer();
        self.filled_rect(&layer, MARGIN, self.y, CONTENT_WIDTH, 12.0, gray(0.96));
        self.text(
            &format!("Total Questions: {}", submission.answers.len()),
            9.0,
            MARGIN + 4.0,
            self.y + 5.0,
            &self.bold,
            accent(),
        );
        self.text(
            &format!(
                "Review completed on {}",
                submission.submitted_at.format("%b %-d, %Y")
            ),
            9.0,
            MARGIN + 4.0,
            self.y + 9.0,
            &self.regular,
            gray(0.4),
        );
        self.y += 18.0;
    }

    fn answer_card(&mut self, index: usize, card: &CardPlan) {
        self.ensure_room(card.height);

        let layer = self.layer();
        self.filled_rect(&layer, MARGIN, self.y, CONTENT_WIDTH, card.height, gray(0.988));
        self.stroked_rect(&layer, MARGIN, self.y, CONTENT_WIDTH, card.height, gray(0.86));

        let mut cursor = self.y + 6.0;
        self.text(
            &format!("Q{}:", index + 1),
            8.0,
            MARGIN + 4.0,
            cursor + 2.0,
            &self.bold,
            accent(),
        );
        for line in &card.question_lines {
            self.text(line, 10.0, MARGIN + 14.0, cursor + 2.0, &self.bold, gray(0.12));
            cursor += LINE_HEIGHT;
        }
        cursor = self.y + 6.0 + card.question_height();

        self.text("A:", 8.0, MARGIN + 4.0, cursor, &self.bold, green());
        self.filled_rect(
            &layer,
            MARGIN + 14.0,
            cursor - 3.0,
            CONTENT_WIDTH - 26.0,
            card.answer_box_height(),
            gray(0.975),
        );
        let mut answer_cursor = cursor + 1.0;
        for line in &card.answer_lines {
            self.text(
                line,
                9.0,
                MARGIN + 17.0,
                answer_cursor,
                &self.regular,
                gray(0.2),
            );
            answer_cursor += LINE_HEIGHT;
        }

        self.y += card.height + 7.0;
    }

    fn end_note(&mut self, count: usize) {
        self.ensure_room(10.0);
        let plural = if count == 1 { "" } else { "s" };
        let note = format!("End of review - All {count} question{plural} answered");
        self.text(
            &note,
            8.0,
            centered_x(&note, 8.0),
            self.y + 4.0,
            &self.oblique,
            gray(0.59),
        );
        self.y += 10.0;
    }

    /// Footer on every page, written once the total page count is known.
    fn footers(&self) {
        let total = self.pages.len();
        for index in 0..total {
            let layer = self.layer_at(index);
            let footer_y = PAGE_HEIGHT - 15.0;
            self.rule(&layer, footer_y, 0.3, gray(0.78));

            layer.set_fill_color(Color::Rgb(gray(0.47)));
            let name = "Product Management System";
            layer.use_text(
                name,
                8.0,
                Mm(centered_x(name, 8.0)),
                Mm(PAGE_HEIGHT - footer_y - 5.0),
                &self.regular,
            );

            let page_label = format!("Page {} of {}", index + 1, total);
            let label_width = text_width(&page_label, 8.0);
            layer.use_text(
                &page_label,
                8.0,
                Mm(PAGE_WIDTH - MARGIN - label_width),
                Mm(PAGE_HEIGHT - footer_y - 5.0),
                &self.regular,
            );
        }
    }

    fn save(self) -> Result<Vec<u8>, ReportError> {
        let mut bytes: Vec<u8> = Vec::new();
        {
            let mut writer = BufWriter::new(&mut bytes);
            self.doc
                .save(&mut writer)
                .map_err(|e| ReportError::Write(e.to_string()))?;
        }
        Ok(bytes)
    }
}

/// Measured layout for one question/answer card, computed before any
/// drawing happens so pagination can be decided per card.
#[derive(Debug, Clone, PartialEq)]
struct CardPlan {
    question_lines: Vec<String>,
    answer_lines: Vec<String>,
    height: f32,
}

impl CardPlan {
    fn question_height(&self) -> f32 {
        self.question_lines.len() as f32 * LINE_HEIGHT + 8.0
    }

    fn answer_box_height(&self) -> f32 {
        self.answer_lines.len() as f32 * LINE_HEIGHT + 6.0
    }
}

fn plan_card(id: &str, answer: &str) -> CardPlan {
    let label = format_label(id);
    let question_lines = wrap_text(&label, max_chars(CONTENT_WIDTH - 20.0, 10.0));
    let answer_lines = wrap_text(answer, max_chars(CONTENT_WIDTH - 26.0, 9.0));
    let mut card = CardPlan {
        question_lines,
        answer_lines,
        height: 0.0,
    };
    card.height = card.question_height() + card.answer_box_height() + 10.0;
    card
}

/// One card per recorded answer, in answer-map order.
fn plan_cards(answers: &std::collections::BTreeMap<String, String>) -> Vec<CardPlan> {
    answers
        .iter()
        .map(|(id, answer)| plan_card(id, answer))
        .collect()
}

fn accent() -> Rgb {
    Rgb::new(0.31, 0.275, 0.898, None)
}

fn green() -> Rgb {
    Rgb::new(0.133, 0.773, 0.369, None)
}

fn white() -> Rgb {
    Rgb::new(1.0, 1.0, 1.0, None)
}

fn gray(level: f32) -> Rgb {
    Rgb::new(level, level, level, None)
}

/// Average Helvetica glyph width approximation in millimetres.
fn text_width(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * 0.5 * 0.3528
}

fn centered_x(text: &str, size_pt: f32) -> f32 {
    (PAGE_WIDTH - text_width(text, size_pt)) / 2.0
}

/// Characters that fit a line of the given width at the given font size.
fn max_chars(width_mm: f32, size_pt: f32) -> usize {
    ((width_mm / (size_pt * 0.5 * 0.3528)) as usize).max(1)
}

/// Greedy word wrap; words longer than a whole line are hard-split.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split: String = word.chars().take(max_chars).collect();
            word = &word[split.len()..];
            lines.push(split);
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
