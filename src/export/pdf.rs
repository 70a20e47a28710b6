//! PDF sink: a titled table split over as many pages as it needs.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::models::{DisplayRow, DisplayTable};

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

const MARGIN: f32 = 40.0;
const ROW_H: f32 = 18.0;
const FONT_SIZE: f32 = 9.0;
const HEADER_FONT_SIZE: f32 = 10.0;
const TITLE_FONT_SIZE: f32 = 14.0;
const CELL_PADDING: f32 = 8.0;
/// Smallest factor fonts are shrunk by to fit a wide table on the page.
const MIN_FONT_SCALE: f32 = 0.6;
/// Space between the top margin and the header row, for the title.
const TITLE_GAP: f32 = 30.0;
/// Tables wider than this many columns are laid out on landscape pages.
const PORTRAIT_MAX_COLUMNS: usize = 7;

/// Renders a display table as a PDF document.
///
/// The title is printed on every page above a shaded header row. Emphasized
/// rows are set in bold. Columns are sized to their longest cell; a table
/// wider than the page is shrunk to fit, and only cells that still do not
/// fit at the smallest font are cut short. Characters outside printable
/// ASCII are printed as `?`.
pub fn pdf_bytes(table: &DisplayTable, title: &str) -> Vec<u8> {
    let mut writer = PdfTableWriter::new(table.width() > PORTRAIT_MAX_COLUMNS);
    let columns = writer.columns(table);
    let header = DisplayRow {
        cells: table.headers.clone(),
        emphasized: true,
    };

    let per_page = writer.rows_per_page();
    let pages: Vec<&[DisplayRow]> = if table.rows.is_empty() {
        vec![&table.rows[..]]
    } else {
        table.rows.chunks(per_page).collect()
    };

    for (index, rows) in pages.iter().enumerate() {
        let mut content = Content::new();
        writer.draw_title(&mut content, title, index + 1, pages.len());

        let mut y = writer.page_h - MARGIN - TITLE_GAP;
        writer.shade_row(&mut content, y, &columns.widths);
        writer.draw_row(&mut content, y, &columns, &header, HEADER_FONT_SIZE);

        for row in rows.iter() {
            y -= ROW_H;
            writer.draw_row(&mut content, y, &columns, row, FONT_SIZE);
        }

        writer.push_page(content);
    }

    writer.finish()
}

/// Column layout of one table, already fitted to the page width.
struct Columns {
    widths: Vec<f32>,
    padding: f32,
    font_scale: f32,
}

struct PdfTableWriter {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    regular_id: Ref,
    bold_id: Ref,
    page_refs: Vec<Ref>,
    next_id: i32,
    page_w: f32,
    page_h: f32,
}

impl PdfTableWriter {
    fn new(landscape: bool) -> Self {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let regular_id = Ref::new(3);
        let bold_id = Ref::new(4);

        pdf.type1_font(regular_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_id).base_font(Name(b"Helvetica-Bold"));

        // A4
        let (page_w, page_h) = if landscape {
            (842.0, 595.0)
        } else {
            (595.0, 842.0)
        };

        Self {
            pdf,
            catalog_id,
            pages_id,
            regular_id,
            bold_id,
            page_refs: Vec::new(),
            next_id: 5,
            page_w,
            page_h,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn rows_per_page(&self) -> usize {
        let body = self.page_h - 2.0 * MARGIN - TITLE_GAP - ROW_H;
        ((body / ROW_H).floor() as usize).max(1)
    }

    fn columns(&self, table: &DisplayTable) -> Columns {
        let mut widths: Vec<f32> = table
            .headers
            .iter()
            .map(|h| text_width(h, HEADER_FONT_SIZE))
            .collect();

        for row in &table.rows {
            for (col, cell) in row.cells.iter().enumerate() {
                if col >= widths.len() {
                    widths.resize(col + 1, 0.0);
                }
                widths[col] = widths[col].max(text_width(cell, FONT_SIZE));
            }
        }

        let total: f32 = widths.iter().sum();
        let available = self.page_w - 2.0 * MARGIN;
        let scale = if total > available {
            available / total
        } else {
            1.0
        };
        for width in &mut widths {
            *width *= scale;
        }

        Columns {
            widths,
            padding: CELL_PADDING * scale,
            font_scale: scale.max(MIN_FONT_SCALE),
        }
    }

    fn draw_text(
        &self,
        content: &mut Content,
        x: f32,
        y: f32,
        font: Name,
        size: f32,
        text: &str,
    ) {
        content.begin_text();
        content.set_font(font, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&printable(text)));
        content.end_text();
    }

    fn draw_title(&self, content: &mut Content, title: &str, page: usize, pages: usize) {
        self.draw_text(
            content,
            MARGIN,
            self.page_h - MARGIN,
            BOLD,
            TITLE_FONT_SIZE,
            title,
        );
        self.draw_text(
            content,
            self.page_w - MARGIN - 60.0,
            MARGIN - 20.0,
            REGULAR,
            FONT_SIZE,
            &format!("Page {} of {}", page, pages),
        );
    }

    fn shade_row(&self, content: &mut Content, y: f32, widths: &[f32]) {
        content.save_state();
        content.set_fill_rgb(0.85, 0.87, 0.90);
        content.rect(MARGIN, y, widths.iter().sum(), ROW_H);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        columns: &Columns,
        row: &DisplayRow,
        size: f32,
    ) {
        let font = if row.emphasized { BOLD } else { REGULAR };
        let size = size * columns.font_scale;
        let mut x = MARGIN;

        for (col, width) in columns.widths.iter().enumerate() {
            let text = row.cells.get(col).map(String::as_str).unwrap_or("");
            if !text.is_empty() {
                let text = fit(text, *width - columns.padding, size);
                let x_text = x + columns.padding / 2.0;
                self.draw_text(content, x_text, y + 5.0, font, size, &text);
            }

            content.save_state();
            content.set_stroke_rgb(0.65, 0.65, 0.65);
            content.rect(x, y, *width, ROW_H);
            content.stroke();
            content.restore_state();

            x += width;
        }
    }

    fn push_page(&mut self, content: Content) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
                .contents(content_id);
            page.resources()
                .fonts()
                .pair(REGULAR, self.regular_id)
                .pair(BOLD, self.bold_id);
        }

        self.pdf.stream(content_id, &content.finish());
    }

    fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        {
            let mut pages = self.pdf.pages(self.pages_id);
            pages.count(self.page_refs.len() as i32);
            pages.kids(self.page_refs.iter().copied());
        }
        self.pdf.finish()
    }
}

/// Approximate Helvetica advance width of a text, plus cell padding.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.55 + CELL_PADDING
}

/// Cuts a text down to what fits the given width, marking the cut with `..`.
fn fit(text: &str, width: f32, size: f32) -> String {
    let max_chars = (width / (size * 0.55) + 0.01).floor().max(0.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(2)).collect();
    format!("{}..", kept)
}

fn printable(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() {
                c as u8
            } else {
                b'?'
            }
        })
        .collect()
}
