use std::collections::HashMap;
use std::path::{Path, PathBuf};

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::error::Error;
use crate::fonts::{FontEntry, FontStyle, register_font, to_winansi_bytes};

use super::image::embed_image;
use super::mapper::{Advance, Cell, Instruction};
use super::style::{CellAlign, DEFAULT_TEXT_COLOR, RunStyle};

const MM_TO_PT: f32 = 72.0 / 25.4;

// A4 portrait, millimetres.
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 10.0;
const CELL_PADDING: f32 = 1.0;
const PAGE_BREAK_MARGIN: f32 = 20.0;
const LINE_WIDTH: f32 = 0.2;

fn bump(next_id: &mut i32) -> Ref {
    let r = Ref::new(*next_id);
    *next_id += 1;
    r
}

/// Cursor-based drawing surface over `pdf-writer`.
///
/// Coordinates are millimetres from the top-left corner of the page. A cell
/// that would cross the bottom break line starts a new page first.
pub struct PdfCanvas {
    pdf: Pdf,
    next_id: i32,
    catalog_id: Ref,
    pages_id: Ref,
    pages: Vec<Content>,
    x: f32,
    y: f32,
    last_h: f32,
    font: (FontStyle, f32),
    color: [u8; 3],
    fonts: Vec<(FontStyle, FontEntry)>,
    /// Path → XObject name; `None` marks a file that could not be embedded.
    images: HashMap<PathBuf, Option<String>>,
    image_xobjects: Vec<(String, Ref)>,
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfCanvas {
    pub fn new() -> Self {
        let mut next_id = 1i32;
        let catalog_id = bump(&mut next_id);
        let pages_id = bump(&mut next_id);
        let default_style = RunStyle::default();
        let mut canvas = Self {
            pdf: Pdf::new(),
            next_id,
            catalog_id,
            pages_id,
            pages: Vec::new(),
            x: MARGIN,
            y: MARGIN,
            last_h: 0.0,
            font: (default_style.font, default_style.size),
            color: DEFAULT_TEXT_COLOR,
            fonts: Vec::new(),
            images: HashMap::new(),
            image_xobjects: Vec::new(),
        };
        canvas.add_page();
        canvas
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Current cursor position in millimetres.
    pub fn cursor(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn add_page(&mut self) {
        self.pages.push(Content::new());
        self.x = MARGIN;
        self.y = MARGIN;
    }

    fn content(&mut self) -> &mut Content {
        if self.pages.is_empty() {
            self.add_page();
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn font_entry(&mut self, style: FontStyle) -> &FontEntry {
        let idx = match self.fonts.iter().position(|(s, _)| *s == style) {
            Some(idx) => idx,
            None => {
                let pdf_name = format!("F{}", self.fonts.len() + 1);
                let next_id = &mut self.next_id;
                let entry = register_font(&mut self.pdf, style, pdf_name, &mut || bump(next_id));
                self.fonts.push((style, entry));
                self.fonts.len() - 1
            }
        };
        &self.fonts[idx].1
    }

    pub fn set_font(&mut self, style: FontStyle, size: f32) {
        self.font = (style, size);
    }

    pub fn set_text_color(&mut self, rgb: [u8; 3]) {
        self.color = rgb;
    }

    pub fn cell(&mut self, cell: &Cell) {
        let k = MM_TO_PT;
        let h = cell.height;
        if self.y + h > PAGE_HEIGHT - PAGE_BREAK_MARGIN && self.y > MARGIN {
            let x = self.x;
            self.add_page();
            self.x = x;
        }

        let w = if cell.width == 0.0 {
            PAGE_WIDTH - MARGIN - self.x
        } else {
            cell.width
        };
        let (x, y) = (self.x, self.y);

        if cell.border {
            let content = self.content();
            content.save_state();
            content.set_line_width(LINE_WIDTH * k);
            content.rect(x * k, (PAGE_HEIGHT - y - h) * k, w * k, h * k);
            content.stroke();
            content.restore_state();
        }

        if !cell.text.is_empty() {
            let (style, size) = self.font;
            let entry = self.font_entry(style);
            let pdf_name = entry.pdf_name.clone();
            let text_w = entry.text_width(&cell.text, size) / k;
            let dx = match cell.align {
                CellAlign::Right => w - CELL_PADDING - text_w,
                CellAlign::Center => (w - text_w) / 2.0,
                CellAlign::Left => CELL_PADDING,
            };
            let baseline = y + 0.5 * h + 0.3 * size / k;
            let [r, g, b] = self.color;
            let bytes = to_winansi_bytes(&cell.text);

            let content = self.content();
            content.begin_text();
            content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
            content.set_font(Name(pdf_name.as_bytes()), size);
            content.next_line((x + dx) * k, (PAGE_HEIGHT - baseline) * k);
            content.show(Str(&bytes));
            content.end_text();
        }

        self.last_h = h;
        match cell.advance {
            Advance::NextLine => {
                self.y += h;
                self.x = MARGIN;
            }
            Advance::Right => self.x += w,
        }
    }

    pub fn line_break(&mut self, height: Option<f32>) {
        self.x = MARGIN;
        self.y += height.unwrap_or(self.last_h);
    }

    /// Place the image file at `path` on the current page. The cursor does not move.
    ///
    /// Files that are not JPEG or PNG are skipped with a warning.
    pub fn image(
        &mut self,
        path: &Path,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), Error> {
        let name = match self.images.get(path).cloned() {
            Some(name) => name,
            None => {
                let data = std::fs::read(path).map_err(|source| Error::AssetExtraction {
                    name: path.display().to_string(),
                    source,
                })?;
                let next_id = &mut self.next_id;
                let name = embed_image(&mut self.pdf, &data, &mut || bump(next_id)).map(|xobj_ref| {
                    let name = format!("Im{}", self.image_xobjects.len() + 1);
                    self.image_xobjects.push((name.clone(), xobj_ref));
                    name
                });
                if name.is_none() {
                    log::warn!("Unsupported image format, skipping: {}", path.display());
                }
                self.images.insert(path.to_path_buf(), name.clone());
                name
            }
        };
        let Some(name) = name else {
            return Ok(());
        };

        let k = MM_TO_PT;
        let content = self.content();
        content.save_state();
        let bottom = (PAGE_HEIGHT - y - height) * k;
        content.transform([width * k, 0.0, 0.0, height * k, x * k, bottom]);
        content.x_object(Name(name.as_bytes()));
        content.restore_state();
        Ok(())
    }

    pub fn execute(&mut self, instructions: &[Instruction]) -> Result<(), Error> {
        for instruction in instructions {
            match instruction {
                Instruction::SetFont { style, size } => self.set_font(*style, *size),
                Instruction::SetTextColor(rgb) => self.set_text_color(*rgb),
                Instruction::Cell(cell) => self.cell(cell),
                Instruction::LineBreak(h) => self.line_break(*h),
                Instruction::Image {
                    path,
                    x,
                    y,
                    width,
                    height,
                } => self.image(path, *x, *y, *width, *height)?,
            }
        }
        Ok(())
    }

    /// Assemble pages and resources into the final PDF bytes.
    pub fn finish(mut self) -> Vec<u8> {
        let n = self.pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| bump(&mut self.next_id)).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| bump(&mut self.next_id)).collect();

        for (i, c) in std::mem::take(&mut self.pages).into_iter().enumerate() {
            let raw = c.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            self.pdf
                .stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);
        }

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        let font_pairs: Vec<(String, Ref)> = self
            .fonts
            .iter()
            .map(|(_, entry)| (entry.pdf_name.clone(), entry.font_ref))
            .collect();

        for i in 0..n {
            let mut page = self.pdf.page(page_ids[i]);
            page.media_box(Rect::new(
                0.0,
                0.0,
                PAGE_WIDTH * MM_TO_PT,
                PAGE_HEIGHT * MM_TO_PT,
            ))
            .parent(self.pages_id)
            .contents(content_ids[i]);
            let mut resources = page.resources();
            if !font_pairs.is_empty() {
                let mut fonts = resources.fonts();
                for (name, font_ref) in &font_pairs {
                    fonts.pair(Name(name.as_bytes()), *font_ref);
                }
            }
            if !self.image_xobjects.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, xobj_ref) in &self.image_xobjects {
                    xobjects.pair(Name(name.as_bytes()), *xobj_ref);
                }
            }
        }

        self.pdf.finish()
    }

    /// Finish and write to `path`, creating or truncating it.
    pub fn save(self, path: &Path) -> Result<usize, Error> {
        let bytes = self.finish();
        std::fs::write(path, &bytes).map_err(|source| Error::RenderWrite {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(bytes.len())
    }
}
