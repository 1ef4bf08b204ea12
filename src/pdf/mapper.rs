use std::path::PathBuf;

use crate::assets::ImageAssets;
use crate::fonts::FontStyle;
use crate::model::{Block, BlockOrder, ContentTree, Drawing, Paragraph, Table};

use super::style::{CellAlign, DEFAULT_TEXT_COLOR, RunStyle};

// Layout units are millimetres.
pub const TEXT_CELL_HEIGHT: f32 = 6.0;
pub const PARAGRAPH_SPACING: f32 = 4.0;
pub const TABLE_FONT_SIZE: f32 = 10.0;
pub const TABLE_CELL_WIDTH: f32 = 40.0;
pub const TABLE_CELL_HEIGHT: f32 = 10.0;
pub const IMAGE_X: f32 = 10.0;
pub const IMAGE_Y: f32 = 10.0;
pub const IMAGE_WIDTH: f32 = 50.0;
pub const IMAGE_HEIGHT: f32 = 50.0;

/// Where the cursor goes after a cell is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Stay on the line, just right of the cell.
    Right,
    /// Start of the next line, one cell height down.
    NextLine,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Zero extends the cell to the right margin.
    pub width: f32,
    pub height: f32,
    pub text: String,
    pub align: CellAlign,
    pub border: bool,
    pub advance: Advance,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    SetFont { style: FontStyle, size: f32 },
    SetTextColor([u8; 3]),
    Cell(Cell),
    /// `None` advances by the height of the last cell placed.
    LineBreak(Option<f32>),
    Image {
        path: PathBuf,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

fn map_paragraph(para: &Paragraph, out: &mut Vec<Instruction>) {
    let align = CellAlign::from(para.alignment);
    for run in &para.runs {
        let style = RunStyle::resolve(run);
        out.push(Instruction::SetFont {
            style: style.font,
            size: style.size,
        });
        out.push(Instruction::SetTextColor(style.color));
        for text in &run.texts {
            out.push(Instruction::Cell(Cell {
                width: 0.0,
                height: TEXT_CELL_HEIGHT,
                text: text.clone(),
                align,
                border: false,
                advance: Advance::NextLine,
            }));
        }
    }
    out.push(Instruction::LineBreak(Some(PARAGRAPH_SPACING)));
}

fn map_table(table: &Table, out: &mut Vec<Instruction>) {
    out.push(Instruction::SetFont {
        style: FontStyle::Regular,
        size: TABLE_FONT_SIZE,
    });
    out.push(Instruction::SetTextColor(DEFAULT_TEXT_COLOR));
    for row in &table.rows {
        for cell in &row.cells {
            out.push(Instruction::Cell(Cell {
                width: TABLE_CELL_WIDTH,
                height: TABLE_CELL_HEIGHT,
                text: cell.text.clone(),
                align: CellAlign::Center,
                border: true,
                advance: Advance::Right,
            }));
        }
        out.push(Instruction::LineBreak(None));
    }
}

fn map_drawing(drawing: &Drawing, assets: &ImageAssets, out: &mut Vec<Instruction>) {
    let Some(path) = assets.lookup_embed(drawing.embed_id()) else {
        log::warn!("No media for drawing {}, skipping", drawing.embed_id());
        return;
    };
    out.push(Instruction::Image {
        path: path.to_path_buf(),
        x: IMAGE_X,
        y: IMAGE_Y,
        width: IMAGE_WIDTH,
        height: IMAGE_HEIGHT,
    });
}

/// Walk the tree and emit canvas instructions.
///
/// Drawings whose identifier has no asset are skipped without affecting
/// anything else in the stream.
pub fn map_document(
    tree: &ContentTree,
    assets: &ImageAssets,
    order: BlockOrder,
) -> Vec<Instruction> {
    let mut out = Vec::new();
    for block in tree.ordered(order) {
        match block {
            Block::Paragraph(p) => map_paragraph(p, &mut out),
            Block::Table(t) => map_table(t, &mut out),
            Block::Drawing(d) => map_drawing(d, assets, &mut out),
        }
    }
    log::debug!("map_document: {} instructions ({order:?} order)", out.len());
    out
}
