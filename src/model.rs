#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Cross-category ordering used when walking a [`ContentTree`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlockOrder {
    /// Blocks in the order they appear in the document body.
    #[default]
    Document,
    /// All paragraphs, then all tables, then all drawings.
    Grouped,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentTree {
    /// Body content in document order; the index is the block's position.
    pub blocks: Vec<Block>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    Drawing(Drawing),
}

impl Block {
    fn category(&self) -> u8 {
        match self {
            Block::Paragraph(_) => 0,
            Block::Table(_) => 1,
            Block::Drawing(_) => 2,
        }
    }
}

impl ContentTree {
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn drawings(&self) -> impl Iterator<Item = &Drawing> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Drawing(d) => Some(d),
            _ => None,
        })
    }

    /// Blocks in rendering order. Grouped order is stable within a category.
    pub fn ordered(&self, order: BlockOrder) -> Vec<&Block> {
        let mut blocks: Vec<&Block> = self.blocks.iter().collect();
        if order == BlockOrder::Grouped {
            blocks.sort_by_key(|b| b.category());
        }
        blocks
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paragraph {
    pub alignment: Alignment,
    pub runs: Vec<Run>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Run {
    pub bold: bool,
    pub italic: bool,
    /// Raw `w:sz` value in half-points; `None` when the property is absent.
    pub font_size_half_points: Option<String>,
    /// Raw `w:color` value; `None` when the property is absent.
    pub color_hex: Option<String>,
    pub texts: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// Only the first text fragment of the first run of the first paragraph is kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableCell {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drawing {
    embed: String,
}

impl Drawing {
    /// Returns `None` for an empty identifier; lookups never see one.
    pub fn new(embed: impl Into<String>) -> Option<Self> {
        let embed = embed.into();
        if embed.is_empty() {
            None
        } else {
            Some(Self { embed })
        }
    }

    pub fn embed_id(&self) -> &str {
        &self.embed
    }
}
