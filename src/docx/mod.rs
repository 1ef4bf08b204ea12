mod drawing;
pub(crate) mod package;

use crate::error::Error;
use crate::model::{Alignment, Block, ContentTree, Paragraph, Run, Table, TableCell, TableRow};

use drawing::{body_drawing, run_drawings};

pub(crate) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const DML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const WPD_NS: &str =
    "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
pub(crate) const REL_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

fn is_wml(node: roxmltree::Node, name: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

pub(crate) fn wml<'a>(
    node: roxmltree::Node<'a, 'a>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'a>> {
    node.children().find(|n| is_wml(*n, name))
}

fn wml_children<'a>(
    node: roxmltree::Node<'a, 'a>,
    name: &'a str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'a>> + 'a {
    node.children().filter(move |n| is_wml(*n, name))
}

/// Property value from `w:val`, falling back to the element's text.
fn prop_value(node: roxmltree::Node) -> Option<String> {
    node.attribute((WML_NS, "val"))
        .or_else(|| node.text())
        .map(|v| v.trim().to_string())
}

fn wml_prop(parent: roxmltree::Node, name: &str) -> Option<String> {
    wml(parent, name).and_then(prop_value)
}

/// Parse a WML boolean toggle element (e.g., w:b, w:i).
/// Present with no val, or a val other than "0"/"false"/"off", means true.
fn wml_bool(parent: roxmltree::Node, name: &str) -> Option<bool> {
    wml(parent, name).map(|n| {
        n.attribute((WML_NS, "val"))
            .is_none_or(|v| v != "0" && v != "false" && v != "off")
    })
}

/// Flatten block-level content controls into their parent's children.
fn collect_block_nodes<'a>(parent: roxmltree::Node<'a, 'a>) -> Vec<roxmltree::Node<'a, 'a>> {
    let mut nodes = Vec::new();
    for child in parent.children() {
        if is_wml(child, "sdt") {
            if let Some(content) = wml(child, "sdtContent") {
                nodes.extend(collect_block_nodes(content));
            }
        } else if child.is_element() {
            nodes.push(child);
        }
    }
    nodes
}

fn parse_alignment(val: &str) -> Alignment {
    match val {
        "center" => Alignment::Center,
        "right" => Alignment::Right,
        _ => Alignment::Left,
    }
}

/// Runs of a paragraph, including those wrapped in hyperlinks, tracked
/// insertions and inline content controls.
fn paragraph_runs<'a>(para: roxmltree::Node<'a, 'a>) -> Vec<roxmltree::Node<'a, 'a>> {
    let mut runs = Vec::new();
    for child in para.children() {
        if is_wml(child, "r") {
            runs.push(child);
        } else if is_wml(child, "hyperlink") || is_wml(child, "ins") {
            runs.extend(paragraph_runs(child));
        } else if is_wml(child, "sdt") {
            if let Some(content) = wml(child, "sdtContent") {
                runs.extend(paragraph_runs(content));
            }
        }
    }
    runs
}

fn parse_run(node: roxmltree::Node) -> Run {
    let rpr = wml(node, "rPr");
    Run {
        bold: rpr.and_then(|pr| wml_bool(pr, "b")).unwrap_or(false),
        italic: rpr.and_then(|pr| wml_bool(pr, "i")).unwrap_or(false),
        font_size_half_points: rpr.and_then(|pr| wml_prop(pr, "sz")),
        color_hex: rpr.and_then(|pr| wml_prop(pr, "color")),
        texts: wml_children(node, "t")
            .map(|t| t.text().unwrap_or("").to_string())
            .collect(),
    }
}

fn parse_paragraph(node: roxmltree::Node) -> Paragraph {
    let alignment = wml(node, "pPr")
        .and_then(|ppr| wml_prop(ppr, "jc"))
        .map(|v| parse_alignment(&v))
        .unwrap_or_default();
    Paragraph {
        alignment,
        runs: paragraph_runs(node).into_iter().map(parse_run).collect(),
    }
}

/// First `p > r > t` text of a cell; everything else in the cell is dropped.
fn cell_text(tc: roxmltree::Node) -> String {
    wml_children(tc, "p")
        .flat_map(|p| wml_children(p, "r"))
        .flat_map(|r| wml_children(r, "t"))
        .next()
        .and_then(|t| t.text())
        .unwrap_or("")
        .to_string()
}

fn parse_table(node: roxmltree::Node) -> Table {
    let rows = collect_block_nodes(node)
        .into_iter()
        .filter(|n| is_wml(*n, "tr"))
        .map(|tr| TableRow {
            cells: collect_block_nodes(tr)
                .into_iter()
                .filter(|n| is_wml(*n, "tc"))
                .map(|tc| TableCell { text: cell_text(tc) })
                .collect(),
        })
        .collect();
    Table { rows }
}

/// Parse the main content part (`word/document.xml`) into a [`ContentTree`].
///
/// Absent properties are kept as absent; defaults are applied when rendering.
/// Drawings found inside a paragraph's runs are placed right after it.
pub fn parse_content(markup: &[u8]) -> Result<ContentTree, Error> {
    let text = std::str::from_utf8(markup)
        .map_err(|e| Error::MalformedMarkup(format!("content part is not UTF-8: {e}")))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let xml = roxmltree::Document::parse(text)?;
    let root = xml.root_element();
    let body = wml(root, "body").ok_or_else(|| Error::MalformedMarkup("missing w:body".into()))?;

    let mut blocks = Vec::new();
    for node in collect_block_nodes(body) {
        if node.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match node.tag_name().name() {
            "p" => {
                blocks.push(Block::Paragraph(parse_paragraph(node)));
                blocks.extend(run_drawings(node).into_iter().map(Block::Drawing));
            }
            "tbl" => blocks.push(Block::Table(parse_table(node))),
            "drawing" => {
                if let Some(d) = body_drawing(node) {
                    blocks.push(Block::Drawing(d));
                }
            }
            _ => {}
        }
    }

    let tree = ContentTree { blocks };
    log::debug!(
        "parse_content: {} paragraphs, {} tables, {} drawings",
        tree.paragraphs().count(),
        tree.tables().count(),
        tree.drawings().count(),
    );
    Ok(tree)
}
