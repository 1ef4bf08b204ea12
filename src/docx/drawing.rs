use crate::model::Drawing;

use super::{DML_NS, REL_NS, WPD_NS, is_wml, paragraph_runs};

fn find_blip_embed<'a, 'input>(container: roxmltree::Node<'a, 'input>) -> Option<&'a str> {
    container
        .descendants()
        .find(|n| n.tag_name().name() == "blip" && n.tag_name().namespace() == Some(DML_NS))
        .and_then(|n| n.attribute((REL_NS, "embed")))
}

/// Embed identifier of an inline drawing. Anchored (floating) drawings are ignored.
pub(super) fn body_drawing(drawing: roxmltree::Node) -> Option<Drawing> {
    drawing
        .children()
        .filter(|n| n.tag_name().name() == "inline" && n.tag_name().namespace() == Some(WPD_NS))
        .find_map(find_blip_embed)
        .and_then(Drawing::new)
}

/// Drawings carried by the runs of a paragraph, in run order.
pub(super) fn run_drawings(para: roxmltree::Node) -> Vec<Drawing> {
    paragraph_runs(para)
        .into_iter()
        .flat_map(|run| run.children().filter(|n| is_wml(*n, "drawing")))
        .filter_map(body_drawing)
        .collect()
}
