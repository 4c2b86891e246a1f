//! SVG tree drawing
//!
//! Lays the tree out top-down: leaves take consecutive columns from left to right, every
//! internal node is centered over its children, and each depth level is one row. Nodes
//! are drawn as rounded boxes joined to their parent by straight edges.
//!
//! Parameters:
//!     friendly-labels: see [formats](super)
//!     title: caption drawn above the tree (usually the sentence)

use super::registry::{FormatError, Formatter};
use super::{friendly_labels, node_title};
use crate::svo::tree::DerivationNode;
use std::collections::HashMap;
use std::fmt::Write;

const COLUMN_WIDTH: f64 = 150.0;
const ROW_HEIGHT: f64 = 70.0;
const MARGIN: f64 = 40.0;
const BOX_HEIGHT: f64 = 24.0;
const CHAR_WIDTH: f64 = 7.0;
const FILL: &str = "#F3FAFF";
const STROKE: &str = "#4A6FA5";

struct Placed {
    title: String,
    x: f64,
    depth: usize,
    children: Vec<Placed>,
}

/// Assign columns to leaves and center parents over their children
fn place(node: &DerivationNode, depth: usize, next_column: &mut usize, friendly: bool) -> Placed {
    let children: Vec<Placed> = node
        .children()
        .iter()
        .map(|child| place(child, depth + 1, next_column, friendly))
        .collect();

    let x = if children.is_empty() {
        let column = *next_column as f64;
        *next_column += 1;
        column
    } else {
        children.iter().map(|c| c.x).sum::<f64>() / children.len() as f64
    };

    Placed {
        title: node_title(node, friendly),
        x,
        depth,
        children,
    }
}

fn max_depth(placed: &Placed) -> usize {
    placed
        .children
        .iter()
        .map(max_depth)
        .max()
        .unwrap_or(placed.depth)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn center(placed: &Placed, top: f64) -> (f64, f64) {
    (
        MARGIN + placed.x * COLUMN_WIDTH + COLUMN_WIDTH / 2.0,
        top + placed.depth as f64 * ROW_HEIGHT + BOX_HEIGHT / 2.0,
    )
}

fn draw(out: &mut String, placed: &Placed, top: f64) -> std::fmt::Result {
    let (x, y) = center(placed, top);
    for child in &placed.children {
        let (cx, cy) = center(child, top);
        writeln!(
            out,
            r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}"/>"#,
            x,
            y + BOX_HEIGHT / 2.0,
            cx,
            cy - BOX_HEIGHT / 2.0,
            STROKE
        )?;
    }

    let width = placed.title.chars().count() as f64 * CHAR_WIDTH + 16.0;
    writeln!(
        out,
        r#"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="6" fill="{}" stroke="{}"/>"#,
        x - width / 2.0,
        y - BOX_HEIGHT / 2.0,
        width,
        BOX_HEIGHT,
        FILL,
        STROKE
    )?;
    writeln!(
        out,
        r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
        x,
        y,
        escape(&placed.title)
    )?;

    for child in &placed.children {
        draw(out, child, top)?;
    }
    Ok(())
}

pub fn to_svg_str(tree: &DerivationNode, params: &HashMap<String, String>) -> Result<String, FormatError> {
    let mut columns = 0;
    let placed = place(tree, 0, &mut columns, friendly_labels(params));
    let title = params.get("title");

    let top = if title.is_some() { MARGIN + 30.0 } else { MARGIN };
    let width = MARGIN * 2.0 + columns as f64 * COLUMN_WIDTH;
    let height = top + (max_depth(&placed) as f64) * ROW_HEIGHT + BOX_HEIGHT + MARGIN;

    let mut out = String::new();
    let render = |out: &mut String| -> std::fmt::Result {
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}" font-family="sans-serif" font-size="12">"#,
            width, height, width, height
        )?;
        if let Some(title) = title {
            writeln!(
                out,
                r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14">{}</text>"#,
                width / 2.0,
                MARGIN,
                escape(title)
            )?;
        }
        draw(out, &placed, top)?;
        writeln!(out, "</svg>")
    };
    render(&mut out).map_err(|e| FormatError::SerializationError(e.to_string()))?;
    Ok(out)
}

/// Formatter implementation for SVG drawings
pub struct SvgFormatter;

impl Formatter for SvgFormatter {
    fn name(&self) -> &str {
        "svg"
    }

    fn serialize_with_params(
        &self,
        tree: &DerivationNode,
        params: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        to_svg_str(tree, params)
    }

    fn description(&self) -> &str {
        "SVG drawing of the tree"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svo::lexicon::Category;
    use crate::svo::tree::Rule;

    fn tree() -> DerivationNode {
        DerivationNode::node(
            Rule::NounPhrase,
            vec![
                DerivationNode::leaf(Category::Determiner, "la"),
                DerivationNode::leaf(Category::Noun, "nina"),
            ],
        )
    }

    #[test]
    fn test_parent_centered_over_leaves() {
        let mut columns = 0;
        let placed = place(&tree(), 0, &mut columns, false);
        assert_eq!(columns, 2);
        assert_eq!(placed.children[0].x, 0.0);
        assert_eq!(placed.children[1].x, 1.0);
        assert_eq!(placed.x, 0.5);
        assert_eq!(max_depth(&placed), 1);
    }

    #[test]
    fn test_svg_document() {
        let params = HashMap::from([("title".to_string(), "<la niña>".to_string())]);
        let svg = to_svg_str(&tree(), &params).unwrap();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"380\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 3);
        assert_eq!(svg.matches("<line").count(), 2);
        assert!(svg.contains("&lt;la niña&gt;"));
        assert!(svg.contains(">Det (Determinante): la</text>"));
    }
}
