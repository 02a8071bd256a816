use std::fmt::Write;

use super::{render::RenderedContent, types::MarkupNode};

/// Plain-text rendering: leaves separated by spaces, delimiter glyphs inline,
/// superscripts in braces.
pub fn to_text(nodes: &[MarkupNode]) -> String {
    let mut leaves = vec![];
    for node in nodes {
        collect_text(node, &mut leaves);
    }
    leaves.join(" ")
}

fn collect_text(node: &MarkupNode, out: &mut Vec<String>) {
    match node {
        MarkupNode::Container { children, .. } => {
            for child in children {
                collect_text(child, out);
            }
        }
        MarkupNode::Leaf {
            before,
            content,
            after,
            ..
        } => {
            let body = match content {
                RenderedContent::Text(s) => s.clone(),
                RenderedContent::Superscript(s) => format!("{{{s}}}"),
            };
            out.push(format!("{}{body}{}", before.concat(), after.concat()));
        }
    }
}

/// HTML rendering as nested `<span>` elements.
///
/// Containers carry `class="<dimension> <dimension>-<label>"` (label `none`
/// when unannotated) and a `data-node` id; leaves carry `data-leaf`.
pub fn to_html(nodes: &[MarkupNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_html(node, &mut out);
    }
    out
}

fn write_html(node: &MarkupNode, out: &mut String) {
    match node {
        MarkupNode::Container {
            id,
            dimension,
            label,
            children,
            ..
        } => {
            let value = label.map_or("none", |l| l.name());
            // Writing to a String cannot fail.
            let _ = write!(
                out,
                r#"<span class="{dimension} {dimension}-{value}" data-node="{}">"#,
                id.0
            );
            for child in children {
                write_html(child, out);
            }
            out.push_str("</span>");
        }
        MarkupNode::Leaf {
            leaf_id,
            before,
            content,
            after,
            ..
        } => {
            let _ = write!(
                out,
                r#"<span class="leaf" data-leaf="{}">"#,
                html_escape::encode_double_quoted_attribute(leaf_id)
            );
            out.push_str(&html_escape::encode_text(&before.concat()));
            match content {
                RenderedContent::Text(s) => out.push_str(&html_escape::encode_text(s)),
                RenderedContent::Superscript(s) => {
                    out.push_str("<sup>");
                    out.push_str(&html_escape::encode_text(s));
                    out.push_str("</sup>");
                }
            }
            out.push_str(&html_escape::encode_text(&after.concat()));
            out.push_str("</span>");
        }
    }
}
