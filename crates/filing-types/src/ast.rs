//! Document tree model and flattening.
//!
//! Drafts arrive as a generic editor JSON tree (`doc` → headings, paragraphs,
//! lists → inline `text`/`hardBreak` leaves). A single recursive-descent pass
//! flattens that tree into a closed `Block` union; it is the only place that
//! has to cope with arbitrary or unknown node shapes.

use serde::{Deserialize, Serialize};

/// A node of the editor document tree, as serialized by the rich-text editor.
///
/// Unknown `type` values are tolerated: they deserialize like any other node
/// and are traversed generically via `content`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocNode {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<NodeAttrs>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<DocNode>,

    /// Present on `text` leaves only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,

    /// Starting index of an ordered list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
}

/// Flattened content block, ready for layout or analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    ListItem { ordered: bool, index: u32, text: String },
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Heading { text, .. }
            | Block::Paragraph { text }
            | Block::ListItem { text, .. } => text,
        }
    }
}

/// Flatten the editor tree into blocks.
///
/// Never returns an empty vec: an empty or unparsable document yields a
/// single empty paragraph so downstream layout always has something to place.
pub fn flatten(root: &DocNode) -> Vec<Block> {
    let mut blocks = Vec::new();
    walk(root, &mut blocks);
    if blocks.is_empty() {
        blocks.push(Block::Paragraph {
            text: String::new(),
        });
    }
    blocks
}

fn walk(node: &DocNode, out: &mut Vec<Block>) {
    match node.kind.as_str() {
        "heading" => {
            let level = node.attrs.as_ref().and_then(|a| a.level).unwrap_or(1);
            out.push(Block::Heading {
                level,
                text: inline_text(node),
            });
        }
        "paragraph" => out.push(Block::Paragraph {
            text: inline_text(node),
        }),
        "bulletList" | "orderedList" => {
            let ordered = node.kind == "orderedList";
            let start = node.attrs.as_ref().and_then(|a| a.start).unwrap_or(1);
            let mut index = start;
            for child in &node.content {
                if child.kind == "listItem" {
                    out.push(Block::ListItem {
                        ordered,
                        index,
                        text: inline_text(child),
                    });
                    index += 1;
                } else {
                    walk(child, out);
                }
            }
        }
        // doc, unknown wrappers: visit children
        _ => {
            for child in &node.content {
                walk(child, out);
            }
        }
    }
}

/// Collect the inline text of a node, depth-first. `hardBreak` leaves become
/// embedded newlines.
fn inline_text(node: &DocNode) -> String {
    let mut buf = String::new();
    collect_inline(node, &mut buf);
    normalize(&buf)
}

fn collect_inline(node: &DocNode, buf: &mut String) {
    if node.kind == "hardBreak" {
        buf.push('\n');
        return;
    }
    if let Some(text) = &node.text {
        buf.push_str(text);
    }
    for child in &node.content {
        collect_inline(child, buf);
    }
}

/// Collapse interior whitespace per line, trim line edges, and strip
/// leading/trailing blank lines, preserving single embedded line breaks.
pub fn normalize(raw: &str) -> String {
    let lines: Vec<String> = raw
        .lines()
        .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();

    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(0);
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map(|i| i + 1)
        .unwrap_or(0);

    lines[start..end].join("\n")
}

/// Flatten blocks into a plain-text string for analysis.
///
/// Headings and paragraphs each contribute one normalized line followed by a
/// blank separator; list items contribute one line each with a `- ` or `N. `
/// prefix. Output is stable for an unchanged tree and insensitive to
/// incidental whitespace noise from the editor.
pub fn extract_plain_text(blocks: &[Block]) -> String {
    let mut out: Vec<String> = Vec::new();
    for block in blocks {
        match block {
            Block::Heading { text, .. } | Block::Paragraph { text } => {
                if out.last().is_some_and(|l| !l.is_empty()) {
                    out.push(String::new());
                }
                out.push(text.clone());
                out.push(String::new());
            }
            Block::ListItem {
                ordered,
                index,
                text,
            } => {
                let prefix = if *ordered {
                    format!("{}. ", index)
                } else {
                    "- ".to_string()
                };
                out.push(format!("{}{}", prefix, text));
            }
        }
    }
    normalize(&out.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text_leaf(s: &str) -> DocNode {
        DocNode {
            kind: "text".into(),
            text: Some(s.into()),
            ..Default::default()
        }
    }

    fn paragraph(s: &str) -> DocNode {
        DocNode {
            kind: "paragraph".into(),
            content: vec![text_leaf(s)],
            ..Default::default()
        }
    }

    #[test]
    fn flattens_headings_and_paragraphs() {
        let doc = DocNode {
            kind: "doc".into(),
            content: vec![
                DocNode {
                    kind: "heading".into(),
                    attrs: Some(NodeAttrs {
                        level: Some(2),
                        start: None,
                    }),
                    content: vec![text_leaf("Motion to Compel")],
                    ..Default::default()
                },
                paragraph("The plaintiff respectfully moves..."),
            ],
            ..Default::default()
        };

        let blocks = flatten(&doc);
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 2,
                    text: "Motion to Compel".into()
                },
                Block::Paragraph {
                    text: "The plaintiff respectfully moves...".into()
                },
            ]
        );
    }

    #[test]
    fn empty_document_yields_one_empty_paragraph() {
        let doc = DocNode {
            kind: "doc".into(),
            ..Default::default()
        };
        let blocks = flatten(&doc);
        assert_eq!(blocks, vec![Block::Paragraph { text: "".into() }]);
    }

    #[test]
    fn garbage_node_types_are_traversed_via_content() {
        let doc = DocNode {
            kind: "mysteryWrapper".into(),
            content: vec![DocNode {
                kind: "innerWidget".into(),
                content: vec![paragraph("still reachable")],
                ..Default::default()
            }],
            ..Default::default()
        };
        let blocks = flatten(&doc);
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                text: "still reachable".into()
            }]
        );
    }

    #[test]
    fn ordered_list_indices_respect_start_attr() {
        let doc = DocNode {
            kind: "orderedList".into(),
            attrs: Some(NodeAttrs {
                level: None,
                start: Some(3),
            }),
            content: vec![
                DocNode {
                    kind: "listItem".into(),
                    content: vec![paragraph("first")],
                    ..Default::default()
                },
                DocNode {
                    kind: "listItem".into(),
                    content: vec![paragraph("second")],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let blocks = flatten(&doc);
        assert_eq!(
            blocks,
            vec![
                Block::ListItem {
                    ordered: true,
                    index: 3,
                    text: "first".into()
                },
                Block::ListItem {
                    ordered: true,
                    index: 4,
                    text: "second".into()
                },
            ]
        );
    }

    #[test]
    fn hard_break_becomes_embedded_newline() {
        let node = DocNode {
            kind: "paragraph".into(),
            content: vec![
                text_leaf("line one"),
                DocNode {
                    kind: "hardBreak".into(),
                    ..Default::default()
                },
                text_leaf("line two"),
            ],
            ..Default::default()
        };
        let blocks = flatten(&node);
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                text: "line one\nline two".into()
            }]
        );
    }

    #[test]
    fn normalize_collapses_whitespace_noise() {
        assert_eq!(normalize("  a   b \n\n  c  \n\n"), "a b\n\nc");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n \t \n"), "");
    }

    #[test]
    fn plain_text_uses_list_prefixes_and_blank_separators() {
        let blocks = vec![
            Block::Heading {
                level: 1,
                text: "Motion".into(),
            },
            Block::Paragraph {
                text: "Body text.".into(),
            },
            Block::ListItem {
                ordered: false,
                index: 1,
                text: "bullet".into(),
            },
            Block::ListItem {
                ordered: true,
                index: 2,
                text: "numbered".into(),
            },
        ];
        assert_eq!(
            extract_plain_text(&blocks),
            "Motion\n\nBody text.\n\n- bullet\n2. numbered"
        );
    }

    #[test]
    fn plain_text_is_stable_across_runs() {
        let doc: DocNode = serde_json::from_str(
            r#"{"type":"doc","content":[
                {"type":"paragraph","content":[{"type":"text","text":"  Smith   v.  Jones  "}]},
                {"type":"bulletList","content":[
                    {"type":"listItem","content":[{"type":"paragraph","content":[{"type":"text","text":"item"}]}]}
                ]}
            ]}"#,
        )
        .unwrap();
        let a = extract_plain_text(&flatten(&doc));
        let b = extract_plain_text(&flatten(&doc));
        assert_eq!(a, b);
        assert_eq!(a, "Smith v. Jones\n\n- item");
    }
}
