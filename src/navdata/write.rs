//! Byte-exact emission of navigation scripts

use std::fmt::Write;

use super::{Declaration, NavChildren, NavData, NavNode, NavValue};

impl NavData {
    /// Render the file in Doxygen's exact layout.
    ///
    /// Parsing a file and writing it back reproduces the input byte for
    /// byte: 2-space indentation steps from each declaration's base
    /// indent, `[ "label", "link", null ]` spacing, a blank line after
    /// each array declaration, and no trailing newline.
    #[must_use]
    pub fn to_js_string(&self) -> String {
        let mut out = self.header.clone().unwrap_or_default();
        for (i, declaration) in self.declarations.iter().enumerate() {
            write_declaration(&mut out, declaration);
            if i + 1 < self.declarations.len() {
                out.push_str(match declaration.value {
                    NavValue::Text(_) => "\n",
                    _ => "\n\n",
                });
            }
        }
        out
    }
}

fn write_declaration(out: &mut String, declaration: &Declaration) {
    match &declaration.value {
        NavValue::Tree(nodes) => {
            let _ = write!(out, "var {} =\n[\n", declaration.name);
            for (i, node) in nodes.iter().enumerate() {
                write_node(out, node, declaration.indent, i + 1 == nodes.len());
            }
            out.push_str("];");
        }
        NavValue::Index(links) => {
            let _ = write!(out, "var {} =\n[\n", declaration.name);
            for (i, link) in links.iter().enumerate() {
                let comma = if i + 1 == links.len() { "" } else { "," };
                let _ = writeln!(
                    out,
                    "{pad}{link}{comma}",
                    pad = " ".repeat(declaration.indent),
                    link = json_string(link),
                );
            }
            out.push_str("];");
        }
        NavValue::Text(text) => {
            let _ = write!(
                out,
                "var {} = '{}';",
                declaration.name,
                text.replace('\\', "\\\\").replace('\'', "\\'")
            );
        }
    }
}

fn write_node(out: &mut String, node: &NavNode, indent: usize, last: bool) {
    let pad = " ".repeat(indent);
    let label = json_string(&node.label);
    let link = node
        .link
        .as_deref()
        .map_or_else(|| "null".to_string(), json_string);
    let comma = if last { "" } else { "," };

    match &node.children {
        NavChildren::None => {
            let _ = writeln!(out, "{pad}[ {label}, {link}, null ]{comma}");
        }
        NavChildren::External(page) => {
            let _ = writeln!(out, "{pad}[ {label}, {link}, {} ]{comma}", json_string(page));
        }
        NavChildren::Inline(children) => {
            let _ = writeln!(out, "{pad}[ {label}, {link}, [");
            for (i, child) in children.iter().enumerate() {
                write_node(out, child, indent + 2, i + 1 == children.len());
            }
            let _ = writeln!(out, "{pad}] ]{comma}");
        }
    }
}

/// A string rendered as JSON, double quotes and escapes included
fn json_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navdata::parse;

    #[test]
    fn test_leaf_and_branch_layout() {
        let declaration = Declaration {
            name: "NAVTREE".to_string(),
            value: NavValue::Tree(vec![NavNode::branch(
                "Home",
                "index.html",
                vec![
                    NavNode {
                        label: "Classes".to_string(),
                        link: Some("annotated.html".to_string()),
                        children: NavChildren::External("annotated_dup".to_string()),
                    },
                    NavNode::leaf("Files", "files.html"),
                ],
            )]),
            indent: 2,
        };
        let data = NavData {
            header: None,
            declarations: vec![declaration],
        };

        assert_eq!(
            data.to_js_string(),
            concat!(
                "var NAVTREE =\n",
                "[\n",
                "  [ \"Home\", \"index.html\", [\n",
                "    [ \"Classes\", \"annotated.html\", \"annotated_dup\" ],\n",
                "    [ \"Files\", \"files.html\", null ]\n",
                "  ] ]\n",
                "];"
            )
        );
    }

    #[test]
    fn test_quotes_in_labels_are_escaped() {
        let data = NavData {
            header: None,
            declarations: vec![Declaration {
                name: "T".to_string(),
                value: NavValue::Tree(vec![NavNode::leaf("Say \"hi\"", "hi.html")]),
                indent: 2,
            }],
        };
        let rendered = data.to_js_string();
        assert!(rendered.contains(r#"[ "Say \"hi\"", "hi.html", null ]"#));
        assert_eq!(parse(&rendered).unwrap(), data);
    }

    #[test]
    fn test_string_declarations_share_no_blank_line() {
        let data = NavData {
            header: None,
            declarations: vec![
                Declaration {
                    name: "SYNCONMSG".to_string(),
                    value: NavValue::Text("on".to_string()),
                    indent: 0,
                },
                Declaration {
                    name: "SYNCOFFMSG".to_string(),
                    value: NavValue::Text("it's off".to_string()),
                    indent: 0,
                },
            ],
        };
        assert_eq!(
            data.to_js_string(),
            "var SYNCONMSG = 'on';\nvar SYNCOFFMSG = 'it\\'s off';"
        );
    }

    #[test]
    fn test_index_round_trip() {
        let input = "var NAVTREEINDEX =\n[\n\"a.html\",\n\"b.html#anchor\"\n];";
        let data = parse(input).unwrap();
        assert_eq!(data.to_js_string(), input);
    }
}
