//! Structural validation of navigation data

use rustc_hash::FxHashSet;

use super::{Declaration, NavChildren, NavData, NavDataError, NavNode, NavValue};

impl NavData {
    /// Check the structural rules Doxygen output obeys.
    ///
    /// Every node needs a non-empty label and, when present, a
    /// well-formed relative link; no tree may repeat a (label, link)
    /// pair; indices must be non-empty lists of well-formed links.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, with the path to the offending
    /// value.
    pub fn validate(&self) -> Result<(), NavDataError> {
        for declaration in &self.declarations {
            validate_declaration(declaration)?;
        }
        Ok(())
    }
}

fn invalid(path: String, message: impl Into<String>) -> NavDataError {
    NavDataError::Invalid {
        path,
        message: message.into(),
    }
}

fn validate_declaration(declaration: &Declaration) -> Result<(), NavDataError> {
    let name = &declaration.name;
    match &declaration.value {
        NavValue::Tree(nodes) => {
            let mut seen = FxHashSet::default();
            for (i, node) in nodes.iter().enumerate() {
                validate_node(node, &format!("{name}[{i}]"), &mut seen)?;
            }
            Ok(())
        }
        NavValue::Index(links) => {
            if links.is_empty() {
                return Err(invalid(name.clone(), "index must not be empty"));
            }
            for (i, link) in links.iter().enumerate() {
                if !is_relative_link(link) {
                    return Err(invalid(
                        format!("{name}[{i}]"),
                        format!("'{link}' is not a relative link"),
                    ));
                }
            }
            Ok(())
        }
        NavValue::Text(text) => {
            if text.is_empty() {
                return Err(invalid(name.clone(), "message must not be empty"));
            }
            Ok(())
        }
    }
}

fn validate_node<'a>(
    node: &'a NavNode,
    path: &str,
    seen: &mut FxHashSet<(&'a str, Option<&'a str>)>,
) -> Result<(), NavDataError> {
    if node.label.is_empty() {
        return Err(invalid(path.to_string(), "label must not be empty"));
    }
    if let Some(link) = &node.link
        && !is_relative_link(link)
    {
        return Err(invalid(
            path.to_string(),
            format!("'{link}' is not a relative link"),
        ));
    }
    if !seen.insert((node.label.as_str(), node.link.as_deref())) {
        return Err(invalid(
            path.to_string(),
            format!("duplicate entry '{}'", node.label),
        ));
    }
    match &node.children {
        NavChildren::None => {}
        NavChildren::External(page) => {
            if page.is_empty() {
                return Err(invalid(path.to_string(), "external reference is empty"));
            }
        }
        NavChildren::Inline(children) => {
            for (i, child) in children.iter().enumerate() {
                validate_node(child, &format!("{path}[2][{i}]"), seen)?;
            }
        }
    }
    Ok(())
}

/// Relative links are non-empty, contain no whitespace, and carry no
/// URL scheme.
fn is_relative_link(link: &str) -> bool {
    !link.is_empty()
        && !link.contains(char::is_whitespace)
        && !link.contains("://")
        && !link.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(nodes: Vec<NavNode>) -> NavData {
        NavData {
            header: None,
            declarations: vec![Declaration {
                name: "T".to_string(),
                value: NavValue::Tree(nodes),
                indent: 2,
            }],
        }
    }

    #[test]
    fn test_valid_tree_passes() {
        let data = tree(vec![NavNode::branch(
            "Home",
            "index.html",
            vec![NavNode::leaf("Files", "files.html#anchor")],
        )]);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_empty_label_is_rejected() {
        let data = tree(vec![NavNode::leaf("", "index.html")]);
        let err = data.validate().unwrap_err();
        assert!(matches!(err, NavDataError::Invalid { path, .. } if path == "T[0]"));
    }

    #[test]
    fn test_absolute_links_are_rejected() {
        let data = tree(vec![NavNode::leaf("Home", "https://example.com/")]);
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_duplicate_label_link_pair_is_rejected() {
        let data = tree(vec![
            NavNode::leaf("Files", "files.html"),
            NavNode::leaf("Files", "files.html"),
        ]);
        let err = data.validate().unwrap_err();
        assert!(matches!(err, NavDataError::Invalid { path, .. } if path == "T[1]"));
    }

    #[test]
    fn test_same_label_different_link_is_fine() {
        let data = tree(vec![
            NavNode::leaf("All", "functions.html"),
            NavNode::leaf("All", "namespacemembers.html"),
        ]);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_empty_index_is_rejected() {
        let data = NavData {
            header: None,
            declarations: vec![Declaration {
                name: "NAVTREEINDEX".to_string(),
                value: NavValue::Index(Vec::new()),
                indent: 0,
            }],
        };
        assert!(data.validate().is_err());
    }
}
