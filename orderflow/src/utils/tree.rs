//! Tree pretty-printing with box-drawing connectors.

/// A node in a printable tree.
///
/// Child order is preserved as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A node with no children.
    Leaf,
    /// A node with ordered, labelled children.
    Branch(Vec<(String, TreeNode)>),
}

impl TreeNode {
    /// Convenience constructor for a branch.
    #[must_use]
    pub fn branch<L: Into<String>>(children: Vec<(L, TreeNode)>) -> Self {
        Self::Branch(
            children
                .into_iter()
                .map(|(label, node)| (label.into(), node))
                .collect(),
        )
    }
}

/// Renders a tree with `├──`/`└──` connectors and `│` continuation lines.
///
/// `root`, when given, becomes an unindented first line. Multi-line labels
/// are indented under their own connector.
#[must_use]
pub fn format_tree(nodes: &[(String, TreeNode)], root: Option<&str>) -> String {
    let mut lines: Vec<String> = Vec::new();
    if let Some(root) = root {
        lines.push(root.to_string());
    }
    render(nodes, "", &mut lines);
    lines.join("\n")
}

fn render(nodes: &[(String, TreeNode)], prefix: &str, lines: &mut Vec<String>) {
    for (i, (label, node)) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let connector = if last { "└── " } else { "├── " };
        let continuation = if last { "    " } else { "│   " };

        for (n, line) in label.lines().enumerate() {
            if n == 0 {
                lines.push(format!("{prefix}{connector}{line}"));
            } else {
                lines.push(format!("{prefix}{continuation}{line}"));
            }
        }

        if let TreeNode::Branch(children) = node {
            render(children, &format!("{prefix}{continuation}"), lines);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(label: &str) -> (String, TreeNode) {
        (label.to_string(), TreeNode::Leaf)
    }

    #[test]
    fn test_flat_tree() {
        let tree = vec![leaf("foo"), leaf("bar")];
        assert_eq!(format_tree(&tree, None), "├── foo\n└── bar");
    }

    #[test]
    fn test_nested_tree() {
        let tree = vec![
            (
                "parent".to_string(),
                TreeNode::branch(vec![
                    ("child-a", TreeNode::Leaf),
                    ("child-b", TreeNode::Leaf),
                ]),
            ),
            leaf("sibling"),
        ];
        let expected = "\
├── parent
│   ├── child-a
│   └── child-b
└── sibling";
        assert_eq!(format_tree(&tree, None), expected);
    }

    #[test]
    fn test_root_line_unindented() {
        let tree = vec![leaf("only")];
        assert_eq!(format_tree(&tree, Some("project")), "project\n└── only");
    }

    #[test]
    fn test_multiline_label_indented_under_connector() {
        let tree = vec![
            ("first\nsecond line".to_string(), TreeNode::Leaf),
            leaf("tail"),
        ];
        let expected = "\
├── first
│   second line
└── tail";
        assert_eq!(format_tree(&tree, None), expected);
    }

    #[test]
    fn test_last_branch_children_not_barred() {
        let tree = vec![(
            "end".to_string(),
            TreeNode::Branch(vec![leaf("inner")]),
        )];
        assert_eq!(format_tree(&tree, None), "└── end\n    └── inner");
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(format_tree(&[], None), "");
        assert_eq!(format_tree(&[], Some("root")), "root");
    }
}
