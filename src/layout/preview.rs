use std::fmt::Write as _;

use crate::engine::DependencyEngine;

use super::render::{CoordinateShape, RenderNode, Widget};

/// Renders the view tree as indented text against live engine state.
/// This is the crate's displayable surface for terminals and tests; a
/// GUI binding would walk the same tree with real widgets.
pub struct TextPreview<'a> {
    pub tree: &'a [RenderNode],
    pub engine: &'a DependencyEngine,
}

impl TextPreview<'_> {
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for node in self.tree {
            self.fmt_node(node, &mut out, 0);
        }
        out
    }

    fn fmt_node(&self, node: &RenderNode, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match node {
            RenderNode::Row {
                label,
                required,
                field,
                ..
            } => {
                let star = if *required { "*" } else { "" };
                let _ = writeln!(out, "{indent}{label}{star}: {}", self.inline(field));
            }
            RenderNode::Columns(columns) => {
                for (position, column) in columns.iter().enumerate() {
                    let _ = writeln!(out, "{indent}-- column {} --", position + 1);
                    for item in column {
                        self.fmt_node(item, out, depth + 1);
                    }
                }
            }
            RenderNode::Fieldset { legend, items } => {
                let _ = writeln!(out, "{indent}[{legend}]");
                for item in items {
                    self.fmt_node(item, out, depth + 1);
                }
            }
            RenderNode::OptionGroup { choices, .. } => {
                for choice in choices {
                    let mark = if self.engine.graph().node(choice.radio).checked {
                        "(o)"
                    } else {
                        "( )"
                    };
                    let _ = writeln!(out, "{indent}{mark} {}", choice.label);
                    for item in &choice.items {
                        self.fmt_node(item, out, depth + 1);
                    }
                }
            }
            RenderNode::CoordinateGroup { shape, items } => {
                let mode = match shape {
                    CoordinateShape::Box => "bounding box",
                    CoordinateShape::Radius => "center/radius",
                };
                let _ = writeln!(out, "{indent}<map picker: {mode}>");
                for item in items {
                    self.fmt_node(item, out, depth + 1);
                }
            }
            other => {
                let _ = writeln!(out, "{indent}{}", self.inline(other));
            }
        }
    }

    /// Inline rendering of a field area (gate, wrapper, control).
    fn inline(&self, node: &RenderNode) -> String {
        match node {
            RenderNode::Gate { check, inner } => {
                let mark = if self.engine.graph().node(*check).checked {
                    "[x]"
                } else {
                    "[ ]"
                };
                format!("{mark} {}", self.inline(inner))
            }
            RenderNode::Wrapper { inner, .. } => self.inline(inner),
            RenderNode::Control { node, widget } => {
                let field = self.engine.graph().node(*node);
                let body = match widget {
                    Widget::Checkbox => {
                        if field.checked {
                            "[x]".to_string()
                        } else {
                            "[ ]".to_string()
                        }
                    }
                    Widget::Select { .. } => format!("<{}>", field.value),
                    Widget::Text { .. } | Widget::Date { .. } => format!("[{}]", field.value),
                };
                if self.engine.graph().is_active(*node) {
                    body
                } else {
                    format!("{body} (disabled)")
                }
            }
            _ => String::new(),
        }
    }
}
