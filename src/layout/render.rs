use crate::engine::NodeId;

/// The pure view tree produced by rendering a layout. Render nodes hold
/// no authoritative state; they reference field nodes owned by the
/// engine and are re-read whenever the surface is drawn.
#[derive(Debug)]
pub enum RenderNode {
    /// One labeled form row wrapping a single parameter's field area.
    Row {
        node: NodeId,
        name: String,
        label: String,
        required: bool,
        help: Option<String>,
        field: Box<RenderNode>,
    },
    /// An enabling checkbox in front of the wrapped field.
    Gate { check: NodeId, inner: Box<RenderNode> },
    /// An inner wrapper element around the control (date widgets).
    Wrapper { node: NodeId, inner: Box<RenderNode> },
    /// The control itself.
    Control { node: NodeId, widget: Widget },
    Columns(Vec<Vec<RenderNode>>),
    Fieldset {
        legend: String,
        items: Vec<RenderNode>,
    },
    OptionGroup {
        name: String,
        choices: Vec<ChoiceNode>,
    },
    CoordinateGroup {
        shape: CoordinateShape,
        items: Vec<RenderNode>,
    },
}

/// One exclusive choice: its radio control and the fields it gates.
#[derive(Debug)]
pub struct ChoiceNode {
    pub radio: NodeId,
    pub label: String,
    pub items: Vec<RenderNode>,
}

/// Which drawing mode the external map picker would use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateShape {
    Box,
    Radius,
}

/// The concrete widget drawn for a control.
#[derive(Debug, Clone)]
pub enum Widget {
    Text { size: u16 },
    /// (raw value, display label) pairs, in declared order.
    Select { options: Vec<(String, String)> },
    Checkbox,
    Date { with_time: bool },
}

impl RenderNode {
    /// Every interactive control (inputs, enabling checkboxes, radio
    /// controls) in this subtree, in render order.
    pub fn inputs(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_inputs(&mut out);
        out
    }

    fn collect_inputs(&self, out: &mut Vec<NodeId>) {
        match self {
            RenderNode::Row { field, .. } => field.collect_inputs(out),
            RenderNode::Gate { check, inner } => {
                out.push(*check);
                inner.collect_inputs(out);
            }
            RenderNode::Wrapper { inner, .. } => inner.collect_inputs(out),
            RenderNode::Control { node, .. } => out.push(*node),
            RenderNode::Columns(columns) => {
                for column in columns {
                    for item in column {
                        item.collect_inputs(out);
                    }
                }
            }
            RenderNode::Fieldset { items, .. } | RenderNode::CoordinateGroup { items, .. } => {
                for item in items {
                    item.collect_inputs(out);
                }
            }
            RenderNode::OptionGroup { choices, .. } => {
                for choice in choices {
                    out.push(choice.radio);
                    for item in &choice.items {
                        item.collect_inputs(out);
                    }
                }
            }
        }
    }
}
