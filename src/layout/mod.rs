//! Layout composition: maps the schema's parameter list onto an
//! on-screen arrangement and, while doing so, registers every leaf field
//! and every structural dependency into the engine.

use ahash::AHashMap;
use log::debug;

use crate::engine::{DependencyEngine, FieldKind, FieldNode};
use crate::error::RenderError;
use crate::schema::{ParameterDescriptor, ValueKind};

mod preview;
mod render;

pub use preview::TextPreview;
pub use render::{ChoiceNode, CoordinateShape, RenderNode, Widget};

/// Everything a layout item needs while rendering: the descriptor table
/// for leaf lookups and the engine to register nodes and edges into.
pub struct RenderContext<'a> {
    descriptors: &'a [ParameterDescriptor],
    index: &'a AHashMap<String, usize>,
    pub engine: &'a mut DependencyEngine,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        descriptors: &'a [ParameterDescriptor],
        index: &'a AHashMap<String, usize>,
        engine: &'a mut DependencyEngine,
    ) -> Self {
        Self {
            descriptors,
            index,
            engine,
        }
    }

    fn descriptor(&self, name: &str) -> Result<&'a ParameterDescriptor, RenderError> {
        self.index
            .get(name)
            .map(|&position| &self.descriptors[position])
            .ok_or_else(|| RenderError::UnknownItem(name.to_string()))
    }
}

/// Anything that can render itself into the view tree.
pub trait Renderable {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<RenderNode, RenderError>;
}

/// One entry of a layout: either a parameter name (leaf) or a composite
/// arrangement. The closed set of variants replaces any open-ended
/// widget inheritance; dispatch is a plain match.
#[derive(Debug, Clone)]
pub enum LayoutItem {
    Field(String),
    /// Purely visual; no dependency edges.
    Columns(Vec<Vec<LayoutItem>>),
    /// Purely visual grouping; no dependency edges.
    Fieldset {
        legend: String,
        items: Vec<LayoutItem>,
    },
    /// Mutually exclusive named choices, each gating its nested items.
    OptionGroup {
        name: String,
        choices: Vec<OptionChoice>,
    },
    /// Lat/lon bounding-box fields sharing one map-picker container.
    CoordinateBox(Vec<String>),
    /// Lat/lon/radius fields sharing one map-picker container.
    CoordinateRadius(Vec<String>),
}

/// One choice of an option group: its display label and nested items.
#[derive(Debug, Clone)]
pub struct OptionChoice {
    pub label: String,
    pub items: Vec<LayoutItem>,
}

impl OptionChoice {
    pub fn new(label: &str, items: Vec<LayoutItem>) -> Self {
        Self {
            label: label.to_string(),
            items,
        }
    }
}

impl LayoutItem {
    pub fn field(name: &str) -> Self {
        LayoutItem::Field(name.to_string())
    }

    pub fn fieldset(legend: &str, items: Vec<LayoutItem>) -> Self {
        LayoutItem::Fieldset {
            legend: legend.to_string(),
            items,
        }
    }

    pub fn option_group(name: &str, choices: Vec<OptionChoice>) -> Self {
        LayoutItem::OptionGroup {
            name: name.to_string(),
            choices,
        }
    }

    pub fn coordinate_box(names: &[&str]) -> Self {
        LayoutItem::CoordinateBox(names.iter().map(|n| n.to_string()).collect())
    }

    pub fn coordinate_radius(names: &[&str]) -> Self {
        LayoutItem::CoordinateRadius(names.iter().map(|n| n.to_string()).collect())
    }
}

impl Renderable for LayoutItem {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<RenderNode, RenderError> {
        match self {
            LayoutItem::Field(name) => render_field(ctx, name),
            LayoutItem::Columns(columns) => {
                let mut rendered = Vec::new();
                for column in columns {
                    rendered.push(render_items(ctx, column)?);
                }
                Ok(RenderNode::Columns(rendered))
            }
            LayoutItem::Fieldset { legend, items } => Ok(RenderNode::Fieldset {
                legend: legend.clone(),
                items: render_items(ctx, items)?,
            }),
            LayoutItem::OptionGroup { name, choices } => render_option_group(ctx, name, choices),
            LayoutItem::CoordinateBox(names) => Ok(RenderNode::CoordinateGroup {
                shape: CoordinateShape::Box,
                items: render_fields(ctx, names)?,
            }),
            LayoutItem::CoordinateRadius(names) => Ok(RenderNode::CoordinateGroup {
                shape: CoordinateShape::Radius,
                items: render_fields(ctx, names)?,
            }),
        }
    }
}

fn render_items(
    ctx: &mut RenderContext<'_>,
    items: &[LayoutItem],
) -> Result<Vec<RenderNode>, RenderError> {
    items.iter().map(|item| item.render(ctx)).collect()
}

fn render_fields(
    ctx: &mut RenderContext<'_>,
    names: &[String],
) -> Result<Vec<RenderNode>, RenderError> {
    names.iter().map(|name| render_field(ctx, name)).collect()
}

/// Renders one parameter as a labeled row, registering the row container,
/// the optional enabling checkbox, the optional inner wrapper and the
/// control itself. The related-suffix chain between them is wired later
/// by `DependencyEngine::connect_defaults`.
fn render_field(ctx: &mut RenderContext<'_>, name: &str) -> Result<RenderNode, RenderError> {
    let descriptor = ctx.descriptor(name)?;
    debug!("rendering field '{}'", name);

    let row = ctx
        .engine
        .register(FieldNode::new(format!("{name}-row"), FieldKind::Container))?;

    let check = if descriptor.checkbox {
        Some(ctx.engine.register(FieldNode::new(
            format!("{name}-check"),
            FieldKind::Checkbox,
        ))?)
    } else {
        None
    };

    let wrapper = if matches!(descriptor.kind, ValueKind::Date { .. }) {
        Some(ctx.engine.register(FieldNode::new(
            format!("{name}-field"),
            FieldKind::Container,
        ))?)
    } else {
        None
    };

    let (kind, widget, initial, checked) = control_parts(descriptor);
    let control = ctx.engine.register(
        FieldNode::new(name, kind)
            .with_value(&initial)
            .with_checked(checked),
    )?;

    let mut field = RenderNode::Control {
        node: control,
        widget,
    };
    if let Some(node) = wrapper {
        field = RenderNode::Wrapper {
            node,
            inner: Box::new(field),
        };
    }
    if let Some(check) = check {
        field = RenderNode::Gate {
            check,
            inner: Box::new(field),
        };
    }
    Ok(RenderNode::Row {
        node: row,
        name: name.to_string(),
        label: descriptor.label.clone(),
        required: descriptor.required,
        help: descriptor.description.clone(),
        field: Box::new(field),
    })
}

/// Maps a descriptor onto its control node kind, widget, initial value
/// and initial checked state.
fn control_parts(descriptor: &ParameterDescriptor) -> (FieldKind, Widget, String, bool) {
    match &descriptor.kind {
        ValueKind::Flag => {
            let on = descriptor.default_value.as_deref() == Some("true");
            (
                FieldKind::Checkbox,
                Widget::Checkbox,
                "true".to_string(),
                on,
            )
        }
        ValueKind::Choice(values) => {
            // A select always carries a value; default to the declared
            // default, else the first allowed value.
            let initial = descriptor
                .default_value
                .clone()
                .or_else(|| values.first().cloned())
                .unwrap_or_default();
            let options = values
                .iter()
                .map(|value| (value.clone(), descriptor.enum_label(value).to_string()))
                .collect();
            (
                FieldKind::Input,
                Widget::Select { options },
                initial,
                false,
            )
        }
        ValueKind::Date { with_time } => (
            FieldKind::Input,
            Widget::Date {
                with_time: *with_time,
            },
            descriptor.default_value.clone().unwrap_or_default(),
            false,
        ),
        ValueKind::Text | ValueKind::Number => (
            FieldKind::Input,
            Widget::Text {
                size: descriptor.input_size,
            },
            descriptor.default_value.clone().unwrap_or_default(),
            false,
        ),
    }
}

/// Renders an exclusive-choice group. Each choice gets a radio control
/// and a body container; the body depends on the radio, and every
/// control nested under the body depends on the body. Selecting one
/// choice therefore deactivates everything under the others in the same
/// settle cycle.
fn render_option_group(
    ctx: &mut RenderContext<'_>,
    name: &str,
    choices: &[OptionChoice],
) -> Result<RenderNode, RenderError> {
    let mut rendered = Vec::new();
    for (position, choice) in choices.iter().enumerate() {
        let radio = ctx.engine.register(
            FieldNode::new(format!("{name}-{position}"), FieldKind::Radio)
                .with_value(&choice.label)
                .with_group(name),
        )?;
        let body = ctx.engine.register(FieldNode::new(
            format!("{name}-{position}-items"),
            FieldKind::Container,
        ))?;
        let items = render_items(ctx, &choice.items)?;
        ctx.engine.depends_on(body, radio);
        for item in &items {
            for input in item.inputs() {
                ctx.engine.depends_on(input, body);
            }
        }
        rendered.push(ChoiceNode {
            radio,
            label: choice.label.clone(),
            items,
        });
    }
    Ok(RenderNode::OptionGroup {
        name: name.to_string(),
        choices: rendered,
    })
}
