//! The form controller: ties the schema model, the layout, the engine
//! and the serializer into one independently lifetimed object.

use std::fmt::Write as _;

use ahash::AHashMap;
use log::{debug, info};

use crate::engine::{DependencyEngine, FieldGraph, NodeId, Settlement};
use crate::error::{BuildError, FetchError, RenderError};
use crate::layout::{LayoutItem, RenderContext, RenderNode, Renderable, TextPreview};
use crate::query::{QueryPair, QuerySerializer};
use crate::schema::{ParameterDescriptor, ParameterOverrides, SchemaModel, ServiceInfo};

/// Options controlling how a form is generated from a schema document.
/// Built in the usual chained style and consumed by `Form::from_document`.
#[derive(Debug, Clone)]
pub struct FormOptions {
    path: String,
    method: String,
    parameters: AHashMap<String, ParameterOverrides>,
    layout: Option<Vec<LayoutItem>>,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            path: "/query".to_string(),
            method: "get".to_string(),
            parameters: AHashMap::new(),
            layout: None,
        }
    }
}

impl FormOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document path to generate a form for.
    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Method (eg. "get" or "post") to generate a form for.
    pub fn method(mut self, method: &str) -> Self {
        self.method = method.to_string();
        self
    }

    /// Per-parameter presentation overrides, keyed by parameter name.
    pub fn parameter(mut self, name: &str, overrides: ParameterOverrides) -> Self {
        self.parameters.insert(name.to_string(), overrides);
        self
    }

    /// Explicit on-screen arrangement. Without one, the declared
    /// parameter order is rendered as a flat list.
    pub fn layout(mut self, items: Vec<LayoutItem>) -> Self {
        self.layout = Some(items);
        self
    }
}

/// An interactive query form bound to one operation of one service.
/// Each form owns its engine outright; any number of forms can coexist
/// in a process.
pub struct Form {
    service: ServiceInfo,
    descriptors: Vec<ParameterDescriptor>,
    engine: DependencyEngine,
    tree: Vec<RenderNode>,
    pairs: Vec<QueryPair>,
    url: String,
}

impl Form {
    /// Builds a form from an already fetched schema document. The
    /// pipeline is strictly sequential (parse, render, wire, settle)
    /// and any failure is terminal for the form: either the whole form
    /// builds or none of it does.
    pub fn from_document(document_json: &str, options: FormOptions) -> Result<Self, BuildError> {
        let (service, descriptors) = SchemaModel::parse(
            document_json,
            &options.path,
            &options.method,
            &options.parameters,
        )?;
        info!(
            "building form for {} ({} query parameters)",
            service.path,
            descriptors.len()
        );

        let items = options.layout.unwrap_or_else(|| {
            descriptors
                .iter()
                .map(|descriptor| LayoutItem::Field(descriptor.name.clone()))
                .collect()
        });

        let index: AHashMap<String, usize> = descriptors
            .iter()
            .enumerate()
            .map(|(position, descriptor)| (descriptor.name.clone(), position))
            .collect();

        let mut engine = DependencyEngine::new();
        let mut ctx = RenderContext::new(&descriptors, &index, &mut engine);
        let tree = items
            .iter()
            .map(|item| item.render(&mut ctx))
            .collect::<Result<Vec<_>, RenderError>>()?;

        engine.connect_defaults();

        let mut form = Self {
            service,
            descriptors,
            engine,
            tree,
            pairs: Vec::new(),
            url: String::new(),
        };
        // Once everything is wired, trigger every element once so the
        // whole graph reaches a consistent state and the first URL is
        // computed.
        for id in form.engine.graph().ids() {
            form.engine.notify_changed(id);
        }
        form.settle();
        Ok(form)
    }

    /// Runs the whole load-parse-render sequence for hosts that model
    /// the schema fetch as a fallible step. Fetch, parse and render
    /// failures all short-circuit into the same terminal error.
    pub fn run<F>(fetch: F, options: FormOptions) -> Result<Self, BuildError>
    where
        F: FnOnce() -> Result<String, FetchError>,
    {
        let document = fetch()?;
        Self::from_document(&document, options)
    }

    /// The single user-visible error line for a failed build.
    pub fn error_banner(error: &BuildError) -> String {
        format!("Failure: {error}")
    }

    pub fn service(&self) -> &ServiceInfo {
        &self.service
    }

    pub fn descriptors(&self) -> &[ParameterDescriptor] {
        &self.descriptors
    }

    pub fn engine(&self) -> &DependencyEngine {
        &self.engine
    }

    pub fn tree(&self) -> &[RenderNode] {
        &self.tree
    }

    fn node(&self, id: &str) -> Result<NodeId, RenderError> {
        self.engine
            .lookup(id)
            .ok_or_else(|| RenderError::UnknownItem(id.to_string()))
    }

    /// Records a raw edit of a value control. Resolved at the next
    /// `settle` call.
    pub fn set_value(&mut self, id: &str, value: &str) -> Result<(), RenderError> {
        let node = self.node(id)?;
        self.engine.set_value(node, value);
        Ok(())
    }

    /// Records a checkbox toggle.
    pub fn set_checked(&mut self, id: &str, checked: bool) -> Result<(), RenderError> {
        let node = self.node(id)?;
        self.engine.set_checked(node, checked);
        Ok(())
    }

    /// Selects one option of an exclusive-choice group by its label.
    /// Returns false when the group has no such option.
    pub fn select_option(&mut self, group: &str, label: &str) -> bool {
        self.engine.select_radio(group, label)
    }

    /// Post-build wiring: `target` is active only while `source` is.
    pub fn depends_on(&mut self, target: &str, source: &str) -> Result<(), RenderError> {
        let (target, source) = (self.node(target)?, self.node(source)?);
        self.engine.depends_on(target, source);
        self.engine.notify_changed(target);
        Ok(())
    }

    /// Post-build wiring: `target` is active only while `source` is
    /// *inactive* (mutual exclusion).
    pub fn depends_on_not(&mut self, target: &str, source: &str) -> Result<(), RenderError> {
        let (target, source) = (self.node(target)?, self.node(source)?);
        self.engine.depends_on_not(target, source);
        self.engine.notify_changed(target);
        Ok(())
    }

    /// Post-build wiring: an arbitrary condition against the graph.
    pub fn add_predicate<F>(&mut self, id: &str, check: F) -> Result<(), RenderError>
    where
        F: Fn(&FieldGraph) -> bool + 'static,
    {
        let node = self.node(id)?;
        self.engine.add_predicate(node, check);
        self.engine.notify_changed(node);
        Ok(())
    }

    /// Runs one settle cycle over everything queued since the last one,
    /// then refreshes the serialized query exactly once.
    pub fn settle(&mut self) -> Settlement {
        let settlement = self.engine.settle();
        self.pairs = QuerySerializer::serialize(&self.descriptors, &self.engine);
        self.url = QuerySerializer::full_url(&self.service.action(), &self.pairs);
        debug!("url refreshed: {}", self.url);
        settlement
    }

    /// The current active key/value pairs, in declared parameter order.
    pub fn query_pairs(&self) -> &[QueryPair] {
        &self.pairs
    }

    /// The clickable link recomputed after the last settle cycle.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The text rendering of the form surface against live state.
    pub fn render_text(&self) -> String {
        TextPreview {
            tree: &self.tree,
            engine: &self.engine,
        }
        .to_text()
    }

    /// One usage line per parameter, in declared order: the label and
    /// whatever help text the schema or the overrides supplied.
    pub fn usage_text(&self) -> String {
        let mut out = String::new();
        for descriptor in &self.descriptors {
            let _ = writeln!(
                out,
                "{}: {}",
                descriptor.label,
                descriptor.description.as_deref().unwrap_or("")
            );
        }
        out
    }
}
