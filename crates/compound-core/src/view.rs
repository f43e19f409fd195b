use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::channel::ChannelId;
use crate::props::{PropValue, Props};

pub type ViewId = u64;

pub type RenderFn = Rc<dyn Fn(&Props, &[Node]) -> Node>;

/// A named function from properties and children to a description.
#[derive(Clone)]
pub struct Component {
    name: &'static str,
    render: RenderFn,
}

impl Component {
    pub fn new(name: &'static str, render: impl Fn(&Props, &[Node]) -> Node + 'static) -> Self {
        Self {
            name,
            render: Rc::new(render),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn call(&self, props: &Props, children: &[Node]) -> Node {
        (self.render)(props, children)
    }
}

/// Value a provider establishes for its subtree.
#[derive(Clone)]
pub struct Provision {
    pub channel: ChannelId,
    pub value: Rc<dyn Any>,
}

#[derive(Clone)]
pub enum ElementKind {
    /// Rendered as-is into the host tree (containers, the switch leaf, ...).
    Host(&'static str),
    Component(Component),
    Provider(Provision),
    /// Resolves its channel at render time and renders the result.
    Consumer(Rc<dyn Fn() -> Node>),
}

impl fmt::Debug for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Host(tag) => f.debug_tuple("Host").field(tag).finish(),
            ElementKind::Component(c) => f.debug_tuple("Component").field(&c.name).finish(),
            ElementKind::Provider(p) => f
                .debug_struct("Provider")
                .field("channel", &p.channel)
                .finish(),
            ElementKind::Consumer(_) => write!(f, "Consumer"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Element {
    pub kind: ElementKind,
    pub props: Props,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Element {
            kind,
            props: Props::default(),
            children: vec![],
        }
    }
    pub fn host(tag: &'static str) -> Self {
        Self::new(ElementKind::Host(tag))
    }
    pub fn component(component: Component) -> Self {
        Self::new(ElementKind::Component(component))
    }
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.set(key, value);
        self
    }
    pub fn with_children(mut self, kids: Vec<Node>) -> Self {
        self.children = kids;
        self
    }
    pub fn child(mut self, kid: impl Into<Node>) -> Self {
        self.children.push(kid.into());
        self
    }

    /// Copy of this element with `overrides` merged over its properties.
    /// Children are carried over untouched.
    pub fn clone_with(&self, overrides: &Props) -> Element {
        Element {
            kind: self.kind.clone(),
            props: self.props.clone().merged(overrides),
            children: self.children.clone(),
        }
    }

    pub fn name(&self) -> &'static str {
        match &self.kind {
            ElementKind::Host(tag) => *tag,
            ElementKind::Component(c) => c.name,
            ElementKind::Provider(_) => "Provider",
            ElementKind::Consumer(_) => "Consumer",
        }
    }
}

/// Tree description produced by components.
#[derive(Clone, Debug, Default)]
pub enum Node {
    #[default]
    Empty,
    Text(String),
    Element(Element),
    Fragment(Vec<Node>),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }
    pub fn fragment(nodes: Vec<Node>) -> Self {
        Node::Fragment(nodes)
    }
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

impl From<Vec<Node>> for Node {
    fn from(nodes: Vec<Node>) -> Self {
        Node::Fragment(nodes)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewKind {
    Text(String),
    Host(&'static str),
}

/// Rendered host tree node.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub props: Props,
    pub children: Vec<View>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            props: Props::default(),
            children: vec![],
        }
    }

    pub fn tag(&self) -> Option<&'static str> {
        match self.kind {
            ViewKind::Host(tag) => Some(tag),
            ViewKind::Text(_) => None,
        }
    }

    /// All text in this subtree, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let ViewKind::Text(t) = &self.kind {
            out.push_str(t);
        }
        for c in &self.children {
            c.collect_text(out);
        }
    }

    pub fn find(&self, tag: &str) -> Option<&View> {
        if self.tag() == Some(tag) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(tag))
    }

    pub fn find_all<'a>(&'a self, tag: &str, out: &mut Vec<&'a View>) {
        if self.tag() == Some(tag) {
            out.push(self);
        }
        for c in &self.children {
            c.find_all(tag, out);
        }
    }

    /// Invokes this view's `on_click` handler. Returns whether one was set.
    pub fn click(&self) -> bool {
        match self.props.callback("on_click") {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }
}
