//! Output tree produced by `render`
//!
//! A [`Node`] is either an element (tag, attributes, children) or a text
//! leaf. Trees are replaced wholesale on every render and never diffed.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Callable attribute value (click handlers and the like)
///
/// Equality is identity: two handlers are equal only if they share the
/// same underlying closure.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn()>);

impl Handler {
    /// Wrap a closure
    pub fn new<F: Fn() + 'static>(f: F) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the handler
    pub fn call(&self) {
        (self.0)()
    }

    /// Whether both handlers point at the same closure
    pub fn ptr_eq(&self, other: &Handler) -> bool {
        Rc::as_ptr(&self.0) as *const () == Rc::as_ptr(&other.0) as *const ()
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// Attribute value on an element
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Handler(Handler),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_handler(&self) -> Option<&Handler> {
        match self {
            AttrValue::Handler(h) => Some(h),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(v as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<Handler> for AttrValue {
    fn from(h: Handler) -> Self {
        AttrValue::Handler(h)
    }
}

/// Element node
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Tag or type name
    pub tag: String,
    /// Attributes, ordered by key
    pub attributes: BTreeMap<String, AttrValue>,
    /// Child nodes in order
    pub children: Vec<Node>,
}

/// A node of the output tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// Create an empty element
    pub fn element(tag: impl Into<String>) -> Self {
        Node::Element(Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        })
    }

    /// Create a text leaf
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Set an attribute (ignored on text nodes)
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        if let Node::Element(element) = &mut self {
            element.attributes.insert(key.into(), value.into());
        }
        self
    }

    /// Append a child (ignored on text nodes)
    pub fn child(mut self, child: Node) -> Self {
        if let Node::Element(element) = &mut self {
            element.children.push(child);
        }
        self
    }

    /// Append a text child
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.child(Node::text(text))
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element(element) => Some(&element.tag),
            Node::Text(_) => None,
        }
    }

    pub fn get_attr(&self, key: &str) -> Option<&AttrValue> {
        match self {
            Node::Element(element) => element.attributes.get(key),
            Node::Text(_) => None,
        }
    }

    /// Handler stored under `key`, if any
    pub fn handler(&self, key: &str) -> Option<&Handler> {
        self.get_attr(key).and_then(AttrValue::as_handler)
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}
