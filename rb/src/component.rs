//! Component descriptions handed to the template renderer
//!
//! A [`Component`] is a plain value: a template name plus named
//! parameters. It is built fresh for every call and never mutated after
//! construction.

use std::collections::BTreeMap;

/// A single component parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// A scalar string
    Text(String),
    /// An ordered sequence of strings
    List(Vec<String>),
    /// A nested component, rendered before its parent
    Child(Component),
    /// An ordered sequence of nested components
    Children(Vec<Component>),
}

/// Immutable description of renderable content
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    name: String,
    params: BTreeMap<String, Param>,
}

impl Component {
    /// Start a component for the template `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add a string parameter
    pub fn text(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(key, Param::Text(value.into()))
    }

    /// Add a string sequence parameter
    pub fn list<I, S>(self, key: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(key, Param::List(items.into_iter().map(Into::into).collect()))
    }

    /// Add a nested component parameter
    pub fn child(self, key: impl Into<String>, child: Component) -> Self {
        self.with(key, Param::Child(child))
    }

    /// Add a sequence of nested components
    pub fn children(self, key: impl Into<String>, children: Vec<Component>) -> Self {
        self.with(key, Param::Children(children))
    }

    fn with(mut self, key: impl Into<String>, param: Param) -> Self {
        self.params.insert(key.into(), param);
        self
    }

    /// Template name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a parameter
    pub fn param(&self, key: &str) -> Option<&Param> {
        self.params.get(key)
    }

    /// All parameters in key order
    pub fn params(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }
}
