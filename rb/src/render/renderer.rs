//! Template renderer
//!
//! Turns a [`Component`] into HTML text using Handlebars in strict mode:
//! a missing parameter is a fault, not an empty string.

use std::path::Path;

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::component::{Component, Param};

use super::{RenderContext, RenderFault, templates};

/// Anything that can render a component
///
/// The bridge only depends on this contract; it never retries a render
/// and never looks at a fault beyond its message.
pub trait Renderer: Send + Sync {
    fn render(&self, component: &Component, ctx: &RenderContext) -> Result<String, RenderFault>;
}

/// Handlebars-backed renderer with one template per component name
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a renderer that only uses embedded templates
    pub fn embedded_only() -> Result<Self> {
        Self::new(None)
    }

    /// Create a renderer, preferring `<dir>/<name>.hbs` over embedded templates
    ///
    /// Any extra `.hbs` files in `dir` are registered as additional
    /// components.
    pub fn new(templates_dir: Option<&Path>) -> Result<Self> {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);

        for name in templates::EMBEDDED_NAMES {
            let source = match templates_dir.map(|d| d.join(format!("{}.hbs", name))) {
                Some(path) if path.exists() => {
                    debug!("Loading template override: {:?}", path);
                    std::fs::read_to_string(&path)
                        .map_err(|e| eyre!("Failed to read template {}: {}", path.display(), e))?
                }
                _ => templates::get_embedded(name)
                    .ok_or_else(|| eyre!("Embedded template missing: {}", name))?
                    .to_string(),
            };
            hbs.register_template_string(name, source)
                .map_err(|e| eyre!("Failed to compile template {}: {}", name, e))?;
        }

        if let Some(dir) = templates_dir
            && dir.is_dir()
        {
            for entry in std::fs::read_dir(dir)? {
                let path = entry?.path();
                let Some(name) = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .filter(|_| path.extension().is_some_and(|e| e == "hbs"))
                else {
                    continue;
                };
                if hbs.has_template(name) {
                    continue;
                }
                debug!("Registering extra template: {:?}", path);
                hbs.register_template_file(name, &path)
                    .map_err(|e| eyre!("Failed to compile template {}: {}", path.display(), e))?;
            }
        }

        info!(templates = hbs.get_templates().len(), "Template renderer ready");
        Ok(Self { hbs })
    }

    /// Whether a template exists for the component name
    pub fn has_template(&self, name: &str) -> bool {
        self.hbs.has_template(name)
    }

    fn render_at(&self, component: &Component, ctx: &RenderContext, depth: usize) -> Result<String, RenderFault> {
        if ctx.is_cancelled() {
            return Err(RenderFault::cancelled());
        }
        if depth > ctx.max_depth() {
            return Err(RenderFault::too_deep(ctx.max_depth()));
        }
        if !self.hbs.has_template(component.name()) {
            return Err(RenderFault::template_not_found(component.name()));
        }

        let mut data = Map::new();
        for (key, param) in component.params() {
            let value = match param {
                Param::Text(s) => Value::String(s.clone()),
                Param::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
                Param::Child(child) => Value::String(self.render_at(child, ctx, depth + 1)?),
                Param::Children(children) => Value::Array(
                    children
                        .iter()
                        .map(|c| self.render_at(c, ctx, depth + 1).map(Value::String))
                        .collect::<Result<_, _>>()?,
                ),
            };
            data.insert(key.to_string(), value);
        }

        Ok(self.hbs.render(component.name(), &Value::Object(data))?)
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, component: &Component, ctx: &RenderContext) -> Result<String, RenderFault> {
        debug!(component = %component.name(), "TemplateRenderer::render: called");
        self.render_at(component, ctx, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn link(href: &str, label: &str) -> Component {
        Component::new("nav_link").text("href", href).text("label", label)
    }

    #[test]
    fn test_embedded_templates_compile() {
        let renderer = TemplateRenderer::embedded_only().unwrap();
        for name in templates::EMBEDDED_NAMES {
            assert!(renderer.has_template(name));
        }
    }

    #[test]
    fn test_render_escapes_text() {
        let renderer = TemplateRenderer::embedded_only().unwrap();
        let html = renderer
            .render(&link("/", "<b>Home</b>"), &RenderContext::new())
            .unwrap();
        assert!(html.contains("&lt;b&gt;Home&lt;/b&gt;"));
    }

    #[test]
    fn test_nested_children_rendered_in_order() {
        let renderer = TemplateRenderer::embedded_only().unwrap();
        let home = Component::new("home")
            .text("title", "Home")
            .text("intro", "Pick one")
            .children("links", vec![link("/a", "First"), link("/b", "Second")]);

        let html = renderer.render(&home, &RenderContext::new()).unwrap();
        let first = html.find(r#"<a href="/a">First</a>"#).unwrap();
        let second = html.find(r#"<a href="/b">Second</a>"#).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_missing_param_is_fault() {
        let renderer = TemplateRenderer::embedded_only().unwrap();
        let result = renderer.render(&Component::new("nav_link").text("href", "/"), &RenderContext::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_component_is_fault() {
        let renderer = TemplateRenderer::embedded_only().unwrap();
        let fault = renderer
            .render(&Component::new("does_not_exist"), &RenderContext::new())
            .unwrap_err();
        assert!(fault.message().contains("does_not_exist"));
    }

    #[test]
    fn test_cancelled_context_is_fault() {
        let renderer = TemplateRenderer::embedded_only().unwrap();
        let ctx = RenderContext::new();
        ctx.cancel_token().cancel();
        let fault = renderer.render(&link("/", "x"), &ctx).unwrap_err();
        assert_eq!(fault, RenderFault::cancelled());
    }

    #[test]
    fn test_depth_limit() {
        let renderer = TemplateRenderer::embedded_only().unwrap();
        let page = Component::new("home")
            .text("title", "t")
            .text("intro", "i")
            .children("links", vec![link("/", "x")]);

        let ctx = RenderContext::new().with_max_depth(0);
        let fault = renderer.render(&page, &ctx).unwrap_err();
        assert_eq!(fault, RenderFault::too_deep(0));

        let ctx = RenderContext::new().with_max_depth(1);
        assert!(renderer.render(&page, &ctx).is_ok());
    }

    #[test]
    fn test_override_and_extra_templates() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("nav_link.hbs"), "[{{label}}]({{href}})").unwrap();
        std::fs::write(temp.path().join("banner.hbs"), "<p>{{text}}</p>").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let renderer = TemplateRenderer::new(Some(temp.path())).unwrap();
        let ctx = RenderContext::new();

        assert_eq!(renderer.render(&link("/x", "X"), &ctx).unwrap(), "[X](/x)");
        assert_eq!(
            renderer
                .render(&Component::new("banner").text("text", "hi"), &ctx)
                .unwrap(),
            "<p>hi</p>"
        );
        assert!(!renderer.has_template("notes"));
    }

    #[test]
    fn test_broken_override_fails_construction() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("index.hbs"), "{{#each items}}unterminated").unwrap();
        assert!(TemplateRenderer::new(Some(temp.path())).is_err());
    }
}
