//! The host-visible exports
//!
//! | Name                   | Kind  | Arguments        |
//! |------------------------|-------|------------------|
//! | `renderIndex`          | sync  | `title?: string` |
//! | `renderDynamicContent` | sync  | none             |
//! | `renderHome`           | sync  | none             |
//! | `renderKV`             | async | none             |

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use kvstore::KvStore;
use tokio::runtime::Handle;
use tracing::debug;

use crate::bridge::{AsyncExport, BridgeError, ExportRegistry, PromiseBridge, SyncCallAdapter};
use crate::clock::Clock;
use crate::component::Component;
use crate::host::{HostValue, string_arg};
use crate::render::{DEFAULT_MAX_DEPTH, RenderContext, Renderer};

pub const RENDER_INDEX: &str = "renderIndex";
pub const RENDER_DYNAMIC_CONTENT: &str = "renderDynamicContent";
pub const RENDER_HOME: &str = "renderHome";
pub const RENDER_KV: &str = "renderKV";

pub const DEFAULT_TITLE: &str = "Cloudflare Worker + Rust + Handlebars";
pub const DEFAULT_VISIT_KEY: &str = "last_visit";

/// Shown instead of an empty stored value
///
/// A key that was never written and a key holding "" read the same, so
/// this appears in both cases.
pub const EMPTY_PLACEHOLDER: &str = "(empty — first run?)";

const DYNAMIC_ENDPOINT: &str = "/dynamic";

/// Tunables for the standard exports
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub default_title: String,
    pub visit_key: String,
    pub max_depth: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            visit_key: DEFAULT_VISIT_KEY.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Collaborators shared by the standard exports
#[derive(Clone)]
pub struct ExportDeps {
    pub renderer: Arc<dyn Renderer>,
    pub clock: Arc<dyn Clock>,
    pub store: Arc<dyn KvStore>,
    pub settings: ExportSettings,
}

pub fn index_component(title: &str) -> Component {
    Component::new("index")
        .text("title", title)
        .text("heading", "Welcome to Cloudflare Workers")
        .text("subheading", "Powered by Rust, WebAssembly, and Handlebars")
        .text("items_title", "Static Items")
        .list("items", ["Fast", "Secure", "Scalable", "Rust-powered"])
        .text("button_text", "Load Dynamic Content")
        .text("endpoint", DYNAMIC_ENDPOINT)
}

/// Page fragment stamped with one observation instant
///
/// The three timestamps and the nonce all derive from `now`.
pub fn dynamic_content_component(now: DateTime<Utc>) -> Component {
    let nonce = now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp());
    Component::new("dynamic_content")
        .text("title", "Dynamic Data")
        .list(
            "items",
            [
                format!("Item generated at {}", now.format("%H:%M:%S")),
                "Another dynamic item".to_string(),
                format!("Random Value: {}", nonce),
            ],
        )
        .text("rfc3339", now.to_rfc3339_opts(SecondsFormat::Secs, true))
        .text("rfc1123", rfc1123(now))
        .text("kitchen", kitchen(now))
        .text("endpoint", DYNAMIC_ENDPOINT)
}

pub fn home_component() -> Component {
    let link = |href: &str, label: &str| Component::new("nav_link").text("href", href).text("label", label);
    Component::new("home")
        .text("title", "Home")
        .text("intro", "Pages rendered inside the guest module.")
        .children(
            "links",
            vec![
                link("/", "Index"),
                link(DYNAMIC_ENDPOINT, "Dynamic content"),
                link("/kv", "KV round-trip"),
            ],
        )
}

pub fn kv_result_component(previous: &str, current: &str) -> Component {
    Component::new("kv_result")
        .text("title", "KV Store")
        .text("previous", previous)
        .text("current", current)
}

pub fn rfc1123(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S %Z").to_string()
}

pub fn kitchen(now: DateTime<Utc>) -> String {
    now.format("%-I:%M%p").to_string()
}

/// Value written on each KV visit
pub fn visit_value(now: DateTime<Utc>) -> String {
    format!("Visited at {}", now.format("%Y-%m-%d %H:%M:%S UTC"))
}

/// Reads the previous visit, records a new one, renders both
pub struct RenderKv {
    store: Arc<dyn KvStore>,
    renderer: Arc<dyn Renderer>,
    clock: Arc<dyn Clock>,
    key: String,
    max_depth: usize,
}

impl RenderKv {
    pub fn new(deps: &ExportDeps) -> Self {
        Self {
            store: Arc::clone(&deps.store),
            renderer: Arc::clone(&deps.renderer),
            clock: Arc::clone(&deps.clock),
            key: deps.settings.visit_key.clone(),
            max_depth: deps.settings.max_depth,
        }
    }
}

#[async_trait]
impl AsyncExport for RenderKv {
    async fn run(&self, _args: Vec<HostValue>) -> Result<String, BridgeError> {
        debug!(key = %self.key, "RenderKv::run: called");
        let previous = self.store.get(&self.key).await.map_err(BridgeError::KvGet)?;
        let shown = if previous.is_empty() {
            EMPTY_PLACEHOLDER.to_string()
        } else {
            previous
        };

        let current = visit_value(self.clock.now());
        self.store
            .set(&self.key, &current)
            .await
            .map_err(BridgeError::KvSet)?;

        let ctx = RenderContext::new().with_max_depth(self.max_depth);
        self.renderer
            .render(&kv_result_component(&shown, &current), &ctx)
            .map_err(|source| BridgeError::Render {
                what: "KV fragment",
                source,
            })
    }
}

/// Registry with the four standard exports installed
pub fn standard_registry(deps: ExportDeps, runtime: Handle) -> ExportRegistry {
    let max_depth = deps.settings.max_depth;
    let mut builder = ExportRegistry::builder();

    let default_title = deps.settings.default_title.clone();
    builder.install_sync(
        RENDER_INDEX,
        SyncCallAdapter::new(RENDER_INDEX, Arc::clone(&deps.renderer), move |args: &[HostValue]| {
            index_component(string_arg(args, 0).unwrap_or(&default_title))
        })
        .with_max_depth(max_depth),
    );

    let clock = Arc::clone(&deps.clock);
    builder.install_sync(
        RENDER_DYNAMIC_CONTENT,
        SyncCallAdapter::new(
            RENDER_DYNAMIC_CONTENT,
            Arc::clone(&deps.renderer),
            move |_args: &[HostValue]| dynamic_content_component(clock.now()),
        )
        .with_max_depth(max_depth),
    );

    builder.install_sync(
        RENDER_HOME,
        SyncCallAdapter::new(RENDER_HOME, Arc::clone(&deps.renderer), |_args: &[HostValue]| {
            home_component()
        })
        .with_max_depth(max_depth),
    );

    builder.install_async(PromiseBridge::new(RENDER_KV, Arc::new(RenderKv::new(&deps)), runtime));

    builder.build()
}
