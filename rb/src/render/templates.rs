//! Embedded component templates
//!
//! These are compiled into the binary and used when no override file is
//! found in the configured templates directory. Nested components arrive
//! pre-rendered and are inserted with triple braces.

/// Full landing page
pub const INDEX: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{title}}</title>
</head>
<body>
<main>
<h1>{{heading}}</h1>
<p>{{subheading}}</p>
<section>
<h2>{{items_title}}</h2>
<ul>
{{#each items}}<li>{{this}}</li>
{{/each}}</ul>
</section>
<button hx-get="{{endpoint}}" hx-target="#dynamic">{{button_text}}</button>
<div id="dynamic"></div>
</main>
</body>
</html>
"##;

/// Fragment swapped into the landing page
pub const DYNAMIC_CONTENT: &str = r##"<section class="dynamic">
<h2>{{title}}</h2>
<ul>
{{#each items}}<li>{{this}}</li>
{{/each}}</ul>
<dl>
<dt>RFC 3339</dt><dd>{{rfc3339}}</dd>
<dt>RFC 1123</dt><dd>{{rfc1123}}</dd>
<dt>Kitchen</dt><dd>{{kitchen}}</dd>
</dl>
<button hx-get="{{endpoint}}" hx-target="#dynamic">Refresh</button>
</section>
"##;

/// Home page with a list of links
pub const HOME: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{title}}</title>
</head>
<body>
<h1>{{title}}</h1>
<p>{{intro}}</p>
<nav>
<ul>
{{#each links}}<li>{{{this}}}</li>
{{/each}}</ul>
</nav>
</body>
</html>
"#;

/// Single navigation link
pub const NAV_LINK: &str = r#"<a href="{{href}}">{{label}}</a>"#;

/// KV round-trip result
pub const KV_RESULT: &str = r#"<section class="kv">
<h2>{{title}}</h2>
<p>Previous value: <strong>{{previous}}</strong></p>
<p>New value: <strong>{{current}}</strong></p>
</section>
"#;

/// Names of every embedded template
pub const EMBEDDED_NAMES: &[&str] = &["index", "dynamic_content", "home", "nav_link", "kv_result"];

/// Get the embedded template by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    match name {
        "index" => Some(INDEX),
        "dynamic_content" => Some(DYNAMIC_CONTENT),
        "home" => Some(HOME),
        "nav_link" => Some(NAV_LINK),
        "kv_result" => Some(KV_RESULT),
        _ => None,
    }
}
