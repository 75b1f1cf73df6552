//! Usage page served when no other route matches.

use std::fmt::Write;

use axum::http::StatusCode;
use axum::response::Response;

use crate::encoding::OutputFormat;
use crate::http::format::default_prefix;
use crate::http::response::{typed, HTML_UTF8};
use crate::sources::SourceCatalog;

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:860px;margin:2rem auto;padding:0 1rem;line-height:1.6}\
code{background:#f3f3f3;padding:2px 6px;border-radius:4px;word-break:break-all}\
table{border-collapse:collapse}td,th{border:1px solid #ddd;padding:4px 10px;text-align:left}";

fn describe(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Raw => "original JSON",
        OutputFormat::Proxy => "JSON with api URLs routed through the proxy",
        OutputFormat::Base58 => "Base58-encoded JSON",
        OutputFormat::ProxyBase58 => "Base58-encoded JSON with proxied api URLs",
    }
}

/// Escape text for inclusion in HTML content or a quoted attribute.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the page body for a service reachable at `origin`.
pub fn page(origin: &str, catalog: &SourceCatalog) -> String {
    let prefix = escape(&default_prefix(origin));
    let origin = escape(origin);
    let mut html = String::new();

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>edge-relay</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>edge-relay</h1>\n\
         <h2>Proxy</h2>\n\
         <p>Append <code>?url=&lt;target&gt;</code> to forward any request:</p>\n\
         <p><code>{prefix}https://example.com/api.php?ac=list</code></p>\n\
         <h2>Configuration</h2>\n\
         <p><code>{origin}/?format=&lt;format&gt;&amp;source=&lt;source&gt;&amp;prefix=&lt;prefix&gt;</code></p>\n\
         <table>\n<tr><th>format</th><th>output</th></tr>\n"
    );
    for format in OutputFormat::ALL {
        let _ = writeln!(
            html,
            "<tr><td><code>{}</code> or <code>{}</code></td><td>{}</td></tr>",
            format.code(),
            format.name(),
            describe(format)
        );
    }
    let _ = write!(html, "</table>\n<table>\n<tr><th>source</th><th>subscription</th></tr>\n");
    for id in catalog.ids() {
        let marker = if id == catalog.default_id() { " (default)" } else { "" };
        let id = escape(id);
        let _ = writeln!(
            html,
            "<tr><td><code>{id}</code>{marker}</td><td><code>{origin}/?format=2&amp;source={id}</code></td></tr>"
        );
    }
    let _ = write!(
        html,
        "</table>\n<p>The default prefix is <code>{prefix}</code>.</p>\n\
         <p>All responses carry permissive CORS headers.</p>\n</body>\n</html>\n"
    );
    html
}

pub fn render(origin: &str, catalog: &SourceCatalog) -> Response {
    typed(StatusCode::OK, HTML_UTF8, page(origin, catalog))
}
