//! Server-rendered HTML pages.

mod pages;

pub use pages::{DashboardView, dashboard_page, session_page, sessions_page};

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
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

const STYLE: &str = "
body { font-family: system-ui, sans-serif; margin: 0; background: #faf7f2; color: #222; }
header { background: #3b2f2f; color: #fff; padding: 1rem 2rem; }
header a { color: #ffd9a0; margin-right: 1rem; }
main { padding: 1rem 2rem; }
.banner { background: #fde2e1; border: 1px solid #e0a3a0; padding: .75rem 1rem; margin-bottom: 1rem; }
.stats { display: flex; gap: 2rem; flex-wrap: wrap; }
.stats section { background: #fff; padding: 1rem; border-radius: 6px; min-width: 12rem; }
.cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); gap: 1rem; }
.card { background: #fff; border-radius: 6px; overflow: hidden; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.card img { width: 100%; height: 10rem; object-fit: cover; background: #eee; }
.card .body { padding: .75rem; }
.gallery img { max-width: 20rem; margin: .25rem; border-radius: 4px; }
table { border-collapse: collapse; background: #fff; }
td, th { border: 1px solid #ddd; padding: .25rem .5rem; text-align: left; }
";

pub(crate) fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header><h1>Cooking Monitor</h1><nav><a href=\"/dashboard\">Dashboard</a>\
         <a href=\"/sessions\">Sessions</a></nav></header>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}
