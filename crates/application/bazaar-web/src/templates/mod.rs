//! HTML templates
//!
//! Plain `format!` rendering with HTMX attributes for the interactive bits
//! (favorite buttons, suggestion panel, photo gallery).

pub mod catalog;
pub mod favorites;
pub mod sell;

pub use catalog::not_found_html;

use bazaar_core::format_grouped;

/// CSS styles
pub const STYLE_CSS: &str = r#"
:root {
    --bg: #f7f8fa;
    --panel: #ffffff;
    --accent: #0f766e;
    --accent-dim: #115e59;
    --text: #1f2933;
    --muted: #6b7280;
    --border: #e5e7eb;
    --danger: #dc2626;
    --fav: #e11d48;
}

* { margin: 0; padding: 0; box-sizing: border-box; }

body {
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    background: var(--bg);
    color: var(--text);
    line-height: 1.5;
}

a { color: var(--accent); text-decoration: none; }

/* Header */
.header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 12px 24px;
    background: var(--panel);
    border-bottom: 1px solid var(--border);
}
.logo { font-weight: 700; font-size: 1.3rem; color: var(--accent); }
.nav a { margin-left: 18px; font-weight: 500; }
.nav .sell { background: var(--accent); color: #fff; padding: 6px 14px; border-radius: 18px; }

main { max-width: 1180px; margin: 0 auto; padding: 24px; }

/* Browse */
.browse { display: grid; grid-template-columns: 220px 1fr; gap: 24px; }
.filters { background: var(--panel); border: 1px solid var(--border); border-radius: 8px; padding: 16px; }
.filters h3 { font-size: 0.95rem; margin-bottom: 8px; }
.filters a { display: block; padding: 4px 8px; border-radius: 4px; color: var(--text); }
.filters a.active { background: var(--accent); color: #fff; }
.search { display: flex; gap: 8px; margin-bottom: 16px; }
.search input { flex: 1; }

.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 16px; }
.card { background: var(--panel); border: 1px solid var(--border); border-radius: 8px; overflow: hidden; position: relative; }
.card img { width: 100%; height: 160px; object-fit: cover; background: var(--border); }
.card-body { padding: 10px 12px; }
.card .price { font-weight: 700; font-size: 1.1rem; }
.card .title { color: var(--text); }
.card .meta { color: var(--muted); font-size: 0.85rem; }

.fav-btn {
    position: absolute; top: 8px; right: 8px;
    border: none; border-radius: 50%; width: 32px; height: 32px;
    background: #fff; cursor: pointer; font-size: 1rem; color: var(--muted);
}
.fav-btn.on { color: var(--fav); }
.fav-btn.pending { opacity: 0.4; cursor: wait; }

.empty { text-align: center; color: var(--muted); padding: 48px 0; }

/* Detail */
.detail { display: grid; grid-template-columns: 3fr 2fr; gap: 24px; }
.detail img { width: 100%; border-radius: 8px; }
.thumbs { display: flex; gap: 8px; margin-top: 8px; }
.thumbs img { width: 72px; height: 54px; object-fit: cover; }
.panel { background: var(--panel); border: 1px solid var(--border); border-radius: 8px; padding: 16px; margin-bottom: 16px; }
.keywords span { display: inline-block; background: var(--bg); border: 1px solid var(--border); border-radius: 12px; padding: 2px 10px; margin: 2px; font-size: 0.85rem; }

/* Sell */
.steps { list-style: none; }
.steps li a { display: flex; justify-content: space-between; padding: 12px 16px; border-bottom: 1px solid var(--border); color: var(--text); }
.steps li a:hover { background: var(--bg); }
.crumbs { color: var(--muted); margin-bottom: 12px; }

form .field { margin-bottom: 14px; }
form label { display: block; font-weight: 500; margin-bottom: 4px; }
form .req { color: var(--danger); }
input, select, textarea {
    width: 100%; padding: 8px 10px; border: 1px solid var(--border);
    border-radius: 6px; font: inherit; background: #fff;
}
textarea { min-height: 110px; }
.counter { color: var(--muted); font-size: 0.8rem; text-align: right; }
.error { color: var(--danger); font-size: 0.85rem; }
.prefix { display: flex; align-items: center; gap: 6px; }

button, .btn {
    background: var(--accent); color: #fff; border: none; border-radius: 6px;
    padding: 8px 16px; font: inherit; cursor: pointer;
}
button:disabled { background: var(--muted); cursor: not-allowed; }
button.secondary { background: var(--panel); color: var(--accent); border: 1px solid var(--accent); }

.gallery { display: grid; grid-template-columns: repeat(auto-fill, minmax(110px, 1fr)); gap: 8px; }
.gallery .photo { position: relative; border: 2px solid var(--border); border-radius: 6px; overflow: hidden; }
.gallery .photo.cover { border-color: var(--accent); }
.gallery .photo img { width: 100%; height: 80px; object-fit: cover; }
.gallery .photo .tag { position: absolute; top: 4px; left: 4px; background: var(--accent); color: #fff; font-size: 0.7rem; padding: 1px 6px; border-radius: 8px; }
.gallery .photo .actions { display: flex; justify-content: space-between; padding: 2px 4px; }
.gallery .photo .actions button { padding: 2px 6px; font-size: 0.75rem; }

.notice { border: 1px solid var(--danger); background: #fef2f2; border-radius: 6px; padding: 10px 12px; margin: 8px 0; }
.notice strong { display: block; }
.suggestions button { margin: 2px; background: var(--bg); color: var(--accent); border: 1px solid var(--accent); border-radius: 14px; padding: 2px 10px; }

.success { text-align: center; padding: 48px 0; }
.success h1 { color: var(--accent); margin-bottom: 8px; }

@media (max-width: 760px) {
    .browse, .detail { grid-template-columns: 1fr; }
}
"#;

/// Wrap body HTML in the page shell
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Bazaar</title>
    <link rel="stylesheet" href="/static/style.css">
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
</head>
<body>
    <header class="header">
        <a href="/" class="logo">Bazaar</a>
        <nav class="nav">
            <a href="/">Browse</a>
            <a href="/favorites">Favorites</a>
            <a href="/sell" class="sell">+ Sell</a>
        </nav>
    </header>
    <main id="main">
{body}
    </main>
</body>
</html>"#,
        title = html_escape(title),
        body = body
    )
}

/// "₹1,40,000"
pub fn format_price(value: u64) -> String {
    format!("₹{}", format_grouped(value))
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Percent-encode a value for use inside an href query string
pub fn query_escape(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(140000), "₹1,40,000");
    }

    #[test]
    fn test_query_escape() {
        assert_eq!(query_escape("Books, Sports & Hobbies"), "Books%2C+Sports+%26+Hobbies");
    }
}
