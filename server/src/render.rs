//! String-built HTML for the explorer page. All record fields pass through
//! `escape` before landing in markup.

use crate::IndexParams;
use wine_core::query::QueryPage;
use wine_core::WineRecord;
use url::form_urlencoded;

const VARIETY_OPTIONS: &[&str] = &[
    "Cabernet Sauvignon",
    "Merlot",
    "Pinot Noir",
    "Syrah",
    "Chardonnay",
    "Sauvignon Blanc",
    "Riesling",
    "Pinot Grigio",
    "Zinfandel",
    "Malbec",
    "Sparkling",
];

const STYLE: &str = r#"
:root { --bg:#f7f4ef; --card:#fff8f6; --muted:#7c7171; --accent:#943232; --accent2:#5a2130; --divider:#eddad5; }
* { box-sizing:border-box; }
body { margin:0; min-height:100vh; font-family:ui-sans-serif,system-ui,-apple-system,"Segoe UI",Roboto,Arial; background:var(--bg); color:#24110a; }
h1 { color:var(--accent2); font-size:2.1rem; margin:32px 0 8px 0; text-align:center; }
.sub { color:var(--muted); text-align:center; margin-bottom:18px; }
form.search-form { background:var(--card); border:1px solid var(--divider); border-radius:14px; padding:22px; margin:0 18px 10px; display:grid; grid-template-columns:repeat(auto-fit,minmax(200px,1fr)); gap:18px; align-items:end; }
label { font-weight:600; color:var(--accent2); }
input, select { width:100%; margin-top:6px; padding:9px; border-radius:8px; border:1px solid #e7d1c5; background:#fff8f6; font-size:1rem; }
.btn { grid-column:1/-1; justify-self:center; background:linear-gradient(180deg,var(--accent),var(--accent2)); border:none; color:#fff; padding:11px 34px; border-radius:10px; cursor:pointer; font-weight:700; }
.results-meta { display:flex; justify-content:space-between; color:var(--muted); padding:8px 24px; }
.grid { display:grid; grid-template-columns:repeat(auto-fit,minmax(300px,1fr)); gap:20px; margin:16px 18px; }
.wine-card { background:var(--card); border:1px solid var(--divider); border-radius:14px; padding:16px; display:flex; flex-direction:column; }
.title { font-weight:700; color:var(--accent2); margin-bottom:6px; font-size:1.15rem; }
.meta { color:var(--muted); margin-bottom:6px; }
.tags { color:#a87362; font-size:0.92rem; margin-bottom:8px; }
.desc { color:#32221a; line-height:1.4; }
.pagination { display:flex; gap:8px; justify-content:center; margin:24px 0 36px; flex-wrap:wrap; }
.page-btn { padding:7px 13px; border-radius:8px; border:1px solid var(--divider); background:var(--card); color:var(--accent2); text-decoration:none; }
.page-btn.active { background:var(--accent); color:#fff; border:none; }
.ellipsis { padding:7px 8px; color:var(--muted); }
.empty { margin:30px 18px; padding:30px; background:var(--card); border-radius:12px; text-align:center; }
"#;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

pub fn error_page(msg: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>Wines of the World — Error</title></head>\
         <body><h2>Dataset error:</h2><pre>{}</pre><p>Check logs or try again.</p></body></html>",
        escape(msg)
    )
}

pub fn index_page(params: &IndexParams, page: &QueryPage, loaded_rows: usize) -> String {
    let mut body = String::new();
    body.push_str("<h1>Wines of the World Explorer</h1>\n");
    body.push_str(
        "<div class=\"sub\">Discover, filter, and browse world wines by taste, style, country, and price.</div>\n",
    );
    body.push_str(&search_form(params));
    body.push_str(&format!(
        "<div class=\"results-meta\"><span>{} loaded · {} matches · page {} / {}</span>\
         <span>Tip: try Riesling + sweetness=Sweet or Pinot Noir + style=Earthy</span></div>\n",
        loaded_rows, page.total, page.page, page.total_pages
    ));

    if page.records.is_empty() {
        body.push_str("<div class=\"empty\">No results. Try broadening filters.</div>\n");
    } else {
        body.push_str("<div class=\"grid\">\n");
        for rec in &page.records {
            body.push_str(&wine_card(rec));
        }
        body.push_str("</div>\n");
    }
    body.push_str(&pagination(params, page.page, page.total_pages));

    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Wines of the World — Explorer</title>\n\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n\
         <style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

fn search_form(params: &IndexParams) -> String {
    let country = escape(params.country.as_deref().unwrap_or(""));
    let max_price = escape(params.max_price.as_deref().unwrap_or(""));

    let mut variety_opts = String::from("<option value=\"\">Any</option>");
    for v in VARIETY_OPTIONS {
        variety_opts.push_str(&format!(
            "<option value=\"{v}\"{}>{v}</option>",
            selected(params.variety.as_deref(), v)
        ));
    }
    let mut sweetness_opts = String::from("<option value=\"\">Any</option>");
    for s in ["Dry", "Medium", "Sweet"] {
        sweetness_opts.push_str(&format!(
            "<option value=\"{s}\"{}>{s}</option>",
            selected(params.sweetness.as_deref(), s)
        ));
    }
    let mut style_opts = String::from("<option value=\"\">Any</option>");
    for s in ["Fruity", "Spicy", "Floral", "Earthy"] {
        style_opts.push_str(&format!(
            "<option value=\"{s}\"{}>{s}</option>",
            selected(params.style.as_deref(), s)
        ));
    }
    let mut sort_opts = String::from("<option value=\"\">Default</option>");
    for (v, label) in [
        ("price_asc", "Price: Low → High"),
        ("price_desc", "Price: High → Low"),
        ("points_desc", "Top-rated"),
    ] {
        sort_opts.push_str(&format!(
            "<option value=\"{v}\"{}>{label}</option>",
            selected(params.sort.as_deref(), v)
        ));
    }

    format!(
        "<form method=\"GET\" action=\"/\" class=\"search-form\">\n\
         <label>Country <input type=\"text\" name=\"country\" value=\"{country}\"></label>\n\
         <label>Variety <select name=\"variety\">{variety_opts}</select></label>\n\
         <label>Max price ($) <input type=\"number\" name=\"max_price\" step=\"1\" value=\"{max_price}\"></label>\n\
         <label>Sweetness <select name=\"sweetness\">{sweetness_opts}</select></label>\n\
         <label>Style <select name=\"style\">{style_opts}</select></label>\n\
         <label>Sort <select name=\"sort\">{sort_opts}</select></label>\n\
         <button class=\"btn\" type=\"submit\">Search</button>\n\
         </form>\n"
    )
}

fn selected(current: Option<&str>, value: &str) -> &'static str {
    if current == Some(value) {
        " selected"
    } else {
        ""
    }
}

fn wine_card(rec: &WineRecord) -> String {
    let price = if rec.price.is_empty() { "?" } else { rec.price.as_str() };
    let tags = rec.style_tags_joined();
    format!(
        "<article class=\"wine-card\">\
         <div class=\"title\">{}</div>\
         <div class=\"meta\">{} · {} · ${} · {} pts · Sweetness: {}</div>\
         <div class=\"tags\">Style: {}</div>\
         <div class=\"desc\">{}</div>\
         </article>\n",
        escape(&rec.title),
        escape(rec.variety.as_deref().unwrap_or("Unknown variety")),
        escape(rec.country.as_deref().unwrap_or("Unknown country")),
        escape(price),
        escape(&rec.points),
        rec.sweetness.as_str(),
        if tags.is_empty() { "—".to_string() } else { escape(&tags) },
        escape(&rec.description),
    )
}

/// href back to "/" with the current filters plus the requested page.
fn page_href(params: &IndexParams, page: usize) -> String {
    let mut ser = form_urlencoded::Serializer::new(String::new());
    let mut push = |key: &str, val: &Option<String>| {
        if let Some(v) = val.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            ser.append_pair(key, v);
        }
    };
    push("country", &params.country);
    push("variety", &params.variety);
    push("max_price", &params.max_price);
    push("sweetness", &params.sweetness);
    push("style", &params.style);
    push("sort", &params.sort);
    ser.append_pair("page", &page.to_string());
    format!("/?{}", ser.finish())
}

fn pagination(params: &IndexParams, page: usize, total_pages: usize) -> String {
    let mut out = String::from("<nav class=\"pagination\" aria-label=\"Pagination\">\n");
    if page > 1 {
        out.push_str(&format!(
            "<a class=\"page-btn\" href=\"{}\">Prev</a>\n",
            page_href(params, page - 1)
        ));
    }
    // window: first two, last two, and page±2, with ellipsis gaps
    let mut last_shown = 0usize;
    for p in 1..=total_pages {
        let near = p.abs_diff(page) <= 2;
        if p <= 2 || p > total_pages.saturating_sub(2) || near {
            if last_shown != 0 && p > last_shown + 1 {
                out.push_str("<span class=\"ellipsis\">…</span>\n");
            }
            let active = if p == page { " active" } else { "" };
            out.push_str(&format!(
                "<a class=\"page-btn{active}\" href=\"{}\">{p}</a>\n",
                page_href(params, p)
            ));
            last_shown = p;
        }
    }
    if page < total_pages {
        out.push_str(&format!(
            "<a class=\"page-btn\" href=\"{}\">Next</a>\n",
            page_href(params, page + 1)
        ));
    }
    out.push_str("</nav>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_chars() {
        assert_eq!(escape("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&#39;");
    }

    #[test]
    fn page_href_carries_filters_and_encodes() {
        let params = IndexParams {
            country: Some("New Zealand".into()),
            sort: Some("price_asc".into()),
            ..Default::default()
        };
        let href = page_href(&params, 3);
        assert!(href.contains("country=New+Zealand"));
        assert!(href.contains("sort=price_asc"));
        assert!(href.ends_with("page=3"));
        assert!(!href.contains("variety"));
    }

    #[test]
    fn pagination_windows_large_page_counts() {
        let params = IndexParams::default();
        let html = pagination(&params, 10, 40);
        assert!(html.contains(">1</a>"));
        assert!(html.contains(">40</a>"));
        assert!(html.contains(">12</a>"));
        assert!(!html.contains(">20</a>"));
        assert!(html.contains("…"));
        assert!(html.contains("Prev"));
        assert!(html.contains("Next"));
    }
}
