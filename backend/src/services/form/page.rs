//! HTML rendering for the upload page.
//!
//! `index.html` contains `{{name}}` placeholders that are replaced with
//! already-escaped HTML fragments.

use super::STATIC_DIR;
use common::ExtractedFields;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}"));

/// What the page shows under the upload form.
pub enum PageView<'a> {
    Empty,
    Parsed {
        fields: &'a ExtractedFields,
        raw: &'a str,
        saved: bool,
    },
    Unparsed {
        raw: &'a str,
    },
    Failed {
        message: &'a str,
    },
}

pub fn render_page(view: &PageView) -> Result<String, String> {
    let template = STATIC_DIR
        .get_file("index.html")
        .and_then(|f| f.contents_utf8())
        .ok_or("index.html is missing from the embedded assets")?;

    let mut placeholders = HashMap::new();
    placeholders.insert("result", result_section(view));
    substitute(template, &placeholders)
}

fn substitute(template: &str, placeholders: &HashMap<&str, String>) -> Result<String, String> {
    let re = PLACEHOLDER.as_ref().map_err(|e| e.to_string())?;
    Ok(re
        .replace_all(template, |caps: &Captures| {
            placeholders.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned())
}

fn result_section(view: &PageView) -> String {
    match view {
        PageView::Empty => String::new(),
        PageView::Parsed { fields, raw, saved } => {
            let rows: String = fields
                .rows()
                .map(|(label, value)| {
                    format!(
                        "<tr><th>{}</th><td>{}</td></tr>",
                        escape_html(label),
                        escape_html(&value)
                    )
                })
                .collect();
            let notice = if *saved {
                ""
            } else {
                "<p class=\"error\">The fields could not be saved to the CSV history.</p>"
            };
            format!(
                "<section><h2>Extracted fields</h2>{}<table>{}</table>\
                 <details><summary>Model response</summary><pre>{}</pre></details></section>",
                notice,
                rows,
                escape_html(raw)
            )
        }
        PageView::Unparsed { raw } => format!(
            "<section><h2>Model response</h2>\
             <p class=\"error\">The response could not be parsed as JSON.</p><pre>{}</pre></section>",
            escape_html(raw)
        ),
        PageView::Failed { message } => format!(
            "<section><p class=\"error\">{}</p></section>",
            escape_html(message)
        ),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn empty_page_has_form_and_no_placeholders() {
        let html = render_page(&PageView::Empty).unwrap();
        assert!(html.contains("name=\"image\""));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn parsed_fields_render_as_rows() {
        let Value::Object(map) = json!({"Wages, tips, other compensation": "$45,000.00"}) else {
            unreachable!()
        };
        let fields = ExtractedFields::new(map);
        let html = render_page(&PageView::Parsed {
            fields: &fields,
            raw: "{}",
            saved: true,
        })
        .unwrap();
        assert!(html.contains("<th>Wages, tips, other compensation</th><td>$45,000.00</td>"));
    }

    #[test]
    fn raw_text_is_escaped() {
        let html = render_page(&PageView::Unparsed {
            raw: "<script>alert('x')</script>",
        })
        .unwrap();
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn unknown_placeholders_become_empty() {
        let out = substitute("a{{ missing }}b", &HashMap::new()).unwrap();
        assert_eq!(out, "ab");
    }

    #[test]
    fn placeholder_pattern_compiles_once_and_is_reused() {
        assert!(PLACEHOLDER.as_ref().is_ok());
        let mut placeholders = HashMap::new();
        placeholders.insert("result", "x".to_string());
        for _ in 0..3 {
            assert_eq!(substitute("<{{result}}>", &placeholders).unwrap(), "<x>");
        }
    }
}
