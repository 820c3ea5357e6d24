//! Server-rendered HTML.
//!
//! Pages are plain `format!` templates around a shared shell. Anything that
//! came from a user goes through [`escape`] first. Behaviour lives in
//! `/assets/wizard.js`, keyed on the `data-page` attribute of `<body>`.

pub mod website;
pub mod wizard;

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Document shell shared by every page.
pub(crate) struct Shell<'a> {
    pub title: &'a str,
    /// Value of `<body data-page>`, read by the wizard script.
    pub page: &'a str,
    /// Extra `data-*` attributes, already escaped.
    pub data: &'a [(&'a str, String)],
    pub script: bool,
}

impl Shell<'_> {
    pub fn render(&self, body: &str) -> String {
        let data: String = self
            .data
            .iter()
            .map(|(k, v)| format!(" data-{k}=\"{v}\""))
            .collect();
        let script = if self.script {
            "\n<script src=\"/assets/wizard.js\" defer></script>"
        } else {
            ""
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/assets/site.css">
</head>
<body data-page="{page}"{data}>
{body}
<div id="toasts" class="toasts" aria-live="polite"></div>{script}
</body>
</html>
"#,
            title = escape(self.title),
            page = self.page,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape(r#"<b class="x">Tom & 'Jerry'</b>"#),
            "&lt;b class=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("Night Owl"), "Night Owl");
    }

    #[test]
    fn shell_carries_page_and_data() {
        let html = Shell {
            title: "A < B",
            page: "loading",
            data: &[("delay", "3000".into())],
            script: true,
        }
        .render("<main></main>");

        assert!(html.contains("<title>A &lt; B</title>"));
        assert!(html.contains(r#"<body data-page="loading" data-delay="3000">"#));
        assert!(html.contains(r#"<script src="/assets/wizard.js" defer></script>"#));
    }
}
