use crate::{build_destination, LinkPreview, PreviewError, Resolution};
use askama::Template;

/// The HTML document served for a shared link: social meta tags, a visible
/// fallback link, and a single scripted navigation to the deep link.
#[derive(Template)]
#[template(path = "redirect.html")]
pub struct RedirectPage {
    pub preview: LinkPreview,
    pub target_url: Option<String>,
    pub destination: Option<String>,
    destination_literal: Option<String>,
}

impl RedirectPage {
    pub fn new(resolution: Resolution) -> Self {
        let destination = build_destination(resolution.target_url.as_deref());
        let destination_literal = destination.as_deref().map(script_string_literal);

        Self {
            preview: resolution.preview,
            target_url: resolution.target_url,
            destination,
            destination_literal,
        }
    }

    pub fn render_html(&self) -> Result<String, PreviewError> {
        self.render()
            .map_err(|e| PreviewError::TemplateError(e.to_string()))
    }
}

/// JSON string literal safe to embed inside a `<script>` element.
fn script_string_literal(value: &str) -> String {
    let json = serde_json::Value::String(value.to_string()).to_string();
    json.replace('<', "\\u003c")
}
