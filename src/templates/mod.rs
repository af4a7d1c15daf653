//! Embedded page templates using the Tera template engine
//!
//! All templates are compiled into the binary; there is no theme directory
//! to deploy next to the executable.

use anyhow::Result;
use lazy_static::lazy_static;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::content::parser::DATE_FORMAT;

/// Template renderer with the embedded blog templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
            ("contact.html", include_str!("blog/contact.html")),
            ("about.html", include_str!("blog/about.html")),
            ("error.html", include_str!("blog/error.html")),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

lazy_static! {
    static ref RENDERER: TemplateRenderer =
        TemplateRenderer::new().expect("embedded templates are valid");
}

/// Process-wide renderer over the embedded templates.
pub fn renderer() -> &'static TemplateRenderer {
    &RENDERER
}

/// Tera filter: reformat an ISO `YYYY-MM-DDTHH:MM:SS` date string with a
/// chrono format string. Values that do not parse pass through unchanged.
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "%d.%m.%Y %H:%M".to_string(),
    };

    match chrono::NaiveDateTime::parse_from_str(&s, DATE_FORMAT) {
        Ok(date) => Ok(tera::Value::String(date.format(&format).to_string())),
        Err(_) => Ok(tera::Value::String(s)),
    }
}
