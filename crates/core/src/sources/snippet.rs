//! Renders a source list as a `defaultSources` code snippet.
//!
//! Operators paste the output over the built-in list in the page source to
//! make an edited list permanent for every visitor.

use super::types::JobSource;

/// Formats `sources` as a `const defaultSources = [...]` literal.
pub fn format_defaults_snippet(sources: &[JobSource]) -> String {
    let items: Vec<String> = sources
        .iter()
        .map(|source| {
            format!(
                "    {{\n      id: '{}',\n      name: '{}',\n      url: '{}'\n    }}",
                escape_single_quoted(&source.id),
                escape_single_quoted(&source.name),
                escape_single_quoted(&source.url)
            )
        })
        .collect();

    format!("const defaultSources = [\n{}\n  ];", items.join(",\n"))
}

fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
