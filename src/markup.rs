//! Owned view over the templates in a page of wiki markup.
//!
//! Parsing is delegated to `parse_wiki_text`; this module only walks the node
//! tree it produces and slices each template's parameters back out of the
//! source text, so values keep their original markup (lists, links, nested
//! templates) for the normalizers to pick apart.

use parse_wiki_text::{Configuration, Node, Parameter};

/// A `{{name|...}}` construct with its parameters in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub params: Vec<Param>,
}

/// One template parameter. Positional parameters have no name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Option<String>,
    pub value: String,
}

impl Template {
    /// Case-insensitive substring match against the template name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Look up a parameter by name, or by 1-based index for positional ones.
    /// A repeated key resolves to its last occurrence.
    pub fn get(&self, key: &str) -> Option<&Param> {
        let named = self
            .params
            .iter()
            .rev()
            .find(|p| p.name.as_deref().map(str::trim) == Some(key));
        if named.is_some() {
            return named;
        }
        match key.parse::<usize>() {
            Ok(n) if n > 0 => self.params.iter().filter(|p| p.name.is_none()).nth(n - 1),
            _ => None,
        }
    }

    /// The `index`-th (0-based) positional parameter, untrimmed.
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.params
            .iter()
            .filter(|p| p.name.is_none())
            .nth(index)
            .map(|p| p.value.as_str())
    }
}

/// Trimmed value stored under `key`, or `None` when the key is missing.
pub fn extract_template_value(template: &Template, key: &str) -> Option<String> {
    template.get(key).map(|p| p.value.trim().to_string())
}

/// Every template in `text`, in document order. Nested templates follow the
/// template that contains them.
pub fn templates(text: &str) -> Vec<Template> {
    let output = Configuration::default().parse(text);
    let mut out = Vec::new();
    collect(text, &output.nodes, &mut out);
    out
}

fn collect(source: &str, nodes: &[Node], out: &mut Vec<Template>) {
    for node in nodes {
        match node {
            Node::Template {
                start,
                end,
                parameters,
                ..
            } => {
                out.push(template_from_source(source, *start, *end, parameters));
                for p in parameters {
                    collect(source, &p.value, out);
                }
            }
            Node::Heading { nodes, .. }
            | Node::Preformatted { nodes, .. }
            | Node::Tag { nodes, .. }
            | Node::ExternalLink { nodes, .. } => collect(source, nodes, out),
            Node::Link { text, .. } | Node::Image { text, .. } => collect(source, text, out),
            Node::UnorderedList { items, .. } | Node::OrderedList { items, .. } => {
                for item in items {
                    collect(source, &item.nodes, out);
                }
            }
            Node::DefinitionList { items, .. } => {
                for item in items {
                    collect(source, &item.nodes, out);
                }
            }
            Node::Table { captions, rows, .. } => {
                for caption in captions {
                    collect(source, &caption.content, out);
                }
                for cell in rows.iter().flat_map(|row| &row.cells) {
                    collect(source, &cell.content, out);
                }
            }
            _ => {}
        }
    }
}

fn template_from_source(source: &str, start: usize, end: usize, parameters: &[Parameter]) -> Template {
    // {{ ... }}
    let inner = source
        .get(start + 2..end.saturating_sub(2))
        .unwrap_or_default();
    let name = inner.split('|').next().unwrap_or_default().trim().to_string();

    let params = parameters
        .iter()
        .map(|p| {
            let raw = source.get(p.start..p.end).unwrap_or_default();
            let raw = raw.strip_prefix('|').unwrap_or(raw);
            match (&p.name, raw.split_once('=')) {
                (Some(_), Some((name, value))) => Param {
                    name: Some(name.trim().to_string()),
                    value: value.to_string(),
                },
                _ => Param {
                    name: None,
                    value: raw.to_string(),
                },
            }
        })
        .collect();

    Template { name, params }
}
