//! Route templates for request spans.

/// Path segments that follow these segments are identifiers, not routes.
const IDENTIFIER_PARENTS: [(&str, &str); 1] = [("product", "{product_id}")];

/// Collapse identifier segments so every product lookup shares one route name.
pub(super) fn route_template(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut template = String::new();
    let mut placeholder: Option<&str> = None;

    for segment in path.trim_start_matches('/').split('/') {
        template.push('/');

        match placeholder.take() {
            Some(name) if !segment.is_empty() => template.push_str(name),
            _ => template.push_str(segment),
        }

        placeholder = IDENTIFIER_PARENTS
            .iter()
            .find(|(parent, _)| *parent == segment)
            .map(|(_, name)| *name);
    }

    template
}
