use std::collections::BTreeMap;

/// Replaces `{name}` segments with values from `vars`.
///
/// Unknown placeholders are left untouched so the server decides what a
/// literal `{name}` means.
#[must_use]
pub fn render_path(template: &str, vars: &BTreeMap<String, String>) -> String {
    if vars.is_empty() || !template.contains('{') {
        return template.to_owned();
    }
    let mut rendered = template.to_owned();
    for (key, value) in vars {
        let needle = format!("{{{}}}", key);
        if rendered.contains(&needle) {
            rendered = rendered.replace(&needle, value);
        }
    }
    rendered
}

#[must_use]
pub fn has_placeholder(template: &str, name: &str) -> bool {
    template.contains(&format!("{{{}}}", name))
}
