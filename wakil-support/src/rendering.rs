//! Text rendering utilities for human-friendly error messages.
//!
//! Provider names are plain strings, so most of this is about making
//! lists and chains of names readable, and about turning Rust type
//! paths into the short names callable instances are registered under.

/// Renders a dependency chain as a readable string.
///
/// # Examples
/// ```
/// use wakil_support::rendering::render_chain;
///
/// let chain = vec!["service", "repository", "database", "service"];
/// assert_eq!(render_chain(&chain), "service → repository → database → service");
/// ```
pub fn render_chain(chain: &[impl AsRef<str>]) -> String {
    chain
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Renders names as a quoted, comma separated list.
///
/// ```
/// use wakil_support::rendering::render_names;
///
/// assert_eq!(render_names(&["one", "also_one"]), "'one', 'also_one'");
/// assert_eq!(render_names(&[] as &[&str]), "(none)");
/// ```
pub fn render_names(names: &[impl AsRef<str>]) -> String {
    if names.is_empty() {
        return "(none)".to_string();
    }

    names
        .iter()
        .map(|n| format!("'{}'", n.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shortens a fully qualified type name to the name a reader would write.
///
/// Every path segment is reduced to its last component, generic
/// arguments included.
///
/// ```
/// use wakil_support::rendering::shorten_type_name;
///
/// assert_eq!(shorten_type_name("my_app::services::Mailer"), "Mailer");
/// assert_eq!(
///     shorten_type_name("my_app::Cache<alloc::string::String, u32>"),
///     "Cache<String, u32>",
/// );
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    let mut result = String::with_capacity(full_name.len());
    let mut segment_start = 0;

    for (idx, ch) in full_name.char_indices() {
        if matches!(ch, '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';') {
            result.push_str(last_path_component(&full_name[segment_start..idx]));
            result.push(ch);
            segment_start = idx + ch.len_utf8();
        }
    }

    result.push_str(last_path_component(&full_name[segment_start..]));
    result
}

fn last_path_component(segment: &str) -> &str {
    segment.rsplit("::").next().unwrap_or(segment)
}

/// Suggests registered names close to a requested one.
///
/// Matches are ranked: substring matches first, then names sharing a
/// prefix of at least three characters, then names within a small
/// edit distance. At most `max_suggestions` names are returned.
///
/// ```
/// use wakil_support::rendering::suggest_similar;
///
/// let available = ["database", "mailer", "user_service"];
/// assert_eq!(suggest_similar("databse", &available, 3), vec!["database"]);
/// ```
pub fn suggest_similar(
    requested: &str,
    available: &[impl AsRef<str>],
    max_suggestions: usize,
) -> Vec<String> {
    let requested_lower = requested.to_lowercase();

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| *name != requested)
        .filter_map(|name| {
            let name_lower = name.to_lowercase();

            if name_lower.contains(&requested_lower) || requested_lower.contains(&name_lower) {
                return Some((name, 100));
            }

            let common = name_lower
                .chars()
                .zip(requested_lower.chars())
                .take_while(|(a, b)| a == b)
                .count();
            if common >= 3 {
                return Some((name, 50 + common));
            }

            let distance = edit_distance(&requested_lower, &name_lower);
            if distance <= 2 {
                return Some((name, 40 - distance));
            }

            None
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
