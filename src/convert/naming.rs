//! Identifier casing helpers used by every generator.

/// Convert an identifier to lower snake case.
///
/// Word boundaries are `_`, `-`, spaces, lower→upper transitions and the end
/// of an acronym run.
///
/// ```rust
/// use metagen::convert::to_snake_case;
///
/// assert_eq!(to_snake_case("CreatedAt"), "created_at");
/// assert_eq!(to_snake_case("UserID"), "user_id");
/// assert_eq!(to_snake_case("HTTPServer"), "http_server");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary && !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
        } else {
            result.push(ch);
        }
    }

    while result.ends_with('_') {
        result.pop();
    }
    result
}

/// Convert an underscore-separated identifier to PascalCase.
///
/// A segment spelled `id` in any casing is kept exactly as written, so
/// `owner_id` becomes `Ownerid` and `OwnerID` stays `OwnerID`.
pub fn to_camel_case(s: &str) -> String {
    s.split('_')
        .map(|seg| {
            if seg.eq_ignore_ascii_case("id") {
                seg.to_string()
            } else {
                upper_first(seg)
            }
        })
        .collect()
}

/// Convert an underscore-separated identifier to lowerCamelCase.
///
/// The first segment goes through [`lc_first`]; later segments follow
/// [`to_camel_case`].
pub fn to_lower_camel_case(s: &str) -> String {
    s.split('_')
        .enumerate()
        .map(|(i, seg)| {
            if i == 0 {
                lc_first(seg)
            } else if seg.eq_ignore_ascii_case("id") {
                seg.to_string()
            } else {
                upper_first(seg)
            }
        })
        .collect()
}

/// Lower-case the first character, with whole-word handling for `ID` and `EID`.
pub fn lc_first(s: &str) -> String {
    if s == "EID" {
        return "eid".to_string();
    }
    if s.eq_ignore_ascii_case("id") {
        return "id".to_string();
    }
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Strip trailing `s` characters (crude singularization for plural names).
pub fn remove_last_char(s: &str) -> String {
    s.trim_end_matches('s').to_string()
}

/// Table name for a Metadata: singular, lower snake case.
pub fn table_name(name: &str) -> String {
    to_snake_case(name)
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
