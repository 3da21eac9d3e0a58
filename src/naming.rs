//! Turns raw schema identifiers into Kotlin identifiers.
//!
//! # Naming Table
//!
//! | Schema text | Function | Kotlin output | Used for |
//! |-------------|----------|---------------|----------|
//! | `user_profile` | [`to_pascal_case`] | `UserProfile` | `UserProfileEvents`, `UserProfileEvent` |
//! | `user_id` | [`to_camel_case`] | `userId` | record fields |
//! | `Home Screen` | [`to_constant_name`] | `HOME_SCREEN` | `Values` constants |
//! | `user_profile` | [`package_segment`] | `userprofile` | module package |
//!
//! Every function is total: arbitrary schema text always yields a valid
//! identifier. Characters Kotlin does not accept in an identifier become `_`,
//! a leading digit is prefixed with `_`, and a name made only of underscores
//! (reserved in Kotlin) gets a trailing `0`.

/// Kotlin hard keywords. These cannot be used as bare identifiers.
const KOTLIN_KEYWORDS: &[&str] = &[
    "as",
    "break",
    "class",
    "continue",
    "do",
    "else",
    "false",
    "for",
    "fun",
    "if",
    "in",
    "interface",
    "is",
    "null",
    "object",
    "package",
    "return",
    "super",
    "this",
    "throw",
    "true",
    "try",
    "typealias",
    "typeof",
    "val",
    "var",
    "when",
    "while",
];

/// Convert a snake_case schema name to PascalCase.
///
/// - `"user_profile"` → `"UserProfile"`
/// - `"onboarding"` → `"Onboarding"`
pub fn to_pascal_case(raw: &str) -> String {
    let joined: String = raw.split('_').map(capitalize).collect();
    sanitize_identifier(&joined)
}

/// Convert a snake_case parameter key to camelCase.
///
/// The first segment is kept as written; every following segment is
/// capitalized.
///
/// - `"user_id"` → `"userId"`
/// - `"source"` → `"source"`
pub fn to_camel_case(raw: &str) -> String {
    let mut segments = raw.split('_');
    let mut joined = segments.next().unwrap_or_default().to_string();
    for segment in segments {
        joined.push_str(&capitalize(segment));
    }
    sanitize_identifier(&joined)
}

/// Convert a predefined parameter value to a constant name.
///
/// - `"Home Screen"` → `"HOME_SCREEN"`
/// - `"welcome"` → `"WELCOME"`
/// - `"7 days"` → `"_7_DAYS"`
///
/// Distinct values may map to the same name (`"a b"` and `"A_B"`); callers
/// let the later value win.
pub fn to_constant_name(raw: &str) -> String {
    sanitize_identifier(&raw.to_uppercase().replace(' ', "_"))
}

/// Package segment for a category: lower-cased with underscores removed.
///
/// A segment that would be a Kotlin keyword gets a trailing `_`.
///
/// - `"user_profile"` → `"userprofile"`
/// - `"object"` → `"object_"`
pub fn package_segment(category: &str) -> String {
    let segment: String = category
        .to_lowercase()
        .chars()
        .filter(|&c| c != '_')
        .collect();
    let mut segment = sanitize_identifier(&segment);
    if KOTLIN_KEYWORDS.contains(&segment.as_str()) {
        segment.push('_');
    }
    segment
}

/// Fully-qualified package of a category module.
///
/// `("com.example.analytics", "user_profile")` → `"com.example.analytics.userprofile"`.
pub fn module_package(base_package: &str, category: &str) -> String {
    format!("{base_package}.{}", package_segment(category))
}

/// Wrap a Kotlin hard keyword in backticks so it can be used as a name.
///
/// - `"in"` → `` "`in`" ``
/// - `"source"` → `"source"`
pub fn escape_identifier(ident: &str) -> String {
    if KOTLIN_KEYWORDS.contains(&ident) {
        format!("`{ident}`")
    } else {
        ident.to_string()
    }
}

/// Check whether `ident` is usable as a Kotlin identifier without escaping.
pub fn is_valid_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && !ident.chars().all(|c| c == '_')
        && !KOTLIN_KEYWORDS.contains(&ident)
}

/// Render `text` as a Kotlin string literal, including the surrounding quotes.
///
/// `$` is escaped so values are never treated as string templates.
pub fn kotlin_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().to_string() + chars.as_str(),
    }
}

/// Replace non-identifier characters with `_`, guard against a leading digit,
/// and never return a name made only of underscores.
fn sanitize_identifier(s: &str) -> String {
    let mut out: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.chars().next().is_none_or(|c| c.is_numeric()) {
        out.insert(0, '_');
    }
    if out.chars().all(|c| c == '_') {
        out.push('0');
    }
    out
}
