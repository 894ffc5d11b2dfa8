//! Identifier case conversion and English inflection.

/// Converts a Go identifier to snake_case, keeping initialisms together.
///
/// `UserID` → `user_id`, `HTTPServer` → `http_server`.
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }

    result
}

/// `AccountName` → `accountName`.
pub fn to_lower_camel(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// `AccountName` → `account name`.
pub fn to_original_case(s: &str) -> String {
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, c) in s.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            words.push(std::mem::take(&mut current));
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    words.join(" ")
}

/// Prefixes `a` or `an`.
///
/// A leading `u` takes `a` (`a user`, `a unit`).
pub fn article(s: &str) -> String {
    match s.chars().next() {
        Some('a' | 'e' | 'i' | 'o') => format!("an {s}"),
        _ => format!("a {s}"),
    }
}

const UNCOUNTABLE: &[&str] = &[
    "equipment", "information", "rice", "money", "species", "series", "fish", "sheep",
    "news", "data", "metadata",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("ox", "oxen"),
];

/// Pluralizes the last word of an identifier.
///
/// Works on PascalCase (`JobHistory` → `JobHistories`), snake_case
/// (`job_history` → `job_histories`) and plain words (`person` → `people`).
pub fn pluralize(s: &str) -> String {
    let split = last_word_start(s);
    let (head, word) = s.split_at(split);
    format!("{head}{}", pluralize_word(word))
}

fn last_word_start(s: &str) -> usize {
    if let Some(pos) = s.rfind('_') {
        return pos + 1;
    }
    s.char_indices()
        .filter(|&(i, c)| i > 0 && c.is_uppercase())
        .map(|(i, _)| i)
        .filter(|&i| s[i..].chars().skip(1).any(|c| c.is_lowercase()))
        .last()
        .unwrap_or(0)
}

fn pluralize_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        return if capitalized {
            let mut chars = plural.chars();
            chars
                .next()
                .map(|c| c.to_uppercase().chain(chars).collect())
                .unwrap_or_default()
        } else {
            plural.to_string()
        };
    }

    let ends = |suffix: &str| lower.ends_with(suffix);
    let stem = |n: usize| &word[..word.len() - n];

    if ends("s") || ends("x") || ends("z") || ends("ch") || ends("sh") {
        format!("{word}es")
    } else if ends("y") && !lower[..lower.len() - 1].ends_with(['a', 'e', 'i', 'o', 'u']) {
        format!("{}ies", stem(1))
    } else if ends("fe") {
        format!("{}ves", stem(2))
    } else if ends("lf") || ends("af") {
        format!("{}ves", stem(1))
    } else {
        format!("{word}s")
    }
}
