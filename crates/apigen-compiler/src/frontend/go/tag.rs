//! Go string literals and struct tags.
//!
//! Struct tags follow the `reflect.StructTag` convention:
//! space-separated `key:"value"` pairs, e.g. `` `gorm:"primary_key" json:"id,omitempty"` ``.

/// Unquotes a Go string literal (raw `` `...` `` or interpreted `"..."`).
pub fn unquote(literal: &str) -> Option<String> {
    if literal.len() < 2 {
        return None;
    }

    if let Some(raw) = literal.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        // Carriage returns are discarded from raw literals.
        return Some(raw.replace('\r', ""));
    }

    let inner = literal.strip_prefix('"').and_then(|s| s.strip_suffix('"'))?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\n' => return None,
            '\\' => out.push(unescape(&mut chars)?),
            c => out.push(c),
        }
    }

    Some(out)
}

fn unescape(chars: &mut std::str::Chars<'_>) -> Option<char> {
    let c = match chars.next()? {
        'a' => '\u{07}',
        'b' => '\u{08}',
        'f' => '\u{0C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{0B}',
        '\\' => '\\',
        '"' => '"',
        '\'' => '\'',
        'x' => hex_char(chars, 2)?,
        'u' => hex_char(chars, 4)?,
        'U' => hex_char(chars, 8)?,
        d @ '0'..='7' => {
            let rest: String = chars.take(2).collect();
            let value = u32::from_str_radix(&format!("{d}{rest}"), 8).ok()?;
            char::from_u32(value)?
        }
        _ => return None,
    };
    Some(c)
}

fn hex_char(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let hex: String = chars.take(digits).collect();
    if hex.len() != digits {
        return None;
    }
    char::from_u32(u32::from_str_radix(&hex, 16).ok()?)
}

/// Looks up `key` in an unquoted struct tag.
///
/// Parsing stops at the first malformed pair, like `reflect.StructTag.Lookup`.
pub fn lookup(tag: &str, key: &str) -> Option<String> {
    let mut rest = tag;

    loop {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            return None;
        }

        let bytes = rest.as_bytes();
        let mut i = 0;
        while i < bytes.len()
            && bytes[i] > b' '
            && bytes[i] != b':'
            && bytes[i] != b'"'
            && bytes[i] != 0x7f
        {
            i += 1;
        }
        if i == 0 || i + 1 >= bytes.len() || bytes[i] != b':' || bytes[i + 1] != b'"' {
            return None;
        }
        let name = &rest[..i];
        rest = &rest[i + 1..];

        let bytes = rest.as_bytes();
        let mut j = 1;
        while j < bytes.len() && bytes[j] != b'"' {
            if bytes[j] == b'\\' {
                j += 1;
            }
            j += 1;
        }
        if j >= bytes.len() {
            return None;
        }
        let quoted = &rest[..=j];
        rest = &rest[j + 1..];

        if name == key {
            return unquote(quoted);
        }
    }
}

/// The JSON name declared by a raw tag literal, if any.
///
/// `json:",omitempty"` declares options only and yields `None`.
pub fn json_name(raw_tag: &str) -> Option<String> {
    let tag = unquote(raw_tag).unwrap_or_else(|| raw_tag.to_string());
    let value = lookup(&tag, "json")?;
    let name = value.split(',').next().unwrap_or_default();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquotes_raw_and_interpreted_literals() {
        assert_eq!(unquote("`json:\"id\"`").as_deref(), Some("json:\"id\""));
        assert_eq!(unquote(r#""api""#).as_deref(), Some("api"));
        assert_eq!(unquote(r#""a\tb\x41é""#).as_deref(), Some("a\tbAé"));
        assert_eq!(unquote(r#""broken"#), None);
        assert_eq!(unquote(r#""bad \q escape""#), None);
    }

    #[test]
    fn looks_up_tag_keys() {
        let tag = r#"gorm:"primary_key;AUTO_INCREMENT" json:"id,omitempty" form:"id""#;
        assert_eq!(lookup(tag, "gorm").as_deref(), Some("primary_key;AUTO_INCREMENT"));
        assert_eq!(lookup(tag, "json").as_deref(), Some("id,omitempty"));
        assert_eq!(lookup(tag, "form").as_deref(), Some("id"));
        assert_eq!(lookup(tag, "xml"), None);
    }

    #[test]
    fn stops_at_malformed_pair() {
        assert_eq!(lookup(r#"json:id form:"id""#, "form"), None);
    }

    #[test]
    fn extracts_json_name() {
        assert_eq!(json_name(r#"`json:"created_at,omitempty" form:"created_at"`"#).as_deref(), Some("created_at"));
        assert_eq!(json_name(r#"`json:",omitempty"`"#), None);
        assert_eq!(json_name(r#"`gorm:"primary_key"`"#), None);
        assert_eq!(json_name(r#""json:\"name\"""#).as_deref(), Some("name"));
    }
}
