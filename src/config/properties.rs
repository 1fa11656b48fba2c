//! Parsing of `.properties` style credential files.
//!
//! Supported syntax:
//! - `key=value`, `key: value` or `key value`
//! - `#` and `!` comment lines, blank lines
//! - a trailing unescaped `\` continues the value on the next line
//! - escapes `\t`, `\n`, `\r`, `\f`, `\uXXXX`; any other escaped character
//!   (`\=`, `\:`, `\ `, `\\`) stands for itself, so keys may contain
//!   separators

use crate::error::ConfigError;

/// Parses properties text into `(key, value)` pairs, in file order.
pub(super) fn parse(source: &str) -> Result<Vec<(String, String)>, ConfigError> {
    let mut pairs = Vec::new();
    let mut pending = String::new();

    for raw in source.lines() {
        let line = raw.trim_start();
        if pending.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!'))
        {
            continue;
        }

        if ends_with_continuation(line) {
            pending.push_str(&line[..line.len() - 1]);
            continue;
        }
        pending.push_str(line);

        pairs.push(parse_line(&pending)?);
        pending.clear();
    }

    if !pending.is_empty() {
        pairs.push(parse_line(&pending)?);
    }

    Ok(pairs)
}

/// An odd run of trailing backslashes ends in an unescaped one.
fn ends_with_continuation(line: &str) -> bool {
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

fn parse_line(line: &str) -> Result<(String, String), ConfigError> {
    let line = line.trim();
    let malformed = || ConfigError::MalformedPropertyLine {
        line: line.to_string(),
    };

    let key_end = separator_index(line);
    let (raw_key, rest) = line.split_at(key_end);
    let rest = rest.trim_start();
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);

    if raw_key.is_empty() {
        return Err(malformed());
    }

    let key = unescape(raw_key).ok_or_else(malformed)?;
    let value = unescape(rest.trim_start()).ok_or_else(malformed)?;
    Ok((key, value))
}

/// Byte index of the first unescaped separator, or the line length.
fn separator_index(line: &str) -> usize {
    let mut escaped = false;
    for (at, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if matches!(c, '=' | ':' | ' ' | '\t') {
            return at;
        }
    }
    line.len()
}

/// Resolves escapes, or `None` for a malformed `\u` sequence.
fn unescape(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return None;
                }
                let code = u32::from_str_radix(&hex, 16).ok()?;
                out.push(char::from_u32(code)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supports_all_separators() {
        let pairs = parse("a=1\nb: 2\nc 3\nd = 4\n").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
                ("c".to_string(), "3".to_string()),
                ("d".to_string(), "4".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let pairs = parse("# comment\n! another\n\n   \nkey=value").unwrap();
        assert_eq!(pairs, vec![("key".to_string(), "value".to_string())]);
    }

    #[test]
    fn test_parse_joins_continued_lines() {
        let pairs = parse("scopes=read,\\\n    write\nnext=1").unwrap();
        assert_eq!(pairs[0], ("scopes".to_string(), "read,write".to_string()));
        assert_eq!(pairs[1], ("next".to_string(), "1".to_string()));
    }

    #[test]
    fn test_parse_keeps_separators_inside_value() {
        let pairs = parse("credential.default.endpointUrl=https://api.example.com:8443/v1").unwrap();
        assert_eq!(pairs[0].1, "https://api.example.com:8443/v1");
    }

    #[test]
    fn test_parse_key_without_value() {
        let pairs = parse("flag").unwrap();
        assert_eq!(pairs, vec![("flag".to_string(), String::new())]);
    }

    #[test]
    fn test_parse_escaped_trailing_backslash_is_not_a_continuation() {
        let pairs = parse("path=C:\\\\tmp\\\\\nnext=1").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("path".to_string(), "C:\\tmp\\".to_string()),
                ("next".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_resolves_escapes() {
        let pairs = parse("a\\=b\\:c=x\\ty\\nz\nname=caf\\u00e9\nsep=\\=\\:").unwrap();
        assert_eq!(pairs[0], ("a=b:c".to_string(), "x\ty\nz".to_string()));
        assert_eq!(pairs[1], ("name".to_string(), "caf\u{e9}".to_string()));
        assert_eq!(pairs[2], ("sep".to_string(), "=:".to_string()));
    }

    #[test]
    fn test_parse_rejects_bad_unicode_escape() {
        assert!(matches!(
            parse("key=\\u12"),
            Err(ConfigError::MalformedPropertyLine { .. })
        ));
        assert!(parse("key=\\uzzzz").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_key() {
        let result = parse("=value");
        assert_eq!(
            result,
            Err(ConfigError::MalformedPropertyLine {
                line: "=value".to_string()
            })
        );
    }
}
