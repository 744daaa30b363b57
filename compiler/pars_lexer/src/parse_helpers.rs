//! Numeric Parsing Helpers
//!
//! Literal parsing with underscore separators. Allocation only happens when
//! a float actually contains underscores.

/// Parse a decimal integer, skipping underscores. `None` on overflow.
#[inline]
pub(crate) fn parse_int(s: &str) -> Option<i64> {
    let mut result: i64 = 0;
    for c in s.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10)?;
        result = result.checked_mul(10)?;
        result = result.checked_add(i64::from(digit))?;
    }
    Some(result)
}

#[inline]
pub(crate) fn parse_float(s: &str) -> Option<f64> {
    if s.contains('_') {
        s.replace('_', "").parse().ok()
    } else {
        s.parse().ok()
    }
}

/// Resolve `\n \t \" \\` escapes; unknown escapes are kept verbatim.
pub(crate) fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('\\') | None => result.push('\\'),
                Some('"') => result.push('"'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Raw strings only resolve `\'` and `\\`.
pub(crate) fn unescape_raw(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '\'' || next == '\\' {
                    result.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ints_skip_underscores() {
        assert_eq!(parse_int("123"), Some(123));
        assert_eq!(parse_int("1_000_000"), Some(1_000_000));
        assert_eq!(parse_int("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_int("9223372036854775808"), None);
    }

    #[test]
    fn floats_skip_underscores() {
        assert_eq!(parse_float("1.5"), Some(1.5));
        assert_eq!(parse_float("1_000.25"), Some(1000.25));
        assert_eq!(parse_float("2.5e3"), Some(2500.0));
    }

    #[test]
    fn string_escapes() {
        assert_eq!(unescape_string(r"a\nb"), "a\nb");
        assert_eq!(unescape_string(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(unescape_string(r"tab\there"), "tab\there");
        assert_eq!(unescape_string(r"keep \q"), "keep \\q");
    }

    #[test]
    fn raw_escapes() {
        assert_eq!(unescape_raw(r"it\'s"), "it's");
        assert_eq!(unescape_raw(r"a\\b"), "a\\b");
        assert_eq!(unescape_raw(r"no \n here"), "no \\n here");
    }
}
