//! Minimal query-string handling for the wake route.

/// Look up the first value of `name` in a raw query string.
///
/// Keys and values are percent-decoded, with `+` decoding to a space.
/// A pair with a malformed escape sequence is unusable and is treated
/// as absent.
pub fn param(query: &str, name: &str) -> Option<String> {
    for pair in query.split('&') {
        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (key, value),
            None => (pair, ""),
        };

        match percent_decode(key) {
            Some(key) if key == name => return percent_decode(value),
            _ => {}
        }
    }
    None
}

fn percent_decode(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hi = hex_value(*bytes.get(i + 1)?)?;
                let lo = hex_value(*bytes.get(i + 2)?)?;
                out.push(hi << 4 | lo);
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8(out).ok()
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_param() {
        assert_eq!(
            param("addr=01:23:45:67:89:ab", "addr"),
            Some("01:23:45:67:89:ab".to_string())
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        assert_eq!(param("addr=first&addr=second", "addr"), Some("first".to_string()));
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(
            param("addr=01%3A23%3A45%3A67%3A89%3Aab", "addr"),
            Some("01:23:45:67:89:ab".to_string())
        );
        assert_eq!(param("q=a+b", "q"), Some("a b".to_string()));
    }

    #[test]
    fn test_missing_key_vs_empty_value() {
        assert_eq!(param("other=1", "addr"), None);
        assert_eq!(param("", "addr"), None);
        assert_eq!(param("addr=", "addr"), Some(String::new()));
        assert_eq!(param("addr", "addr"), Some(String::new()));
    }

    #[test]
    fn test_malformed_escape_is_skipped() {
        assert_eq!(param("addr=%zz", "addr"), None);
        assert_eq!(param("addr=%f", "addr"), None);
        // A broken pair must not hide a later well-formed one
        assert_eq!(param("%zz=1&addr=ok", "addr"), Some("ok".to_string()));
    }
}
