//! Value-level masking rules.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Suffix appended to the visible prefix of a masked value.
pub const MASK: &str = "****";

/// Mask a value, keeping a length-dependent prefix visible.
///
/// Without `min_show` the prefix is 4 characters for values up to 8
/// characters, 8 up to 16, and 16 beyond that. A value no longer than its
/// prefix is returned unchanged, so `mask_value("abc", None) == "abc"`.
///
/// Masking an already masked value yields the same string.
pub fn mask_value(value: &str, min_show: Option<usize>) -> String {
    if value.is_empty() {
        return String::new();
    }

    let len = value.chars().count();
    let show = min_show.unwrap_or(match len {
        0..=8 => len.min(4),
        9..=16 => 8,
        _ => 16,
    });

    if len <= show {
        return value.to_string();
    }

    let prefix: String = value.chars().take(show).collect();
    format!("{prefix}{MASK}")
}

struct ConnectionPatterns {
    password: Regex,
    user: Regex,
    server: Regex,
}

fn connection_patterns() -> &'static ConnectionPatterns {
    static PATTERNS: OnceLock<ConnectionPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| ConnectionPatterns {
        password: Regex::new(r"(?i)(password|pwd)\s*=\s*([^;]+)")
            .expect("password pattern is valid"),
        user: Regex::new(r"(?i)(user\s*id|uid|username)\s*=\s*([^;]+)")
            .expect("user pattern is valid"),
        server: Regex::new(r"(?i)(server|data\s*source)\s*=\s*([^;]+)")
            .expect("server pattern is valid"),
    })
}

/// Mask the credential parts of an ADO-style connection string.
///
/// Passwords are replaced entirely, user names keep 4 characters and
/// server names keep 8. Other settings are left alone.
pub fn mask_connection_string(conn: &str) -> String {
    if conn.is_empty() {
        return String::new();
    }

    let patterns = connection_patterns();
    let masked = patterns
        .password
        .replace_all(conn, |caps: &Captures| format!("{}={MASK}", &caps[1]));
    let masked = patterns.user.replace_all(&masked, |caps: &Captures| {
        format!("{}={}", &caps[1], mask_value(&caps[2], Some(4)))
    });
    let masked = patterns.server.replace_all(&masked, |caps: &Captures| {
        format!("{}={}", &caps[1], mask_value(&caps[2], Some(8)))
    });
    masked.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_values_keep_four() {
        assert_eq!(mask_value("abcdefgh", None), "abcd****");
        assert_eq!(mask_value("abcde", None), "abcd****");
        assert_eq!(mask_value("abcd", None), "abcd");
        assert_eq!(mask_value("abc", None), "abc");
        assert_eq!(mask_value("", None), "");
    }

    #[test]
    fn test_medium_and_long_values() {
        assert_eq!(mask_value("mypassword123", None), "mypasswo****");
        assert_eq!(mask_value("abcdefghi", None), "abcdefgh****");
        assert_eq!(
            mask_value("ThisIsAVeryLongSecretKeyValue1234", None),
            "ThisIsAVeryLongS****"
        );
    }

    #[test]
    fn test_min_show_overrides_table() {
        assert_eq!(mask_value("administrator", Some(4)), "admi****");
        assert_eq!(mask_value("db", Some(4)), "db");
        assert_eq!(mask_value("secret", Some(0)), "****");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(mask_value("密码密码密码", None), "密码密码****");
    }

    #[test]
    fn test_mask_is_idempotent() {
        for value in [
            "abcde",
            "abcdefghi",
            "mypassword123",
            "ThisIsAVeryLongSecretKeyValue1234",
            "ab",
        ] {
            let once = mask_value(value, None);
            assert_eq!(mask_value(&once, None), once, "value {value}");
        }
    }

    #[test]
    fn test_connection_string() {
        assert_eq!(
            mask_connection_string("Server=myhost.com;User Id=admin;Password=secret123;"),
            "Server=myhost.c****;User Id=admi****;Password=****;"
        );
    }

    #[test]
    fn test_connection_string_variants() {
        assert_eq!(
            mask_connection_string("Data Source=db.internal.local;uid=sa;pwd=p@ss;Encrypt=True"),
            "Data Source=db.inter****;uid=sa;pwd=****;Encrypt=True"
        );
        assert_eq!(
            mask_connection_string("server = short ; PASSWORD = x"),
            "server=short ; PASSWORD=****"
        );
        assert_eq!(mask_connection_string("Trusted_Connection=True"), "Trusted_Connection=True");
    }
}
