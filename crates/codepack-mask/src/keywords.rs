//! Sensitive keyword set.

/// Keywords that mark a key or identifier as holding a secret.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "password",
    "pwd",
    "passwd",
    "secret",
    "key",
    "token",
    "apikey",
    "api_key",
    "connectionstring",
    "connstr",
    "connection_string",
    "hash",
    "salt",
    "signature",
    "private",
    "credential",
    "auth",
    "jwt",
    "bearer",
    "database",
    "server",
    "userid",
    "user_id",
    "username",
    "smtp",
    "mail",
];

/// Case-insensitive keyword matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveKeywords {
    keywords: Vec<String>,
}

impl SensitiveKeywords {
    /// Build a keyword set; entries are lowercased, blanks and repeats dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self {
            keywords: Vec::new(),
        };
        set.extend(keywords);
        set
    }

    /// Default set extended with additional keywords.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        set.extend(extra);
        set
    }

    fn extend<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !self.keywords.contains(&keyword) {
                self.keywords.push(keyword);
            }
        }
    }

    /// Whether `key` contains any keyword, ignoring case.
    pub fn matches(&self, key: &str) -> bool {
        let lower = key.to_lowercase();
        self.keywords.iter().any(|keyword| lower.contains(keyword.as_str()))
    }

    /// Regex alternation of all keywords, escaped.
    pub fn alternation(&self) -> String {
        self.keywords
            .iter()
            .map(|keyword| regex::escape(keyword))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Keywords in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for SensitiveKeywords {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS)
    }
}
