use regex::Regex;
use std::sync::LazyLock;

static NON_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("invalid regex"));

/// A structural location inside a document.
///
/// Paths grow by nesting: descending into `key` under `path` produces the tuple
/// `(path, key)`, so a deep location is a tuple of tuples. [`normalize`] resolves the
/// nesting into one dotted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Name(String),
    Tuple(Vec<Self>),
}

impl PathSegment {
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    #[must_use]
    pub fn tuple<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Self>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Returns the tuple `(self, child)`.
    #[must_use]
    pub fn nest(&self, child: impl Into<Self>) -> Self {
        Self::Tuple(vec![self.clone(), child.into()])
    }

    /// Returns the tuple `(self, first, second)`.
    #[must_use]
    pub fn nest_pair(&self, first: impl Into<Self>, second: impl Into<Self>) -> Self {
        Self::Tuple(vec![self.clone(), first.into(), second.into()])
    }

    /// The plain name, if this segment is not a tuple.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Tuple(_) => None,
        }
    }

    fn write_normalized(&self, out: &mut String) {
        match self {
            Self::Name(name) => out.push_str(&normalize_name(name)),
            Self::Tuple(items) => {
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        out.push('.');
                    }
                    item.write_normalized(out);
                }
            }
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for PathSegment {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

/// Normalize a single name: trimmed, lowercased, and every run of non-word characters
/// collapsed into one underscore.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    NON_WORD_REGEX.replace_all(&name.trim().to_lowercase(), "_").into_owned()
}

/// Resolve a possibly nested path into its dotted form.
///
/// A one-element tuple normalizes as its sole element; a longer tuple is the dotted
/// join of its normalized head and its normalized tail, at any depth. An empty tuple
/// normalizes to an empty string.
#[must_use]
pub fn normalize(segment: &PathSegment) -> String {
    let mut out = String::new();
    segment.write_normalized(&mut out);
    out
}
