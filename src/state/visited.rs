/// Links already followed during one walk
///
/// Membership is exact string equality on the href; fragments and case are not
/// normalized. Every href ever followed stays in the set for the whole walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedSet {
    hrefs: Vec<String>,
}

impl VisitedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the href has already been followed
    pub fn contains(&self, href: &str) -> bool {
        self.hrefs.iter().any(|h| h == href)
    }

    /// Records a followed href
    ///
    /// Returns false, leaving the set untouched, if the href was already present.
    pub fn insert(&mut self, href: &str) -> bool {
        if self.contains(href) {
            return false;
        }
        self.hrefs.push(href.to_string());
        true
    }

    /// Number of hrefs followed
    pub fn len(&self) -> usize {
        self.hrefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hrefs.is_empty()
    }

    /// Hrefs in the order they were followed
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hrefs.iter().map(String::as_str)
    }
}
