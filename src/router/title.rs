//! Document title synchronization

/// Receives the document title after each navigation
pub trait TitleSink {
    fn set_title(&mut self, title: &str);
}

/// In-memory document title that counts how often it was written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTitle {
    title: String,
    writes: usize,
}

impl DocumentTitle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current title
    pub fn get(&self) -> &str {
        &self.title
    }

    /// Number of title writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl TitleSink for DocumentTitle {
    fn set_title(&mut self, title: &str) {
        self.title.clear();
        self.title.push_str(title);
        self.writes += 1;
    }
}
