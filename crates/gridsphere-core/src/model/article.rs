use serde::{Deserialize, Serialize};

/// A blog article. Static for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub image: String,
    /// Publish date as written in the catalog (`YYYY-MM-DD`).
    pub date: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub content: String,
}

impl Article {
    /// Text the blog search matches against: title, excerpt, then tags.
    #[must_use]
    pub fn search_text(&self) -> String {
        let mut parts = Vec::with_capacity(2 + self.tags.len());
        parts.push(self.title.as_str());
        parts.push(self.excerpt.as_str());
        parts.extend(self.tags.iter().map(String::as_str));
        parts.join(" ")
    }

    /// Body split into paragraphs on newlines, the way the article page lays it out.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }
}

#[cfg(test)]
mod tests {
    use super::Article;

    fn article() -> Article {
        Article {
            id: "edge".into(),
            title: "Edge Compute".into(),
            excerpt: "Latency matters".into(),
            image: String::new(),
            date: "2025-05-11".into(),
            author: "Kai".into(),
            tags: vec!["Edge".into(), "DevOps".into()],
            content: "one\n\ntwo".into(),
        }
    }

    #[test]
    fn search_text_joins_title_excerpt_and_tags() {
        assert_eq!(article().search_text(), "Edge Compute Latency matters Edge DevOps");
    }

    #[test]
    fn paragraphs_keep_blank_lines() {
        let a = article();
        let paras: Vec<&str> = a.paragraphs().collect();
        assert_eq!(paras, vec!["one", "", "two"]);
    }

    #[test]
    fn tags_default_to_empty() {
        let json = r#"{"id":"a","title":"t","excerpt":"e","image":"i","date":"d","author":"x","content":"c"}"#;
        let a: Article = serde_json::from_str(json).expect("parse article");
        assert!(a.tags.is_empty());
    }
}
