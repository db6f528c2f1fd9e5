//! News article record model.

use serde::{Deserialize, Serialize};

/// Structured data extracted from a news article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(rename = "Title")]
    pub title: Option<String>,

    #[serde(rename = "Date")]
    pub date: Option<String>,

    #[serde(rename = "Author")]
    pub author: Option<String>,

    #[serde(rename = "Summary")]
    pub summary: Option<String>,

    #[serde(rename = "Key Points")]
    pub key_points: Vec<String>,
}
