//! Hacker News item payloads

use serde::{Deserialize, Serialize};

/// A top-level story item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: u64,
    pub title: String,
    /// Missing for Ask HN and similar text posts
    #[serde(default)]
    pub url: String,
    pub score: i64,
    pub by: String,
    /// Unix time in seconds
    pub time: i64,
    /// Ids of first-level comments
    #[serde(default)]
    pub kids: Option<Vec<u64>>,
    #[serde(default)]
    pub descendants: Option<u64>,
}

/// A comment item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub parent: u64,
    #[serde(default)]
    pub text: String,
    /// Empty for deleted comments
    #[serde(default)]
    pub by: String,
    pub time: i64,
    #[serde(default)]
    pub kids: Option<Vec<u64>>,
}
