/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::BookStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSearchData {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(rename = "item_data_list", default)]
    pub books: Vec<BookItem>,
}

/// Search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookItem {
    pub item_id: String,
    pub book_name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub read_count: u64,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub status: BookStatus,
    #[serde(default)]
    pub create_time: i64,
    #[serde(default)]
    pub update_time: i64,
    #[serde(default)]
    pub last_chapter_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDetailData {
    #[serde(rename = "item_data")]
    pub book: BookInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInfo {
    pub item_id: String,
    pub book_name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub read_count: u64,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub status: BookStatus,
    #[serde(default)]
    pub create_time: i64,
    #[serde(default)]
    pub update_time: i64,
    #[serde(default)]
    pub last_chapter_title: String,
    #[serde(default)]
    pub last_chapter_id: String,
    #[serde(default)]
    pub first_chapter_id: String,
    #[serde(default)]
    pub chapter_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub score: f32,
}

/// Catalog entry; the catalog endpoint returns a bare array of these
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub item_id: String,
    pub chapter_id: String,
    pub chapter_title: String,
    #[serde(default)]
    pub chapter_index: u32,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub is_vip: bool,
    #[serde(default)]
    pub create_time: i64,
    #[serde(default)]
    pub update_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterContentData {
    #[serde(rename = "item_data_list", default)]
    pub chapters: Vec<ChapterContentItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterContentItem {
    pub item_id: String,
    pub chapter_id: String,
    #[serde(default)]
    pub chapter_title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub is_vip: bool,
}
