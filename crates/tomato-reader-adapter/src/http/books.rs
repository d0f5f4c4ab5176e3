/*
[INPUT]:  Keywords, book ids and chapter ids
[OUTPUT]: Search results, book details, catalogs and chapter text
[POS]:    HTTP layer - reading API endpoints (all signed)
[UPDATE]: When adding new endpoints or changing response format
*/

use reqwest::Method;

use crate::http::{ReaderClient, Result};
use crate::types::{ApiEnvelope, BookDetailData, BookSearchData, CatalogItem, ChapterContentData};

pub const SEARCH_ENDPOINT: &str = "/reading/bookapi/search/v/";
pub const DETAIL_ENDPOINT: &str = "/reading/bookapi/detail/v/";
pub const CATALOG_ENDPOINT: &str = "/reading/bookapi/directory/all_items/v/";
pub const CONTENT_ENDPOINT: &str = "/reading/bookapi/multi_detail/v/";

impl ReaderClient {
    /// Search books by keyword
    ///
    /// GET /reading/bookapi/search/v/?keyword={keyword}&limit={limit}&offset={offset}
    pub async fn search_books(
        &self,
        keyword: &str,
        limit: u32,
        offset: u32,
    ) -> Result<BookSearchData> {
        let builder = self.request(Method::GET, SEARCH_ENDPOINT)?.query(&[
            ("keyword", keyword.to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ]);
        let envelope: ApiEnvelope<BookSearchData> = self.send_json(builder).await?;
        envelope.into_data()
    }

    /// GET /reading/bookapi/detail/v/?item_id={item_id}
    pub async fn book_detail(&self, item_id: &str) -> Result<BookDetailData> {
        let builder = self
            .request(Method::GET, DETAIL_ENDPOINT)?
            .query(&[("item_id", item_id)]);
        let envelope: ApiEnvelope<BookDetailData> = self.send_json(builder).await?;
        envelope.into_data()
    }

    /// GET /reading/bookapi/directory/all_items/v/?item_id={item_id}
    pub async fn catalog(&self, item_id: &str) -> Result<Vec<CatalogItem>> {
        let builder = self
            .request(Method::GET, CATALOG_ENDPOINT)?
            .query(&[("item_id", item_id)]);
        self.send_json(builder).await
    }

    /// GET /reading/bookapi/multi_detail/v/?item_id={item_id}&chapter_id={chapter_id}
    pub async fn chapter_content(
        &self,
        item_id: &str,
        chapter_id: &str,
    ) -> Result<ChapterContentData> {
        let builder = self
            .request(Method::GET, CONTENT_ENDPOINT)?
            .query(&[("item_id", item_id), ("chapter_id", chapter_id)]);
        let envelope: ApiEnvelope<ChapterContentData> = self.send_json(builder).await?;
        envelope.into_data()
    }
}
