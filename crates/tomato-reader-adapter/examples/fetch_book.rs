/*
[INPUT]:  Book id from the command line
[OUTPUT]: Console output of book detail and first catalog entries
[POS]:    Examples - live API demonstration
[UPDATE]: When book endpoints change
*/

//! Example: fetch a book's detail and catalog from the live service.

use tomato_reader_adapter::ReaderClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let item_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "7143038691944959011".to_string());

    let client = ReaderClient::new()?;

    let detail = client.book_detail(&item_id).await?;
    println!("{} by {}", detail.book.book_name, detail.book.author);

    let catalog = client.catalog(&item_id).await?;
    for chapter in catalog.iter().take(5) {
        println!("  {:>4} {}", chapter.chapter_index, chapter.chapter_title);
    }

    Ok(())
}
