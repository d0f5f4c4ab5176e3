/*
[INPUT]:  None (offline demonstration)
[OUTPUT]: Console output of a decorated request
[POS]:    Examples - request signing demonstration
[UPDATE]: When RequestDecorator or ReaderClient API changes
*/

//! Example: decorate a book-detail request without sending it.

use reqwest::Method;
use tomato_reader_adapter::ReaderClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = ReaderClient::new()?;
    let url = client.base_url().join("reading/bookapi/detail/v/?item_id=7143038691944959011")?;
    let builder = reqwest::Client::new().request(Method::GET, url);

    let request = client.prepare(builder)?;

    println!("{} {}", request.method(), request.url());
    for (name, value) in request.headers() {
        println!("{name}: {}", value.to_str().unwrap_or("<binary>"));
    }

    Ok(())
}
