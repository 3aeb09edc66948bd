//! List an existing temp-mail inbox and print the first message.
//!
//! Usage: `cargo run --example get_mail -- <address> [filter]`

use tempmail_client::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let address = args.next().ok_or("usage: get_mail <address> [filter]")?;
    let filter = args.next();

    let client = Client::new()?;
    let rows = client.messages(&address, filter.as_deref()).await?;
    println!("📥 {} message(s) for {}", rows.len(), address);

    for row in &rows {
        println!("   - From: {}, Subject: {}", row.sender, row.subject);
    }

    if let Some(first) = rows.first() {
        let body = client.read_message(&first.read_url).await?;
        println!("\n{}", "-".repeat(50));
        println!("{body}");
    }

    Ok(())
}
