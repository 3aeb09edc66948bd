//! Example showcasing all temp-mail client functionality.
//!
//! Features demonstrated:
//! - Creating a client (with optional passthrough proxy)
//! - Viewing available email domains
//! - Provisioning a temporary email address
//! - Polling for incoming messages
//! - Reading a message body
//!
//! Run with `RUST_LOG=debug` to see every request the client makes.

use tempmail_client::{Client, Error};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("📧 temp-mail Rust Client - Full Demo");
    println!("{}", "=".repeat(50));

    // =========================================
    // 1. Create client (optionally with proxy)
    // =========================================
    println!("\n🔌 Creating client...");

    // Without proxy:
    let client = Client::new()?;

    // Through a passthrough proxy script (uncomment to use):
    // let mut client = Client::new()?;
    // client.set_proxy("http://example.com/proxy.php?url=");

    // =========================================
    // 2. View available domains
    // =========================================
    println!("\n🌐 Available email domains:");
    let domains = client.domains().await?;
    for domain in &domains {
        println!("   - {}", domain);
    }

    // =========================================
    // 3. Provision a temporary email address
    // =========================================
    println!("\n📬 Creating temporary email...");
    let local_part = format!("demo{}", rand::random::<u16>());
    let email = client
        .new_address(Some(&local_part), domains.first().map(String::as_str))
        .await?;
    println!("   ✅ Mailbox: {}", email);

    // =========================================
    // 4. Poll for messages
    // =========================================
    println!("\n⏳ Waiting for messages...");
    println!("   Send an email to: {}", email);
    println!("   (Polling for up to 2 minutes)");

    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_secs(120);
    let poll_interval = std::time::Duration::from_secs(5);

    loop {
        let rows = client.messages(&email, None).await?;

        if !rows.is_empty() {
            println!("\n\n📥 Received {} message(s)!", rows.len());

            for row in &rows {
                println!("\n{}", "-".repeat(50));
                println!("From:        {}", row.sender);
                println!("Subject:     {}", row.subject);
                println!("Link:        {}", row.read_url);

                // =========================================
                // 5. Read the message body
                // =========================================
                println!("\n📄 Fetching message body...");
                match client.read_message(&row.read_url).await {
                    Ok(body) => {
                        println!("   Body length: {} characters", body.len());
                        let preview: String = body.chars().take(500).collect();
                        for line in preview.lines().take(10) {
                            println!("   {}", line);
                        }
                    }
                    Err(Error::MessageNotFound) => println!("   ⚠️  Message already gone"),
                    Err(e) => eprintln!("   ❌ Failed to fetch: {}", e),
                }
            }
            break;
        }

        if start.elapsed() >= timeout {
            println!("\n\n⚠️  Timeout: No messages received");
            break;
        }

        let remaining = (timeout - start.elapsed()).as_secs();
        print!("\r   Checking... {} seconds remaining   ", remaining);
        use std::io::Write;
        std::io::stdout().flush().ok();

        tokio::time::sleep(poll_interval).await;
    }

    println!("\n{}", "=".repeat(50));
    println!("✨ Demo complete!");

    Ok(())
}
