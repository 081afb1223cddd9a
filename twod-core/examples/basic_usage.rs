use std::sync::Arc;
use tempfile::tempdir;
use twod_core::rules::catalog;
use twod_core::{ClientConfig, QuickPick, Storage, TwoDClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let temp_dir = tempdir()?;
    println!("Using temporary directory: {:?}", temp_dir.path());

    let storage = Arc::new(Storage::new(&temp_dir.path().join("twod.db")).await?);
    let client = TwoDClient::with_store(storage, ClientConfig::default())?;

    println!("Rules:");
    for group in catalog().iter().take(3) {
        println!("  {} ({}): {}", group.rule, group.label, group.numbers.join(" "));
    }

    // Build a cart; overlapping picks overwrite the stake
    let mut selection = client.selection().await;
    selection.pick(&QuickPick::Break(1), 100)?;
    selection.pick(&QuickPick::Size(1), 200)?;
    selection.add_numbers(&["27"], 500)?;
    selection.reverse(300)?;
    selection.proceed().await?;

    println!("\nCart:");
    for entry in selection.cart().entries() {
        println!("  {} -> {}", entry.number, entry.amount);
    }
    println!("Total: {}", selection.cart().total());

    // Review step, reading the persisted cart back
    if let Some(mut confirm) = client.confirmation().await {
        confirm.edit("27", 1000).await?;
        confirm.remove("10").await?;
        println!("\nAfter review: {} numbers, total {}", confirm.cart().len(), confirm.cart().total());
    }

    Ok(())
}
