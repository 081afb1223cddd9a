use super::cart_table;
use clap::Subcommand;
use twod_core::cart::parse_amount;
use twod_core::storage::cart_store::CartPayload;
use twod_core::{QuickPick, Result, TwoDClient, TwoDError};

#[derive(Subcommand)]
pub enum CartCommands {
    /// Show the cart
    Show {
        /// Print the stored JSON payload
        #[arg(long)]
        json: bool,
    },
    /// Add numbers by hand, e.g. `twod cart add 05 12 --stake 300`
    Add {
        /// Two-digit numbers
        #[arg(required = true)]
        numbers: Vec<String>,
        /// Stake per number
        #[arg(short, long)]
        stake: String,
    },
    /// Add every number of a quick-pick rule, e.g. "break 1", "range:20-39"
    Pick {
        /// Rule
        rule: String,
        /// Stake per number
        #[arg(short, long)]
        stake: String,
    },
    /// Add the reverse of every number already in the cart
    Reverse {
        /// Stake per reversed number
        #[arg(short, long)]
        stake: String,
    },
    /// Change the stake of a number
    Edit {
        /// Number in the cart
        number: String,
        /// New stake
        amount: String,
    },
    /// Remove a number
    Remove {
        /// Number in the cart
        number: String,
    },
    /// Empty the cart
    Clear,
}

pub async fn handle_cart_command(cmd: CartCommands, client: &TwoDClient) -> Result<()> {
    match cmd {
        CartCommands::Show { json } => {
            let Some(confirm) = client.confirmation().await else {
                println!("Cart is empty.");
                println!("Add numbers with: twod cart pick \"break 1\" --stake 100");
                return Ok(());
            };

            if json {
                let payload = CartPayload::from(confirm.cart());
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{}", cart_table(confirm.cart()));
            }
        }

        CartCommands::Add { numbers, stake } => {
            let stake = parse_amount(&stake)?;
            let mut selection = client.selection().await;
            let added = selection.add_numbers(&numbers, stake)?;
            selection.proceed().await?;

            println!(
                "Added {} numbers at {} each. Cart total: {}",
                added,
                stake,
                selection.cart().total()
            );
        }

        CartCommands::Pick { rule, stake } => {
            let rule: QuickPick = rule.parse()?;
            let stake = parse_amount(&stake)?;
            let mut selection = client.selection().await;

            let added = selection.pick(&rule, stake)?;
            if added == 0 {
                return Err(TwoDError::validation(format!("'{}' matches no numbers", rule)));
            }
            selection.proceed().await?;

            println!(
                "{}: {} numbers at {} each. Cart total: {}",
                rule.label().unwrap_or_else(|| rule.to_string()),
                added,
                stake,
                selection.cart().total()
            );
        }

        CartCommands::Reverse { stake } => {
            let stake = parse_amount(&stake)?;
            let mut selection = client.selection().await;
            let added = selection.reverse(stake)?;
            if added > 0 {
                selection.proceed().await?;
            }

            println!("Added {} reversed numbers. Cart total: {}", added, selection.cart().total());
        }

        CartCommands::Edit { number, amount } => {
            let amount = parse_amount(&amount)?;
            let mut confirm = client
                .confirmation()
                .await
                .ok_or_else(|| TwoDError::not_found(&number))?;

            confirm.edit(&number, amount).await?;
            println!("{} now {}. Cart total: {}", number, amount, confirm.cart().total());
        }

        CartCommands::Remove { number } => {
            let mut confirm = client
                .confirmation()
                .await
                .ok_or_else(|| TwoDError::not_found(&number))?;

            let removed = confirm.remove(&number).await?;
            println!(
                "Removed {} ({}). Cart total: {}",
                removed.number,
                removed.amount,
                confirm.cart().total()
            );
        }

        CartCommands::Clear => {
            client.carts().clear().await?;
            println!("Cart cleared.");
        }
    }

    Ok(())
}
