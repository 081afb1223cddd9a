use super::{cart_table, dialog_error};
use chrono::Utc;
use clap::Subcommand;
use dialoguer::Confirm;
use twod_core::{BetOutcome, Result, TwoDClient, TwoDError};

#[derive(Subcommand)]
pub enum BetCommands {
    /// Submit the cart as one bet
    Submit {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_bet_command(cmd: BetCommands, client: &TwoDClient) -> Result<()> {
    match cmd {
        BetCommands::Submit { yes } => {
            if !client.auth().is_authenticated(Utc::now()).await? {
                return Err(TwoDError::SessionExpired);
            }

            let Some(confirm) = client.confirmation().await else {
                println!("Cart is empty, nothing to submit.");
                println!("Add numbers with: twod cart pick \"break 1\" --stake 100");
                return Ok(());
            };

            println!("{}", cart_table(confirm.cart()));

            if !yes {
                let proceed = Confirm::new()
                    .with_prompt(format!("Place bet of {}?", confirm.cart().total()))
                    .default(false)
                    .interact()
                    .map_err(dialog_error)?;

                if !proceed {
                    println!("Bet not submitted.");
                    return Ok(());
                }
            }

            match client.submitter().submit().await? {
                BetOutcome::Accepted {
                    message,
                    redirect_after,
                } => {
                    println!("{}", message.as_deref().unwrap_or("Bet placed successfully!"));
                    if let Some(user) = client.auth().current_user().await {
                        if let Some(balance) = user.profile.balance {
                            println!("Balance: {:.2}", balance);
                        }
                    }
                    tokio::time::sleep(redirect_after).await;
                    println!("Cart cleared. Pick new numbers with: twod cart pick");
                }
                BetOutcome::OverLimit { numbers } => {
                    println!("These numbers are over their limit: {}", numbers.join(", "));
                    println!("Adjust them with 'twod cart edit' or 'twod cart remove' and try again.");
                }
                BetOutcome::Rejected { message } => {
                    println!("Bet failed: {}", message);
                    println!("Your cart was kept.");
                }
                BetOutcome::InFlight => {
                    println!("A submission is already in progress.");
                }
            }
        }
    }

    Ok(())
}
