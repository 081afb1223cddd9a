use chrono::{TimeZone, Utc};
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use twod_core::{Result, TwoDClient, TwoDError};

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show profile and balance
    Show {
        /// Use the cached profile instead of asking the server
        #[arg(short, long)]
        cached: bool,
    },
}

pub async fn handle_profile_command(cmd: ProfileCommands, client: &TwoDClient) -> Result<()> {
    match cmd {
        ProfileCommands::Show { cached } => {
            if !client.auth().is_authenticated(Utc::now()).await? {
                return Err(TwoDError::SessionExpired);
            }

            if !cached && client.auth().refresh_profile(Utc::now()).await?.is_none() {
                println!("Server did not return a profile, showing cached data.");
            }

            let Some(user) = client.auth().current_user().await else {
                println!("No profile stored.");
                return Ok(());
            };

            let format_amount =
                |amount: Option<f64>| amount.map_or_else(|| "-".to_string(), |a| format!("{:.2}", a));
            let since = Utc
                .timestamp_millis_opt(user.token_time)
                .single()
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_default();

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Field", "Value"]);
            let rows = [
                ("Name", user.profile.display_name().to_string()),
                (
                    "User name",
                    user.profile.user_name.clone().unwrap_or_else(|| "-".to_string()),
                ),
                (
                    "Phone",
                    user.profile.phone.clone().unwrap_or_else(|| "-".to_string()),
                ),
                ("Balance", format_amount(user.profile.balance)),
                ("Main balance", format_amount(user.profile.main_balance)),
                ("Session renewed", since),
            ];
            for (field, value) in rows {
                table.add_row(vec![field.to_string(), value]);
            }

            println!("{}", table);
        }
    }

    Ok(())
}
