use super::dialog_error;
use chrono::Utc;
use clap::Subcommand;
use dialoguer::Password;
use twod_core::{LoginCredentials, Result, TwoDClient};

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Login with user name (phone) and password
    Login {
        /// User name
        user_name: String,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
        /// Keep the session for 30 days instead of 24 hours
        #[arg(short, long)]
        remember: bool,
    },
    /// Logout and clear the local session
    Logout,
    /// Show whether a session is active
    Status,
}

pub async fn handle_auth_command(cmd: AuthCommands, client: &TwoDClient) -> Result<()> {
    match cmd {
        AuthCommands::Login {
            user_name,
            password,
            remember,
        } => {
            let password = match password {
                Some(p) => p,
                None => Password::new()
                    .with_prompt("Password")
                    .interact()
                    .map_err(dialog_error)?,
            };

            let credentials = LoginCredentials {
                user_name,
                password,
            };
            let user = client.auth().login(&credentials, remember, Utc::now()).await?;

            println!("Logged in as {}", user.profile.display_name());
            if remember {
                println!("Session kept for 30 days");
            }
        }

        AuthCommands::Logout => {
            client.auth().logout().await?;
            println!("Logged out.");
        }

        AuthCommands::Status => {
            if client.auth().is_authenticated(Utc::now()).await? {
                let name = client
                    .auth()
                    .current_user()
                    .await
                    .map(|u| u.profile.display_name().to_string())
                    .unwrap_or_default();
                println!("Logged in as {}", name);
            } else {
                println!("Not logged in.");
                println!("Login with: twod auth login <user_name>");
            }
        }
    }

    Ok(())
}
