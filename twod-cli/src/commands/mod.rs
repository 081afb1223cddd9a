pub mod auth;
pub mod bet;
pub mod cart;
pub mod live;
pub mod profile;
pub mod rules;

pub use auth::{handle_auth_command, AuthCommands};
pub use bet::{handle_bet_command, BetCommands};
pub use cart::{handle_cart_command, CartCommands};
pub use live::{handle_live_command, LiveCommands};
pub use profile::{handle_profile_command, ProfileCommands};
pub use rules::{handle_rules_command, RulesCommands};

use comfy_table::{presets::UTF8_FULL, Table};
use twod_core::{BetCart, TwoDError};

pub(crate) fn cart_table(cart: &BetCart) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Number", "Amount"]);

    for (i, entry) in cart.entries().iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            entry.number.clone(),
            entry.amount.to_string(),
        ]);
    }
    table.add_row(vec![String::new(), "Total".to_string(), cart.total().to_string()]);
    table
}

pub(crate) fn dialog_error(e: dialoguer::Error) -> TwoDError {
    TwoDError::internal(format!("Prompt failed: {}", e))
}
