use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use twod_core::rules::catalog;
use twod_core::{QuickPick, Result, TwoDError};

#[derive(Subcommand)]
pub enum RulesCommands {
    /// List break groups, size classes and twenty ranges
    List,
    /// Show the numbers a rule stands for, e.g. "break 1", "head:3", "power"
    Show {
        /// Rule
        rule: String,
    },
}

pub fn handle_rules_command(cmd: RulesCommands) -> Result<()> {
    match cmd {
        RulesCommands::List => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Rule", "Label", "Numbers"]);

            for group in catalog() {
                table.add_row(vec![
                    group.rule.to_string(),
                    group.label,
                    group.numbers.join(" "),
                ]);
            }

            println!("{}", table);
            println!("Also available: head <d>, tail <d>, pathee <d>, power");
        }

        RulesCommands::Show { rule } => {
            let rule: QuickPick = rule.parse()?;
            let numbers = rule.expand();
            if numbers.is_empty() {
                return Err(TwoDError::validation(format!("'{}' matches no numbers", rule)));
            }

            println!("{} ({} numbers)", rule.label().unwrap_or_else(|| rule.to_string()), numbers.len());
            println!("{}", numbers.join(" "));
        }
    }

    Ok(())
}
