use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use twod_core::{LiveView, Result, TwoDClient, TwoDError};

#[derive(Subcommand)]
pub enum LiveCommands {
    /// Fetch the live board once
    Show,
    /// Keep polling until Ctrl-C
    Watch,
}

pub async fn handle_live_command(cmd: LiveCommands, client: &TwoDClient) -> Result<()> {
    let poller = client.live_poller();

    match cmd {
        LiveCommands::Show => {
            poller.tick().await;
            let view = poller.view();
            if let Some(error) = view.error {
                return Err(TwoDError::network(error));
            }
            print_view(&view);
        }

        LiveCommands::Watch => {
            let handle = poller.start();
            let mut ticker = tokio::time::interval(client.config().poll_interval);
            let mut last_shown: Option<LiveView> = None;
            let ctrl_c = tokio::signal::ctrl_c();
            tokio::pin!(ctrl_c);

            println!("Watching live draw, press Ctrl-C to stop.");
            loop {
                tokio::select! {
                    _ = &mut ctrl_c => break,
                    _ = ticker.tick() => {
                        let view = handle.view();
                        let changed = last_shown
                            .as_ref()
                            .map_or(true, |last| last.draw != view.draw || last.error != view.error);
                        if view.updated_at.is_some() && changed {
                            print_view(&view);
                            last_shown = Some(view);
                        }
                    }
                }
            }

            handle.stop();
            println!("Stopped.");
        }
    }

    Ok(())
}

fn print_view(view: &LiveView) {
    let Some(draw) = &view.draw else {
        println!("No live data yet.");
        return;
    };

    let live = draw.live.clone().unwrap_or_default();
    println!(
        "2D {}   {} {}",
        live.twod.as_deref().unwrap_or("--"),
        live.date.as_deref().unwrap_or(""),
        live.time.as_deref().unwrap_or("")
    );
    if let Some(error) = &view.error {
        println!("(stale: {})", error);
    }

    if draw.result.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Time", "Set", "Value", "2D"]);
    for result in &draw.result {
        table.add_row(vec![
            result.open_time.clone().unwrap_or_default(),
            result.set_label.clone().unwrap_or_default(),
            result.value.clone().unwrap_or_default(),
            result.two_digit.clone().unwrap_or_else(|| "--".to_string()),
        ]);
    }
    println!("{}", table);
}
