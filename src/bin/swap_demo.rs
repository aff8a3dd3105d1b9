use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use v2_swap_sdk::app::command::{Command, HELP};
use v2_swap_sdk::common::AnyResult;
use v2_swap_sdk::{SwapApp, SwapClient, SwapConfig};

#[tokio::main]
async fn main() -> AnyResult<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = SwapConfig::from_env()?;
    log::info!("config: {config:?}");
    println!("\n🚀 Sepolia Swap Demo (Uniswap V2 Router {})\n", config.router);

    let app = Arc::new(SwapApp::new(SwapClient::from_config(config)?));

    // 状态栏：每次变化打印一行
    let mut status = app.status().subscribe();
    tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let line = status.borrow_and_update().clone();
            if !line.is_empty() {
                println!("Status: {line}");
            }
        }
    });

    println!("{HELP}\n");
    let mut tasks: Vec<JoinHandle<()>> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err} (type `help`)");
                continue;
            },
        };

        match command {
            Command::Connect => {
                let _ = app.connect().await;
            },
            Command::Disconnect => app.disconnect(),
            Command::TokenIn(value) => app.update_form(|form| form.set_token_in(&value)),
            Command::TokenOut(value) => app.update_form(|form| form.set_token_out(&value)),
            Command::Amount(value) => app.update_form(|form| form.set_amount(&value)),
            Command::Slippage(value) => app.update_form(|form| form.set_slippage(&value)),
            Command::ShowForm => {
                let form = app.form();
                let account = app.account().map(|a| a.to_string());
                println!("Account:   [{}]", account.as_deref().unwrap_or("not connected"));
                println!("Token In:  {}", if form.token_in.is_empty() { "(native ETH)" } else { form.token_in.as_str() });
                println!("Token Out: {}", form.token_out);
                println!("Amount:    {}", form.amount);
                println!("Slippage:  {}%", form.slippage);
            },
            Command::Quote => {
                let app = Arc::clone(&app);
                tasks.push(tokio::spawn(async move {
                    if let Ok(quote) = app.request_quote().await {
                        if let Ok(json) = serde_json::to_string(&quote) {
                            log::debug!("quote: {json}");
                        }
                    }
                }));
            },
            Command::Swap => {
                // 在后台执行，流程进行中再次 swap 会被拒绝
                let app = Arc::clone(&app);
                tasks.push(tokio::spawn(async move {
                    if let Ok(outcome) = app.execute_swap().await {
                        match serde_json::to_string_pretty(&outcome) {
                            Ok(json) => println!("{json}"),
                            Err(err) => log::warn!("failed to render outcome: {err}"),
                        }
                    }
                }));
            },
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
        tasks.retain(|task| !task.is_finished());
    }

    // 退出前等待仍在确认中的交易，否则结果会丢失
    if app.is_busy() {
        println!("⏳ Waiting for the running swap to finish...");
    }
    for task in tasks {
        if let Err(err) = task.await {
            log::warn!("background task failed: {err}");
        }
    }

    Ok(())
}
