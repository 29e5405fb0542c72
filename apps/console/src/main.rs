//! Wallet dashboard console.
//!
//! Terminal front end for the custodial wallet backend: log in, inspect the
//! wallet and transaction history, and watch the live notification feed.

use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use walletdash_api::UserApi;
use walletdash_core::Notification;
use walletdash_stream::{NotificationStream, StreamConfig};

#[derive(Parser, Debug)]
#[command(name = "walletdash")]
#[command(about = "Console for the custodial USDT/points wallet", long_about = None)]
struct Args {
    /// Backend base URL (defaults to WALLETDASH_API_URL, then localhost)
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token for authenticated commands (defaults to WALLETDASH_TOKEN)
    #[arg(long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and print the issued token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Show the wallet summary
    Wallet,
    /// Show the points balance
    Balance,
    /// List recent transactions
    Transactions {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// Watch the live notification feed for a user
    Watch {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        username: String,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn base_url(args: &Args) -> String {
    args.base_url
        .clone()
        .or_else(|| std::env::var("WALLETDASH_API_URL").ok())
        .unwrap_or_else(|| "http://localhost:8080".to_string())
}

fn user_api(args: &Args) -> UserApi {
    let base = base_url(args);
    match args
        .token
        .clone()
        .or_else(|| std::env::var("WALLETDASH_TOKEN").ok())
    {
        Some(token) => UserApi::with_token(base, token),
        None => UserApi::new(base),
    }
}

fn format_notification(n: &Notification) -> String {
    let mut line = format!("[{}] {}: {}", n.kind.as_str(), n.title, n.message);
    if let Some(hash) = &n.tx_hash {
        line.push_str(&format!(" (tx {hash})"));
    }
    if let Some(amount) = n.amount {
        line.push_str(&format!(" amount={amount}"));
    }
    line
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    match &args.command {
        Command::Login { username, password } => {
            let mut api = user_api(&args);
            let auth = api.login(username, password).await?;
            println!("token: {}", auth.token);
            if let Some(user) = auth.user {
                println!("user:  {} ({})", user.username, user.id);
            }
        }
        Command::Wallet => {
            let api = user_api(&args);
            let wallet = api.wallet().await?;
            println!("address: {}", wallet.address.as_deref().unwrap_or("-"));
            println!("usdt:    {}", wallet.usdt_balance.as_deref().unwrap_or("-"));
            println!("trx:     {}", wallet.trx_balance.as_deref().unwrap_or("-"));
            if let Some(points) = wallet.points_balance {
                println!("points:  {points}");
            }
        }
        Command::Balance => {
            let api = user_api(&args);
            let balance = api.points_balance().await?;
            println!("points: {}", balance.balance);
        }
        Command::Transactions { page, size } => {
            let api = user_api(&args);
            let history = api.transactions(*page, *size).await?;
            for tx in &history.items {
                println!(
                    "{}  {:>12}  {:?}  {:?}",
                    tx.created_at
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_else(|| "-".to_string()),
                    tx.amount.as_deref().unwrap_or("-"),
                    tx.transaction_type,
                    tx.status,
                );
            }
            if let Some(total) = history.total_elements {
                println!("-- page {} of {} transactions", page, total);
            }
        }
        Command::Watch { user_id, username } => {
            watch(base_url(&args), user_id, username).await;
        }
    }
    Ok(())
}

/// Connect the notification stream and print events until interrupted.
async fn watch(base: String, user_id: &str, username: &str) {
    let mut stream =
        NotificationStream::with_balance_callback(StreamConfig::for_base_url(base), |balance| {
            println!("points balance refreshed: {balance}");
        });
    stream.connect(user_id, username);
    println!("watching notifications for {username} (ctrl-c to stop)");

    let mut seen: HashSet<String> = HashSet::new();
    let mut was_connected = false;
    let mut ticker = tokio::time::interval(Duration::from_millis(500));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                let connected = stream.is_connected();
                if connected != was_connected {
                    if connected {
                        println!("-- connected");
                    } else if let Some(err) = stream.connection_error() {
                        println!("-- {err}");
                    }
                    was_connected = connected;
                }

                for n in stream.notifications().iter().rev() {
                    if let Some(id) = &n.assigned_id {
                        if seen.insert(id.clone()) {
                            println!("{}", format_notification(n));
                        }
                    }
                }

                if !stream.is_active() {
                    if let Some(err) = stream.connection_error() {
                        error!("{err}");
                    }
                    break;
                }
            }
        }
    }

    stream.disconnect();
    debug!("notification stream closed");
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    init_logging();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        error!("{e}");
        std::process::exit(1);
    }
}
