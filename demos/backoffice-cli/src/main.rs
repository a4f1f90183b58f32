//! MegaMart back-office from the command line.
//!
//! Keeps its session in a file between invocations, so `login` once and
//! every later command runs as that user:
//!
//! ```text
//! megamart --session-file ~/.megamart/session.json login manager
//! megamart --session-file ~/.megamart/session.json open /stock
//! megamart --session-file ~/.megamart/session.json stock
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use megamart::client::DEFAULT_BASE_URL;
use megamart::prelude::*;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}", .0.user_message())]
    Backoffice(#[from] MegamartError),
    #[error("{0} is not available to your role")]
    Blocked(Destination),
    #[error("not logged in; run `megamart login <username>` first")]
    LoggedOut,
    #[error("could not encode output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "megamart", version, about = "MegaMart back-office client")]
struct Cli {
    /// Backend base endpoint.
    #[arg(long, env = "MEGAMART_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Where the session is kept between runs. Without it every run starts
    /// signed out.
    #[arg(long, env = "MEGAMART_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and remember the session.
    Login {
        username: String,
        #[arg(long, env = "MEGAMART_PASSWORD")]
        password: String,
    },
    /// Forget the session.
    Logout,
    /// Show who is logged in.
    Whoami,
    /// Resolve a screen by name or path and show where it lands.
    Open { destination: String },
    /// List the home tiles available to the current role.
    Menu,
    /// List categories.
    Categories,
    /// List products.
    Products,
    /// List stock levels.
    Stock,
    /// List past orders.
    Orders,
    /// List users.
    Users,
}

#[tokio::main]
async fn main() {
    megamart::logging::init_with_default("warn");

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let store = cli
        .session_file
        .map(StoreConfig::File)
        .unwrap_or(StoreConfig::Memory);
    let mut app = Backoffice::builder()
        .base_url(cli.base_url)
        .store(store)
        .build()?;

    match cli.command {
        Command::Login { username, password } => {
            match app.login(&username, &password).await? {
                Some(role) => println!("Logged in as {username} ({role})"),
                None => println!("Logged in as {username} (unrecognised role)"),
            }
        }
        Command::Logout => {
            app.logout();
            println!("Logged out");
        }
        Command::Whoami => {
            let session = app.session();
            match (session.is_authenticated(), session.role) {
                (false, _) => println!("Not logged in"),
                (true, Some(role)) => println!("Logged in ({role})"),
                (true, None) => println!("Logged in (unrecognised role)"),
            }
        }
        Command::Open { destination } => {
            let requested = if destination.starts_with('/') {
                Destination::from_path(&destination)
            } else {
                destination
                    .parse()
                    .map_err(|e| CliError::Backoffice(MegamartError::Router(e)))?
            };
            match app.navigate(requested) {
                Navigation::Render(d) => println!("{d}"),
                Navigation::Redirect(d) => println!("{requested} -> {d}"),
                Navigation::Defer => println!("{requested}: session still restoring"),
            }
        }
        Command::Menu => {
            if !app.session().is_authenticated() {
                return Err(CliError::LoggedOut);
            }
            for item in app.menu() {
                println!("{:<14}{}", item.title, item.destination);
            }
        }
        Command::Categories => {
            open(&mut app, Destination::Category)?;
            let rows = app.api()?.list_categories().await.map_err(MegamartError::from)?;
            print_rows(rows.iter().map(|c| json!({ "id": c.id, "name": c.name })))?;
        }
        Command::Products => {
            open(&mut app, Destination::Product)?;
            let rows = app.api()?.list_products().await.map_err(MegamartError::from)?;
            print_rows(rows.iter().map(|p| {
                json!({ "id": p.id, "name": p.name, "price": p.price, "category": p.category.name })
            }))?;
        }
        Command::Stock => {
            open(&mut app, Destination::Stock)?;
            let rows = app.api()?.list_stock().await.map_err(MegamartError::from)?;
            print_rows(
                rows.iter()
                    .map(|s| json!({ "id": s.id, "item": s.item.name, "qoh": s.qoh })),
            )?;
        }
        Command::Orders => {
            open(&mut app, Destination::Orders)?;
            let rows = app.api()?.list_orders().await.map_err(MegamartError::from)?;
            print_rows(rows.iter().map(|o| {
                json!({ "id": o.id, "at": o.order_date_time, "total": o.order_total })
            }))?;
        }
        Command::Users => {
            open(&mut app, Destination::User)?;
            let rows = app.api()?.list_users().await.map_err(MegamartError::from)?;
            print_rows(rows.iter().map(|u| {
                json!({ "id": u.id, "username": u.username, "role": u.user_type.as_str() })
            }))?;
        }
    }
    Ok(())
}

/// Navigates to `destination` and fails unless it actually renders.
fn open(app: &mut Backoffice, destination: Destination) -> Result<(), CliError> {
    match app.navigate(destination) {
        Navigation::Render(_) => Ok(()),
        Navigation::Redirect(Destination::Login) => Err(CliError::LoggedOut),
        Navigation::Redirect(_) | Navigation::Defer => {
            tracing::debug!(%destination, "screen not reachable");
            Err(CliError::Blocked(destination))
        }
    }
}

fn print_rows(rows: impl Iterator<Item = serde_json::Value>) -> Result<(), CliError> {
    for row in rows {
        println!("{}", serde_json::to_string(&row)?);
    }
    Ok(())
}
