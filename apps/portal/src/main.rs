use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{BillStore, FileSessionStore, HttpBillStore, InMemoryBillStore};
use portal::{
    config::load_settings,
    controller::new_bill::{NewBillForm, SelectedFile},
    paths,
    ui::Views,
    Router, RouterOptions, UiAction,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "portal", about = "Employee expense reports")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured storage API URL.
    #[arg(long)]
    api_url: Option<String>,
    /// Use a throwaway in-memory store instead of the remote API.
    #[arg(long)]
    offline: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
    },
    Logout,
    Bills,
    NewBill {
        #[arg(long = "type", default_value = "Transports")]
        expense_type: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "")]
        vat: String,
        #[arg(long, default_value = "")]
        pct: String,
        #[arg(long, default_value = "")]
        commentary: String,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Opens the receipt of a listed bill.
    Preview {
        bill_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref());
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();

    let store: Arc<dyn BillStore> = if args.offline {
        Arc::new(InMemoryBillStore::new())
    } else {
        Arc::new(HttpBillStore::new(settings.api_url.clone()).with_token(settings.api_token.clone()))
    };
    let session = Arc::new(
        FileSessionStore::open(&settings.session_file).with_context(|| {
            format!(
                "failed to open session file '{}'",
                settings.session_file.display()
            )
        })?,
    );
    let views = Arc::new(Views::new().context("failed to load page templates")?);
    let mut router = Router::new(store, session, views, RouterOptions::from(&settings));
    info!(api_url = %settings.api_url, offline = args.offline, "portal started");

    match args.command {
        Command::Login { email } => {
            router.navigate(paths::LOGIN).await?;
            router
                .dispatch(UiAction::SubmitEmployeeLogin { email })
                .await?;
        }
        Command::Logout => {
            router.dispatch(UiAction::Logout).await?;
        }
        Command::Bills => {
            router.navigate(paths::BILLS).await?;
        }
        Command::NewBill {
            expense_type,
            name,
            date,
            amount,
            vat,
            pct,
            commentary,
            file,
        } => {
            router.navigate(paths::NEW_BILL).await?;
            if let Some(path) = file {
                let bytes = tokio::fs::read(&path)
                    .await
                    .with_context(|| format!("failed to read receipt '{}'", path.display()))?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                router
                    .dispatch(UiAction::SelectFile(SelectedFile::new(file_name, None, bytes)))
                    .await?;
            }
            let form = NewBillForm {
                expense_type,
                name,
                date,
                amount,
                vat,
                pct,
                commentary,
            };
            router
                .dispatch(UiAction::SubmitNewBill(form))
                .await
                .context("bill submission failed")?;
        }
        Command::Preview { bill_id } => {
            router.navigate(paths::BILLS).await?;
            let icon = router
                .document()
                .eye_icons()
                .iter()
                .find(|icon| icon.bill_id.as_deref() == Some(bill_id.as_str()))
                .cloned()
                .with_context(|| format!("no listed bill with id '{bill_id}'"))?;
            router.dispatch(UiAction::ClickIconEye(icon)).await?;
        }
    }

    for alert in router.take_alerts() {
        eprintln!("alert: {alert}");
    }
    println!("{}", router.document().html());
    Ok(())
}
