//! `catalog`: terminal front end for the data catalog.
//!
//! The session is kept in the platform data directory between invocations
//! (see [`store::FileStore`]). Commands that need a session print a hint to
//! run `catalog login` when there is none or it has expired.

mod cli;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use api::ApiClient;
use catalog::product_page::{self, NOT_FOUND};
use catalog::{
    AuthFlow, CatalogApi, CatalogController, MutationOutcome, ProductDetail, ProductPage,
    RecordingNavigator, Resource, Route, Tab,
};
use store::{CatalogConfig, FileStore, NewUser, ProductId, SessionProvider, SessionStore};

use crate::cli::{Cli, Command};

type Client = ApiClient<SessionStore<FileStore>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref());

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(directive: Option<&str>) {
    let filter = directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("data-catalog")
        .join(CatalogConfig::filename())
}

fn load_config(cli: &Cli) -> anyhow::Result<CatalogConfig> {
    let path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = CatalogConfig::load(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    Ok(match &cli.api_url {
        Some(url) => config.with_base_url(url.as_str()),
        None => config,
    })
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli)?;
    let sessions = SessionStore::with_key(FileStore::in_data_dir(), config.session.key.clone());
    let client: Client = ApiClient::from_config(&config, sessions);
    tracing::debug!("Using catalog service at {}", client.base_url());

    let navigator = RecordingNavigator::new();
    let code = match cli.command {
        Command::Login { username, password } => {
            let flow = AuthFlow::new(&client, client.session(), &navigator);
            match flow.login(&username, &password).await {
                Ok(user) => {
                    println!("Signed in as {}", user.display_name());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{e}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Register {
            username,
            password,
            email,
            full_name,
        } => {
            let flow = AuthFlow::new(&client, client.session(), &navigator);
            let new_user = NewUser {
                username,
                email,
                full_name,
                password,
            };
            match flow.register(&new_user).await {
                Ok(user) => {
                    println!("Registered and signed in as {}", user.display_name());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{e}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Logout => {
            AuthFlow::new(&client, client.session(), &navigator).logout();
            if client.session().is_authenticated() {
                eprintln!("error: the stored session could not be removed");
                ExitCode::FAILURE
            } else {
                println!("Signed out");
                ExitCode::SUCCESS
            }
        }
        Command::Whoami => match client.current_user().await {
            Ok(user) => {
                match &user.email {
                    Some(email) => println!("{} <{}>", user.display_name(), email),
                    None => println!("{}", user.display_name()),
                }
                ExitCode::SUCCESS
            }
            Err(e) if e.requires_login() => login_hint(),
            Err(e) => return Err(e).context("fetching the current user"),
        },
        Command::Products {
            mine,
            search,
            category,
        } => {
            let controller = CatalogController::new(&client, client.session(), &navigator);
            controller.load().await;
            render::print_notifications(controller.take_notifications());
            if navigator.last() == Some(Route::Login) {
                return Ok(login_hint());
            }
            if mine {
                controller.set_tab(Tab::Mine);
            }
            controller.set_search(search.as_deref().unwrap_or_default());
            controller.set_category(category.as_deref());

            let products = controller.filtered();
            if products.is_empty() {
                println!("No products match.");
            }
            for product in &products {
                println!(
                    "{}",
                    render::product_row(product, controller.is_assigned(product.id))
                );
            }
            exit_for(&controller.phase())
        }
        Command::Categories => {
            let controller = CatalogController::new(&client, client.session(), &navigator);
            controller.load().await;
            render::print_notifications(controller.take_notifications());
            if navigator.last() == Some(Route::Login) {
                return Ok(login_hint());
            }
            for category in controller.categories() {
                println!("{category}");
            }
            exit_for(&controller.phase())
        }
        Command::Show { id } => {
            let Some(id) = product_page::parse_product_id(&id) else {
                eprintln!("{NOT_FOUND}");
                return Ok(ExitCode::FAILURE);
            };
            let controller = CatalogController::new(&client, client.session(), &navigator);
            let shown = show_product(&controller, &navigator, id).await;
            render::print_notifications(controller.take_notifications());
            match shown {
                Shown::Detail(detail) => {
                    print!("{}", render::detail(&detail, controller.is_assigned(id)));
                    ExitCode::SUCCESS
                }
                Shown::Failed(reason) => {
                    eprintln!("{reason}");
                    ExitCode::FAILURE
                }
                Shown::LoginRequired => login_hint(),
            }
        }
        Command::Open { id } => {
            match catalog::load_product_page(&client, client.session(), &navigator, &id).await {
                ProductPage::Loaded(product) => {
                    print!("{}", render::product_card(&product));
                    ExitCode::SUCCESS
                }
                ProductPage::NotFound => {
                    eprintln!("{NOT_FOUND}");
                    ExitCode::FAILURE
                }
                ProductPage::LoginRequired => login_hint(),
            }
        }
        Command::Assign { id } | Command::Unassign { id }
            if !client.session().is_authenticated() =>
        {
            tracing::debug!("mutation of {} without a session", id);
            login_hint()
        }
        Command::Assign { id } => {
            let controller = CatalogController::new(&client, client.session(), &navigator);
            let outcome = controller.assign(id).await;
            mutation_exit(outcome, controller.take_notifications(), &navigator)
        }
        Command::Unassign { id } => {
            let controller = CatalogController::new(&client, client.session(), &navigator);
            let outcome = controller.unassign(id).await;
            mutation_exit(outcome, controller.take_notifications(), &navigator)
        }
    };
    Ok(code)
}

enum Shown {
    Detail(ProductDetail),
    Failed(String),
    LoginRequired,
}

/// Load the catalog, then the product. A redirect from the load stops before the detail fetch.
async fn show_product<A, S>(
    controller: &CatalogController<A, S, &RecordingNavigator>,
    navigator: &RecordingNavigator,
    id: ProductId,
) -> Shown
where
    A: CatalogApi,
    S: SessionProvider,
{
    controller.load().await;
    if navigator.last() == Some(Route::Login) {
        return Shown::LoginRequired;
    }
    controller.view_product(id).await;
    if navigator.last() == Some(Route::Login) {
        return Shown::LoginRequired;
    }
    match controller.detail_state() {
        Resource::Ready(detail) => Shown::Detail(detail),
        Resource::Error(reason) => Shown::Failed(reason),
        Resource::Idle | Resource::Loading => Shown::Failed(NOT_FOUND.to_string()),
    }
}

fn login_hint() -> ExitCode {
    eprintln!("Not signed in. Run `catalog login` first.");
    ExitCode::FAILURE
}

fn exit_for(phase: &catalog::CatalogPhase) -> ExitCode {
    match phase {
        catalog::CatalogPhase::Failed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

fn mutation_exit(
    outcome: MutationOutcome,
    notifications: Vec<catalog::Notification>,
    navigator: &RecordingNavigator,
) -> ExitCode {
    render::print_notifications(notifications);
    if navigator.last() == Some(Route::Login) {
        return login_hint();
    }
    match outcome {
        MutationOutcome::Done => ExitCode::SUCCESS,
        MutationOutcome::Failed | MutationOutcome::Blocked => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{ApiError, ApiMessage, Product};
    use store::MemoryStore;

    /// Service that must not be reached.
    struct Offline;

    impl CatalogApi for Offline {
        async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
            unreachable!("list_products called")
        }

        async fn my_products(&self) -> Result<Vec<Product>, ApiError> {
            unreachable!("my_products called")
        }

        async fn get_product(&self, _id: ProductId) -> Result<Product, ApiError> {
            unreachable!("get_product called")
        }

        async fn assign_product(&self, _id: ProductId) -> Result<ApiMessage, ApiError> {
            unreachable!("assign_product called")
        }

        async fn unassign_product(&self, _id: ProductId) -> Result<ApiMessage, ApiError> {
            unreachable!("unassign_product called")
        }
    }

    #[tokio::test]
    async fn test_show_without_session_stops_after_load() {
        let navigator = RecordingNavigator::new();
        let controller =
            CatalogController::new(Offline, SessionStore::new(MemoryStore::new()), &navigator);

        let shown = show_product(&controller, &navigator, ProductId(1)).await;
        assert!(matches!(shown, Shown::LoginRequired));
        assert_eq!(navigator.routes(), vec![Route::Login]);
        assert!(controller.take_notifications().is_empty());
        assert_eq!(controller.detail_state(), Resource::Idle);
    }
}
