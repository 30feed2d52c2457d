use anyhow::Context;
use clap::Parser;
use crudyrestaurants::core::seed::seed;
use crudyrestaurants::utils::error::ErrorSeverity;
use crudyrestaurants::utils::{logger, validation::Validate};
use crudyrestaurants::{
    AppConfig, CliConfig, Command, CrudError, InMemoryStore, LocalStorage, MenuView,
    RestaurantInput, RestaurantService, RestaurantView, SnapshotStore,
};
use serde::Serialize;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(logger::LogFormat::from_json_flag(cli.json_logs), cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    let config = match AppConfig::from_file_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        match e.downcast_ref::<CrudError>() {
            Some(crud_error) => {
                tracing::error!(
                    "❌ {} (Category: {:?}, Severity: {:?})",
                    crud_error,
                    crud_error.category(),
                    crud_error.severity()
                );
                eprintln!("❌ {}", crud_error.user_friendly_message());
                eprintln!("💡 {}", crud_error.recovery_suggestion());

                let exit_code = match crud_error.severity() {
                    ErrorSeverity::Low => 4,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                };
                std::process::exit(exit_code);
            }
            None => {
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

async fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    let snapshots = config.store.persist.then(|| {
        SnapshotStore::new(
            LocalStorage::new(config.store.data_dir.clone()),
            config.store.snapshot_file.clone(),
        )
    });

    let store = match &snapshots {
        Some(snapshots) => snapshots.load().await?.unwrap_or_default(),
        None => InMemoryStore::new(),
    };
    let service = RestaurantService::in_memory(&store);

    let mut changed = false;
    if config.seed.on_empty && store.is_empty().await && !matches!(command, Command::Seed { .. }) {
        seed(&store.restaurants(), &store.payments()).await?;
        changed = true;
    }

    match command {
        Command::Seed { force } => {
            if force {
                service.delete_all().await?;
            }
            let seeded = seed(&store.restaurants(), &store.payments()).await?;
            print_json(&seeded.iter().map(RestaurantView::from).collect::<Vec<_>>())?;
            changed = true;
        }
        Command::List => {
            let restaurants = service.find_all().await?;
            print_json(&restaurants.iter().map(RestaurantView::from).collect::<Vec<_>>())?;
        }
        Command::Show { id } => {
            let restaurant = service.find_by_id(id).await?;
            print_json(&RestaurantView::from(&restaurant))?;
        }
        Command::Find { name } => {
            let restaurants = service.find_by_name_like(&name).await?;
            print_json(&restaurants.iter().map(RestaurantView::from).collect::<Vec<_>>())?;
        }
        Command::Save { json } => {
            let input: RestaurantInput =
                serde_json::from_str(&json).context("restaurant body is not valid JSON")?;
            let saved = service.save(input).await?;
            print_json(&RestaurantView::from(&saved))?;
            changed = true;
        }
        Command::Update { id, json } => {
            let input: RestaurantInput =
                serde_json::from_str(&json).context("restaurant body is not valid JSON")?;
            let updated = service.update(input, id).await?;
            print_json(&RestaurantView::from(&updated))?;
            changed = true;
        }
        Command::Delete { id } => {
            service.delete(id).await?;
            println!("✅ Restaurant {} deleted", id);
            changed = true;
        }
        Command::Payments => {
            print_json(&service.find_all_payments().await?)?;
        }
        Command::Menus => {
            let menus: Vec<MenuView> = service.find_all_menus().await?;
            print_json(&menus)?;
        }
    }

    if changed {
        if let Some(snapshots) = &snapshots {
            snapshots.save(&store).await?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
