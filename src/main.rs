use clap::Parser;
use dialoguer::Confirm;
use first_aid_common::types::new_item_id;
use first_aid_common::validation::parse_quantity_update;
use first_aid_common::validation::validate_kit_id;
use first_aid_common::{NewCatalogEntryForm, NewItemForm};
use first_aid_tracker::{cli, client, config, error, report, snapshot};
use cli::{Cli, Commands};
use client::KitClient;
use config::Config;
use error::{Result, TrackerError};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// ログ初期化（RUST_LOG 優先、--verbose で debug）
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("first_aid_tracker={0},first_aid={0}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// 接続先は --base-url > 環境変数 > 設定ファイル
fn connect(config: &Config, base_url: Option<&str>) -> Result<KitClient> {
    let base_url = match base_url {
        Some(url) => url.to_string(),
        None => config.base_url()?,
    };
    let client = KitClient::new(base_url, Duration::from_secs(config.timeout_seconds))?;
    tracing::info!(base_url = client.base_url(), "backend");
    Ok(client)
}

fn confirm(prompt: String, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::debug!("{:?}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    let base_url = cli.base_url.as_deref();

    match cli.command {
        Commands::Kit { kit_id, sort } => {
            let kit_id = validate_kit_id(&kit_id)?;
            let client = connect(&config, base_url)?;
            let snapshot = client.kit(&kit_id).await?;
            let today = today();

            println!("🧰 Kit {}", kit_id);
            if let Some(stamp) = &snapshot.last_edited {
                println!("最終更新: {}", stamp);
            }
            println!();
            print!("{}", report::render(&snapshot.items, &sort.config(), report::KIT_COLUMNS, today));
            println!("{}", report::summary_line(&snapshot.items, today));
        }

        Commands::All { sort } => {
            let client = connect(&config, base_url)?;
            let snapshot = client.all_items().await?;
            let today = today();

            println!("🧰 全キット\n");
            print!("{}", report::render(&snapshot.items, &sort.config(), report::ALL_ITEMS_COLUMNS, today));
            println!("{}", report::summary_line(&snapshot.items, today));
        }

        Commands::Catalog { sort } => {
            let client = connect(&config, base_url)?;
            let snapshot = client.catalog().await?;

            println!("📋 品目マスタ ({}件)", snapshot.items.len());
            if let Some(stamp) = &snapshot.last_edited {
                println!("最終更新: {}", stamp);
            }
            println!();
            print!("{}", report::render(&snapshot.items, &sort.config(), report::CATALOG_COLUMNS, today()));
        }

        Commands::Add { kit_id, name, expiry, qty } => {
            let kit_id = validate_kit_id(&kit_id)?;
            let client = connect(&config, base_url)?;

            // 品目マスタが取れなくても追加はできる（品番・カテゴリなし）
            let catalog = match client.catalog().await {
                Ok(snapshot) => snapshot.items,
                Err(e) => {
                    tracing::warn!("catalog unavailable: {}", e);
                    Vec::new()
                }
            };

            let form = NewItemForm {
                name,
                expiry_date: expiry,
                qty,
            };
            let id = new_item_id(chrono::Utc::now().timestamp_millis());
            let item = form.validate(&catalog, id)?;

            client.add_item(&kit_id, &item).await?;
            println!("✔ {} を追加しました (id: {}, 数量: {})", item.name, item.id, item.qty);
        }

        Commands::SetQty { kit_id, item_id, qty } => {
            let qty = parse_quantity_update(&qty)?;
            let client = connect(&config, base_url)?;

            client.update_quantity(&kit_id, &item_id, qty).await?;
            if qty == 0 {
                println!("✔ {} を Empty にしました", item_id);
            } else {
                println!("✔ {} の数量を {} にしました", item_id, qty);
            }
        }

        Commands::Remove { kit_id, item_id, yes } => {
            let client = connect(&config, base_url)?;

            // 確認表示のため品名を引く
            let snapshot = client.kit(&kit_id).await?;
            let item = snapshot
                .items
                .iter()
                .find(|i| i.id == item_id)
                .ok_or_else(|| TrackerError::ItemNotFound(format!("{} / {}", kit_id, item_id)))?;

            if !confirm(format!("{} ({}) を削除しますか？", item.name, item.id), yes)? {
                println!("中止しました");
                return Ok(());
            }

            client.remove_item(&kit_id, &item_id).await?;
            println!("✔ {} を削除しました", item.name);
        }

        Commands::CatalogAdd { item_no, name, category, expiring } => {
            let entry = NewCatalogEntryForm {
                item_no,
                name,
                category,
                expiring,
            }
            .validate()?;

            let client = connect(&config, base_url)?;
            client.add_catalog_entry(&entry).await?;
            println!("✔ 品目マスタに {} を追加しました", entry.name);
        }

        Commands::CatalogRemove { name, yes } => {
            let client = connect(&config, base_url)?;

            if !confirm(format!("品目マスタから {} を削除しますか？", name), yes)? {
                println!("中止しました");
                return Ok(());
            }

            client.remove_catalog_entry(&name).await?;
            println!("✔ 品目マスタから {} を削除しました", name);
        }

        Commands::Snapshot { dir } => {
            let dir = dir.unwrap_or_else(|| config.snapshot_dir());
            let client = connect(&config, base_url)?;

            println!("📥 データファイルを保存中... ({})", dir.display());
            let outcome = snapshot::take_snapshot(&client, &dir, chrono::Local::now().naive_local()).await?;

            match &outcome.kit {
                Ok(path) => println!("✔ キットデータ: {}", path.display()),
                Err(e) => println!("✖ キットデータ: {}", e),
            }
            match &outcome.catalog {
                Ok(catalog) => {
                    println!("- 品目マスタ: {}", catalog.freshness.describe());
                    if let Some(path) = &catalog.saved {
                        println!("✔ 品目マスタ: {}", path.display());
                    }
                }
                Err(e) => println!("✖ 品目マスタ: {}", e),
            }
        }

        Commands::Config { set_base_url, show } => {
            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ バックエンドURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!(
                    "  バックエンドURL: {}",
                    config.base_url().unwrap_or_else(|_| "未設定".to_string())
                );
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  保存先: {}", config.snapshot_dir().display());
            }
        }
    }

    Ok(())
}
