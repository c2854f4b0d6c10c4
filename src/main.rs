use clap::Parser;
use medstock::cli::commands::{Cli, Commands};
use medstock::domain::entities::article::{ArticleUpdate, NewArticle};
use medstock::domain::entities::category::NewCategory;
use medstock::domain::entities::movement::{MovementType, NewMovement};
use medstock::domain::entities::sale::NewSale;
use medstock::domain::entities::stock_alert::StockAlert;
use medstock::domain::entities::stockroom::NewStockroom;
use medstock::domain::entities::supplier::NewSupplier;
use medstock::domain::entities::user::Registration;
use medstock::domain::ports::inventory_api::{ArticleQuery, HistoryQuery, ListQuery};
use medstock::domain::values::filters::DashboardFilters;
use medstock::domain::values::replenishment::{ReplenishmentInputs, StockStatus};
use medstock::domain::values::service_level::ServiceLevel;
use medstock::MedStock;
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("medstock=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api_base = std::env::var("MEDSTOCK_API_BASE_URL")
        .unwrap_or_else(|_| medstock::infrastructure::http::DEFAULT_BASE_URL.into());
    let db_path = std::env::var("MEDSTOCK_DB").unwrap_or_else(|_| "./medstock.db".into());

    let ms = match MedStock::new(&api_base, &db_path) {
        Ok(ms) => ms,
        Err(e) => {
            eprintln!("Error initializing medstock: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(ms, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(ms: MedStock, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Login { email, password } => {
            let payload = ms.login(&email, &password).await?;
            println!("Logged in as {} <{}>", payload.user.name, payload.user.email);
        }
        Commands::Logout => {
            ms.logout()?;
            println!("Logged out");
        }
        Commands::Register { json } => {
            let data: Registration = serde_json::from_str(&json)?;
            let payload = ms.register(&data).await?;
            println!("Registered and logged in as {}", payload.user.email);
        }
        Commands::Whoami => match ms.current_session()? {
            Some(session) => println!("{}", serde_json::to_string_pretty(&session.user).unwrap()),
            None => println!("Not logged in"),
        },
        Commands::Health => {
            let status = ms.health().await?;
            println!("{status}");
        }

        Commands::ArticleAdd { json } => {
            let data: NewArticle = serde_json::from_str(&json)?;
            let article = ms.create_article(&data).await?;
            println!("{}", serde_json::to_string_pretty(&article).unwrap());
        }
        Commands::Articles {
            page,
            per_page,
            sku,
            name,
            active,
        } => {
            let result = ms
                .list_articles(&ArticleQuery {
                    page,
                    per_page,
                    sku,
                    name,
                    is_active: active,
                    ..Default::default()
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
        }
        Commands::ArticleGet { id } => {
            let article = ms.get_article(&id).await?;
            println!("{}", serde_json::to_string_pretty(&article).unwrap());
        }
        Commands::ArticleUpdate { id, json } => {
            let data: ArticleUpdate = serde_json::from_str(&json)?;
            let article = ms.update_article(&id, &data).await?;
            println!("{}", serde_json::to_string_pretty(&article).unwrap());
        }
        Commands::ArticleDelete { id } => {
            ms.delete_article(&id).await?;
            println!("Article {id} deleted");
        }

        Commands::CategoryAdd { json } => {
            let data: NewCategory = serde_json::from_str(&json)?;
            let category = ms.create_category(&data).await?;
            println!("{}", serde_json::to_string_pretty(&category).unwrap());
        }
        Commands::Categories { name } => {
            let result = ms
                .list_categories(&ListQuery {
                    name,
                    ..Default::default()
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
        }
        Commands::SupplierAdd { json } => {
            let data: NewSupplier = serde_json::from_str(&json)?;
            let supplier = ms.create_supplier(&data).await?;
            println!("{}", serde_json::to_string_pretty(&supplier).unwrap());
        }
        Commands::Suppliers { name } => {
            let result = ms
                .list_suppliers(&ListQuery {
                    name,
                    ..Default::default()
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
        }
        Commands::StockroomAdd { json } => {
            let data: NewStockroom = serde_json::from_str(&json)?;
            let stockroom = ms.create_stockroom(&data).await?;
            println!("{}", serde_json::to_string_pretty(&stockroom).unwrap());
        }
        Commands::Stockrooms { name } => {
            let result = ms
                .list_stockrooms(&ListQuery {
                    name,
                    ..Default::default()
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
        }

        Commands::SaleAdd { json } => {
            let data: NewSale = serde_json::from_str(&json)?;
            let sale = ms.record_sale(&data).await?;
            println!("{}", serde_json::to_string_pretty(&sale).unwrap());
        }
        Commands::Sales {
            article_id,
            stockroom_id,
            from,
            to,
            limit,
            offset,
        } => {
            let result = ms
                .sales(&HistoryQuery {
                    article_id,
                    stockroom_id,
                    from: parse_date(&from)?,
                    to: parse_date(&to)?,
                    limit,
                    offset,
                    ..Default::default()
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
        }
        Commands::SalesSummary {
            article_id,
            stockroom_id,
            from,
            to,
        } => {
            let summary = ms
                .sales_summary(&HistoryQuery {
                    article_id,
                    stockroom_id,
                    from: parse_date(&from)?,
                    to: parse_date(&to)?,
                    ..Default::default()
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&summary).unwrap());
        }
        Commands::TopSelling {
            stockroom_id,
            days,
            limit,
        } => {
            let report = ms.top_selling(stockroom_id.as_deref(), days, limit).await?;
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
        }

        Commands::MovementAdd { json } => {
            let data: NewMovement = serde_json::from_str(&json)?;
            let movement = ms.record_movement(&data).await?;
            println!("{}", serde_json::to_string_pretty(&movement).unwrap());
        }
        Commands::Movements {
            article_id,
            stockroom_id,
            movement_type,
            from,
            to,
            limit,
            offset,
        } => {
            let movement_type: Option<MovementType> = movement_type
                .map(|t| t.parse())
                .transpose()
                .map_err(|e: String| e)?;
            let result = ms
                .movements(&HistoryQuery {
                    article_id,
                    stockroom_id,
                    movement_type,
                    from: parse_date(&from)?,
                    to: parse_date(&to)?,
                    limit,
                    offset,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
        }
        Commands::MovementSummary {
            article_id,
            stockroom_id,
            from,
            to,
        } => {
            let summary = ms
                .movement_summary(&HistoryQuery {
                    article_id,
                    stockroom_id,
                    from: parse_date(&from)?,
                    to: parse_date(&to)?,
                    ..Default::default()
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&summary).unwrap());
        }

        Commands::Replenishment { sku, article_id } => {
            let view = match (sku, article_id) {
                (Some(sku), _) => ms.replenishment_by_sku(&sku).await?,
                (None, Some(id)) => ms.replenishment_by_article(&id).await?,
                (None, None) => return Err("Pass --sku or --article-id".into()),
            };
            println!("{}", serde_json::to_string_pretty(&view).unwrap());
        }
        Commands::RopCalc {
            stock,
            demand,
            std_dev,
            lead_time,
            service_level,
            reorder_point,
        } => {
            let metrics = ms.evaluate_replenishment(&ReplenishmentInputs {
                current_stock: stock,
                avg_daily_demand: demand,
                demand_std_dev: std_dev,
                lead_time_days: lead_time,
                service_level: ServiceLevel::new(service_level)?,
                configured_reorder_point: reorder_point,
            })?;
            let status = StockStatus::classify(
                stock,
                reorder_point,
                metrics.recommended_reorder_point,
            );
            println!("{}", serde_json::to_string_pretty(&metrics).unwrap());
            println!("Status: {status}");
        }

        Commands::Alerts {
            site,
            search,
            alerts_only,
        } => {
            let mut filters = DashboardFilters::new();
            filters.site = site;
            filters.search = search;
            filters.alerts_only = alerts_only;
            let alerts = ms.active_alerts(&filters).await?;
            println!("{}", serde_json::to_string_pretty(&alerts).unwrap());
        }

        Commands::PoPlan {
            alerts,
            quantities,
            notes,
            delivery_date,
        } => {
            let selected = select_alerts(&ms, &alerts).await?;
            let overrides = parse_quantities(&quantities)?;
            let plan = ms.plan_purchase_orders(
                &selected,
                &overrides,
                notes,
                parse_delivery_date(&delivery_date)?,
            )?;
            println!("{}", serde_json::to_string_pretty(&plan).unwrap());
        }
        Commands::PoCreate {
            alerts,
            quantities,
            notes,
            delivery_date,
            output,
        } => {
            let selected = select_alerts(&ms, &alerts).await?;
            let overrides = parse_quantities(&quantities)?;
            let plan = ms.plan_purchase_orders(
                &selected,
                &overrides,
                notes,
                parse_delivery_date(&delivery_date)?,
            )?;
            let created_by = ms
                .current_session()?
                .and_then(|s| s.user.map(|u| u.id));

            let created = ms
                .submit_purchase_orders(&plan, created_by.as_deref())
                .await?;
            let document = MedStock::export_purchase_orders(&plan, &created);
            let text = document.render_text();
            if let Some(path) = output {
                std::fs::write(&path, &text)?;
                println!("Export written to {path}");
            }
            print!("{text}");
            println!("Created {} purchase order(s)", created.len());
        }

        Commands::Kpi {
            from,
            to,
            max_pages,
        } => {
            let mut filters = DashboardFilters::new();
            if let Some(from) = parse_date(&from)? {
                filters.from = from;
            }
            if let Some(to) = parse_date(&to)? {
                filters.to = to;
            }
            let snapshot = ms
                .kpi_snapshot(
                    &filters,
                    max_pages.unwrap_or(medstock::application::catalog::DEFAULT_PAGE_CAP),
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&snapshot).unwrap());
        }

        Commands::Chat { message } => {
            let reply = ms.chat(&message).await?;
            println!("{}", reply.response);
            if reply.should_create_po {
                println!(
                    "\n({} active alert(s); consider `medstock po-create`)",
                    reply.alerts_count
                );
            }
        }
        Commands::ChatClear => {
            ms.clear_chat_history()?;
            println!("Conversation cleared");
        }
    }
    Ok(())
}

/// Resolve the alert selection: explicit ids when given, else the default
/// rule (high/medium severity or low coverage).
async fn select_alerts(
    ms: &MedStock,
    ids: &[String],
) -> Result<Vec<StockAlert>, Box<dyn std::error::Error>> {
    let all = ms.active_alerts(&DashboardFilters::new()).await?;
    if ids.is_empty() {
        return Ok(MedStock::default_po_selection(&all));
    }

    let mut selected = Vec::new();
    for id in ids {
        match all.iter().find(|a| &a.id == id) {
            Some(alert) => selected.push(alert.clone()),
            None => return Err(format!("No active alert with id {id}").into()),
        }
    }
    Ok(selected)
}

fn parse_quantities(
    pairs: &[String],
) -> Result<HashMap<String, i64>, Box<dyn std::error::Error>> {
    let mut map = HashMap::new();
    for pair in pairs {
        let (id, qty) = pair
            .split_once('=')
            .ok_or_else(|| format!("Invalid quantity override: {pair}. Use alert_id=qty"))?;
        let qty: i64 = qty
            .parse()
            .map_err(|_| format!("Invalid quantity in override: {pair}"))?;
        map.insert(id.to_string(), qty);
    }
    Ok(map)
}

fn parse_delivery_date(s: &Option<String>) -> Result<Option<chrono::NaiveDate>, String> {
    match s {
        None => Ok(None),
        Some(s) => chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| format!("Invalid date format: {s}. Use YYYY-MM-DD")),
    }
}

fn parse_date(s: &Option<String>) -> Result<Option<chrono::DateTime<chrono::Utc>>, String> {
    match s {
        None => Ok(None),
        Some(s) => {
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
                return Ok(Some(dt.with_timezone(&chrono::Utc)));
            }
            if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                let dt = date.and_hms_opt(0, 0, 0).unwrap();
                return Ok(Some(chrono::DateTime::from_naive_utc_and_offset(
                    dt,
                    chrono::Utc,
                )));
            }
            Err(format!(
                "Invalid date format: {s}. Use YYYY-MM-DD or RFC3339"
            ))
        }
    }
}
