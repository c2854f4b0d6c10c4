use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "medstock", about = "Hospital inventory operations client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token locally
    Login {
        email: String,
        password: String,
    },
    /// Drop the stored session
    Logout,
    /// Register a new account (then log in with it)
    Register {
        /// JSON with name, email, password, phone?, address?
        json: String,
    },
    /// Show the stored session
    Whoami,
    /// Backend health check
    Health,

    /// Create an article
    ArticleAdd {
        /// JSON with sku, name, id_category, id_supplier, id_stockroom,
        /// unit_price, unit_cost, stock?, reorder_point?, lead_time?, description?
        json: String,
    },
    /// List articles (one page)
    Articles {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
        #[arg(long)]
        sku: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Fetch an article by id
    ArticleGet {
        id: String,
    },
    /// Update an article (partial JSON)
    ArticleUpdate {
        id: String,
        json: String,
    },
    /// Delete an article
    ArticleDelete {
        id: String,
    },

    /// Create a category
    CategoryAdd {
        json: String,
    },
    /// List categories
    Categories {
        #[arg(long)]
        name: Option<String>,
    },
    /// Create a supplier
    SupplierAdd {
        /// JSON with name, nit, address?, phone?
        json: String,
    },
    /// List suppliers
    Suppliers {
        #[arg(long)]
        name: Option<String>,
    },
    /// Create a stockroom
    StockroomAdd {
        json: String,
    },
    /// List stockrooms
    Stockrooms {
        #[arg(long)]
        name: Option<String>,
    },

    /// Record a sale
    SaleAdd {
        /// JSON with id_article, id_stockroom, quantity, sold_at, unit_price?, metadata?
        json: String,
    },
    /// List sales history
    Sales {
        #[arg(long)]
        article_id: Option<String>,
        #[arg(long)]
        stockroom_id: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Sales summary over a window
    SalesSummary {
        #[arg(long)]
        article_id: Option<String>,
        #[arg(long)]
        stockroom_id: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Top-selling articles
    TopSelling {
        #[arg(long)]
        stockroom_id: Option<String>,
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Record a stock movement
    MovementAdd {
        /// JSON with id_article, id_stockroom, type (IN|OUT|ADJUSTMENT),
        /// quantity, moved_at, reference?, metadata?
        json: String,
    },
    /// List movement history
    Movements {
        #[arg(long)]
        article_id: Option<String>,
        #[arg(long)]
        stockroom_id: Option<String>,
        #[arg(long = "type")]
        movement_type: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Movement totals over a window
    MovementSummary {
        #[arg(long)]
        article_id: Option<String>,
        #[arg(long)]
        stockroom_id: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },

    /// Replenishment metrics for one article
    Replenishment {
        #[arg(long, conflicts_with = "article_id")]
        sku: Option<String>,
        #[arg(long)]
        article_id: Option<String>,
    },
    /// Evaluate the reorder-point formula locally
    RopCalc {
        #[arg(long)]
        stock: i64,
        /// Average daily demand
        #[arg(long)]
        demand: f64,
        /// Standard deviation of daily demand
        #[arg(long)]
        std_dev: f64,
        /// Lead time in days
        #[arg(long)]
        lead_time: i64,
        #[arg(long, default_value_t = 0.95)]
        service_level: f64,
        /// Currently configured reorder point, if any
        #[arg(long)]
        reorder_point: Option<i64>,
    },

    /// Active stock alerts, filtered and sorted by severity
    Alerts {
        #[arg(long)]
        site: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Only items with less than 15 days of coverage
        #[arg(long)]
        alerts_only: bool,
    },

    /// Preview purchase orders grouped by supplier (no submission)
    PoPlan {
        /// Alert ids to include; empty selects high/medium severity and
        /// low-coverage alerts
        #[arg(long = "alert")]
        alerts: Vec<String>,
        /// Quantity overrides as alert_id=qty
        #[arg(long = "qty")]
        quantities: Vec<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Expected delivery date (YYYY-MM-DD)
        #[arg(long)]
        delivery_date: Option<String>,
    },
    /// Create one draft purchase order per supplier and print the export
    PoCreate {
        #[arg(long = "alert")]
        alerts: Vec<String>,
        #[arg(long = "qty")]
        quantities: Vec<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        delivery_date: Option<String>,
        /// Also write the export document to this file
        #[arg(long)]
        output: Option<String>,
    },

    /// Dashboard KPI snapshot
    Kpi {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        max_pages: Option<u32>,
    },

    /// Ask the inventory assistant
    Chat {
        message: String,
    },
    /// Clear the stored assistant conversation
    ChatClear,
}
