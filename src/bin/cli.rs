use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use std::process;

use inventra::cli::create_admin;
use inventra::cli::seeder::{clear_seeded_assets, seed_assets};
use inventra_config::{DatabaseConfig, PasswordConfig};
use inventra_db::{PgPool, PgStore, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "inventra-cli")]
#[command(about = "Inventra CLI - Administrative tools for the inventory backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new admin account
    CreateAdmin {
        /// Username of the admin
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake assets
    Seed {
        /// Number of assets to create
        #[arg(short = 'c', long, default_value = "100")]
        count: usize,
    },
    /// Delete all seeded assets
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = connect().await;

    match cli.command {
        Commands::CreateAdmin {
            username,
            email,
            password,
        } => handle_create_admin(pool, username, email, password).await,
        Commands::Seed { count } => handle_seed(&pool, count).await,
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

async fn connect() -> PgPool {
    let config = match DatabaseConfig::from_env() {
        Ok(config) => config,
        Err(_) => fail("DATABASE_URL must be set"),
    };

    let pool = match init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => fail(&format!("Failed to connect to database: {}", e)),
    };

    if let Err(e) = run_migrations(&pool).await {
        fail(&format!("Failed to run migrations: {}", e));
    }

    pool
}

fn fail(message: &str) -> ! {
    eprintln!("\n❌ {}", message);
    process::exit(1);
}

fn prompt(label: &str) -> String {
    Input::<String>::new()
        .with_prompt(label)
        .interact_text()
        .unwrap_or_else(|e| fail(&format!("Failed to read {}: {}", label.to_lowercase(), e)))
}

async fn handle_create_admin(
    pool: PgPool,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let username = username.unwrap_or_else(|| prompt("Username"));
    let email = email.unwrap_or_else(|| prompt("Email address"));
    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail(&format!("Failed to read password: {}", e)))
    });

    let store = PgStore::new(pool);
    let password_config = PasswordConfig::from_env();

    match create_admin(&store, &username, &email, &password, &password_config).await {
        Ok(()) => {
            println!("\n✅ Admin created successfully!");
            println!("   Username: {}", username.trim());
            println!("   Email: {}", email.trim());
        }
        Err(e) => fail(&format!("Error creating admin: {}", e)),
    }
}

async fn handle_seed(pool: &PgPool, count: usize) {
    if let Err(e) = seed_assets(pool, count).await {
        fail(&format!("Error seeding database: {}", e));
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = clear_seeded_assets(pool).await {
        fail(&format!("Error clearing seeded data: {}", e));
    }
}
