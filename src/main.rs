use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_web::{middleware::Logger, App, HttpServer};
use clap::{Parser, Subcommand};
use log::{info, warn};
use user_directory::app_config;
use user_directory::directory::{loader::UserListLoader, UserDirectory};
use user_directory::setup::setup_database;
use user_directory::shared::config::Config;
use user_directory::shared::database::{ConnectionState, Database};
use user_directory::users::repository::user_repository::UserRepositoryImpl;

#[derive(Parser)]
#[command(name = "user-directory", version, about = "Read-only user directory")]
struct Cli {
  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve GET /users (default)
  Serve,
  /// Create and seed the users table
  Setup {
    #[arg(long, default_value = "schema.sql")]
    schema: PathBuf,
  },
  /// Load the user list, falling back to the remote directory, and print it
  List {
    /// Case-insensitive search over name, company, role and country
    #[arg(short, long, default_value = "")]
    query: String,
  },
}

#[actix_web::main]
async fn main() -> io::Result<()> {
  let dotenv = dotenvy::dotenv();
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("info"),
  )
  .init();
  if let Ok(path) = dotenv {
    info!("Loaded environment from {}", path.display());
  }

  let cli = Cli::parse();
  let config = Config::default();

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(config).await,
    Command::Setup { schema } => setup(config, &schema).await,
    Command::List { query } => list(config, &query).await,
  }
}

async fn serve(config: Config) -> io::Result<()> {
  let database = Arc::new(Database::connect(&config.database_url).await);
  if let ConnectionState::Failed(reason) = database.state() {
    warn!("Serving without a database, /users will answer 503: {}", reason);
  }

  let server_address = format!("0.0.0.0:{}", config.port);
  info!("Listening on http://{}", server_address);

  HttpServer::new(move || {
    App::new().wrap(Logger::default()).configure(|cfg| {
      let user_repository = UserRepositoryImpl::new(database.clone());
      app_config(cfg, user_repository)
    })
  })
  .bind(server_address)?
  .run()
  .await
}

async fn setup(config: Config, schema: &Path) -> io::Result<()> {
  let database = Database::connect(&config.database_url).await;
  setup_database(&database, schema)
    .await
    .map(|count| info!("Executed {} statements", count))
    .map_err(io::Error::other)
}

async fn list(config: Config, query: &str) -> io::Result<()> {
  let loader = UserListLoader::from_config(&config).map_err(io::Error::other)?;
  let directory = UserDirectory::new();
  directory.set_query(query);
  directory.refresh(&loader).await.map_err(io::Error::other)?;

  for user in directory.visible() {
    println!(
      "{}\t{}\t{}\t{}\t{}",
      user.id, user.name, user.company_name, user.role, user.country
    );
  }
  Ok(())
}
