use clap::Parser;
use newshub_backend::api::{AdminApi, AuthApi, CatalogueApi, HealthApi};
use newshub_backend::app_data::AppData;
use newshub_backend::cli::{self, Cli, Commands};
use newshub_backend::config::{init_database, init_logging, migrate_database, AppSettings, LoggingConfig};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let logging_config = LoggingConfig::from_env();
    init_logging(&logging_config)?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve);

    // The template needs neither settings nor a database
    if let Commands::Template { output } = &command {
        cli::content::template(output.as_deref())?;
        return Ok(());
    }

    let settings = AppSettings::from_env()?;
    tracing::debug!("{:?}", settings);

    let db = init_database(settings.database_url()).await?;
    migrate_database(&db).await?;

    let app_data = Arc::new(AppData::init(db, settings));

    match command {
        Commands::Serve => serve(app_data).await,
        other => cli::execute_command(other, &app_data).await,
    }
}

async fn serve(app_data: Arc<AppData>) -> Result<(), Box<dyn std::error::Error>> {
    let address = app_data.settings.server_address();

    let api_service = OpenApiService::new(
        (
            HealthApi,
            CatalogueApi::new(app_data.clone()),
            AuthApi::new(app_data.clone()),
            AdminApi::new(app_data.clone()),
        ),
        "NewsHub API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://localhost:{}/api", app_data.settings.server_port()));

    // Generate Swagger UI from OpenAPI service
    let ui = api_service.swagger_ui();

    // Compose routes: nest API service under /api and Swagger UI under /swagger
    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);

    Server::new(TcpListener::bind(address)).run(app).await?;

    Ok(())
}
