use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use employee_api::config::LogFormat;
use employee_api::server::serve;
use employee_api::{build_router, Dependencies, ServiceError, Settings};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn run() -> Result<(), ServiceError> {
    let settings = Settings::from_env()?;
    init_tracing(settings.log_format);

    let dependencies = Dependencies::new(&settings).await?;
    let router = build_router(dependencies.state, settings.request_timeout);

    info!("Application has started");
    serve(settings.addr(), router).await
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the process environment still applies
    dotenv::dotenv().ok();

    if let Err(e) = run().await {
        // Tracing may not be initialized if settings failed to load
        eprintln!("employee-api: {}", e);
        error!(error = %e, "Employee API exited with error");
        std::process::exit(1);
    }
}
