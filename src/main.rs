use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use smartsplit::{routes, settings::Settings, Ledger, MemoryStore};

fn cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header(),
        None => Cors::permissive(),
    }
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(settings.filter())
        .init();

    let ledger = web::Data::new(Ledger::new(MemoryStore::new()));
    let allowed_origin = settings.server.allowed_origin.clone();
    let addr = (settings.server.bind.clone(), settings.server.port);
    tracing::info!("Listening on {}:{}", addr.0, addr.1);

    HttpServer::new(move || {
        App::new()
            .wrap(cors(allowed_origin.as_deref()))
            .app_data(ledger.clone())
            .configure(routes::configure)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
