#![forbid(unsafe_code)]

mod config;
mod router;

use std::{net::SocketAddr, sync::Arc};

use diesel_async::pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager};
use dotenvy::dotenv;
use web::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = config::process_config()?;

    let manager = AsyncDieselConnectionManager::<diesel_async::AsyncPgConnection>::new(
        config.database.uri.clone(),
    );
    let db_pool = Pool::builder(manager).build()?;
    let mut connection = db_pool.get().await?;

    db::migrations::run_migrations(&mut connection).await?; // run all pending migrations
    drop(connection);

    let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
    log::info!("Listening on {}, domain {}", addr, config.web.domain);

    let state = Arc::new(AppState { db_pool, config });
    let app = router::app(state);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
