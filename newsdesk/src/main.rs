use newsdesk::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config)?;

    let database = config.require_database()?;
    let pool = create_pool(database).await?;
    if database.run_migrations {
        run_migrations(&pool).await?;
    }

    let state = AppState::from_pool(config.clone(), pool);

    Server::new(config).serve(router(state)).await
}
