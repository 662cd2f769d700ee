use actix_web::{
    App, HttpServer,
    middleware::Logger,
    web::{self, scope},
};
use caldex::{
    db,
    guard::RunGuard,
    routes::{
        gets::{get_data, get_data_by_category},
        posts::trigger_crawl,
    },
    types::AppState,
};
use dotenvy::dotenv;
use log::info;

#[cfg(feature = "scheduler")]
use caldex::tasks::crawl::scheduled_crawl;
#[cfg(feature = "scheduler")]
use tokio_cron_scheduler::{Job, JobScheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let db = db::get_database().await;
    info!("Connecting to Database");
    let conn = db.connect().unwrap().clone();
    info!("Connected to Database. Migrating");
    db::migrate_db(conn).await?;
    info!("Migrated Database");

    let app_data = web::Data::new(AppState {
        db,
        crawl_guard: RunGuard::new(),
    });

    #[cfg(feature = "scheduler")]
    {
        let tmp_data = app_data.clone();

        let scheduler = JobScheduler::new().await?;
        scheduler
            .add(Job::new_async("0 0 0 * * *", move |_uuid, _l| {
                let sched_data = web::Data::clone(&tmp_data);
                Box::pin(async move {
                    let our_data = web::Data::clone(&sched_data);
                    scheduled_crawl(&our_data).await;
                })
            })?)
            .await?;
        info!("Initialized Crawl Scheduler");
        scheduler.start().await?;
        info!("Crawl Scheduler Started");
    }

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(app_data.clone())
            .service(
                scope("/api")
                    .service(trigger_crawl)
                    .service(get_data)
                    .service(get_data_by_category),
            )
    })
    .bind(("0.0.0.0", 10000))?
    .run()
    .await?;

    Ok(())
}
