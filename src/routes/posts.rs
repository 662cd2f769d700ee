use actix_web::{HttpResponse, Responder, post};
use log::{error, warn};

use crate::{
    tasks::crawl,
    types::{AppData, CrawlAccepted, CrawlError, Failure},
};

/// Manual trigger. Unlike the timer path, the outcome is returned to the
/// caller, including a rejection when a run is already in flight.
#[post("/crawl")]
pub async fn trigger_crawl(data: AppData) -> impl Responder {
    match crawl::run_crawl(&data).await {
        Ok(summary) => HttpResponse::Ok().json(CrawlAccepted {
            success: true,
            summary,
        }),
        Err(err @ CrawlError::AlreadyRunning) => {
            warn!("[Crawl] Manual trigger rejected: {err}");
            HttpResponse::Conflict().json(Failure {
                success: false,
                message: err.to_string(),
            })
        }
        Err(err @ CrawlError::Fetch(_)) => {
            error!("[Crawl] Manual run failed: {err}");
            HttpResponse::BadGateway().json(Failure {
                success: false,
                message: err.to_string(),
            })
        }
        Err(err) => {
            error!("[Crawl] Manual run failed: {err}");
            HttpResponse::InternalServerError().json(Failure {
                success: false,
                message: err.to_string(),
            })
        }
    }
}
