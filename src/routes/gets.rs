use actix_web::{HttpResponse, Responder, get, web};
use log::error;
use serde::Deserialize;
use time::Date;

use crate::{
    queries::snapshots,
    types::{AppData, Category, DATE_FORMAT, Failure},
};

#[derive(Deserialize)]
pub struct DataQuery {
    pub date: Option<String>,
}

#[get("/data")]
pub async fn get_data(data: AppData, query: web::Query<DataQuery>) -> impl Responder {
    let db = data.db.connect().unwrap();

    let date = match query.date.as_deref() {
        None => None,
        Some(raw) => match Date::parse(raw, &DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(err) => {
                return HttpResponse::BadRequest().json(Failure {
                    success: false,
                    message: format!("Invalid date '{raw}': {err}"),
                });
            }
        },
    };

    match snapshots::get_snapshot(db, date).await {
        Ok(Some(snapshot)) => HttpResponse::Ok().json(snapshot),
        Ok(None) => HttpResponse::NotFound().json(Failure {
            success: false,
            message: "No snapshot found".into(),
        }),
        Err(err) => {
            error!("[Get Data] Reading snapshot failed with err: {err}");
            HttpResponse::InternalServerError().json(Failure {
                success: false,
                message: format!("Couldn't read snapshot. Err: {err}"),
            })
        }
    }
}

#[get("/data/category/{category}")]
pub async fn get_data_by_category(data: AppData, path: web::Path<String>) -> impl Responder {
    let db = data.db.connect().unwrap();

    let category = match path.into_inner().parse::<Category>() {
        Ok(category) => category,
        Err(err) => {
            return HttpResponse::BadRequest().json(Failure {
                success: false,
                message: err,
            });
        }
    };

    match snapshots::entries_by_category(db, category).await {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(err) => {
            error!("[Get Data] Reading entries for {category} failed with err: {err}");
            HttpResponse::InternalServerError().json(Failure {
                success: false,
                message: format!("Couldn't read entries. Err: {err}"),
            })
        }
    }
}
