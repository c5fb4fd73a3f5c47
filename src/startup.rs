use crate::configuration::Settings;
use crate::connectors::{GeminiClient, InsightModel};
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, error, http, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let pg_pool = web::Data::new(pg_pool);

    let gemini = GeminiClient::new(&settings.gemini)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    let model: web::Data<Arc<dyn InsightModel>> = web::Data::new(Arc::new(gemini));

    let settings = web::Data::new(settings);

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg: String = match err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "{{\"kind\":\"deserialize\",\"line\":{}, \"column\":{}, \"msg\":\"{}\"}}",
                err.line(),
                err.column(),
                err
            ),
            _ => format!("{{\"kind\":\"other\",\"msg\":\"{}\"}}", err),
        };
        error::InternalError::new(msg, http::StatusCode::BAD_REQUEST).into()
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .service(routes::health_check)
            .service(routes::service_info)
            .service(web::scope("/locations").service(routes::locations::list))
            .service(
                web::scope("/business")
                    .service(routes::business::save::item)
                    .service(routes::business::insights::list)
                    .service(routes::business::export::item)
                    .service(routes::business::get::item)
                    .service(routes::business::update::item)
                    .service(routes::business::delete::item),
            )
            .service(
                web::scope("/insights")
                    .service(routes::insight::generate::item)
                    .service(routes::insight::report::item)
                    .service(routes::insight::get::item),
            )
            .service(
                web::scope("/chat")
                    .service(routes::chat::send::item)
                    .service(routes::chat::get::item)
                    .service(routes::chat::delete::item),
            )
            .service(
                web::scope("/api")
                    .service(routes::partner::request_access::item)
                    .service(routes::partner::usage::item)
                    .service(routes::partner::batch::item)
                    .service(routes::partner::insights::item),
            )
            .service(web::scope("/analytics").service(routes::analytics::summary))
            .app_data(json_config.clone())
            .app_data(pg_pool.clone())
            .app_data(model.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
