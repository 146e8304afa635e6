use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::Server;
use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing_actix_web::TracingLogger;

use crate::configuration::{DatabaseSettings, Settings, SiteSettings};
use crate::delivery::EmailDispatcher;
use crate::email_client::EmailSender;
use crate::routes::{
    content_published, health_check, preflight, send_daily_devotional, send_newsletter,
    send_notification,
};
use crate::store::{ContentStore, PgContentStore};
use crate::templates::EmailTemplates;

const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
const MAX_PAYLOAD_BYTES: usize = 2 * 1024 * 1024;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let store = PgContentStore::new(get_connection_pool(&config.database));
        if config.database.run_migrations {
            store.migrate().await?;
        }
        let email_client = config.email_client.client()?;

        let address = format!("{}:{}", config.app.host, config.app.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            Arc::new(store),
            Arc::new(email_client),
            config.site,
        )?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Wires the injected collaborators into the HTTP server.
pub fn run(
    listener: TcpListener,
    store: Arc<dyn ContentStore>,
    email_sender: Arc<dyn EmailSender>,
    site: SiteSettings,
) -> Result<Server, anyhow::Error> {
    let store = web::Data::from(store);
    let dispatcher = web::Data::new(EmailDispatcher::new(email_sender));
    let templates = web::Data::new(EmailTemplates::new(site)?);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(
                DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", ALLOWED_HEADERS)),
            )
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/send-daily-devotional")
                    .route(web::post().to(send_daily_devotional))
                    .route(web::method(Method::OPTIONS).to(preflight)),
            )
            .service(
                web::resource("/send-notification")
                    .route(web::post().to(send_notification))
                    .route(web::method(Method::OPTIONS).to(preflight)),
            )
            .service(
                web::resource("/send-newsletter")
                    .route(web::post().to(send_newsletter))
                    .route(web::method(Method::OPTIONS).to(preflight)),
            )
            .service(
                web::resource("/events/content-published")
                    .route(web::post().to(content_published))
                    .route(web::method(Method::OPTIONS).to(preflight)),
            )
            .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
            .app_data(store.clone())
            .app_data(dispatcher.clone())
            .app_data(templates.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn get_connection_pool(db_config: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy_with(db_config.with_db())
}
