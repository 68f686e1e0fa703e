//! src/routes/home/mod.rs

use actix_web::Responder;
use actix_web_flash_messages::IncomingFlashMessages;
use askama_actix::Template;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    flash_messages: Vec<String>,
}

pub async fn home(flash_messages: IncomingFlashMessages) -> impl Responder {
    let flash_messages: Vec<String> = flash_messages
        .iter()
        .map(|m| m.content().to_string())
        .collect();
    HomeTemplate { flash_messages }
}
