mod gemini;
mod logging;
mod web;

use crate::logging::*;

type Result<T> = anyhow::Result<T>;

#[tokio::main]
async fn main() {
    let log = DEFAULT.new(o!("function" => "main"));
    info!(log, "Starting up");

    web::run().await;
}
