#![allow(non_snake_case)]

mod generated_image;
mod generation;
mod generation_form;
mod header;
mod image_input;
mod server_api;
mod tabs;
mod use_generation;

use dioxus::prelude::*;
use dioxus_logger::tracing::Level;
use ocid_common::config;
use tabs::Feature;
use wasm_bindgen_futures::spawn_local;

fn main() {
    dioxus_logger::init(Level::INFO).expect("failed to init logger");
    dioxus_web::launch::launch_cfg(App, dioxus_web::Config::default());
}

fn server_base_url() -> String {
    config::get("SERVER_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

#[component]
fn App() -> Element {
    // APIクライアントはここで1度だけ構築し、各フォームに渡す
    let client = use_signal(|| server_api::new_client(server_base_url()));
    let active_feature = use_signal(|| Feature::TextToImage);

    // 起動時に1度だけサーバーの疎通を確認する
    let mut server_status = use_signal(|| "...".to_string());
    use_hook(move || {
        spawn_local(async move {
            let text = client().basic.healthcheck().await;
            server_status.set(text);
        });
    });

    rsx! {
        div { class: "container",
            header::Header {}
            tabs::Tabs { active_feature }
            main { class: "feature-panel",
                generation_form::GenerationForm {
                    key: "{active_feature().label()}",
                    client,
                    variant: active_feature(),
                }
            }
            footer { class: "server-status", "Server: {server_status}" }
        }
    }
}
