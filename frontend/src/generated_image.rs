use crate::generation::GenerationResult;
use dioxus::prelude::*;

/// 生成結果の表示パネル。スピナー、エラー、画像のいずれかを出す。
#[component]
pub fn GeneratedImage(result: GenerationResult) -> Element {
    let body = if result.is_loading {
        rsx! {
            div { class: "result-loading",
                div { class: "spinner" }
                p { "Merangkai visi Anda..." }
            }
        }
    } else if let Some(error) = result.error.clone() {
        rsx! {
            p { class: "error-text", "{error}" }
        }
    } else if let Some(image_url) = result.image_url.clone() {
        rsx! {
            img { class: "result-image", src: "{image_url}", alt: "Gambar hasil" }
        }
    } else {
        rsx! {
            p { class: "placeholder", "Gambar yang Anda hasilkan akan muncul di sini." }
        }
    };

    let download_url = if result.is_loading {
        None
    } else {
        result.image_url.clone()
    };
    let download = match download_url {
        Some(image_url) => rsx! {
            a {
                class: "btn btn-download",
                href: "{image_url}",
                download: "generated-image.jpg",
                "Unduh Gambar"
            }
        },
        None => rsx! {},
    };

    rsx! {
        div { class: "generated-image",
            h3 { "Hasil" }
            div { class: "result-frame", {body} }
            {download}
        }
    }
}
