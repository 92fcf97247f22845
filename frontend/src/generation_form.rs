use crate::generated_image::GeneratedImage;
use crate::image_input::ImageInput;
use crate::server_api::ApiClient;
use crate::tabs::Feature;
use crate::use_generation::use_image_generation;
use dioxus::prelude::*;
use ocid_common::generation::{
    FaceSwapRequest, GenerationParams, ImageEditRequest, ImagePayload, TextToImageRequest,
};
use std::sync::Arc;

const FALLBACK_MESSAGE: &str = "Terjadi kesalahan yang tidak terduga.";

/// 3つの機能で共通のフォーム。variantで入力欄の構成を切り替える。
/// is_loadingの間は送信ボタンを無効化して、多重送信を防ぐ。
#[component]
pub fn GenerationForm(client: Signal<Arc<ApiClient>>, variant: Feature) -> Element {
    let mut prompt = use_signal(String::new);
    let mut images = use_signal(Vec::<ImagePayload>::new);
    let mut source_image = use_signal(Vec::<ImagePayload>::new);
    let mut target_image = use_signal(Vec::<ImagePayload>::new);

    let (trigger, result) = use_image_generation(
        move |params| {
            let client = client();
            async move { client.generation.generate(params).await }
        },
        FALLBACK_MESSAGE,
    );

    let is_loading = result().is_loading;
    let can_submit = match variant {
        Feature::TextToImage => !prompt().trim().is_empty(),
        Feature::ImageEdit => !prompt().trim().is_empty() && !images().is_empty(),
        Feature::FaceSwap => !source_image().is_empty() && !target_image().is_empty(),
    };

    let on_submit = move |event: FormEvent| {
        event.prevent_default();
        if is_loading || !can_submit {
            return;
        }
        let params = match variant {
            Feature::TextToImage => GenerationParams::TextToImage(TextToImageRequest {
                prompt: prompt(),
            }),
            Feature::ImageEdit => GenerationParams::ImageEdit(ImageEditRequest {
                prompt: prompt(),
                images: images(),
            }),
            Feature::FaceSwap => {
                let (Some(source), Some(target)) = (
                    source_image().into_iter().next(),
                    target_image().into_iter().next(),
                ) else {
                    return;
                };
                GenerationParams::FaceSwap(FaceSwapRequest {
                    source_image: source,
                    target_image: target,
                })
            }
        };
        trigger.call(params);
    };

    rsx! {
        div { class: "generation-form",
            h2 { "{variant.label()}" }
            p { class: "description", "{variant.description()}" }
            form { onsubmit: on_submit,
                if variant == Feature::FaceSwap {
                    ImageInput {
                        id: "source-image-file",
                        label: "Gambar Sumber (Wajah untuk Digunakan)",
                        multiple: false,
                        on_change: move |files| source_image.set(files),
                    }
                    ImageInput {
                        id: "target-image-file",
                        label: "Gambar Target (Gambar untuk Ditempeli Wajah)",
                        multiple: false,
                        on_change: move |files| target_image.set(files),
                    }
                }
                if variant == Feature::ImageEdit {
                    ImageInput {
                        id: "image-edit-file",
                        label: "Unggah Gambar",
                        multiple: true,
                        on_change: move |files| images.set(files),
                    }
                }
                if variant != Feature::FaceSwap {
                    textarea {
                        class: "form-control",
                        rows: "3",
                        placeholder: "{variant.placeholder()}",
                        value: "{prompt}",
                        disabled: is_loading,
                        oninput: move |e| prompt.set(e.value()),
                    }
                }
                button {
                    type: "submit",
                    class: "btn btn-primary",
                    disabled: is_loading || !can_submit,
                    if is_loading { "Menghasilkan..." } else { "Hasilkan Gambar" }
                }
            }
            GeneratedImage { result: result() }
        }
    }
}
