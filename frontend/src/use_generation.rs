use crate::generation::{GenerationResult, ImageGeneration};
use dioxus::prelude::*;
use ocid_common::generation::GenerationParams;
use std::future::Future;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

/// 画像生成の状態管理をフォーム間で共通化するフック。
/// performとフォールバックメッセージを受け取り、trigger関数と状態シグナルを返す。
pub fn use_image_generation<F, Fut>(
    perform: F,
    fallback_message: &str,
) -> (Callback<GenerationParams>, Signal<GenerationResult>)
where
    F: Fn(GenerationParams) -> Fut + 'static,
    Fut: Future<Output = anyhow::Result<String>> + 'static,
{
    let state = use_signal(GenerationResult::idle);
    let fallback_message = fallback_message.to_string();
    let manager = use_hook(|| {
        ImageGeneration::new_shared(perform, fallback_message, move |next| {
            let mut state = state;
            state.set(next);
        })
    });

    let trigger = use_callback(move |params: GenerationParams| {
        let manager = Rc::clone(&manager);
        spawn_local(async move { manager.trigger(params).await });
    });

    (trigger, state)
}
