use futures::future::LocalBoxFuture;
use ocid_common::generation::GenerationParams;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

/// 1つのフォームが持つ生成リクエストの状態。
/// is_loadingがfalseのとき、errorかimage_urlのどちらか一方だけが設定される。
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub is_loading: bool,
    pub error: Option<String>,
    pub image_url: Option<String>,
}

impl GenerationResult {
    pub fn idle() -> GenerationResult {
        GenerationResult {
            is_loading: false,
            error: None,
            image_url: None,
        }
    }

    fn loading() -> GenerationResult {
        GenerationResult {
            is_loading: true,
            error: None,
            image_url: None,
        }
    }

    fn success(image_url: String) -> GenerationResult {
        GenerationResult {
            is_loading: false,
            error: None,
            image_url: Some(image_url),
        }
    }

    fn failed(message: String) -> GenerationResult {
        GenerationResult {
            is_loading: false,
            error: Some(message),
            image_url: None,
        }
    }
}

type Perform = dyn Fn(GenerationParams) -> LocalBoxFuture<'static, anyhow::Result<String>>;
type OnChange = dyn Fn(GenerationResult);

/// 生成リクエストのライフサイクル管理。
/// performを包んでIdle -> Loading -> {Success, Failed}の遷移を共通化する。
/// リトライもタイムアウトもキャンセルも持たない。
pub struct ImageGeneration {
    perform: Box<Perform>,
    fallback_message: String,
    on_change: Box<OnChange>,
    state: RefCell<GenerationResult>,
    seq: Cell<u64>,
}

impl ImageGeneration {
    pub fn new<F, Fut, C>(
        perform: F,
        fallback_message: impl Into<String>,
        on_change: C,
    ) -> ImageGeneration
    where
        F: Fn(GenerationParams) -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<String>> + 'static,
        C: Fn(GenerationResult) + 'static,
    {
        ImageGeneration {
            perform: Box::new(move |params| Box::pin(perform(params))),
            fallback_message: fallback_message.into(),
            on_change: Box::new(on_change),
            state: RefCell::new(GenerationResult::idle()),
            seq: Cell::new(0),
        }
    }

    pub fn new_shared<F, Fut, C>(
        perform: F,
        fallback_message: impl Into<String>,
        on_change: C,
    ) -> Rc<ImageGeneration>
    where
        F: Fn(GenerationParams) -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<String>> + 'static,
        C: Fn(GenerationResult) + 'static,
    {
        Rc::new(Self::new(perform, fallback_message, on_change))
    }

    pub fn state(&self) -> GenerationResult {
        self.state.borrow().clone()
    }

    /// リクエストを開始する。多重送信の抑止は呼び出し側(送信ボタンの無効化)が担う。
    pub async fn trigger(&self, params: GenerationParams) {
        // バリデーションに落ちたらperformを呼ばずに終わる。
        // seqを進めて、実行中のperformの結果がこのエラーを上書きしないようにする
        if let Err(err) = params.validate() {
            self.seq.set(self.seq.get() + 1);
            self.publish(GenerationResult::failed(err.to_string()));
            return;
        }

        let seq = self.seq.get() + 1;
        self.seq.set(seq);
        self.publish(GenerationResult::loading());

        let outcome = (self.perform)(params).await;

        // 新しいtriggerが始まっていたら、この結果は古いので破棄する
        if self.seq.get() != seq {
            return;
        }

        match outcome {
            Ok(image_url) => self.publish(GenerationResult::success(image_url)),
            Err(err) => {
                let message = err.to_string();
                let message = if message.trim().is_empty() {
                    self.fallback_message.clone()
                } else {
                    message
                };
                self.publish(GenerationResult::failed(message));
            }
        }
    }

    fn publish(&self, next: GenerationResult) {
        *self.state.borrow_mut() = next.clone();
        (self.on_change)(next);
    }
}

#[cfg(test)]
mod tests;
