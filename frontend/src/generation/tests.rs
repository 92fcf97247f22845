use super::*;
use anyhow::anyhow;
use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use ocid_common::generation::TextToImageRequest;

fn text_params(prompt: &str) -> GenerationParams {
    GenerationParams::TextToImage(TextToImageRequest {
        prompt: prompt.to_string(),
    })
}

fn recorder() -> (Rc<RefCell<Vec<GenerationResult>>>, impl Fn(GenerationResult)) {
    let history = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&history);
    (history, move |next| sink.borrow_mut().push(next))
}

#[test]
fn test_successful_generation() {
    let (history, on_change) = recorder();
    let manager = ImageGeneration::new(
        |_| async { Ok("data:image/png;base64,AAA".to_string()) },
        "fallback",
        on_change,
    );

    let mut pool = LocalPool::new();
    pool.run_until(manager.trigger(text_params("a red apple")));

    let state = manager.state();
    assert!(!state.is_loading);
    assert_eq!(state.error, None);
    assert_eq!(
        state.image_url,
        Some("data:image/png;base64,AAA".to_string())
    );

    // Idle -> Loading -> Success
    let history = history.borrow();
    assert_eq!(history.len(), 2);
    assert!(history[0].is_loading);
    assert_eq!(history[0].error, None);
    assert_eq!(history[0].image_url, None);
    assert!(!history[1].is_loading);
}

#[test]
fn test_failed_generation_keeps_error_message() {
    let (_, on_change) = recorder();
    let manager = ImageGeneration::new(
        |_| async { Err(anyhow!("quota exceeded")) },
        "fallback",
        on_change,
    );

    let mut pool = LocalPool::new();
    pool.run_until(manager.trigger(text_params("x")));

    let state = manager.state();
    assert!(!state.is_loading);
    assert_eq!(state.error, Some("quota exceeded".to_string()));
    assert_eq!(state.image_url, None);
}

#[test]
fn test_failure_without_message_uses_fallback() {
    let (_, on_change) = recorder();
    let manager = ImageGeneration::new(
        |_| async { Err(anyhow!("")) },
        "Terjadi kesalahan yang tidak terduga.",
        on_change,
    );

    let mut pool = LocalPool::new();
    pool.run_until(manager.trigger(text_params("x")));

    let state = manager.state();
    assert_eq!(
        state.error,
        Some("Terjadi kesalahan yang tidak terduga.".to_string())
    );
    assert_eq!(state.image_url, None);
}

#[test]
fn test_empty_prompt_does_not_invoke_perform() {
    let calls = Rc::new(Cell::new(0u32));
    let counted = Rc::clone(&calls);
    let (history, on_change) = recorder();
    let manager = ImageGeneration::new(
        move |_| {
            counted.set(counted.get() + 1);
            async { Ok("unreachable".to_string()) }
        },
        "fallback",
        on_change,
    );

    let mut pool = LocalPool::new();
    pool.run_until(manager.trigger(text_params("   ")));

    assert_eq!(calls.get(), 0);
    let state = manager.state();
    assert!(!state.is_loading);
    assert_eq!(state.error, Some("Prompt kosong.".to_string()));
    assert_eq!(state.image_url, None);
    // Loading状態を経由しないこと
    assert!(history.borrow().iter().all(|s| !s.is_loading));
}

#[test]
fn test_loading_is_set_while_in_flight() {
    let (sender, receiver) = oneshot::channel::<anyhow::Result<String>>();
    let slot = Rc::new(RefCell::new(Some(receiver)));
    let (_, on_change) = recorder();
    let manager = ImageGeneration::new_shared(
        move |_| {
            let receiver = slot.borrow_mut().take().expect("perform called twice");
            async move { receiver.await.map_err(|_| anyhow!("cancelled"))? }
        },
        "fallback",
        on_change,
    );

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let running = Rc::clone(&manager);
    spawner
        .spawn_local(async move { running.trigger(text_params("a red apple")).await })
        .unwrap();

    pool.run_until_stalled();
    assert!(manager.state().is_loading);

    sender
        .send(Ok("data:image/png;base64,AAA".to_string()))
        .unwrap();
    pool.run_until_stalled();

    let state = manager.state();
    assert!(!state.is_loading);
    assert_eq!(
        state.image_url,
        Some("data:image/png;base64,AAA".to_string())
    );
}

#[test]
fn test_validation_error_survives_in_flight_completion() {
    let (sender, receiver) = oneshot::channel::<anyhow::Result<String>>();
    let slot = Rc::new(RefCell::new(Some(receiver)));
    let (_, on_change) = recorder();
    let manager = ImageGeneration::new_shared(
        move |_| {
            let receiver = slot.borrow_mut().take().expect("perform called twice");
            async move { receiver.await.map_err(|_| anyhow!("cancelled"))? }
        },
        "fallback",
        on_change,
    );

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let running = Rc::clone(&manager);
    spawner
        .spawn_local(async move { running.trigger(text_params("a red apple")).await })
        .unwrap();
    pool.run_until_stalled();
    assert!(manager.state().is_loading);

    // 実行中に空プロンプトでtriggerするとバリデーションエラーになる
    pool.run_until(manager.trigger(text_params("   ")));
    assert_eq!(manager.state().error, Some("Prompt kosong.".to_string()));

    // 先に始まっていたリクエストが完了してもエラーを上書きしない
    sender
        .send(Ok("data:image/png;base64,AAA".to_string()))
        .unwrap();
    pool.run_until_stalled();

    let state = manager.state();
    assert!(!state.is_loading);
    assert_eq!(state.error, Some("Prompt kosong.".to_string()));
    assert_eq!(state.image_url, None);
}

#[test]
fn test_stale_result_is_discarded() {
    let (first_sender, first_receiver) = oneshot::channel::<anyhow::Result<String>>();
    let (second_sender, second_receiver) = oneshot::channel::<anyhow::Result<String>>();
    let receivers = Rc::new(RefCell::new(vec![second_receiver, first_receiver]));
    let (history, on_change) = recorder();
    let manager = ImageGeneration::new_shared(
        move |_| {
            let receiver = receivers.borrow_mut().pop().expect("too many calls");
            async move { receiver.await.map_err(|_| anyhow!("cancelled"))? }
        },
        "fallback",
        on_change,
    );

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    for prompt in ["first", "second"] {
        let running = Rc::clone(&manager);
        spawner
            .spawn_local(async move { running.trigger(text_params(prompt)).await })
            .unwrap();
        pool.run_until_stalled();
    }
    assert!(manager.state().is_loading);

    // 先に始まったリクエストが後から完了しても状態を上書きしない
    first_sender.send(Ok("stale".to_string())).unwrap();
    pool.run_until_stalled();
    assert!(manager.state().is_loading);

    second_sender.send(Ok("fresh".to_string())).unwrap();
    pool.run_until_stalled();

    let state = manager.state();
    assert!(!state.is_loading);
    assert_eq!(state.image_url, Some("fresh".to_string()));
    assert!(
        history
            .borrow()
            .iter()
            .all(|s| s.image_url.as_deref() != Some("stale"))
    );
}
