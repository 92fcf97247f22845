use dioxus::prelude::*;
use js_sys;
use ocid_common::generation::ImagePayload;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::File;

/// 全ファイルの読み込みが終わったら、選択順に並んだリストを返す。
/// FileReaderの完了順に依存しないように、選択時のインデックスで格納する。
fn completed_batch(slots: &[Option<ImagePayload>]) -> Option<Vec<ImagePayload>> {
    slots.iter().cloned().collect()
}

/// 選択されたファイルを読み込んでImagePayloadとして親に通知する。
/// ファイル形式の検証はaccept属性のフィルタに任せる。
#[component]
pub fn ImageInput(
    id: String,
    label: String,
    multiple: bool,
    on_change: EventHandler<Vec<ImagePayload>>,
) -> Element {
    let mut payloads = use_signal(Vec::<ImagePayload>::new);

    let input_id = id.clone();
    let file_change_handler = move |_| {
        let window = web_sys::window().expect("グローバルwindowオブジェクトがありません");
        let document = window.document().expect("現在のwindowにdocumentがありません");

        let input = document
            .get_element_by_id(&input_id)
            .unwrap()
            .dyn_into::<web_sys::HtmlInputElement>()
            .unwrap();

        let Some(files) = input.files() else { return };
        let slots = Rc::new(RefCell::new(vec![
            None::<ImagePayload>;
            files.length() as usize
        ]));
        for index in 0..files.length() {
            let Some(js_file) = files.get(index) else {
                continue;
            };
            let file_obj = js_file.dyn_into::<File>().unwrap();
            let mime_type = file_obj.type_();
            let reader = Rc::new(web_sys::FileReader::new().unwrap());
            let reader_clone = reader.clone();
            let slots = Rc::clone(&slots);
            let slot = index as usize;

            let onloadend = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
                if let Ok(result) = reader_clone.result() {
                    if let Ok(array_buffer) = result.dyn_into::<js_sys::ArrayBuffer>() {
                        let bytes = js_sys::Uint8Array::new(&array_buffer).to_vec();
                        let payload = ImagePayload::from_bytes(mime_type.clone(), &bytes);
                        slots.borrow_mut()[slot] = Some(payload);
                        if let Some(batch) = completed_batch(&slots.borrow()) {
                            let mut payloads = payloads;
                            let mut current = if multiple { payloads() } else { Vec::new() };
                            current.extend(batch);
                            payloads.set(current.clone());
                            on_change.call(current);
                        }
                    }
                }
            }) as Box<dyn FnMut(_)>);

            reader.set_onloadend(Some(onloadend.as_ref().unchecked_ref()));
            onloadend.forget(); // メモリリークを防ぐためにforget()を呼び出す
            reader.read_as_array_buffer(&file_obj).unwrap();
        }

        // 同じファイルをもう一度選べるように値を消しておく
        input.set_value("");
    };

    rsx! {
        div { class: "image-input",
            label { class: "form-label", "{label}" }
            if !payloads().is_empty() {
                div { class: "image-preview-grid",
                    for (index, payload) in payloads().into_iter().enumerate() {
                        div { class: "image-preview", key: "{index}",
                            img { src: "{payload.to_data_url()}", alt: "Pratinjau {index + 1}" }
                            button {
                                type: "button",
                                class: "btn btn-remove",
                                onclick: move |_| {
                                    let mut current = payloads();
                                    if index < current.len() {
                                        current.remove(index);
                                    }
                                    payloads.set(current.clone());
                                    on_change.call(current);
                                },
                                "×"
                            }
                        }
                    }
                }
            }
            div { class: "input-group",
                input {
                    id: "{id}",
                    class: "form-control",
                    type: "file",
                    accept: "image/*",
                    multiple: multiple,
                    onchange: file_change_handler,
                }
            }
        }
    }
}
