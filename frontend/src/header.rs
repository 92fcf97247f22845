use dioxus::prelude::*;

#[component]
pub fn Header() -> Element {
    rsx! {
        header { class: "app-header",
            h1 { "Hasilkan Gambar Bareng Ocid" }
            p { class: "subtitle", "OCID AI yang cerdas dan keche, dengan ai buatan orang ganteng" }
        }
    }
}
