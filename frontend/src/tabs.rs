use dioxus::prelude::*;

/// 画面上部のタブで切り替える3つの機能
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feature {
    TextToImage,
    ImageEdit,
    FaceSwap,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::TextToImage, Feature::ImageEdit, Feature::FaceSwap];

    pub fn label(&self) -> &'static str {
        match self {
            Feature::TextToImage => "Teks ke Gambar",
            Feature::ImageEdit => "Edit Gambar",
            Feature::FaceSwap => "Tukar Wajah",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Feature::TextToImage => {
                "Jelaskan gambar yang ingin Anda buat. Berikan deskripsi sedetail mungkin!"
            }
            Feature::ImageEdit => {
                "Unggah satu gambar atau lebih, lalu jelaskan perubahan yang Anda inginkan."
            }
            Feature::FaceSwap => {
                "Unggah wajah sumber dan gambar target untuk menukar wajahnya."
            }
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Feature::TextToImage => {
                "contoh: Seekor singa agung memakai mahkota, fotorealistis, 4k"
            }
            Feature::ImageEdit => {
                "contoh: Jadikan gambar pertama lukisan cat air, gunakan gaya gambar kedua."
            }
            Feature::FaceSwap => "",
        }
    }
}

#[component]
pub fn Tabs(active_feature: Signal<Feature>) -> Element {
    rsx! {
        div { class: "tabs",
            for feature in Feature::ALL {
                button {
                    key: "{feature.label()}",
                    class: if active_feature() == feature { "tab active" } else { "tab" },
                    onclick: move |_| {
                        let mut active_feature = active_feature;
                        active_feature.set(feature);
                    },
                    "{feature.label()}"
                }
            }
        }
    }
}
