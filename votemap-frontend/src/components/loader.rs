use leptos::*;

use votemap_core::ui::loader::{Loader, LoaderSize, Opacity};

#[component]
pub fn FullScreenLoader(
    #[prop(into)] is_loading: Signal<bool>,
    #[prop(optional)] size: LoaderSize,
    #[prop(optional, into)] text: Option<String>,
    #[prop(optional)] opacity: Opacity,
) -> impl IntoView {
    let loader = Loader {
        size,
        text,
        is_loading: true,
        opacity,
    };
    let background = loader.background_color();
    let icon_class = format!(
        "animate-spin rounded-full border-4 border-gray-300 border-t-white {}",
        loader.size.icon_class()
    );
    move || {
        is_loading.get().then(|| {
            view! {
              <div
                style=format!("background-color: {background}")
                class="fixed inset-0 z-50 flex flex-col items-center justify-center h-screen"
              >
                <div class=icon_class.clone()></div>
                { loader.text.clone().map(|text| view! {
                    <p class="mt-4 text-center text-sm text-gray-200">{ text }</p>
                })}
              </div>
            }
        })
    }
}
