use podcastr::app::App;

fn main() {
    tracing_wasm::set_as_global_default();
    dioxus::launch(App)
}
