use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod dom;
mod components {
    pub mod accordion;
    pub mod anchor_nav;
    pub mod contact_form;
    pub mod counter;
    pub mod demo;
    pub mod gallery;
    pub mod nav;
    pub mod reveal;
    pub mod scroll_chrome;
    pub mod tilt;
    pub mod video_modal;
}
mod pages {
    pub mod landing;
}

use pages::landing::Landing;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering landing page");
            html! { <Landing /> }
        }
        Route::NotFound => {
            info!("Unknown path, redirecting to landing page");
            html! { <Redirect<Route> to={Route::Home} /> }
        }
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    if console_log::init_with_level(config::log_level()).is_err() {
        gloo_console::warn!("logger already initialized");
    }

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
