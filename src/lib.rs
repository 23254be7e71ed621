use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod config;
pub mod enhance;
pub mod error;
pub mod steps;
pub mod components {
    pub mod services_steps;
}
pub mod pages {
    pub mod home;
    pub mod services;
}

use pages::{home::Home, services::Services};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/services")]
    Services,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home | Route::NotFound => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
        Route::Services => {
            info!("Rendering Services page");
            html! { <Services /> }
        }
    }
}

#[function_component]
pub fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}
