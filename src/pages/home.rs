use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::services_steps::ServicesSteps;
use crate::pages::services::process_steps;
use crate::steps::StepConfig;
use crate::Route;

#[function_component(Home)]
pub fn home() -> Html {
    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    html! {
        <div class="home-page">
            <header class="hero">
                <h1>{"Websites that do the work"}</h1>
                <p>{"Strategy, design and development under one roof."}</p>
                <Link<Route> to={Route::Services} classes="hero-cta">
                    {"See our services"}
                </Link<Route>>
            </header>
            <section class="services_outer-wrapper">
                <h2>{"From first call to launch"}</h2>
                <ServicesSteps steps={process_steps()} config={StepConfig::highlighted()} />
            </section>
        </div>
    }
}
