use yew::prelude::*;

use crate::components::services_steps::{ServiceStep, ServicesSteps};
use crate::config;

fn step(title: &'static str, body: &'static str, icon: &'static str) -> ServiceStep {
    ServiceStep {
        title: title.into(),
        body: body.into(),
        icon: Some(icon.into()),
    }
}

pub fn process_steps() -> Vec<ServiceStep> {
    vec![
        step(
            "Discovery",
            "We start with a workshop to understand your goals, your audience and what success looks like.",
            "/assets/icons/discovery.svg",
        ),
        step(
            "Strategy",
            "Findings turn into a plan: scope, sitemap, content priorities and a realistic timeline.",
            "/assets/icons/strategy.svg",
        ),
        step(
            "Design & build",
            "Design and development run side by side, with a working preview you can click through every week.",
            "/assets/icons/build.svg",
        ),
        step(
            "Launch & care",
            "We ship, measure and keep improving. Support continues long after the site goes live.",
            "/assets/icons/launch.svg",
        ),
    ]
}

fn branding_steps() -> Vec<ServiceStep> {
    vec![
        step(
            "Audit",
            "A look at how your brand shows up today, across the website, social channels and print.",
            "/assets/icons/audit.svg",
        ),
        step(
            "Identity",
            "Logo, colour, type and tone of voice, built as one system rather than separate pieces.",
            "/assets/icons/identity.svg",
        ),
        step(
            "Guidelines",
            "A compact brand book your team can actually use, with ready-made templates.",
            "/assets/icons/guidelines.svg",
        ),
    ]
}

#[function_component(Services)]
pub fn services() -> Html {
    let active_tab = use_state(|| 0usize);
    let tabs = [("Websites", process_steps()), ("Branding", branding_steps())];

    html! {
        <section class="services-page">
            <div class="services-hero">
                <h1>{"How we work"}</h1>
                <p>{"Every project follows the same few steps, whatever its size."}</p>
            </div>
            <div class="w-tab-menu">
                { for tabs.iter().enumerate().map(|(index, (label, _))| {
                    let onclick = {
                        let active_tab = active_tab.clone();
                        Callback::from(move |e: MouseEvent| {
                            e.prevent_default();
                            active_tab.set(index);
                        })
                    };
                    html! {
                        <a
                            href="#"
                            class={classes!("w-tab-link", (index == *active_tab).then(|| "w--current"))}
                            {onclick}
                        >
                            { *label }
                        </a>
                    }
                }) }
            </div>
            <div class="w-tab-content">
                { for tabs.into_iter().enumerate().map(|(index, (_, steps))| {
                    let active = index == *active_tab;
                    html! {
                        <div
                            class={classes!("w-tab-pane", active.then(|| config::TAB_ACTIVE_CLASS))}
                            style={if active { "" } else { "display: none;" }}
                        >
                            <ServicesSteps {steps} visible={active} />
                        </div>
                    }
                }) }
            </div>
        </section>
    }
}
