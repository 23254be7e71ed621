use log::warn;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::steps::{MountedWidget, StepConfig};

#[derive(Clone, PartialEq)]
pub struct ServiceStep {
    pub title: AttrValue,
    pub body: AttrValue,
    pub icon: Option<AttrValue>,
}

#[derive(Properties, PartialEq)]
pub struct ServicesStepsProps {
    pub steps: Vec<ServiceStep>,
    /// Driven by an enclosing tab layout; standalone sections leave it on.
    #[prop_or(true)]
    pub visible: bool,
    #[prop_or_default]
    pub config: StepConfig,
}

#[function_component(ServicesSteps)]
pub fn services_steps(props: &ServicesStepsProps) -> Html {
    let container_ref = use_node_ref();
    let mounted = use_mut_ref(|| None::<MountedWidget>);

    // Mount once the markup exists, remount if the number of steps changes
    {
        let container_ref = container_ref.clone();
        let mounted = mounted.clone();
        let step_config = props.config.clone();
        let visible = props.visible;
        use_effect_with_deps(
            move |_| {
                if let Some(container) = container_ref.cast::<HtmlElement>() {
                    match MountedWidget::attach(container, step_config, visible) {
                        Ok(widget) => *mounted.borrow_mut() = Some(widget),
                        Err(e) => warn!("Services steps not mounted: {}", e),
                    }
                }
                move || {
                    mounted.borrow_mut().take();
                }
            },
            props.steps.len(),
        );
    }

    {
        let mounted = mounted.clone();
        use_effect_with_deps(
            move |visible| {
                if let Some(widget) = mounted.borrow().as_ref() {
                    widget.set_visible(*visible);
                }
                || ()
            },
            props.visible,
        );
    }

    html! {
        <div
            class="services_slider-wrapper-inner"
            ref={container_ref}
            data-step-managed="true"
        >
            <style>
                {r#"
                    .services_slider-wrapper-inner {
                        display: flex;
                        flex-direction: column;
                        gap: 1.5rem;
                        padding-left: 0.5rem;
                    }
                    .services_step-header {
                        display: flex;
                        align-items: center;
                        gap: 1.25rem;
                    }
                    .services_step-decor {
                        width: 0.75rem;
                        height: 0.75rem;
                        border-radius: 50%;
                        background: #E3E3E3;
                        position: relative;
                        z-index: 2;
                        transition: background 0.3s ease;
                    }
                    .services_step-decor.is-active {
                        background: #06F;
                    }
                    .services_step-header h4 {
                        margin: 0;
                        color: #7a7a7a;
                        transition: color 0.3s ease;
                    }
                    .services_step-header h4.is-active {
                        color: #111;
                    }
                    .services_step-content {
                        padding-left: 2rem;
                        overflow: hidden;
                    }
                    .services_step-content img {
                        width: 2.5rem;
                        height: 2.5rem;
                        margin-top: 0.75rem;
                    }
                "#}
            </style>
            { for props.steps.iter().map(|step| html! {
                <div class="w-dyn-item">
                    <div class="services_step-header" data-step="header">
                        <div class="services_step-decor" data-step="decor"></div>
                        <h4>{ step.title.clone() }</h4>
                    </div>
                    <div class="services_step-content" data-step-content="">
                        {
                            if let Some(icon) = &step.icon {
                                html! { <img src={icon.clone()} alt="" loading="lazy" /> }
                            } else {
                                html! {}
                            }
                        }
                        <p>{ step.body.clone() }</p>
                    </div>
                </div>
            }) }
        </div>
    }
}
