use dioxus::prelude::*;
use dioxus_router::{Navigator, use_navigator};
use survey_core::model::{DietaryRestriction, Page};
use tracing::debug;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{FormState, SurveyVm, start_survey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurveyIntent {
    Next,
    Back,
    Submit,
    DismissNotice,
}

fn edit_form(mut vm: Signal<Option<SurveyVm>>, apply: impl FnOnce(&mut FormState)) {
    match vm.write().as_mut() {
        Some(vm) => vm.edit(apply),
        None => debug!("edit ignored while the survey is busy"),
    }
}

fn follow_redirect(navigator: Navigator, path: &str) {
    let route = path.parse::<Route>().unwrap_or(Route::ThankYou {});
    let _ = navigator.push(route);
}

#[component]
pub fn SurveyView() -> Element {
    let ctx = use_context::<AppContext>();
    let services = ctx.survey_services();
    let navigator = use_navigator();
    let vm = use_signal(|| None::<SurveyVm>);
    // Last form seen while the vm is checked out across an await.
    let snapshot = use_signal(|| None::<FormState>);
    let error = use_signal(|| None::<ViewError>);

    let mut resource = use_resource(move || {
        let services = services.clone();
        let mut vm = vm;
        async move {
            let started = start_survey(&services).await?;
            vm.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(resource);

    let dispatch_intent = use_callback(move |intent: SurveyIntent| {
        let mut vm = vm;
        let mut snapshot = snapshot;
        let mut error = error;

        match intent {
            SurveyIntent::Back => {
                if let Some(vm) = vm.write().as_mut() {
                    vm.back();
                }
            }
            SurveyIntent::DismissNotice => {
                let redirect = vm.write().as_mut().and_then(SurveyVm::dismiss_notice);
                if let Some(path) = redirect {
                    follow_redirect(navigator, &path);
                }
            }
            SurveyIntent::Next => {
                spawn(async move {
                    let Some(mut local) = vm.write().take() else {
                        return;
                    };
                    snapshot.set(Some(local.form().clone()));
                    let result = local.next().await;

                    // Always put the vm back so the form stays usable after errors.
                    vm.set(Some(local));
                    error.set(result.err());
                });
            }
            SurveyIntent::Submit => {
                spawn(async move {
                    let prepared = match vm.write().as_mut() {
                        Some(local) => local.begin_submit(),
                        None => return,
                    };
                    let pending = match prepared {
                        Ok(Some(pending)) => pending,
                        Ok(None) => {
                            debug!("submit ignored while another is in flight");
                            return;
                        }
                        Err(err) => {
                            error.set(Some(err));
                            return;
                        }
                    };

                    let completed = pending.send().await;

                    let Some(mut local) = vm.write().take() else {
                        return;
                    };
                    snapshot.set(Some(local.form().clone()));
                    let result = local.finish_submit(completed).await;
                    let redirect = local.take_redirect();
                    vm.set(Some(local));

                    match result {
                        Ok(_) => error.set(None),
                        Err(err) => error.set(Some(err)),
                    }
                    // Success leaves a notice up, so the redirect waits for DismissNotice.
                    if let Some(path) = redirect {
                        follow_redirect(navigator, &path);
                    }
                });
            }
        }
    });

    let form = vm
        .read()
        .as_ref()
        .map(|vm| vm.form().clone())
        .or_else(|| snapshot().map(FormState::checked_out));
    let page_label = vm
        .read()
        .as_ref()
        .map(SurveyVm::page_label)
        .unwrap_or_default();

    rsx! {
        div { class: "page survey",
            h2 { "Food Preferences Survey" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| resource.restart(),
                        "Retry"
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = *error.read() {
                        p { class: "survey-error", "{err.message()}" }
                    }
                    if let Some(form) = form {
                        ProgressBar { percent_style: form.progress_style(), page_label }
                        BasicInfoPage { form: form.clone(), vm, on_intent: dispatch_intent }
                        DietaryPage { form: form.clone(), vm, on_intent: dispatch_intent }
                        CuisinePage { form: form.clone(), vm, on_intent: dispatch_intent }
                        SummaryPage { form: form.clone(), on_intent: dispatch_intent }
                        if let Some(message) = form.notice.clone() {
                            NoticeModal {
                                message,
                                enabled: form.inputs_enabled,
                                on_intent: dispatch_intent,
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ProgressBar(percent_style: String, page_label: String) -> Element {
    rsx! {
        div { class: "progress",
            div { class: "progress-bar", id: "progress-bar", style: "{percent_style}" }
        }
        p { class: "page-indicator", "{page_label}" }
    }
}

#[component]
fn PageControls(page: Page, enabled: bool, on_intent: EventHandler<SurveyIntent>) -> Element {
    rsx! {
        div { class: "page-controls",
            if page.previous().is_some() {
                button {
                    class: "btn btn-secondary prev-btn",
                    r#type: "button",
                    disabled: !enabled,
                    onclick: move |_| on_intent.call(SurveyIntent::Back),
                    "Previous"
                }
            }
            if page == Page::LAST {
                button {
                    class: "btn btn-primary",
                    id: "submit-btn",
                    r#type: "button",
                    disabled: !enabled,
                    onclick: move |_| on_intent.call(SurveyIntent::Submit),
                    "Submit"
                }
            } else {
                button {
                    class: "btn btn-primary next-btn",
                    r#type: "button",
                    disabled: !enabled,
                    onclick: move |_| on_intent.call(SurveyIntent::Next),
                    "Next"
                }
            }
        }
    }
}

#[component]
fn BasicInfoPage(
    form: FormState,
    vm: Signal<Option<SurveyVm>>,
    on_intent: EventHandler<SurveyIntent>,
) -> Element {
    let page = Page::BasicInfo;
    rsx! {
        section { class: "survey-page", id: "{page.container_id()}", style: "{form.display_style(page)}",
            h3 { "{page.title()}" }
            label { r#for: "name", "Name" }
            input {
                id: "name",
                r#type: "text",
                disabled: !form.inputs_enabled,
                value: "{form.name}",
                oninput: move |evt| {
                    let value = evt.value();
                    edit_form(vm, move |form| form.name = value);
                },
            }
            label { r#for: "email", "Email" }
            input {
                id: "email",
                r#type: "email",
                disabled: !form.inputs_enabled,
                value: "{form.email}",
                oninput: move |evt| {
                    let value = evt.value();
                    edit_form(vm, move |form| form.email = value);
                },
            }
            PageControls { page, enabled: form.controls_enabled, on_intent }
        }
    }
}

#[component]
fn DietaryPage(
    form: FormState,
    vm: Signal<Option<SurveyVm>>,
    on_intent: EventHandler<SurveyIntent>,
) -> Element {
    let page = Page::Dietary;
    rsx! {
        section { class: "survey-page", id: "{page.container_id()}", style: "{form.display_style(page)}",
            h3 { "{page.title()}" }
            for restriction in DietaryRestriction::ALL {
                label { key: "{restriction.id()}", class: "checkbox",
                    input {
                        id: "{restriction.id()}",
                        r#type: "checkbox",
                        disabled: !form.inputs_enabled,
                        checked: form.dietary.contains(&restriction),
                        onchange: move |_| edit_form(vm, |form| form.toggle_dietary(restriction)),
                    }
                    "{restriction.label()}"
                }
            }
            PageControls { page, enabled: form.controls_enabled, on_intent }
        }
    }
}

#[component]
fn CuisinePage(
    form: FormState,
    vm: Signal<Option<SurveyVm>>,
    on_intent: EventHandler<SurveyIntent>,
) -> Element {
    let page = Page::Cuisine;
    rsx! {
        section { class: "survey-page", id: "{page.container_id()}", style: "{form.display_style(page)}",
            h3 { "{page.title()}" }
            fieldset { id: "cuisine-type", class: "cuisine-options",
                legend { "Favorite cuisines" }
                for cuisine in form.cuisine_options.clone() {
                    label { key: "{cuisine.as_str()}", class: "checkbox",
                        input {
                            r#type: "checkbox",
                            disabled: !form.inputs_enabled,
                            value: "{cuisine.as_str()}",
                            checked: form.cuisines.contains(cuisine.as_str()),
                            onchange: {
                                let cuisine = cuisine.clone();
                                move |_| edit_form(vm, |form| form.toggle_cuisine(&cuisine))
                            },
                        }
                        "{cuisine.label()}"
                    }
                }
            }
            label { r#for: "spice-level", "Spice level: {form.spice_level}" }
            input {
                id: "spice-level",
                r#type: "range",
                disabled: !form.inputs_enabled,
                min: "1",
                max: "5",
                value: "{form.spice_level}",
                oninput: move |evt| {
                    let value = evt.value();
                    edit_form(vm, move |form| form.spice_level = value);
                },
            }
            PageControls { page, enabled: form.controls_enabled, on_intent }
        }
    }
}

#[component]
fn SummaryPage(form: FormState, on_intent: EventHandler<SurveyIntent>) -> Element {
    let page = Page::Summary;
    rsx! {
        section { class: "survey-page", id: "{page.container_id()}", style: "{form.display_style(page)}",
            h3 { "{page.title()}" }
            div { id: "summary-content",
                if let Some(summary) = form.summary.clone() {
                    h4 { "Personal Information" }
                    p { "Name: {summary.name}" }
                    p { "Email: {summary.email}" }
                    h4 { "Dietary Restrictions" }
                    p { "{summary.dietary_restrictions}" }
                    h4 { "Cuisine Preferences" }
                    p { "Favorite Cuisines: {summary.favorite_cuisines}" }
                    p { "Spice Level: {summary.spice_level}" }
                }
            }
            PageControls { page, enabled: form.controls_enabled, on_intent }
        }
    }
}

#[component]
fn NoticeModal(message: String, enabled: bool, on_intent: EventHandler<SurveyIntent>) -> Element {
    rsx! {
        div { class: "notice-backdrop",
            div { class: "notice", role: "alertdialog",
                p { "{message}" }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !enabled,
                    onclick: move |_| on_intent.call(SurveyIntent::DismissNotice),
                    "OK"
                }
            }
        }
    }
}
