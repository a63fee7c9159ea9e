use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct VisitData {
    visits: u64,
    completed: bool,
}

#[component]
pub fn ThankYouView() -> Element {
    let ctx = use_context::<AppContext>();
    let visits = ctx.visits();

    let resource = use_resource(move || {
        let visits = visits.clone();
        async move {
            let count = visits.visit_count().await.map_err(|_| ViewError::Unavailable)?;
            let completed = visits.is_completed().await.map_err(|_| ViewError::Unavailable)?;
            Ok::<_, ViewError>(VisitData {
                visits: count,
                completed,
            })
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page thank-you",
            h2 { "Thank you!" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.completed {
                        p { "Your food preferences have been recorded." }
                    } else {
                        p { "No completed survey on record yet." }
                    }
                    p { class: "visit-count", "Visits: {data.visits}" }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
            Link { to: Route::Survey {}, "Back to the survey" }
        }
    }
}
