use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::context::AppContext;
use crate::views::{SurveyView, ThankYouView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", SurveyView)] Survey {},
        #[route("/thank-you", ThankYouView)] ThankYou {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();

    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { "{ctx.app_name()}" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
