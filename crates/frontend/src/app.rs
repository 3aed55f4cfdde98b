use crate::details::{DetailModal, DetailState};
use crate::shared::toast::{ToastStack, Toasts};
use leptos::prelude::*;

/// Reactive state of the overlay mounted on top of the server-rendered page
#[derive(Clone, Copy)]
pub struct AppContext {
    pub toasts: Toasts,
    pub details: RwSignal<DetailState>,
}

impl AppContext {
    pub fn new(toast_duration_ms: u32) -> Self {
        Self {
            toasts: Toasts::new(toast_duration_ms),
            details: RwSignal::new(DetailState::default()),
        }
    }
}

#[component]
pub fn App(ctx: AppContext) -> impl IntoView {
    provide_context(ctx);

    view! {
        <ToastStack toasts=ctx.toasts />
        <DetailModal state=ctx.details />
    }
}
