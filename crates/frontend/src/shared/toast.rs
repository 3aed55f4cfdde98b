//! Short-lived notifications stacked in a corner of the page.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast-item toast-item--success",
            ToastKind::Error => "toast-item toast-item--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastItem {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<ToastItem>,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, text: String) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(ToastItem { id, kind, text });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[ToastItem] {
        &self.items
    }
}

#[derive(Clone, Copy)]
pub struct Toasts {
    queue: RwSignal<ToastQueue>,
    duration_ms: u32,
}

impl Toasts {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
            duration_ms,
        }
    }

    /// Show `text`; it disappears on its own after the configured duration.
    pub fn push(&self, kind: ToastKind, text: impl Into<String>) {
        let text = text.into();
        log::info!("toast: {}", text);
        let mut id = 0;
        self.queue.update(|q| id = q.push(kind, text));

        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(this.duration_ms).await;
            this.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }

    pub fn items(&self) -> Vec<ToastItem> {
        self.queue.with(|q| q.items().to_vec())
    }
}

#[component]
pub fn ToastStack(toasts: Toasts) -> impl IntoView {
    view! {
        <div class="toast-stack" style="position: fixed; top: 16px; right: 16px; z-index: 2000; display: flex; flex-direction: column; gap: 8px;">
            <For
                each=move || toasts.items()
                key=|toast| toast.id
                children=move |toast: ToastItem| {
                    let id = toast.id;
                    view! {
                        <div
                            class=toast.kind.class()
                            role="status"
                            style="cursor: pointer;"
                            on:click=move |_| toasts.dismiss(id)
                        >
                            {toast.text}
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_ids_and_dismiss() {
        let mut q = ToastQueue::default();
        let a = q.push(ToastKind::Success, "first".to_string());
        let b = q.push(ToastKind::Error, "second".to_string());
        assert_ne!(a, b);
        assert_eq!(q.items().len(), 2);

        q.dismiss(a);
        assert_eq!(q.items().len(), 1);
        assert_eq!(q.items()[0].text, "second");

        // unknown id is a no-op
        q.dismiss(a);
        assert_eq!(q.items().len(), 1);
    }
}
