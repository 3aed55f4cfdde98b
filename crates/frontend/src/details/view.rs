use super::state::DetailState;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use leptos::prelude::*;
use thaw::*;

/// Modal showing the record JSON and its outcome
#[component]
pub fn DetailModal(state: RwSignal<DetailState>) -> impl IntoView {
    let is_open = Memo::new(move |_| state.with(|s| s.is_open()));
    let close = Callback::new(move |_: ()| state.set(DetailState::Closed));

    let body = move || match state.get() {
        DetailState::Closed => view! { <></> }.into_any(),
        DetailState::Loading { .. } => view! {
            <Flex justify=FlexJustify::Center align=FlexAlign::Center gap=FlexGap::Small style="padding: 40px;">
                <Spinner />
                "Loading..."
            </Flex>
        }
        .into_any(),
        DetailState::Loaded { body, summary, success, .. } => {
            let color = if success { BadgeColor::Success } else { BadgeColor::Danger };
            view! {
                <div class="detail-section">
                    <h3 class="detail-section__title">"Request"</h3>
                    <pre class="detail-json" style="max-height: 420px; overflow: auto; margin: 0;">{body}</pre>
                </div>
                <div class="detail-section" style="margin-top: 16px;">
                    <h3 class="detail-section__title">"Response"</h3>
                    <Badge appearance=BadgeAppearance::Tint color=color>{summary}</Badge>
                </div>
            }
            .into_any()
        }
        DetailState::Failed { message, .. } => view! {
            <div style="padding: 12px; background: var(--color-error-50); border: 1px solid var(--color-error-100); border-radius: 8px; display: flex; align-items: center; gap: 8px;">
                <span style="color: var(--color-error);">{icon("alert-triangle")}</span>
                <span style="color: var(--color-error);">{message}</span>
            </div>
        }
        .into_any(),
    };

    view! {
        {move || {
            is_open.get().then(|| {
                let title = Signal::derive(move || state.with(|s| s.title()));
                view! {
                    <Modal title=title on_close=close>
                        {body}
                        <div class="modal-footer" style="margin-top: 16px; text-align: right;">
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| close.run(())>
                                "Close"
                            </Button>
                        </div>
                    </Modal>
                }
            })
        }}
    }
}
