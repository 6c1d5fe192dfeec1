//! Dashboard landing page for authenticated users.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionState;

/// Dashboard page — greets the signed-in account and offers sign-out.
/// Redirects to `/login` when the restore phase ends anonymous.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        let state = auth.get();
        if !state.loading && !state.is_authenticated() {
            navigate("/login", NavigateOptions::default());
        }
    });

    let on_logout = move |_| {
        leptos::task::spawn_local(async move {
            // The session change flows back through the auth signal and
            // triggers the redirect effect above.
            crate::net::browser::sign_out().await;
        });
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>"RentalHub"</h1>
                <button class="btn" on:click=on_logout>
                    "Sign out"
                </button>
            </header>

            <Show when=move || auth.get().loading>
                <p>"Loading session..."</p>
            </Show>

            {move || {
                auth.get().identity.map(|identity| {
                    view! {
                        <section class="dashboard-page__welcome">
                            <h2>{format!("Welcome, {}", identity.name)}</h2>
                            <p class="dashboard-page__role">{identity.role.label()}</p>
                            <p class="dashboard-page__email">{identity.email}</p>
                        </section>
                    }
                })
            }}
        </div>
    }
}
