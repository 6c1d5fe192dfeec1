//! Login page: credential form driving the session login flow.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::LoginForm;
use crate::state::session::SessionState;

/// Login page — submits credentials and adopts the issued session.
/// Redirects to the dashboard once the session is authenticated.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    // Already signed in — nothing to do here.
    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.is_authenticated() {
            navigate("/", NavigateOptions::default());
        }
    });

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        pending.set(true);
        error.set(None);
        leptos::task::spawn_local(async move {
            // On success the auth effect above performs the redirect.
            if let Err(message) = crate::net::browser::submit_login(&form).await {
                error.set(Some(message));
            }
            pending.set(false);
        });
    };

    view! {
        <div class="login-page">
            <h1>"RentalHub"</h1>
            <p>"Sign in to manage your rentals"</p>
            <form class="auth-form" on:submit=on_submit>
                <label for="email">"Email"</label>
                <input
                    id="email"
                    type="email"
                    required
                    prop:value=email
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    required
                    prop:value=password
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                {move || error.get().map(|message| view! { <p class="auth-form__error">{message}</p> })}
                <button type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <p class="auth-form__switch">
                "No account yet? " <a href="/register">"Register"</a>
            </p>
        </div>
    }
}
