//! Registration page: account form driving the register-then-login flow.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::RegisterForm;
use crate::state::session::SessionState;

/// Registration page — creates an account and adopts the issued session.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.is_authenticated() {
            navigate("/", NavigateOptions::default());
        }
    });

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        // Checked locally before the server sees the form.
        if password.get_untracked() != confirmation.get_untracked() {
            error.set(Some("Passwords do not match".to_owned()));
            return;
        }
        let form = RegisterForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            password_confirmation: confirmation.get_untracked(),
        };
        pending.set(true);
        error.set(None);
        leptos::task::spawn_local(async move {
            if let Err(message) = crate::net::browser::submit_register(&form).await {
                error.set(Some(message));
            }
            pending.set(false);
        });
    };

    view! {
        <div class="register-page">
            <h1>"Create your account"</h1>
            <form class="auth-form" on:submit=on_submit>
                <label for="name">"Name"</label>
                <input
                    id="name"
                    type="text"
                    required
                    prop:value=name
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
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
                <label for="password_confirmation">"Confirm password"</label>
                <input
                    id="password_confirmation"
                    type="password"
                    required
                    prop:value=confirmation
                    on:input=move |ev| confirmation.set(event_target_value(&ev))
                />
                {move || error.get().map(|message| view! { <p class="auth-form__error">{message}</p> })}
                <button type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Creating account..." } else { "Register" }}
                </button>
            </form>
            <p class="auth-form__switch">
                "Already registered? " <a href="/login">"Sign in"</a>
            </p>
        </div>
    }
}
