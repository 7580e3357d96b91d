//! Login Form Component
//!
//! Name/password login, account signup, and the optional guest shortcut.
//! Signup does not sign in; the form switches back to login afterwards.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::store::{push_toast, use_app_store, ToastKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "ログイン",
            AuthMode::Signup => "新規登録",
        }
    }

    /// Label of the link that switches to the other mode
    pub fn switch_label(&self) -> &'static str {
        match self {
            AuthMode::Login => "アカウントを作成",
            AuthMode::Signup => "ログインに戻る",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }
}

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (mode, set_mode) = signal(AuthMode::Login);
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (pending, set_pending) = signal(false);
    let guest_enabled = ctx.guest_enabled;

    let submit_ctx = ctx.clone();
    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        let (user_name, user_password) = (name.get(), password.get());
        let ctx = submit_ctx.clone();
        match mode.get() {
            AuthMode::Login => {
                if user_name.is_empty() || user_password.is_empty() {
                    return;
                }
                set_pending.set(true);
                spawn_local(async move {
                    let result = ctx.session.login(&user_name, &user_password).await;
                    set_pending.set(false);
                    if result.is_ok() {
                        set_password.set(String::new());
                    }
                    ctx.finish_login(store, result);
                });
            }
            AuthMode::Signup => {
                let user_email = email.get();
                set_pending.set(true);
                spawn_local(async move {
                    let result = ctx.session.signup(&user_name, &user_email, &user_password).await;
                    set_pending.set(false);
                    match result {
                        Ok(()) => {
                            set_password.set(String::new());
                            set_mode.set(AuthMode::Login);
                            push_toast(&store, ToastKind::Success, "登録しました。ログインしてください。");
                        }
                        Err(e) => push_toast(&store, ToastKind::Error, e.to_string()),
                    }
                });
            }
        }
    };

    let guest_login = move |_| {
        if pending.get() {
            return;
        }
        let ctx = ctx.clone();
        set_pending.set(true);
        spawn_local(async move {
            let result = ctx.session.guest_login().await;
            set_pending.set(false);
            ctx.finish_login(store, result);
        });
    };

    view! {
        <form class="login-form" on:submit=submit>
            <h1>{move || mode.get().title()}</h1>
            <input
                type="text"
                placeholder="ユーザー名"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <Show when=move || mode.get() == AuthMode::Signup>
                <input
                    type="email"
                    placeholder="メールアドレス"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
            </Show>
            <input
                type="password"
                placeholder="パスワード"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || pending.get()>{move || mode.get().title()}</button>
            <button
                type="button"
                class="mode-switch-btn"
                on:click=move |_| set_mode.update(|m| *m = m.toggled())
            >
                {move || mode.get().switch_label()}
            </button>
            {guest_enabled.then(|| view! {
                <button type="button" class="guest-btn" disabled=move || pending.get() on:click=guest_login>
                    "ゲストとしてログイン"
                </button>
            })}
        </form>
    }
}
