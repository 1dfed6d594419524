//! Settings editor for the signed-in user's profile.
//!
//! Submits only the fields that actually changed, so an untouched form sends
//! nothing and a one-field edit cannot clobber a concurrent change elsewhere.

#[cfg(test)]
#[path = "user_settings_test.rs"]
mod user_settings_test;

use leptos::prelude::*;

use crate::app::AppSession;
use crate::net::types::{ProfilePatch, UserProfile};
use crate::state::auth::AuthState;

/// Editable profile field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsField {
    Name,
    Email,
    Address,
    BillingAddress,
    PhoneNumber,
    Location,
    VatNumber,
}

impl SettingsField {
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Email,
        Self::Address,
        Self::BillingAddress,
        Self::PhoneNumber,
        Self::Location,
        Self::VatNumber,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Address => "Address",
            Self::BillingAddress => "Billing Address",
            Self::PhoneNumber => "Phone Number",
            Self::Location => "Location",
            Self::VatNumber => "VAT Number",
        }
    }

    #[must_use]
    pub fn input_id(self) -> &'static str {
        match self {
            Self::Name => "settings-name",
            Self::Email => "settings-email",
            Self::Address => "settings-address",
            Self::BillingAddress => "settings-billing-address",
            Self::PhoneNumber => "settings-phone-number",
            Self::Location => "settings-location",
            Self::VatNumber => "settings-vat-number",
        }
    }

    #[must_use]
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::PhoneNumber => "tel",
            _ => "text",
        }
    }
}

/// Form buffer; every field is plain text while editing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub name: String,
    pub email: String,
    pub address: String,
    pub billing_address: String,
    pub phone_number: String,
    pub location: String,
    pub vat_number: String,
}

impl SettingsForm {
    #[must_use]
    pub fn from_profile(user: &UserProfile) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            address: text(&user.address),
            billing_address: text(&user.billing_address),
            phone_number: text(&user.phone_number),
            location: text(&user.location),
            vat_number: text(&user.vat_number),
        }
    }

    #[must_use]
    pub fn get(&self, field: SettingsField) -> &str {
        match field {
            SettingsField::Name => &self.name,
            SettingsField::Email => &self.email,
            SettingsField::Address => &self.address,
            SettingsField::BillingAddress => &self.billing_address,
            SettingsField::PhoneNumber => &self.phone_number,
            SettingsField::Location => &self.location,
            SettingsField::VatNumber => &self.vat_number,
        }
    }

    pub fn set(&mut self, field: SettingsField, value: String) {
        let slot = match field {
            SettingsField::Name => &mut self.name,
            SettingsField::Email => &mut self.email,
            SettingsField::Address => &mut self.address,
            SettingsField::BillingAddress => &mut self.billing_address,
            SettingsField::PhoneNumber => &mut self.phone_number,
            SettingsField::Location => &mut self.location,
            SettingsField::VatNumber => &mut self.vat_number,
        };
        *slot = value;
    }

    /// Patch holding only the fields that differ from `current` (after trimming).
    #[must_use]
    pub fn changes_from(&self, current: &UserProfile) -> ProfilePatch {
        let baseline = Self::from_profile(current);
        let changed = |field: SettingsField| {
            let edited = self.get(field).trim();
            (edited != baseline.get(field).trim()).then(|| edited.to_owned())
        };
        ProfilePatch {
            name: changed(SettingsField::Name),
            email: changed(SettingsField::Email),
            address: changed(SettingsField::Address),
            billing_address: changed(SettingsField::BillingAddress),
            phone_number: changed(SettingsField::PhoneNumber),
            location: changed(SettingsField::Location),
            vat_number: changed(SettingsField::VatNumber),
        }
    }
}

/// Settings form. Closes via `on_close` after a confirmed save or on cancel.
#[component]
pub fn UserSettings(on_close: Callback<()>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AppSession>();

    let form = RwSignal::new(auth.get_untracked().user().map(SettingsForm::from_profile).unwrap_or_default());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let save = Callback::new(move |()| {
        if busy.get_untracked() {
            return;
        }
        let Some(current) = auth.get_untracked().user().cloned() else {
            error.set("You need to be signed in to do that.".to_owned());
            return;
        };
        let patch = form.get_untracked().changes_from(&current);
        if patch.is_empty() {
            on_close.run(());
            return;
        }
        busy.set(true);
        error.set(String::new());

        let session = session.clone();
        leptos::task::spawn_local(async move {
            match session.update_user_details(patch).await {
                Ok(_) => {
                    busy.set(false);
                    on_close.run(());
                }
                Err(e) => {
                    log::warn!("failed to update user details: {e}");
                    error.set(e.to_string());
                    busy.set(false);
                }
            }
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        save.run(());
    };

    view! {
        <section class="panel">
            <div class="panel__header">
                <h3>"User Settings"</h3>
                <p class="panel__subtitle">"Update your personal information"</p>
            </div>
            <form class="settings-form" on:submit=on_submit>
                <dl class="panel__rows">
                    {SettingsField::ALL
                        .into_iter()
                        .map(|field| {
                            view! {
                                <div class="panel__row">
                                    <dt class="panel__label">
                                        <label for=field.input_id()>{field.label()}</label>
                                    </dt>
                                    <dd class="panel__value">
                                        <input
                                            id=field.input_id()
                                            class="settings-form__input"
                                            type=field.input_type()
                                            prop:value=move || form.with(|f| f.get(field).to_owned())
                                            on:input=move |ev| {
                                                let value = event_target_value(&ev);
                                                form.update(|f| f.set(field, value));
                                            }
                                        />
                                    </dd>
                                </div>
                            }
                        })
                        .collect_view()}
                </dl>
                <Show when=move || !error.get().is_empty()>
                    <p class="settings-form__error">{move || error.get()}</p>
                </Show>
                <div class="settings-form__actions">
                    <button class="btn" type="button" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </section>
    }
}
