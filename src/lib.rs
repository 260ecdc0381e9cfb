//! # Onboarding (Sign-in & Setup Wizard)
//!
//! `onboarding` hosts the first-run experience of the application: a login/signup
//! form backed by an external identity provider, and a three-step setup wizard whose
//! result is written to the user's document in the profile store.
//!
//! ## Wizard
//!
//! The wizard state lives on the server, one instance per authenticated session.
//! A thin UI sends events (field edits, "add admin", "next", "back") and renders the
//! returned view.
//!
//! - **Step 1 (identity):** first and last name, each at least 2 characters once trimmed.
//! - **Step 2 (goals):** up to three optional goals, no gate.
//! - **Step 3 (admins):** at least one admin email before finishing.
//!
//! Finishing writes `{ firstName, lastName, admins, goals, completedOnboarding: true }`
//! as the user's profile. Failed writes are reported back to the user instead of
//! leaving the wizard stuck in a loading state.
//!
//! ## Collaborators
//!
//! Credential verification and document storage are delegated behind the
//! [`auth::Authenticator`] and [`profile::ProfileStore`] traits. Every call receives an
//! explicit [`session::SessionContext`]; nothing reads an ambient "current user".

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod onboarding;
pub mod profile;
pub mod session;
pub mod validator;
pub mod wizard;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
