//! td auth commands: login, register, logout, whoami.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::form::{self, Form};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::session::SessionStore;

/// Run a form rule set and turn the first failing field into an error.
fn check_form(mut form: Form) -> Result<()> {
    if !form.validate_form() {
        let errors = form.errors();
        let (field, message) = errors
            .iter()
            .next()
            .map(|(k, v)| (k.clone(), v.clone()))
            .unwrap_or_default();
        return Err(Error::Validation { field, message });
    }
    Ok(())
}

pub struct LoginOptions {
    pub email: String,
    pub password: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_login(opts: LoginOptions) -> Result<()> {
    check_form(form::login_form(&opts.email, &opts.password))?;

    let (config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let mut session = SessionStore::open(storage, config.login_delay());

    let user = session.login(&opts.email, &opts.password)?;

    let mut human = HumanOutput::new(format!("td login: signed in as {}", user.email));
    human.push_summary("name", user.name.clone());
    human.push_next_step("td whoami".to_string());

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "login",
        &user,
        Some(&human),
    )
}

pub struct RegisterOptions {
    pub name: String,
    pub email: String,
    pub password: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_register(opts: RegisterOptions) -> Result<()> {
    check_form(form::register_form(&opts.name, &opts.email, &opts.password))?;

    let (config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let mut session = SessionStore::open(storage, config.login_delay());

    let user = session.register(&opts.name, &opts.email, &opts.password)?;

    let mut human = HumanOutput::new(format!("td register: signed up as {}", user.email));
    human.push_summary("name", user.name.clone());
    human.push_next_step("td init --sample".to_string());

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "register",
        &user,
        Some(&human),
    )
}

pub struct LogoutOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct LogoutReport {
    logged_out: bool,
}

pub fn run_logout(opts: LogoutOptions) -> Result<()> {
    let (config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let mut session = SessionStore::open(storage, config.login_delay());

    // Logging out while anonymous is fine; the slots end up absent
    // either way.
    session.logout();

    let human = HumanOutput::new("td logout: session cleared");

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "logout",
        &LogoutReport { logged_out: true },
        Some(&human),
    )
}

pub struct WhoamiOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_whoami(opts: WhoamiOptions) -> Result<()> {
    let (config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let session = SessionStore::open(storage, config.login_delay());

    let user = session
        .user()
        .cloned()
        .ok_or_else(|| Error::Auth("not logged in".to_string()))?;

    let mut human = HumanOutput::new(format!("td whoami: {}", user.email));
    human.push_summary("name", user.name.clone());
    if let Some(avatar) = &user.avatar {
        human.push_summary("avatar", avatar.clone());
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "whoami",
        &user,
        Some(&human),
    )
}
