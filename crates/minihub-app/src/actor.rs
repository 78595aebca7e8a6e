//! Helper utilities for resolving the acting [`Actor`] from environment
//! variables or the project configuration.

use std::env;

use anyhow::{Context, Result};
use minihub_core::Actor;

use crate::config::ActorConfig;

/// Environment variable checked first for actor names.
pub const ENV_ACTOR_NAME: &str = "MINIHUB_ACTOR_NAME";
/// Environment variable checked first for actor emails.
pub const ENV_ACTOR_EMAIL: &str = "MINIHUB_ACTOR_EMAIL";
/// Fallback default display name when no data can be resolved.
pub const DEFAULT_ACTOR_NAME: &str = "minihub";
/// Fallback default email when no data can be resolved.
pub const DEFAULT_ACTOR_EMAIL: &str = "minihub@example.invalid";

const FALLBACK_AUTHOR_NAME_ENV: &str = "GIT_AUTHOR_NAME";
const FALLBACK_AUTHOR_EMAIL_ENV: &str = "GIT_AUTHOR_EMAIL";
const USER_NAME_ENV: &str = "USER";

/// Resolve an actor using the standard fallback order (env → config → defaults).
#[must_use]
pub fn default_actor(config: &ActorConfig) -> Actor {
    let mut fetch = |key: &'static str| env::var(key).ok();
    default_actor_with_env(config, &mut fetch)
}

fn default_actor_with_env(
    config: &ActorConfig,
    fetch: &mut impl FnMut(&'static str) -> Option<String>,
) -> Actor {
    actor_from_env_with(fetch)
        .ok()
        .or_else(|| actor_from_config(config))
        .unwrap_or_else(|| Actor::new(DEFAULT_ACTOR_NAME, DEFAULT_ACTOR_EMAIL))
}

fn actor_from_config(config: &ActorConfig) -> Option<Actor> {
    let name = config.name.as_deref().filter(|v| !v.trim().is_empty())?;
    let email = config.email.as_deref().unwrap_or(DEFAULT_ACTOR_EMAIL);
    Some(Actor::new(name, email))
}

/// Build an actor from optional CLI parameters with sane fallbacks.
///
/// Whenever one of the fields is missing, the default actor is used and then
/// selectively overridden with the provided value(s).
#[must_use]
pub fn actor_from_params_or_default(
    name: Option<&str>,
    email: Option<&str>,
    config: &ActorConfig,
) -> Actor {
    let mut actor = default_actor(config);
    if let Some(value) = name {
        value.clone_into(&mut actor.name);
    }
    if let Some(value) = email {
        value.clone_into(&mut actor.email);
    }
    actor
}

fn env_value_with(
    candidates: &[&'static str],
    fetch: &mut impl FnMut(&'static str) -> Option<String>,
) -> Option<String> {
    candidates.iter().find_map(|key| {
        fetch(key).and_then(|value| {
            if value.trim().is_empty() {
                None
            } else {
                Some(value)
            }
        })
    })
}

fn actor_from_env_with(fetch: &mut impl FnMut(&'static str) -> Option<String>) -> Result<Actor> {
    let name = env_value_with(&[ENV_ACTOR_NAME, FALLBACK_AUTHOR_NAME_ENV, USER_NAME_ENV], fetch)
        .context("environment does not include actor name")?;
    let email = env_value_with(&[ENV_ACTOR_EMAIL, FALLBACK_AUTHOR_EMAIL_ENV], fetch)
        .context("environment does not include actor email")?;
    Ok(Actor { name, email })
}
