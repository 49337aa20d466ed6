//! PostToolUse hook: A playful code review from a local LM Studio model.
//!
//! Same pipeline as code-suggestions, but only for mainstream language
//! files, always against LM Studio, and with a flirtier reviewer.

use anyhow::Result;
use hook_advisor::config::env_lookup;
use hook_advisor::{
    BackendKind, Classifier, ConfigError, Dispatcher, FileFilter, HookConfig, Persona,
    advisor_from_config,
};
use hook_common::prelude::*;
use std::time::Duration;

const HOOK_NAME: &str = "playful-review";
const MODEL_ENV: &str = "PLAYFUL_REVIEW_MODEL";
const DEFAULT_MODEL: &str = "swallowmaid-8b-l3-sppo-abliterated@q8_0";
const TIMEOUT: Duration = Duration::from_secs(30);

fn main() -> Result<()> {
    init_tracing();

    let config = resolve_config(env_lookup)?;
    let persona = Persona::playful();
    let header = persona.header();
    let dispatcher = Dispatcher::new(HOOK_NAME, Box::new(advisor_from_config(&config, persona)))
        .with_classifier(Classifier::new(FileFilter::core_languages()))
        .with_header(header)
        .with_debug_sink(DebugSink::from_env());

    let raw = read_stdin()?;
    match dispatcher.dispatch_raw(&raw)?.output() {
        Some(output) => output.write_stdout()?,
        None => HookOutput::silent(),
    }

    Ok(())
}

fn resolve_config<F>(lookup: F) -> Result<HookConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let model = lookup(MODEL_ENV)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    Ok(HookConfig::for_backend(BackendKind::LmStudio, lookup)?
        .with_model(model)
        .with_timeout(TIMEOUT))
}
