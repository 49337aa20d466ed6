//! PostToolUse hook: Relay language-model code suggestions after file writes.
//!
//! Triggered after Write, Edit or MultiEdit touch a code file. Sends the
//! file's content to the configured backend (OpenRouter, LM Studio or Ollama)
//! and passes the reply back as a non-blocking system message.

use anyhow::Result;
use clap::Parser;
use hook_advisor::config::env_lookup;
use hook_advisor::{BackendKind, Dispatcher, HookConfig, Persona, advisor_from_config};
use hook_common::prelude::*;

const HOOK_NAME: &str = "code-suggestions";

#[derive(Debug, Parser)]
#[command(name = HOOK_NAME, version, about = "Code suggestions from a language model after file writes")]
struct Args {
    /// Backend to use (openrouter, lm_studio, ollama). Overrides CODE_HOOK_SERVICE.
    #[arg(long)]
    service: Option<BackendKind>,

    /// Print the resolved backend settings and exit without reading stdin
    #[arg(long)]
    check_config: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = resolve_config(&args)?;

    if args.check_config {
        println!(
            "service={} endpoint={} model={} timeout={}s credential={}",
            config.backend,
            config.endpoint,
            config.model,
            config.timeout.as_secs(),
            if config.api_key.is_some() { "set" } else { "none" }
        );
        return Ok(());
    }

    let persona = Persona::for_backend(config.backend);
    let header = persona.header();
    let dispatcher = Dispatcher::new(HOOK_NAME, Box::new(advisor_from_config(&config, persona)))
        .with_header(header)
        .with_debug_sink(DebugSink::from_env());

    let raw = read_stdin()?;
    match dispatcher.dispatch_raw(&raw)?.output() {
        Some(output) => output.write_stdout()?,
        None => HookOutput::silent(),
    }

    Ok(())
}

fn resolve_config(args: &Args) -> Result<HookConfig> {
    let config = match args.service {
        Some(backend) => HookConfig::for_backend(backend, env_lookup)?,
        None => HookConfig::from_env()?,
    };
    Ok(config)
}
