//! openai-connector CLI：模型发现、连通性测试与单次执行的命令行工具
//!
//! Usage:
//!   openai-connector models <TRIGGER_KIND>      List compatible models
//!   openai-connector test                       Test the credential
//!   openai-connector execute <action.json>      Execute one action
//!   openai-connector validate                   Static credential checks

use anyhow::{bail, Context};
use openai_connector::{
    validate_credential, ActionRequest, Connector, ConnectorConfig, Credential, TriggerRequest,
};
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const API_KEY_VAR: &str = "OPENAI_API_KEY";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let ok = match args[1].as_str() {
        "models" => cmd_models(&args[2..]).await?,
        "test" => cmd_test(&args[2..]).await?,
        "execute" => cmd_execute(&args[2..]).await?,
        "validate" => cmd_validate(),
        "version" | "--version" | "-V" => {
            println!("openai-connector {}", env!("CARGO_PKG_VERSION"));
            true
        }
        "help" | "--help" | "-h" => {
            print_usage();
            true
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            false
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn print_usage() {
    println!(
        r#"openai-connector: OpenAI 连接器命令行工具

USAGE:
    openai-connector <COMMAND> [OPTIONS]

COMMANDS:
    models <TRIGGER_KIND>       List compatible models (CHAT_MODELS, EMBEDDING_MODELS, ...)
    test                        Check the credential against the API
    execute <action.json>       Execute one action ({{"command": "CHAT", "config": {{...}}}})
    validate                    Run static credential checks
    version                     Show version information
    help                        Show this help message

OPTIONS:
    --base-url <url>            Override the API base URL
    --config <file.yaml>        Load connector configuration from YAML

ENVIRONMENT:
    OPENAI_API_KEY              Bearer token
    OPENAI_BASE_URL             API base URL
    AI_HTTP_TIMEOUT_SECS        Request timeout
    AI_PROXY_URL                HTTP(S) proxy
    RUST_LOG                    Log filter (logs go to stderr)"#
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// Positional arguments with `--flag value` pairs removed.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

fn build_connector(args: &[String]) -> anyhow::Result<Connector> {
    let config = match flag_value(args, "--config") {
        Some(path) => ConnectorConfig::from_yaml_file(path)
            .with_context(|| format!("loading config from {path}"))?,
        None => ConnectorConfig::from_env(),
    };
    let mut builder = Connector::builder().config(config);
    if let Some(base_url) = flag_value(args, "--base-url") {
        builder = builder.base_url_override(base_url);
    }
    Ok(builder.build()?)
}

fn credential() -> anyhow::Result<Credential> {
    let credential = Credential::from_env(API_KEY_VAR);
    let problems = validate_credential(credential.as_ref());
    if let Some(problem) = problems.into_iter().next() {
        bail!("{API_KEY_VAR}: {problem}");
    }
    credential.with_context(|| format!("{API_KEY_VAR} is not set"))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn cmd_models(args: &[String]) -> anyhow::Result<bool> {
    let Some(kind) = positionals(args).first().copied() else {
        bail!("usage: openai-connector models <TRIGGER_KIND>");
    };
    let connector = build_connector(args)?;
    let credential = credential()?;

    match connector.trigger(&credential, &TriggerRequest::new(kind)).await {
        Ok(models) => {
            print_json(&models)?;
            Ok(true)
        }
        Err(err) => {
            print_json(&json!({ "error": err }))?;
            Ok(false)
        }
    }
}

async fn cmd_test(args: &[String]) -> anyhow::Result<bool> {
    let connector = build_connector(args)?;
    let credential = credential()?;

    match connector.test_connection(&credential).await {
        Ok(()) => {
            print_json(&json!({ "ok": true }))?;
            Ok(true)
        }
        Err(err) => {
            print_json(&json!({ "ok": false, "error": err }))?;
            Ok(false)
        }
    }
}

async fn cmd_execute(args: &[String]) -> anyhow::Result<bool> {
    let Some(path) = positionals(args).first().copied() else {
        bail!("usage: openai-connector execute <action.json>");
    };
    let request = read_action(Path::new(path))?;
    let connector = build_connector(args)?;
    let credential = credential()?;

    let result = connector.execute(&credential, &request).await;
    print_json(&result)?;
    Ok(result.is_execution_success)
}

fn read_action(path: &Path) -> anyhow::Result<ActionRequest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn cmd_validate() -> bool {
    let credential = Credential::from_env(API_KEY_VAR);
    let problems = validate_credential(credential.as_ref());
    let ok = problems.is_empty();
    if let Err(e) = print_json(&json!({ "valid": ok, "errors": problems })) {
        eprintln!("{e}");
        return false;
    }
    ok
}
