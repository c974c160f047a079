mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use jsse_context::capability::{CAPABILITY_TABLE, Policy, TABLE_VERSION};
use jsse_context::{
    Bindings, ContextConfig, JsValue, RootKind, RootSelection, allow, create_context_with,
    current_host, is_identifier, is_reserved_word,
};
use num_bigint::BigInt;
use std::process::ExitCode;

use telemetry::TelemetryError;

#[derive(Parser)]
#[command(
    name = "jsse-context",
    version,
    about = "Inspect the restricted contexts handed to script evaluators"
)]
struct Cli {
    /// Log filter directives (tracing EnvFilter syntax)
    #[arg(long, env = "JSSE_CONTEXT_LOG", default_value = "warn", global = true)]
    log_filter: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the capability table
    Policy {
        /// Only show entries for this root
        #[arg(long, value_enum)]
        root: Option<RootArg>,
    },
    /// Build a context and list its bindings
    Context {
        /// Ambient roots to scan
        #[arg(long, value_enum, default_value = "all")]
        root: RootsArg,

        /// Extra binding merged after construction
        #[arg(long = "allow", value_name = "NAME=VALUE", value_parser = parse_binding)]
        allow: Vec<(String, String)>,
    },
    /// Check names against the identifier filter
    Check {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RootArg {
    Server,
    Browser,
}

impl From<RootArg> for RootKind {
    fn from(arg: RootArg) -> Self {
        match arg {
            RootArg::Server => RootKind::Server,
            RootArg::Browser => RootKind::Browser,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RootsArg {
    All,
    Server,
    Browser,
    #[value(name = "none")]
    Neither,
}

impl From<RootsArg> for RootSelection {
    fn from(arg: RootsArg) -> Self {
        match arg {
            RootsArg::All => RootSelection::ALL,
            RootsArg::Server => RootSelection::only(RootKind::Server),
            RootsArg::Browser => RootSelection::only(RootKind::Browser),
            RootsArg::Neither => RootSelection::NONE,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("{0} name(s) rejected by the identifier filter")]
    RejectedNames(usize),
}

fn parse_binding(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

fn literal_value(text: &str) -> JsValue {
    match text {
        "true" => JsValue::Boolean(true),
        "false" => JsValue::Boolean(false),
        "null" => JsValue::Null,
        "undefined" => JsValue::Undefined,
        _ => {
            if let Some(digits) = text.strip_suffix('n')
                && let Ok(value) = digits.parse::<BigInt>()
            {
                return JsValue::from(value);
            }
            match text.parse::<f64>() {
                Ok(n) => JsValue::Number(n),
                Err(_) => JsValue::from(text),
            }
        }
    }
}

fn describe(value: &JsValue) -> String {
    match value {
        JsValue::Undefined => "denied".to_string(),
        JsValue::Object(o) if o.is_constructor() => "constructor (protected)".to_string(),
        JsValue::Object(o) if o.is_callable() => "function".to_string(),
        JsValue::Object(o) => format!("object [{}]", o.class_name()),
        JsValue::String(s) => format!("string {:?}", s.to_rust_string()),
        other => format!("{} {other}", other.type_of()),
    }
}

fn print_policy(root: Option<RootKind>) {
    println!("# capability table v{TABLE_VERSION}");
    for cap in CAPABILITY_TABLE
        .iter()
        .filter(|cap| root.is_none_or(|r| r == cap.root))
    {
        let detail = match cap.policy {
            Policy::Timer(op) => format!("timer ({op})"),
            Policy::Protected(ty) => format!("protected ({ty})"),
            other => other.label().to_string(),
        };
        println!("{:<8} {:<24} {detail}", cap.root, cap.name);
    }
}

fn print_context(roots: RootSelection, extra: &[(String, String)]) {
    let config = ContextConfig::new().with_roots(roots);
    let mut context = create_context_with(&current_host(), &config);
    let source: Bindings = extra
        .iter()
        .map(|(name, raw)| (name.clone(), literal_value(raw)))
        .collect();
    allow(Some(&source), &mut context);

    for (name, value) in context.iter() {
        println!("{name:<24} {}", describe(value));
    }
    println!("# {} bindings", context.len());
}

fn check_names(names: &[String]) -> Result<(), CliError> {
    let mut rejected = 0;
    for name in names {
        let verdict = if is_identifier(name) {
            "ok"
        } else if is_reserved_word(name) {
            rejected += 1;
            "rejected (reserved word)"
        } else {
            rejected += 1;
            "rejected (not an identifier)"
        };
        println!("{name}\t{verdict}");
    }
    if rejected == 0 {
        Ok(())
    } else {
        Err(CliError::RejectedNames(rejected))
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    telemetry::init(&cli.log_filter)?;
    match cli.command {
        Command::Policy { root } => print_policy(root.map(RootKind::from)),
        Command::Context { root, allow } => print_context(root.into(), &allow),
        Command::Check { names } => check_names(&names)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
