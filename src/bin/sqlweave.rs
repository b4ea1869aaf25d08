//! sqlweave: the command-line front end.
//!
//! # Usage
//!
//! ```bash
//! # Compile an expression tree stored as JSON
//! sqlweave compile query.json --dialect postgres
//!
//! # Substitute a template
//! sqlweave template "select * from t where id = {id}" -p id=42
//!
//! # Schema lookups for a dialect
//! sqlweave schema mysql columns users
//! ```

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use sqlweave::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqlweave")]
#[command(version)]
#[command(about = "Compile SQL statement trees into parameterized SQL", long_about = None)]
#[command(after_help = "EXAMPLES:
    sqlweave compile query.json --dialect postgres --compact
    sqlweave template 'select * from t where c > {p}' -p p=1
    sqlweave type postgres timestamptz")]
struct Cli {
    /// Configuration file (defaults to ./sqlweave.toml, then the user config dir)
    #[arg(long, global = true, env = "SQLWEAVE_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON expression tree
    Compile {
        /// JSON file, or `-` for stdin
        input: String,

        /// Dialect key (overrides the config file)
        #[arg(short, long)]
        dialect: Option<String>,

        /// Render on a single line
        #[arg(long)]
        compact: bool,

        /// Print the compiled query as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compile a `{name}` template
    Template {
        /// Templated SQL
        sql: String,

        /// Parameter as name=value, value parsed as JSON when possible
        #[arg(short, long = "param")]
        params: Vec<String>,

        #[arg(short, long)]
        dialect: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// List the built-in dialects
    Dialects,
    /// Map a native type name to its canonical type
    Type {
        dialect: String,
        native: String,
    },
    /// Show a dialect's schema lookup query
    Schema {
        dialect: String,
        #[arg(value_enum)]
        kind: SchemaKind,
        name: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaKind {
    Table,
    Columns,
    Function,
    Parameters,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "sqlweave=debug" } else { "sqlweave=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Compile {
            input,
            dialect,
            compact,
            json,
        } => {
            let layout = if compact { Layout::Compact } else { config.layout };
            let key = dialect.unwrap_or(config.dialect);
            let expr = read_expression(&input)?;
            let registry = RegistryBuilder::with_builtins(layout).build();
            let compiled = registry.compile(&key, &expr)?;
            print_compiled(&compiled, json)
        }
        Commands::Template {
            sql,
            params,
            dialect,
            json,
        } => {
            let key = dialect.unwrap_or(config.dialect);
            let mut text = Text::new(sql);
            for param in &params {
                let (name, value) = parse_param(param)?;
                text = text.param(name, value);
            }
            let compiled = Registry::builtin().compile(&key, &text.into())?;
            print_compiled(&compiled, json)
        }
        Commands::Dialects => {
            println!("{}", "Dialects:".cyan().bold());
            for key in Registry::builtin().keys() {
                let dialect = Registry::builtin().dialect(key)?;
                let marker = if key == config.dialect { "*" } else { " " };
                println!(
                    "{} {:<10} placeholder {:<4} limit {:?}",
                    marker.green(),
                    key.yellow(),
                    dialect.placeholder(),
                    dialect.limit_style()
                );
            }
            Ok(())
        }
        Commands::Type { dialect, native } => {
            let dialect = Registry::builtin().dialect(&dialect)?;
            println!("{} → {:?}", native.yellow(), dialect.native_type(&native));
            Ok(())
        }
        Commands::Schema {
            dialect,
            kind,
            name,
        } => {
            let dialect = Registry::builtin().dialect(&dialect)?;
            let query = match kind {
                SchemaKind::Table => dialect.table_query(&name),
                SchemaKind::Columns => dialect.columns_query(&name),
                SchemaKind::Function => dialect.function_query(&name),
                SchemaKind::Parameters => dialect.parameters_query(&name),
            };
            match query {
                Some(query) => print_compiled(&query, false),
                None => bail!("dialect '{}' has no schema queries", dialect.name()),
            }
        }
    }
}

fn read_expression(input: &str) -> Result<Expression> {
    let content = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
    };
    serde_json::from_str(&content).context("Input is not a valid expression tree")
}

/// `name=value`; values that are not JSON are taken as strings.
fn parse_param(param: &str) -> Result<(String, Value)> {
    let Some((name, raw)) = param.split_once('=') else {
        bail!("parameter '{}' is not name=value", param);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("parameter '{}' has no name", param);
    }
    let value = serde_json::from_str::<serde_json::Value>(raw)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(raw));
    Ok((name.to_string(), value))
}

fn print_compiled(compiled: &CompiledQuery, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(compiled)?);
        return Ok(());
    }

    println!("{}", "SQL:".green().bold());
    println!("{}", compiled.sql.white());

    if !compiled.args.is_empty() {
        println!();
        println!("{}", "Arguments:".cyan());
        for (i, arg) in compiled.args.iter().enumerate() {
            println!("  {} = {}", (i + 1).to_string().dimmed(), arg.to_string().yellow());
        }
    }
    Ok(())
}
