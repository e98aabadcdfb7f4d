//! Command-line front end for the value types.
//!
//! # Responsibility
//! - Parse, render, encode and decode single values from the shell.
//! - Expose the type-specific operations and the CSV importer.
//! - Configure logging from flags or `UDT_LOG_*` environment variables.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use std::path::PathBuf;
use std::process::ExitCode;
use udt_core::{
    import_csv_file, init_logging, si_base_units, si_prefixes, supported_currencies, AnyValue,
    ColorValue, CsvImportOptions, Decimal, FieldValue, GeoCoordinate, LogTarget, MoneyValue,
    PhysicalQuantity, UdtKind, Vector3,
};

#[derive(Parser)]
#[command(name = "udt", version, about = "Inspect and operate on user-defined column values")]
struct Cli {
    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "UDT_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Absolute directory for rotated log files (stderr when unset).
    #[arg(long, global = true, env = "UDT_LOG_DIR", value_name = "DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse text and print the canonical form plus its encoded bytes
    Parse {
        kind: UdtKind,
        #[arg(allow_hyphen_values = true)]
        text: String,
    },

    /// Decode hex-encoded bytes and print the canonical form
    Decode { kind: UdtKind, hex: String },

    /// Import a CSV file, parsing mapped columns as value types
    Import {
        path: PathBuf,

        /// Column mapping, repeatable.
        #[arg(long = "udt", value_name = "COLUMN=TYPE", value_parser = parse_column_mapping)]
        udt_columns: Vec<(String, UdtKind)>,

        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the supported type names
    Kinds,

    #[command(subcommand)]
    Geo(GeoCommand),

    #[command(subcommand)]
    Color(ColorCommand),

    #[command(subcommand)]
    Money(MoneyCommand),

    #[command(subcommand)]
    Unit(UnitCommand),

    #[command(subcommand)]
    Vector(VectorCommand),
}

/// GeoLocation operations
#[derive(Subcommand)]
enum GeoCommand {
    /// Great-circle distance in kilometres
    Distance { from: String, to: String },
    /// Render with N/S and E/W suffixes
    Cardinal { point: String },
}

/// ColorRGB operations
#[derive(Subcommand)]
enum ColorCommand {
    Negate { color: String },
    /// Linear blend; ratio 0 keeps the first color, 1 the second
    Blend { first: String, second: String, ratio: f64 },
    Hex { color: String },
}

/// MoneyType operations
#[derive(Subcommand)]
enum MoneyCommand {
    Add {
        #[arg(allow_hyphen_values = true)]
        left: String,
        #[arg(allow_hyphen_values = true)]
        right: String,
    },
    Sub {
        #[arg(allow_hyphen_values = true)]
        left: String,
        #[arg(allow_hyphen_values = true)]
        right: String,
    },
    Scale {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[arg(allow_hyphen_values = true)]
        factor: Decimal,
    },
    Convert {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        target: String,
    },
    /// List supported currencies with their PLN rates
    Currencies,
}

/// UnitSI operations
#[derive(Subcommand)]
enum UnitCommand {
    Add {
        #[arg(allow_hyphen_values = true)]
        left: String,
        #[arg(allow_hyphen_values = true)]
        right: String,
    },
    Sub {
        #[arg(allow_hyphen_values = true)]
        left: String,
        #[arg(allow_hyphen_values = true)]
        right: String,
    },
    Mul {
        #[arg(allow_hyphen_values = true)]
        left: String,
        #[arg(allow_hyphen_values = true)]
        right: String,
    },
    Div {
        #[arg(allow_hyphen_values = true)]
        left: String,
        #[arg(allow_hyphen_values = true)]
        right: String,
    },
    Scale {
        #[arg(allow_hyphen_values = true)]
        quantity: String,
        #[arg(allow_hyphen_values = true)]
        factor: f64,
    },
    DivScalar {
        #[arg(allow_hyphen_values = true)]
        quantity: String,
        #[arg(allow_hyphen_values = true)]
        divisor: f64,
    },
    /// Render under a decimal prefix; omit it to show kilograms as grams
    Prefix {
        #[arg(allow_hyphen_values = true)]
        quantity: String,
        prefix: Option<String>,
    },
    /// List base units and prefixes
    Units,
}

/// Vector3D operations
#[derive(Subcommand)]
enum VectorCommand {
    Add { left: String, right: String },
    Sub { left: String, right: String },
    Scale {
        vector: String,
        #[arg(allow_hyphen_values = true)]
        factor: f32,
    },
    Dot { left: String, right: String },
    Cross { left: String, right: String },
}

fn parse_column_mapping(raw: &str) -> Result<(String, UdtKind), String> {
    let (column, kind) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=TYPE, got `{raw}`"))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("column name is empty in `{raw}`"));
    }
    let kind = kind.parse::<UdtKind>().map_err(|err| err.to_string())?;
    Ok((column.to_string(), kind))
}

fn parse_hex(raw: &str) -> Result<Vec<u8>> {
    let compact: String = raw.split_whitespace().collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    hex::decode(digits).with_context(|| format!("`{raw}` is not valid hex"))
}

fn optional(value: Option<impl ToString>) -> String {
    value.map_or_else(|| udt_core::NULL_TEXT.to_string(), |v| v.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let target = match cli.log_dir.as_deref() {
        Some(dir) => LogTarget::directory(dir).map_err(anyhow::Error::msg)?,
        None => LogTarget::Stderr,
    };
    init_logging(&cli.log_level, target).map_err(anyhow::Error::msg)?;
    debug!("event=cli_start module=cli status=ok");

    match cli.command {
        Command::Parse { kind, text } => {
            let value = AnyValue::parse(kind, &text)?;
            println!("{value}");
            println!("{}", hex::encode(value.encode()));
        }
        Command::Decode { kind, hex } => {
            let bytes = parse_hex(&hex)?;
            println!("{}", AnyValue::decode(kind, &bytes)?);
        }
        Command::Import {
            path,
            udt_columns,
            json,
        } => run_import(path, udt_columns, json)?,
        Command::Kinds => {
            for kind in UdtKind::ALL {
                println!("{kind}");
            }
        }
        Command::Geo(command) => run_geo(command)?,
        Command::Color(command) => run_color(command)?,
        Command::Money(command) => run_money(command)?,
        Command::Unit(command) => run_unit(command)?,
        Command::Vector(command) => run_vector(command)?,
    }
    Ok(())
}

fn run_import(path: PathBuf, udt_columns: Vec<(String, UdtKind)>, json: bool) -> Result<()> {
    let options = udt_columns
        .into_iter()
        .fold(CsvImportOptions::new(), |options, (column, kind)| {
            options.with_udt_column(column, kind)
        });
    let report = import_csv_file(&path, &options)
        .with_context(|| format!("failed to import `{}`", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!("{}", report.columns.join("\t"));
    for row in &report.rows {
        let fields: Vec<String> = row
            .fields
            .iter()
            .map(|field| match field {
                FieldValue::Text(text) => text.clone().unwrap_or_default(),
                FieldValue::Udt(value) => value.render(),
            })
            .collect();
        println!("{}", fields.join("\t"));
    }
    for rejected in &report.rejected {
        eprintln!("rejected {rejected}");
    }
    Ok(())
}

fn run_geo(command: GeoCommand) -> Result<()> {
    match command {
        GeoCommand::Distance { from, to } => {
            let from = GeoCoordinate::parse(&from)?;
            let to = GeoCoordinate::parse(&to)?;
            println!("{}", optional(from.distance_km(&to)));
        }
        GeoCommand::Cardinal { point } => {
            println!("{}", GeoCoordinate::parse(&point)?.to_cardinal_string());
        }
    }
    Ok(())
}

fn run_color(command: ColorCommand) -> Result<()> {
    let rendered = match command {
        ColorCommand::Negate { color } => ColorValue::parse(&color)?.negate().render(),
        ColorCommand::Blend {
            first,
            second,
            ratio,
        } => ColorValue::parse(&first)?
            .blend(&ColorValue::parse(&second)?, ratio)?
            .render(),
        ColorCommand::Hex { color } => ColorValue::parse(&color)?.to_hex(),
    };
    println!("{rendered}");
    Ok(())
}

fn run_money(command: MoneyCommand) -> Result<()> {
    let result = match command {
        MoneyCommand::Add { left, right } => {
            MoneyValue::parse(&left)?.add(&MoneyValue::parse(&right)?)?
        }
        MoneyCommand::Sub { left, right } => {
            MoneyValue::parse(&left)?.subtract(&MoneyValue::parse(&right)?)?
        }
        MoneyCommand::Scale { amount, factor } => {
            MoneyValue::parse(&amount)?.multiply_by_scalar(factor)?
        }
        MoneyCommand::Convert { amount, target } => {
            MoneyValue::parse(&amount)?.convert_to(&target)?
        }
        MoneyCommand::Currencies => {
            for code in supported_currencies() {
                println!("{code}\t{}", optional(udt_core::rate_to_pln(code)));
            }
            return Ok(());
        }
    };
    println!("{result}");
    Ok(())
}

fn run_unit(command: UnitCommand) -> Result<()> {
    let parse = PhysicalQuantity::parse;
    let result = match command {
        UnitCommand::Add { left, right } => parse(&left)?.add(&parse(&right)?)?,
        UnitCommand::Sub { left, right } => parse(&left)?.subtract(&parse(&right)?)?,
        UnitCommand::Mul { left, right } => parse(&left)?.multiply(&parse(&right)?)?,
        UnitCommand::Div { left, right } => parse(&left)?.divide(&parse(&right)?)?,
        UnitCommand::Scale { quantity, factor } => parse(&quantity)?.multiply_by_scalar(factor)?,
        UnitCommand::DivScalar { quantity, divisor } => {
            parse(&quantity)?.divide_by_scalar(divisor)?
        }
        UnitCommand::Prefix { quantity, prefix } => {
            let rendered = parse(&quantity)?.to_prefixed_string(prefix.as_deref())?;
            println!("{}", optional(rendered));
            return Ok(());
        }
        UnitCommand::Units => {
            println!("units\t{}", si_base_units().join(" "));
            let prefixes: Vec<String> = si_prefixes()
                .iter()
                .filter(|(symbol, _)| !symbol.is_empty())
                .map(|(symbol, factor)| format!("{symbol}={factor:e}"))
                .collect();
            println!("prefixes\t{}", prefixes.join(" "));
            return Ok(());
        }
    };
    println!("{result}");
    Ok(())
}

fn run_vector(command: VectorCommand) -> Result<()> {
    let parse = Vector3::parse;
    let result = match command {
        VectorCommand::Add { left, right } => parse(&left)?.add(&parse(&right)?)?,
        VectorCommand::Sub { left, right } => parse(&left)?.subtract(&parse(&right)?)?,
        VectorCommand::Scale { vector, factor } => parse(&vector)?.multiply_by_scalar(factor)?,
        VectorCommand::Cross { left, right } => {
            parse(&left)?.cross_product(&parse(&right)?)?
        }
        VectorCommand::Dot { left, right } => {
            println!("{}", optional(parse(&left)?.dot_product(&parse(&right)?)));
            return Ok(());
        }
    };
    println!("{result}");
    Ok(())
}
