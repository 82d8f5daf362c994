//! Audit CLI - Command-line interface for Call Audit
//!
//! Commands:
//! - analyze: Audit signal bundles from a file (batch mode)
//! - run: Audit NDJSON bundles from stdin (streaming mode)
//! - validate: Validate signal bundle schema
//! - doctor: Diagnose configuration and environment
//! - schema: Print input and output schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use call_audit::config::AuditConfig;
use call_audit::pipeline::AuditProcessor;
use call_audit::schema::{RawCallBundle, SCHEMA_VERSION};
use call_audit::types::CallAuditRecord;
use call_audit::{AUDIT_VERSION, PRODUCER_NAME};

/// Audit - Deterministic compliance audits for recorded calls
#[derive(Parser)]
#[command(name = "audit")]
#[command(version = AUDIT_VERSION)]
#[command(about = "Score call risk, outcome and agent performance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit signal bundles from a file (batch mode)
    Analyze {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,

        /// Audit configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Audit NDJSON bundles from stdin (streaming mode)
    Run {
        /// Audit configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Stop at the first bundle that fails
        #[arg(long)]
        fail_fast: bool,

        /// Flush output after each record
        #[arg(long, default_value = "true")]
        flush: bool,
    },

    /// Validate signal bundle schema
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose configuration and environment
    Doctor {
        /// Check this configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,

        /// Output as JSON schema
        #[arg(long)]
        json_schema: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one bundle per line)
    Ndjson,
    /// A single bundle or a JSON array of bundles
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one audit record per line)
    Ndjson,
    /// JSON array of audit records
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (call.signal_bundle.v1)
    Input,
    /// Output schema (call audit record)
    Output,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), AuditCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            output,
            input_format,
            output_format,
            config,
        } => cmd_analyze(
            &input,
            &output,
            input_format,
            output_format,
            config.as_deref(),
        ),

        Commands::Run {
            config,
            fail_fast,
            flush,
        } => cmd_run(config.as_deref(), fail_fast, flush),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Doctor { config, json } => cmd_doctor(config.as_deref(), json),

        Commands::Schema {
            schema_type,
            json_schema,
        } => cmd_schema(schema_type, json_schema),
    }
}

fn cmd_analyze(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    config: Option<&Path>,
) -> Result<(), AuditCliError> {
    let processor = AuditProcessor::new(load_config(config)?)?;

    let input_data = read_input(input)?;
    let bundles = parse_bundles(&input_data, &input_format)?;
    if bundles.is_empty() {
        return Err(AuditCliError::NoBundles);
    }

    let mut records: Vec<CallAuditRecord> = Vec::with_capacity(bundles.len());
    for bundle in &bundles {
        records.push(processor.assess(bundle)?);
    }
    info!(records = records.len(), "audited signal bundles");

    let output_data = format_output(&records, &output_format)?;
    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_run(config: Option<&Path>, fail_fast: bool, flush: bool) -> Result<(), AuditCliError> {
    let processor = AuditProcessor::new(load_config(config)?)?;

    if atty::is(atty::Stream::Stdin) {
        warn!("reading signal bundles from a terminal, one JSON document per line");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut failed = 0usize;

    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match processor.process_record(trimmed) {
            Ok(record) => {
                writeln!(stdout, "{}", serde_json::to_string(&record)?)?;
                if flush {
                    stdout.flush()?;
                }
            }
            Err(e) if fail_fast => return Err(e.into()),
            Err(e) => {
                failed += 1;
                let report = LineError {
                    line: index + 1,
                    error: CliError::from(AuditCliError::Audit(e)),
                };
                eprintln!("{}", serde_json::to_string(&report)?);
            }
        }
    }

    stdout.flush()?;
    debug!(failed, "stream finished");

    if failed > 0 {
        Err(AuditCliError::BundlesFailed(failed))
    } else {
        Ok(())
    }
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), AuditCliError> {
    let input_data = read_input(input)?;
    let documents = split_documents(&input_data, &input_format)?;

    let mut errors: Vec<ValidationErrorDetail> = Vec::new();
    for (index, document) in documents.iter().enumerate() {
        let result = serde_json::from_value::<RawCallBundle>(document.clone())
            .map_err(|e| e.to_string())
            .and_then(|bundle| {
                bundle.validate().map_err(|e| e.to_string())?;
                Ok(bundle)
            });
        if let Err(error) = result {
            errors.push(ValidationErrorDetail {
                index,
                call_id: document
                    .get("call_id")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
                error,
            });
        }
    }

    let report = ValidationReport {
        total_bundles: documents.len(),
        valid_bundles: documents.len() - errors.len(),
        invalid_bundles: errors.len(),
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total bundles:   {}", report.total_bundles);
        println!("Valid bundles:   {}", report.valid_bundles);
        println!("Invalid bundles: {}", report.invalid_bundles);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!(
                    "  - Call {} (index {}): {}",
                    err.call_id.as_deref().unwrap_or("unknown"),
                    err.index,
                    err.error
                );
            }
        }
    }

    if report.invalid_bundles > 0 {
        Err(AuditCliError::ValidationFailed(report.invalid_bundles))
    } else {
        Ok(())
    }
}

fn cmd_doctor(config: Option<&Path>, json: bool) -> Result<(), AuditCliError> {
    let mut checks: Vec<DoctorCheck> = vec![
        DoctorCheck {
            name: "audit_version".to_string(),
            status: CheckStatus::Ok,
            message: format!("Call Audit version {}", AUDIT_VERSION),
        },
        DoctorCheck {
            name: "schema_version".to_string(),
            status: CheckStatus::Ok,
            message: format!("Input schema: {}", SCHEMA_VERSION),
        },
    ];

    let config_check = match config {
        None => DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Warning,
            message: "No config file given; using built-in defaults".to_string(),
        },
        Some(path) if !path.exists() => DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Error,
            message: format!("Config file {} does not exist", path.display()),
        },
        Some(path) => match load_config(Some(path)) {
            Ok(config) => DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Ok,
                message: format!(
                    "Config valid (critical threshold {:.1}, {} prohibited phrases, call hours {})",
                    config.critical_threshold,
                    config.prohibited_phrases.len(),
                    match &config.allowed_call_hours {
                        Some(hours) => format!("{}-{}", hours.start, hours.end),
                        None => "unchecked".to_string(),
                    }
                ),
            },
            Err(e) => DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Error,
                message: CliError::from(e).message,
            },
        },
    };
    checks.push(config_check);

    // stdin readiness for streaming mode
    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (streaming mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: AUDIT_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Audit Doctor Report");
        println!("===================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(AuditCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType, json_schema: bool) -> Result<(), AuditCliError> {
    match schema_type {
        SchemaType::Input => {
            if json_schema {
                println!("{}", get_input_json_schema());
            } else {
                println!("Input Schema: {}", SCHEMA_VERSION);
                println!();
                println!("Every field is optional; unknown values are recovered and flagged.");
                println!();
                println!("- violations: [{{ clause_id, severity, category, evidence, timestamp }}]");
                println!("  severity: critical | high | medium | low");
                println!("- threats: [{{ kind, text }}] or [\"free-text description\"]");
                println!("  kind: explicit | implied | intimidation");
                println!("- emotions: [{{ tone, intensity, acoustic_arousal }}]");
                println!("  tone: threatening | aggressive | distressed | angry | frustrated | neutral | calm | satisfied");
                println!("- utterances: [{{ speaker, text, timestamp }}]  speaker: agent | customer");
                println!("- agent_conduct: {{ politeness, empathy, professionalism }}");
                println!("- time_violation: bool, or call_started_at: RFC 3339 timestamp");
                println!("- prohibited_phrase_hits: [{{ phrase, timestamp }}]");
                println!("- final_status: free-form status hint");
                println!();
                println!("Timestamps are seconds from call start, or MM:SS / HH:MM:SS strings.");
            }
        }
        SchemaType::Output => {
            if json_schema {
                println!("{}", get_output_json_schema());
            } else {
                println!("Output Schema: call audit record");
                println!();
                println!("- audit_version, producer: {{ name, version }}");
                println!("- audit_id: UUID v5 derived from the call id or signal content");
                println!("- risk_assessment: {{ total_score, risk_level, risk_category, breakdown,");
                println!("    escalation_action, justification, requires_immediate_action, auto_escalate, overrides }}");
                println!("- outcome_classification: {{ primary_outcome, outcome_category, confidence_score,");
                println!("    matched_rule, outcome_reasoning, secondary_outcomes, next_action, urgency_level,");
                println!("    requires_follow_up, customer_satisfaction_indicator }}");
                println!("- performance_assessment: {{ overall_quality_score, performance_level, component_scores,");
                println!("    qualitative_ratings, strengths, weaknesses, training_priority,");
                println!("    training_recommendations, specific_feedback, coaching/disciplinary/commendation flags,");
                println!("    benchmark: {{ vs_team_average, vs_company_benchmark, percentile_vs_team,");
                println!("    meets_company_standard, performance_tier }} }}");
                println!("- quality: {{ anomalies, signal_counts, degraded }}");
            }
        }
    }

    Ok(())
}

// Helper functions

fn load_config(path: Option<&Path>) -> Result<AuditConfig, AuditCliError> {
    match path {
        None => Ok(AuditConfig::default()),
        Some(path) => {
            let json = fs::read_to_string(path)?;
            Ok(AuditConfig::from_json(&json)?)
        }
    }
}

fn read_input(input: &Path) -> Result<String, AuditCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

/// Split input into one JSON document per bundle
fn split_documents(
    input: &str,
    format: &InputFormat,
) -> Result<Vec<serde_json::Value>, AuditCliError> {
    match format {
        InputFormat::Ndjson => input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str(line).map_err(AuditCliError::from))
            .collect(),
        InputFormat::Json => match serde_json::from_str::<serde_json::Value>(input)? {
            serde_json::Value::Array(items) => Ok(items),
            single => Ok(vec![single]),
        },
    }
}

fn parse_bundles(input: &str, format: &InputFormat) -> Result<Vec<RawCallBundle>, AuditCliError> {
    split_documents(input, format)?
        .into_iter()
        .map(|document| {
            serde_json::from_value(document)
                .map_err(|e| AuditCliError::ParseError(format!("Failed to parse bundle: {}", e)))
        })
        .collect()
}

fn format_output(
    records: &[CallAuditRecord],
    format: &OutputFormat,
) -> Result<String, AuditCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for record in records {
                lines.push(serde_json::to_string(record)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(records)?),
        OutputFormat::JsonPretty if records.len() == 1 => {
            Ok(serde_json::to_string_pretty(&records[0])? + "\n")
        }
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(records)? + "\n"),
    }
}

fn get_input_json_schema() -> String {
    let timestamp = serde_json::json!({
        "oneOf": [
            { "type": "number", "minimum": 0 },
            { "type": "string", "description": "seconds, MM:SS or HH:MM:SS" }
        ]
    });
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": SCHEMA_VERSION,
        "description": "Finalized upstream signals for one recorded call",
        "type": "object",
        "properties": {
            "schema_version": { "type": "string", "const": SCHEMA_VERSION },
            "call_id": { "type": "string" },
            "violations": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "clause_id": { "type": "string" },
                        "severity": { "type": "string", "enum": ["critical", "high", "medium", "low"] },
                        "category": { "type": "string" },
                        "evidence": { "type": "string" },
                        "timestamp": timestamp
                    }
                }
            },
            "threats": {
                "type": "array",
                "items": {
                    "oneOf": [
                        {
                            "type": "object",
                            "required": ["kind"],
                            "properties": {
                                "kind": { "type": "string", "enum": ["explicit", "implied", "intimidation"] },
                                "text": { "type": "string" }
                            }
                        },
                        { "type": "string" }
                    ]
                }
            },
            "emotions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "tone": { "type": "string" },
                        "intensity": { "type": "number", "minimum": 0, "maximum": 1 },
                        "acoustic_arousal": { "type": "string", "enum": ["low", "medium", "high"] }
                    }
                }
            },
            "utterances": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "speaker": { "type": "string", "enum": ["agent", "customer"] },
                        "text": { "type": "string", "description": "also accepted as \"message\"" },
                        "timestamp": timestamp
                    }
                }
            },
            "agent_conduct": {
                "type": "object",
                "properties": {
                    "politeness": { "type": "string" },
                    "empathy": { "type": "string" },
                    "professionalism": { "type": "string" }
                }
            },
            "time_violation": { "type": "boolean" },
            "call_started_at": { "type": "string", "format": "date-time" },
            "prohibited_phrase_hits": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["phrase"],
                    "properties": {
                        "phrase": { "type": "string" },
                        "timestamp": timestamp
                    }
                }
            },
            "final_status": { "type": "string" }
        }
    })
    .to_string()
}

fn get_output_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "call audit record",
        "type": "object",
        "required": [
            "audit_version", "producer", "audit_id", "risk_assessment",
            "outcome_classification", "performance_assessment", "quality"
        ],
        "properties": {
            "audit_version": { "type": "string" },
            "producer": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "version": { "type": "string" }
                }
            },
            "audit_id": { "type": "string", "format": "uuid" },
            "call_id": { "type": ["string", "null"] },
            "risk_assessment": {
                "type": "object",
                "properties": {
                    "total_score": { "type": "number", "minimum": 0, "maximum": 100 },
                    "risk_level": { "type": "string", "enum": ["minimal", "low", "moderate", "high", "critical"] },
                    "risk_category": { "type": "string" },
                    "breakdown": { "type": "object" },
                    "escalation_action": { "type": "string" },
                    "justification": { "type": "string" },
                    "requires_immediate_action": { "type": "boolean" },
                    "auto_escalate": { "type": "boolean" },
                    "overrides": { "type": "array", "items": { "type": "string" } }
                }
            },
            "outcome_classification": {
                "type": "object",
                "properties": {
                    "primary_outcome": { "type": "string" },
                    "outcome_category": { "type": "string" },
                    "confidence_score": { "type": "number" },
                    "secondary_outcomes": { "type": "array", "maxItems": 3 },
                    "urgency_level": { "type": "string", "enum": ["low", "medium", "high", "critical"] },
                    "requires_follow_up": { "type": "boolean" }
                }
            },
            "performance_assessment": {
                "type": "object",
                "properties": {
                    "overall_quality_score": { "type": "number", "minimum": 0, "maximum": 100 },
                    "performance_level": { "type": "string" },
                    "component_scores": { "type": "object" },
                    "weaknesses": { "type": "array", "items": { "type": "string" } },
                    "training_priority": { "type": "string" },
                    "training_recommendations": { "type": "array", "maxItems": 5 },
                    "benchmark": {
                        "type": "object",
                        "properties": {
                            "vs_team_average": { "type": "number" },
                            "vs_company_benchmark": { "type": "number" },
                            "percentile_vs_team": { "type": "string" },
                            "meets_company_standard": { "type": "boolean" },
                            "performance_tier": {
                                "type": "string",
                                "enum": ["Elite Performer", "Meets Standard", "Approaching Standard", "Below Standard"]
                            }
                        }
                    }
                }
            },
            "quality": {
                "type": "object",
                "properties": {
                    "anomalies": { "type": "array", "items": { "type": "string" } },
                    "signal_counts": { "type": "object" },
                    "degraded": { "type": "boolean" }
                }
            }
        }
    })
    .to_string()
}

// Error types

#[derive(Debug)]
enum AuditCliError {
    Io(io::Error),
    Audit(call_audit::ComputeError),
    Json(serde_json::Error),
    NoBundles,
    BundlesFailed(usize),
    ValidationFailed(usize),
    DoctorFailed,
    ParseError(String),
}

impl From<io::Error> for AuditCliError {
    fn from(e: io::Error) -> Self {
        AuditCliError::Io(e)
    }
}

impl From<call_audit::ComputeError> for AuditCliError {
    fn from(e: call_audit::ComputeError) -> Self {
        AuditCliError::Audit(e)
    }
}

impl From<serde_json::Error> for AuditCliError {
    fn from(e: serde_json::Error) -> Self {
        AuditCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<AuditCliError> for CliError {
    fn from(e: AuditCliError) -> Self {
        use call_audit::ComputeError;

        match e {
            AuditCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            AuditCliError::Audit(e) => {
                let (code, hint) = match &e {
                    ComputeError::Configuration(_) => {
                        ("CONFIG_ERROR", "Run 'audit doctor --config <file>' for details")
                    }
                    ComputeError::Validation(_) => {
                        ("VALIDATION_ERROR", "Run 'audit validate' for details")
                    }
                    ComputeError::InvalidInput(_) => ("INVALID_INPUT", "Ensure the bundle is not empty"),
                    _ => ("PARSE_ERROR", "Ensure input matches call.signal_bundle.v1 schema"),
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            AuditCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            AuditCliError::NoBundles => CliError {
                code: "NO_BUNDLES".to_string(),
                message: "No signal bundles found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            AuditCliError::BundlesFailed(count) => CliError {
                code: "BUNDLES_FAILED".to_string(),
                message: format!("{} bundles could not be audited", count),
                hint: Some("See the per-line errors above".to_string()),
            },
            AuditCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} bundles failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            AuditCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
            AuditCliError::ParseError(msg) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: msg,
                hint: Some("Check input format".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct LineError {
    line: usize,
    error: CliError,
}

#[derive(serde::Serialize)]
struct ValidationReport {
    total_bundles: usize,
    valid_bundles: usize,
    invalid_bundles: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    call_id: Option<String>,
    error: String,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
