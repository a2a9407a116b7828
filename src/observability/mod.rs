//! OpenTelemetry-based observability with file-based trace export.
//!
//! Spans recorded with `tracing` are exported by a custom OTLP exporter that
//! appends JSON lines to a rotating file:
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → snapshare-otlp.json
//!        └→ fmt layer (warnings and errors) → stderr
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: `snapshare-otlp.json` in the data directory
//! - **Automatic Rotation**: 10 MB per file, 3 backups (`.1` newest)
//! - **OTLP Format**: one `resourceSpans` document per exported batch
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in `config.toml`
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider with file export
//! - `span_formatter`: OTLP JSON span serialization
//! - `file_writer`: Rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
