#![forbid(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use henu_core::geometry::Size;
use tracing::info;

use crate::config::{LogFormat, RuntimeConfig};
use crate::error::Result;
use crate::logging;
use crate::trace::{TraceFile, replay_trace, replay_trace_with};

#[derive(Debug, Parser)]
#[command(
    name = "henu-replay",
    about = "Replay a recorded HENU layout trace and print the composed frames as JSON lines",
    version
)]
pub struct Cli {
    /// Trace file (JSONL, optionally gzip-compressed).
    pub trace: PathBuf,

    /// Runtime configuration (TOML, or JSON by `.json` extension).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Container size as WIDTHxHEIGHT; defaults to the trace header.
    #[arg(long, value_parser = parse_viewport)]
    pub viewport: Option<Size>,

    /// Which frames to print.
    #[arg(long, value_enum, default_value_t = Emit::Final)]
    pub emit: Emit,

    /// Override the configured log format.
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// Only the frame after the last message.
    Final,
    /// One frame per applied message.
    Every,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::from_file(path)?,
        None => RuntimeConfig::default(),
    };
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    logging::init(&config.logging)?;

    let trace = TraceFile::open(&cli.trace)?;
    info!(
        path = %cli.trace.display(),
        messages = trace.messages().count(),
        "replaying trace"
    );

    match cli.emit {
        Emit::Final => {
            let workspace = replay_trace(&trace, config.layout, cli.viewport)?;
            serde_json::to_writer(&mut *out, workspace.composition())?;
            out.write_all(b"\n")?;
        }
        Emit::Every => {
            replay_trace_with(&trace, config.layout, cli.viewport, |workspace| {
                serde_json::to_writer(&mut *out, workspace.composition())?;
                out.write_all(b"\n")?;
                Ok(())
            })?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_viewport(value: &str) -> std::result::Result<Size, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {value:?}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|error| format!("invalid dimension {part:?}: {error}"))
    };
    let size = Size::new(parse(width)?, parse(height)?);
    if !size.is_valid() {
        return Err(format!("viewport must be finite and >= 0, got {value:?}"));
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::WorkspaceMsg;
    use crate::trace::TraceWriter;
    use henu_core::event::PointerEvent;
    use henu_layout::LayoutMode;
    use tempfile::tempdir;

    #[test]
    fn viewport_parsing() {
        assert_eq!(parse_viewport("1400x900").unwrap(), Size::new(1400.0, 900.0));
        assert_eq!(parse_viewport("800X600").unwrap(), Size::new(800.0, 600.0));
        assert!(parse_viewport("1400").is_err());
        assert!(parse_viewport("ax3").is_err());
        assert!(parse_viewport("-1x3").is_err());
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "henu-replay",
            "trace.jsonl",
            "--viewport",
            "1000x700",
            "--emit",
            "every",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.viewport, Some(Size::new(1000.0, 700.0)));
        assert_eq!(cli.emit, Emit::Every);
        assert_eq!(cli.log_format, Some(LogFormat::Json));
    }

    #[test]
    fn run_emits_every_frame() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.jsonl");
        let mut writer = TraceWriter::plain(&path, "cli", Size::new(1400.0, 900.0)).unwrap();
        for msg in [
            WorkspaceMsg::Pointer(PointerEvent::down(302.0, 10.0)),
            WorkspaceMsg::Pointer(PointerEvent::moved(322.0, 10.0)),
            WorkspaceMsg::SelectPreset {
                mode: LayoutMode::Code,
            },
        ] {
            writer.record_now(&msg).unwrap();
        }
        writer.finish().unwrap();

        let cli = Cli::try_parse_from([
            "henu-replay",
            path.to_str().unwrap(),
            "--emit",
            "every",
        ])
        .unwrap();
        let mut out = Vec::new();
        run(cli, &mut out).unwrap();

        let lines: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1]["sidebar"]["size"], 320.0);
        assert_eq!(lines[2]["status"]["mode_label"], "CODE");
    }
}
