#![forbid(unsafe_code)]

//! Layout trace recording and replay.
//!
//! A trace records every [`WorkspaceMsg`] a session received, with
//! nanosecond timestamps, so a layout bug can be reproduced exactly.
//!
//! # Format
//!
//! JSONL. Each line is an object tagged by `record`. The first line is a
//! `trace_header` carrying the initial viewport, the last a `trace_summary`.
//! Files may be gzip-compressed; readers detect this by the gzip magic
//! bytes.

use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use henu_core::geometry::Size;
use henu_layout::{LayoutConfig, WorkspaceLayout};
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};
use web_time::Instant;

use crate::error::{Result, RuntimeError};
use crate::message::WorkspaceMsg;

pub const SCHEMA_VERSION: &str = "henu-layout-trace-v1";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// One line of a trace file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record")]
pub enum TraceRecord {
    #[serde(rename = "trace_header")]
    Header {
        schema_version: String,
        session_name: String,
        viewport: Size,
    },

    #[serde(rename = "message")]
    Message { ts_ns: u64, message: WorkspaceMsg },

    #[serde(rename = "trace_summary")]
    Summary {
        total_messages: u64,
        total_duration_ns: u64,
    },
}

/// Writes trace records as JSONL.
pub struct TraceWriter<W: Write> {
    writer: BufWriter<W>,
    started: Instant,
    message_count: u64,
    first_ts_ns: Option<u64>,
    last_ts_ns: u64,
}

impl TraceWriter<std::fs::File> {
    pub fn plain(path: impl AsRef<Path>, session_name: &str, viewport: Size) -> Result<Self> {
        let file = std::fs::File::create(path)?;
        Self::from_writer(file, session_name, viewport)
    }
}

impl TraceWriter<GzEncoder<std::fs::File>> {
    pub fn gzip(path: impl AsRef<Path>, session_name: &str, viewport: Size) -> Result<Self> {
        let file = std::fs::File::create(path)?;
        Self::from_writer(
            GzEncoder::new(file, Compression::fast()),
            session_name,
            viewport,
        )
    }
}

impl<W: Write> TraceWriter<W> {
    /// Wrap any writer and emit the header.
    pub fn from_writer(writer: W, session_name: &str, viewport: Size) -> Result<Self> {
        let mut writer = BufWriter::new(writer);
        let header = TraceRecord::Header {
            schema_version: SCHEMA_VERSION.to_string(),
            session_name: session_name.to_string(),
            viewport,
        };
        serde_json::to_writer(&mut writer, &header)?;
        writer.write_all(b"\n")?;
        Ok(Self {
            writer,
            started: Instant::now(),
            message_count: 0,
            first_ts_ns: None,
            last_ts_ns: 0,
        })
    }

    /// Record `message` at an explicit timestamp.
    pub fn record(&mut self, message: &WorkspaceMsg, ts_ns: u64) -> Result<()> {
        let record = TraceRecord::Message {
            ts_ns,
            message: *message,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.first_ts_ns.get_or_insert(ts_ns);
        self.last_ts_ns = ts_ns;
        self.message_count += 1;
        Ok(())
    }

    /// Record `message` stamped with the time since the writer was created.
    pub fn record_now(&mut self, message: &WorkspaceMsg) -> Result<()> {
        let elapsed = u64::try_from(self.started.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self.record(message, elapsed)
    }

    #[must_use]
    pub fn message_count(&self) -> u64 {
        self.message_count
    }

    /// Write the summary and flush, returning the inner writer.
    pub fn finish(mut self) -> Result<W> {
        let summary = TraceRecord::Summary {
            total_messages: self.message_count,
            total_duration_ns: self
                .first_ts_ns
                .map_or(0, |first| self.last_ts_ns.saturating_sub(first)),
        };
        serde_json::to_writer(&mut self.writer, &summary)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|error| RuntimeError::Io(error.into_error()))
    }
}

/// A parsed trace file.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceFile {
    records: Vec<TraceRecord>,
}

impl TraceFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    /// Parse plain or gzip-compressed JSONL.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let text = if data.starts_with(&GZIP_MAGIC) {
            let mut decoded = Vec::new();
            GzDecoder::new(data).read_to_end(&mut decoded)?;
            decoded
        } else {
            data.to_vec()
        };

        let mut records = Vec::new();
        for (index, line) in BufReader::new(text.as_slice()).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line)
                .map_err(|error| RuntimeError::trace(index + 1, error.to_string()))?;
            records.push(record);
        }
        Ok(Self { records })
    }

    #[must_use]
    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Size> {
        match self.records.first()? {
            TraceRecord::Header { viewport, .. } => Some(*viewport),
            _ => None,
        }
    }

    #[must_use]
    pub fn session_name(&self) -> Option<&str> {
        match self.records.first()? {
            TraceRecord::Header { session_name, .. } => Some(session_name),
            _ => None,
        }
    }

    #[must_use]
    pub fn total_messages(&self) -> Option<u64> {
        match self.records.last()? {
            TraceRecord::Summary { total_messages, .. } => Some(*total_messages),
            _ => None,
        }
    }

    /// Messages in recorded order with their timestamps.
    pub fn messages(&self) -> impl Iterator<Item = (WorkspaceMsg, u64)> + '_ {
        self.records.iter().filter_map(|record| match record {
            TraceRecord::Message { ts_ns, message } => Some((*message, *ts_ns)),
            _ => None,
        })
    }
}

/// Replay `trace` into a fresh workspace and return it.
///
/// The viewport defaults to the header's. Replay stops at the first
/// shutdown message.
pub fn replay_trace(
    trace: &TraceFile,
    config: LayoutConfig,
    viewport: Option<Size>,
) -> Result<WorkspaceLayout> {
    replay_trace_with(trace, config, viewport, |_| Ok(()))
}

/// Like [`replay_trace`], calling `on_step` after every applied message.
pub fn replay_trace_with(
    trace: &TraceFile,
    config: LayoutConfig,
    viewport: Option<Size>,
    mut on_step: impl FnMut(&WorkspaceLayout) -> Result<()>,
) -> Result<WorkspaceLayout> {
    let viewport = viewport
        .or_else(|| trace.viewport())
        .ok_or_else(|| RuntimeError::trace(1, "missing trace_header"))?;
    let _span = info_span!(
        "trace.replay",
        session = trace.session_name().unwrap_or_default(),
        width = viewport.width,
        height = viewport.height
    )
    .entered();

    let mut workspace = WorkspaceLayout::new(config, viewport)?;
    let mut replayed = 0_u64;
    for (message, _ts_ns) in trace.messages() {
        if message.is_shutdown() {
            break;
        }
        message.apply(&mut workspace)?;
        replayed += 1;
        on_step(&workspace)?;
    }
    debug!(replayed, "trace replayed");
    Ok(workspace)
}
