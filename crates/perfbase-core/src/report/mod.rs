//! Report assembly: a parsed capture in, one self-contained [`ReportModel`] out.

mod audit;
mod network;

pub use audit::{
    AuditAssembler, AuditMeta, AuditReport, CategoryScore, JsExecution, MainThreadBreakdown,
};
pub use network::{
    Baseline, CaptureWindow, NamedStat, NetworkAssembler, NetworkReport, ObservedBaseline,
    PageTiming, StatColumn,
};

use crate::Result;
use crate::capture::{CaptureDocument, CaptureKind, CaptureReader};
use crate::naming::sheet_name;
use serde::Serialize;
use std::path::Path;

/// Everything a renderer needs for one capture file
#[derive(Debug, Clone, Serialize)]
pub struct ReportModel {
    /// Spreadsheet-safe identifier derived from the file name
    pub sheet_name: String,
    #[serde(flatten)]
    pub body: ReportBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReportBody {
    Network(NetworkReport),
    Audit(Box<AuditReport>),
}

impl ReportModel {
    pub fn kind(&self) -> CaptureKind {
        match self.body {
            ReportBody::Network(_) => CaptureKind::Network,
            ReportBody::Audit(_) => CaptureKind::Audit,
        }
    }

    /// True when a network capture produced no valid rows
    pub fn is_empty(&self) -> bool {
        match &self.body {
            ReportBody::Network(report) => report.is_empty(),
            ReportBody::Audit(_) => false,
        }
    }
}

/// Tunables for assembly
#[derive(Debug, Clone)]
pub struct AssemblerOptions {
    /// How many bootup-time scripts to keep, in source order
    pub top_scripts: usize,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self { top_scripts: 10 }
    }
}

pub trait Assembler {
    type Input;
    type Output;

    fn assemble(&self, input: &Self::Input) -> Self::Output;
}

/// Dispatches a capture to the assembler for its kind
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    options: AssemblerOptions,
}

impl ReportAssembler {
    pub fn new(options: AssemblerOptions) -> Self {
        Self { options }
    }

    pub fn assemble(&self, sheet_name: &str, document: &CaptureDocument) -> ReportModel {
        tracing::debug!(
            "Assembling {} report for {}",
            document.kind().as_str(),
            sheet_name
        );

        let body = match document {
            CaptureDocument::Network(har) => ReportBody::Network(NetworkAssembler.assemble(har)),
            CaptureDocument::Audit(report) => ReportBody::Audit(Box::new(
                AuditAssembler::new(self.options.top_scripts).assemble(report.as_ref()),
            )),
        };

        ReportModel {
            sheet_name: sheet_name.to_string(),
            body,
        }
    }

    /// Read, parse and assemble one capture file.
    ///
    /// Only a parse failure is an error; it names the file.
    pub fn assemble_file(&self, path: &Path) -> Result<ReportModel> {
        let document = CaptureReader::from_file(path)?;
        Ok(self.assemble(&sheet_name(path), &document))
    }
}
