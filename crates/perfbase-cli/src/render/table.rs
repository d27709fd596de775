use super::RenderConfig;
use crate::commands::report::BatchOutcome;
use perfbase_core::StatBundle;
use perfbase_core::extract::Measure;
use perfbase_core::rating::score_label;
use perfbase_core::report::{AuditReport, Baseline, NetworkReport, ReportBody, StatColumn};
use std::io::{self, Write};

const ROW_HEADER: &str = "#,Method,Endpoint URL,Category,Status,Response (ms),Size (KB),\
Blocked (ms),DNS (ms),Connect (ms),SSL (ms),Send (ms),Wait/TTFB (ms),Receive (ms)";

pub(super) fn write_batch<W: Write>(
    out: &mut W,
    outcome: &BatchOutcome,
    config: &RenderConfig,
) -> io::Result<()> {
    for (idx, report) in outcome.reports.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        writeln!(out, "Sheet,{}", field(&report.sheet_name))?;
        match &report.body {
            ReportBody::Network(network) => write_network(out, network, config)?,
            ReportBody::Audit(audit) => write_audit(out, audit, config)?,
        }
    }

    for failure in &outcome.failures {
        writeln!(
            out,
            "Failed,{},{}",
            field(&failure.file.display().to_string()),
            field(&failure.error)
        )?;
    }
    Ok(())
}

fn write_network<W: Write>(
    out: &mut W,
    report: &NetworkReport,
    config: &RenderConfig,
) -> io::Result<()> {
    let zero = |m: Measure| config.number(m.or_zero());

    writeln!(out, "{}", ROW_HEADER)?;
    for row in &report.rows {
        let t = &row.timings;
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            row.ordinal,
            field(&row.method),
            field(&row.url),
            field(&row.category),
            row.status,
            config.number(row.response_ms),
            config.number(row.size_kb),
            zero(t.blocked_ms),
            zero(t.dns_ms),
            zero(t.connect_ms),
            zero(t.ssl_ms),
            zero(t.send_ms),
            zero(t.wait_ms),
            zero(t.receive_ms),
        )?;
    }

    writeln!(out)?;
    match &report.baseline {
        Baseline::Empty => writeln!(out, "Baseline,empty")?,
        Baseline::Observed(observed) => {
            writeln!(out, "Metric,Response (ms),Size (KB),Wait/TTFB (ms)")?;
            writeln!(out, "Total Requests,{},,", observed.total_requests)?;

            let rows: [(&str, fn(&StatBundle) -> f64); 6] = [
                ("Average", |s| s.mean),
                ("Median", |s| s.median),
                ("Min", |s| s.min),
                ("Max", |s| s.max),
                ("95th Percentile", |s| s.p95),
                ("Total", |s| s.sum),
            ];
            for (label, pick) in rows {
                let cells: Vec<String> = StatColumn::ALL
                    .iter()
                    .map(|c| {
                        observed
                            .get(*c)
                            .map(|s| config.number(pick(s)))
                            .unwrap_or_default()
                    })
                    .collect();
                writeln!(out, "{},{}", label, cells.join(","))?;
            }
        }
    }

    if !report.page_timings.is_empty() {
        writeln!(out)?;
        writeln!(out, "Page,DOMContentLoaded (ms),Page Load (ms)")?;
        for page in &report.page_timings {
            writeln!(
                out,
                "{},{},{}",
                field(&page.title),
                config.measure(page.content_loaded_ms),
                config.measure(page.load_ms)
            )?;
        }
    }

    for invalid in &report.invalid_entries {
        writeln!(out, "Skipped,{},{}", invalid.ordinal, field(&invalid.reason))?;
    }
    Ok(())
}

fn write_audit<W: Write>(out: &mut W, report: &AuditReport, config: &RenderConfig) -> io::Result<()> {
    let meta = &report.meta;
    writeln!(out, "Property,Value")?;
    writeln!(out, "URL,{}", field(&meta.url))?;
    writeln!(out, "Fetch Time,{}", field(&meta.fetch_time))?;
    writeln!(out, "Lighthouse Version,{}", field(&meta.tool_version))?;
    writeln!(out, "Gather Mode,{}", field(&meta.gather_mode))?;
    writeln!(out, "Benchmark Index,{}", meta.benchmark_index)?;

    writeln!(out)?;
    writeln!(out, "Category,Score,Rating")?;
    for cat in &report.category_scores {
        let score = cat.score.map(|s| s.to_string()).unwrap_or_else(|| "N/A".into());
        writeln!(out, "{},{},{}", field(&cat.category), score, cat.rating)?;
    }

    writeln!(out)?;
    writeln!(out, "Metric,Raw Value,Unit,Display,Score")?;
    for m in report.performance_metrics.iter().chain(&report.server_metrics) {
        writeln!(
            out,
            "{},{},{},{},{}",
            field(&m.metric),
            config.measure(m.value),
            field(&m.unit),
            field(&m.display),
            field(&score_label(m.score))
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Main Thread Category,Duration (ms)")?;
    for item in &report.main_thread.items {
        writeln!(out, "{},{}", field(&item.category), config.number(item.duration_ms))?;
    }
    writeln!(out, "Total Main Thread Time,{}", config.number(report.main_thread.total_ms))?;

    writeln!(out)?;
    writeln!(out, "Script URL,Total CPU (ms),Scripting (ms),Parse/Compile (ms)")?;
    for s in &report.js_execution.scripts {
        writeln!(
            out,
            "{},{},{},{}",
            field(&s.url),
            config.number(s.total_ms),
            config.number(s.scripting_ms),
            config.number(s.parse_compile_ms)
        )?;
    }
    writeln!(out, "Total JS Execution Time,{}", config.number(report.js_execution.total_ms))?;

    writeln!(out)?;
    writeln!(out, "Resource Type,Requests,Transfer Size (KB)")?;
    for r in &report.resource_summary {
        writeln!(
            out,
            "{},{},{}",
            field(&r.resource_type),
            r.requests,
            config.number(r.transfer_kb)
        )?;
    }

    if !report.diagnostics.is_empty() {
        writeln!(out)?;
        writeln!(out, "Audit,Score,Details,Potential Savings")?;
        for d in &report.diagnostics {
            writeln!(
                out,
                "{},{},{},{}",
                field(&d.audit),
                field(&score_label(d.score)),
                field(&d.display),
                field(&d.savings)
            )?;
        }
    }
    Ok(())
}


/// Quote a field that would otherwise break the comma layout
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
