use super::RenderConfig;
use crate::commands::report::BatchOutcome;
use perfbase_core::rating::{Rating, score_label};
use perfbase_core::report::{
    AuditReport, Baseline, NetworkReport, ReportBody, ReportModel, StatColumn,
};
use std::io::{self, Write};

pub(super) fn write_batch<W: Write>(
    out: &mut W,
    outcome: &BatchOutcome,
    config: &RenderConfig,
) -> io::Result<()> {
    for report in &outcome.reports {
        write_report(out, report, config)?;
    }

    if !outcome.failures.is_empty() {
        section(out, "FAILED FILES", config)?;
        for failure in &outcome.failures {
            writeln!(
                out,
                "  {}  {}",
                config.paint(failure.file.display(), Some(config.palette.poor), true),
                failure.error
            )?;
        }
    }

    writeln!(out)?;
    Ok(())
}

fn write_report<W: Write>(out: &mut W, report: &ReportModel, config: &RenderConfig) -> io::Result<()> {
    let title = format!("{} ({} capture)", report.sheet_name, report.kind().as_str());
    writeln!(out, "\n{}", config.paint(&title, Some(config.palette.section), true))?;
    writeln!(
        out,
        "{}",
        config.paint("=".repeat(title.chars().count()), Some(config.palette.section), false)
    )?;

    match &report.body {
        ReportBody::Network(network) => write_network(out, network, config),
        ReportBody::Audit(audit) => write_audit(out, audit, config),
    }
}

fn section<W: Write>(out: &mut W, title: &str, config: &RenderConfig) -> io::Result<()> {
    writeln!(out, "\n{}", config.paint(title, Some(config.palette.section), true))
}

fn header<W: Write>(out: &mut W, text: String, config: &RenderConfig) -> io::Result<()> {
    writeln!(out, "{}", config.paint(text, Some(config.palette.header), true))
}

fn write_network<W: Write>(
    out: &mut W,
    report: &NetworkReport,
    config: &RenderConfig,
) -> io::Result<()> {
    section(out, "REQUESTS", config)?;
    header(
        out,
        format!(
            "  {:>4}  {:<7} {:>6} {:>14} {:>10} {:>15}  {:<20} {}",
            "#", "Method", "Status", "Response (ms)", "Size (KB)", "Wait/TTFB (ms)", "Category", "URL"
        ),
        config,
    )?;
    for row in &report.rows {
        writeln!(
            out,
            "  {:>4}  {:<7} {:>6} {:>14} {:>10} {:>15}  {:<20} {}",
            row.ordinal,
            row.method,
            row.status,
            config.number(row.response_ms),
            config.number(row.size_kb),
            config.number(row.timings.wait_ms.or_zero()),
            row.category,
            row.url
        )?;
    }

    if !report.invalid_entries.is_empty() {
        section(out, "SKIPPED ENTRIES", config)?;
        for invalid in &report.invalid_entries {
            writeln!(
                out,
                "  {}",
                config.paint(invalid, Some(config.palette.muted), false)
            )?;
        }
    }

    section(out, "OBSERVED BASELINE", config)?;
    match &report.baseline {
        Baseline::Empty => {
            writeln!(
                out,
                "  {}",
                config.paint(
                    "No valid requests; statistics not computed",
                    Some(config.palette.muted),
                    false
                )
            )?;
        }
        Baseline::Observed(observed) => {
            header(
                out,
                format!(
                    "  {:<20} {:>14} {:>12} {:>15}",
                    "Metric",
                    StatColumn::ResponseTime.label(),
                    StatColumn::Size.label(),
                    StatColumn::Wait.label()
                ),
                config,
            )?;
            writeln!(out, "  {:<20} {:>14}", "Total Requests", observed.total_requests)?;

            let rows: [(&str, fn(&perfbase_core::StatBundle) -> f64); 6] = [
                ("Average", |s| s.mean),
                ("Median", |s| s.median),
                ("Min", |s| s.min),
                ("Max", |s| s.max),
                ("95th Percentile", |s| s.p95),
                ("Total", |s| s.sum),
            ];
            for (label, pick) in rows {
                let cell = |column| {
                    observed
                        .get(column)
                        .map(|s| config.number(pick(s)))
                        .unwrap_or_default()
                };
                writeln!(
                    out,
                    "  {:<20} {:>14} {:>12} {:>15}",
                    label,
                    cell(StatColumn::ResponseTime),
                    cell(StatColumn::Size),
                    cell(StatColumn::Wait)
                )?;
            }
        }
    }

    if !report.page_timings.is_empty() {
        section(out, "PAGE LOAD TIMINGS", config)?;
        header(
            out,
            format!(
                "  {:<30} {:>22} {:>15}",
                "Page", "DOMContentLoaded (ms)", "Page Load (ms)"
            ),
            config,
        )?;
        for page in &report.page_timings {
            writeln!(
                out,
                "  {:<30} {:>22} {:>15}",
                page.title,
                config.measure(page.content_loaded_ms),
                config.measure(page.load_ms)
            )?;
        }
    }

    if let Some(window) = &report.capture_window {
        writeln!(
            out,
            "\n  Captured {} to {} ({} ms)",
            window.start, window.end, window.span_ms
        )?;
    }
    Ok(())
}

fn write_audit<W: Write>(out: &mut W, report: &AuditReport, config: &RenderConfig) -> io::Result<()> {
    let meta = &report.meta;
    section(out, "AUDIT INFORMATION", config)?;
    writeln!(out, "  URL:                {}", meta.url)?;
    writeln!(out, "  Fetch Time:         {}", meta.fetch_time)?;
    writeln!(out, "  Lighthouse Version: {}", meta.tool_version)?;
    writeln!(out, "  Gather Mode:        {}", meta.gather_mode)?;
    writeln!(out, "  Benchmark Index:    {}", meta.benchmark_index)?;

    if !report.category_scores.is_empty() {
        section(out, "CATEGORY SCORES", config)?;
        for cat in &report.category_scores {
            let score = cat
                .score
                .map(|s| s.to_string())
                .unwrap_or_else(|| Rating::NotAvailable.to_string());
            writeln!(
                out,
                "  {:<20} {:>5}  {}",
                cat.category,
                score,
                rated(cat.rating, config)
            )?;
        }
    }

    section(out, "PERFORMANCE METRICS", config)?;
    for m in &report.performance_metrics {
        writeln!(
            out,
            "  {:<32} {:>12} {:<3} {:<10} {}",
            m.metric,
            config.measure(m.value),
            m.unit,
            m.display,
            config.paint(score_label(m.score), config.palette.for_rating(m.rating), false)
        )?;
    }

    section(out, "SERVER & NETWORK", config)?;
    for m in &report.server_metrics {
        writeln!(
            out,
            "  {:<32} {:>12} {:<3} {}",
            m.metric,
            config.measure(m.value),
            m.unit,
            m.display
        )?;
    }

    if !report.main_thread.items.is_empty() {
        section(out, "MAIN THREAD BREAKDOWN", config)?;
        for item in &report.main_thread.items {
            writeln!(out, "  {:<32} {:>12}", item.category, config.number(item.duration_ms))?;
        }
        writeln!(
            out,
            "  {:<32} {:>12}",
            "Total Main Thread Time",
            config.number(report.main_thread.total_ms)
        )?;
    }

    if !report.js_execution.scripts.is_empty() {
        section(out, "JAVASCRIPT EXECUTION", config)?;
        for s in &report.js_execution.scripts {
            writeln!(
                out,
                "  {:>10} {:>10} {:>10}  {}",
                config.number(s.total_ms),
                config.number(s.scripting_ms),
                config.number(s.parse_compile_ms),
                s.url
            )?;
        }
        writeln!(
            out,
            "  {:>10}  Total JS Execution Time",
            config.number(report.js_execution.total_ms)
        )?;
    }

    if !report.resource_summary.is_empty() {
        section(out, "RESOURCE SUMMARY", config)?;
        for r in &report.resource_summary {
            writeln!(
                out,
                "  {:<20} {:>6} {:>12} KB",
                r.resource_type,
                r.requests,
                config.number(r.transfer_kb)
            )?;
        }
    }

    if !report.diagnostics.is_empty() {
        section(out, "DIAGNOSTICS & OPPORTUNITIES", config)?;
        for d in &report.diagnostics {
            writeln!(
                out,
                "  {:<45} {:<16} {}",
                d.audit,
                config.paint(score_label(d.score), config.palette.for_rating(d.rating), false),
                d.display
            )?;
            if d.savings != "N/A" {
                writeln!(
                    out,
                    "  {:<45} {}",
                    "",
                    config.paint(format!("savings: {}", d.savings), Some(config.palette.muted), false)
                )?;
            }
        }
    }
    Ok(())
}

fn rated(rating: Rating, config: &RenderConfig) -> String {
    config.paint(rating, config.palette.for_rating(rating), true)
}

