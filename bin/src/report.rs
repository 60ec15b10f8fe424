//! Text and JSON rendering of an analysis.

use std::fmt::Write;

use clap::ValueEnum;
use ronda::{Analysis, RiskLevel};
use ronda::forensic::ForensicReport;
use ronda::news::NewsReport;
use ronda::patterns::{DivergenceKind, PatternReport};

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Render an analysis in the requested format.
pub(crate) fn render(analysis: &Analysis, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(analysis)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(analysis)? + "\n"),
    }
}

fn banner(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(out, "║ {title:^60} ║");
    let _ = writeln!(out, "╚══════════════════════════════════════════════════════════════╝\n");
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}:");
    let _ = writeln!(out, "{}", "-".repeat(60));
}

fn opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.precision$}"))
}

fn level(value: Option<RiskLevel>) -> String {
    value.map_or_else(|| "n/a".to_string(), |l| l.to_string())
}

/// Render the human-readable report.
pub(crate) fn render_text(analysis: &Analysis) -> String {
    let mut out = String::new();
    banner(&mut out, &format!("Forensic Risk Report: {}", analysis.symbol));

    let overall = &analysis.overall;
    let _ = writeln!(out, "Overall risk: {} ({:.2})\n", overall.level, overall.score);
    let _ = writeln!(out, "{:<12} {:>8} {:>8} {:>10}", "Component", "Value", "Weight", "Effective");
    for c in &overall.components {
        let _ = writeln!(
            out,
            "{:<12} {:>8} {:>8.2} {:>10.2}",
            c.component.to_string(),
            opt(c.value, 2),
            c.weight,
            c.effective_weight
        );
    }
    out.push('\n');

    forensic_text(&mut out, &analysis.forensic);
    match &analysis.patterns {
        Some(patterns) => patterns_text(&mut out, patterns),
        None => {
            section(&mut out, "Price Patterns");
            let _ = writeln!(out, "  No price history available\n");
        }
    }
    news_text(&mut out, &analysis.news);

    out
}

fn forensic_text(out: &mut String, report: &ForensicReport) {
    section(out, "Beneish M-Score");
    let beneish = &report.beneish;
    for reading in &beneish.readings {
        let _ = writeln!(
            out,
            "  {:<6} {:>8.3}  {:<6}  {}",
            reading.index.label(),
            reading.value,
            reading.risk,
            reading.index.description()
        );
    }
    let _ = writeln!(out, "  M-Score: {}", opt(beneish.m_score, 2));
    let _ = writeln!(out, "  {}\n", beneish.interpretation);

    section(out, "Altman Z-Score");
    for (label, value) in altman_rows(report) {
        let _ = writeln!(out, "  {label:<6} {value:>8}");
    }
    let _ = writeln!(
        out,
        "  Z-Score: {} ({})",
        opt(report.altman.z_score, 2),
        report
            .altman
            .zone
            .map_or_else(|| "n/a".to_string(), |z| z.to_string())
    );
    let _ = writeln!(out, "  {}\n", report.altman.interpretation);

    section(out, "Red Flags");
    if report.red_flags.is_empty() {
        let _ = writeln!(out, "  None");
    }
    for flag in &report.red_flags {
        let _ = writeln!(out, "  [{:<6}] {}", flag.severity, flag.description);
    }
    let _ = writeln!(
        out,
        "  Weighted score: {} ({})",
        opt(report.red_flag_score, 2),
        level(report.red_flag_risk)
    );
    out.push('\n');

    section(out, "Ownership");
    match &report.ownership {
        None => {
            let _ = writeln!(out, "  No data");
        }
        Some(ownership) => {
            let figures = &ownership.ownership;
            let _ = writeln!(out, "  Insider:       {}%", opt(figures.insider_pct, 1));
            let _ = writeln!(out, "  Institutional: {}%", opt(figures.institutional_pct, 1));
            let _ = writeln!(out, "  Pledged:       {}%", opt(figures.pledged_pct, 1));
            let _ = writeln!(out, "  Short ratio:   {}", opt(figures.short_ratio, 1));
            for concern in &ownership.concerns {
                let _ = writeln!(out, "  [{:<6}] {}", concern.severity, concern.description);
            }
            let _ = writeln!(out, "  Risk: {}", ownership.risk);
        }
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "Forensic risk: {} ({})\n",
        opt(report.risk_score, 2),
        level(report.risk_level)
    );
}

fn altman_rows(report: &ForensicReport) -> Vec<(&'static str, String)> {
    let labels = ["X1", "X2", "X3", "X4", "X5"];
    labels
        .into_iter()
        .zip(report.altman.ratios.as_array())
        .map(|(label, value)| (label, opt(value, 3)))
        .collect()
}

fn count(value: Option<usize>) -> String {
    value.map_or_else(|| "n/a".to_string(), |n| n.to_string())
}

fn patterns_text(out: &mut String, report: &PatternReport) {
    section(out, "Price Patterns");
    let _ = writeln!(out, "  Bars analyzed:   {}", report.bars_analyzed);
    let _ = writeln!(out, "  Volume spikes:   {}", count(report.spike_count()));
    let _ = writeln!(out, "  Price anomalies: {}", count(report.anomaly_count()));
    let _ = writeln!(
        out,
        "  Gaps:            {} ({} up, {} down)",
        count(report.gap_count()),
        count(report.gap_up_count()),
        count(report.gap_down_count())
    );

    let divergence = report.divergence.as_ref().map_or("n/a", |d| match d.signal {
        Some(DivergenceKind::Bearish) => "bearish",
        Some(DivergenceKind::Bullish) => "bullish",
        None => "none",
    });
    let _ = writeln!(out, "  Divergence:      {divergence}");

    match &report.volatility {
        Some(v) => {
            let _ = writeln!(
                out,
                "  Volatility:      {:.1}% annualized ({})",
                v.annualized * 100.0,
                v.risk
            );
            if let Some(recent) = v.recent_annualized {
                let _ = writeln!(out, "  Recent:          {:.1}% annualized", recent * 100.0);
            }
            let _ = writeln!(
                out,
                "  Best/worst day:  {:+.2}% / {:+.2}%",
                v.max_daily_gain * 100.0,
                v.max_daily_loss * 100.0
            );
        }
        None => {
            let _ = writeln!(out, "  Volatility:      n/a");
        }
    }

    let risk = &report.risk;
    let _ = writeln!(
        out,
        "  Check risk:      spikes {}, anomalies {}, gaps {}, divergence {}, volatility {}",
        level(risk.volume_spikes),
        level(risk.price_anomalies),
        level(risk.gaps),
        level(risk.divergence),
        level(risk.volatility)
    );
    let _ = writeln!(out, "  Pattern risk:    {} ({})", opt(risk.score, 2), level(risk.level));
    out.push('\n');
}

fn news_text(out: &mut String, report: &NewsReport) {
    section(out, "News");
    let _ = writeln!(out, "  Items analyzed: {}", report.items_analyzed);
    let _ = writeln!(
        out,
        "  Sentiment:      {} ({:+.2}; {} positive, {} negative, {} neutral)",
        report.sentiment.as_str(),
        report.sentiment_score,
        report.positive_count,
        report.negative_count,
        report.neutral_count
    );
    let _ = writeln!(out, "  Risk level:     {}", report.risk_level);
    let _ = writeln!(out, "  Keyword score:  {:.2}", report.keyword_risk_score);

    if !report.critical_items.is_empty() {
        let _ = writeln!(out, "  Critical items:");
        for item in &report.critical_items {
            let _ = writeln!(out, "    - {} [{}]", item.title, item.keywords.join(", "));
        }
    }
    if !report.topics.is_empty() {
        let topics: Vec<String> = report
            .topics
            .iter()
            .map(|t| format!("{} ({})", t.term, t.frequency))
            .collect();
        let _ = writeln!(out, "  Topics:         {}", topics.join(", "));
    }
    if !report.headlines.is_empty() {
        let _ = writeln!(out, "  Headlines:");
        for headline in &report.headlines {
            let _ = writeln!(out, "    - {headline}");
        }
    }
    out.push('\n');
}
