//! End-to-end analysis over synthetic companies.

use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate};
use ronda::combine::Component;
use ronda::forensic::AltmanZone;
use ronda::prelude::*;

fn healthy_period() -> FinancialPeriod {
    FinancialPeriod {
        period_end: None,
        revenue: Some(1200.0),
        cost_of_revenue: Some(700.0),
        gross_profit: None,
        net_receivables: Some(100.0),
        total_current_assets: Some(400.0),
        net_ppe: Some(300.0),
        total_assets: Some(1000.0),
        depreciation: Some(30.0),
        sga_expense: Some(150.0),
        total_debt: Some(200.0),
        total_liabilities: Some(400.0),
        total_current_liabilities: Some(200.0),
        retained_earnings: Some(300.0),
        ebit: Some(150.0),
        net_income: Some(100.0),
        operating_cash_flow: Some(150.0),
        total_equity: Some(600.0),
    }
}

/// Receivables balloon and earnings outrun operating cash.
fn manipulated_period() -> FinancialPeriod {
    FinancialPeriod {
        net_receivables: Some(400.0),
        net_income: Some(200.0),
        operating_cash_flow: Some(-100.0),
        ..healthy_period()
    }
}

fn snapshot() -> MarketSnapshot {
    MarketSnapshot {
        market_cap: Some(2000.0),
        total_liabilities: None,
        ownership: None,
    }
}

/// Alternating +1% / -0.5% closes with flat volume and no gaps.
fn calm_prices(len: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut close = 100.0;
    let bars = (0..len)
        .map(|i| {
            let open = close;
            if i > 0 {
                close *= if i % 2 == 0 { 0.995 } else { 1.01 };
            }
            PriceBar {
                date: start + Duration::days(i as i64),
                open,
                high: open.max(close),
                low: open.min(close),
                close,
                volume: 1_000_000.0,
            }
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}

fn quiet_news() -> Vec<NewsItem> {
    vec![
        NewsItem::new("Acme schedules annual meeting", "Shareholders to vote on board"),
        NewsItem::new("Acme opens new warehouse", "Logistics footprint grows"),
    ]
}

fn alarming_news() -> Vec<NewsItem> {
    vec![
        NewsItem::new("Acme under SEC investigation", "Accounting fraud alleged"),
        NewsItem::new("Acme shares tumble", "Auditor raises concerns"),
    ]
}

#[test]
fn test_healthy_company_is_low_risk() {
    let periods = [healthy_period(), healthy_period()];
    let prices = calm_prices(60);
    let analysis = analyze(
        "ACME",
        &periods,
        Some(&prices),
        &quiet_news(),
        &snapshot(),
        &AnalysisConfig::default(),
    );

    // Every index is 1.0 except TATA = (100 - 150) / 1000
    let m = analysis.forensic.beneish.m_score.unwrap();
    assert_relative_eq!(m, -4.84 + 2.36 + 4.679 * -0.05, epsilon = 1e-9);
    assert!(!analysis.forensic.manipulation_flag());
    assert!(analysis.forensic.red_flags.is_empty());

    // 0.24 + 0.42 + 0.495 + 0.6 * 2000 / 400 + 1.2
    let z = analysis.forensic.altman.z_score.unwrap();
    assert_relative_eq!(z, 5.355, epsilon = 1e-9);
    assert_eq!(analysis.forensic.altman.zone, Some(AltmanZone::Safe));

    let patterns = analysis.patterns.as_ref().unwrap();
    assert_eq!(patterns.bars_analyzed, 60);
    assert_eq!(patterns.spike_count(), Some(0));
    assert_eq!(patterns.gap_count(), Some(0));
    assert!(patterns.volatility.is_some());

    assert_eq!(analysis.news.risk_level, RiskLevel::Low);
    assert_eq!(analysis.overall.level, RiskLevel::Low);
    let pattern = analysis.overall.component(Component::Pattern).unwrap();
    assert!(pattern.value.is_some());
    assert_relative_eq!(pattern.effective_weight, 0.2, epsilon = 1e-12);
}

#[test]
fn test_manipulator_with_fraud_news_is_high_risk() {
    let periods = [manipulated_period(), healthy_period()];
    let prices = calm_prices(60);
    let analysis = analyze(
        "ACME",
        &periods,
        Some(&prices),
        &alarming_news(),
        &snapshot(),
        &AnalysisConfig::default(),
    );

    assert_relative_eq!(analysis.forensic.beneish.indices.dsri.unwrap(), 4.0, epsilon = 1e-12);
    assert_relative_eq!(analysis.forensic.beneish.indices.tata.unwrap(), 0.3, epsilon = 1e-12);
    assert!(analysis.forensic.manipulation_flag());

    assert_eq!(analysis.news.risk_level, RiskLevel::High);
    assert_eq!(analysis.news.critical_count, 1);

    let forensic = analysis.overall.component(Component::Forensic).unwrap();
    assert_relative_eq!(forensic.value.unwrap(), 1.0);
    assert_eq!(analysis.overall.level, RiskLevel::High);
}

#[test]
fn test_missing_prices_rescales_weights() {
    let periods = [manipulated_period(), healthy_period()];
    let analysis = analyze(
        "ACME",
        &periods,
        None,
        &alarming_news(),
        &snapshot(),
        &AnalysisConfig::default(),
    );

    assert!(analysis.patterns.is_none());
    // (0.5 * 1.0 + 0.3 * 0.9) / 0.8
    assert_relative_eq!(analysis.overall.score, 0.9625, epsilon = 1e-12);
    let news = analysis.overall.component(Component::News).unwrap();
    assert_relative_eq!(news.effective_weight, 0.375, epsilon = 1e-12);
}

#[test]
fn test_fraud_news_without_statements_is_high_risk() {
    let news = [NewsItem::new("SEC opens fraud investigation", "Auditor resigns")];
    let analysis = analyze(
        "ACME",
        &[],
        None,
        &news,
        &MarketSnapshot::default(),
        &AnalysisConfig::default(),
    );

    // No statements means no forensic reading, not a clean one
    let forensic = analysis.overall.component(Component::Forensic).unwrap();
    assert!(forensic.value.is_none());
    assert!(analysis.forensic.risk_score.is_none());
    let news = analysis.overall.component(Component::News).unwrap();
    assert_relative_eq!(news.effective_weight, 1.0, epsilon = 1e-12);
    assert_relative_eq!(analysis.overall.score, 0.9, epsilon = 1e-12);
    assert_eq!(analysis.overall.level, RiskLevel::High);
}

#[test]
fn test_single_period_leaves_beneish_unavailable() {
    let analysis = analyze(
        "ACME",
        &[healthy_period()],
        None,
        &[],
        &snapshot(),
        &AnalysisConfig::default(),
    );
    assert!(analysis.forensic.beneish.m_score.is_none());
    assert!(analysis.forensic.beneish.manipulation_flag.is_none());
    // Altman only needs the latest period
    assert!(analysis.forensic.altman.z_score.is_some());
}

#[test]
fn test_json_input_matches_direct_call() {
    let input = AnalysisInput {
        symbol: "ACME".to_string(),
        periods: vec![manipulated_period(), healthy_period()],
        snapshot: snapshot(),
        prices: Some(calm_prices(40)),
        news: alarming_news(),
    };
    let json = serde_json::to_string(&input).unwrap();
    let parsed = AnalysisInput::from_json(&json).unwrap();
    assert_eq!(parsed, input);

    let config = AnalysisConfig::default();
    assert_eq!(parsed.analyze(&config), input.analyze(&config));
}

#[test]
fn test_json_input_keeps_every_close_bit() {
    let input = AnalysisInput {
        symbol: "ACME".to_string(),
        prices: Some(calm_prices(40)),
        ..Default::default()
    };
    let parsed = AnalysisInput::from_json(&serde_json::to_string(&input).unwrap()).unwrap();

    let bits = |series: &PriceSeries| -> Vec<u64> {
        series.closes().iter().map(|c| c.to_bits()).collect()
    };
    assert_eq!(
        bits(parsed.prices.as_ref().unwrap()),
        bits(input.prices.as_ref().unwrap())
    );
}

#[test]
fn test_analysis_is_deterministic() {
    let periods = [manipulated_period(), healthy_period()];
    let prices = calm_prices(60);
    let run = || {
        let analysis = analyze(
            "ACME",
            &periods,
            Some(&prices),
            &alarming_news(),
            &snapshot(),
            &AnalysisConfig::default(),
        );
        serde_json::to_string(&analysis).unwrap()
    };
    assert_eq!(run(), run());
}
