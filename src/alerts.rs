//! Canned alert text per disaster kind and severity tier.

use crate::models::{DisasterKind, RiskLevel};

const TEMPLATES: &[(DisasterKind, RiskLevel, &str)] = &[
    (
        DisasterKind::Flood,
        RiskLevel::Extreme,
        "EXTREME FLOOD ALERT for {region}: very heavy rainfall expected over the next 72 hours. Evacuate low-lying areas and follow official instructions.",
    ),
    (
        DisasterKind::Flood,
        RiskLevel::High,
        "HIGH FLOOD RISK in {region}: heavy rainfall forecast. Avoid river banks and prepare for possible waterlogging.",
    ),
    (
        DisasterKind::Flood,
        RiskLevel::Medium,
        "Moderate flood risk in {region}: significant rainfall expected. Monitor local advisories.",
    ),
    (
        DisasterKind::Flood,
        RiskLevel::Low,
        "Low flood risk in {region}. No action required.",
    ),
    (
        DisasterKind::Heatwave,
        RiskLevel::Extreme,
        "EXTREME HEATWAVE ALERT for {region}: dangerous temperatures forecast. Stay indoors during peak hours and keep hydrated.",
    ),
    (
        DisasterKind::Heatwave,
        RiskLevel::High,
        "HIGH HEATWAVE RISK in {region}: very high temperatures expected. Limit outdoor activity between 11:00 and 16:00.",
    ),
    (
        DisasterKind::Heatwave,
        RiskLevel::Medium,
        "Moderate heat risk in {region}: above-normal temperatures expected. Drink water regularly.",
    ),
    (
        DisasterKind::Heatwave,
        RiskLevel::Low,
        "Normal conditions in {region}. No significant weather risk.",
    ),
];

fn template(kind: DisasterKind, level: RiskLevel) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(k, l, _)| *k == kind && *l == level)
        .map(|(_, _, text)| *text)
}

/// Human-readable alert for a region.
#[must_use]
pub fn alert_text(kind: DisasterKind, level: RiskLevel, region: &str) -> String {
    match template(kind, level) {
        Some(text) => text.replace("{region}", region),
        None => format!("Alert for {region}"),
    }
}
