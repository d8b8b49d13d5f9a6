//! Report rendering: plain text for humans, JSON for scripts.

use crate::analysis::{AdcPin, CommonPin, PinAnalysis};
use crate::config::Config;
use crate::error::AnalysisError;
use crate::pin::{PINS_PER_PORT, PinId, PinLabel, Port};
use crate::pindef::MarlinPin;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

pub fn render<W: Write>(
    analysis: &PinAnalysis,
    config: &Config,
    format: ReportFormat,
    out: &mut W,
) -> Result<(), AnalysisError> {
    match format {
        ReportFormat::Text => write_text(analysis, config, out)?,
        ReportFormat::Json => write_json(analysis, config, out)?,
    }
    Ok(())
}

pub fn write_text<W: Write>(
    analysis: &PinAnalysis,
    config: &Config,
    out: &mut W,
) -> std::io::Result<()> {
    let board = &config.board_name;

    writeln!(out, "=== COMPLETE {} Pin Analysis ===", board)?;
    writeln!(out, "Marlin-defined pins used on {}:", board)?;
    for marlin in &analysis.marlin_pins {
        writeln!(out, "P{} - {}", marlin.pin, marlin.name)?;
    }
    writeln!(out)?;
    writeln!(out, "Total Marlin pins: {}", analysis.marlin_pins.len())?;

    writeln!(out)?;
    writeln!(out, "Common pins (all boards):")?;
    for common in &analysis.common_pins {
        writeln!(out, "P{} - {}", common.pin, common.name)?;
    }

    writeln!(out)?;
    writeln!(out, "=== FREE PINS ANALYSIS ===")?;
    writeln!(
        out,
        "{} has ports {}-{} with pins 0-{} each",
        config.mcu_name,
        Port::A,
        Port::G,
        PINS_PER_PORT - 1
    )?;
    writeln!(out)?;
    writeln!(out, "Total pins used: {}", analysis.used.len())?;
    writeln!(out, "Total free pins: {}", analysis.free.len())?;
    writeln!(out)?;
    writeln!(out, "Free pins by port:")?;
    write_ports(out, &analysis.free_by_port())?;

    writeln!(out)?;
    writeln!(out, "=== RECOMMENDED FREE PINS FOR PROJECTS ===")?;
    writeln!(out, "Best options for new functionality:")?;
    writeln!(out)?;
    writeln!(out, "Recommended free pins ({} total):", analysis.recommended.len())?;
    write_ports(out, &analysis.recommended_by_port())?;

    writeln!(out)?;
    writeln!(out, "=== ADC-CAPABLE FREE PINS ===")?;
    writeln!(out, "These pins can be used for analog sensors:")?;
    for adc in &analysis.adc {
        writeln!(out, "  {} ({})", adc.pin, adc.channel)?;
    }
    Ok(())
}

fn write_ports<W: Write>(out: &mut W, ports: &[(Port, Vec<u32>)]) -> std::io::Result<()> {
    for (port, numbers) in ports {
        writeln!(out, "Port {}: {:?}", port, numbers)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    board: &'a str,
    mcu: &'a str,
    marlin_pins: &'a [MarlinPin],
    common_pins: &'a [CommonPin],
    used: &'a BTreeSet<PinLabel>,
    free: &'a [PinId],
    free_by_port: BTreeMap<String, Vec<u32>>,
    recommended: &'a [PinId],
    recommended_by_port: BTreeMap<String, Vec<u32>>,
    adc: Vec<JsonAdcPin>,
}

#[derive(Serialize)]
struct JsonAdcPin {
    pin: PinId,
    channel: String,
}

impl From<&AdcPin> for JsonAdcPin {
    fn from(adc: &AdcPin) -> Self {
        Self { pin: adc.pin, channel: adc.channel.to_string() }
    }
}

fn port_map(ports: Vec<(Port, Vec<u32>)>) -> BTreeMap<String, Vec<u32>> {
    ports.into_iter().map(|(port, numbers)| (port.to_string(), numbers)).collect()
}

pub fn write_json<W: Write>(
    analysis: &PinAnalysis,
    config: &Config,
    out: &mut W,
) -> Result<(), AnalysisError> {
    let report = JsonReport {
        board: &config.board_name,
        mcu: &config.mcu_name,
        marlin_pins: &analysis.marlin_pins,
        common_pins: &analysis.common_pins,
        used: &analysis.used,
        free: &analysis.free,
        free_by_port: port_map(analysis.free_by_port()),
        recommended: &analysis.recommended,
        recommended_by_port: port_map(analysis.recommended_by_port()),
        adc: analysis.adc.iter().map(JsonAdcPin::from).collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
