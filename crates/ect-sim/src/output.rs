//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use ect_core::{ContractionConfig, ControllerConfig, GainLimitConfig, Saturation};
use ect_core::build_info::BuildIdentity;
use ect_sim::{Preset, RunReport, Scenario, StepRecord, TargetSignal};
use serde_json::json;

fn print_json(value: &serde_json::Value, what: &str) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format {} as JSON: {}", what, e),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    print_json(&error_json, "error");
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print the preset table
pub fn print_presets(json: bool) {
    if json {
        let presets: Vec<_> = Preset::ALL
            .iter()
            .map(|preset| {
                let scenario = preset.scenario();
                json!({
                    "name": preset.name(),
                    "description": preset.description(),
                    "steps": scenario.steps,
                    "controller": scenario.controller,
                })
            })
            .collect();
        print_json(&json!({ "success": true, "presets": presets }), "preset list");
        return;
    }

    println!("{}", "Available presets:".bold());
    for preset in Preset::ALL {
        println!("  {:<20} {}", preset.name().cyan(), preset.description());
    }
}

/// Print a completed run
pub fn print_run(scenario: &Scenario, report: &RunReport, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "scenario": scenario,
            "summary": report.summary,
            "records": report.records,
        });
        print_json(&output, "run report");
        return;
    }

    println!(
        "{} | target={} | {}{}",
        scenario.name.bold(),
        describe_target(scenario),
        describe_controller(&scenario.controller),
        if scenario.noise.is_some() {
            " | noise=deterministic_sine_mix"
        } else {
            ""
        }
    );

    let with_noise = scenario.noise.is_some();
    for record in &report.records {
        print_step(record, with_noise);
    }

    let summary = &report.summary;
    println!();
    println!(
        "{} {} steps | final error={:.6} | max |u|={:.6} | saturated={} (longest streak {})",
        "Summary:".bold(),
        summary.steps,
        summary.final_error,
        summary.max_abs_command,
        summary.saturated_steps,
        summary.longest_saturation_streak
    );
}

fn print_step(record: &StepRecord, with_noise: bool) {
    let noise = if with_noise {
        format!(" | noise={:>10.6}", record.noise)
    } else {
        String::new()
    };
    println!(
        "Step {:>3} | target={:>12.6}{} | delta={:>12.6} | u={:>10.6} | pos={:>12.6} | {}",
        record.step,
        record.target,
        noise,
        record.delta,
        record.command,
        record.measured,
        saturation_label(record.saturation)
    );
}

fn saturation_label(saturation: Saturation) -> ColoredString {
    match saturation {
        Saturation::Free => saturation.label().green(),
        Saturation::AtMin | Saturation::AtMax => saturation.label().yellow(),
    }
}

fn describe_controller(config: &ControllerConfig) -> String {
    let ContractionConfig::Linear { alpha } = config.contraction;
    let GainLimitConfig::Linear {
        gain, u_min, u_max, ..
    } = config.gain_limit;
    format!("alpha={} | gain={} | bounds=[{}, {}]", alpha, gain, u_min, u_max)
}

fn describe_target(scenario: &Scenario) -> String {
    match scenario.target {
        TargetSignal::Constant { value } => format!("{}", value),
        TargetSignal::RampSine {
            base,
            ramp_rate,
            amplitude,
            omega,
        } => format!(
            "{} + {}·k + {}·sin({}·k)",
            base, ramp_rate, amplitude, omega
        ),
    }
}

/// Print the build identity
pub fn print_identity(identity: &BuildIdentity, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "identity": identity,
            "version_compact": identity.version_compact(),
        });
        print_json(&output, "identity");
        return;
    }

    println!("{}", identity.to_string().bold());
    println!("  Version (compact): {:#08x}", identity.version_compact());
    println!("  Build ID: {}", identity.build_id);
}
