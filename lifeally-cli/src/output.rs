use crate::args::OutputFormat;
use crate::commands::ModelSummary;
use colored::*;
use lifeally::pipeline::PipelineOutput;
use serde::Serialize;
use serde_json::json;

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn domain() -> Color {
        Color::TrueColor {
            r: 168,
            g: 85,
            b: 247,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".color(CliColors::success()), msg)
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".color(CliColors::error()), msg)
}

pub fn format_info(msg: &str) -> String {
    format!("{} {}", "ℹ".color(CliColors::info()), msg)
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

pub fn output_error(error_msg: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let error_response = json!({
                "error": true,
                "message": error_msg,
                "timestamp": chrono::Utc::now().to_rfc3339()
            });
            println!("{}", to_json(&error_response));
        }
        OutputFormat::Text => eprintln!("{}", format_error(error_msg)),
    }
}

pub fn print_pipeline_output(output: &PipelineOutput, format: OutputFormat) {
    if format == OutputFormat::Json {
        println!("{}", to_json(output));
        return;
    }

    if output.raw_output.is_empty() {
        println!("{}", format_info("No models were run"));
    }
    for (key, prediction) in &output.raw_output {
        let value = match prediction {
            Some(prediction) => prediction.to_string().bold().to_string(),
            None => "no prediction".color(CliColors::muted()).to_string(),
        };
        println!("  {}: {}", key.display_name(), value);
    }

    if let Some(profile) = output.updated_profile.as_ref().filter(|p| !p.is_empty()) {
        println!();
        println!("{}", "Known profile".color(CliColors::muted()));
        for (name, value) in profile.iter() {
            println!("  {} = {}", name, value);
        }
    }

    println!();
    println!("{}", output.result_text);
    println!(
        "{}",
        format!("({})", output.model_version).color(CliColors::muted())
    );
}

pub fn print_models(models: &[ModelSummary], format: OutputFormat) {
    if format == OutputFormat::Json {
        println!("{}", to_json(&models));
        return;
    }

    if models.is_empty() {
        println!("{}", format_info("No models loaded"));
        return;
    }

    println!("{}", format_success(&format!("{} models loaded", models.len())));
    for model in models {
        println!(
            "  {} {} {}",
            model.key.as_str().bold(),
            format!("[{}]", model.domain).color(CliColors::domain()),
            model.name.color(CliColors::muted())
        );
        match &model.features {
            Some(features) => println!("      features: {}", features.join(", ")),
            None => println!("      {}", "text model (raw query)".color(CliColors::muted())),
        }
    }
}
