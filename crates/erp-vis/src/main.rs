mod bootstrap;
mod chooser;

use std::io::Write;

use anyhow::Result;
use erp_chart::render_chart;
use erp_chart::report::render_report;
use erp_core::chooser::PathChooser;
use erp_core::diagnostics::Diagnostics;
use erp_core::settings::Settings;
use erp_data::analysis::analyze_directory;

use crate::chooser::{ArgChooser, PromptChooser};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("ERP Vis v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Mode: {}, Format: {}", settings.mode, settings.format);

    let stdout = std::io::stdout();
    if settings.pick {
        let stdin = std::io::stdin();
        let mut chooser = PromptChooser::new(stdin.lock(), std::io::stderr());
        run(&settings, &mut chooser, &mut stdout.lock())
    } else {
        let mut chooser = ArgChooser::from_settings(&settings);
        run(&settings, &mut chooser, &mut stdout.lock())
    }
}

/// One full run: choose, analyse, report, chart.
///
/// "No directory" and "no data" are normal endings that print a message and
/// return `Ok`.
fn run(settings: &Settings, chooser: &mut dyn PathChooser, out: &mut dyn Write) -> Result<()> {
    let Some(dir) = chooser.choose_directory() else {
        writeln!(out, "No directory selected.")?;
        return Ok(());
    };

    let mut diags = Diagnostics::new();
    let result = match analyze_directory(&dir, settings.mode, &mut diags) {
        Ok(result) => result,
        Err(e) if e.is_empty_result() => {
            let tally = diags.tally();
            tracing::info!("{}", tally);
            writeln!(out, "No valid data found in any of the CSV files.")?;
            writeln!(out, "{}", tally)?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    writeln!(out, "{}", render_report(&result, settings.format)?)?;

    if settings.no_chart {
        tracing::debug!("chart rendering skipped");
        return Ok(());
    }

    let Some(path) = chooser.choose_save_path(&settings.output_path()) else {
        tracing::info!("no save path chosen, chart not written");
        return Ok(());
    };
    render_chart(&result, &path, settings.chart_size())?;
    writeln!(out, "Graph saved in '{}'", path.display())?;

    Ok(())
}
