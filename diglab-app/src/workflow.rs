use crate::config::RunRequest;
use anyhow::{Context, Result};
use diglab_core::{
    export,
    host::metabolism::MetabolismEngine,
    session::Session,
    settings::{convert_concentration, select_carbon_source, SettingsBuilder},
};
use diglab_schemas::{organism::Organism, settings::FermentationType};
use std::{fs, path::Path, path::PathBuf};

/// Drives one scripted shake-flask session end to end: initialize, report the
/// experiment details, resolve the carbon source, configure, run, export, and
/// return the result file path.
pub fn run_shake_flask(
    request: &RunRequest,
    output_dir: &Path,
    date_yymmdd: &str,
) -> Result<PathBuf> {
    match request.fermentation {
        FermentationType::Batch => {}
        FermentationType::Select => {
            anyhow::bail!("Select a fermentation type in the run request (only 'batch' is implemented)")
        }
        FermentationType::Continuous => {
            anyhow::bail!("Continuous fermentation is not implemented; use 'batch'")
        }
    }

    let organism: Organism = request
        .organism
        .parse()
        .context("Run request names an unsupported organism")?;
    let seed = request
        .seed
        .unwrap_or_else(|| date_yymmdd.parse().unwrap_or(0));

    let mut session = Session::new(date_yymmdd);
    session.initialize(
        organism,
        seed,
        request.lab_investment,
        request.total_budget,
        request.currency,
    )?;
    println!(
        "Experiment initialized: {} with an investment of {} {} (seed {}).",
        organism, request.lab_investment, request.currency, seed
    );

    print_experiment_details(&session)?;

    // Resolve the carbon source against the host's metabolite index.
    let model = session.host()?.metabolism.model().clone();
    let selection = select_carbon_source(
        &model,
        &request.carbon_source.filter,
        request.carbon_source.choice.as_deref(),
    )?;
    let conc_mm = convert_concentration(
        request.carbon_source.concentration,
        request.carbon_source.unit,
        selection.formula_weight,
    );
    println!(
        "Found exchange reaction \"{}\"; using {} at {} mM.",
        selection.exchange_id, selection.name, conc_mm
    );

    let mut settings = SettingsBuilder::new(organism)
        .with_experiment_id(&request.experiment_id)
        .with_temperatures(&request.batch.temperatures)
        .with_init_biomass(request.batch.init_biomass)
        .with_medium_volume_ml(request.batch.medium_volume_ml)
        .with_cultivation_time_h(request.batch.cultivation_time_h)
        .with_sampling_interval_h(request.batch.sampling_interval_h)
        .with_carbon_source(selection, conc_mm)
        .build()?;

    // Name the result file up front so the history record carries its path.
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;
    let path = output_dir.join(export::result_file_name(
        session.date(),
        organism,
        settings.init_biomass,
    ));
    settings.results = Some(path.clone());
    session.configure(settings)?;

    let result = session.run()?;
    println!(
        "Growth rate {:.3}/h at an uptake of {:.2} mmol/gCDW/h. Yield: {:.2} gCDW/mmol.",
        result.growth_rate_per_hr, result.uptake_rate, result.yield_gdw_per_mmol
    );
    println!(
        "Biomass capacity in flask: {:.2} OD600 ({:.3} gCDW).",
        result.capacity_od600, result.capacity_gdw
    );

    let mut table = export::ResultTableWriter::create(&path)
        .with_context(|| format!("Failed to create result file {:?}", path))?;
    table.write_temperature_growth(&result)?;
    println!("Data saved to {}", path.display());

    Ok(path)
}

/// Prints the experiment details: budget, model id, functional check,
/// optimal temperature, OD2X, history size, and a sample draw from the
/// host's deterministic generator.
fn print_experiment_details(session: &Session) -> Result<()> {
    let experiment = session.experiment()?;
    let host = session.host()?;
    let currency = session
        .currency()
        .map(|c| c.to_string())
        .unwrap_or_default();

    println!("--- Experiment Details ---");
    println!("Remaining budget: {} {}", experiment.budget(), currency);
    println!("Model file: {}", host.metabolism.model().id);
    match experiment.assert_functional(host) {
        Ok(_) => println!("Model is functional."),
        Err(_) => println!("Model is not functional."),
    }
    println!("Optimal Temperature: {} °C", host.opt_growth_temp());
    println!("OD2X: {} gCDW/OD600", host.growth.od2x);
    println!(
        "Experiment history: {} experiments recorded.",
        experiment.history().len()
    );
    let mut rnd = host.make_generator();
    println!("Sample draw: {:.6}", rnd.pick_uniform(0.0, 1.0));
    println!("--------------------------");
    Ok(())
}
