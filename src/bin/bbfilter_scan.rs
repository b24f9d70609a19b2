use beam_background_filter::config::load_config;
use beam_background_filter::diagnostics::RunSummary;
use beam_background_filter::io::{load_events, write_json_file};
use beam_background_filter::qa::Histogram1D;
use beam_background_filter::{EventFlags, EventStatus, FilterOrchestrator, HistogramManager};
use serde::Serialize;
use std::env;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QaOutput<'a> {
    summary: &'a RunSummary,
    histograms: Vec<&'a Histogram1D>,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "usage: bbfilter_scan <config.json> <events.json> [qa_out.json]".to_string()
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let config_path = args.next().ok_or_else(usage)?;
    let events_path = args.next().ok_or_else(usage)?;
    let qa_out = args.next();

    let config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;
    let events = load_events(Path::new(&events_path)).map_err(|e| e.to_string())?;

    let mut module = FilterOrchestrator::initialize(config, Some(Box::new(HistogramManager::new())))
        .map_err(|e| e.to_string())?;

    let mut flags = EventFlags::new();
    let mut aborted = 0usize;
    for event in &events {
        flags.clear();
        if module.process_event(event, &mut flags) == EventStatus::Abort {
            aborted += 1;
        }
        if module.config().debug {
            let set: Vec<String> = flags.iter().map(|(k, v)| format!("{k}={v}")).collect();
            println!("event {}: {}", event.number, set.join(" "));
        }
    }

    let summary = module.end();
    print_text_summary(&summary, aborted);

    if let Some(path) = qa_out {
        let histograms = module.sink().map(|s| s.booked()).unwrap_or_default();
        let output = QaOutput {
            summary: &summary,
            histograms,
        };
        write_json_file(Path::new(&path), &output).map_err(|e| e.to_string())?;
        println!("\nQA report written to {path}");
    }
    Ok(())
}

fn print_text_summary(summary: &RunSummary, aborted: usize) {
    println!("Beam background summary ({})", summary.module);
    println!(
        "  {:<24} {:>10} {:>14} {:>18}",
        "filter", "all events", "no background", "background found"
    );
    for f in &summary.filters {
        println!(
            "  {:<24} {:>10} {:>14} {:>18}",
            f.filter, f.counts.seen, f.counts.no_background, f.counts.background
        );
    }
    println!(
        "  {:<24} {:>10} {:>14} {:>18}",
        "(any)", summary.totals.seen, summary.totals.no_background, summary.totals.background
    );
    println!(
        "  background fraction: {:.4}  aborted: {aborted}",
        summary.totals.background_fraction()
    );
}
