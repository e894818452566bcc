// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;

use anyhow::{anyhow, bail, Result};
use tracing_subscriber::EnvFilter;

use warmup::config::Settings;
use warmup::display::{DisplayFrame, KeyboardView};
use warmup::exercise::{Catalog, VocalPart};
use warmup::instrument::{LogOutput, MidiInstrument};
use warmup::music::pitch_name;
use warmup::sequencer::{schedule_with, ChordIntro, StartOutcome};
use warmup::timing::TokioClock;
use warmup::{expand, PlayOptions, VocalTrainer};

fn print_usage() {
    println!("warmup - Vocal Warmup Sequencer");
    println!();
    println!("Usage: warmup [--config <PATH>] [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --list-exercises              List the exercise catalog");
    println!("  --list-presets                List rhythm presets");
    println!("  --range <EX> <PART>           Show the keyboard range an exercise needs");
    println!("  --schedule <EX> <PART> [BPM]  Print the event timeline");
    println!("  --play <EX> <PART> [BPM]      Play an exercise (Ctrl+C to stop)");
    println!("      --preset <ID>             Apply a rhythm preset");
    println!("      --chords                  Play a chord before each repetition");
    println!("      --loop                    Repeat until stopped");
    println!("  --config <PATH>               Load settings from a YAML file");
    println!("  --help                        Show this help message");
    println!();
    println!("Parts: soprano, alto, tenor, bass. Set RUST_LOG=debug for event logs.");
}

/// Keyboard view printing one line per frame
struct ConsoleView;

impl KeyboardView for ConsoleView {
    fn render(&mut self, frame: &DisplayFrame) {
        if frame.active.is_empty() {
            return;
        }
        println!(
            "  {:<12} {}",
            frame.active_names().join(" "),
            frame.text.as_deref().unwrap_or("")
        );
    }
}

fn list_exercises(catalog: &Catalog) {
    println!("Exercises:");
    for exercise in catalog.exercises() {
        println!(
            "  {:<22} {:<30} {:<10} {} notes",
            exercise.id,
            exercise.name,
            exercise.kind.tag(),
            exercise.pattern.len()
        );
    }
}

fn list_presets() {
    println!("Rhythm presets:");
    for preset in warmup::exercise::list_rhythm_presets() {
        println!("  {:<12} {}", preset.id, preset.name);
    }
}

fn show_range(catalog: &Catalog, exercise_id: &str, part: VocalPart) -> Result<()> {
    let exercise = catalog.exercise(exercise_id)?;
    let range = catalog.vocal_range(part)?;
    let needed = warmup::project(exercise, range.root, range.display)?;

    println!("{} for {} (root {})", exercise.name, part, pitch_name(range.root));
    println!(
        "  base:   {} - {}",
        pitch_name(range.display.first),
        pitch_name(range.display.last)
    );
    println!(
        "  needed: {} - {} ({} keys)",
        pitch_name(needed.first),
        pitch_name(needed.last),
        needed.key_count()
    );
    Ok(())
}

fn print_schedule(
    settings: &Settings,
    catalog: &Catalog,
    exercise_id: &str,
    part: VocalPart,
    options: &PlayOptions,
) -> Result<()> {
    let exercise = catalog.exercise(exercise_id)?;
    let range = catalog.vocal_range(part)?;
    let instances = expand(exercise, range.root, options.rhythm.as_deref())?;
    let chord = options.chord_intro.then(|| ChordIntro::new(exercise.chord));
    let schedule = schedule_with(&settings.timing, &instances, options.tempo_bpm, chord)?;

    println!(
        "{}: {} instances, {} events, {:.2}s at {} BPM",
        exercise.name,
        instances.len(),
        schedule.len(),
        schedule.total_duration_millis as f64 / 1000.0,
        options.tempo_bpm
    );
    for event in &schedule.events {
        let pitches: Vec<String> = event.pitches.iter().map(|p| pitch_name(*p)).collect();
        println!(
            "  {:>7}ms  {:<15} {:<12} {}",
            event.at_millis,
            format!("{:?}", event.kind),
            pitches.join(" "),
            event.text.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn play(
    settings: &Settings,
    catalog: Catalog,
    exercise_id: &str,
    part: VocalPart,
    options: PlayOptions,
) -> Result<()> {
    let instrument = MidiInstrument::new(LogOutput::new());
    let mut trainer = VocalTrainer::new(catalog, instrument, ConsoleView, TokioClock)
        .with_timing(settings.timing.clone());
    trainer.controller_mut().set_velocity(settings.playback.velocity);

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(async {
        match trainer.play(exercise_id, part, options)? {
            StartOutcome::Started => {}
            outcome => bail!("Playback did not start: {:?}", outcome),
        }
        println!("Playing {} for {} (Ctrl+C to stop)...", exercise_id, part);

        let interrupted = tokio::select! {
            fired = trainer.run_until_idle() => {
                println!("Done ({} events)", fired);
                false
            }
            result = tokio::signal::ctrl_c() => {
                result?;
                true
            }
        };

        if interrupted {
            trainer.stop();
            println!();
            println!("Stopped");
        }
        Ok::<(), anyhow::Error>(())
    })
}

/// Pull `--name <value>` out of the argument list
fn take_option(args: &mut Vec<String>, name: &str) -> Result<Option<String>> {
    let Some(index) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    if index + 1 >= args.len() {
        bail!("{} requires a value", name);
    }
    let value = args.remove(index + 1);
    args.remove(index);
    Ok(Some(value))
}

/// Remove a bare `--flag`, returning whether it was present
fn take_flag(args: &mut Vec<String>, name: &str) -> bool {
    match args.iter().position(|a| a == name) {
        Some(index) => {
            args.remove(index);
            true
        }
        None => false,
    }
}

fn exercise_and_part(args: &[String], option: &str) -> Result<(String, VocalPart)> {
    if args.len() < 4 {
        eprintln!("Error: {} requires an exercise id and a vocal part", option);
        eprintln!("Use --list-exercises to see available exercises");
        std::process::exit(1);
    }
    let part: VocalPart = args[3].parse()?;
    Ok((args[2].clone(), part))
}

fn parse_bpm(args: &[String], default: f64) -> Result<f64> {
    match args.get(4) {
        Some(value) => value.parse().map_err(|_| anyhow!("Invalid tempo: {}", value)),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = env::args().collect();

    let settings = match take_option(&mut args, "--config")? {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if args.len() < 2 {
        println!("warmup - Vocal Warmup Sequencer");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--list-exercises" => {
            list_exercises(&settings.catalog()?);
        }
        "--list-presets" => {
            list_presets();
        }
        "--range" => {
            let (exercise, part) = exercise_and_part(&args, "--range")?;
            show_range(&settings.catalog()?, &exercise, part)?;
        }
        "--schedule" | "--play" => {
            let option = args[1].clone();
            let preset = take_option(&mut args, "--preset")?;
            let mut options = settings.play_options();
            options.chord_intro |= take_flag(&mut args, "--chords");
            options.looping |= take_flag(&mut args, "--loop");

            let (exercise, part) = exercise_and_part(&args, &option)?;
            options.tempo_bpm = parse_bpm(&args, options.tempo_bpm)?;

            let catalog = settings.catalog()?;
            if let Some(preset) = preset {
                let base = &catalog.exercise(&exercise)?.rhythm;
                options.rhythm = Some(warmup::exercise::rhythm_preset(&preset)?.apply(base));
            }

            if option == "--schedule" {
                print_schedule(&settings, &catalog, &exercise, part, &options)?;
            } else {
                play(&settings, catalog, &exercise, part, options)?;
            }
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
