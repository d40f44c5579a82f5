// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::{anyhow, bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use tonal::config::TheoryConfig;
use tonal::music::midi_to_name;
use tonal::pattern::{Degree, Loop, Pattern, Sequence};
use tonal::{ChordRegistry, Key, ScaleRegistry};
use tracing::{debug, Level};

fn print_usage() {
    println!("TONAL - Scales, keys and voice leading");
    println!();
    println!("Usage: tonal [--config FILE] [-v] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  --list-scales                       List registered scales");
    println!("  --list-chords                       List registered chords");
    println!("  --key <TONIC> <SCALE>               Show a key's pitch classes and degrees");
    println!("  --nearest <TONIC> <SCALE> <PITCH>   Snap a pitch into a key");
    println!("  --voiceleading <T1> <S1> <T2> <S2>  Pair pitch classes between two keys");
    println!("  --distance <T1> <S1> <T2> <S2>      Voice-leading distance between two keys");
    println!("  --fade <T1> <S1> <T2> <S2> <LEVEL>  Blend the first key toward the second");
    println!("  --random-key [SEED]                 Pick a random key");
    println!("  --pattern <TONIC> <SCALE> <DEGREES> Play a comma-separated degree loop twice");
    println!("  --help                              Show this help message");
    println!();
    println!("Options:");
    println!("  --config <FILE>   Load extra scales, chords and a key (YAML or TOML)");
    println!("  -v                Verbose logging");
}

/// Registries and configured key shared by all commands
struct Session {
    scales: ScaleRegistry,
    chords: ChordRegistry,
    key: Option<Key>,
}

impl Session {
    fn new(config_path: Option<&str>) -> Result<Self> {
        let scales = ScaleRegistry::with_builtins();
        let chords = ChordRegistry::with_builtins();
        let mut key = None;

        if let Some(path) = config_path {
            let config = TheoryConfig::load(path)?;
            config.apply(&scales, &chords)?;
            key = config.key(&scales)?;
        }

        debug!(scales = scales.len(), chords = chords.len(), "registries ready");
        Ok(Self { scales, chords, key })
    }

    fn key(&self, tonic: &str, scale: &str) -> Result<Key> {
        Key::parse(tonic, scale, &self.scales)
            .with_context(|| format!("Cannot build key {} {}", tonic, scale))
    }
}

fn require<'a>(args: &'a [String], count: usize, command: &str) -> Result<&'a [String]> {
    if args.len() < count {
        bail!("{} requires {} arguments (see --help)", command, count);
    }
    Ok(&args[..count])
}

fn list_scales(ctx: &Session) {
    for scale in ctx.scales.all() {
        println!("{}", scale);
    }
}

fn list_chords(ctx: &Session) {
    for chord in ctx.chords.all() {
        println!("{}", chord);
    }
}

fn show_key(key: &Key) {
    println!("{}", key);
    println!("Pitch classes: {:?}", key.pitch_classes());
    let degrees: Vec<String> = (0..=key.scale().len() as i32)
        .map(|d| {
            let pitch = key.get(d);
            midi_to_name(pitch).unwrap_or_else(|_| pitch.to_string())
        })
        .collect();
    println!("Degrees: {}", degrees.join(" "));
}

fn play_pattern(key: Key, degrees: &str) -> Result<()> {
    let values = degrees
        .split(',')
        .map(|d| d.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid degree list: {}", degrees))?;

    let inner = Sequence::new(values.clone())?.with_repeats(1);
    let mut pattern = Degree::new(Box::new(Loop::new(Box::new(inner)).with_count(2)), key);
    let names: Vec<String> = pattern
        .take_values(values.len() * 2)
        .into_iter()
        .map(|p| match p as i32 {
            tonal::REST => "rest".to_string(),
            pitch => midi_to_name(pitch).unwrap_or_else(|_| pitch.to_string()),
        })
        .collect();
    println!("{}", names.join(" "));
    Ok(())
}

fn run(ctx: &Session, command: &str, args: &[String]) -> Result<()> {
    match command {
        "--list-scales" => list_scales(ctx),
        "--list-chords" => list_chords(ctx),
        "--key" => {
            let a = require(args, 2, command)?;
            show_key(&ctx.key(&a[0], &a[1])?);
        }
        "--nearest" => {
            let a = require(args, 3, command)?;
            let key = ctx.key(&a[0], &a[1])?;
            let pitch: i32 = a[2]
                .parse()
                .map_err(|_| anyhow!("Invalid pitch: {}", a[2]))?;
            println!("{}", key.nearest_note(pitch));
        }
        "--voiceleading" | "--distance" | "--fade" => {
            let needed = if command == "--fade" { 5 } else { 4 };
            let a = require(args, needed, command)?;
            let from = ctx.key(&a[0], &a[1])?;
            let to = ctx.key(&a[2], &a[3])?;
            match command {
                "--voiceleading" => {
                    for (from_pc, to_pc) in from.voiceleading(&to) {
                        println!("{:>2} -> {:>2}", from_pc, to_pc);
                    }
                }
                "--distance" => println!("{}", from.distance(&to)),
                _ => {
                    let level: f64 = a[4]
                        .parse()
                        .map_err(|_| anyhow!("Invalid level: {}", a[4]))?;
                    println!("{:?}", from.fade_to(&to, level));
                }
            }
        }
        "--random-key" => {
            let mut rng = match args.first() {
                Some(seed) => StdRng::seed_from_u64(
                    seed.parse().map_err(|_| anyhow!("Invalid seed: {}", seed))?,
                ),
                None => StdRng::from_entropy(),
            };
            show_key(&Key::random(&ctx.scales, &mut rng)?);
        }
        "--pattern" => {
            let a = require(args, 3, command)?;
            play_pattern(ctx.key(&a[0], &a[1])?, &a[2])?;
        }
        "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown option: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let verbose = args.iter().any(|a| a == "-v");
    args.retain(|a| a != "-v");
    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let mut config_path = None;
    if let Some(i) = args.iter().position(|a| a == "--config") {
        if i + 1 >= args.len() {
            bail!("--config requires a file path");
        }
        config_path = Some(args.remove(i + 1));
        args.remove(i);
    }

    let ctx = Session::new(config_path.as_deref())?;

    let Some(command) = args.first() else {
        match &ctx.key {
            Some(key) => show_key(key),
            None => {
                println!("TONAL - Scales, keys and voice leading");
                println!("Run with --help for usage information");
            }
        }
        return Ok(());
    };

    run(&ctx, command, &args[1..])
}
