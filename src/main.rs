//! twistmap - Map banks of MIDI rotary encoders to typed parameters

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use twistmap::config;
use twistmap::midi::{self, SurfaceInput};
use twistmap::router::{BindingTable, Router};

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config: config_path } => {
            println!("Loading configuration from {:?}...", config_path);
            let cfg = config::load_config(&config_path)?;

            let mut params = cfg.build_params();
            let table = BindingTable::from_config(&cfg.banks, &params)?;
            let router = Router::new(table, cfg.channels.clone());

            println!(
                "Mapping {} bank(s), {} parameter(s)",
                router.bank_count(),
                params.len()
            );

            let input = SurfaceInput::connect(cfg.midi.port.as_deref())?;
            println!("Listening on: {}", input.port_name());
            println!("Press Ctrl-C to stop.");

            let running = Arc::new(AtomicBool::new(true));
            let r = running.clone();
            ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))?;

            // One event at a time, in arrival order
            while running.load(Ordering::SeqCst) {
                match input.events().recv_timeout(Duration::from_millis(100)) {
                    Ok(event) => router.handle_event(&event, &mut params),
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }

            println!("\nStopped.");
        }

        Commands::Check { config: config_path } => {
            println!("Checking configuration at {:?}...", config_path);

            let result = config::load_config(&config_path).and_then(|cfg| {
                let params = cfg.build_params();
                let table = BindingTable::from_config(&cfg.banks, &params)?;
                Ok((cfg, params, table))
            });

            match result {
                Ok((cfg, params, table)) => {
                    println!("Configuration is valid!");
                    match &cfg.midi.port {
                        Some(port) => println!("  MIDI port: {}", port),
                        None => println!("  MIDI port: (first available)"),
                    }
                    println!("  Parameters: {}", params.len());
                    for param in &cfg.parameters {
                        println!("    - {} ({})", param.name, param.kind.to_value().kind());
                    }
                    println!(
                        "  Banks: {} ({} bound encoder(s))",
                        table.bank_count(),
                        table.bound_count()
                    );
                }
                Err(e) => {
                    println!("Configuration is invalid: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Ports => {
            let ports = midi::list_midi_ports()?;
            if ports.is_empty() {
                println!("No MIDI input ports available.");
            } else {
                println!("Available MIDI input ports:\n");
                for port in ports {
                    println!("  - {}", port);
                }
            }
        }

        Commands::Init => {
            let example_config = include_str!("../twistmap.example.yaml");

            let path = "twistmap.yaml";
            if std::path::Path::new(path).exists() {
                println!("twistmap.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, example_config)?;
                println!("Created twistmap.yaml with example configuration.");
            }
        }
    }

    Ok(())
}
