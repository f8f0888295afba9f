//! Dongle Lock command-line tool.
//!
//! `codelock serve` hosts a virtual dongle on a TCP port; `codelock get`
//! and `codelock set` run one-shot client sessions against it.

use clap::{Parser, Subcommand};
use codelock_client::{Client, ClientError};
use codelock_engine::{Engine, TransportError};
use codelock_protocol::{SlotIndex, SLOT_COUNT};
use codelock_runner::bridge;
use std::io;
use std::net::{SocketAddr, TcpStream};
use std::process::ExitCode;
use std::thread;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Default address the dongle is served on.
const DEFAULT_ADDR: &str = "127.0.0.1:4750";

#[derive(Parser)]
#[command(
    name = "codelock",
    about = "Virtual Dongle Lock: a serial access-code store served over TCP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Host a virtual dongle.
    Serve {
        /// Address to listen on (port 0 picks a free port).
        #[arg(long, default_value = DEFAULT_ADDR)]
        bind: SocketAddr,
    },

    /// Read the code stored in a slot.
    Get {
        /// Address of the served dongle.
        #[arg(long, default_value = DEFAULT_ADDR)]
        addr: SocketAddr,

        /// Slot number (1-3).
        #[arg(value_parser = parse_slot)]
        slot: SlotIndex,
    },

    /// Store a code into a slot.
    Set {
        /// Address of the served dongle.
        #[arg(long, default_value = DEFAULT_ADDR)]
        addr: SocketAddr,

        /// Slot number (1-3).
        #[arg(value_parser = parse_slot)]
        slot: SlotIndex,

        /// The code value (truncated by the device at its capacity).
        value: String,
    },
}

/// Parse a wire slot number (`1`-`3`) from the command line.
fn parse_slot(arg: &str) -> Result<SlotIndex, String> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(digit), None) => {
            SlotIndex::from_wire_digit(digit).ok_or_else(|| format!("slot must be 1-{}", SLOT_COUNT))
        }
        _ => Err(format!("slot must be 1-{}", SLOT_COUNT)),
    }
}

/// Errors the `serve` command can hit.
#[derive(Debug, Error)]
enum ServeError {
    /// Listener or runtime setup failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The interrupt handler could not be installed.
    #[error("failed to install interrupt handler: {0}")]
    Ctrlc(#[from] ctrlc::Error),

    /// The engine stopped on a transport fault.
    #[error("serial transport failed: {0}")]
    Transport(TransportError),
}

/// Host the virtual dongle until interrupted or the transport faults.
fn serve(bind: SocketAddr) -> Result<(), ServeError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let (serial_bridge, mut transport) = runtime.block_on(bridge::bind(bind))?;
    info!("dongle listening on {}", serial_bridge.local_addr());

    runtime.spawn(async move {
        if let Err(e) = serial_bridge.run().await {
            error!("bridge error: {}", e);
        }
    });

    // The engine runs synchronously on its own thread and reports back
    // once its transport goes terminal.
    let (done_sender, done_receiver) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        let mut engine = Engine::new();
        let result = engine.run(&mut transport);
        let _ = done_sender.send(result);
    });

    let (interrupt_sender, interrupt_receiver) = crossbeam_channel::bounded(1);
    ctrlc::set_handler(move || {
        let _ = interrupt_sender.send(());
    })?;

    crossbeam_channel::select! {
        recv(interrupt_receiver) -> _ => {
            info!("interrupt received, shutting down");
            runtime.shutdown_background();
            Ok(())
        }
        recv(done_receiver) -> result => match result {
            Ok(Err(err)) => Err(ServeError::Transport(err)),
            Ok(Ok(())) | Err(_) => Ok(()),
        }
    }
}

/// One-shot session: read a slot and print its code.
fn run_get(addr: SocketAddr, slot: SlotIndex) -> Result<(), ClientError> {
    let stream = TcpStream::connect(addr)?;
    let mut client = Client::new(stream);
    client.connect()?;
    let code = client.get_code(slot)?;
    client.disconnect()?;

    match code {
        Some(value) => println!("{}", value),
        None => println!("(not set)"),
    }
    Ok(())
}

/// One-shot session: store a code into a slot.
fn run_set(addr: SocketAddr, slot: SlotIndex, value: &str) -> Result<(), ClientError> {
    let stream = TcpStream::connect(addr)?;
    let mut client = Client::new(stream);
    client.connect()?;
    client.set_code(slot, value)?;
    client.disconnect()?;

    println!("saved");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Commands::Serve { bind } => serve(bind).map_err(Into::into),
        Commands::Get { addr, slot } => run_get(addr, slot).map_err(Into::into),
        Commands::Set { addr, slot, value } => run_set(addr, slot, &value).map_err(Into::into),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
