//! `xbee` command-line tool.
//!
//! Reads and writes AT registers and exchanges data packets with a radio
//! attached to a serial port in API mode (`AP=2`).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use xbee_api::{Action, Addressing, AtCommand, AtCommandResponse, DeviceAddress, NetworkAddress};
use xbee_serial::{list_ports, SerialConfig, SerialError, SerialTransport, XBee};

#[derive(Parser, Debug)]
#[command(name = "xbee", version, about = "Talk to an XBee radio in API mode")]
struct Cli {
    /// Serial port (overrides the config file).
    #[arg(short, long, global = true)]
    port: Option<String>,

    /// Baud rate (overrides the config file).
    #[arg(short, long, global = true)]
    baud: Option<u32>,

    /// YAML file with serial settings.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available serial ports.
    Ports,

    /// Read an AT register, e.g. `xbee at NI`.
    At {
        /// Two-letter command mnemonic.
        mnemonic: String,
    },

    /// Set the node identifier (NI), truncated to 20 characters.
    SetNodeId {
        text: String,
    },

    /// Send a message and report its delivery status.
    Send {
        /// 64-bit destination address in hex.
        #[arg(long)]
        dest: String,

        /// 16-bit network address in hex; FFFE if unknown.
        #[arg(long)]
        network: Option<String>,

        message: String,
    },

    /// Print received packets until nothing arrives for `timeout` seconds.
    Listen {
        #[arg(long, default_value_t = 5)]
        timeout: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::Ports = cli.command {
        return print_ports();
    }

    let config = load_config(&cli)?;
    let transport = SerialTransport::open(&config)
        .with_context(|| format!("failed to open {}", config.port))?;
    let mut xbee = XBee::new(transport);

    match cli.command {
        Command::Ports => Ok(()),
        Command::At { mnemonic } => read_register(&mut xbee, &mnemonic),
        Command::SetNodeId { text } => set_node_id(&mut xbee, text),
        Command::Send {
            dest,
            network,
            message,
        } => send(&mut xbee, &dest, network.as_deref(), &message),
        Command::Listen { timeout } => listen(&mut xbee, Duration::from_secs(timeout)),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<SerialConfig> {
    let mut config = match &cli.config {
        Some(path) => SerialConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SerialConfig::default(),
    };

    if let Some(port) = &cli.port {
        config.port = port.clone();
    }
    if let Some(baud) = cli.baud {
        config.baud_rate = baud;
    }

    debug!(?config, "serial settings");
    Ok(config)
}

fn print_ports() -> Result<()> {
    let ports = list_ports().context("failed to list ports")?;
    if ports.is_empty() {
        println!("No ports");
    }
    for port in ports {
        println!("{}", port);
    }
    Ok(())
}

fn print_response(response: &AtCommandResponse) {
    println!("{}: {}", response.mnemonic_str(), response.status);
    if response.data.is_empty() {
        return;
    }
    match response.value() {
        Some(value) => println!("  value: {}", value),
        None => println!("  data:  {}", hex::encode_upper(&response.data)),
    }
}

fn read_register(xbee: &mut XBee<SerialTransport>, mnemonic: &str) -> Result<()> {
    let command = AtCommand::parse_mnemonic(&mnemonic.to_ascii_uppercase())?;
    info!("reading {}", command);

    let response = xbee.query(&command)?;
    print_response(&response);
    Ok(())
}

fn set_node_id(xbee: &mut XBee<SerialTransport>, text: String) -> Result<()> {
    if text.chars().count() > xbee_api::MAX_NODE_IDENTIFIER_LEN {
        warn!(
            "node identifier longer than {} characters will be truncated",
            xbee_api::MAX_NODE_IDENTIFIER_LEN
        );
    }

    let command = AtCommand::Addressing(Addressing::NodeIdentifier(Action::Write(text)));
    let response = xbee.query(&command)?;
    if !response.is_ok() {
        bail!("radio rejected NI: {}", response.status);
    }

    let response = xbee.query(&AtCommand::Addressing(Addressing::NodeIdentifier(Action::Read)))?;
    print_response(&response);
    Ok(())
}

fn parse_hex<const N: usize>(text: &str) -> Result<u64> {
    let digits = text.trim_start_matches("0x").trim_start_matches("0X");
    if digits.is_empty() || digits.len() > N * 2 {
        bail!("expected up to {} hex digits, got {:?}", N * 2, text);
    }
    u64::from_str_radix(digits, 16).with_context(|| format!("invalid hex address {:?}", text))
}

fn send(
    xbee: &mut XBee<SerialTransport>,
    dest: &str,
    network: Option<&str>,
    message: &str,
) -> Result<()> {
    let destination = DeviceAddress::new(parse_hex::<8>(dest)?);
    let network = match network {
        Some(text) => NetworkAddress::new(parse_hex::<2>(text)? as u16),
        None => NetworkAddress::UNKNOWN_OR_BROADCAST,
    };

    info!("sending {} bytes to {} ({})", message.len(), destination, network);
    xbee.send_transmit_request(destination, network, message.as_bytes())?;

    let status = xbee.read_transmit_status()?;
    println!(
        "delivery: {:?}, retries: {}, discovery: {:?}",
        status.delivery, status.retry_count, status.discovery
    );
    if !status.is_success() {
        bail!("packet was not delivered");
    }
    Ok(())
}

fn listen(xbee: &mut XBee<SerialTransport>, timeout: Duration) -> Result<()> {
    info!("listening, giving up after {:?} of silence", timeout);

    loop {
        match xbee.read_receive_packet(timeout) {
            Ok(packet) => {
                println!("{} ({}): {}", packet.source, packet.network, packet.text());
            }
            Err(SerialError::Timeout(_)) => {
                info!("no more packets");
                return Ok(());
            }
            Err(err) if err.is_recoverable() => warn!("skipping frame: {}", err),
            Err(err) => return Err(err.into()),
        }
    }
}
