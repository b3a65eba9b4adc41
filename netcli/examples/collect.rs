//! Collect command output from a telnet device.
//!
//! Opens a session, logs in, runs the configured after-login commands plus
//! any `--command` given on the command line, then runs the before-logout
//! commands and closes.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example collect -- --host 192.0.2.1 --user admin --password secret \
//!     --command "show version" --command "show interfaces brief"
//! ```
//!
//! A JSON configuration file can supply prompts and command lists:
//!
//! ```bash
//! cargo run --example collect -- --host 192.0.2.1 --user admin --password secret \
//!     --config device.json --profile dlink
//! ```

use std::env;
use std::time::Duration;

use netcli::{Session, SessionConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => serde_json::from_str::<SessionConfig>(&std::fs::read_to_string(path)?)?,
        None => SessionConfig::default(),
    };

    let mut builder = Session::builder(&args.host)
        .port(args.port)
        .config(config)
        .label("user", args.user.as_str());
    if let Some(timeout) = args.timeout {
        builder = builder.conn_timeout(Duration::from_secs(timeout));
    }
    if let Some(profile) = &args.profile {
        builder = builder.prompt_profile(profile);
    }
    let mut session = builder.build()?;

    println!("Connecting to {}...", session.address());
    session.open().await?;

    if let Err(e) = session.login(&args.user, &args.password).await {
        eprintln!("Login failed: {}", e);
        eprintln!("{}", session.transcript());
        session.close().await?;
        std::process::exit(1);
    }
    println!("Logged in ({})", session.status());

    for response in session.run_after_login_commands().await? {
        println!("[{}] done in {:?}", response.command, response.elapsed);
    }

    for command in &args.commands {
        let response = session.send_command(command).await?;
        println!("\n{} {}", response.prompt, command);
        println!("{}", "-".repeat(50));
        println!("{}", response.body());
        println!("{}", "-".repeat(50));
        println!("Completed in {:?}", response.elapsed);
    }

    session.ping().await?;
    session.run_before_logout_commands(None).await?;

    println!("\nClosing connection...");
    session.close().await?;
    println!("Done!");

    Ok(())
}

/// Simple argument parser
struct Args {
    host: String,
    port: u16,
    user: String,
    password: String,
    timeout: Option<u64>,
    config: Option<String>,
    profile: Option<String>,
    commands: Vec<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut host = "localhost".to_string();
        let mut port = 23u16;
        let mut user = env::var("USER").unwrap_or_else(|_| "admin".to_string());
        let mut password = String::new();
        let mut timeout = None;
        let mut config = None;
        let mut profile = None;
        let mut commands = Vec::new();

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1).cloned();
            match args[i].as_str() {
                "--host" | "-h" => host = value.unwrap_or(host),
                "--port" | "-p" => port = value.and_then(|v| v.parse().ok()).unwrap_or(23),
                "--user" | "-u" => user = value.unwrap_or(user),
                "--password" | "-P" => password = value.unwrap_or_default(),
                "--timeout" | "-t" => timeout = value.and_then(|v| v.parse().ok()),
                "--config" | "-c" => config = value,
                "--profile" => profile = value,
                "--command" | "-C" => commands.extend(value),
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown argument: {}", other);
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }

        Self {
            host,
            port,
            user,
            password,
            timeout,
            config,
            profile,
            commands,
        }
    }

    fn print_help() {
        println!(
            r#"netcli collect example

USAGE:
    cargo run --example collect -- [OPTIONS]

OPTIONS:
    -h, --host <HOST>        Target host [default: localhost]
    -p, --port <PORT>        Telnet port [default: 23]
    -u, --user <USER>        Login name [default: $USER]
    -P, --password <PASS>    Password
    -t, --timeout <SECS>     Connect and read timeout [default: from config]
    -c, --config <PATH>      JSON session configuration
        --profile <NAME>     Prompt profile from the configuration
    -C, --command <CMD>      Command to run (repeatable)
    --help                   Print this help message
"#
        );
    }
}
