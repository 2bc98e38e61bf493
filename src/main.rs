//! CLI entry point for gdms — a Grandstream Device Management System client.
//!
//! Logs in with the password grant, then dispatches one API operation per
//! invocation based on the selected subcommand. Demonstrates the intended
//! call order: login first, then org/site/device listings and device
//! operations.
//!
//! Exit codes:
//! - 0: success (vendor retCode 0)
//! - 1: runtime error (auth failure, API error, vendor error code)
//! - 2: argument validation error (clap handles this automatically)

use std::process::ExitCode;

use clap::Parser;

use gdms::auth::{hash_password, Credentials};
use gdms::client::{GdmsClient, Region};
use gdms::response::ApiResponse;
use gdms::{device, org, task};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Numeric GDMS developer API ID ("Client ID" in the portal).
    #[arg(long)]
    api_id: i64,

    /// GDMS secret key. Prefer setting via the GDMS_SECRET_KEY environment
    /// variable to avoid exposing the secret in process listings and shell
    /// history.
    #[arg(long, env = "GDMS_SECRET_KEY")]
    secret_key: String,

    /// GDMS account username (not the email address).
    #[arg(long)]
    username: String,

    /// GDMS account password. Hashed to the vendor's wire form before it
    /// leaves this process. Prefer the GDMS_PASSWORD environment variable.
    #[arg(long, env = "GDMS_PASSWORD")]
    password: String,

    /// Use the European Union region (eu.gdms.cloud) instead of the US
    /// region (www.gdms.cloud).
    #[arg(long)]
    eu: bool,

    /// Skip TLS certificate verification. Only for lab environments with
    /// intercepting proxies.
    #[arg(long)]
    insecure: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// List organizations.
    Orgs,

    /// List sites, optionally scoped to one organization.
    Sites {
        /// Organization to list sites for; defaults to the default org.
        #[arg(long)]
        org_id: Option<i64>,
    },

    /// List devices.
    Devices,

    /// Add a device to GDMS.
    AddDevice {
        /// MAC address, with or without colons.
        mac: String,
        /// Device serial number.
        sn: String,
        /// Site the device belongs to.
        site_id: i64,
        /// Display name for the device.
        #[arg(long)]
        device_name: Option<String>,
        /// Organization to add the device under.
        #[arg(long)]
        org_id: Option<i64>,
    },

    /// Edit a device — with unchanged fields, this views current details,
    /// including for offline devices.
    EditDevice {
        /// MAC address, with or without colons.
        mac: String,
        /// Device serial number.
        sn: String,
        /// Site the device belongs to.
        site_id: i64,
        /// Display name for the device.
        #[arg(long)]
        device_name: Option<String>,
        /// Organization the device belongs to.
        #[arg(long)]
        org_id: Option<i64>,
    },

    /// Fetch device details (online devices only).
    Detail {
        /// MAC address of the device.
        mac: String,
        /// Retrieve the info submitted by a previous call instead of
        /// submitting a new request (must follow within one minute).
        #[arg(long)]
        followup: bool,
    },

    /// Show the registration status of a device's SIP accounts.
    AccountStatus {
        /// MAC address of the device.
        mac: String,
    },

    /// Show the configuration of a device's SIP accounts.
    AccountConfig {
        /// MAC address of the device.
        mac: String,
    },

    /// Reboot a device.
    Reboot {
        /// MAC address of the device.
        mac: String,
        /// Organization the device belongs to.
        #[arg(long)]
        org_id: Option<i64>,
    },

    /// Factory-reset a device. The device loses all local configuration.
    FactoryReset {
        /// MAC address of the device.
        mac: String,
        /// Organization the device belongs to.
        #[arg(long)]
        org_id: Option<i64>,
    },
}

/// Prints the envelope: payload as pretty JSON on success, the vendor
/// error code and message on failure.
fn print_response(resp: &ApiResponse) -> ExitCode {
    if !resp.is_ok() {
        eprintln!(
            "GDMS error {}: {}",
            resp.ret_code,
            resp.msg.as_deref().unwrap_or("unknown")
        );
        return ExitCode::FAILURE;
    }
    match &resp.data {
        Some(data) => {
            let pretty =
                serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
            println!("{pretty}");
        }
        None => println!("{}", resp.msg.as_deref().unwrap_or("success")),
    }
    ExitCode::SUCCESS
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let region = if args.eu { Region::Eu } else { Region::Us };
    let credentials = Credentials::new(
        args.api_id,
        &args.secret_key,
        &args.username,
        &hash_password(&args.password),
    );
    let client = if args.insecure {
        GdmsClient::insecure(credentials, region)
    } else {
        GdmsClient::new(credentials, region)
    };

    if let Err(e) = client.login().await {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let result = match &args.command {
        Command::Orgs => org::list_organizations(&client).await,
        Command::Sites { org_id } => org::list_sites(&client, *org_id).await,
        Command::Devices => device::list_devices(&client).await,
        Command::AddDevice {
            mac,
            sn,
            site_id,
            device_name,
            org_id,
        } => {
            let mut spec = device::DeviceSpec::new(mac, sn, *site_id);
            spec.device_name = device_name.clone();
            spec.org_id = *org_id;
            device::add_device(&client, &spec).await
        }
        Command::EditDevice {
            mac,
            sn,
            site_id,
            device_name,
            org_id,
        } => {
            let mut spec = device::DeviceSpec::new(mac, sn, *site_id);
            spec.device_name = device_name.clone();
            spec.org_id = *org_id;
            device::edit_device(&client, &spec).await
        }
        Command::Detail { mac, followup } => device::device_detail(&client, mac, !followup).await,
        Command::AccountStatus { mac } => device::account_status(&client, mac).await,
        Command::AccountConfig { mac } => device::account_config(&client, mac).await,
        Command::Reboot { mac, org_id } => task::reboot_device(&client, mac, *org_id).await,
        Command::FactoryReset { mac, org_id } => {
            task::factory_reset_device(&client, mac, *org_id).await
        }
    };

    match result {
        Ok(resp) => print_response(&resp),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
