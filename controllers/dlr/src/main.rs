//! nsx-dlr
//!
//! Command line front end for the distributed router lifecycle. Endpoints,
//! credentials and the appliance placement come from the environment (see
//! `DlrConfig`); the router itself is described on the command line.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use dlr::{
    ApplianceSize, CreatedRouter, DefaultRouteStatus, DlrConfig, DlrError, LookupKind, RouterLifecycleManager,
    RouterListing, RouterSpec,
};
use nsx_client::NsxClient;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use vcenter_client::VCenterConnector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Command {
    Create,
    Read,
    Delete,
    List,
}

/// Create, read, delete and list NSX distributed logical routers
#[derive(Parser, Debug)]
#[command(name = "nsx-dlr", version, about, long_about = None)]
struct Args {
    /// Operation to perform
    #[arg(value_enum)]
    command: Command,

    /// Print full JSON documents
    #[arg(short, long)]
    verbose: bool,

    /// Log HTTP transactions
    #[arg(short, long)]
    debug: bool,

    /// Router name
    #[arg(short, long)]
    name: Option<String>,

    /// Password of the router's CLI admin user
    #[arg(short = 'p', long = "dlrpassword")]
    dlr_password: Option<String>,

    /// Control appliance size
    #[arg(short = 's', long = "dlrsize", default_value_t = ApplianceSize::Compact)]
    dlr_size: ApplianceSize,

    /// Segment for the HA / management interface (port group or logical switch)
    #[arg(long = "ha-ls")]
    ha_ls: Option<String>,

    /// Segment for the uplink interface (port group or logical switch)
    #[arg(long = "uplink-ls")]
    uplink_ls: Option<String>,

    #[arg(long = "uplink-ip")]
    uplink_ip: Option<Ipv4Addr>,

    #[arg(long = "uplink-subnet")]
    uplink_subnet: Option<Ipv4Addr>,

    /// Default gateway; no routing configuration is sent without it
    #[arg(long = "uplink-dgw")]
    uplink_dgw: Option<Ipv4Addr>,
}

/// A validated command line
#[derive(Debug)]
enum Request {
    Create(RouterSpec),
    Read(String),
    Delete(String),
    List,
}

impl Args {
    /// Validate the arguments the command needs; nothing is contacted yet.
    fn request(&self) -> Result<Request, DlrError> {
        match self.command {
            Command::Create => Ok(Request::Create(self.build_spec()?)),
            Command::Read => Ok(Request::Read(self.required_name("read")?)),
            Command::Delete => Ok(Request::Delete(self.required_name("delete")?)),
            Command::List => Ok(Request::List),
        }
    }

    fn required_name(&self, command: &str) -> Result<String, DlrError> {
        self.name
            .clone()
            .ok_or_else(|| DlrError::InvalidConfig(format!("{} requires --name", command)))
    }

    fn build_spec(&self) -> Result<RouterSpec, DlrError> {
        fn required<T: Clone>(value: &Option<T>, flag: &str) -> Result<T, DlrError> {
            value
                .clone()
                .ok_or_else(|| DlrError::InvalidConfig(format!("create requires {}", flag)))
        }

        Ok(RouterSpec {
            name: required(&self.name, "--name")?,
            admin_password: required(&self.dlr_password, "--dlrpassword")?,
            size: self.dlr_size,
            ha_segment: required(&self.ha_ls, "--ha-ls")?,
            uplink_segment: required(&self.uplink_ls, "--uplink-ls")?,
            uplink_ip: required(&self.uplink_ip, "--uplink-ip")?,
            uplink_subnet: required(&self.uplink_subnet, "--uplink-subnet")?,
            default_gateway: self.uplink_dgw,
        })
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn manager(config: DlrConfig) -> Result<RouterLifecycleManager, DlrError> {
    let nsx = NsxClient::new(
        config.nsx.manager,
        config.nsx.username,
        config.nsx.password,
        config.nsx.accept_invalid_certs,
    )?;
    let inventory = VCenterConnector::new(
        &config.vcenter.host,
        config.vcenter.user,
        config.vcenter.password,
        config.vcenter.port,
        config.vcenter.accept_invalid_certs,
    );

    Ok(RouterLifecycleManager::new(Arc::new(nsx), Arc::new(inventory), config.placement))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let request = args.request()?;

    let config = DlrConfig::from_env()?;
    debug!("NSX Manager: {}", config.nsx.manager);
    debug!("vCenter: {}:{}", config.vcenter.host, config.vcenter.port);
    let manager = manager(config)?;

    match request {
        Request::Create(spec) => {
            let created = manager
                .create(&spec)
                .await
                .with_context(|| format!("failed to create distributed router {}", spec.name))?;
            println!("{}", describe_created(&spec.name, &created, args.verbose)?);
        }
        Request::Read(name) => {
            let record = manager
                .read(&name)
                .await?
                .ok_or_else(|| DlrError::not_found(LookupKind::Router, name.as_str()))?;
            if args.verbose {
                println!("{}", serde_json::to_string_pretty(&record.detail)?);
            } else {
                println!("{} {}", name, record.id);
            }
        }
        Request::Delete(name) => match manager.delete(&name).await? {
            Some(id) => println!("Deleted distributed router {} ({})", name, id),
            None => println!("Distributed router {} does not exist", name),
        },
        Request::List => {
            let listing = manager.list().await?;
            if args.verbose {
                println!("{}", serde_json::to_string_pretty(&listing.details)?);
            } else {
                print!("{}", listing_table(&listing));
            }
        }
    }

    info!("Done");
    Ok(())
}

fn describe_created(name: &str, created: &CreatedRouter, verbose: bool) -> anyhow::Result<String> {
    if verbose {
        let default_route = match &created.default_route {
            DefaultRouteStatus::NotRequested => serde_json::json!("not requested"),
            DefaultRouteStatus::Applied => serde_json::json!("applied"),
            DefaultRouteStatus::Failed(e) => serde_json::json!({ "failed": e.to_string() }),
        };
        let document = serde_json::json!({
            "name": name,
            "id": created.id,
            "location": created.location,
            "defaultRoute": default_route,
        });
        return Ok(serde_json::to_string_pretty(&document)?);
    }

    let mut line = format!("Created distributed router {} ({})", name, created.id);
    if let DefaultRouteStatus::Failed(e) = &created.default_route {
        line.push_str(&format!("; default route not applied: {}", e));
    }
    Ok(line)
}

fn listing_table(listing: &RouterListing) -> String {
    let width = listing
        .routers
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut table = format!("{:<width$}  ID\n", "NAME", width = width);
    for (name, id) in &listing.routers {
        table.push_str(&format!("{:<width$}  {}\n", name, id, width = width));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("nsx-dlr").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_create() {
        let args = parse(&[
            "create", "-n", "dlr1", "-p", "VMware1!VMware1!", "-s", "large",
            "--ha-ls", "transit-ha", "--uplink-ls", "transit-uplink",
            "--uplink-ip", "172.16.2.2", "--uplink-subnet", "255.255.255.0", "--uplink-dgw", "172.16.2.1",
        ]);
        let spec = args.build_spec().unwrap();

        assert_eq!(args.command, Command::Create);
        assert_eq!(spec.name, "dlr1");
        assert_eq!(spec.size, ApplianceSize::Large);
        assert_eq!(spec.ha_segment, "transit-ha");
        assert_eq!(spec.uplink_segment, "transit-uplink");
        assert_eq!(spec.default_gateway, Some(Ipv4Addr::new(172, 16, 2, 1)));
    }

    #[test]
    fn test_create_requires_segments() {
        let args = parse(&["create", "-n", "dlr1", "-p", "secret", "--uplink-ip", "172.16.2.2"]);

        let err = args.build_spec().unwrap_err();
        assert!(matches!(err, DlrError::InvalidConfig(ref msg) if msg.contains("--ha-ls")));
    }

    #[test]
    fn test_default_size_is_compact() {
        let args = parse(&["list"]);
        assert_eq!(args.dlr_size, ApplianceSize::Compact);
        assert!(!args.verbose);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Args::try_parse_from(["nsx-dlr", "create", "-s", "huge"]).is_err());
        assert!(Args::try_parse_from(["nsx-dlr", "create", "--uplink-ip", "300.1.1.1"]).is_err());
        assert!(Args::try_parse_from(["nsx-dlr", "rename"]).is_err());
    }

    #[test]
    fn test_read_requires_name() {
        let args = parse(&["read", "-v"]);
        let err = args.request().unwrap_err();
        assert_eq!(err.to_string(), "Invalid configuration: read requires --name");
    }

    #[test]
    fn test_list_needs_no_arguments() {
        let args = parse(&["list", "-v", "-d"]);
        assert!(matches!(args.request(), Ok(Request::List)));
        assert!(args.debug);
    }

    #[test]
    fn test_listing_table() {
        let listing = RouterListing {
            routers: vec![
                ("dlr-production".to_string(), "edge-4".to_string()),
                ("dlr1".to_string(), "edge-7".to_string()),
            ],
            details: Vec::new(),
        };

        assert_eq!(
            listing_table(&listing),
            "NAME            ID\ndlr-production  edge-4\ndlr1            edge-7\n"
        );
    }

    #[test]
    fn test_describe_partial_create() {
        let created = CreatedRouter {
            id: "edge-7".to_string(),
            location: "/api/4.0/edges/edge-7".to_string(),
            default_route: DefaultRouteStatus::Failed(DlrError::ControllerRejected("bad gateway".to_string())),
        };

        let line = describe_created("dlr1", &created, false).unwrap();
        assert_eq!(
            line,
            "Created distributed router dlr1 (edge-7); default route not applied: Controller rejected request: bad gateway"
        );
    }
}
