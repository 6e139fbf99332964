use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Faultline error-translation server
#[derive(Debug, Parser)]
#[command(name = "faultline", about = "Translates request failures into structured HTTP error responses")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "faultline.toml", env = "FAULTLINE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "FAULTLINE_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directive (e.g. `info,faultline_mapper=debug`)
    #[arg(long, default_value = "info", env = "FAULTLINE_LOG")]
    pub log_filter: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["faultline"]).unwrap();
        assert_eq!(args.config, PathBuf::from("faultline.toml"));
        assert!(args.listen.is_none());
        assert_eq!(args.log_filter, "info");
    }

    #[test]
    fn listen_override_parses() {
        let args = Args::try_parse_from(["faultline", "-c", "/etc/faultline.toml", "--listen", "127.0.0.1:9000"]).unwrap();
        assert_eq!(args.config, PathBuf::from("/etc/faultline.toml"));
        assert_eq!(args.listen, Some(SocketAddr::from(([127, 0, 0, 1], 9000))));
    }
}
