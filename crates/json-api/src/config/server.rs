//! Listener settings

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Args;

/// Port the campaign API listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 8698;

/// Address and port the campaign API binds to.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface to bind
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to bind
    #[arg(short, long, env = "SERVER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl ServerRuntimeConfig {
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Listener {
        #[command(flatten)]
        server: ServerRuntimeConfig,
    }

    #[test]
    fn ipv6_hosts_are_accepted() -> TestResult {
        let listener =
            Listener::try_parse_from(["storeops-json", "--host", "::1", "--port", "9000"])?;

        assert_eq!(listener.server.socket_addr().to_string(), "[::1]:9000");

        Ok(())
    }

    #[test]
    fn hostnames_are_rejected() {
        let result = Listener::try_parse_from(["storeops-json", "--host", "localhost"]);

        assert!(result.is_err(), "expected a hostname to be rejected");
    }
}
