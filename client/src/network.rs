use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::error::ClientError;

/// Public clusters plus a local test validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Network {
    #[default]
    Devnet,
    Testnet,
    #[value(name = "mainnet-beta", alias = "mainnet")]
    MainnetBeta,
    #[value(alias = "localhost")]
    Localnet,
}

impl Network {
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Network::Devnet => "https://api.devnet.solana.com",
            Network::Testnet => "https://api.testnet.solana.com",
            Network::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Network::Localnet => "http://127.0.0.1:8899",
        }
    }

    pub fn ws_url(&self) -> &'static str {
        match self {
            Network::Devnet => "wss://api.devnet.solana.com",
            Network::Testnet => "wss://api.testnet.solana.com",
            Network::MainnetBeta => "wss://api.mainnet-beta.solana.com",
            Network::Localnet => "ws://127.0.0.1:8900",
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint {
            rpc_url: self.rpc_url().to_string(),
            ws_url: self.ws_url().to_string(),
        }
    }
}

impl FromStr for Network {
    type Err = ClientError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "devnet" => Ok(Network::Devnet),
            "testnet" => Ok(Network::Testnet),
            "mainnet-beta" | "mainnet" => Ok(Network::MainnetBeta),
            "localnet" | "localhost" => Ok(Network::Localnet),
            _ => Err(ClientError::UnknownNetwork(name.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
            Network::MainnetBeta => "mainnet-beta",
            Network::Localnet => "localnet",
        };
        f.write_str(name)
    }
}

/// HTTP endpoint for requests and websocket endpoint for subscriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub rpc_url: String,
    pub ws_url: String,
}

impl Endpoint {
    /// Builds an endpoint from an explicit RPC URL.
    ///
    /// The websocket URL swaps `http(s)` for `ws(s)`; an explicit port is
    /// incremented by one, which is where a validator serves pubsub.
    pub fn from_url(rpc_url: &str) -> Self {
        let (scheme, rest) = match rpc_url.split_once("://") {
            Some(("https", rest)) => ("wss", rest),
            Some(("http", rest)) => ("ws", rest),
            Some((other, rest)) => (other, rest),
            None => ("ws", rpc_url),
        };

        let (authority, path) = match rest.find('/') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };

        let authority = match authority.rsplit_once(':') {
            Some((host, port)) => match port.parse::<u16>() {
                Ok(port) => format!("{}:{}", host, port.saturating_add(1)),
                Err(_) => authority.to_string(),
            },
            None => authority.to_string(),
        };

        Endpoint {
            rpc_url: rpc_url.to_string(),
            ws_url: format!("{}://{}{}", scheme, authority, path),
        }
    }
}

impl From<Network> for Endpoint {
    fn from(network: Network) -> Self {
        network.endpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_network_names() {
        assert_eq!("devnet".parse::<Network>().unwrap(), Network::Devnet);
        assert_eq!("Testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::MainnetBeta);
        assert_eq!("mainnet-beta".parse::<Network>().unwrap(), Network::MainnetBeta);
        assert_eq!("localhost".parse::<Network>().unwrap(), Network::Localnet);

        let err = "moonnet".parse::<Network>().unwrap_err();
        assert!(matches!(err, ClientError::UnknownNetwork(name) if name == "moonnet"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for network in [
            Network::Devnet,
            Network::Testnet,
            Network::MainnetBeta,
            Network::Localnet,
        ] {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
    }

    #[test]
    fn default_is_devnet() {
        let endpoint = Endpoint::from(Network::default());
        assert_eq!(endpoint.rpc_url, "https://api.devnet.solana.com");
        assert_eq!(endpoint.ws_url, "wss://api.devnet.solana.com");
    }

    #[test]
    fn explicit_url_derives_websocket() {
        let local = Endpoint::from_url("http://127.0.0.1:8899");
        assert_eq!(local, Network::Localnet.endpoint());

        let hosted = Endpoint::from_url("https://rpc.example.com/key/abc");
        assert_eq!(hosted.ws_url, "wss://rpc.example.com/key/abc");

        let custom_port = Endpoint::from_url("http://validator:10899/");
        assert_eq!(custom_port.ws_url, "ws://validator:10900/");
    }
}
