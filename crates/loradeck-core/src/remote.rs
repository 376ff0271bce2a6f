// ── Gateway remote control ──
//
// Commands a gateway understands over the control channel. The wire
// message is a topic path plus query parameters; the server relays it
// verbatim and returns the gateway's reply as plain text.

use url::form_urlencoded;

use crate::model::Eui64;

/// A remote command to run on a gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCommand {
    Ping,
    Uptime,
    Temperature,
    Start { config_uri: String, checksum: String },
    Reboot { config_uri: String, checksum: String },
    Stop,
}

impl GatewayCommand {
    /// Control-topic suffix for this command.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Ping => "gateway/control/ping",
            Self::Uptime => "gateway/control/uptime",
            Self::Temperature => "gateway/control/temp",
            Self::Start { .. } => "gateway/control/start",
            Self::Reboot { .. } => "gateway/control/reboot",
            Self::Stop => "gateway/control/stop",
        }
    }

    /// Short label for menus and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ping => "Ping",
            Self::Uptime => "Uptime",
            Self::Temperature => "Temperature",
            Self::Start { .. } => "Start",
            Self::Reboot { .. } => "Reboot",
            Self::Stop => "Stop",
        }
    }

    /// Build the relay message for one gateway. Start and reboot carry
    /// the packet-forwarder config URI and its checksum so the gateway
    /// can verify what it is about to load.
    pub fn message(&self, gateway_id: &Eui64) -> String {
        let mut params = form_urlencoded::Serializer::new(String::new());
        params.append_pair("gateway_id", &format!("0x{gateway_id}"));
        match self {
            Self::Start { config_uri, checksum } | Self::Reboot { config_uri, checksum } => {
                params
                    .append_pair("config_uri", config_uri)
                    .append_pair("checksum", checksum);
            }
            Self::Ping | Self::Uptime | Self::Temperature | Self::Stop => {}
        }
        format!("{}?{}", self.topic(), params.finish())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn eui() -> Eui64 {
        "a84041ffff1f2e3d".parse().unwrap()
    }

    #[test]
    fn simple_commands_carry_only_the_gateway_id() {
        assert_eq!(
            GatewayCommand::Ping.message(&eui()),
            "gateway/control/ping?gateway_id=0xa84041ffff1f2e3d"
        );
        assert_eq!(
            GatewayCommand::Stop.message(&eui()),
            "gateway/control/stop?gateway_id=0xa84041ffff1f2e3d"
        );
    }

    #[test]
    fn start_and_reboot_carry_config_uri_and_checksum() {
        let cmd = GatewayCommand::Reboot {
            config_uri: "https://cfg.example.com/global_conf.json".into(),
            checksum: "d41d8cd9".into(),
        };
        let msg = cmd.message(&eui());
        assert!(msg.starts_with("gateway/control/reboot?gateway_id=0xa84041ffff1f2e3d"));
        assert!(msg.contains("config_uri=https%3A%2F%2Fcfg.example.com%2Fglobal_conf.json"));
        assert!(msg.contains("checksum=d41d8cd9"));
    }

    #[test]
    fn temperature_uses_the_short_topic() {
        assert_eq!(GatewayCommand::Temperature.topic(), "gateway/control/temp");
    }
}
