// Gateway endpoints
//
// Remote control messages are fire-and-forget strings relayed by the
// server over its command transport; the only structured part of the
// exchange is the display-only response text.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{RemoteMessageRequest, RemoteMessageResponse};

impl ApiClient {
    /// Send a remote control message to a gateway.
    ///
    /// `POST /api/gateways/{gateway_id}/remote`
    ///
    /// `message` is a pre-rendered `<topic>?<query-params>` command
    /// string (see `loradeck-core`'s `GatewayCommand`). Returns the
    /// gateway's response text verbatim for the console's log buffer.
    pub async fn send_remote_message(
        &self,
        gateway_id: &str,
        message: &str,
    ) -> Result<String, Error> {
        let url = self.api_url(&format!("gateways/{gateway_id}/remote"))?;
        debug!(gateway_id, message, "sending remote gateway message");
        let resp: RemoteMessageResponse = self
            .post(
                url,
                &RemoteMessageRequest {
                    message: message.to_owned(),
                },
            )
            .await?;
        Ok(resp.response)
    }
}
