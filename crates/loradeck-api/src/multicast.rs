// Multicast-group endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{CreateMulticastGroupResponse, MulticastGroupRequest};

impl ApiClient {
    /// Create a multicast group. Returns the server-assigned id.
    ///
    /// `POST /api/multicast-groups`
    pub async fn create_multicast_group(
        &self,
        request: &MulticastGroupRequest,
    ) -> Result<String, Error> {
        let url = self.api_url("multicast-groups")?;
        debug!(name = %request.name, "creating multicast group");
        let resp: CreateMulticastGroupResponse = self.post(url, request).await?;
        Ok(resp.id)
    }

    /// Update an existing multicast group.
    ///
    /// `PUT /api/multicast-groups/{id}`
    pub async fn update_multicast_group(
        &self,
        id: &str,
        request: &MulticastGroupRequest,
    ) -> Result<(), Error> {
        let url = self.api_url(&format!("multicast-groups/{id}"))?;
        debug!(id, name = %request.name, "updating multicast group");
        let _: serde_json::Value = self.put(url, request).await?;
        Ok(())
    }
}
