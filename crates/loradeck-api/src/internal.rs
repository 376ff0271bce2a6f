// Internal endpoints
//
// Server-side configuration reads that back console form widgets.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ListRegionsResponse, RegionListItem};

impl ApiClient {
    /// List the region configurations enabled on the server.
    ///
    /// `GET /api/internal/regions`
    pub async fn list_regions(&self) -> Result<Vec<RegionListItem>, Error> {
        let url = self.api_url("internal/regions")?;
        debug!("listing region configurations");
        let resp: ListRegionsResponse = self.get(url).await?;
        Ok(resp.regions)
    }
}
