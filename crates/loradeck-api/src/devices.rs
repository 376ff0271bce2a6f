// Device endpoints
//
// The console's one heavyweight read: historical uplink snapshots with
// per-gateway reception records for the geolocation view.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::SearchLocationResponse;

impl ApiClient {
    /// Fetch historical uplink snapshots for a device.
    ///
    /// `GET /api/devices/{dev_eui}/search-location?limit=N`
    ///
    /// Returns at most `limit` snapshots, each carrying zero or more
    /// per-gateway reception records. The caller is responsible for
    /// validating `limit` before building the request.
    pub async fn search_location(
        &self,
        dev_eui: &str,
        limit: u32,
    ) -> Result<SearchLocationResponse, Error> {
        let mut url = self.api_url(&format!("devices/{dev_eui}/search-location"))?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        debug!(dev_eui, limit, "fetching uplink snapshots");
        self.get(url).await
    }
}
