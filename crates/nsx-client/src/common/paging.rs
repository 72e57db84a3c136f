//! Pagination utilities for the NSX API
//!
//! NSX collections are paged by start index and page size. Each page comes
//! wrapped in an envelope (`edgePage`, `dataPage`) carrying the data and the
//! total count.

use crate::common::HttpClient;
use crate::error::NsxError;
use crate::models::PagedData;
use crate::resource::Resource;
use tracing::debug;

/// Page size requested from NSX Manager
pub const PAGE_SIZE: u64 = 256;

/// Decode one page out of its envelope
pub fn decode_page(resource: Resource, body: serde_json::Value) -> Result<PagedData, NsxError> {
    let paging = resource.paging().ok_or_else(|| {
        NsxError::InvalidRequest(format!("{} is not a paged collection", resource))
    })?;

    match body {
        serde_json::Value::Object(mut map) => {
            let page = map.remove(paging.envelope).ok_or_else(|| {
                NsxError::UnexpectedResponse(format!("{} response has no {} envelope", resource, paging.envelope))
            })?;
            Ok(serde_json::from_value(page)?)
        }
        _ => Err(NsxError::UnexpectedResponse(format!("{} response is not a JSON object", resource))),
    }
}

/// Fetch every page of a collection and flatten the records in listing order
pub async fn fetch_all_pages(
    http: &HttpClient,
    resource: Resource,
) -> Result<Vec<serde_json::Value>, NsxError> {
    let paging = resource.paging().ok_or_else(|| {
        NsxError::InvalidRequest(format!("{} is not a paged collection", resource))
    })?;
    let base = resource.expand_uri(&[])?;
    let page_size = PAGE_SIZE.to_string();

    let mut all_results = Vec::new();
    let mut start: u64 = 0;

    loop {
        let start_index = start.to_string();
        let query = http.build_query_string(&[
            (paging.start_param, start_index.as_str()),
            (paging.size_param, page_size.as_str()),
        ]);
        let path = format!("{}?{}", base, query);
        debug!("Fetching page: {}", path);

        let page = decode_page(resource, http.get(&path).await?)?;
        let fetched = page.data.len() as u64;
        all_results.extend(page.data);
        start += fetched;

        if fetched == 0 || start >= page.paging_info.total_count {
            break;
        }
    }

    Ok(all_results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_edge_page() {
        let body = json!({
            "edgePage": {
                "data": [{"objectId": "edge-1", "name": "a"}, {"objectId": "edge-2", "name": "b"}],
                "pagingInfo": {"pageSize": 256, "startIndex": 0, "totalCount": 2}
            }
        });
        let page = decode_page(Resource::NsxEdges, body).unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.paging_info.total_count, 2);
    }

    #[test]
    fn test_decode_page_missing_envelope() {
        let body = json!({"dataPage": {"data": []}});
        assert!(matches!(decode_page(Resource::NsxEdges, body), Err(NsxError::UnexpectedResponse(_))));
    }

    #[test]
    fn test_decode_page_not_an_object() {
        let body = json!(["edge-1"]);
        assert!(matches!(decode_page(Resource::NsxEdges, body), Err(NsxError::UnexpectedResponse(_))));
    }

    #[test]
    fn test_decode_page_on_single_resource() {
        let result = decode_page(Resource::NsxEdge, json!({}));
        assert!(matches!(result, Err(NsxError::InvalidRequest(_))));
    }
}
