use yew::prelude::*;

use crate::services::api::ApiClient;

/// Client built once per component from the stored credential
#[hook]
pub fn use_api_client() -> ApiClient {
    let client = use_memo((), |_| ApiClient::new());
    (*client).clone()
}
