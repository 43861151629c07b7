use fridgescan_schema::ChatCompletionRequest;

pub struct VisionApi;

impl VisionApi {
    pub fn build_request(
        client: &reqwest::Client,
        api_url: &url::Url,
        api_key: &str,
        body: &ChatCompletionRequest,
    ) -> Result<reqwest::Request, reqwest::Error> {
        client
            .post(api_url.clone())
            .bearer_auth(api_key)
            .json(body)
            .build()
    }

    pub async fn post(
        client: &reqwest::Client,
        api_url: &url::Url,
        api_key: &str,
        body: &ChatCompletionRequest,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let req = Self::build_request(client, api_url, api_key, body)?;
        client.execute(req).await
    }
}
