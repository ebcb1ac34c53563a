// SPDX-License-Identifier: GPL-3.0-or-later

#[cfg(test)]
mod tests {
    use crate::{
        AccessToken, ChartsClient, IpGeolocationClient, NewReleasesQuery, Operation,
        SecondaryChartsClient, SpotifyClient, UpstreamError,
    };
    use musicdate_config::{ApiKeyHost, ClientCredentials};
    use musicdate_domain::RegionCode;
    use std::time::Duration;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // base64("test-client:test-secret")
    const BASIC_AUTH: &str = "Basic dGVzdC1jbGllbnQ6dGVzdC1zZWNyZXQ=";

    fn spotify_client(server: &MockServer) -> SpotifyClient {
        SpotifyClient::builder(ClientCredentials {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
        })
        .accounts_base_url(server.uri())
        .api_base_url(format!("{}/v1", server.uri()))
        .build()
        .unwrap()
    }

    fn charts_client(server: &MockServer) -> ChartsClient {
        ChartsClient::builder(ApiKeyHost {
            api_key: "rapid-key".to_string(),
            api_host: "shazam.p.rapidapi.com".to_string(),
        })
        .base_url(server.uri())
        .build()
        .unwrap()
    }

    fn token() -> AccessToken {
        AccessToken {
            access_token: "bearer-123".to_string(),
            token_type: Some("Bearer".to_string()),
            expires_in: Some(3600),
        }
    }

    fn new_releases_response() -> serde_json::Value {
        serde_json::json!({
            "albums": {
                "href": "https://api.spotify.com/v1/browse/new-releases?offset=0&limit=50",
                "total": 1,
                "items": [{
                    "album_type": "single",
                    "artists": [{
                        "href": "https://api.spotify.com/v1/artists/1",
                        "id": "1",
                        "name": "Charli xcx",
                        "type": "artist"
                    }],
                    "href": "https://api.spotify.com/v1/albums/abc",
                    "id": "abc",
                    "images": [{ "height": 640, "url": "https://i.scdn.co/image/640", "width": 640 }],
                    "name": "Guess",
                    "release_date": "2024-08-02",
                    "release_date_precision": "day",
                    "total_tracks": 1,
                    "type": "album"
                }]
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_access_token_uses_basic_auth_and_form_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(header("authorization", BASIC_AUTH))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "bearer-123",
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = spotify_client(&mock_server);
        let token = client.fetch_access_token().await.unwrap();

        assert_eq!(token.access_token, "bearer-123");
        assert_eq!(token.expires_in, Some(3600));
    }

    #[tokio::test]
    async fn test_fetch_access_token_failure_names_operation() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_client"))
            .mount(&mock_server)
            .await;

        let client = spotify_client(&mock_server);
        let err = client.fetch_access_token().await.unwrap_err();

        assert_eq!(err.operation(), Operation::FetchAccessToken);
        match err {
            UpstreamError::Status { status, body, .. } => {
                assert_eq!(status, 400);
                assert_eq!(body, "invalid_client");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_new_releases() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/browse/new-releases"))
            .and(query_param("limit", "50"))
            .and(query_param("offset", "0"))
            .and(header("authorization", "Bearer bearer-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(new_releases_response()))
            .mount(&mock_server)
            .await;

        let client = spotify_client(&mock_server);
        let response = client
            .fetch_new_releases(&token(), NewReleasesQuery::default())
            .await
            .unwrap();

        assert_eq!(response.albums.total, Some(1));
        assert_eq!(response.albums.items.len(), 1);
        assert_eq!(response.albums.items[0].name, "Guess");
        assert_eq!(response.albums.items[0].artists[0].name, "Charli xcx");
    }

    #[tokio::test]
    async fn test_fetch_new_releases_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/browse/new-releases"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = spotify_client(&mock_server);
        let err = client
            .fetch_new_releases(&token(), NewReleasesQuery::default())
            .await
            .unwrap_err();

        assert_eq!(err.operation(), Operation::FetchCatalog);
        assert!(matches!(err, UpstreamError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_fetch_chart_countries_sends_key_and_host() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/charts/list"))
            .and(header("X-RapidAPI-Key", "rapid-key"))
            .and(header("X-RapidAPI-Host", "shazam.p.rapidapi.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "countries": [
                    { "id": "DE", "listid": "ip-country-chart-DE", "name": "Germany" },
                    { "id": "FR", "listid": "ip-country-chart-FR", "name": "France" }
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = charts_client(&mock_server);
        let list = client.fetch_chart_countries().await.unwrap();

        assert_eq!(list.countries.len(), 2);
        assert_eq!(list.countries[1].id, "FR");
        assert_eq!(list.countries[1].name, "France");
    }

    #[tokio::test]
    async fn test_fetch_top_tracks_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/charts/track"))
            .and(query_param("locale", "en-US"))
            .and(query_param("pageSize", "100"))
            .and(query_param("startFrom", "0"))
            .and(query_param("countryCode", "FR"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tracks": [{
                    "title": "Tout va bien",
                    "subtitle": "Alonzo",
                    "share": { "href": "https://www.shazam.com/track/1" },
                    "images": { "coverart": "https://img/1.jpg" }
                }]
            })))
            .mount(&mock_server)
            .await;

        let client = charts_client(&mock_server);
        let region = RegionCode::parse("fr").unwrap();
        let response = client.fetch_top_tracks(region).await.unwrap();

        assert_eq!(response.tracks.len(), 1);
        assert_eq!(response.tracks[0].title, "Tout va bien");
    }

    #[tokio::test]
    async fn test_fetch_top_tracks_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/charts/track"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = charts_client(&mock_server);
        let err = client
            .fetch_top_tracks(RegionCode::GERMANY)
            .await
            .unwrap_err();

        assert_eq!(err.operation(), Operation::FetchTopTracks);
        assert!(matches!(err, UpstreamError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_fetch_secondary_top_songs() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/catalog/us/charts"))
            .and(query_param("types", "songs"))
            .and(query_param("limit", "25"))
            .and(header("authorization", "Bearer dev-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": { "songs": [{ "chart": "most-played", "data": [
                    { "id": "1", "attributes": { "name": "Espresso", "artistName": "Sabrina Carpenter" } }
                ] }] }
            })))
            .mount(&mock_server)
            .await;

        let client = SecondaryChartsClient::builder("dev-token")
            .base_url(mock_server.uri())
            .limit(25)
            .build()
            .unwrap();
        let response = client.fetch_top_songs("us").await.unwrap();

        assert_eq!(response.results.songs.len(), 1);
        assert_eq!(response.results.songs[0].data[0].attributes.name, "Espresso");
    }

    #[tokio::test]
    async fn test_lookup_country() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/check"))
            .and(query_param("access_key", "ip-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ip": "203.0.113.7",
                "country_code": "NL",
                "country_name": "Netherlands"
            })))
            .mount(&mock_server)
            .await;

        let client =
            IpGeolocationClient::with_base_url("ip-key", mock_server.uri(), Duration::from_secs(5))
                .unwrap();
        let response = client.lookup_country().await.unwrap();

        assert_eq!(response.country_code.as_deref(), Some("NL"));
    }

    #[tokio::test]
    async fn test_lookup_country_network_failure() {
        let client = IpGeolocationClient::with_base_url(
            "ip-key",
            "http://127.0.0.1:1",
            Duration::from_secs(2),
        )
        .unwrap();
        let err = client.lookup_country().await.unwrap_err();

        assert_eq!(err.operation(), Operation::LookupIpCountry);
        assert!(matches!(err, UpstreamError::Request { .. }));
    }
}
