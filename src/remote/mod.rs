// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Remote playback control.
//!
//! This module provides the [`RemoteControl`] interface used by the event
//! interpreter to drive a Roon zone, and [`RoonClient`], its implementation
//! over the HTTP API extension.
//!
//! Every call is synchronous and is made exactly once. There is no retry and
//! no backoff, a failed request surfaces as [`RemoteError::Transport`].

pub(crate) mod error;
pub(crate) mod model;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::info;

pub(crate) use error::RemoteError;

use crate::remote::model::{ZoneList, ZoneResponse};

const API_PREFIX: &str = "roonAPI";

/// Identifiers of the controlled zone and output, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Session {
    pub zone_id: String,
    pub output_id: String,
    pub output_name: String,
}

/// Playback and volume commands against a single remote zone.
pub(crate) trait RemoteControl {
    /// Reads the current volume of the named output in the zone.
    fn get_volume(&self, zone_id: &str, output_name: &str) -> Result<i32, RemoteError>;

    /// Sets the absolute volume of an output, `volume` is within [0, 100].
    fn set_volume(&self, output_id: &str, volume: u8) -> Result<(), RemoteError>;

    fn play_pause(&self, zone_id: &str) -> Result<(), RemoteError>;

    fn play_next(&self, zone_id: &str) -> Result<(), RemoteError>;

    fn play_previous(&self, zone_id: &str) -> Result<(), RemoteError>;
}

/// A blocking client for the Roon HTTP API extension.
pub(crate) struct RoonClient {
    http: Client,
    base_url: String,
}

impl RoonClient {
    /// Creates a client for the extension listening at `base_url`.
    pub(crate) fn new(base_url: &str) -> Result<Self, RemoteError> {
        let http = Client::builder().build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolves the zone and output display names into a [`Session`].
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::NotFound`] if either name has no exact match.
    pub(crate) fn resolve_session(
        &self,
        zone_name: &str,
        output_name: &str,
    ) -> Result<Session, RemoteError> {
        let zone_id = self.discover_zone(zone_name)?;
        let (output_id, _) = self.discover_output(&zone_id, output_name)?;

        Ok(Session {
            zone_id,
            output_id,
            output_name: output_name.to_string(),
        })
    }

    /// Looks up the id of the zone with display name `name`.
    pub(crate) fn discover_zone(&self, name: &str) -> Result<String, RemoteError> {
        let zones: ZoneList = self.fetch("listZones", &[])?;
        let zone_id = model::find_zone(&zones, name)?.to_string();
        info!("Found zone {}, id: {}", name, zone_id);

        Ok(zone_id)
    }

    /// Looks up the output with display name `name` in the zone, returning
    /// its id and current volume.
    pub(crate) fn discover_output(
        &self,
        zone_id: &str,
        name: &str,
    ) -> Result<(String, i32), RemoteError> {
        let response: ZoneResponse = self.fetch("getZone", &[("zoneId", zone_id)])?;
        let volume = model::output_volume(&response.zone, name);
        let output = model::find_output(&response.zone, name)?;
        info!(
            "{} {} volume: {}",
            output.output_id, output.display_name, volume
        );

        Ok((output.output_id.clone(), volume))
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_PREFIX, name)
    }

    /// Issues a read request and decodes the JSON body.
    fn fetch<T: DeserializeOwned>(
        &self,
        name: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RemoteError> {
        let body = self
            .http
            .get(self.endpoint(name))
            .query(query)
            .send()?
            .error_for_status()?
            .text()?;

        Ok(serde_json::from_str(&body)?)
    }

    /// Issues a command request, the response body is not inspected.
    fn send(&self, name: &str, query: &[(&str, &str)]) -> Result<(), RemoteError> {
        self.http
            .get(self.endpoint(name))
            .query(query)
            .send()?
            .error_for_status()?;

        Ok(())
    }
}

impl RemoteControl for RoonClient {
    fn get_volume(&self, zone_id: &str, output_name: &str) -> Result<i32, RemoteError> {
        let response: ZoneResponse = self.fetch("getZone", &[("zoneId", zone_id)])?;

        Ok(model::output_volume(&response.zone, output_name))
    }

    fn set_volume(&self, output_id: &str, volume: u8) -> Result<(), RemoteError> {
        info!("Volume: {}", volume);
        let volume = volume.to_string();
        self.send(
            "change_volume",
            &[("volume", volume.as_str()), ("outputId", output_id)],
        )
    }

    fn play_pause(&self, zone_id: &str) -> Result<(), RemoteError> {
        info!("Play/pause track");
        self.send("play_pause", &[("zoneId", zone_id)])
    }

    fn play_next(&self, zone_id: &str) -> Result<(), RemoteError> {
        info!("Next track");
        self.send("next", &[("zoneId", zone_id)])
    }

    fn play_previous(&self, zone_id: &str) -> Result<(), RemoteError> {
        info!("Previous track");
        self.send("previous", &[("zoneId", zone_id)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread::{self, JoinHandle},
    };

    use serde_json::json;

    use crate::remote::error::Lookup;

    /// Serves a single HTTP response and hands back the request line.
    fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (base_url, handle)
    }

    fn client(base_url: &str) -> RoonClient {
        RoonClient {
            http: Client::builder().no_proxy().build().unwrap(),
            base_url: base_url.to_string(),
        }
    }

    fn zone_body() -> String {
        json!({
            "zone": {
                "outputs": [
                    { "output_id": "out-1", "display_name": "woonkamer", "volume": { "value": 33 } },
                    { "output_id": "out-2", "display_name": "keuken", "volume": { "value": 12 } }
                ]
            }
        })
        .to_string()
    }

    #[test]
    fn endpoints_are_rooted_at_the_api_prefix() {
        let client = RoonClient::new("http://roon:3001/").unwrap();

        assert_eq!(
            client.endpoint("listZones"),
            "http://roon:3001/roonAPI/listZones"
        );
        assert_eq!(
            client.endpoint("change_volume"),
            "http://roon:3001/roonAPI/change_volume"
        );
    }

    #[test]
    fn set_volume_sends_volume_and_output_id() {
        let (base_url, server) = serve_once("200 OK", "{}");

        client(&base_url).set_volume("out-1", 42).unwrap();

        assert_eq!(
            server.join().unwrap(),
            "GET /roonAPI/change_volume?volume=42&outputId=out-1 HTTP/1.1"
        );
    }

    #[test]
    fn get_volume_queries_zone_and_reads_named_output() {
        let (base_url, server) = serve_once("200 OK", &zone_body());

        let volume = client(&base_url).get_volume("z1", "woonkamer").unwrap();

        assert_eq!(volume, 33);
        assert_eq!(
            server.join().unwrap(),
            "GET /roonAPI/getZone?zoneId=z1 HTTP/1.1"
        );
    }

    #[test]
    fn transport_commands_target_the_zone() {
        let cases: [(&str, fn(&RoonClient, &str) -> Result<(), RemoteError>); 3] = [
            ("play_pause", |c, z| c.play_pause(z)),
            ("next", |c, z| c.play_next(z)),
            ("previous", |c, z| c.play_previous(z)),
        ];

        for (path, command) in cases {
            let (base_url, server) = serve_once("200 OK", "");

            command(&client(&base_url), "z1").unwrap();

            assert_eq!(
                server.join().unwrap(),
                format!("GET /roonAPI/{}?zoneId=z1 HTTP/1.1", path)
            );
        }
    }

    #[test]
    fn error_status_is_a_transport_fault() {
        let (base_url, server) = serve_once("500 Internal Server Error", "");

        let err = client(&base_url).play_pause("z1").unwrap_err();

        assert!(matches!(err, RemoteError::Transport(_)));
        server.join().unwrap();
    }

    #[test]
    fn error_status_on_read_is_a_transport_fault() {
        let (base_url, server) = serve_once("404 Not Found", "{}");

        let err = client(&base_url).get_volume("z1", "woonkamer").unwrap_err();

        assert!(matches!(err, RemoteError::Transport(_)));
        server.join().unwrap();
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let (base_url, server) = serve_once("200 OK", "<html>roon</html>");

        let err = client(&base_url).get_volume("z1", "woonkamer").unwrap_err();

        assert!(matches!(err, RemoteError::Decode(_)));
        server.join().unwrap();
    }

    #[test]
    fn discover_zone_matches_exact_name() {
        let body = json!({
            "zones": [
                { "zone_id": "z0", "display_name": "keuken" },
                { "zone_id": "z1", "display_name": "woonkamer" }
            ]
        })
        .to_string();
        let (base_url, server) = serve_once("200 OK", &body);

        let zone_id = client(&base_url).discover_zone("woonkamer").unwrap();

        assert_eq!(zone_id, "z1");
        assert_eq!(
            server.join().unwrap(),
            "GET /roonAPI/listZones HTTP/1.1"
        );
    }

    #[test]
    fn discover_zone_without_exact_match_is_not_found() {
        let body = json!({
            "zones": [{ "zone_id": "z1", "display_name": "Woonkamer boven" }]
        })
        .to_string();
        let (base_url, server) = serve_once("200 OK", &body);

        let err = client(&base_url).discover_zone("Woonkamer").unwrap_err();

        assert!(matches!(
            err,
            RemoteError::NotFound {
                kind: Lookup::Zone,
                ..
            }
        ));
        server.join().unwrap();
    }

    #[test]
    fn discover_output_returns_id_and_volume() {
        let (base_url, server) = serve_once("200 OK", &zone_body());

        let (output_id, volume) = client(&base_url).discover_output("z1", "keuken").unwrap();

        assert_eq!(output_id, "out-2");
        assert_eq!(volume, 12);
        assert_eq!(
            server.join().unwrap(),
            "GET /roonAPI/getZone?zoneId=z1 HTTP/1.1"
        );
    }

    #[test]
    fn discover_output_without_exact_match_is_not_found() {
        let (base_url, server) = serve_once("200 OK", &zone_body());

        let err = client(&base_url).discover_output("z1", "Keuken").unwrap_err();

        assert!(matches!(
            err,
            RemoteError::NotFound {
                kind: Lookup::Output,
                ..
            }
        ));
        server.join().unwrap();
    }
}
