//! LiveReload wire messages.
//!
//! Clients open with a `hello` command and the server answers with its own
//! `hello` listing the supported protocols. After that the server pushes one
//! `reload` command per file change. Anything else the client sends is ignored.

use serde::{Deserialize, Serialize};

/// Server name reported in the handshake.
pub const SERVER_NAME: &str = "elements-server";

/// Protocols announced in the handshake reply.
pub const PROTOCOLS: [&str; 5] = [
    "http://livereload.com/protocols/official-7",
    "http://livereload.com/protocols/official-8",
    "http://livereload.com/protocols/official-9",
    "http://livereload.com/protocols/2.x-origin-version-negotiation",
    "http://livereload.com/protocols/2.x-remote-control",
];

/// Message sent from the server to a reload client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Handshake reply.
    Hello {
        protocols: &'static [&'static str],
        #[serde(rename = "serverName")]
        server_name: &'static str,
    },
    /// Reload request for a changed path.
    Reload { path: String },
}

impl ServerMessage {
    /// Handshake reply with the fixed protocol list.
    #[must_use]
    pub fn hello() -> Self {
        Self::Hello {
            protocols: &PROTOCOLS,
            server_name: SERVER_NAME,
        }
    }

    /// Reload request for `path`.
    #[must_use]
    pub fn reload(path: impl Into<String>) -> Self {
        Self::Reload { path: path.into() }
    }
}

/// Message received from a reload client.
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
enum ClientMessage {
    Hello,
    #[serde(other)]
    Unknown,
}

/// Reply to a text frame from a client, if any.
///
/// Only `hello` gets an answer. Other commands and malformed JSON yield `None`.
pub(crate) fn reply_to(text: &str) -> Option<ServerMessage> {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Hello) => Some(ServerMessage::hello()),
        Ok(ClientMessage::Unknown) | Err(_) => None,
    }
}
