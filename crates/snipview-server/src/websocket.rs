//! WebSocket live preview updates.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use snipview_detect::Classification;

/// Messages pushed to live preview pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveMessage {
    /// A snippet was recompiled
    Preview {
        /// Path relative to the snippets directory
        path: String,
        classification: Classification,
        /// Complete preview document
        html: String,
    },

    /// A snippet file went away
    Removed { path: String },

    /// Connection established
    Connected,
}

/// Hub for broadcasting live messages to all connected clients.
#[derive(Debug, Clone)]
pub struct LiveHub {
    sender: broadcast::Sender<LiveMessage>,
}

impl LiveHub {
    /// Create a new live hub.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Send a message to all connected clients.
    pub fn send(&self, msg: LiveMessage) {
        // No receivers is fine
        let _ = self.sender.send(msg);
    }

    /// Subscribe to live messages.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveMessage> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for LiveHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Client script for live snippet pages.
///
/// Expects `window.__SNIPVIEW_PATH` and an iframe with id `preview`. Only
/// messages for that path are applied; the socket reconnects with backoff.
pub fn live_client_script() -> &'static str {
    LIVE_CLIENT_SCRIPT
}

const LIVE_CLIENT_SCRIPT: &str = r#"
(function() {
  'use strict';

  var maxReconnectAttempts = 10;
  var reconnectAttempts = 0;

  function status(text) {
    var el = document.getElementById('live-status');
    if (el) {
      el.textContent = text;
    }
  }

  function connect() {
    var protocol = location.protocol === 'https:' ? 'wss://' : 'ws://';
    var ws = new WebSocket(protocol + location.host + '/__live');

    ws.onopen = function() {
      reconnectAttempts = 0;
      status('live');
    };

    ws.onmessage = function(event) {
      var msg = JSON.parse(event.data);
      if (msg.path && msg.path !== window.__SNIPVIEW_PATH) {
        return;
      }

      switch (msg.type) {
        case 'preview':
          var frame = document.getElementById('preview');
          if (frame) {
            frame.srcdoc = msg.html;
          }
          var kind = document.getElementById('kind');
          if (kind) {
            kind.textContent = msg.classification.compilationType;
          }
          status('updated ' + new Date().toLocaleTimeString());
          break;

        case 'removed':
          status('file removed');
          break;

        case 'connected':
          status('live');
          break;
      }
    };

    ws.onclose = function() {
      status('disconnected');
      if (reconnectAttempts < maxReconnectAttempts) {
        reconnectAttempts++;
        setTimeout(connect, 1000 * reconnectAttempts);
      }
    };

    ws.onerror = function(e) {
      console.error('[live] WebSocket error:', e);
    };
  }

  connect();
})();
"#;
