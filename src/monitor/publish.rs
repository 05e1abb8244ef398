//! Message broker side of the monitor.

use std::time::Duration;

use rumqttc::{Client, Event, MqttOptions, Outgoing, QoS};

use crate::tracing::prelude::*;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("MQTT client error: {0}")]
    Client(#[from] rumqttc::ClientError),
    #[error("MQTT connection error: {0}")]
    Connection(#[from] rumqttc::ConnectionError),
    #[error("connection closed before {0} was sent")]
    Closed(String),
}

/// Accepts `(topic, payload)` pairs. Delivery is fire-and-forget; an `Ok`
/// only means the message left this process.
pub trait Publisher {
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), PublishError>;
}

impl<P: Publisher + ?Sized> Publisher for &mut P {
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), PublishError> {
        (**self).publish(topic, payload)
    }
}

/// Opens a fresh broker connection for every message, sends it at QoS 0 and
/// disconnects once it has been written.
pub struct MqttPublisher {
    host: String,
    port: u16,
    client_id: String,
    keep_alive: Duration,
}

impl MqttPublisher {
    const REQUEST_CAPACITY: usize = 10;

    pub fn new(host: impl Into<String>, port: u16, client_id: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            client_id: client_id.into(),
            keep_alive: Duration::from_secs(60),
        }
    }

    fn options(&self) -> MqttOptions {
        let mut options = MqttOptions::new(self.client_id.clone(), self.host.clone(), self.port);
        options.set_keep_alive(self.keep_alive);
        options.set_clean_session(true);
        options
    }
}

impl Publisher for MqttPublisher {
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), PublishError> {
        let (client, mut connection) = Client::new(self.options(), Self::REQUEST_CAPACITY);
        client.publish(topic, QoS::AtMostOnce, false, payload.as_bytes())?;

        let mut sent = false;
        for notification in connection.iter() {
            match notification? {
                Event::Outgoing(Outgoing::Publish(_)) => {
                    trace!(topic = %topic, "publish flushed");
                    sent = true;
                    client.disconnect()?;
                }
                Event::Outgoing(Outgoing::Disconnect) => break,
                _ => {}
            }
        }

        if sent {
            Ok(())
        } else {
            Err(PublishError::Closed(topic.to_string()))
        }
    }
}
