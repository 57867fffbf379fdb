//! # Topic Bus
//!
//! In-process publish/subscribe of navigation messages, keyed by topic name.
//!
//! Subscribers own a [`Subscription`], which queues every message published on its topic until
//! it is drained. Dropping the subscription unsubscribes; the bus forgets a subscriber the next
//! time a publish to its topic fails to reach it.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;
use std::{
    collections::HashMap,
    sync::{
        mpsc::{channel, Receiver, Sender, TryIter},
        Arc, Mutex,
    },
};

use crate::nav::NavMsg;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A service which can subscribe to named topics.
pub trait SubscriptionService<T = NavMsg> {
    /// Subscribe to the given topic.
    fn subscribe(&self, topic: &str) -> Result<Subscription<T>, BusError>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// In-process topic bus.
///
/// Cloning the bus gives another handle onto the same set of topics, so publishers may live on
/// other threads.
pub struct TopicBus<T = NavMsg> {
    topics: Arc<Mutex<HashMap<String, Vec<Sender<T>>>>>,
}

/// A live subscription to a topic.
pub struct Subscription<T = NavMsg> {
    topic: String,
    receiver: Receiver<T>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BusError {
    #[error("Cannot subscribe or publish to an empty topic name")]
    EmptyTopic,

    #[error("The topic table lock was poisoned by a panicking thread")]
    Poisoned,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<T> TopicBus<T> {
    pub fn new() -> Self {
        Self {
            topics: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T: Clone> TopicBus<T> {
    /// Publish a message on the given topic.
    ///
    /// Returns the number of subscribers the message was delivered to.
    pub fn publish<M: Into<T>>(&self, topic: &str, msg: M) -> Result<usize, BusError> {
        if topic.is_empty() {
            return Err(BusError::EmptyTopic);
        }

        let msg = msg.into();
        let mut topics = self.topics.lock().map_err(|_| BusError::Poisoned)?;

        let senders = match topics.get_mut(topic) {
            Some(s) => s,
            None => return Ok(0),
        };

        // Deliver to every live subscriber, dropping those which have gone away
        senders.retain(|s| s.send(msg.clone()).is_ok());
        let num_delivered = senders.len();

        if senders.is_empty() {
            topics.remove(topic);
        }

        trace!("Published on {} to {} subscriber(s)", topic, num_delivered);

        Ok(num_delivered)
    }
}

impl<T> SubscriptionService<T> for TopicBus<T> {
    fn subscribe(&self, topic: &str) -> Result<Subscription<T>, BusError> {
        if topic.is_empty() {
            return Err(BusError::EmptyTopic);
        }

        let (tx, rx) = channel();

        self.topics
            .lock()
            .map_err(|_| BusError::Poisoned)?
            .entry(topic.to_string())
            .or_insert_with(Vec::new)
            .push(tx);

        Ok(Subscription {
            topic: topic.to_string(),
            receiver: rx,
        })
    }
}

impl<T> Clone for TopicBus<T> {
    fn clone(&self) -> Self {
        Self {
            topics: self.topics.clone(),
        }
    }
}

impl<T> Default for TopicBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Subscription<T> {
    /// Name of the subscribed topic
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Iterate over all messages received since the last drain, oldest first.
    pub fn drain(&self) -> TryIter<'_, T> {
        self.receiver.try_iter()
    }

    /// Return the newest pending message, discarding any older ones.
    pub fn latest(&self) -> Option<T> {
        self.drain().last()
    }
}
