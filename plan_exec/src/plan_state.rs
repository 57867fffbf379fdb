//! # Plan and position state
//!
//! Holds the newest plan and plan track received on the subscribed topics. Changing either topic
//! drops everything held for it and resubscribes.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::{
    bus::{BusError, Subscription, SubscriptionService},
    nav::{NavMsg, Plan, PlanTrack},
};
use log::{debug, info, warn};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The newest plan and track received, along with the subscriptions they come from.
#[derive(Default)]
pub struct PlanState {
    plan_topic: String,
    plan_sub: Option<Subscription>,
    plan: Option<Plan>,

    track_topic: String,
    track_sub: Option<Subscription>,
    track: Option<PlanTrack>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PlanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan_topic(&self) -> &str {
        &self.plan_topic
    }

    pub fn track_topic(&self) -> &str {
        &self.track_topic
    }

    /// The newest plan received, if any
    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    /// The newest plan track received, if any
    pub fn track(&self) -> Option<&PlanTrack> {
        self.track.as_ref()
    }

    /// Change the plan topic.
    ///
    /// The topic is trimmed first. If it is unchanged nothing happens and `false` is returned.
    /// Otherwise the held plan is cleared and the old subscription dropped, then the new topic is
    /// subscribed to unless it is empty.
    pub fn set_plan_topic<S>(&mut self, service: &S, topic: &str) -> Result<bool, BusError>
    where
        S: SubscriptionService + ?Sized,
    {
        let topic = topic.trim();
        if topic == self.plan_topic {
            return Ok(false);
        }

        self.plan = None;
        self.plan_sub = None;
        self.plan_topic = topic.to_string();

        self.plan_sub = resubscribe(service, topic)?;

        Ok(true)
    }

    /// Change the plan track topic. Behaves like [`PlanState::set_plan_topic`].
    pub fn set_track_topic<S>(&mut self, service: &S, topic: &str) -> Result<bool, BusError>
    where
        S: SubscriptionService + ?Sized,
    {
        let topic = topic.trim();
        if topic == self.track_topic {
            return Ok(false);
        }

        self.track = None;
        self.track_sub = None;
        self.track_topic = topic.to_string();

        self.track_sub = resubscribe(service, topic)?;

        Ok(true)
    }

    /// Replace the held plan.
    pub fn on_plan(&mut self, plan: Plan) {
        debug!("Received plan \"{}\" with {} points", plan.id, plan.points.len());
        self.plan = Some(plan);
    }

    /// Replace the held plan track.
    pub fn on_track(&mut self, track: PlanTrack) {
        self.track = Some(track);
    }

    /// Take all pending messages from the subscriptions, keeping the newest of each kind.
    ///
    /// Messages of the wrong kind for their topic are ignored.
    pub fn process_messages(&mut self) {
        let mut newest_plan = None;
        let mut newest_track = None;

        if let Some(ref sub) = self.plan_sub {
            for msg in sub.drain() {
                match msg {
                    NavMsg::Plan(p) => newest_plan = Some(p),
                    NavMsg::PlanTrack(_) => {
                        warn!("Ignoring plan track received on plan topic {}", sub.topic())
                    }
                }
            }
        }

        if let Some(ref sub) = self.track_sub {
            for msg in sub.drain() {
                match msg {
                    NavMsg::PlanTrack(t) => newest_track = Some(t),
                    NavMsg::Plan(_) => {
                        warn!("Ignoring plan received on plan track topic {}", sub.topic())
                    }
                }
            }
        }

        if let Some(p) = newest_plan {
            self.on_plan(p);
        }
        if let Some(t) = newest_track {
            self.on_track(t);
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn resubscribe<S>(service: &S, topic: &str) -> Result<Option<Subscription>, BusError>
where
    S: SubscriptionService + ?Sized,
{
    if topic.is_empty() {
        info!("Unsubscribed, no topic set");
        return Ok(None);
    }

    let sub = service.subscribe(topic)?;
    info!("Subscribed to {}", topic);

    Ok(Some(sub))
}
